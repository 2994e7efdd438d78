//! Cloneable handles for talking to service actors.

#[macro_use]
mod macros;
mod user_client;

pub use user_client::*;
