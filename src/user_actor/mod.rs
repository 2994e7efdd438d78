//! User management: the synchronous core and the actor that serializes access to it.

mod manager;
mod service;

pub use manager::*;
pub use service::*;
