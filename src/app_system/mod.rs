//! System orchestration, startup, and shutdown logic.

pub mod logging;
pub mod portal_system;

pub use logging::*;
pub use portal_system::*;
