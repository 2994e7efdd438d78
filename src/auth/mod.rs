//! Login state for one client: the persisted current-session record and the
//! in-memory state machine the UI observes.

mod session;
mod session_store;

pub use session::*;
pub use session_store::*;
