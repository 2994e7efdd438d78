pub mod role;
pub mod user;
pub mod session;

pub use role::*;
pub use user::*;
pub use session::*;
