//! # StoreOS access
//!
//! Accounts, login sessions and role-based routing for the StoreOS/BusinessOS
//! admin portal, kept in a client-local key-value store.
//!
//! - [`user_actor::UserManager`] does user management over the stored collection;
//!   [`user_actor::UserService`] serves it as an actor behind a [`clients::UserClient`].
//! - [`auth::AuthSession`] tracks who is logged in and persists it.
//! - [`navigation`] maps a role to its menu, landing route and allowed paths.
//! - [`app_system::PortalSystem`] wires it together and handles startup and shutdown.
//!
//! ```no_run
//! # async fn demo() -> Result<(), storeos_access::error::AppError> {
//! use storeos_access::{app_system::PortalSystem, config::AppConfig};
//!
//! let system = PortalSystem::start(&AppConfig::default()).await?;
//! let route = system.sign_in("superadmin@businessos.com", "admin123").await?;
//! assert_eq!(route, "/super-admin/operational-managers");
//! system.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod app_system;
pub mod auth;
pub mod clients;
pub mod config;
pub mod domain;
pub mod error;
pub mod messages;
pub mod navigation;
pub mod password;
pub mod storage;
pub mod user_actor;
pub mod user_store;

#[cfg(test)]
mod mock_framework;
