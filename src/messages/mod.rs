use tokio::sync::oneshot;

use crate::domain::{Role, UserCreate, UserRecord};
use crate::error::UserError;
use crate::user_actor::BootstrapOutcome;

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Requests served by the [`UserService`](crate::user_actor::UserService) actor.
/// Each variant carries its parameters and a oneshot channel for the reply.
#[derive(Debug)]
pub enum UserRequest {
    CreateUser {
        params: UserCreate,
        respond_to: ServiceResponse<UserRecord, UserError>,
    },
    GetUserByEmail {
        email: String,
        respond_to: ServiceResponse<Option<UserRecord>, UserError>,
    },
    VerifyCredentials {
        email: String,
        password: Secret,
        respond_to: ServiceResponse<Option<UserRecord>, UserError>,
    },
    GetUsersByRole {
        role: Role,
        respond_to: ServiceResponse<Vec<UserRecord>, UserError>,
    },
    ListUsers {
        respond_to: ServiceResponse<Vec<UserRecord>, UserError>,
    },
    DeleteUser {
        id: String,
        respond_to: ServiceResponse<bool, UserError>,
    },
    InitializeDefaultSuperAdmin {
        respond_to: ServiceResponse<BootstrapOutcome, UserError>,
    },
    Shutdown,
}

/// A password in flight. Prints as `***`.
#[derive(Clone, PartialEq)]
pub struct Secret(pub String);

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("***")
    }
}

impl From<String> for Secret {
    fn from(s: String) -> Self {
        Secret(s)
    }
}

impl From<&str> for Secret {
    fn from(s: &str) -> Self {
        Secret(s.to_string())
    }
}
