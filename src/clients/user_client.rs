use tokio::sync::mpsc;
use tracing::instrument;

use crate::domain::{Role, UserCreate, UserRecord};
use crate::error::UserError;
use crate::messages::{Secret, UserRequest};
use crate::user_actor::BootstrapOutcome;

/// Client for interacting with the [`UserService`](crate::user_actor::UserService) actor.
#[derive(Clone)]
pub struct UserClient {
    sender: mpsc::Sender<UserRequest>,
}

impl UserClient {
    pub fn new(sender: mpsc::Sender<UserRequest>) -> Self {
        Self { sender }
    }

    /// Checks a login attempt. `None` covers both unknown email and wrong password.
    #[instrument(skip(self, password))]
    pub async fn verify_credentials(&self, email: &str, password: &str) -> Result<Option<UserRecord>, UserError> {
        self.verify(email.to_string(), Secret::from(password)).await
    }

    /// Asks the service to stop after the requests already queued.
    pub async fn shutdown(&self) -> Result<(), UserError> {
        self.sender
            .send(UserRequest::Shutdown)
            .await
            .map_err(|_| UserError::ActorCommunicationError("Actor closed".to_string()))
    }
}

client_method!(UserClient => fn create_user(params: UserCreate) -> UserRecord as UserRequest::CreateUser, Error = UserError, skip(params));
client_method!(UserClient => fn get_user_by_email(email: String) -> Option<UserRecord> as UserRequest::GetUserByEmail, Error = UserError);
client_method!(UserClient => fn verify(email: String, password: Secret) -> Option<UserRecord> as UserRequest::VerifyCredentials, Error = UserError, skip(email, password));
client_method!(UserClient => fn get_users_by_role(role: Role) -> Vec<UserRecord> as UserRequest::GetUsersByRole, Error = UserError);
client_method!(UserClient => fn list_users() -> Vec<UserRecord> as UserRequest::ListUsers, Error = UserError);
client_method!(UserClient => fn delete_user(id: String) -> bool as UserRequest::DeleteUser, Error = UserError);
client_method!(UserClient => fn initialize_default_super_admin() -> BootstrapOutcome as UserRequest::InitializeDefaultSuperAdmin, Error = UserError);
