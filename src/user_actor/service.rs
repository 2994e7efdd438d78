use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use super::UserManager;
use crate::clients::UserClient;
use crate::domain::{Role, UserCreate, UserRecord};
use crate::error::UserError;
use crate::messages::{Secret, ServiceResponse, UserRequest};

/// Actor owning the [`UserManager`].
///
/// Requests are handled one at a time, so the read-modify-write cycles of
/// concurrent callers in this process never interleave.
pub struct UserService {
    receiver: mpsc::Receiver<UserRequest>,
    manager: UserManager,
}

impl UserService {
    pub fn new(buffer_size: usize, manager: UserManager) -> (Self, UserClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self { receiver, manager };
        let client = UserClient::new(sender);
        (service, client)
    }

    #[instrument(name = "user_service", skip(self))]
    pub async fn run(mut self) {
        info!("UserService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                UserRequest::CreateUser { params, respond_to } => {
                    self.handle_create_user(params, respond_to);
                }
                UserRequest::GetUserByEmail { email, respond_to } => {
                    self.handle_get_user_by_email(email, respond_to);
                }
                UserRequest::VerifyCredentials { email, password, respond_to } => {
                    self.handle_verify_credentials(email, password, respond_to);
                }
                UserRequest::GetUsersByRole { role, respond_to } => {
                    self.handle_get_users_by_role(role, respond_to);
                }
                UserRequest::ListUsers { respond_to } => {
                    let _ = respond_to.send(Ok(self.manager.get_all_users()));
                }
                UserRequest::DeleteUser { id, respond_to } => {
                    self.handle_delete_user(id, respond_to);
                }
                UserRequest::InitializeDefaultSuperAdmin { respond_to } => {
                    let _ = respond_to.send(self.manager.initialize_default_super_admin());
                }
                UserRequest::Shutdown => {
                    info!("UserService shutting down");
                    break;
                }
            }
        }
        info!("UserService stopped");
    }

    #[instrument(
        fields(email = %params.email, role = %params.role),
        skip(self, params, respond_to)
    )]
    fn handle_create_user(
        &self,
        params: UserCreate,
        respond_to: ServiceResponse<UserRecord, UserError>,
    ) {
        debug!("Processing create_user request");
        let result = self.manager.create_user(params);
        match &result {
            Ok(user) => info!(user_id = %user.id, "User created successfully"),
            Err(e) => warn!(error = %e, "User creation rejected"),
        }
        let _ = respond_to.send(result);
    }

    #[instrument(skip(self, respond_to))]
    fn handle_get_user_by_email(
        &self,
        email: String,
        respond_to: ServiceResponse<Option<UserRecord>, UserError>,
    ) {
        debug!("Processing get_user_by_email request");
        let _ = respond_to.send(Ok(self.manager.get_user_by_email(&email)));
    }

    #[instrument(skip(self, password, respond_to))]
    fn handle_verify_credentials(
        &self,
        email: String,
        password: Secret,
        respond_to: ServiceResponse<Option<UserRecord>, UserError>,
    ) {
        debug!("Processing verify_credentials request");
        let user = self.manager.verify_credentials(&email, &password.0);
        if user.is_none() {
            // Unknown email and wrong password are deliberately not told apart.
            debug!("Credentials rejected");
        }
        let _ = respond_to.send(Ok(user));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_get_users_by_role(
        &self,
        role: Role,
        respond_to: ServiceResponse<Vec<UserRecord>, UserError>,
    ) {
        let users = self.manager.get_users_by_role(role);
        debug!(count = users.len(), "Users listed");
        let _ = respond_to.send(Ok(users));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_delete_user(&self, id: String, respond_to: ServiceResponse<bool, UserError>) {
        let removed = self.manager.delete_user(&id);
        if removed {
            info!("User deleted");
        } else {
            debug!("No user with that id");
        }
        let _ = respond_to.send(Ok(removed));
    }
}
