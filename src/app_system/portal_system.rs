use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info, instrument, warn};

use crate::auth::{AuthSession, AuthState, SessionStore};
use crate::clients::UserClient;
use crate::config::{AppConfig, StorageBackend, StorageConfig};
use crate::domain::{OsType, Role, UserCreate, UserRecord};
use crate::error::{AppError, AuthError, StorageError};
use crate::navigation;
use crate::storage::{FileStorage, KeyValueStore, MemoryStorage};
use crate::user_actor::{BootstrapOutcome, UserManager, UserService};
use crate::user_store::UserStore;

/// The running portal: the user service actor plus the session of this client.
///
/// Responsible for starting the actor, bootstrapping the super-admin,
/// restoring the session, and shutting everything down.
pub struct PortalSystem {
    pub user_client: UserClient,
    pub auth: AuthSession,
    handles: Vec<JoinHandle<()>>,
}

impl PortalSystem {
    pub fn open_storage(config: &StorageConfig) -> Result<Arc<dyn KeyValueStore>, StorageError> {
        let storage: Arc<dyn KeyValueStore> = match config.backend {
            StorageBackend::Memory => Arc::new(MemoryStorage::new()),
            StorageBackend::File => Arc::new(FileStorage::open(&config.dir)?),
        };
        Ok(storage)
    }

    pub async fn start(config: &AppConfig) -> Result<Self, AppError> {
        let storage = Self::open_storage(&config.storage)?;
        Ok(Self::start_with_storage(config, storage).await)
    }

    #[instrument(name = "portal_system", skip_all)]
    pub async fn start_with_storage(config: &AppConfig, storage: Arc<dyn KeyValueStore>) -> Self {
        info!("Starting portal system");

        let store = UserStore::new(storage.clone(), config.storage.users_key.clone());
        let manager = UserManager::new(store, config.security.password_scheme, config.bootstrap.clone());
        let (user_service, user_client) = UserService::new(config.service.channel_capacity, manager);
        let user_handle = tokio::spawn(user_service.run());

        match user_client.initialize_default_super_admin().await {
            Ok(BootstrapOutcome::Created { user, replaced }) => {
                info!(user_id = %user.id, replaced, "Default super admin initialized")
            }
            Ok(BootstrapOutcome::AlreadyPresent) => {}
            Err(e) => error!(error = %e, "Default super admin bootstrap failed"),
        }

        let session_store = SessionStore::new(storage, config.storage.session_key.clone());
        let auth = AuthSession::start(user_client.clone(), session_store);
        match auth.current().session() {
            Some(session) => info!(email = %session.email, role = %session.role, "Portal ready"),
            None => info!("Portal ready"),
        }

        Self {
            user_client,
            auth,
            handles: vec![user_handle],
        }
    }

    /// Logs in and returns the route the user should land on.
    #[instrument(skip(self, password))]
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<&'static str, AuthError> {
        let session = self
            .auth
            .login_session(email, password)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;
        Ok(navigation::landing_route(Some(session.role)))
    }

    pub fn sign_out(&self) -> Result<(), AuthError> {
        self.auth.logout()
    }

    /// Super-admin only.
    pub async fn create_operational_manager(&self, email: &str, password: &str) -> Result<UserRecord, AppError> {
        let actor = self.require_role(Role::SuperAdmin)?;
        let params = UserCreate::new(email, password, Role::OperationalManager).created_by(actor);
        Ok(self.user_client.create_user(params).await?)
    }

    /// Super-admin only.
    pub async fn list_operational_managers(&self) -> Result<Vec<UserRecord>, AppError> {
        self.require_role(Role::SuperAdmin)?;
        Ok(self.user_client.get_users_by_role(Role::OperationalManager).await?)
    }

    /// Super-admin only. Returns whether an operational manager was removed.
    pub async fn remove_operational_manager(&self, id: &str) -> Result<bool, AppError> {
        self.require_role(Role::SuperAdmin)?;
        self.remove_with_role(id, Role::OperationalManager).await
    }

    /// Operational-manager only. Vendors are admin-role accounts tied to one OS.
    pub async fn create_vendor(&self, email: &str, password: &str, os_type: OsType) -> Result<UserRecord, AppError> {
        let actor = self.require_role(Role::OperationalManager)?;
        let params = UserCreate::new(email, password, Role::Admin)
            .with_os_type(os_type)
            .created_by(actor);
        Ok(self.user_client.create_user(params).await?)
    }

    /// Operational-manager only.
    pub async fn list_vendors(&self) -> Result<Vec<UserRecord>, AppError> {
        self.require_role(Role::OperationalManager)?;
        Ok(self.user_client.get_users_by_role(Role::Admin).await?)
    }

    /// Operational-manager only. Returns whether a vendor was removed.
    pub async fn remove_vendor(&self, id: &str) -> Result<bool, AppError> {
        self.require_role(Role::OperationalManager)?;
        self.remove_with_role(id, Role::Admin).await
    }

    async fn remove_with_role(&self, id: &str, role: Role) -> Result<bool, AppError> {
        let owned = self
            .user_client
            .get_users_by_role(role)
            .await?
            .iter()
            .any(|u| u.id == id);
        if !owned {
            warn!(user_id = id, %role, "No account with that id in this listing");
            return Ok(false);
        }
        Ok(self.user_client.delete_user(id.to_string()).await?)
    }

    /// Returns the acting user's email when the session holds `role`.
    fn require_role(&self, role: Role) -> Result<String, AuthError> {
        match self.auth.current() {
            AuthState::Authenticated(session) if session.role == role => Ok(session.email),
            AuthState::Loading => Err(AuthError::NotReady),
            _ => Err(AuthError::Forbidden(format!("requires {}", role))),
        }
    }

    pub async fn shutdown(self) -> Result<(), AppError> {
        info!("Shutting down system...");
        if let Err(e) = self.user_client.shutdown().await {
            warn!(error = %e, "User service already stopped");
        }
        drop(self.auth);
        drop(self.user_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(AppError::TaskFailed(e.to_string()));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
