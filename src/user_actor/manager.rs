use tracing::{debug, info, warn};

use crate::config::BootstrapConfig;
use crate::domain::{Role, UserCreate, UserRecord};
use crate::error::UserError;
use crate::password::PasswordScheme;
use crate::user_store::UserStore;

/// What [`UserManager::initialize_default_super_admin`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum BootstrapOutcome {
    /// The canonical super-admin was already there.
    AlreadyPresent,
    /// The canonical super-admin was created after removing `replaced` stale ones.
    Created { user: UserRecord, replaced: usize },
}

/// User management over the stored collection.
///
/// Every operation re-reads the collection, so the manager holds no cached
/// state and may be shared freely; mutations are read-modify-write.
pub struct UserManager {
    store: UserStore,
    scheme: PasswordScheme,
    bootstrap: BootstrapConfig,
}

impl UserManager {
    pub fn new(store: UserStore, scheme: PasswordScheme, bootstrap: BootstrapConfig) -> Self {
        Self {
            store,
            scheme,
            bootstrap,
        }
    }

    pub fn get_all_users(&self) -> Vec<UserRecord> {
        self.store.get_all()
    }

    /// Creates and persists a user. Emails are matched exactly, case included.
    pub fn create_user(&self, params: UserCreate) -> Result<UserRecord, UserError> {
        let mut users = self.store.get_all();
        let user = self.insert(&mut users, params)?;
        self.store.save(&users);
        Ok(user)
    }

    pub fn get_user_by_email(&self, email: &str) -> Option<UserRecord> {
        self.store.get_all().into_iter().find(|u| u.email == email)
    }

    pub fn verify_credentials(&self, email: &str, password: &str) -> Option<UserRecord> {
        self.get_user_by_email(email)
            .filter(|user| self.scheme.verify(&user.password, password))
    }

    pub fn get_users_by_role(&self, role: Role) -> Vec<UserRecord> {
        self.store
            .get_all()
            .into_iter()
            .filter(|u| u.role == role)
            .collect()
    }

    /// Returns whether a user was removed. Storage is left untouched otherwise.
    pub fn delete_user(&self, id: &str) -> bool {
        let mut users = self.store.get_all();
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() < before {
            self.store.save(&users);
            true
        } else {
            false
        }
    }

    /// Ensures exactly one super-admin exists under the configured email.
    ///
    /// Any other super-admin accounts are removed before the canonical one is
    /// created. If the canonical email belongs to a non-super-admin account the
    /// collection is left as is and `DuplicateUser` is returned.
    pub fn initialize_default_super_admin(&self) -> Result<BootstrapOutcome, UserError> {
        let email = self.bootstrap.email.as_str();
        let mut users = self.store.get_all();

        if users
            .iter()
            .any(|u| u.email == email && u.role == Role::SuperAdmin)
        {
            debug!(email, "Default super admin present");
            return Ok(BootstrapOutcome::AlreadyPresent);
        }
        if users.iter().any(|u| u.email == email) {
            warn!(email, "Default super admin email is taken by another role");
            return Err(UserError::DuplicateUser(email.to_string()));
        }

        let before = users.len();
        users.retain(|u| u.role != Role::SuperAdmin);
        let replaced = before - users.len();
        if replaced > 0 {
            info!(replaced, "Removing stale super admin accounts");
        }

        let params = UserCreate::new(email, self.bootstrap.password.as_str(), Role::SuperAdmin);
        let user = self.insert(&mut users, params)?;
        self.store.save(&users);
        info!(user_id = %user.id, email, "Default super admin created");
        Ok(BootstrapOutcome::Created { user, replaced })
    }

    fn insert(&self, users: &mut Vec<UserRecord>, params: UserCreate) -> Result<UserRecord, UserError> {
        if users.iter().any(|u| u.email == params.email) {
            return Err(UserError::DuplicateUser(params.email));
        }
        let stored = self.scheme.encode(&params.password);
        let user = UserRecord::from_create(params, stored);
        users.push(user.clone());
        Ok(user)
    }
}
