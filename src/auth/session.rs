use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use super::SessionStore;
use crate::clients::UserClient;
use crate::domain::{Role, SessionRecord};
use crate::error::AuthError;

/// Where a client stands.
///
/// `Loading` lasts until the stored session has been read back. After that the
/// only moves are `Anonymous -> Authenticated` on login and back on logout.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    Loading,
    Anonymous,
    Authenticated(SessionRecord),
}

impl AuthState {
    pub fn session(&self) -> Option<&SessionRecord> {
        match self {
            AuthState::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.session().map(|s| s.role)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, AuthState::Loading)
    }
}

/// Shared handle to the current session of one client.
///
/// Clones observe and drive the same state; [`AuthSession::subscribe`] hands
/// out receivers that wake on every transition.
#[derive(Clone)]
pub struct AuthSession {
    users: UserClient,
    store: SessionStore,
    state: Arc<watch::Sender<AuthState>>,
}

impl AuthSession {
    /// Creates a session handle in the `Loading` state. Call [`restore`](Self::restore) next.
    pub fn new(users: UserClient, store: SessionStore) -> Self {
        let (state, _) = watch::channel(AuthState::Loading);
        Self {
            users,
            store,
            state: Arc::new(state),
        }
    }

    /// Creates the handle and immediately rehydrates it from storage.
    pub fn start(users: UserClient, store: SessionStore) -> Self {
        let session = Self::new(users, store);
        session.restore();
        session
    }

    /// Leaves `Loading` using the persisted record, if any. No-op once loaded.
    #[instrument(skip(self))]
    pub fn restore(&self) -> AuthState {
        let stored = self.store.load();
        self.state.send_if_modified(|state| {
            if !state.is_loading() {
                return false;
            }
            *state = match stored {
                Some(session) => {
                    info!(email = %session.email, role = %session.role, "Session restored");
                    AuthState::Authenticated(session)
                }
                None => {
                    debug!("No stored session");
                    AuthState::Anonymous
                }
            };
            true
        });
        self.current()
    }

    pub fn current(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Attempts a login. `Ok(false)` means the credentials were rejected and the
    /// state is unchanged.
    pub async fn login(&self, email: &str, password: &str) -> Result<bool, AuthError> {
        Ok(self.login_session(email, password).await?.is_some())
    }

    /// Like [`login`](Self::login), but hands back the session that was opened.
    #[instrument(skip(self, password))]
    pub async fn login_session(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<SessionRecord>, AuthError> {
        match self.current() {
            AuthState::Loading => return Err(AuthError::NotReady),
            AuthState::Authenticated(session) => {
                return Err(AuthError::AlreadyAuthenticated(session.email))
            }
            AuthState::Anonymous => {}
        }

        let Some(user) = self.users.verify_credentials(email, password).await? else {
            warn!("Login rejected");
            return Ok(None);
        };

        let session = SessionRecord::from(&user);
        let mut conflict = None;
        // Persisting under the state lock keeps storage in step with a racing logout.
        self.state.send_if_modified(|state| {
            if *state == AuthState::Anonymous {
                self.store.save(&session);
                *state = AuthState::Authenticated(session.clone());
                true
            } else {
                conflict = Some(state.clone());
                false
            }
        });
        match conflict {
            Some(AuthState::Authenticated(other)) => {
                return Err(AuthError::AlreadyAuthenticated(other.email))
            }
            Some(_) => return Err(AuthError::NotReady),
            None => {}
        }

        info!(role = %session.role, "Logged in");
        Ok(Some(session))
    }

    /// Ends the current session. Logging out while anonymous is a no-op.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<(), AuthError> {
        let mut loading = false;
        let changed = self.state.send_if_modified(|state| {
            if state.is_loading() {
                loading = true;
                return false;
            }
            self.store.clear();
            if state.session().is_none() {
                return false;
            }
            *state = AuthState::Anonymous;
            true
        });
        if loading {
            return Err(AuthError::NotReady);
        }
        if changed {
            info!("Logged out");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OsType, UserCreate, UserRecord};
    use crate::mock_framework::{create_mock_client, expect_verify};
    use crate::storage::{KeyValueStore, MemoryStorage};

    const KEY: &str = "storeos_current_user";

    fn session_with(storage: Arc<MemoryStorage>) -> (AuthSession, tokio::sync::mpsc::Receiver<crate::messages::UserRequest>) {
        let (client, rx) = create_mock_client(10);
        let session = AuthSession::new(client, SessionStore::new(storage, KEY));
        (session, rx)
    }

    fn vendor() -> UserRecord {
        UserRecord::from_create(
            UserCreate::new("v@x.com", "pw", Role::Admin).with_os_type(OsType::StoreOs),
            "pw".to_string(),
        )
    }

    #[test]
    fn restore_without_stored_session_is_anonymous() {
        let (session, _rx) = session_with(Arc::new(MemoryStorage::new()));
        assert_eq!(session.current(), AuthState::Loading);
        assert_eq!(session.restore(), AuthState::Anonymous);
    }

    #[test]
    fn restore_reads_stored_session_once() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set(KEY, r#"{"email":"om@x.com","role":"operational-manager"}"#)
            .unwrap();
        let (session, _rx) = session_with(storage.clone());

        let state = session.restore();
        assert_eq!(state.role(), Some(Role::OperationalManager));

        storage.remove(KEY).unwrap();
        assert_eq!(session.restore().role(), Some(Role::OperationalManager));
    }

    #[test]
    fn restore_discards_corrupt_session() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(KEY, "{\"email\":").unwrap();
        let (session, _rx) = session_with(storage.clone());

        assert_eq!(session.restore(), AuthState::Anonymous);
        assert_eq!(storage.get(KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_login_success_persists_session() {
        let storage = Arc::new(MemoryStorage::new());
        let (session, mut rx) = session_with(storage.clone());
        session.restore();
        let mut watcher = session.subscribe();

        let login = {
            let session = session.clone();
            tokio::spawn(async move { session.login("v@x.com", "pw").await })
        };

        let (email, password, responder) = expect_verify(&mut rx).await.expect("Expected verify");
        assert_eq!(email, "v@x.com");
        assert_eq!(password.0, "pw");
        responder.send(Ok(Some(vendor()))).unwrap();

        assert_eq!(login.await.unwrap(), Ok(true));
        watcher.changed().await.unwrap();
        let state = watcher.borrow().clone();
        assert_eq!(
            state.session(),
            Some(&SessionRecord {
                email: "v@x.com".to_string(),
                role: Role::Admin,
                os_type: Some(OsType::StoreOs),
            })
        );
        assert!(storage.get(KEY).unwrap().unwrap().contains("\"osType\":\"StoreOS\""));
    }

    #[tokio::test]
    async fn test_login_session_returns_verified_record() {
        let (session, mut rx) = session_with(Arc::new(MemoryStorage::new()));
        session.restore();

        let login = {
            let session = session.clone();
            tokio::spawn(async move { session.login_session("v@x.com", "pw").await })
        };
        let (_, _, responder) = expect_verify(&mut rx).await.expect("Expected verify");
        responder.send(Ok(Some(vendor()))).unwrap();

        let opened = login.await.unwrap().unwrap().expect("session opened");
        assert_eq!(opened.role, Role::Admin);
        assert_eq!(session.current().session(), Some(&opened));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_storage_matches_state_when_observed() {
        let storage = Arc::new(MemoryStorage::new());
        let (session, mut rx) = session_with(storage.clone());
        session.restore();

        let mut watcher = session.subscribe();
        let (seen_tx, seen_rx) = tokio::sync::oneshot::channel();
        let observer = {
            let storage = storage.clone();
            tokio::spawn(async move {
                watcher.changed().await.unwrap();
                let logged_in = watcher.borrow_and_update().session().is_some();
                let stored = storage.get(KEY).unwrap();
                seen_tx.send(()).unwrap();
                watcher.changed().await.unwrap();
                let logged_out = watcher.borrow().session().is_none();
                let cleared = storage.get(KEY).unwrap();
                (logged_in, stored, logged_out, cleared)
            })
        };

        let login = {
            let session = session.clone();
            tokio::spawn(async move { session.login("v@x.com", "pw").await })
        };
        let (_, _, responder) = expect_verify(&mut rx).await.expect("Expected verify");
        responder.send(Ok(Some(vendor()))).unwrap();
        assert_eq!(login.await.unwrap(), Ok(true));
        seen_rx.await.unwrap();
        session.logout().unwrap();

        let (logged_in, stored, logged_out, cleared) = observer.await.unwrap();
        assert!(logged_in);
        assert!(stored.is_some());
        assert!(logged_out);
        assert_eq!(cleared, None);
        assert_eq!(storage.get(KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_login_failure_keeps_anonymous() {
        let storage = Arc::new(MemoryStorage::new());
        let (session, mut rx) = session_with(storage.clone());
        session.restore();

        let login = {
            let session = session.clone();
            tokio::spawn(async move { session.login("v@x.com", "wrong").await })
        };
        let (_, _, responder) = expect_verify(&mut rx).await.expect("Expected verify");
        responder.send(Ok(None)).unwrap();

        assert_eq!(login.await.unwrap(), Ok(false));
        assert_eq!(session.current(), AuthState::Anonymous);
        assert_eq!(storage.get(KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_login_rejected_while_loading_or_authenticated() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(KEY, r#"{"email":"sa@x.com","role":"super-admin"}"#).unwrap();
        let (session, _rx) = session_with(storage);

        assert_eq!(session.login("v@x.com", "pw").await, Err(AuthError::NotReady));

        session.restore();
        assert_eq!(
            session.login("v@x.com", "pw").await,
            Err(AuthError::AlreadyAuthenticated("sa@x.com".to_string()))
        );
    }

    #[tokio::test]
    async fn test_login_reports_dead_service() {
        let (session, rx) = session_with(Arc::new(MemoryStorage::new()));
        session.restore();
        drop(rx);

        let err = session.login("v@x.com", "pw").await.unwrap_err();
        assert!(matches!(err, AuthError::ServiceUnavailable(_)));
        assert_eq!(session.current(), AuthState::Anonymous);
    }

    #[test]
    fn logout_clears_state_and_storage() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(KEY, r#"{"email":"sa@x.com","role":"super-admin"}"#).unwrap();
        let (session, _rx) = session_with(storage.clone());

        assert_eq!(session.logout(), Err(AuthError::NotReady));

        session.restore();
        session.logout().unwrap();
        assert_eq!(session.current(), AuthState::Anonymous);
        assert_eq!(storage.get(KEY).unwrap(), None);

        session.logout().unwrap();
        assert_eq!(session.current(), AuthState::Anonymous);
    }
}
