use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StorageError {
    #[error("Storage read error for {key}: {message}")]
    Read { key: String, message: String },
    #[error("Storage write error for {key}: {message}")]
    Write { key: String, message: String },
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    #[error("User with this email already exists")]
    DuplicateUser(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Already logged in as {0}")]
    AlreadyAuthenticated(String),
    #[error("Not permitted: {0}")]
    Forbidden(String),
    #[error("Session is still loading")]
    NotReady,
    #[error("User service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl From<UserError> for AuthError {
    fn from(e: UserError) -> Self {
        AuthError::ServiceUnavailable(e.to_string())
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Could not read config {path}: {message}")]
    Read { path: String, message: String },
    #[error("Invalid config: {0}")]
    Parse(String),
}

/// Top-level error for the portal system and binary.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("Actor task failed: {0}")]
    TaskFailed(String),
}
