use std::fmt;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize, Serializer};

use super::{OsType, Role};

const ID_SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// A portal account as persisted in the user collection.
///
/// Field names follow the stored JSON shape (`osType`, `createdAt`, ...), so an
/// existing collection can be read back unchanged.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    /// Stored credential. Plaintext or a `sha256$` encoded hash, see [`crate::password`].
    pub password: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os_type: Option<OsType>,
    #[serde(serialize_with = "serialize_millis")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

/// Payload for creating a new user.
#[derive(Clone)]
pub struct UserCreate {
    pub email: String,
    pub password: String,
    pub role: Role,
    pub os_type: Option<OsType>,
    pub created_by: Option<String>,
}

impl UserCreate {
    pub fn new(email: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            role,
            os_type: None,
            created_by: None,
        }
    }

    pub fn with_os_type(mut self, os_type: OsType) -> Self {
        self.os_type = Some(os_type);
        self
    }

    pub fn created_by(mut self, email: impl Into<String>) -> Self {
        self.created_by = Some(email.into());
        self
    }
}

// Credentials never reach logs through `{:?}`.
impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("os_type", &self.os_type)
            .field("created_at", &self.created_at)
            .field("created_by", &self.created_by)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for UserCreate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCreate")
            .field("email", &self.email)
            .field("role", &self.role)
            .field("os_type", &self.os_type)
            .field("created_by", &self.created_by)
            .finish_non_exhaustive()
    }
}

impl UserRecord {
    /// Builds a record from a creation payload, stamping a fresh id and `created_at`.
    ///
    /// `stored_password` is the already-encoded credential.
    pub fn from_create(params: UserCreate, stored_password: String) -> Self {
        let now = Utc::now();
        Self {
            id: generate_user_id(now),
            email: params.email,
            password: stored_password,
            role: params.role,
            os_type: params.os_type,
            created_at: now.trunc_subsecs(3),
            created_by: params.created_by,
        }
    }
}

/// Always three fractional digits, `2024-01-02T03:04:05.000Z`.
fn serialize_millis<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// `user_<unix millis>_<9 base-36 chars>`. Unique enough for a small local collection.
pub fn generate_user_id(now: DateTime<Utc>) -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect();
    format!("user_{}_{}", now.timestamp_millis(), suffix)
}
