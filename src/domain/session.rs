use serde::{Deserialize, Serialize};

use super::{OsType, Role, UserRecord};

/// Who is logged in on this client. Persisted apart from the user collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os_type: Option<OsType>,
}

impl From<&UserRecord> for SessionRecord {
    fn from(user: &UserRecord) -> Self {
        Self {
            email: user.email.clone(),
            role: user.role,
            os_type: user.os_type,
        }
    }
}
