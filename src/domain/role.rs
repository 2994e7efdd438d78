use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Portal roles. Serialized in kebab-case (`"super-admin"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Manages operational managers.
    SuperAdmin,
    /// Manages vendor accounts.
    OperationalManager,
    /// A vendor running one of the OS product lines.
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::SuperAdmin, Role::OperationalManager, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super-admin",
            Role::OperationalManager => "operational-manager",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| format!("Unknown role: {}", s))
    }
}

/// Product line assigned to vendor (admin) accounts. Branding only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OsType {
    #[serde(rename = "StoreOS")]
    StoreOs,
    #[serde(rename = "SpaceOS")]
    SpaceOs,
    #[serde(rename = "ServiceOS")]
    ServiceOs,
}

impl OsType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OsType::StoreOs => "StoreOS",
            OsType::SpaceOs => "SpaceOS",
            OsType::ServiceOs => "ServiceOS",
        }
    }
}

impl fmt::Display for OsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
