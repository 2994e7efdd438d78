//! Credential encoding and verification.
//!
//! Two encodings can sit in the `password` field of a stored user:
//! - plaintext, which is what existing portal data contains;
//! - `sha256$<salt hex>$<hash hex>`, iterated SHA-256 over a random salt.
//!
//! Under [`PasswordScheme::Plaintext`] stored values are compared exactly.
//! Under [`PasswordScheme::SaltedSha256`] both encodings are accepted, so
//! accounts created before the switch keep working.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

const HASH_PREFIX: &str = "sha256";
const SALT_BYTES: usize = 16;
const HASH_ITERATIONS: u32 = 100_000;

/// How new credentials are stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PasswordScheme {
    #[default]
    Plaintext,
    SaltedSha256,
}

impl PasswordScheme {
    pub fn encode(&self, password: &str) -> String {
        match self {
            PasswordScheme::Plaintext => password.to_string(),
            PasswordScheme::SaltedSha256 => {
                let salt = generate_salt();
                let hash = hash_password(password, &salt);
                format!("{}${}${}", HASH_PREFIX, salt, hash)
            }
        }
    }

    /// Checks `candidate` against a stored credential.
    pub fn verify(&self, stored: &str, candidate: &str) -> bool {
        match self {
            PasswordScheme::Plaintext => {
                constant_time_eq(stored.as_bytes(), candidate.as_bytes())
            }
            PasswordScheme::SaltedSha256 => match parse_hashed(stored) {
                Some((salt, hash)) => {
                    constant_time_eq(hash_password(candidate, salt).as_bytes(), hash.as_bytes())
                }
                None => constant_time_eq(stored.as_bytes(), candidate.as_bytes()),
            },
        }
    }
}

fn is_hex(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_hexdigit())
}


fn parse_hashed(stored: &str) -> Option<(&str, &str)> {
    let mut parts = stored.splitn(3, '$');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(HASH_PREFIX), Some(salt), Some(hash))
            if salt.len() == SALT_BYTES * 2
                && hash.len() == 64
                && is_hex(salt)
                && is_hex(hash) =>
        {
            Some((salt, hash))
        }
        _ => None,
    }
}

fn generate_salt() -> String {
    let mut bytes = [0u8; SALT_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn hash_password(password: &str, salt: &str) -> String {
    let mut hash = Sha256::new();
    hash.update(salt.as_bytes());
    hash.update(password.as_bytes());
    let mut result = hash.finalize();

    for _ in 1..HASH_ITERATIONS {
        let mut h = Sha256::new();
        h.update(result);
        h.update(salt.as_bytes());
        result = h.finalize();
    }

    hex::encode(result)
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: PasswordScheme = PasswordScheme::Plaintext;
    const SALTED: PasswordScheme = PasswordScheme::SaltedSha256;

    #[test]
    fn plaintext_is_stored_as_given() {
        assert_eq!(PLAIN.encode("admin123"), "admin123");
        assert!(PLAIN.verify("admin123", "admin123"));
        assert!(!PLAIN.verify("admin123", "admin124"));
        assert!(!PLAIN.verify("admin123", ""));
    }

    #[test]
    fn salted_hash_round_trip() {
        let stored = SALTED.encode("s3cret");
        assert!(stored.starts_with("sha256$"));
        assert!(!stored.contains("s3cret"));
        assert!(SALTED.verify(&stored, "s3cret"));
        assert!(!SALTED.verify(&stored, "s3cre"));
    }

    #[test]
    fn plaintext_scheme_compares_hash_shaped_values_exactly() {
        let stored = SALTED.encode("s3cret");
        assert!(PLAIN.verify(&stored, &stored));
        assert!(!PLAIN.verify(&stored, "s3cret"));
    }

    #[test]
    fn salted_scheme_accepts_plaintext_accounts() {
        assert!(SALTED.verify("admin123", "admin123"));
        assert!(!SALTED.verify("admin123", "admin12"));
    }

    #[test]
    fn non_hex_hash_shape_is_plaintext() {
        let stored = format!("sha256${}${}", "z".repeat(32), "y".repeat(64));
        assert!(SALTED.verify(&stored, &stored));
    }

    #[test]
    fn salts_differ_per_encoding() {
        let a = PasswordScheme::SaltedSha256.encode("same");
        let b = PasswordScheme::SaltedSha256.encode("same");
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_hash_falls_back_to_plaintext_compare() {
        assert!(SALTED.verify("sha256$short$short", "sha256$short$short"));
        assert!(!SALTED.verify("sha256$short$short", "short"));
    }

    #[test]
    fn scheme_names_in_config() {
        let scheme: PasswordScheme = serde_json::from_str("\"salted-sha256\"").unwrap();
        assert_eq!(scheme, PasswordScheme::SaltedSha256);
    }

    #[test]
    fn constant_time_eq_works() {
        assert!(constant_time_eq(b"hello", b"hello"));
        assert!(!constant_time_eq(b"hello", b"world"));
        assert!(!constant_time_eq(b"short", b"longer"));
    }
}
