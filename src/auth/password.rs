//! Password hashing and verification for clubboard.
//!
//! New digests are Argon2id PHC strings with a per-password random salt.
//! Unsalted SHA-512 hex digests written by the previous system still verify
//! and are reported as [`Verified::Legacy`] so the caller can upgrade them.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand_core::OsRng;
use sha2::{Digest, Sha512};
use thiserror::Error;

use crate::config::PasswordConfig;

/// Maximum password length accepted for hashing.
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Length of a hex-encoded SHA-512 digest.
const LEGACY_DIGEST_LENGTH: usize = 128;

/// Password-related errors.
#[derive(Error, Debug)]
pub enum PasswordError {
    /// Argon2 parameters were rejected.
    #[error("invalid hashing parameters: {0}")]
    InvalidParams(String),

    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    HashError(String),

    /// Stored digest is in no known format.
    #[error("invalid password hash format")]
    InvalidHash,

    /// Password verification failed (wrong password).
    #[error("password verification failed")]
    VerificationFailed,
}

impl From<PasswordError> for crate::BoardError {
    fn from(e: PasswordError) -> Self {
        crate::BoardError::Password(e.to_string())
    }
}

/// Outcome of a successful verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verified {
    /// Digest is a current Argon2id hash.
    Current,
    /// Digest is a legacy SHA-512 hex string and should be rehashed.
    Legacy,
}

impl Verified {
    /// Whether the stored digest should be replaced.
    pub fn needs_rehash(self) -> bool {
        self == Verified::Legacy
    }
}

/// Argon2id password hasher.
#[derive(Clone)]
pub struct Hasher {
    params: Params,
}

impl Hasher {
    /// Create a hasher from configuration.
    pub fn new(config: &PasswordConfig) -> Result<Self, PasswordError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| PasswordError::InvalidParams(e.to_string()))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a password, returning a PHC string that embeds salt and parameters.
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PasswordError::HashError(e.to_string()))?;
        Ok(hash.to_string())
    }

    /// Verify a password against a stored digest.
    pub fn verify(&self, password: &str, digest: &str) -> Result<Verified, PasswordError> {
        if is_legacy_digest(digest) {
            let computed = legacy_digest(password);
            return if constant_time_eq(
                computed.as_bytes(),
                digest.to_ascii_lowercase().as_bytes(),
            ) {
                Ok(Verified::Legacy)
            } else {
                Err(PasswordError::VerificationFailed)
            };
        }

        let parsed = PasswordHash::new(digest).map_err(|_| PasswordError::InvalidHash)?;
        // Parameters come from the PHC string, not from `self.params`.
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .map(|_| Verified::Current)
            .map_err(|_| PasswordError::VerificationFailed)
    }
}

impl std::fmt::Debug for Hasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hasher")
            .field("m_cost", &self.params.m_cost())
            .field("t_cost", &self.params.t_cost())
            .field("p_cost", &self.params.p_cost())
            .finish()
    }
}

/// Unsalted SHA-512 hex digest used by the previous system.
///
/// Deterministic; kept only to verify and upgrade old records.
pub fn legacy_digest(password: &str) -> String {
    Sha512::digest(password.as_bytes())
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

fn is_legacy_digest(digest: &str) -> bool {
    digest.len() == LEGACY_DIGEST_LENGTH && digest.bytes().all(|b| b.is_ascii_hexdigit())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_hasher() -> Hasher {
        Hasher::new(&PasswordConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap()
    }

    #[test]
    fn test_hash_is_argon2id() {
        let hash = fast_hasher().hash("pw").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("$v=19$"));
        assert!(hash.contains("m=1024"));
    }

    #[test]
    fn test_hash_salts_differ() {
        let hasher = fast_hasher();
        let hash1 = hasher.hash("same_password").unwrap();
        let hash2 = hasher.hash("same_password").unwrap();
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_verify_correct_password() {
        let hasher = fast_hasher();
        let hash = hasher.hash("correct").unwrap();
        assert_eq!(hasher.verify("correct", &hash).unwrap(), Verified::Current);
    }

    #[test]
    fn test_verify_wrong_password() {
        let hasher = fast_hasher();
        let hash = hasher.hash("correct").unwrap();
        assert!(matches!(
            hasher.verify("wrong", &hash),
            Err(PasswordError::VerificationFailed)
        ));
    }

    #[test]
    fn test_verify_invalid_hash() {
        assert!(matches!(
            fast_hasher().verify("any", "not_a_valid_hash"),
            Err(PasswordError::InvalidHash)
        ));
    }

    #[test]
    fn test_verify_with_default_params_hash() {
        // Digests made with other parameters still verify.
        let strong = Hasher::new(&PasswordConfig {
            memory_kib: 2048,
            iterations: 2,
            parallelism: 1,
        })
        .unwrap();
        let hash = strong.hash("pw").unwrap();
        assert!(fast_hasher().verify("pw", &hash).is_ok());
    }

    #[test]
    fn test_legacy_digest_is_deterministic() {
        assert_eq!(legacy_digest("pw"), legacy_digest("pw"));
        assert_eq!(legacy_digest("pw").len(), 128);
        assert_ne!(legacy_digest("pw"), legacy_digest("pw2"));
        assert_ne!(legacy_digest("alice"), legacy_digest("Alice"));
    }

    #[test]
    fn test_legacy_digest_known_value() {
        assert_eq!(
            legacy_digest("abc"),
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
             2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
        );
    }

    #[test]
    fn test_verify_legacy_digest() {
        let hasher = fast_hasher();
        let digest = legacy_digest("old-password");

        let verified = hasher.verify("old-password", &digest).unwrap();
        assert_eq!(verified, Verified::Legacy);
        assert!(verified.needs_rehash());

        assert!(matches!(
            hasher.verify("other", &digest),
            Err(PasswordError::VerificationFailed)
        ));
    }

    #[test]
    fn test_verify_legacy_digest_uppercase() {
        let digest = legacy_digest("pw").to_uppercase();
        assert_eq!(fast_hasher().verify("pw", &digest).unwrap(), Verified::Legacy);
    }

    #[test]
    fn test_unicode_password() {
        let hasher = fast_hasher();
        let hash = hasher.hash("비밀번호123").unwrap();
        assert!(hasher.verify("비밀번호123", &hash).is_ok());
    }

    #[test]
    fn test_invalid_params() {
        let result = Hasher::new(&PasswordConfig {
            memory_kib: 1024,
            iterations: 0,
            parallelism: 1,
        });
        assert!(matches!(result, Err(PasswordError::InvalidParams(_))));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
    }
}
