//! Argon2id password hashing, verification, and strength validation.
//!
//! Hashes are stored in PHC string format, so the cost parameters and salt
//! travel with each hash and verification needs no configuration.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::config::env_or;

/// Minimum password length enforced on registration and password changes.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Argon2id cost parameters used for new hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordConfig {
    /// Number of passes over memory (`t_cost`).
    pub time_cost: u32,
    /// Memory size in KiB (`m_cost`).
    pub memory_kib: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            time_cost: Params::DEFAULT_T_COST,
            memory_kib: Params::DEFAULT_M_COST,
        }
    }
}

impl PasswordConfig {
    /// Load cost parameters from the environment.
    ///
    /// | Env Var                    | Default |
    /// |----------------------------|---------|
    /// | `PASSWORD_HASH_COST`       | `2`     |
    /// | `PASSWORD_HASH_MEMORY_KIB` | `19456` |
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            time_cost: env_or("PASSWORD_HASH_COST", defaults.time_cost),
            memory_kib: env_or("PASSWORD_HASH_MEMORY_KIB", defaults.memory_kib),
        }
    }

    fn hasher(&self) -> Result<Argon2<'static>, argon2::password_hash::Error> {
        let params = Params::new(
            self.memory_kib,
            self.time_cost,
            Params::DEFAULT_P_COST,
            None,
        )?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

/// Hash a plaintext password using Argon2id with a random salt.
///
/// Returns the PHC-formatted hash string (includes algorithm, params, salt, and hash).
pub fn hash_password(
    password: &str,
    config: &PasswordConfig,
) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = config.hasher()?.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-formatted Argon2id hash.
///
/// Returns `Ok(true)` if the password matches, `Ok(false)` if it does not.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Validate that a password meets minimum strength requirements.
pub fn validate_password_strength(password: &str, min_length: usize) -> Result<(), String> {
    if password.chars().count() < min_length {
        return Err(format!(
            "Password must be at least {min_length} characters long"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> PasswordConfig {
        PasswordConfig {
            time_cost: 1,
            memory_kib: 1024,
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let password = "correct-horse-battery-staple";
        let hash = hash_password(password, &cheap()).expect("hashing should succeed");

        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("m=1024,t=1"));
        assert!(!hash.contains(password));

        assert!(verify_password(password, &hash).expect("verify should succeed"));
    }

    #[test]
    fn test_wrong_password_fails() {
        let hash = hash_password("real-password", &cheap()).expect("hashing should succeed");
        let verified = verify_password("wrong-password", &hash).expect("verify should succeed");
        assert!(!verified);
    }

    #[test]
    fn test_same_password_gets_fresh_salt() {
        let a = hash_password("same-password", &cheap()).unwrap();
        let b = hash_password("same-password", &cheap()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_password_strength() {
        let err = validate_password_strength("short", MIN_PASSWORD_LENGTH).unwrap_err();
        assert!(err.contains("at least 8 characters"));
        assert!(validate_password_strength("eight_ch", MIN_PASSWORD_LENGTH).is_ok());
    }
}
