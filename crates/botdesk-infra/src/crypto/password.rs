//! Password hashing and verification using argon2id.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordVerifier, SaltString};

use botdesk_core::service::hash::{HashError, PasswordHasher};

/// Argon2id implementation of the domain `PasswordHasher` trait.
///
/// Each hash carries its own random salt, so verification needs nothing
/// but the stored hash string.
#[derive(Clone, Default)]
pub struct Argon2PasswordHasher;

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, HashError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        argon2::password_hash::PasswordHasher::hash_password(&argon2, password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| HashError(e.to_string()))
    }

    fn verify(&self, password: &str, stored_hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(stored_hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify() {
        let hasher = Argon2PasswordHasher;
        let hash = hasher.hash("mysecret").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("mysecret", &hash));
        assert!(!hasher.verify("wrongpassword", &hash));
    }

    #[test]
    fn different_passwords_different_hashes() {
        let hasher = Argon2PasswordHasher;
        let h1 = hasher.hash("password1").unwrap();
        let h2 = hasher.hash("password2").unwrap();
        assert_ne!(h1, h2);
    }

    #[test]
    fn garbage_stored_hash_verifies_false() {
        let hasher = Argon2PasswordHasher;
        assert!(!hasher.verify("anything", "not-a-hash"));
    }
}
