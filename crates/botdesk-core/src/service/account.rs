//! Account service: registration, login, and identity resolution for both
//! businesses and end-user accounts.
//!
//! Login never reveals whether the username or the password was wrong, and
//! the business_id used by downstream services is always re-derived from a
//! verified identity here, never taken from caller input.

use botdesk_types::account::{
    Business, BusinessId, LoginRequest, RegisterBusinessRequest, RegisterUserRequest, User,
};
use botdesk_types::error::AccountError;
use chrono::Utc;
use rand::RngCore;
use tracing::info;
use uuid::Uuid;

use crate::repository::{BusinessRepository, UserRepository};
use crate::service::hash::PasswordHasher;

/// Mint a widget embedding key: `sk_` + 64 hex chars (32 random bytes).
fn generate_api_key() -> String {
    let mut key_bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut key_bytes);
    let hex: String = key_bytes.iter().map(|b| format!("{b:02x}")).collect();
    format!("sk_{hex}")
}

/// Orchestrates credential storage and verification.
///
/// Generic over repositories and the hasher so tests can substitute
/// in-memory fakes (botdesk-core never depends on botdesk-infra).
pub struct AccountService<B: BusinessRepository, U: UserRepository, H: PasswordHasher> {
    businesses: B,
    users: U,
    hasher: H,
}

impl<B: BusinessRepository, U: UserRepository, H: PasswordHasher> AccountService<B, U, H> {
    pub fn new(businesses: B, users: U, hasher: H) -> Self {
        Self {
            businesses,
            users,
            hasher,
        }
    }

    // --- Businesses ---

    /// Register a new business, minting its api_key.
    ///
    /// The duplicate check is a single combined query over username and
    /// email; it is not atomic with the insert (recorded gap: two racing
    /// registrations can both pass the check, the loser hits the UNIQUE
    /// constraint and surfaces a storage error).
    pub async fn register_business(
        &self,
        req: RegisterBusinessRequest,
    ) -> Result<Business, AccountError> {
        if self
            .businesses
            .username_or_email_taken(&req.username, &req.email)
            .await?
        {
            return Err(AccountError::Conflict);
        }

        let password_hash = self
            .hasher
            .hash(&req.password)
            .map_err(|e| AccountError::Hash(e.0))?;

        let business = Business {
            id: BusinessId::new(),
            name: req.name,
            email: req.email,
            username: req.username,
            password_hash,
            api_key: generate_api_key(),
            created_at: Utc::now(),
        };

        self.businesses.insert(&business).await?;
        info!(business_id = %business.id, username = %business.username, "Business registered");
        Ok(business)
    }

    /// Verify credentials and return the business document.
    pub async fn login_business(&self, req: &LoginRequest) -> Result<Business, AccountError> {
        let business = self
            .businesses
            .find_by_username(&req.username)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        if !self.hasher.verify(&req.password, &business.password_hash) {
            return Err(AccountError::InvalidCredentials);
        }

        Ok(business)
    }

    /// Resolve a verified identity claim back to its business record.
    pub async fn get_business(&self, username: &str) -> Result<Business, AccountError> {
        self.businesses
            .find_by_username(username)
            .await?
            .ok_or(AccountError::NotFound)
    }

    /// Resolve the acting business from a widget api_key.
    pub async fn resolve_by_api_key(
        &self,
        api_key: &str,
    ) -> Result<Option<Business>, AccountError> {
        Ok(self.businesses.find_by_api_key(api_key).await?)
    }

    // --- End-user accounts ---

    pub async fn register_user(&self, req: RegisterUserRequest) -> Result<User, AccountError> {
        if self.users.username_taken(&req.username).await? {
            return Err(AccountError::Conflict);
        }

        let password_hash = self
            .hasher
            .hash(&req.password)
            .map_err(|e| AccountError::Hash(e.0))?;

        let user = User {
            id: Uuid::now_v7(),
            username: req.username,
            password_hash,
            created_at: Utc::now(),
        };

        self.users.insert(&user).await?;
        info!(username = %user.username, "User registered");
        Ok(user)
    }

    pub async fn login_user(&self, req: &LoginRequest) -> Result<User, AccountError> {
        let user = self
            .users
            .find_by_username(&req.username)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        if !self.hasher.verify(&req.password, &user.password_hash) {
            return Err(AccountError::InvalidCredentials);
        }

        Ok(user)
    }

    pub async fn get_user(&self, username: &str) -> Result<User, AccountError> {
        self.users
            .find_by_username(username)
            .await?
            .ok_or(AccountError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::hash::HashError;
    use botdesk_types::error::RepositoryError;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemBusinessRepo {
        rows: Mutex<Vec<Business>>,
    }

    impl BusinessRepository for MemBusinessRepo {
        async fn insert(&self, business: &Business) -> Result<(), RepositoryError> {
            self.rows.lock().unwrap().push(business.clone());
            Ok(())
        }

        async fn find_by_username(
            &self,
            username: &str,
        ) -> Result<Option<Business>, RepositoryError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|b| b.username == username)
                .cloned())
        }

        async fn find_by_api_key(
            &self,
            api_key: &str,
        ) -> Result<Option<Business>, RepositoryError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|b| b.api_key == api_key)
                .cloned())
        }

        async fn username_or_email_taken(
            &self,
            username: &str,
            email: &str,
        ) -> Result<bool, RepositoryError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .any(|b| b.username == username || b.email == email))
        }
    }

    #[derive(Default)]
    struct MemUserRepo {
        rows: Mutex<Vec<User>>,
    }

    impl UserRepository for MemUserRepo {
        async fn insert(&self, user: &User) -> Result<(), RepositoryError> {
            self.rows.lock().unwrap().push(user.clone());
            Ok(())
        }

        async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.username == username)
                .cloned())
        }

        async fn username_taken(&self, username: &str) -> Result<bool, RepositoryError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .any(|u| u.username == username))
        }
    }

    /// Reversible fake: "hash" is `h:` + password, so verify is comparison.
    struct FakeHasher;

    impl PasswordHasher for FakeHasher {
        fn hash(&self, password: &str) -> Result<String, HashError> {
            Ok(format!("h:{password}"))
        }

        fn verify(&self, password: &str, stored_hash: &str) -> bool {
            stored_hash == format!("h:{password}")
        }
    }

    fn service() -> AccountService<MemBusinessRepo, MemUserRepo, FakeHasher> {
        AccountService::new(MemBusinessRepo::default(), MemUserRepo::default(), FakeHasher)
    }

    fn register_req(username: &str, email: &str) -> RegisterBusinessRequest {
        RegisterBusinessRequest {
            name: "Acme Plumbing".to_string(),
            email: email.to_string(),
            username: username.to_string(),
            password: "hunter2".to_string(),
        }
    }

    #[tokio::test]
    async fn register_then_login_succeeds() {
        let svc = service();
        let registered = svc
            .register_business(register_req("acme", "a@acme.test"))
            .await
            .unwrap();
        assert!(registered.api_key.starts_with("sk_"));
        assert_eq!(registered.api_key.len(), 3 + 64);
        assert!(registered.password_hash.starts_with("h:"));

        let logged_in = svc
            .login_business(&LoginRequest {
                username: "acme".to_string(),
                password: "hunter2".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(logged_in.id, registered.id);
    }

    #[tokio::test]
    async fn login_with_wrong_password_fails() {
        let svc = service();
        svc.register_business(register_req("acme", "a@acme.test"))
            .await
            .unwrap();

        let err = svc
            .login_business(&LoginRequest {
                username: "acme".to_string(),
                password: "wrong".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_unknown_username_is_indistinguishable() {
        let svc = service();
        let err = svc
            .login_business(&LoginRequest {
                username: "ghost".to_string(),
                password: "hunter2".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::InvalidCredentials));
    }

    #[tokio::test]
    async fn duplicate_username_conflicts() {
        let svc = service();
        svc.register_business(register_req("acme", "a@acme.test"))
            .await
            .unwrap();

        let err = svc
            .register_business(register_req("acme", "other@acme.test"))
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::Conflict));
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let svc = service();
        svc.register_business(register_req("acme", "a@acme.test"))
            .await
            .unwrap();

        let err = svc
            .register_business(register_req("acme2", "a@acme.test"))
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::Conflict));
    }

    #[tokio::test]
    async fn api_keys_are_unique_per_registration() {
        let svc = service();
        let a = svc
            .register_business(register_req("acme", "a@acme.test"))
            .await
            .unwrap();
        let b = svc
            .register_business(register_req("bolt", "b@bolt.test"))
            .await
            .unwrap();
        assert_ne!(a.api_key, b.api_key);

        let resolved = svc.resolve_by_api_key(&a.api_key).await.unwrap().unwrap();
        assert_eq!(resolved.id, a.id);
        assert!(svc.resolve_by_api_key("sk_bogus").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn user_register_and_login() {
        let svc = service();
        let user = svc
            .register_user(RegisterUserRequest {
                username: "visitor".to_string(),
                password: "pw".to_string(),
            })
            .await
            .unwrap();

        let logged_in = svc
            .login_user(&LoginRequest {
                username: "visitor".to_string(),
                password: "pw".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(logged_in.id, user.id);

        let err = svc
            .register_user(RegisterUserRequest {
                username: "visitor".to_string(),
                password: "other".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::Conflict));
    }

    #[tokio::test]
    async fn get_business_not_found() {
        let svc = service();
        let err = svc.get_business("ghost").await.unwrap_err();
        assert!(matches!(err, AccountError::NotFound));
    }
}
