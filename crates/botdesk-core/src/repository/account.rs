//! Credential store trait definitions.
//!
//! Lookup is by public identifier only; secret verification happens in the
//! account service against the stored argon2 hash, never in SQL.

use botdesk_types::account::{Business, User};
use botdesk_types::error::RepositoryError;

/// Repository trait for business (tenant) records.
pub trait BusinessRepository: Send + Sync {
    /// Persist a new business. The caller has already checked for duplicates;
    /// a UNIQUE violation racing that check surfaces as a query error.
    fn insert(
        &self,
        business: &Business,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    fn find_by_username(
        &self,
        username: &str,
    ) -> impl std::future::Future<Output = Result<Option<Business>, RepositoryError>> + Send;

    fn find_by_api_key(
        &self,
        api_key: &str,
    ) -> impl std::future::Future<Output = Result<Option<Business>, RepositoryError>> + Send;

    /// Single combined existence query over username and email.
    ///
    /// Not transactionally atomic with the subsequent insert; two concurrent
    /// registrations with the same username can race past it.
    fn username_or_email_taken(
        &self,
        username: &str,
        email: &str,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;
}

/// Repository trait for end-user account records.
pub trait UserRepository: Send + Sync {
    fn insert(
        &self,
        user: &User,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    fn find_by_username(
        &self,
        username: &str,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    fn username_taken(
        &self,
        username: &str,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;
}
