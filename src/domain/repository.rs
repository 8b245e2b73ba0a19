use async_trait::async_trait;

use super::entity::Account;
use crate::error::persistence::PersistenceError;

/// Storage of accounts.
///
/// Operations never retry; every failure is returned to the caller as is.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Idempotent schema setup, run once before serving traffic.
    async fn init(&self) -> Result<(), PersistenceError> {
        Ok(())
    }

    /// All accounts in storage order. Empty storage is an empty list.
    async fn list_accounts(&self) -> Result<Vec<Account>, PersistenceError>;

    /// Fails with [`PersistenceError::NotFound`] when no account has `id`.
    async fn get_account(&self, id: i64) -> Result<Account, PersistenceError>;

    /// Store a new account; storage assigns its id.
    async fn create_account(&self, account: &Account) -> Result<(), PersistenceError>;

    /// Overwrite names, balance and timestamp of the account at `account.id`.
    ///
    /// The stored number is kept. Returns the account as read back after the
    /// write, or [`PersistenceError::NotFound`] when the id does not exist.
    async fn update_account(&self, account: &Account) -> Result<Account, PersistenceError>;

    /// Remove the account if present. Deleting a missing id is not an error.
    async fn delete_account(&self, id: i64) -> Result<(), PersistenceError>;
}
