use std::{
    collections::BTreeMap,
    sync::{Mutex, MutexGuard},
};

use async_trait::async_trait;

use crate::{
    domain::{entity::Account, repository::AccountRepository},
    error::{persistence::PersistenceError, UnknownError},
};

/// Account storage held in process memory.
///
/// Ids come from a counter starting at 1 and are never handed out twice,
/// even after a delete.
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    last_id: i64,
    accounts: BTreeMap<i64, Account>,
}

impl InMemoryAccountRepository {
    fn state(&self) -> Result<MutexGuard<'_, State>, PersistenceError> {
        self.state.lock().map_err(|_| {
            PersistenceError::Unknown(UnknownError::from("in-memory account storage poisoned"))
        })
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn list_accounts(&self) -> Result<Vec<Account>, PersistenceError> {
        Ok(self.state()?.accounts.values().cloned().collect())
    }

    async fn get_account(&self, id: i64) -> Result<Account, PersistenceError> {
        self.state()?
            .accounts
            .get(&id)
            .cloned()
            .ok_or(PersistenceError::NotFound)
    }

    async fn create_account(&self, account: &Account) -> Result<(), PersistenceError> {
        let mut state = self.state()?;
        state.last_id += 1;
        let id = state.last_id;
        state.accounts.insert(
            id,
            Account {
                id,
                ..account.clone()
            },
        );
        Ok(())
    }

    async fn update_account(&self, account: &Account) -> Result<Account, PersistenceError> {
        let mut state = self.state()?;
        let stored = state
            .accounts
            .get_mut(&account.id)
            .ok_or(PersistenceError::NotFound)?;

        stored.first_name = account.first_name.clone();
        stored.last_name = account.last_name.clone();
        stored.balance = account.balance;
        stored.created_at = account.created_at;
        Ok(stored.clone())
    }

    async fn delete_account(&self, id: i64) -> Result<(), PersistenceError> {
        self.state()?.accounts.remove(&id);
        Ok(())
    }
}
