use chrono::{DateTime, Utc};
use rand_core::{OsRng, RngCore};
use serde::{Deserialize, Serialize};

/// Account numbers are drawn from `0..ACCOUNT_NUMBER_LIMIT`.
pub const ACCOUNT_NUMBER_LIMIT: u32 = 1_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub number: i64,
    pub balance: i64,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// New account with no balance and a random number.
    ///
    /// The id stays `0` until the account is stored; storage assigns it.
    /// Numbers are not checked for uniqueness.
    pub fn new(first_name: String, last_name: String) -> Self {
        Self {
            id: 0,
            first_name,
            last_name,
            number: random_number(),
            balance: 0,
            created_at: Utc::now(),
        }
    }

    /// Replacement state for the account `id`.
    ///
    /// `created_at` is stamped again, the stored creation time is lost on
    /// update. `number` is left at `0`, storage never overwrites it.
    pub fn with_update(id: i64, first_name: String, last_name: String, balance: i64) -> Self {
        Self {
            id,
            first_name,
            last_name,
            number: 0,
            balance,
            created_at: Utc::now(),
        }
    }
}

fn random_number() -> i64 {
    (OsRng.next_u32() % ACCOUNT_NUMBER_LIMIT) as i64
}
