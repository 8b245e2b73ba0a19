pub mod connection {
    use sqlx::postgres::{PgPool, PgPoolOptions};

    use crate::{config::DatabaseConfig, error::persistence::PersistenceError};

    pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, PersistenceError> {
        let pool = PgPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(config.idle_timeout)
            .max_lifetime(config.max_lifetime)
            .connect(&config.url)
            .await?;
        Ok(pool)
    }
}

pub mod sql {
    pub const CREATE_ACCOUNT_TABLE: &str = include_str!("../../dbschema.sql");

    // Integer columns are widened so rows decode into `i64` fields.
    macro_rules! account_columns {
        () => {
            "id::BIGINT AS id, first_name, last_name, number::BIGINT AS number, \
             balance::BIGINT AS balance, created_at"
        };
    }

    pub const SELECT_ACCOUNTS: &str = concat!("SELECT ", account_columns!(), " FROM accounts");

    pub const SELECT_ACCOUNT_BY_ID: &str = concat!(
        "SELECT ",
        account_columns!(),
        " FROM accounts WHERE id = $1"
    );

    pub const INSERT_ACCOUNT: &str = concat!(
        "INSERT INTO accounts (first_name, last_name, number, balance, created_at) ",
        "VALUES ($1, $2, $3, $4, $5)"
    );

    pub const UPDATE_ACCOUNT: &str = concat!(
        "UPDATE accounts SET first_name = $2, last_name = $3, balance = $4, created_at = $5 ",
        "WHERE id = $1 RETURNING ",
        account_columns!()
    );

    pub const DELETE_ACCOUNT: &str = "DELETE FROM accounts WHERE id = $1";
}

mod transform {
    use sqlx::{postgres::PgRow, FromRow, Row};

    use crate::domain::entity::Account;

    impl<'r> FromRow<'r, PgRow> for Account {
        fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
            Ok(Self {
                id: row.try_get("id")?,
                first_name: row.try_get("first_name")?,
                last_name: row.try_get("last_name")?,
                number: row.try_get("number")?,
                balance: row.try_get("balance")?,
                created_at: row.try_get("created_at")?,
            })
        }
    }
}

pub mod repository {
    use async_trait::async_trait;
    use futures::TryStreamExt;
    use sqlx::PgPool;

    use super::sql;
    use crate::{
        domain::{entity::Account, repository::AccountRepository},
        error::persistence::PersistenceError,
    };

    /// Accounts stored in the PostgreSQL `accounts` table.
    #[derive(Debug, Clone)]
    pub struct PgAccountRepository {
        pool: PgPool,
    }

    impl PgAccountRepository {
        pub fn new(pool: PgPool) -> Self {
            Self { pool }
        }
    }

    #[async_trait]
    impl AccountRepository for PgAccountRepository {
        async fn init(&self) -> Result<(), PersistenceError> {
            sqlx::query(sql::CREATE_ACCOUNT_TABLE)
                .execute(&self.pool)
                .await?;
            Ok(())
        }

        async fn list_accounts(&self) -> Result<Vec<Account>, PersistenceError> {
            let mut rows = sqlx::query_as::<_, Account>(sql::SELECT_ACCOUNTS).fetch(&self.pool);

            let mut accounts = Vec::new();
            while let Some(account) = rows.try_next().await? {
                accounts.push(account);
            }

            Ok(accounts)
        }

        async fn get_account(&self, id: i64) -> Result<Account, PersistenceError> {
            let account = sqlx::query_as::<_, Account>(sql::SELECT_ACCOUNT_BY_ID)
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
            Ok(account)
        }

        async fn create_account(&self, account: &Account) -> Result<(), PersistenceError> {
            let result = sqlx::query(sql::INSERT_ACCOUNT)
                .bind(&account.first_name)
                .bind(&account.last_name)
                .bind(account.number)
                .bind(account.balance)
                .bind(account.created_at)
                .execute(&self.pool)
                .await?;

            tracing::debug!(rows = result.rows_affected(), "inserted account");
            Ok(())
        }

        async fn update_account(&self, account: &Account) -> Result<Account, PersistenceError> {
            let updated = sqlx::query_as::<_, Account>(sql::UPDATE_ACCOUNT)
                .bind(account.id)
                .bind(&account.first_name)
                .bind(&account.last_name)
                .bind(account.balance)
                .bind(account.created_at)
                .fetch_one(&self.pool)
                .await?;
            Ok(updated)
        }

        async fn delete_account(&self, id: i64) -> Result<(), PersistenceError> {
            sqlx::query(sql::DELETE_ACCOUNT)
                .bind(id)
                .execute(&self.pool)
                .await?;
            Ok(())
        }
    }
}
