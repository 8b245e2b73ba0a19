pub mod account {
    use crate::{
        app::resource::account::{CreateAccount, TransferFunds, UpdateAccount},
        domain::{entity::Account, repository::AccountRepository},
        error::{app::ApplicationError, persistence::PersistenceError},
    };

    pub async fn create_account<R>(repository: &R, dto: CreateAccount) -> Result<(), PersistenceError>
    where
        R: AccountRepository + ?Sized,
    {
        let account = Account::from(dto);
        repository.create_account(&account).await?;
        tracing::debug!(number = account.number, "account created");
        Ok(())
    }

    pub async fn update_account<R>(
        repository: &R,
        id: i64,
        dto: UpdateAccount,
    ) -> Result<Account, PersistenceError>
    where
        R: AccountRepository + ?Sized,
    {
        repository.update_account(&Account::from((id, dto))).await
    }

    /// Credit `amount` to the destination account.
    ///
    /// Only the destination is touched: no source account is debited. The
    /// read and the write are separate storage calls without isolation, so
    /// concurrent transfers to one account can lose updates.
    pub async fn transfer<R>(repository: &R, dto: TransferFunds) -> Result<Account, ApplicationError>
    where
        R: AccountRepository + ?Sized,
    {
        let mut account = repository.get_account(dto.to_account).await?;
        account.balance = account.balance.checked_add(dto.amount).ok_or(
            ApplicationError::BalanceOverflow {
                balance: account.balance,
                amount: dto.amount,
            },
        )?;
        Ok(repository.update_account(&account).await?)
    }
}
