pub mod controller;
pub mod database;
pub mod memory;

pub mod router {
    use std::sync::Arc;

    use salvo::{logging::Logger, Router};

    use super::controller::*;
    use crate::domain::repository::AccountRepository;

    /// Route table of the account API.
    ///
    /// Each path owns a single controller that dispatches on the method, an
    /// unsupported method on a known path fails with the uniform 400 body.
    /// `transfer` is matched before the `<id>` wildcard.
    pub fn app<R>(repository: Arc<R>) -> Router
    where
        R: AccountRepository + 'static,
    {
        Router::new().push(accounts(repository)).hoop(Logger)
    }

    pub fn accounts<R>(repository: Arc<R>) -> Router
    where
        R: AccountRepository + 'static,
    {
        Router::with_path("accounts")
            .handle(AccountsController::new(repository.clone()))
            .push(Router::with_path("transfer").handle(TransferController::new(repository.clone())))
            .push(Router::with_path("<id>").handle(AccountController::new(repository)))
    }
}
