use std::sync::Arc;

use salvo::{listener::TcpListener, Server};
use tracing_subscriber::EnvFilter;

use bank_ledger::{
    config::Config,
    domain::repository::AccountRepository,
    error::BoxedError,
    infra::{
        database::{connection, repository::PgAccountRepository},
        router,
    },
};

#[tokio::main]
async fn main() -> Result<(), BoxedError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let pool = connection::create_pool(&config.database).await?;
    let repository = PgAccountRepository::new(pool);
    repository.init().await?;

    let address = config.listen_address();
    tracing::info!("JSON API server running on {address}");

    let listener = TcpListener::bind(&address);
    Server::new(listener)
        .serve(router::app(Arc::new(repository)))
        .await;

    Ok(())
}
