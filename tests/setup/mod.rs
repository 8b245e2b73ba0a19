#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use bank_ledger::{
    config::Config,
    infra::{database::repository::PgAccountRepository, memory::InMemoryAccountRepository, router},
};
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
};
use salvo::{listener::TcpListener, Server};
use serde::Deserialize;
use url::Url;

#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub message: String,
    pub data: Option<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(rename = "Error")]
    pub error: String,
}

/// Serve the account API over an in-memory repository on a free local port.
pub async fn setup_test() -> (Client, Url) {
    let repository = Arc::new(InMemoryAccountRepository::default());
    let port = free_port();

    let listener = TcpListener::bind(&format!("127.0.0.1:{port}"));
    tokio::spawn(Server::new(listener).serve(router::app(repository)));

    (create_client(), service_url(port))
}

fn free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .and_then(|listener| listener.local_addr())
        .map(|addr| addr.port())
        .expect("Expect a free local port")
}

fn service_url(port: u16) -> Url {
    Url::parse(format!("http://127.0.0.1:{port}").as_str()).unwrap()
}

pub async fn setup_database() -> PgAccountRepository {
    dotenv::dotenv().ok();
    let config = Config::from_env().expect("Expect database env vars, see .env.example");

    let pool = bank_ledger::infra::database::connection::create_pool(&config.database)
        .await
        .expect("Expect to create a database pool with a open connection");

    sqlx::query("DROP TABLE IF EXISTS accounts")
        .execute(&pool)
        .await
        .unwrap();

    PgAccountRepository::new(pool)
}

fn create_client() -> reqwest::Client {
    let mut headers = HeaderMap::new();
    headers.append("accept", HeaderValue::from_static("application/json"));

    let keep_alive = 1000 * 60 * 60; // 1 hours
    let connect_timeout = 1000 * 5; // 5 sec
    let timeout = 1000 * 10; // 10 sec

    reqwest::Client::builder()
        .tcp_keepalive(Duration::from_millis(keep_alive))
        .connect_timeout(Duration::from_millis(connect_timeout))
        .timeout(Duration::from_millis(timeout))
        .pool_max_idle_per_host(5)
        .default_headers(headers)
        .brotli(true)
        .gzip(true)
        .build()
        .expect("Expect to create a http client")
}
