use std::net::SocketAddr;

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        if dotenvy::dotenv().is_err() {
            tracing::warn!(".env file not found, using default values");
        }

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "8080".to_string()).parse().context("PORT")?;

        // A full DATABASE_URL wins; otherwise the connection is assembled
        // from the individual DB_* variables and their defaults.
        let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
            let db_host = std::env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());
            let db_port = std::env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string());
            let db_user = std::env::var("DB_USER").unwrap_or_else(|_| "postgres".to_string());
            let db_password = std::env::var("DB_PASSWORD").unwrap_or_default();
            let db_name = std::env::var("DB_NAME").unwrap_or_else(|_| "inventory".to_string());
            format!("postgres://{db_user}:{db_password}@{db_host}:{db_port}/{db_name}")
        });

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            database_url,
        })
    }
}
