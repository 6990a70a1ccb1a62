use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgSslMode};

use crate::config::DatabaseConfig;

pub fn connect_options(config: &DatabaseConfig) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.dbname)
        .ssl_mode(PgSslMode::Disable)
}

/// Build the shared pool. Connections are opened on first use, so the
/// server starts even while the database is still coming up.
pub fn initialize_pool(config: &DatabaseConfig) -> PgPool {
    tracing::info!(
        "Connecting to postgres at {}:{}/{} as {}",
        config.host,
        config.port,
        config.dbname,
        config.user
    );

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_lazy_with(connect_options(config))
}
