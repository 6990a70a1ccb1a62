use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::prelude::*;

use phonebook_api::config::{ApiConfig, CorsConfig};
use phonebook_api::database::{MemoryContactStore, PgContactStore, SharedStore};
use phonebook_api::{handlers, helpers};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    log_file_path: Option<String>,

    /// Keep contacts in process memory instead of Postgres
    #[arg(long)]
    in_memory: bool,
}

fn init_tracing(log_file_path: Option<String>) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if let Some(log_path) = log_file_path {
        let log_path = std::path::Path::new(&log_path);
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(std::path::Path::new(".")),
            log_path
                .file_name()
                .unwrap_or(std::ffi::OsStr::new("phonebook-api.log")),
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        std::mem::forget(guard);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(true)
                    .with_writer(std::io::stdout),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }
}

fn build_cors(config: &CorsConfig) -> Cors {
    let cors = if config.allowed_origins.is_empty() {
        Cors::default().allow_any_origin()
    } else {
        config
            .allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    cors.allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
        .allowed_headers(vec!["Accept", "Content-Type"])
        .max_age(3600)
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_tracing(args.log_file_path);

    let (config, config_path) = ApiConfig::load(args.config.as_deref())?;
    tracing::info!("Loaded config from {}", config_path.display());

    let pg_store = if args.in_memory {
        None
    } else {
        let pool = helpers::database::initialize_pool(&config.database);
        Some(PgContactStore::new(pool))
    };

    let store: SharedStore = match &pg_store {
        Some(pg) => Arc::new(pg.clone()),
        None => {
            tracing::warn!("Using in-memory contact store; data is lost on exit");
            Arc::new(MemoryContactStore::new())
        }
    };

    let host = config.server.host.clone();
    let port = config.server.port;
    tracing::info!("Server running at {}:{}", host, port);

    let cors_config = config.cors.clone();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(build_cors(&cors_config))
            .app_data(web::Data::new(store.clone()))
            .configure(handlers::configure)
    })
    .bind((host.as_str(), port))?
    .run();

    let handle = server.handle();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }

        tracing::info!("Ctrl+C received, shutting down...");
        handle.stop(true).await;
    });

    server.await?;

    if let Some(pg) = pg_store {
        pg.close().await;
    }

    Ok(())
}
