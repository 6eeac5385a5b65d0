use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::info;

use intake_ingest::UploaderBuilder;
use intake_server::api::AppState;
use intake_server::config::IntakeConfig;
use intake_server::error::ServerError;
use intake_server::{serve, store_factory, telemetry};
use intake_tls::MinTlsVersion;

/// Intake file upload server.
#[derive(Parser, Debug)]
#[command(name = "intake-server", about = "Single-endpoint file upload server")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "intake.toml")]
    config: String,

    /// Override the bind host.
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port.
    #[arg(long)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the metadata table for the configured backend, then exit.
    Migrate,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // More than one rustls crypto provider is linked; pin ring process-wide.
    let _ = rustls::crypto::ring::default_provider().install_default();

    let (mut config, found) = IntakeConfig::load(&cli.config)?;
    config.apply_env(|key| std::env::var(key).ok())?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    if let Some(Commands::Migrate) = cli.command {
        telemetry::init_logging(&config.logging);
        info!(backend = %config.metadata.backend, "running metadata migrations...");
        store_factory::migrate_metadata(&config.metadata).await?;
        info!("migrations complete");
        return Ok(());
    }

    let telemetry_guard = telemetry::init(&config.logging, &config.telemetry);
    if !found {
        info!(path = %cli.config, "config file not found, using defaults");
    }

    let blob_store = store_factory::create_blob_store(&config.blob).await?;
    let metadata_store = store_factory::create_metadata_store(&config.metadata).await?;
    info!(
        blob = %config.blob.backend,
        metadata = %config.metadata.backend,
        compensate_orphans = config.upload.compensate_orphans,
        "stores initialized"
    );

    let uploader = UploaderBuilder::new()
        .blob_store(blob_store)
        .metadata_store(metadata_store)
        .compensate_orphans(config.upload.compensate_orphans)
        .build()?;
    let uploader = Arc::new(uploader);

    let app = intake_server::api::router(AppState {
        uploader: Arc::clone(&uploader),
        max_body_bytes: config.server.max_body_bytes,
    });

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let grace = Duration::from_secs(config.server.shutdown_timeout_seconds);

    if config.tls.enabled {
        let cert_path = config.tls.cert_path.as_deref().ok_or_else(|| {
            ServerError::Config("TLS enabled but no cert_path / TLS_CERT_PATH set".into())
        })?;
        let key_path = config.tls.key_path.as_deref().ok_or_else(|| {
            ServerError::Config("TLS enabled but no key_path / TLS_KEY_PATH set".into())
        })?;
        let min_version: MinTlsVersion = config.tls.min_version.parse()?;
        let tls_config = intake_tls::build_server_config(cert_path, key_path, min_version)?;

        info!(address = %addr, tls = true, "intake-server listening");
        serve::serve_tls(listener, app, tls_config, serve::shutdown_signal(), grace).await?;
    } else {
        info!(address = %addr, tls = false, "intake-server listening");
        serve::serve_plain(listener, app, serve::shutdown_signal()).await?;
    }

    let snapshot = uploader.metrics().snapshot();
    info!(
        received = snapshot.received,
        stored = snapshot.stored,
        missing_file = snapshot.missing_file,
        storage_failures = snapshot.storage_failures,
        metadata_failures = snapshot.metadata_failures,
        orphans_removed = snapshot.orphans_removed,
        bytes_stored = snapshot.bytes_stored,
        "upload totals"
    );

    telemetry_guard.shutdown();

    info!("intake-server shut down");
    Ok(())
}
