use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use axum_server::{tls_rustls::RustlsConfig, Handle};
use clap::Parser;
use evo_back::AppState;
use tokio::time;
use tracing_subscriber::EnvFilter;

const SNAPSHOT_INTERVAL: time::Duration = time::Duration::from_secs(300);
const SHUTDOWN_GRACE: time::Duration = time::Duration::from_secs(5);

/// Evolution of Todo API server.
#[derive(Debug, Parser)]
#[command(name = "back", version)]
struct Args {
    #[arg(long, env = "PORT", default_value_t = 7890)]
    port: u16,

    /// RON snapshot restored on start and rewritten periodically.
    #[arg(long, env = "DATA_FILE", default_value = "data.ron")]
    data_file: PathBuf,

    #[arg(long, env = "SSL_CERT", requires = "tls_key")]
    tls_cert: Option<PathBuf>,

    #[arg(long, env = "SSL_KEY", requires = "tls_cert")]
    tls_key: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let state = Arc::new(AppState::load(&args.data_file)?);

    tokio::spawn({
        let state = state.clone();
        async move {
            loop {
                time::sleep(SNAPSHOT_INTERVAL).await;
                if let Err(err) = state.store().await {
                    tracing::error!("Failed to store data: {:?}", err);
                }
            }
        }
    });

    let handle = Handle::new();

    tokio::spawn({
        let handle = handle.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("shutting down");
                handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
            }
        }
    });

    let addr = SocketAddr::from(([0; 4], args.port));
    let app = evo_back::app(state.clone());

    match (args.tls_cert, args.tls_key) {
        (Some(cert), Some(key)) => {
            let config = RustlsConfig::from_pem_file(cert, key).await?;
            tracing::info!(%addr, "listening (tls)");

            axum_server::bind_rustls(addr, config)
                .handle(handle)
                .serve(app.into_make_service())
                .await?;
        }
        _ => {
            tracing::info!(%addr, "listening");

            axum_server::bind(addr)
                .handle(handle)
                .serve(app.into_make_service())
                .await?;
        }
    }

    state.store().await?;

    Ok(())
}
