pub(crate) mod app;
pub(crate) mod cli;
pub(crate) mod error;

#[cfg(test)]
mod tests;

use crate::error::{BindSnafu, ClientSnafu, ConnectorResult, ServeSnafu};
use api_query_rest::limiter::RateLimiter;
use api_query_rest::state::AppState;
use clap::Parser;
use core_chainbase::ChainbaseClient;
use dotenv::dotenv;
use snafu::ResultExt;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{Layer, layer::SubscriberExt, util::SubscriberInitExt};

const TARGETS: [&str; 4] = ["connectord", "api_query_rest", "core_chainbase", "core_native"];

#[tokio::main]
async fn main() {
    dotenv().ok();

    let opts = cli::CliOpts::parse();

    setup_tracing(&opts);

    if let Err(error) = run(opts).await {
        tracing::error!(%error, "connector stopped");
        std::process::exit(1);
    }
}

async fn run(opts: cli::CliOpts) -> ConnectorResult<()> {
    let warehouse = Arc::new(ChainbaseClient::new(opts.client_config()).context(ClientSnafu)?);
    tracing::info!(endpoint = %warehouse.endpoint(), "chainbase client ready");

    let limiter = Arc::new(RateLimiter::with_burst(opts.rate_limit));
    let state = AppState::new(warehouse, limiter);

    let router = app::create_app(state, opts.request_timeout())
        .into_make_service_with_connect_info::<SocketAddr>();

    let addr = format!("{}:{}", opts.host, opts.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context(BindSnafu { addr: &addr })?;
    let local_addr = listener.local_addr().context(BindSnafu { addr })?;
    tracing::info!(
        rate_limit = opts.rate_limit.get(),
        "Listening on http://{}",
        local_addr
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context(ServeSnafu)
}

fn setup_tracing(opts: &cli::CliOpts) {
    let targets_with_level = |level: LevelFilter| -> Vec<(&str, LevelFilter)> {
        TARGETS.iter().map(|t| ((*t), level)).collect()
    };
    let level = LevelFilter::from(opts.tracing_level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_span_events(FmtSpan::CLOSE)
                .with_filter(match std::env::var("RUST_LOG") {
                    Ok(val) => match val.parse::<Targets>() {
                        Ok(log_targets_from_env) => log_targets_from_env,
                        Err(err) => {
                            eprintln!("Failed to parse RUST_LOG: {err:?}");
                            Targets::default()
                                .with_targets(targets_with_level(level))
                                .with_default(LevelFilter::WARN)
                        }
                    },
                    // tower_http traces under its own target
                    _ => Targets::default()
                        .with_targets(targets_with_level(level))
                        .with_target("tower_http", level)
                        .with_default(LevelFilter::WARN),
                }),
        )
        .init();
}

/// Resolves on Ctrl+C or SIGTERM.
///
/// A signal whose handler cannot be installed is logged and never fires.
#[allow(clippy::redundant_pub_crate)]
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!(%error, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::warn!("Ctrl+C received, starting graceful shutdown"),
        () = terminate => tracing::warn!("SIGTERM received, starting graceful shutdown"),
    }
}
