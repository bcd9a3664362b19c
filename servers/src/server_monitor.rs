//! # Player Monitor HTTP Trigger
//!
//! A Rust HTTP server that runs one signage fleet monitoring pass per
//! request. An external scheduler (e.g. Cloud Scheduler hitting the service
//! every ten minutes, plus a few fixed-time summary triggers) calls `GET /`
//! with an optional `mode` query parameter.
//!
//! ## Key Features:
//! - **Two run modes**: `delta` (default) diffs the fleet against the
//!   persisted snapshot and alerts only on changes; `summary` reports the
//!   full roster and leaves the snapshot alone.
//! - **Sequential pipeline**: each trigger runs fetch -> diff -> persist ->
//!   dispatch to completion before responding; the scheduler is assumed to
//!   serialize triggers.
//! - **Configurable**: secrets and paths come from the environment (a local
//!   `.env` is honored); the listen port via `--port`/`PORT` using `clap`.
//! - **Fail-fast configuration**: a missing API credential stops the process
//!   at startup, before any work is performed.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use clap::Parser;
use lib_common::configs::config_env::MonitorConfig;
use lib_common::loggers::setup_logging;
use lib_common::monitor::{FourYouSeeSource, Monitor, RunMode};
use log::{error, info};
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;

/// # Application Configuration
///
/// Command-line/environment options of the trigger server itself. The
/// monitoring credentials live in [`MonitorConfig`], not here.
#[derive(Parser, Debug)]
#[clap(author, version, about = "HTTP trigger for the signage player status monitor.")]
struct AppConfig {
    /// HTTP server port. Can be provided via `--port` argument or `PORT`
    /// environment variable. Defaults to 8080.
    #[clap(long, env = "PORT", default_value_t = 8080, help = "HTTP server port")]
    port: u16,
}

/// Query parameters of the trigger endpoint.
#[derive(Debug, Deserialize)]
struct RunParams {
    /// `delta` or `summary`; absent means `delta`.
    mode: Option<String>,
}

type SharedMonitor = Arc<Monitor<FourYouSeeSource>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load a local .env first so both clap and MonitorConfig see it.
    dotenvy::dotenv().ok();
    setup_logging("server_monitor")?;

    let app_config = AppConfig::parse();
    let monitor_config = MonitorConfig::from_env()?;
    if !monitor_config.telegram_enabled() {
        info!("Telegram channel disabled (credentials not configured)");
    }
    if !monitor_config.discord_enabled() {
        info!("Discord channel disabled (webhook not configured)");
    }

    let source = FourYouSeeSource::new(&monitor_config.api_base_url, &monitor_config.api_token)?;
    let monitor = Arc::new(Monitor::from_config(&monitor_config, source));

    let app = Router::new()
        .route("/", get(run_monitor_handler))
        .with_state(monitor);

    let addr = SocketAddr::from(([0, 0, 0, 0], app_config.port));
    info!("Monitor trigger listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

/// # Run Monitor Handler
///
/// Executes one monitoring run and maps the outcome onto HTTP:
/// - 200 with `{"status":"success", ...}` when the run completed,
/// - 400 for an unrecognized `mode`,
/// - 500 with `{"status":"error", ...}` when the upstream fetch failed.
async fn run_monitor_handler(
    State(monitor): State<SharedMonitor>,
    Query(params): Query<RunParams>,
) -> (StatusCode, Json<serde_json::Value>) {
    let mode = match params.mode.as_deref() {
        None => RunMode::default(),
        Some(raw) => match raw.parse::<RunMode>() {
            Ok(mode) => mode,
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "status": "error", "message": e.to_string() })),
                );
            }
        },
    };

    info!("--- Trigger received, starting {} run ---", mode);
    match monitor.run(mode).await {
        Ok(report) => {
            info!("--- Run completed: {} ---", report.message());
            (
                StatusCode::OK,
                Json(json!({ "status": "success", "message": report.message() })),
            )
        }
        Err(e) => {
            error!("Run aborted: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "status": "error", "message": e.to_string() })),
            )
        }
    }
}
