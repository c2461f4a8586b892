//! Appointments API Server
//!
//! Run with: cargo run --bin appointments-api
//!
//! # Configuration
//!
//! Read from `$CONFIG_DIR/appointments/config.toml` or `./appointments.toml`,
//! then overridden by environment variables:
//! - `APPOINTMENTS_SERVER_HOST`: Host to bind to (default: 127.0.0.1)
//! - `APPOINTMENTS_SERVER_PORT`: Port to listen on (default: 3000)
//! - `APPOINTMENTS_LOG_LEVEL`: Log level (default: info)
//! - `APPOINTMENTS_LOG_FORMAT`: `pretty` or `json` (default: pretty)
//! - `RUST_LOG`: Full filter, wins over the log level

use appointments::api::{serve, AppState};
use appointments::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    appointments::logging::init(&config.logging);

    tracing::info!("Starting Appointments API server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        opens_at = config.salon.opens_at,
        closes_at = config.salon.closes_at,
        stylists = config.salon.stylists.len(),
        "Salon hours loaded"
    );

    let state = AppState::new(&config)?;
    serve(state, &config.server).await?;

    tracing::info!("Appointments API server stopped");
    Ok(())
}
