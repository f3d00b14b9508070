use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use geolive::config::{Config, Settings, TerminalSize};
use geolive::monitor::Poller;
use geolive_core::{GeoClient, TerminalSurface};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Config::parse_args();

    // Setup logging
    setup_logging(cli.debug);

    // Validate settings (exit status 1 on failure)
    let settings = Settings::from_cli(&cli, TerminalSize::detect())?;

    let client = GeoClient::new()?;
    let mut poller = Poller::new(&settings, client, TerminalSurface::stdout());
    poller.run_until(shutdown_signal()).await
}

fn setup_logging(debug: bool) {
    let default_filter = if debug {
        "geolive=debug,geolive_core=debug"
    } else {
        "geolive=info,geolive_core=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // stdout carries readings and the chart
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl-C, shutting down"),
        Err(e) => {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
