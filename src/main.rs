use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use nanotunnel::adapters::{SessionTracker, TcpDialer, TunnelListener};
use nanotunnel::domain::TunnelService;
use nanotunnel::ports::TrackingPort;

#[derive(Parser, Debug)]
#[clap(version = env!("NANOTUNNEL_VERSION"), about = "CONNECT tunneling proxy")]
pub struct Opts {
    /// Listen on this port, on all interfaces
    #[clap(long, short = 'p', default_value_t = 9919)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opts = Opts::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let tracker = Arc::new(SessionTracker::new());
    tracker.start_cleanup();
    let tracker_port: Arc<dyn TrackingPort> = tracker;

    let service = Arc::new(TunnelService::new(Arc::new(TcpDialer::new()), tracker_port));
    let server = TunnelListener::new(service);

    // A busy port is the one process-fatal condition.
    let listener = TcpListener::bind(("0.0.0.0", opts.port))
        .await
        .map_err(|err| format!("failed to bind port {}: {}", opts.port, err))?;

    info!(port = opts.port, "listening");

    tokio::select! {
        _ = server.run(listener) => {}
        _ = tokio::signal::ctrl_c() => {
            info!("shutting down");
        }
    }

    Ok(())
}
