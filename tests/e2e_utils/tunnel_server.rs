#![cfg(test)]
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use nanotunnel::adapters::{SessionTracker, TcpDialer, TunnelListener};
use nanotunnel::domain::TunnelService;
use nanotunnel::ports::TrackingPort;

/// A full proxy wired like `main`, bound to an ephemeral port.
pub struct TestTunnelServer {
    addr: SocketAddr,
    _server_handle: JoinHandle<()>,
}

impl TestTunnelServer {
    pub async fn start() -> Result<Self, Box<dyn std::error::Error>> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let tracker = Arc::new(SessionTracker::new());
        tracker.start_cleanup();
        let tracker_port: Arc<dyn TrackingPort> = tracker;

        let service = Arc::new(TunnelService::new(Arc::new(TcpDialer::new()), tracker_port));
        let server = TunnelListener::new(service);

        let server_handle = tokio::spawn(async move {
            server.run(listener).await;
        });

        Ok(Self {
            addr,
            _server_handle: server_handle,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}
