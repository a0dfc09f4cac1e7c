use async_trait::async_trait;
use tokio::net::TcpStream;

use crate::domain::TunnelTarget;

/// Port for dialing the outbound leg of a tunnel.
///
/// Returns the raw stream so the handler can relay over it; the underlying
/// `io::Error` message ends up in the 500 reason phrase on failure.
#[async_trait]
pub trait DialerPort: Send + Sync {
    async fn dial(&self, target: &TunnelTarget) -> std::io::Result<TcpStream>;
}
