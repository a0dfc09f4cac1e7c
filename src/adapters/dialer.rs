use async_trait::async_trait;
use tokio::net::TcpStream;

use crate::domain::TunnelTarget;
use crate::ports::DialerPort;

/// Direct TCP dialer. Resolution and connect use the platform defaults;
/// CONNECT failures are not retried here, re-issuing is the client's call.
#[derive(Clone, Copy, Default)]
pub struct TcpDialer;

impl TcpDialer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DialerPort for TcpDialer {
    async fn dial(&self, target: &TunnelTarget) -> std::io::Result<TcpStream> {
        TcpStream::connect((target.host.as_str(), target.port)).await
    }
}
