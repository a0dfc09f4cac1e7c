use std::sync::Arc;

use tokio::net::TcpStream;
use uuid::Uuid;

use super::{RequestHead, Result, SessionInfo, TunnelError, TunnelTarget};
use crate::ports::{DialerPort, TrackingPort};

/// Decides whether a parsed request head becomes a tunnel, dials the target
/// and records the session. Transport concerns (reading the head, writing
/// responses, relaying bytes) live in the tcp_server adapter.
#[derive(Clone)]
pub struct TunnelService {
    dialer: Arc<dyn DialerPort>,
    tracker: Arc<dyn TrackingPort>,
}

impl TunnelService {
    pub fn new(dialer: Arc<dyn DialerPort>, tracker: Arc<dyn TrackingPort>) -> Self {
        Self { dialer, tracker }
    }

    /// Validate the head, dial the target and open a session for it.
    ///
    /// Failures are terminal for this connection only; the caller turns the
    /// error into a response and closes the client socket.
    pub async fn open_tunnel(
        &self,
        head: &RequestHead,
        peer: &str,
    ) -> Result<(TcpStream, Uuid)> {
        if !head.is_connect() {
            return Err(TunnelError::UnsupportedMethod(head.method.clone()));
        }

        let target: TunnelTarget = head.target.parse()?;

        let stream = self
            .dialer
            .dial(&target)
            .await
            .map_err(|err| TunnelError::DialFailed(err.to_string()))?;

        let session = SessionInfo::new(peer.to_string(), target.to_string());
        let session_id = session.id;
        self.tracker.track_session(session).await?;

        Ok((stream, session_id))
    }

    pub async fn close_tunnel(&self, id: Uuid) -> Result<()> {
        self.tracker.close_session(id).await
    }
}
