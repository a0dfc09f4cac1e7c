use crate::domain::{Result, SessionInfo};
use crate::ports::TrackingPort;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tokio::time::interval;
use tracing::info;
use uuid::Uuid;

/// In-memory session tracker
pub struct SessionTracker {
    sessions: Arc<RwLock<Vec<SessionInfo>>>,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Start background cleanup task
    pub fn start_cleanup(&self) -> tokio::task::JoinHandle<()> {
        let sessions = self.sessions.clone();

        tokio::spawn(async move {
            let mut ticker = interval(Duration::from_millis(250));

            loop {
                ticker.tick().await;

                let mut entries = sessions.write().await;
                let now = Instant::now();

                // Drop sessions closed more than 4 seconds ago
                entries.retain(|session| {
                    if let Some(closed_at) = session.closed_at {
                        now.duration_since(closed_at).as_secs() < 4
                    } else {
                        true
                    }
                });
            }
        })
    }
}

impl Default for SessionTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TrackingPort for SessionTracker {
    async fn track_session(&self, info: SessionInfo) -> Result<()> {
        info!(session = %info.id, peer = %info.peer, target = %info.target, "tunnel opened");

        let mut entries = self.sessions.write().await;
        entries.push(info);

        Ok(())
    }

    async fn close_session(&self, id: Uuid) -> Result<()> {
        let mut entries = self.sessions.write().await;

        if let Some(session) = entries.iter_mut().find(|s| s.id == id) {
            session.closed_at = Some(Instant::now());
        }

        Ok(())
    }

    async fn active_sessions(&self) -> Result<Vec<SessionInfo>> {
        let entries = self.sessions.read().await;
        Ok(entries
            .iter()
            .filter(|s| s.closed_at.is_none())
            .cloned()
            .collect())
    }
}
