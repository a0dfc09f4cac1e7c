use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Result, SessionInfo};

/// Port for tracking open tunnel sessions
#[async_trait]
pub trait TrackingPort: Send + Sync {
    /// Register a new session
    async fn track_session(&self, info: SessionInfo) -> Result<()>;

    /// Mark a session as closed
    async fn close_session(&self, id: Uuid) -> Result<()>;

    /// Get all sessions that have not been closed yet
    async fn active_sessions(&self) -> Result<Vec<SessionInfo>>;
}
