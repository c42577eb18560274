//! Service trait for session persistence

use crate::core::error::KapiResult;
use crate::core::order::{NewLineItem, OrderLineItem};
use crate::core::session::{Participant, Session};
use async_trait::async_trait;
use uuid::Uuid;

/// Storage for sessions, participants and submitted cart lines
///
/// The normalizer and the aggregator never touch storage; handlers read
/// lines through this trait and pass them in as plain values.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persist a new session
    async fn create_session(&self, session: Session) -> KapiResult<Session>;

    /// Get a session by ID
    async fn get_session(&self, id: &Uuid) -> KapiResult<Option<Session>>;

    /// Add a participant to an existing session
    async fn add_participant(&self, session_id: &Uuid, name: String) -> KapiResult<Participant>;

    /// Store submitted lines for a participant
    ///
    /// Fails with `SessionError::Closed` once the session cutoff has passed.
    async fn add_items(
        &self,
        session_id: &Uuid,
        participant_id: &Uuid,
        items: Vec<NewLineItem>,
    ) -> KapiResult<Vec<OrderLineItem>>;

    /// All lines of a session in submission order
    async fn list_items(&self, session_id: &Uuid) -> KapiResult<Vec<OrderLineItem>>;
}
