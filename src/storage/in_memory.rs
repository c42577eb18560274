//! In-memory implementation of SessionStore for testing and development

use crate::core::error::{KapiError, KapiResult, SessionError};
use crate::core::order::{NewLineItem, OrderLineItem};
use crate::core::service::SessionStore;
use crate::core::session::{Participant, Session};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

#[derive(Debug)]
struct StoredSession {
    session: Session,
    items: Vec<OrderLineItem>,
}

/// In-memory session store
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, StoredSession>>>,
}

impl InMemorySessionStore {
    /// Create a new in-memory session store
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(e: impl std::fmt::Display) -> KapiError {
    KapiError::Internal(format!("Failed to acquire session lock: {}", e))
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create_session(&self, session: Session) -> KapiResult<Session> {
        let mut sessions = self.sessions.write().map_err(poisoned)?;

        sessions.insert(
            session.id,
            StoredSession {
                session: session.clone(),
                items: Vec::new(),
            },
        );

        Ok(session)
    }

    async fn get_session(&self, id: &Uuid) -> KapiResult<Option<Session>> {
        let sessions = self.sessions.read().map_err(poisoned)?;

        Ok(sessions.get(id).map(|stored| stored.session.clone()))
    }

    async fn add_participant(&self, session_id: &Uuid, name: String) -> KapiResult<Participant> {
        let mut sessions = self.sessions.write().map_err(poisoned)?;

        let stored = sessions
            .get_mut(session_id)
            .ok_or(SessionError::NotFound { id: *session_id })?;

        let participant = Participant::new(name, Utc::now());
        stored.session.participants.push(participant.clone());

        Ok(participant)
    }

    async fn add_items(
        &self,
        session_id: &Uuid,
        participant_id: &Uuid,
        items: Vec<NewLineItem>,
    ) -> KapiResult<Vec<OrderLineItem>> {
        let mut sessions = self.sessions.write().map_err(poisoned)?;

        let stored = sessions
            .get_mut(session_id)
            .ok_or(SessionError::NotFound { id: *session_id })?;

        if !stored.session.is_open(Utc::now()) {
            return Err(SessionError::Closed {
                id: *session_id,
                cutoff_time: stored.session.cutoff_time,
            }
            .into());
        }

        let participant_name = stored
            .session
            .participant(participant_id)
            .map(|p| p.name.clone())
            .ok_or(SessionError::ParticipantNotFound {
                session_id: *session_id,
                participant_id: *participant_id,
            })?;

        let lines: Vec<OrderLineItem> = items
            .into_iter()
            .map(|item| OrderLineItem::from_submission(item, *participant_id, &participant_name))
            .collect();
        stored.items.extend(lines.iter().cloned());

        Ok(lines)
    }

    async fn list_items(&self, session_id: &Uuid) -> KapiResult<Vec<OrderLineItem>> {
        let sessions = self.sessions.read().map_err(poisoned)?;

        sessions
            .get(session_id)
            .map(|stored| stored.items.clone())
            .ok_or_else(|| SessionError::NotFound { id: *session_id }.into())
    }
}
