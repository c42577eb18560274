//! Group ordering sessions and their participants

use crate::core::error::{KapiError, ValidationError};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A group ordering event tied to one restaurant and one cutoff time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: Uuid,
    pub creator_name: String,
    pub restaurant_id: String,
    pub restaurant_name: String,
    pub cutoff_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub participants: Vec<Participant>,
}

impl Session {
    /// Build a session from a validated request; the creator joins as the
    /// first participant
    pub fn from_request(request: NewSession, now: DateTime<Utc>) -> Self {
        let creator = Participant::new(request.creator_name.clone(), now);
        Self {
            id: Uuid::new_v4(),
            creator_name: request.creator_name,
            restaurant_id: request.restaurant_id,
            restaurant_name: request.restaurant_name,
            cutoff_time: request.cutoff_time,
            created_at: now,
            participants: vec![creator],
        }
    }

    /// Items may still be submitted
    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        now < self.cutoff_time
    }

    pub fn participant(&self, id: &Uuid) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: Uuid,
    pub name: String,
    pub joined_at: DateTime<Utc>,
}

impl Participant {
    pub fn new(name: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            joined_at: now,
        }
    }
}

/// Request body for creating a session
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewSession {
    #[validate(length(min = 2, max = 50, message = "must be between 2 and 50 characters"))]
    pub creator_name: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub restaurant_id: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub restaurant_name: String,
    pub cutoff_time: DateTime<Utc>,
}

impl NewSession {
    /// Field validation plus the cutoff window check
    pub fn check(&self, now: DateTime<Utc>, max_duration: Duration) -> Result<(), KapiError> {
        self.validate()?;

        if self.cutoff_time <= now {
            return Err(ValidationError::FieldError {
                field: "cutoffTime".to_string(),
                message: "must be in the future".to_string(),
            }
            .into());
        }
        if self.cutoff_time - now > max_duration {
            return Err(ValidationError::FieldError {
                field: "cutoffTime".to_string(),
                message: format!("must be within {} hours", max_duration.num_hours()),
            }
            .into());
        }
        Ok(())
    }
}

/// Request body for joining a session
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewParticipant {
    #[validate(length(min = 2, max = 50, message = "must be between 2 and 50 characters"))]
    pub name: String,
}
