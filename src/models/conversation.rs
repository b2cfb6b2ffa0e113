use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::Speaker;
use super::user::User;

/// Doctor/patient chat message, scoped to one report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub report_id: Uuid,
    pub sender: User,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(report_id: Uuid, sender: User, text: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            report_id,
            sender,
            text: text.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// One turn of the AI assistant conversation about a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantTurn {
    pub speaker: Speaker,
    pub text: String,
}

impl AssistantTurn {
    pub fn user(text: &str) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.to_string(),
        }
    }

    pub fn assistant(text: &str) -> Self {
        Self {
            speaker: Speaker::Assistant,
            text: text.to_string(),
        }
    }
}
