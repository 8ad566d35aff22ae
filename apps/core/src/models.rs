use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

use crate::agent::ActionDescriptor;

/// Fixed system preamble sent to the external model, and stored as the
/// default agent configuration for new sessions.
pub const SYSTEM_PREAMBLE: &str = "You are StudyMate, a study-companion agent. \
Help students with previous-year-question analysis, study documents, \
summaries, and academic questions. Be concise and encouraging.";

/// Represents the agent configuration for a session.
#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct AgentConfig {
    /// The identifier for the model to be used when an external endpoint is configured.
    #[validate(length(min = 1))]
    pub model_id: String,
    /// Controls the creativity of the model's responses. Value between 0.0 and 2.0.
    #[validate(range(min = 0.0, max = 2.0))]
    pub temperature: f32,
    /// The system-level instructions provided to the model for context.
    #[validate(length(min = 1))]
    pub system_prompt: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model_id: "studymate-default".to_string(),
            temperature: 0.7,
            system_prompt: SYSTEM_PREAMBLE.to_string(),
        }
    }
}

/// Represents a chat session.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Session {
    /// The unique identifier for the session (UUID).
    pub id: String,
    /// The user-defined title of the session.
    pub title: String,
    /// Unix timestamp of when the session was created.
    pub created_at: i64,
    /// The agent configuration associated with this session.
    pub agent_config: Json<AgentConfig>,
}

/// Represents a single message within a chat session.
///
/// Messages form an append-only ordered sequence; rows are never mutated
/// after insertion.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Message {
    /// The unique identifier for the message.
    pub id: i64,
    /// The ID of the session this message belongs to.
    pub session_id: String,
    /// The role of the message sender ("user" or "agent").
    pub role: String,
    /// The text content of the message.
    pub content: String,
    /// Optional download action attached to an agent reply.
    pub action: Option<Json<ActionDescriptor>>,
    /// Unix timestamp of when the message was created.
    pub created_at: i64,
}

/// Message roles as stored in the database.
pub mod role {
    pub const USER: &str = "user";
    pub const AGENT: &str = "agent";
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AgentConfig::default().validate().is_ok());
    }

    #[test]
    fn test_temperature_bounds() {
        let config = AgentConfig {
            temperature: 3.5,
            ..AgentConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
