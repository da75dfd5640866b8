// writing-backend/src/api/dto/writing_dto.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::{activity_log_model, writing_session_model};

// --- Requests ---

#[derive(Debug, Deserialize, Validate)]
pub struct StartWritingSessionRequest {
    pub document_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct EndWritingSessionRequest {
    #[validate(range(min = 0, message = "words_written must not be negative"))]
    pub words_written: i32,
    #[validate(range(min = 0, message = "duration_minutes must not be negative"))]
    pub duration_minutes: i32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LogActivityRequest {
    #[validate(length(min = 1, max = 100, message = "action must be 1-100 characters"))]
    pub action: String,
    #[validate(length(min = 1, max = 100, message = "entity_type must be 1-100 characters"))]
    pub entity_type: String,
    pub entity_id: Option<Uuid>,
    pub details: Option<serde_json::Value>,
}

// --- Responses ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WritingSessionResponse {
    pub id: Uuid,
    pub project_id: Uuid,
    pub document_id: Option<Uuid>,
    pub words_written: i32,
    pub duration_minutes: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
}

impl From<writing_session_model::Model> for WritingSessionResponse {
    fn from(session: writing_session_model::Model) -> Self {
        Self {
            id: session.id,
            project_id: session.project_id,
            document_id: session.document_id,
            words_written: session.words_written,
            duration_minutes: session.duration_minutes,
            start_time: session.start_time,
            end_time: session.end_time,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLogResponse {
    pub id: Uuid,
    pub project_id: Uuid,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<activity_log_model::Model> for ActivityLogResponse {
    fn from(log: activity_log_model::Model) -> Self {
        Self {
            id: log.id,
            project_id: log.project_id,
            action: log.action,
            entity_type: log.entity_type,
            entity_id: log.entity_id,
            created_at: log.created_at,
        }
    }
}
