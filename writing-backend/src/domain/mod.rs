// writing-backend/src/domain/mod.rs

pub mod activity_log_model;
pub mod ai_generation_model;
pub mod character_model;
pub mod document_model;
pub mod document_version_model;
pub mod project_collaborator_model;
pub mod project_model;
pub mod revenue_record_model;
pub mod timeline_event_model;
pub mod user_model;
pub mod worldbuilding_entry_model;
pub mod writing_session_model;
