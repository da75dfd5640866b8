// writing-backend/src/repository/mod.rs

pub mod activity_log_repository;
pub mod ai_generation_repository;
pub mod analytics_source;
pub mod character_repository;
pub mod document_repository;
pub mod document_version_repository;
pub mod project_collaborator_repository;
pub mod project_repository;
pub mod revenue_record_repository;
pub mod timeline_event_repository;
pub mod user_repository;
pub mod worldbuilding_repository;
pub mod writing_session_repository;
