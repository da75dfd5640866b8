// writing-backend/src/service/writing_session_service.rs

use crate::db::DbPool;
use crate::domain::writing_session_model;
use crate::error::{AppError, AppResult};
use crate::repository::document_repository::DocumentRepository;
use crate::repository::project_collaborator_repository::ProjectCollaboratorRepository;
use crate::repository::project_repository::ProjectRepository;
use crate::repository::writing_session_repository::WritingSessionRepository;
use crate::utils::error_helper::not_found_error;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

/// 執筆セッションの開始・終了（アナリティクスエンジンが読むデータの書き込み側）
pub struct WritingSessionService {
    sessions: WritingSessionRepository,
    documents: DocumentRepository,
    projects: ProjectRepository,
    collaborators: ProjectCollaboratorRepository,
}

impl WritingSessionService {
    pub fn new(db: DbPool) -> Self {
        Self {
            sessions: WritingSessionRepository::new(db.clone()),
            documents: DocumentRepository::new(db.clone()),
            projects: ProjectRepository::new(db.clone()),
            collaborators: ProjectCollaboratorRepository::new(db),
        }
    }

    /// セッションを開始する。カウンタは0で作成し、終了時に確定する。
    pub async fn start_session(
        &self,
        project_id: Uuid,
        user_id: Uuid,
        document_id: Option<Uuid>,
    ) -> AppResult<writing_session_model::Model> {
        super::ensure_project_access(&self.projects, &self.collaborators, project_id, user_id)
            .await?;

        if let Some(document_id) = document_id {
            let document = self
                .documents
                .find_by_id(document_id)
                .await?
                .ok_or_else(|| {
                    not_found_error("Document", &document_id.to_string(), "writing_session_service")
                })?;
            if document.project_id != project_id {
                return Err(AppError::BadRequest(
                    "Document does not belong to this project".to_string(),
                ));
            }
        }

        let now = Utc::now();
        let session = writing_session_model::Model {
            id: Uuid::new_v4(),
            project_id,
            user_id,
            document_id,
            words_written: 0,
            duration_minutes: 0,
            start_time: now,
            end_time: None,
            created_at: now,
        };

        let created = self.sessions.create(&session).await?;

        info!(
            session_id = %created.id,
            project_id = %project_id,
            user_id = %user_id,
            "Writing session started"
        );

        Ok(created)
    }

    /// セッションを終了し、結果を確定する。確定後のセッションは変更できない。
    pub async fn end_session(
        &self,
        session_id: Uuid,
        user_id: Uuid,
        words_written: i32,
        duration_minutes: i32,
    ) -> AppResult<writing_session_model::Model> {
        let session = self.sessions.find_by_id(session_id).await?.ok_or_else(|| {
            not_found_error(
                "Writing session",
                &session_id.to_string(),
                "writing_session_service",
            )
        })?;

        if session.user_id != user_id {
            return Err(AppError::Forbidden(
                "Cannot end another user's writing session".to_string(),
            ));
        }

        if session.is_ended() {
            return Err(AppError::Conflict(
                "Writing session has already ended".to_string(),
            ));
        }

        let ended = self
            .sessions
            .finalize(session, words_written, duration_minutes, Utc::now())
            .await?;

        info!(
            session_id = %ended.id,
            project_id = %ended.project_id,
            words_written = words_written,
            duration_minutes = duration_minutes,
            "Writing session ended"
        );

        Ok(ended)
    }
}
