// writing-backend/src/repository/analytics_source.rs

//! アナリティクスエンジンが必要とする読み取りクエリの注入ポイント。
//!
//! 本番では [`SeaOrmAnalyticsSource`] がリポジトリ群へ委譲し、テストでは
//! インメモリのフェイク実装に差し替えられる。エンジン側はこのトレイト
//! 経由でしかストアに触れない。

use crate::db::DbPool;
use crate::domain::{
    activity_log_model, ai_generation_model, project_model, revenue_record_model, user_model,
    writing_session_model,
};
use crate::error::AppResult;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use super::activity_log_repository::ActivityLogRepository;
use super::ai_generation_repository::AiGenerationRepository;
use super::character_repository::CharacterRepository;
use super::document_repository::DocumentRepository;
use super::document_version_repository::DocumentVersionRepository;
use super::project_collaborator_repository::ProjectCollaboratorRepository;
use super::project_repository::ProjectRepository;
use super::revenue_record_repository::RevenueRecordRepository;
use super::timeline_event_repository::TimelineEventRepository;
use super::user_repository::UserRepository;
use super::worldbuilding_repository::WorldbuildingRepository;
use super::writing_session_repository::WritingSessionRepository;

#[async_trait]
pub trait AnalyticsSource: Send + Sync {
    async fn find_project(&self, project_id: Uuid) -> AppResult<Option<project_model::Model>>;
    async fn collaborator_exists(&self, project_id: Uuid, user_id: Uuid) -> AppResult<bool>;

    async fn count_documents(&self, project_id: Uuid) -> AppResult<u64>;
    async fn sum_document_words(&self, project_id: Uuid) -> AppResult<i64>;
    async fn count_characters(&self, project_id: Uuid) -> AppResult<u64>;
    async fn count_worldbuilding_entries(&self, project_id: Uuid) -> AppResult<u64>;
    async fn count_timeline_events(&self, project_id: Uuid) -> AppResult<u64>;
    async fn count_ai_generations(&self, project_id: Uuid) -> AppResult<u64>;

    /// ドキュメント更新日とバージョン保存日の和集合（重複あり、順不同で良い）
    async fn document_activity_dates(&self, project_id: Uuid) -> AppResult<Vec<NaiveDate>>;

    async fn sessions_for_project(
        &self,
        project_id: Uuid,
    ) -> AppResult<Vec<writing_session_model::Model>>;
    async fn sessions_created_since(
        &self,
        project_id: Uuid,
        cutoff: DateTime<Utc>,
    ) -> AppResult<Vec<writing_session_model::Model>>;

    async fn persona_counts(&self, project_id: Uuid) -> AppResult<Vec<(String, i64)>>;
    async fn recent_generations(
        &self,
        project_id: Uuid,
        limit: u64,
    ) -> AppResult<Vec<ai_generation_model::Model>>;
    async fn generations_created_since(
        &self,
        project_id: Uuid,
        cutoff: DateTime<Utc>,
    ) -> AppResult<Vec<ai_generation_model::Model>>;

    async fn count_collaborators(&self, project_id: Uuid) -> AppResult<u64>;
    async fn count_active_users_since(
        &self,
        project_id: Uuid,
        cutoff: DateTime<Utc>,
    ) -> AppResult<u64>;
    async fn recent_activity(
        &self,
        project_id: Uuid,
        limit: u64,
    ) -> AppResult<Vec<activity_log_model::Model>>;
    async fn users_by_ids(&self, ids: &[Uuid]) -> AppResult<HashMap<Uuid, user_model::Model>>;

    async fn revenue_records(
        &self,
        project_id: Uuid,
    ) -> AppResult<Vec<revenue_record_model::Model>>;
}

/// SeaORMリポジトリ群に委譲する本番実装
#[derive(Clone)]
pub struct SeaOrmAnalyticsSource {
    projects: ProjectRepository,
    collaborators: ProjectCollaboratorRepository,
    documents: DocumentRepository,
    document_versions: DocumentVersionRepository,
    sessions: WritingSessionRepository,
    generations: AiGenerationRepository,
    activity_logs: ActivityLogRepository,
    users: UserRepository,
    characters: CharacterRepository,
    worldbuilding: WorldbuildingRepository,
    timeline_events: TimelineEventRepository,
    revenue_records: RevenueRecordRepository,
}

impl SeaOrmAnalyticsSource {
    pub fn new(db: DbPool) -> Self {
        Self {
            projects: ProjectRepository::new(db.clone()),
            collaborators: ProjectCollaboratorRepository::new(db.clone()),
            documents: DocumentRepository::new(db.clone()),
            document_versions: DocumentVersionRepository::new(db.clone()),
            sessions: WritingSessionRepository::new(db.clone()),
            generations: AiGenerationRepository::new(db.clone()),
            activity_logs: ActivityLogRepository::new(db.clone()),
            users: UserRepository::new(db.clone()),
            characters: CharacterRepository::new(db.clone()),
            worldbuilding: WorldbuildingRepository::new(db.clone()),
            timeline_events: TimelineEventRepository::new(db.clone()),
            revenue_records: RevenueRecordRepository::new(db),
        }
    }
}

#[async_trait]
impl AnalyticsSource for SeaOrmAnalyticsSource {
    async fn find_project(&self, project_id: Uuid) -> AppResult<Option<project_model::Model>> {
        self.projects.find_by_id(project_id).await
    }

    async fn collaborator_exists(&self, project_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        self.collaborators
            .membership_exists(project_id, user_id)
            .await
    }

    async fn count_documents(&self, project_id: Uuid) -> AppResult<u64> {
        self.documents.count_for_project(project_id).await
    }

    async fn sum_document_words(&self, project_id: Uuid) -> AppResult<i64> {
        self.documents.sum_word_count(project_id).await
    }

    async fn count_characters(&self, project_id: Uuid) -> AppResult<u64> {
        self.characters.count_for_project(project_id).await
    }

    async fn count_worldbuilding_entries(&self, project_id: Uuid) -> AppResult<u64> {
        self.worldbuilding.count_for_project(project_id).await
    }

    async fn count_timeline_events(&self, project_id: Uuid) -> AppResult<u64> {
        self.timeline_events.count_for_project(project_id).await
    }

    async fn count_ai_generations(&self, project_id: Uuid) -> AppResult<u64> {
        self.generations.count_for_project(project_id).await
    }

    async fn document_activity_dates(&self, project_id: Uuid) -> AppResult<Vec<NaiveDate>> {
        let mut dates = self.documents.updated_dates(project_id).await?;
        dates.extend(self.document_versions.created_dates(project_id).await?);
        Ok(dates)
    }

    async fn sessions_for_project(
        &self,
        project_id: Uuid,
    ) -> AppResult<Vec<writing_session_model::Model>> {
        self.sessions.find_for_project(project_id).await
    }

    async fn sessions_created_since(
        &self,
        project_id: Uuid,
        cutoff: DateTime<Utc>,
    ) -> AppResult<Vec<writing_session_model::Model>> {
        self.sessions.find_created_since(project_id, cutoff).await
    }

    async fn persona_counts(&self, project_id: Uuid) -> AppResult<Vec<(String, i64)>> {
        self.generations.persona_counts(project_id).await
    }

    async fn recent_generations(
        &self,
        project_id: Uuid,
        limit: u64,
    ) -> AppResult<Vec<ai_generation_model::Model>> {
        self.generations.find_recent(project_id, limit).await
    }

    async fn generations_created_since(
        &self,
        project_id: Uuid,
        cutoff: DateTime<Utc>,
    ) -> AppResult<Vec<ai_generation_model::Model>> {
        self.generations
            .find_created_since(project_id, cutoff)
            .await
    }

    async fn count_collaborators(&self, project_id: Uuid) -> AppResult<u64> {
        self.collaborators.count_for_project(project_id).await
    }

    async fn count_active_users_since(
        &self,
        project_id: Uuid,
        cutoff: DateTime<Utc>,
    ) -> AppResult<u64> {
        self.activity_logs
            .count_distinct_users_since(project_id, cutoff)
            .await
    }

    async fn recent_activity(
        &self,
        project_id: Uuid,
        limit: u64,
    ) -> AppResult<Vec<activity_log_model::Model>> {
        self.activity_logs.find_recent(project_id, limit).await
    }

    async fn users_by_ids(&self, ids: &[Uuid]) -> AppResult<HashMap<Uuid, user_model::Model>> {
        self.users.find_by_ids(ids).await
    }

    async fn revenue_records(
        &self,
        project_id: Uuid,
    ) -> AppResult<Vec<revenue_record_model::Model>> {
        self.revenue_records.find_for_project(project_id).await
    }
}
