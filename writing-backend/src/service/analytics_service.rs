// writing-backend/src/service/analytics_service.rs

//! プロジェクト執筆アナリティクスエンジン。
//!
//! 永続化済みのイベント・エンティティ行を読み、派生メトリクスのスナップ
//! ショットを1回の呼び出しで組み立てる。サブ集計は互いに独立しており、
//! アクセス確認後に並行ディスパッチして合流する。どれか1つでも失敗すれば
//! スナップショット全体が失敗する（部分結果は返さない）。

use crate::api::dto::analytics_dto::{
    ActivityFeedEntry, AiUsageStats, CollaborationStats, PersonaUsage, ProductivityStats,
    ProjectAnalyticsResponse, ProjectOverview, PublishingPromotion, RecentGeneration,
    WritingProgress,
};
use crate::error::{AppError, AppResult};
use crate::repository::analytics_source::AnalyticsSource;
use crate::service::publishing::{PublishingScorers, ReadinessInput, RevenueRecordInput};
use crate::service::writing_stats;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::sync::Arc;
use std::time::Duration as StdDuration;
use tracing::{info, warn};
use uuid::Uuid;

/// 直近フィードに含める生成履歴の件数
const RECENT_GENERATIONS_LIMIT: u64 = 10;

/// 直近フィードに含めるアクティビティログの件数
const RECENT_ACTIVITY_LIMIT: u64 = 20;

/// アクティブコラボレーター判定の窓（日数）
const ACTIVE_COLLABORATOR_WINDOW_DAYS: i64 = 7;

pub struct AnalyticsService {
    source: Arc<dyn AnalyticsSource>,
    scorers: Option<Arc<dyn PublishingScorers>>,
    computation_timeout: StdDuration,
}

impl AnalyticsService {
    pub fn new(source: Arc<dyn AnalyticsSource>, computation_timeout: StdDuration) -> Self {
        Self {
            source,
            scorers: None,
            computation_timeout,
        }
    }

    /// 出版準備度・プロモーション帰属スコアラーを接続する
    pub fn with_scorers(mut self, scorers: Arc<dyn PublishingScorers>) -> Self {
        self.scorers = Some(scorers);
        self
    }

    /// プロジェクトのアナリティクススナップショットを計算する。
    ///
    /// クエリ間のトランザクションは取らないため、各セクションはわずかに
    /// 異なる時点を反映しうる（助言的な統計であり台帳ではない）。
    pub async fn get_project_analytics(
        &self,
        project_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<ProjectAnalyticsResponse> {
        self.ensure_project_access(project_id, user_id).await?;

        let now = Utc::now();

        let compute = async {
            tokio::try_join!(
                self.overview(project_id),
                self.writing_progress(project_id, now),
                self.ai_usage(project_id, now),
                self.collaboration(project_id, now),
                self.productivity(project_id, now),
                self.publishing_promotion(project_id),
            )
        };

        let (overview, writing_progress, ai_usage, collaboration, productivity, publishing_promotion) =
            tokio::time::timeout(self.computation_timeout, compute)
                .await
                .map_err(|_| {
                    warn!(
                        project_id = %project_id,
                        timeout_secs = self.computation_timeout.as_secs(),
                        "Analytics computation timed out"
                    );
                    AppError::InternalServerError("Analytics computation timed out".to_string())
                })??;

        info!(
            project_id = %project_id,
            user_id = %user_id,
            total_documents = overview.total_documents,
            current_streak = writing_progress.streak.current_streak,
            "Project analytics snapshot generated"
        );

        Ok(ProjectAnalyticsResponse {
            project_id,
            overview,
            writing_progress,
            ai_usage,
            collaboration,
            productivity,
            publishing_promotion,
            generated_at: now,
        })
    }

    /// オーナーまたはコラボレーターのみアナリティクスを閲覧できる。
    /// プロジェクトの存在有無は漏らさない。
    async fn ensure_project_access(&self, project_id: Uuid, user_id: Uuid) -> AppResult<()> {
        if let Some(project) = self.source.find_project(project_id).await? {
            if project.owner_id == user_id {
                return Ok(());
            }
        }

        if self.source.collaborator_exists(project_id, user_id).await? {
            return Ok(());
        }

        warn!(
            project_id = %project_id,
            user_id = %user_id,
            "Access denied: analytics requested by non-member"
        );
        Err(AppError::Forbidden(
            "Access denied to project analytics".to_string(),
        ))
    }

    async fn overview(&self, project_id: Uuid) -> AppResult<ProjectOverview> {
        let (
            total_documents,
            total_words,
            total_characters,
            total_worldbuilding_entries,
            total_timeline_events,
            total_ai_generations,
        ) = tokio::try_join!(
            self.source.count_documents(project_id),
            self.source.sum_document_words(project_id),
            self.source.count_characters(project_id),
            self.source.count_worldbuilding_entries(project_id),
            self.source.count_timeline_events(project_id),
            self.source.count_ai_generations(project_id),
        )?;

        Ok(ProjectOverview {
            total_documents,
            total_words,
            total_characters,
            total_worldbuilding_entries,
            total_timeline_events,
            total_ai_generations,
        })
    }

    async fn writing_progress(
        &self,
        project_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<WritingProgress> {
        let today = now.date_naive();

        // 月次バケットの窓が最も広いので、1回のフェッチで全バケットを賄う
        let cutoff = day_start_utc(writing_stats::monthly_window_start(today));
        let sessions = self
            .source
            .sessions_created_since(project_id, cutoff)
            .await?;

        let activity_dates = self.source.document_activity_dates(project_id).await?;

        Ok(WritingProgress {
            daily: writing_stats::daily_buckets(&sessions, today),
            weekly: writing_stats::weekly_buckets(&sessions, today),
            monthly: writing_stats::monthly_buckets(&sessions, today),
            weekly_stats: writing_stats::weekly_stats(&sessions, today),
            monthly_stats: writing_stats::monthly_stats(&sessions, today),
            streak: writing_stats::calculate_streaks(&activity_dates, today),
        })
    }

    async fn ai_usage(&self, project_id: Uuid, now: DateTime<Utc>) -> AppResult<AiUsageStats> {
        let today = now.date_naive();

        let total_generations = self.source.count_ai_generations(project_id).await?;

        let mut persona_counts = self.source.persona_counts(project_id).await?;
        // 回数降順、同数はペルソナ名で安定させる
        persona_counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        let by_persona = persona_counts
            .into_iter()
            .map(|(persona, count)| PersonaUsage { persona, count })
            .collect();

        let recent = self
            .source
            .recent_generations(project_id, RECENT_GENERATIONS_LIMIT)
            .await?
            .into_iter()
            .map(|generation| RecentGeneration {
                id: generation.id,
                persona: generation.persona.clone(),
                prompt_preview: writing_stats::prompt_preview(&generation.prompt),
                created_at: generation.created_at,
            })
            .collect();

        let cutoff = day_start_utc(today - Duration::days(29));
        let generations = self
            .source
            .generations_created_since(project_id, cutoff)
            .await?;
        let (daily_token_usage, total_tokens_used, estimated_cost) =
            writing_stats::token_usage_series(&generations, today);

        Ok(AiUsageStats {
            total_generations,
            by_persona,
            recent,
            daily_token_usage,
            total_tokens_used,
            estimated_cost,
        })
    }

    async fn collaboration(
        &self,
        project_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<CollaborationStats> {
        let total_collaborators = self.source.count_collaborators(project_id).await?;

        let cutoff = now - Duration::days(ACTIVE_COLLABORATOR_WINDOW_DAYS);
        let active_collaborators = self
            .source
            .count_active_users_since(project_id, cutoff)
            .await?;

        let logs = self
            .source
            .recent_activity(project_id, RECENT_ACTIVITY_LIMIT)
            .await?;

        let mut user_ids: Vec<Uuid> = logs.iter().map(|log| log.user_id).collect();
        user_ids.sort();
        user_ids.dedup();
        let users = self.source.users_by_ids(&user_ids).await?;

        let recent_activity = logs
            .into_iter()
            .map(|log| {
                let user_name = users
                    .get(&log.user_id)
                    .and_then(|user| user.visible_name())
                    .unwrap_or("Unknown User")
                    .to_string();
                ActivityFeedEntry {
                    user_name,
                    action: log.action,
                    entity_type: log.entity_type,
                    created_at: log.created_at,
                }
            })
            .collect();

        Ok(CollaborationStats {
            total_collaborators,
            active_collaborators,
            recent_activity,
        })
    }

    async fn productivity(
        &self,
        project_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<ProductivityStats> {
        let sessions = self.source.sessions_for_project(project_id).await?;
        let today = now.date_naive();

        Ok(ProductivityStats {
            average_session_duration: writing_stats::average_session_duration(&sessions),
            total_writing_time: writing_stats::total_writing_time(&sessions),
            most_productive_hour: writing_stats::most_productive_hour(&sessions),
            consistency_score: writing_stats::consistency_score(&sessions, today),
        })
    }

    async fn publishing_promotion(
        &self,
        project_id: Uuid,
    ) -> AppResult<Option<PublishingPromotion>> {
        let Some(scorers) = &self.scorers else {
            return Ok(None);
        };

        let project = self
            .source
            .find_project(project_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {} not found", project_id)))?;
        let readiness = scorers.readiness(&ReadinessInput::from_project(&project));

        let records: Vec<RevenueRecordInput> = self
            .source
            .revenue_records(project_id)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();
        let promotion_attribution = scorers.attribution(&records);

        Ok(Some(PublishingPromotion {
            readiness,
            promotion_attribution,
        }))
    }
}

fn day_start_utc(date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_hms_opt(0, 0, 0).unwrap();
    DateTime::<Utc>::from_naive_utc_and_offset(midnight, Utc)
}
