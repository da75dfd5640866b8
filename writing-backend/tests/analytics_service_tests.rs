// writing-backend/tests/analytics_service_tests.rs
//
// アナリティクスサービスのテスト。ストアはインメモリのフェイクに差し替える。

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use writing_backend::domain::{
    activity_log_model, ai_generation_model, project_collaborator_model, project_model,
    revenue_record_model, user_model, writing_session_model,
};
use writing_backend::error::{AppError, AppResult};
use writing_backend::repository::analytics_source::AnalyticsSource;
use writing_backend::service::analytics_service::AnalyticsService;
use writing_backend::service::publishing::{PublishingScorers, ReadinessInput, RevenueRecordInput};

// --- フェイクストア ---

#[derive(Default)]
struct FakeAnalyticsSource {
    project: Option<project_model::Model>,
    collaborators: Vec<project_collaborator_model::Model>,
    document_activity_dates: Vec<NaiveDate>,
    document_count: u64,
    document_word_total: i64,
    character_count: u64,
    worldbuilding_count: u64,
    timeline_event_count: u64,
    sessions: Vec<writing_session_model::Model>,
    generations: Vec<ai_generation_model::Model>,
    activity_logs: Vec<activity_log_model::Model>,
    users: Vec<user_model::Model>,
    revenue: Vec<revenue_record_model::Model>,
    /// セッション取得に遅延を入れる（タイムアウト検証用）
    session_fetch_delay: Option<Duration>,
}

#[async_trait]
impl AnalyticsSource for FakeAnalyticsSource {
    async fn find_project(&self, project_id: Uuid) -> AppResult<Option<project_model::Model>> {
        Ok(self
            .project
            .clone()
            .filter(|project| project.id == project_id))
    }

    async fn collaborator_exists(&self, project_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        Ok(self
            .collaborators
            .iter()
            .any(|c| c.project_id == project_id && c.user_id == user_id))
    }

    async fn count_documents(&self, _project_id: Uuid) -> AppResult<u64> {
        Ok(self.document_count)
    }

    async fn sum_document_words(&self, _project_id: Uuid) -> AppResult<i64> {
        Ok(self.document_word_total)
    }

    async fn count_characters(&self, _project_id: Uuid) -> AppResult<u64> {
        Ok(self.character_count)
    }

    async fn count_worldbuilding_entries(&self, _project_id: Uuid) -> AppResult<u64> {
        Ok(self.worldbuilding_count)
    }

    async fn count_timeline_events(&self, _project_id: Uuid) -> AppResult<u64> {
        Ok(self.timeline_event_count)
    }

    async fn count_ai_generations(&self, _project_id: Uuid) -> AppResult<u64> {
        Ok(self.generations.len() as u64)
    }

    async fn document_activity_dates(&self, _project_id: Uuid) -> AppResult<Vec<NaiveDate>> {
        Ok(self.document_activity_dates.clone())
    }

    async fn sessions_for_project(
        &self,
        _project_id: Uuid,
    ) -> AppResult<Vec<writing_session_model::Model>> {
        if let Some(delay) = self.session_fetch_delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.sessions.clone())
    }

    async fn sessions_created_since(
        &self,
        _project_id: Uuid,
        cutoff: DateTime<Utc>,
    ) -> AppResult<Vec<writing_session_model::Model>> {
        Ok(self
            .sessions
            .iter()
            .filter(|s| s.created_at >= cutoff)
            .cloned()
            .collect())
    }

    async fn persona_counts(&self, _project_id: Uuid) -> AppResult<Vec<(String, i64)>> {
        let mut counts: HashMap<String, i64> = HashMap::new();
        for generation in &self.generations {
            *counts.entry(generation.persona.clone()).or_insert(0) += 1;
        }
        Ok(counts.into_iter().collect())
    }

    async fn recent_generations(
        &self,
        _project_id: Uuid,
        limit: u64,
    ) -> AppResult<Vec<ai_generation_model::Model>> {
        let mut generations = self.generations.clone();
        generations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        generations.truncate(limit as usize);
        Ok(generations)
    }

    async fn generations_created_since(
        &self,
        _project_id: Uuid,
        cutoff: DateTime<Utc>,
    ) -> AppResult<Vec<ai_generation_model::Model>> {
        Ok(self
            .generations
            .iter()
            .filter(|g| g.created_at >= cutoff)
            .cloned()
            .collect())
    }

    async fn count_collaborators(&self, _project_id: Uuid) -> AppResult<u64> {
        Ok(self.collaborators.len() as u64)
    }

    async fn count_active_users_since(
        &self,
        _project_id: Uuid,
        cutoff: DateTime<Utc>,
    ) -> AppResult<u64> {
        let mut user_ids: Vec<Uuid> = self
            .activity_logs
            .iter()
            .filter(|log| log.created_at >= cutoff)
            .map(|log| log.user_id)
            .collect();
        user_ids.sort();
        user_ids.dedup();
        Ok(user_ids.len() as u64)
    }

    async fn recent_activity(
        &self,
        _project_id: Uuid,
        limit: u64,
    ) -> AppResult<Vec<activity_log_model::Model>> {
        let mut logs = self.activity_logs.clone();
        logs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        logs.truncate(limit as usize);
        Ok(logs)
    }

    async fn users_by_ids(&self, ids: &[Uuid]) -> AppResult<HashMap<Uuid, user_model::Model>> {
        Ok(self
            .users
            .iter()
            .filter(|user| ids.contains(&user.id))
            .map(|user| (user.id, user.clone()))
            .collect())
    }

    async fn revenue_records(
        &self,
        _project_id: Uuid,
    ) -> AppResult<Vec<revenue_record_model::Model>> {
        Ok(self.revenue.clone())
    }
}

// --- テストデータヘルパー ---

fn project(owner_id: Uuid) -> project_model::Model {
    project_model::Model {
        id: Uuid::new_v4(),
        owner_id,
        title: "Test Novel".to_string(),
        word_count_target: 80000,
        word_count_current: 12000,
        publication_status: "draft".to_string(),
        cover_asset_id: None,
        active_blurb: None,
        kdp_keywords: None,
        kdp_categories: None,
        list_price_cents: None,
        launch_date: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn collaborator(project_id: Uuid, user_id: Uuid) -> project_collaborator_model::Model {
    project_collaborator_model::Model {
        id: Uuid::new_v4(),
        project_id,
        user_id,
        created_at: Utc::now(),
    }
}

fn session(
    project_id: Uuid,
    user_id: Uuid,
    created_at: DateTime<Utc>,
    words: i32,
    minutes: i32,
) -> writing_session_model::Model {
    writing_session_model::Model {
        id: Uuid::new_v4(),
        project_id,
        user_id,
        document_id: None,
        words_written: words,
        duration_minutes: minutes,
        start_time: created_at,
        end_time: Some(created_at + ChronoDuration::minutes(minutes as i64)),
        created_at,
    }
}

fn generation(
    project_id: Uuid,
    persona: &str,
    prompt: &str,
    created_at: DateTime<Utc>,
    metadata: Option<serde_json::Value>,
) -> ai_generation_model::Model {
    ai_generation_model::Model {
        id: Uuid::new_v4(),
        project_id,
        user_id: Uuid::new_v4(),
        persona: persona.to_string(),
        prompt: prompt.to_string(),
        metadata,
        created_at,
    }
}

fn activity(
    project_id: Uuid,
    user_id: Uuid,
    action: &str,
    created_at: DateTime<Utc>,
) -> activity_log_model::Model {
    activity_log_model::Model {
        id: Uuid::new_v4(),
        project_id,
        user_id,
        action: action.to_string(),
        entity_type: "document".to_string(),
        entity_id: None,
        details: None,
        created_at,
    }
}

fn user(name: &str) -> user_model::Model {
    user_model::Model {
        id: Uuid::new_v4(),
        username: name.to_string(),
        display_name: None,
        email: format!("{}@example.com", name),
        created_at: Utc::now(),
    }
}

fn service(source: FakeAnalyticsSource) -> AnalyticsService {
    AnalyticsService::new(Arc::new(source), Duration::from_secs(5))
}

// --- テスト ---

#[tokio::test]
async fn test_empty_project_snapshot_succeeds_with_zeroes() {
    let owner_id = Uuid::new_v4();
    let project = project(owner_id);
    let project_id = project.id;

    let source = FakeAnalyticsSource {
        project: Some(project),
        ..Default::default()
    };

    let snapshot = service(source)
        .get_project_analytics(project_id, owner_id)
        .await
        .unwrap();

    assert_eq!(snapshot.project_id, project_id);
    assert_eq!(snapshot.overview.total_documents, 0);
    assert_eq!(snapshot.overview.total_words, 0);
    assert_eq!(snapshot.overview.total_ai_generations, 0);

    assert_eq!(snapshot.writing_progress.streak.current_streak, 0);
    assert_eq!(snapshot.writing_progress.streak.longest_streak, 0);
    assert_eq!(snapshot.writing_progress.streak.last_active_date, "");
    assert!(snapshot.writing_progress.daily.is_empty());
    assert_eq!(snapshot.writing_progress.weekly_stats.total_words, 0);
    assert_eq!(snapshot.writing_progress.weekly_stats.average_daily, 0.0);

    assert_eq!(snapshot.ai_usage.total_generations, 0);
    assert!(snapshot.ai_usage.by_persona.is_empty());
    assert!(snapshot.ai_usage.daily_token_usage.is_empty());
    assert_eq!(snapshot.ai_usage.total_tokens_used, 0);

    assert_eq!(snapshot.collaboration.total_collaborators, 0);
    assert_eq!(snapshot.collaboration.active_collaborators, 0);
    assert!(snapshot.collaboration.recent_activity.is_empty());

    assert_eq!(snapshot.productivity.average_session_duration, 0.0);
    assert_eq!(snapshot.productivity.total_writing_time, 0);
    assert_eq!(snapshot.productivity.most_productive_hour, None);
    assert_eq!(snapshot.productivity.consistency_score, 0);

    assert!(snapshot.publishing_promotion.is_none());
}

#[tokio::test]
async fn test_non_member_receives_access_denied() {
    let owner_id = Uuid::new_v4();
    let project = project(owner_id);
    let project_id = project.id;

    let source = FakeAnalyticsSource {
        project: Some(project),
        ..Default::default()
    };

    let result = service(source)
        .get_project_analytics(project_id, Uuid::new_v4())
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn test_missing_project_is_access_denied() {
    let source = FakeAnalyticsSource::default();

    let result = service(source)
        .get_project_analytics(Uuid::new_v4(), Uuid::new_v4())
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn test_collaborator_can_view_analytics() {
    let owner_id = Uuid::new_v4();
    let viewer_id = Uuid::new_v4();
    let project = project(owner_id);
    let project_id = project.id;

    let source = FakeAnalyticsSource {
        project: Some(project),
        collaborators: vec![collaborator(project_id, viewer_id)],
        ..Default::default()
    };

    let snapshot = service(source)
        .get_project_analytics(project_id, viewer_id)
        .await
        .unwrap();

    assert_eq!(snapshot.collaboration.total_collaborators, 1);
}

#[tokio::test]
async fn test_progress_and_productivity_aggregation() {
    let owner_id = Uuid::new_v4();
    let project = project(owner_id);
    let project_id = project.id;
    let now = Utc::now();

    let sessions = vec![
        session(project_id, owner_id, now, 500, 30),
        session(project_id, owner_id, now - ChronoDuration::days(1), 300, 60),
        session(project_id, owner_id, now - ChronoDuration::days(1), 200, 30),
    ];

    let today = now.date_naive();
    let source = FakeAnalyticsSource {
        project: Some(project),
        sessions,
        document_activity_dates: vec![today, today - ChronoDuration::days(1)],
        ..Default::default()
    };

    let snapshot = service(source)
        .get_project_analytics(project_id, owner_id)
        .await
        .unwrap();

    let progress = &snapshot.writing_progress;
    assert_eq!(progress.daily.len(), 2);
    assert_eq!(progress.daily[0].words_written, 500);
    assert_eq!(progress.daily[0].session_count, 1);
    assert_eq!(progress.daily[1].words_written, 500);
    assert_eq!(progress.daily[1].session_count, 2);
    // 昇順であること
    assert!(progress.daily[0].period_start < progress.daily[1].period_start);

    assert_eq!(progress.weekly_stats.total_words, 1000);
    assert!((progress.weekly_stats.average_daily - 1000.0 / 7.0).abs() < f64::EPSILON);
    assert_eq!(progress.monthly_stats.total_words, 1000);

    assert_eq!(progress.streak.current_streak, 2);
    assert_eq!(progress.streak.longest_streak, 2);
    assert_eq!(
        progress.streak.last_active_date,
        today.format("%Y-%m-%d").to_string()
    );

    let productivity = &snapshot.productivity;
    assert!((productivity.average_session_duration - 40.0).abs() < f64::EPSILON);
    assert_eq!(productivity.total_writing_time, 120);
    assert!(productivity.most_productive_hour.is_some());
    // 2日アクティブ → round(100 * 2 / 30) = 7
    assert_eq!(productivity.consistency_score, 7);
}

#[tokio::test]
async fn test_ai_usage_aggregation() {
    let owner_id = Uuid::new_v4();
    let project = project(owner_id);
    let project_id = project.id;
    let now = Utc::now();

    let long_prompt = "x".repeat(150);
    let generations = vec![
        generation(
            project_id,
            "editor",
            &long_prompt,
            now,
            Some(serde_json::json!({"tokens_in": 1200, "tokens_out": 800})),
        ),
        generation(
            project_id,
            "muse",
            "Give me three plot twists",
            now - ChronoDuration::days(1),
            Some(serde_json::json!({"tokens_in": 500, "tokens_out": 500})),
        ),
        generation(
            project_id,
            "editor",
            "Tighten this dialogue",
            now - ChronoDuration::days(2),
            None,
        ),
    ];

    let source = FakeAnalyticsSource {
        project: Some(project),
        generations,
        ..Default::default()
    };

    let snapshot = service(source)
        .get_project_analytics(project_id, owner_id)
        .await
        .unwrap();

    let ai = &snapshot.ai_usage;
    assert_eq!(ai.total_generations, 3);

    // ペルソナは回数降順
    assert_eq!(ai.by_persona.len(), 2);
    assert_eq!(ai.by_persona[0].persona, "editor");
    assert_eq!(ai.by_persona[0].count, 2);
    assert_eq!(ai.by_persona[1].persona, "muse");

    // 直近フィードは新しい順、長いプロンプトは省略される
    assert_eq!(ai.recent.len(), 3);
    assert_eq!(ai.recent[0].persona, "editor");
    assert_eq!(ai.recent[0].prompt_preview.chars().count(), 103);
    assert!(ai.recent[0].prompt_preview.ends_with("..."));
    assert_eq!(ai.recent[1].prompt_preview, "Give me three plot twists");

    // 日別トークンの合計は窓全体の合計と一致する
    assert_eq!(ai.total_tokens_used, 3000);
    let summed: i64 = ai.daily_token_usage.iter().map(|p| p.tokens).sum();
    assert_eq!(summed, ai.total_tokens_used);
    assert!((ai.estimated_cost - 0.006).abs() < 1e-9);

    // 日付昇順
    let dates: Vec<NaiveDate> = ai.daily_token_usage.iter().map(|p| p.date).collect();
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted);
}

#[tokio::test]
async fn test_collaboration_feed_resolves_names() {
    let owner_id = Uuid::new_v4();
    let project = project(owner_id);
    let project_id = project.id;
    let now = Utc::now();

    let alice = user("alice");
    let ghost_id = Uuid::new_v4();

    let source = FakeAnalyticsSource {
        project: Some(project),
        collaborators: vec![collaborator(project_id, alice.id)],
        activity_logs: vec![
            activity(project_id, alice.id, "document.updated", now),
            activity(
                project_id,
                ghost_id,
                "document.created",
                now - ChronoDuration::hours(1),
            ),
            // 7日より前のログはアクティブ判定に入らない
            activity(
                project_id,
                alice.id,
                "document.updated",
                now - ChronoDuration::days(10),
            ),
        ],
        users: vec![alice],
        ..Default::default()
    };

    let snapshot = service(source)
        .get_project_analytics(project_id, owner_id)
        .await
        .unwrap();

    let collaboration = &snapshot.collaboration;
    assert_eq!(collaboration.total_collaborators, 1);
    assert_eq!(collaboration.active_collaborators, 2);

    assert_eq!(collaboration.recent_activity.len(), 3);
    assert_eq!(collaboration.recent_activity[0].user_name, "alice");
    assert_eq!(collaboration.recent_activity[0].action, "document.updated");
    assert_eq!(collaboration.recent_activity[1].user_name, "Unknown User");
}

#[tokio::test]
async fn test_publishing_section_merged_from_scorers() {
    struct StubScorers;

    impl PublishingScorers for StubScorers {
        fn readiness(&self, input: &ReadinessInput) -> serde_json::Value {
            serde_json::json!({ "score": 40, "published": input.is_published })
        }

        fn attribution(&self, records: &[RevenueRecordInput]) -> serde_json::Value {
            serde_json::json!({ "record_count": records.len() })
        }
    }

    let owner_id = Uuid::new_v4();
    let project = project(owner_id);
    let project_id = project.id;

    let source = FakeAnalyticsSource {
        project: Some(project),
        revenue: vec![revenue_record_model::Model {
            id: Uuid::new_v4(),
            project_id,
            amount_cents: 1299,
            source: "kdp".to_string(),
            campaign: Some("launch".to_string()),
            transaction_date: Utc::now(),
            metadata: None,
            created_at: Utc::now(),
        }],
        ..Default::default()
    };

    let analytics = AnalyticsService::new(Arc::new(source), Duration::from_secs(5))
        .with_scorers(Arc::new(StubScorers));

    let snapshot = analytics
        .get_project_analytics(project_id, owner_id)
        .await
        .unwrap();

    let publishing = snapshot.publishing_promotion.expect("section present");
    assert_eq!(publishing.readiness["score"], 40);
    assert_eq!(publishing.readiness["published"], false);
    assert_eq!(publishing.promotion_attribution["record_count"], 1);
}

#[tokio::test]
async fn test_slow_store_hits_computation_deadline() {
    let owner_id = Uuid::new_v4();
    let project = project(owner_id);
    let project_id = project.id;

    let source = FakeAnalyticsSource {
        project: Some(project),
        session_fetch_delay: Some(Duration::from_millis(200)),
        ..Default::default()
    };

    let analytics = AnalyticsService::new(Arc::new(source), Duration::from_millis(10));
    let result = analytics.get_project_analytics(project_id, owner_id).await;

    assert!(matches!(result, Err(AppError::InternalServerError(_))));
}
