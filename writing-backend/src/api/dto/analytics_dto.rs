// writing-backend/src/api/dto/analytics_dto.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// プロジェクト単位のエンティティ集計
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectOverview {
    pub total_documents: u64,
    pub total_words: i64,
    pub total_characters: u64,
    pub total_worldbuilding_entries: u64,
    pub total_timeline_events: u64,
    pub total_ai_generations: u64,
}

/// 連続執筆日数
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WritingStreak {
    pub current_streak: u32,
    pub longest_streak: u32,
    /// 最後に執筆活動があった日（ISO日付、活動が無ければ空文字）
    pub last_active_date: String,
}

/// 期間バケット（日・週・月）ごとの執筆量
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgressBucket {
    pub period_start: NaiveDate,
    pub words_written: i64,
    pub session_count: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeeklyStats {
    pub total_words: i64,
    pub average_daily: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_productive_day: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonthlyStats {
    pub total_words: i64,
    pub average_daily: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WritingProgress {
    pub daily: Vec<ProgressBucket>,
    pub weekly: Vec<ProgressBucket>,
    pub monthly: Vec<ProgressBucket>,
    pub weekly_stats: WeeklyStats,
    pub monthly_stats: MonthlyStats,
    pub streak: WritingStreak,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersonaUsage {
    pub persona: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentGeneration {
    pub id: Uuid,
    pub persona: String,
    pub prompt_preview: String,
    pub created_at: DateTime<Utc>,
}

/// 1日分のトークン消費とコスト見積もり
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenUsagePoint {
    pub date: NaiveDate,
    pub tokens: i64,
    pub cost: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiUsageStats {
    pub total_generations: u64,
    pub by_persona: Vec<PersonaUsage>,
    pub recent: Vec<RecentGeneration>,
    /// 直近30日のトークン消費（日付昇順）
    pub daily_token_usage: Vec<TokenUsagePoint>,
    pub total_tokens_used: i64,
    pub estimated_cost: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityFeedEntry {
    pub user_name: String,
    pub action: String,
    pub entity_type: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollaborationStats {
    pub total_collaborators: u64,
    pub active_collaborators: u64,
    pub recent_activity: Vec<ActivityFeedEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductivityStats {
    /// セッション平均時間（分）
    pub average_session_duration: f64,
    /// 総執筆時間（分）
    pub total_writing_time: i64,
    /// 最もセッション開始が多い時間帯（0-23）。セッションが無ければNone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_productive_hour: Option<u32>,
    /// 直近30日のうち執筆セッションがあった日の割合（0-100）
    pub consistency_score: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishingPromotion {
    pub readiness: serde_json::Value,
    pub promotion_attribution: serde_json::Value,
}

/// アナリティクススナップショット（1回の計算の結果全体）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectAnalyticsResponse {
    pub project_id: Uuid,
    pub overview: ProjectOverview,
    pub writing_progress: WritingProgress,
    pub ai_usage: AiUsageStats,
    pub collaboration: CollaborationStats,
    pub productivity: ProductivityStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publishing_promotion: Option<PublishingPromotion>,
    pub generated_at: DateTime<Utc>,
}
