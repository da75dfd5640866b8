// writing-backend/src/service/publishing.rs

//! 出版準備度・プロモーション帰属スコアラーの接続点。
//!
//! スコアラー本体はKDP出版・収益インジェスト側の機能で、ここでは正規化済みの
//! 入力を渡して不透明なJSONを受け取るだけ。スナップショットにはそのまま
//! マージされる。

use crate::domain::{project_model, revenue_record_model};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 出版準備度スコアラーへの正規化入力
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessInput {
    pub word_count_current: i32,
    pub word_count_target: i32,
    pub is_published: bool,
    pub has_cover: bool,
    pub has_active_blurb: bool,
    pub kdp_keyword_count: usize,
    pub kdp_category_count: usize,
    pub has_list_price: bool,
    pub has_launch_date: bool,
}

impl ReadinessInput {
    pub fn from_project(project: &project_model::Model) -> Self {
        Self {
            word_count_current: project.word_count_current,
            word_count_target: project.word_count_target,
            is_published: project.is_published(),
            has_cover: project.cover_asset_id.is_some(),
            has_active_blurb: project
                .active_blurb
                .as_deref()
                .is_some_and(|b| !b.trim().is_empty()),
            kdp_keyword_count: json_array_len(project.kdp_keywords.as_ref()),
            kdp_category_count: json_array_len(project.kdp_categories.as_ref()),
            has_list_price: project.list_price_cents.is_some(),
            has_launch_date: project.launch_date.is_some(),
        }
    }
}

// パイプラインが配列以外を書き込んでいても0として扱う
fn json_array_len(value: Option<&serde_json::Value>) -> usize {
    value.and_then(|v| v.as_array()).map_or(0, |a| a.len())
}

/// プロモーション帰属スコアラーへの正規化入力
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueRecordInput {
    pub amount_cents: i64,
    pub source: String,
    pub campaign: Option<String>,
    pub transaction_date: DateTime<Utc>,
    pub metadata: Option<serde_json::Value>,
}

impl From<revenue_record_model::Model> for RevenueRecordInput {
    fn from(record: revenue_record_model::Model) -> Self {
        Self {
            amount_cents: record.amount_cents,
            source: record.source,
            campaign: record.campaign,
            transaction_date: record.transaction_date,
            metadata: record.metadata,
        }
    }
}

/// 外部スコアラー。どちらも正規化入力に対する純粋関数。
pub trait PublishingScorers: Send + Sync {
    fn readiness(&self, input: &ReadinessInput) -> serde_json::Value;
    fn attribution(&self, records: &[RevenueRecordInput]) -> serde_json::Value;
}
