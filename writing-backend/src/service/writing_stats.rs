// writing-backend/src/service/writing_stats.rs

//! 執筆統計の純粋な計算部分。
//!
//! ストアから取得済みの行を入力に取り、日付・ストリーク・バケット計算だけを
//! 行う。日付境界はすべてUTCのカレンダー日（`DateTime<Utc>::date_naive`）。

use crate::api::dto::analytics_dto::{
    MonthlyStats, ProgressBucket, TokenUsagePoint, WeeklyStats, WritingStreak,
};
use crate::domain::{ai_generation_model, writing_session_model};
use chrono::{Datelike, Duration, Months, NaiveDate, Timelike};
use std::collections::{BTreeMap, BTreeSet};

/// トークン1000個あたりのコスト見積もり
pub const TOKEN_COST_PER_THOUSAND: f64 = 0.002;

/// 直近フィードのプロンプトプレビュー長（文字数）
pub const PROMPT_PREVIEW_CHARS: usize = 100;

/// 連続執筆日数を計算する。
///
/// 入力は執筆活動のあったカレンダー日付（重複・順不同可）。
/// current_streak は今日または昨日に活動があるチェーンのみ有効で、
/// 2日以上空くと0に戻る。
pub fn calculate_streaks(dates: &[NaiveDate], today: NaiveDate) -> WritingStreak {
    let unique: BTreeSet<NaiveDate> = dates.iter().copied().collect();
    let sorted: Vec<NaiveDate> = unique.into_iter().collect();

    if sorted.is_empty() {
        return WritingStreak::default();
    }

    // 隣接ペアを走査して最長の連続日数を求める
    let mut longest: u32 = 1;
    let mut run: u32 = 1;
    for pair in sorted.windows(2) {
        if (pair[1] - pair[0]).num_days() == 1 {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 1;
        }
    }

    let last_active = sorted[sorted.len() - 1];
    let gap = (today - last_active).num_days();

    // 最終活動日が一昨日以前ならストリークは途切れている
    let current = if gap > 1 {
        0
    } else {
        let mut count: u32 = 1;
        for i in (1..sorted.len()).rev() {
            if (sorted[i] - sorted[i - 1]).num_days() == 1 {
                count += 1;
            } else {
                break;
            }
        }
        count
    };

    WritingStreak {
        current_streak: current,
        longest_streak: longest,
        last_active_date: last_active.format("%Y-%m-%d").to_string(),
    }
}

/// ISO週の開始日（月曜日）
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// 月の開始日
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap()
}

/// 日次バケットの窓開始（今日を含む30日）
pub fn daily_window_start(today: NaiveDate) -> NaiveDate {
    today - Duration::days(29)
}

/// 週次バケットの窓開始（今週を含む12 ISO週）
pub fn weekly_window_start(today: NaiveDate) -> NaiveDate {
    week_start(today) - Duration::weeks(11)
}

/// 月次バケットの窓開始（今月を含む12ヶ月）
pub fn monthly_window_start(today: NaiveDate) -> NaiveDate {
    month_start(today).checked_sub_months(Months::new(11)).unwrap()
}

fn bucket_sessions<F>(
    sessions: &[writing_session_model::Model],
    window_start: NaiveDate,
    key: F,
) -> Vec<ProgressBucket>
where
    F: Fn(NaiveDate) -> NaiveDate,
{
    let mut buckets: BTreeMap<NaiveDate, (i64, u64)> = BTreeMap::new();

    for session in sessions {
        let date = session.created_at.date_naive();
        if date < window_start {
            continue;
        }
        let entry = buckets.entry(key(date)).or_insert((0, 0));
        entry.0 += session.words_written as i64;
        entry.1 += 1;
    }

    buckets
        .into_iter()
        .map(|(period_start, (words_written, session_count))| ProgressBucket {
            period_start,
            words_written,
            session_count,
        })
        .collect()
}

/// カレンダー日ごとの執筆量（昇順、活動のあった日のみ）
pub fn daily_buckets(
    sessions: &[writing_session_model::Model],
    today: NaiveDate,
) -> Vec<ProgressBucket> {
    bucket_sessions(sessions, daily_window_start(today), |d| d)
}

/// ISO週ごとの執筆量（昇順、活動のあった週のみ）
pub fn weekly_buckets(
    sessions: &[writing_session_model::Model],
    today: NaiveDate,
) -> Vec<ProgressBucket> {
    bucket_sessions(sessions, weekly_window_start(today), week_start)
}

/// 月ごとの執筆量（昇順、活動のあった月のみ）
pub fn monthly_buckets(
    sessions: &[writing_session_model::Model],
    today: NaiveDate,
) -> Vec<ProgressBucket> {
    bucket_sessions(sessions, monthly_window_start(today), month_start)
}

/// 直近7日間の統計。
///
/// average_daily の分母は常に7（活動が無かった日も含む固定窓）。
/// most_productive_day は語数最多の日の曜日名で、同数なら早い日付を採る。
pub fn weekly_stats(sessions: &[writing_session_model::Model], today: NaiveDate) -> WeeklyStats {
    let window_start = today - Duration::days(6);
    let mut per_day: BTreeMap<NaiveDate, i64> = BTreeMap::new();

    for session in sessions {
        let date = session.created_at.date_naive();
        if date < window_start || date > today {
            continue;
        }
        *per_day.entry(date).or_insert(0) += session.words_written as i64;
    }

    let total_words: i64 = per_day.values().sum();

    let mut best: Option<(NaiveDate, i64)> = None;
    for (&date, &words) in &per_day {
        match best {
            Some((_, best_words)) if words <= best_words => {}
            _ => best = Some((date, words)),
        }
    }

    WeeklyStats {
        total_words,
        average_daily: total_words as f64 / 7.0,
        most_productive_day: best.map(|(date, _)| date.format("%A").to_string()),
    }
}

/// 直近31日間の統計。分母は固定で31。
pub fn monthly_stats(sessions: &[writing_session_model::Model], today: NaiveDate) -> MonthlyStats {
    let window_start = today - Duration::days(30);
    let total_words: i64 = sessions
        .iter()
        .filter(|s| {
            let date = s.created_at.date_naive();
            date >= window_start && date <= today
        })
        .map(|s| s.words_written as i64)
        .sum();

    MonthlyStats {
        total_words,
        average_daily: total_words as f64 / 31.0,
    }
}

/// 直近30日のトークン消費を日別に集計する（日付昇順）。
///
/// 戻り値は (日別ポイント, 窓全体のトークン合計, コスト見積もり)。
/// metadataにトークン数が無い生成は0トークンとして数える。
pub fn token_usage_series(
    generations: &[ai_generation_model::Model],
    today: NaiveDate,
) -> (Vec<TokenUsagePoint>, i64, f64) {
    let window_start = today - Duration::days(29);
    let mut per_day: BTreeMap<NaiveDate, i64> = BTreeMap::new();

    for generation in generations {
        let date = generation.created_at.date_naive();
        if date < window_start {
            continue;
        }
        *per_day.entry(date).or_insert(0) += generation.total_tokens();
    }

    let total_tokens: i64 = per_day.values().sum();
    let points = per_day
        .into_iter()
        .map(|(date, tokens)| TokenUsagePoint {
            date,
            tokens,
            cost: tokens as f64 / 1000.0 * TOKEN_COST_PER_THOUSAND,
        })
        .collect();

    let estimated_cost = total_tokens as f64 / 1000.0 * TOKEN_COST_PER_THOUSAND;
    (points, total_tokens, estimated_cost)
}

/// セッション平均時間（分）。セッションが無ければ0。
pub fn average_session_duration(sessions: &[writing_session_model::Model]) -> f64 {
    if sessions.is_empty() {
        return 0.0;
    }
    let total: i64 = sessions.iter().map(|s| s.duration_minutes as i64).sum();
    total as f64 / sessions.len() as f64
}

/// 総執筆時間（分）
pub fn total_writing_time(sessions: &[writing_session_model::Model]) -> i64 {
    sessions.iter().map(|s| s.duration_minutes as i64).sum()
}

/// セッション開始が最も多い時間帯（0-23）。同数なら早い時間帯を採る。
pub fn most_productive_hour(sessions: &[writing_session_model::Model]) -> Option<u32> {
    let mut per_hour: BTreeMap<u32, u64> = BTreeMap::new();
    for session in sessions {
        *per_hour.entry(session.start_time.hour()).or_insert(0) += 1;
    }

    let mut best: Option<(u32, u64)> = None;
    for (&hour, &count) in &per_hour {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((hour, count)),
        }
    }
    best.map(|(hour, _)| hour)
}

/// 直近30日のうち執筆セッションがあった日の割合（0-100に丸め）
pub fn consistency_score(sessions: &[writing_session_model::Model], today: NaiveDate) -> i32 {
    let window_start = today - Duration::days(29);
    let active_days: BTreeSet<NaiveDate> = sessions
        .iter()
        .map(|s| s.created_at.date_naive())
        .filter(|d| *d >= window_start && *d <= today)
        .collect();

    (100.0 * active_days.len() as f64 / 30.0).round() as i32
}

/// 直近フィード用のプロンプトプレビュー。100文字を超える場合のみ省略記号を付ける。
pub fn prompt_preview(prompt: &str) -> String {
    let mut preview: String = prompt.chars().take(PROMPT_PREVIEW_CHARS).collect();
    if prompt.chars().count() > PROMPT_PREVIEW_CHARS {
        preview.push_str("...");
    }
    preview
}
