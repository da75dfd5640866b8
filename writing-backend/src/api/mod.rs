// writing-backend/src/api/mod.rs

use crate::config::AppConfig;
use crate::service::activity_log_service::ActivityLogService;
use crate::service::analytics_service::AnalyticsService;
use crate::service::writing_session_service::WritingSessionService;
use std::sync::Arc;

pub mod dto;
pub mod handlers;

/// 統一されたアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub analytics_service: Arc<AnalyticsService>,
    pub writing_session_service: Arc<WritingSessionService>,
    pub activity_log_service: Arc<ActivityLogService>,
    pub config: Arc<AppConfig>,
}
