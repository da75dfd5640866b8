// writing-backend/src/main.rs
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use writing_backend::api::handlers::analytics_handler::analytics_router;
use writing_backend::api::handlers::writing_handler::writing_router;
use writing_backend::api::AppState;
use writing_backend::config::Config;
use writing_backend::db::create_db_pool;
use writing_backend::logging::{inject_request_context, logging_middleware};
use writing_backend::middleware::auth::inject_dev_user;
use writing_backend::repository::analytics_source::SeaOrmAnalyticsSource;
use writing_backend::service::activity_log_service::ActivityLogService;
use writing_backend::service::analytics_service::AnalyticsService;
use writing_backend::service::writing_session_service::WritingSessionService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // トレーシングの設定
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "writing_backend=info,tower_http=info".into()),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("Starting Writing Backend server...");

    // 設定を読み込む
    let app_config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(environment = %app_config.environment, "Configuration loaded");

    // データベース接続を作成
    let db_pool = create_db_pool(&app_config)
        .await
        .expect("Failed to create database pool");
    tracing::info!("Database pool created successfully.");

    // サービスの組み立て
    let analytics_source = Arc::new(SeaOrmAnalyticsSource::new(db_pool.clone()));
    let analytics_service = Arc::new(AnalyticsService::new(
        analytics_source,
        Duration::from_secs(app_config.analytics.computation_timeout_secs),
    ));
    let writing_session_service = Arc::new(WritingSessionService::new(db_pool.clone()));
    let activity_log_service = Arc::new(ActivityLogService::new(db_pool.clone()));

    let is_development = app_config.is_development();
    let app_state = AppState {
        analytics_service,
        writing_session_service,
        activity_log_service,
        config: Arc::new(app_config.clone()),
    };

    // ルーターの設定
    let mut app_router = analytics_router(app_state.clone())
        .merge(writing_router(app_state.clone()))
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(CorsLayer::permissive())
        .layer(axum::middleware::from_fn(logging_middleware))
        .layer(axum::middleware::from_fn(inject_request_context));

    // 認証はゲートウェイ側で行われる前提。開発時のみヘッダーから受け付ける
    if is_development {
        app_router = app_router.layer(axum::middleware::from_fn(inject_dev_user));
    }

    // サーバーの起動
    let server_addr = app_config.server_addr();
    tracing::info!("Router configured. Server listening on {}", server_addr);

    let listener = TcpListener::bind(&server_addr).await?;
    axum::serve(listener, app_router.into_make_service()).await?;

    Ok(())
}
