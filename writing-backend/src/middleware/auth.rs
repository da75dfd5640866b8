// writing-backend/src/middleware/auth.rs

//! 認証済みユーザーの取り出し。
//!
//! 認証そのものはプラットフォームのゲートウェイ側ミドルウェアが行い、
//! このクレートはリクエスト拡張に挿入された [`AuthenticatedUser`] を読む
//! だけ。開発環境向けに `X-User-Id` ヘッダーから挿入する簡易ミドルウェアを
//! 用意している。

use crate::error::AppError;
use axum::{
    body::Body,
    extract::FromRequestParts,
    http::{request::Parts, Request},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// 認証済みユーザー情報を格納するエクステンション
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

impl AuthenticatedUser {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }
}

/// 開発環境専用: `X-User-Id` ヘッダーからユーザーを挿入する
pub async fn inject_dev_user(mut req: Request<Body>, next: Next) -> Response {
    if req.extensions().get::<AuthenticatedUser>().is_none() {
        let user_id = req
            .headers()
            .get("x-user-id")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Uuid::parse_str(value).ok());

        if let Some(user_id) = user_id {
            req.extensions_mut().insert(AuthenticatedUser::new(user_id));
        }
    }

    next.run(req).await
}
