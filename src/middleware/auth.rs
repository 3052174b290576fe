use axum::{
    extract::{FromRef, FromRequestParts},
    http::header,
};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::{config::AppConfig, error::AppError};

/// Claims issued by the external identity provider. `sub` is an opaque
/// user identifier (e.g. `user_2abc...`), never parsed further.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
}

/// The verification key comes from the injected [`AppConfig`], loaded once
/// at startup; the extractor never touches the process environment.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppConfig: FromRef<S>,
{
    type Rejection = AppError;
    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(AppError::Unauthenticated)?;

        let auth_str = auth_header.to_str().map_err(|_| AppError::Unauthenticated)?;

        if !auth_str.starts_with("Bearer ") {
            return Err(AppError::Unauthenticated);
        }
        let token = auth_str.trim_start_matches("Bearer ").trim();

        let config = AppConfig::from_ref(state);

        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AppError::Unauthenticated)?;

        if decoded.claims.sub.is_empty() {
            return Err(AppError::Unauthenticated);
        }

        Ok(AuthUser {
            user_id: decoded.claims.sub,
        })
    }
}

/// Anonymous-tolerant variant for read endpoints whose gating depends on
/// configuration. An absent or invalid token extracts as `None` instead of
/// rejecting the request.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    S: Send + Sync,
    AppConfig: FromRef<S>,
{
    type Rejection = AppError;
    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        match AuthUser::from_request_parts(parts, state).await {
            Ok(user) => Ok(MaybeAuthUser(Some(user))),
            Err(_) => Ok(MaybeAuthUser(None)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn test_config() -> AppConfig {
        AppConfig {
            database_url: "postgres://unused".into(),
            host: "127.0.0.1".into(),
            port: 0,
            jwt_secret: "test-secret".into(),
            stripe_webhook_secret: "whsec_test".into(),
            public_catalog_reads: true,
        }
    }

    #[tokio::test]
    async fn missing_authorization_header_is_unauthenticated() {
        let request = Request::builder().uri("/").body(()).unwrap();
        let (mut parts, _) = request.into_parts();

        let result = AuthUser::from_request_parts(&mut parts, &test_config()).await;
        assert!(matches!(result, Err(AppError::Unauthenticated)));
    }

    #[tokio::test]
    async fn garbage_bearer_token_extracts_as_anonymous() {
        let request = Request::builder()
            .uri("/")
            .header(header::AUTHORIZATION, "Bearer not-a-jwt")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();

        let result = MaybeAuthUser::from_request_parts(&mut parts, &test_config()).await;
        assert!(matches!(result, Ok(MaybeAuthUser(None))));
    }
}
