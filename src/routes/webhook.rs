use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
};

use crate::{
    error::{AppError, AppResult},
    services::webhook_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(stripe_webhook))
}

/// Signature verification reads the raw body, so this handler takes `Bytes`
/// rather than a typed JSON extractor.
#[utoipa::path(
    post,
    path = "/api/webhook",
    request_body(content = Vec<u8>, description = "Raw Stripe event payload"),
    responses(
        (status = 200, description = "Event accepted"),
        (status = 400, description = "Missing or invalid signature"),
    ),
    tag = "Webhook"
)]
pub async fn stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<StatusCode> {
    let signature = headers
        .get("Stripe-Signature")
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            AppError::WebhookVerification("Missing Stripe-Signature header".to_string())
        })?;

    let event = state.webhook.construct_event(&body, signature)?;
    webhook_service::reconcile_checkout(&state, event).await?;

    Ok(StatusCode::OK)
}
