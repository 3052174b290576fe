use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, patch, post},
};
use uuid::Uuid;

use crate::{
    dto::colors::{ColorList, CreateColorRequest, UpdateColorRequest},
    error::AppResult,
    middleware::auth::{AuthUser, MaybeAuthUser},
    models::Color,
    response::ApiResponse,
    services::color_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_color))
        .route("/", get(list_colors))
        .route("/{id}", get(get_color))
        .route("/{id}", patch(update_color))
        .route("/{id}", delete(delete_color))
}

#[utoipa::path(
    get,
    path = "/api/{store_id}/colors",
    params(("store_id" = Uuid, Path, description = "Store ID")),
    responses(
        (status = 200, description = "List colors", body = ApiResponse<ColorList>),
    ),
    tag = "Colors"
)]
pub async fn list_colors(
    State(state): State<AppState>,
    MaybeAuthUser(viewer): MaybeAuthUser,
    Path(store_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ColorList>>> {
    let resp = color_service::list_colors(&state, viewer.as_ref(), store_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/{store_id}/colors/{id}",
    params(
        ("store_id" = Uuid, Path, description = "Store ID"),
        ("id" = Uuid, Path, description = "Color ID"),
    ),
    responses(
        (status = 200, description = "Get color", body = ApiResponse<Color>),
        (status = 404, description = "Color not found"),
    ),
    tag = "Colors"
)]
pub async fn get_color(
    State(state): State<AppState>,
    MaybeAuthUser(viewer): MaybeAuthUser,
    Path((store_id, id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<Color>>> {
    let resp = color_service::get_color(&state, viewer.as_ref(), store_id, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/{store_id}/colors",
    params(("store_id" = Uuid, Path, description = "Store ID")),
    request_body = CreateColorRequest,
    responses(
        (status = 200, description = "Create color", body = ApiResponse<Color>),
        (status = 400, description = "Missing required field"),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Caller does not own the store"),
    ),
    tag = "Colors"
)]
pub async fn create_color(
    State(state): State<AppState>,
    user: AuthUser,
    Path(store_id): Path<Uuid>,
    Json(payload): Json<CreateColorRequest>,
) -> AppResult<Json<ApiResponse<Color>>> {
    let resp = color_service::create_color(&state, &user, store_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/{store_id}/colors/{id}",
    params(
        ("store_id" = Uuid, Path, description = "Store ID"),
        ("id" = Uuid, Path, description = "Color ID"),
    ),
    request_body = UpdateColorRequest,
    responses(
        (status = 200, description = "Updated color", body = ApiResponse<Color>),
        (status = 403, description = "Caller does not own the store"),
    ),
    tag = "Colors"
)]
pub async fn update_color(
    State(state): State<AppState>,
    user: AuthUser,
    Path((store_id, id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateColorRequest>,
) -> AppResult<Json<ApiResponse<Color>>> {
    let resp = color_service::update_color(&state, &user, store_id, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/{store_id}/colors/{id}",
    params(
        ("store_id" = Uuid, Path, description = "Store ID"),
        ("id" = Uuid, Path, description = "Color ID"),
    ),
    responses(
        (status = 200, description = "Deleted color"),
        (status = 403, description = "Caller does not own the store"),
    ),
    tag = "Colors"
)]
pub async fn delete_color(
    State(state): State<AppState>,
    user: AuthUser,
    Path((store_id, id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = color_service::delete_color(&state, &user, store_id, id).await?;
    Ok(Json(resp))
}
