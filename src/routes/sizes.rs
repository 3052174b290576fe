use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, patch, post},
};
use uuid::Uuid;

use crate::{
    dto::sizes::{CreateSizeRequest, SizeList, UpdateSizeRequest},
    error::AppResult,
    middleware::auth::{AuthUser, MaybeAuthUser},
    models::Size,
    response::ApiResponse,
    services::size_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_size))
        .route("/", get(list_sizes))
        .route("/{id}", get(get_size))
        .route("/{id}", patch(update_size))
        .route("/{id}", delete(delete_size))
}

#[utoipa::path(
    get,
    path = "/api/{store_id}/sizes",
    params(("store_id" = Uuid, Path, description = "Store ID")),
    responses(
        (status = 200, description = "List sizes", body = ApiResponse<SizeList>),
    ),
    tag = "Sizes"
)]
pub async fn list_sizes(
    State(state): State<AppState>,
    MaybeAuthUser(viewer): MaybeAuthUser,
    Path(store_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<SizeList>>> {
    let resp = size_service::list_sizes(&state, viewer.as_ref(), store_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/{store_id}/sizes/{id}",
    params(
        ("store_id" = Uuid, Path, description = "Store ID"),
        ("id" = Uuid, Path, description = "Size ID"),
    ),
    responses(
        (status = 200, description = "Get size", body = ApiResponse<Size>),
        (status = 404, description = "Size not found"),
    ),
    tag = "Sizes"
)]
pub async fn get_size(
    State(state): State<AppState>,
    MaybeAuthUser(viewer): MaybeAuthUser,
    Path((store_id, id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<Size>>> {
    let resp = size_service::get_size(&state, viewer.as_ref(), store_id, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/{store_id}/sizes",
    params(("store_id" = Uuid, Path, description = "Store ID")),
    request_body = CreateSizeRequest,
    responses(
        (status = 200, description = "Create size", body = ApiResponse<Size>),
        (status = 400, description = "Missing required field"),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Caller does not own the store"),
    ),
    tag = "Sizes"
)]
pub async fn create_size(
    State(state): State<AppState>,
    user: AuthUser,
    Path(store_id): Path<Uuid>,
    Json(payload): Json<CreateSizeRequest>,
) -> AppResult<Json<ApiResponse<Size>>> {
    let resp = size_service::create_size(&state, &user, store_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/{store_id}/sizes/{id}",
    params(
        ("store_id" = Uuid, Path, description = "Store ID"),
        ("id" = Uuid, Path, description = "Size ID"),
    ),
    request_body = UpdateSizeRequest,
    responses(
        (status = 200, description = "Updated size", body = ApiResponse<Size>),
        (status = 403, description = "Caller does not own the store"),
    ),
    tag = "Sizes"
)]
pub async fn update_size(
    State(state): State<AppState>,
    user: AuthUser,
    Path((store_id, id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateSizeRequest>,
) -> AppResult<Json<ApiResponse<Size>>> {
    let resp = size_service::update_size(&state, &user, store_id, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/{store_id}/sizes/{id}",
    params(
        ("store_id" = Uuid, Path, description = "Store ID"),
        ("id" = Uuid, Path, description = "Size ID"),
    ),
    responses(
        (status = 200, description = "Deleted size"),
        (status = 403, description = "Caller does not own the store"),
    ),
    tag = "Sizes"
)]
pub async fn delete_size(
    State(state): State<AppState>,
    user: AuthUser,
    Path((store_id, id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = size_service::delete_size(&state, &user, store_id, id).await?;
    Ok(Json(resp))
}
