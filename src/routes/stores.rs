use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, patch, post},
};
use uuid::Uuid;

use crate::{
    dto::stores::{CreateStoreRequest, StoreList, UpdateStoreRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Store,
    response::ApiResponse,
    services::store_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_store))
        .route("/", get(list_stores))
        .route("/{store_id}", patch(update_store))
        .route("/{store_id}", delete(delete_store))
}

#[utoipa::path(
    post,
    path = "/api/stores",
    request_body = CreateStoreRequest,
    responses(
        (status = 200, description = "Create store", body = ApiResponse<Store>),
        (status = 400, description = "Name is required"),
        (status = 401, description = "Unauthenticated"),
    ),
    tag = "Stores"
)]
pub async fn create_store(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateStoreRequest>,
) -> AppResult<Json<ApiResponse<Store>>> {
    let resp = store_service::create_store(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/stores",
    responses(
        (status = 200, description = "Stores owned by the caller", body = ApiResponse<StoreList>),
        (status = 401, description = "Unauthenticated"),
    ),
    tag = "Stores"
)]
pub async fn list_stores(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<StoreList>>> {
    let resp = store_service::list_stores(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/stores/{store_id}",
    params(("store_id" = Uuid, Path, description = "Store ID")),
    request_body = UpdateStoreRequest,
    responses(
        (status = 200, description = "Updated store", body = ApiResponse<Store>),
        (status = 403, description = "Caller does not own the store"),
    ),
    tag = "Stores"
)]
pub async fn update_store(
    State(state): State<AppState>,
    user: AuthUser,
    Path(store_id): Path<Uuid>,
    Json(payload): Json<UpdateStoreRequest>,
) -> AppResult<Json<ApiResponse<Store>>> {
    let resp = store_service::update_store(&state, &user, store_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/stores/{store_id}",
    params(("store_id" = Uuid, Path, description = "Store ID")),
    responses(
        (status = 200, description = "Deleted store"),
        (status = 403, description = "Caller does not own the store"),
    ),
    tag = "Stores"
)]
pub async fn delete_store(
    State(state): State<AppState>,
    user: AuthUser,
    Path(store_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = store_service::delete_store(&state, &user, store_id).await?;
    Ok(Json(resp))
}
