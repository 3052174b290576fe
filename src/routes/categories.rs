use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, patch, post},
};
use uuid::Uuid;

use crate::{
    dto::categories::{CategoryList, CreateCategoryRequest, UpdateCategoryRequest},
    error::AppResult,
    middleware::auth::{AuthUser, MaybeAuthUser},
    models::Category,
    response::ApiResponse,
    services::category_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_category))
        .route("/", get(list_categories))
        .route("/{id}", get(get_category))
        .route("/{id}", patch(update_category))
        .route("/{id}", delete(delete_category))
}

#[utoipa::path(
    get,
    path = "/api/{store_id}/categories",
    params(("store_id" = Uuid, Path, description = "Store ID")),
    responses(
        (status = 200, description = "List categories", body = ApiResponse<CategoryList>),
    ),
    tag = "Categories"
)]
pub async fn list_categories(
    State(state): State<AppState>,
    MaybeAuthUser(viewer): MaybeAuthUser,
    Path(store_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<CategoryList>>> {
    let resp = category_service::list_categories(&state, viewer.as_ref(), store_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/{store_id}/categories/{id}",
    params(
        ("store_id" = Uuid, Path, description = "Store ID"),
        ("id" = Uuid, Path, description = "Category ID"),
    ),
    responses(
        (status = 200, description = "Get category", body = ApiResponse<Category>),
        (status = 404, description = "Category not found"),
    ),
    tag = "Categories"
)]
pub async fn get_category(
    State(state): State<AppState>,
    MaybeAuthUser(viewer): MaybeAuthUser,
    Path((store_id, id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<Category>>> {
    let resp = category_service::get_category(&state, viewer.as_ref(), store_id, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/{store_id}/categories",
    params(("store_id" = Uuid, Path, description = "Store ID")),
    request_body = CreateCategoryRequest,
    responses(
        (status = 200, description = "Create category", body = ApiResponse<Category>),
        (status = 400, description = "Missing required field"),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Caller does not own the store"),
    ),
    tag = "Categories"
)]
pub async fn create_category(
    State(state): State<AppState>,
    user: AuthUser,
    Path(store_id): Path<Uuid>,
    Json(payload): Json<CreateCategoryRequest>,
) -> AppResult<Json<ApiResponse<Category>>> {
    let resp = category_service::create_category(&state, &user, store_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/{store_id}/categories/{id}",
    params(
        ("store_id" = Uuid, Path, description = "Store ID"),
        ("id" = Uuid, Path, description = "Category ID"),
    ),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Updated category", body = ApiResponse<Category>),
        (status = 403, description = "Caller does not own the store"),
    ),
    tag = "Categories"
)]
pub async fn update_category(
    State(state): State<AppState>,
    user: AuthUser,
    Path((store_id, id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> AppResult<Json<ApiResponse<Category>>> {
    let resp = category_service::update_category(&state, &user, store_id, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/{store_id}/categories/{id}",
    params(
        ("store_id" = Uuid, Path, description = "Store ID"),
        ("id" = Uuid, Path, description = "Category ID"),
    ),
    responses(
        (status = 200, description = "Deleted category"),
        (status = 403, description = "Caller does not own the store"),
    ),
    tag = "Categories"
)]
pub async fn delete_category(
    State(state): State<AppState>,
    user: AuthUser,
    Path((store_id, id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = category_service::delete_category(&state, &user, store_id, id).await?;
    Ok(Json(resp))
}
