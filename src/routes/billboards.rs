use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, patch, post},
};
use uuid::Uuid;

use crate::{
    dto::billboards::{BillboardList, CreateBillboardRequest, UpdateBillboardRequest},
    error::AppResult,
    middleware::auth::{AuthUser, MaybeAuthUser},
    models::Billboard,
    response::ApiResponse,
    services::billboard_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_billboard))
        .route("/", get(list_billboards))
        .route("/{id}", get(get_billboard))
        .route("/{id}", patch(update_billboard))
        .route("/{id}", delete(delete_billboard))
}

#[utoipa::path(
    get,
    path = "/api/{store_id}/billboards",
    params(("store_id" = Uuid, Path, description = "Store ID")),
    responses(
        (status = 200, description = "List billboards", body = ApiResponse<BillboardList>),
    ),
    tag = "Billboards"
)]
pub async fn list_billboards(
    State(state): State<AppState>,
    MaybeAuthUser(viewer): MaybeAuthUser,
    Path(store_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<BillboardList>>> {
    let resp = billboard_service::list_billboards(&state, viewer.as_ref(), store_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/{store_id}/billboards/{id}",
    params(
        ("store_id" = Uuid, Path, description = "Store ID"),
        ("id" = Uuid, Path, description = "Billboard ID"),
    ),
    responses(
        (status = 200, description = "Get billboard", body = ApiResponse<Billboard>),
        (status = 404, description = "Billboard not found"),
    ),
    tag = "Billboards"
)]
pub async fn get_billboard(
    State(state): State<AppState>,
    MaybeAuthUser(viewer): MaybeAuthUser,
    Path((store_id, id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<Billboard>>> {
    let resp = billboard_service::get_billboard(&state, viewer.as_ref(), store_id, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/{store_id}/billboards",
    params(("store_id" = Uuid, Path, description = "Store ID")),
    request_body = CreateBillboardRequest,
    responses(
        (status = 200, description = "Create billboard", body = ApiResponse<Billboard>),
        (status = 400, description = "Missing required field"),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Caller does not own the store"),
    ),
    tag = "Billboards"
)]
pub async fn create_billboard(
    State(state): State<AppState>,
    user: AuthUser,
    Path(store_id): Path<Uuid>,
    Json(payload): Json<CreateBillboardRequest>,
) -> AppResult<Json<ApiResponse<Billboard>>> {
    let resp = billboard_service::create_billboard(&state, &user, store_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/{store_id}/billboards/{id}",
    params(
        ("store_id" = Uuid, Path, description = "Store ID"),
        ("id" = Uuid, Path, description = "Billboard ID"),
    ),
    request_body = UpdateBillboardRequest,
    responses(
        (status = 200, description = "Updated billboard", body = ApiResponse<Billboard>),
        (status = 403, description = "Caller does not own the store"),
    ),
    tag = "Billboards"
)]
pub async fn update_billboard(
    State(state): State<AppState>,
    user: AuthUser,
    Path((store_id, id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateBillboardRequest>,
) -> AppResult<Json<ApiResponse<Billboard>>> {
    let resp = billboard_service::update_billboard(&state, &user, store_id, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/{store_id}/billboards/{id}",
    params(
        ("store_id" = Uuid, Path, description = "Store ID"),
        ("id" = Uuid, Path, description = "Billboard ID"),
    ),
    responses(
        (status = 200, description = "Deleted billboard"),
        (status = 403, description = "Caller does not own the store"),
    ),
    tag = "Billboards"
)]
pub async fn delete_billboard(
    State(state): State<AppState>,
    user: AuthUser,
    Path((store_id, id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = billboard_service::delete_billboard(&state, &user, store_id, id).await?;
    Ok(Json(resp))
}
