use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{delete, get, patch, post},
};
use uuid::Uuid;

use crate::{
    dto::products::{CreateProductRequest, ProductList, ProductWithImages, UpdateProductRequest},
    error::AppResult,
    middleware::auth::{AuthUser, MaybeAuthUser},
    response::ApiResponse,
    routes::params::ProductQuery,
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_product))
        .route("/", get(list_products))
        .route("/{id}", get(get_product))
        .route("/{id}", patch(update_product))
        .route("/{id}", delete(delete_product))
}

#[utoipa::path(
    get,
    path = "/api/{store_id}/products",
    params(
        ("store_id" = Uuid, Path, description = "Store ID"),
        ("page" = Option<i64>, Query, description = "Page number"),
        ("per_page" = Option<i64>, Query, description = "Page size"),
        ("category_id" = Option<Uuid>, Query, description = "Filter by category"),
        ("size_id" = Option<Uuid>, Query, description = "Filter by size"),
        ("color_id" = Option<Uuid>, Query, description = "Filter by color"),
        ("is_featured" = Option<bool>, Query, description = "Featured products only"),
    ),
    responses(
        (status = 200, description = "List products", body = ApiResponse<ProductList>),
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    MaybeAuthUser(viewer): MaybeAuthUser,
    Path(store_id): Path<Uuid>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = product_service::list_products(&state, viewer.as_ref(), store_id, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/{store_id}/products/{id}",
    params(
        ("store_id" = Uuid, Path, description = "Store ID"),
        ("id" = Uuid, Path, description = "Product ID"),
    ),
    responses(
        (status = 200, description = "Get product", body = ApiResponse<ProductWithImages>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    MaybeAuthUser(viewer): MaybeAuthUser,
    Path((store_id, id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<ProductWithImages>>> {
    let resp = product_service::get_product(&state, viewer.as_ref(), store_id, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/{store_id}/products",
    params(("store_id" = Uuid, Path, description = "Store ID")),
    request_body = CreateProductRequest,
    responses(
        (status = 200, description = "Create product", body = ApiResponse<ProductWithImages>),
        (status = 400, description = "Missing required field"),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Caller does not own the store"),
    ),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(store_id): Path<Uuid>,
    Json(payload): Json<CreateProductRequest>,
) -> AppResult<Json<ApiResponse<ProductWithImages>>> {
    let resp = product_service::create_product(&state, &user, store_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/{store_id}/products/{id}",
    params(
        ("store_id" = Uuid, Path, description = "Store ID"),
        ("id" = Uuid, Path, description = "Product ID"),
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Updated product", body = ApiResponse<ProductWithImages>),
        (status = 403, description = "Caller does not own the store"),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path((store_id, id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateProductRequest>,
) -> AppResult<Json<ApiResponse<ProductWithImages>>> {
    let resp = product_service::update_product(&state, &user, store_id, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/{store_id}/products/{id}",
    params(
        ("store_id" = Uuid, Path, description = "Store ID"),
        ("id" = Uuid, Path, description = "Product ID"),
    ),
    responses(
        (status = 200, description = "Deleted product"),
        (status = 403, description = "Caller does not own the store"),
    ),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path((store_id, id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = product_service::delete_product(&state, &user, store_id, id).await?;
    Ok(Json(resp))
}
