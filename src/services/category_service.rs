use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::{
        categories::{CategoryList, CreateCategoryRequest, UpdateCategoryRequest},
        required, required_text,
    },
    entity::categories::{ActiveModel, Column, Entity as Categories, Model as CategoryModel},
    error::{AppError, AppResult},
    middleware::{
        auth::AuthUser,
        ownership::{ensure_catalog_read, ensure_store_owner},
    },
    models::Category,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_categories(
    state: &AppState,
    viewer: Option<&AuthUser>,
    store_id: Uuid,
) -> AppResult<ApiResponse<CategoryList>> {
    ensure_catalog_read(state, viewer, store_id).await?;

    let items = Categories::find()
        .filter(Column::StoreId.eq(store_id))
        .order_by_desc(Column::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(category_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Categories",
        CategoryList { items },
        Some(Meta::empty()),
    ))
}

pub async fn get_category(
    state: &AppState,
    viewer: Option<&AuthUser>,
    store_id: Uuid,
    id: Uuid,
) -> AppResult<ApiResponse<Category>> {
    ensure_catalog_read(state, viewer, store_id).await?;

    let category = Categories::find()
        .filter(Column::Id.eq(id))
        .filter(Column::StoreId.eq(store_id))
        .one(&state.orm)
        .await?;
    let category = match category {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };

    Ok(ApiResponse::success(
        "Category",
        category_from_entity(category),
        None,
    ))
}

pub async fn create_category(
    state: &AppState,
    user: &AuthUser,
    store_id: Uuid,
    payload: CreateCategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    let name = required_text(payload.name, "Name")?;
    let billboard_id = required(payload.billboard_id, "Billboard Id")?;
    ensure_store_owner(&state.orm, user, store_id).await?;

    let category = ActiveModel {
        id: Set(Uuid::new_v4()),
        store_id: Set(store_id),
        billboard_id: Set(billboard_id),
        name: Set(name),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(&user.user_id),
        "category_create",
        Some("categories"),
        Some(serde_json::json!({ "category_id": category.id, "store_id": store_id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Category created",
        category_from_entity(category),
        Some(Meta::empty()),
    ))
}

pub async fn update_category(
    state: &AppState,
    user: &AuthUser,
    store_id: Uuid,
    id: Uuid,
    payload: UpdateCategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    let name = required_text(payload.name, "Name")?;
    let billboard_id = required(payload.billboard_id, "Billboard Id")?;
    ensure_store_owner(&state.orm, user, store_id).await?;

    let existing = Categories::find()
        .filter(Column::Id.eq(id))
        .filter(Column::StoreId.eq(store_id))
        .one(&state.orm)
        .await?;
    let existing = match existing {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };

    let mut active: ActiveModel = existing.into();
    active.name = Set(name);
    active.billboard_id = Set(billboard_id);
    active.updated_at = Set(Utc::now().into());
    let category = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(&user.user_id),
        "category_update",
        Some("categories"),
        Some(serde_json::json!({ "category_id": category.id, "store_id": store_id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Updated",
        category_from_entity(category),
        Some(Meta::empty()),
    ))
}

pub async fn delete_category(
    state: &AppState,
    user: &AuthUser,
    store_id: Uuid,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_store_owner(&state.orm, user, store_id).await?;

    let result = Categories::delete_many()
        .filter(Column::Id.eq(id))
        .filter(Column::StoreId.eq(store_id))
        .exec(&state.orm)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    if let Err(err) = log_audit(
        &state.pool,
        Some(&user.user_id),
        "category_delete",
        Some("categories"),
        Some(serde_json::json!({ "category_id": id, "store_id": store_id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

fn category_from_entity(model: CategoryModel) -> Category {
    Category {
        id: model.id,
        store_id: model.store_id,
        billboard_id: model.billboard_id,
        name: model.name,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
