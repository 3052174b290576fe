use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::{
        required_text,
        sizes::{CreateSizeRequest, SizeList, UpdateSizeRequest},
    },
    entity::sizes::{ActiveModel, Column, Entity as Sizes, Model as SizeModel},
    error::{AppError, AppResult},
    middleware::{
        auth::AuthUser,
        ownership::{ensure_catalog_read, ensure_store_owner},
    },
    models::Size,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_sizes(
    state: &AppState,
    viewer: Option<&AuthUser>,
    store_id: Uuid,
) -> AppResult<ApiResponse<SizeList>> {
    ensure_catalog_read(state, viewer, store_id).await?;

    let items = Sizes::find()
        .filter(Column::StoreId.eq(store_id))
        .order_by_desc(Column::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(size_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Sizes",
        SizeList { items },
        Some(Meta::empty()),
    ))
}

pub async fn get_size(
    state: &AppState,
    viewer: Option<&AuthUser>,
    store_id: Uuid,
    id: Uuid,
) -> AppResult<ApiResponse<Size>> {
    ensure_catalog_read(state, viewer, store_id).await?;

    let size = Sizes::find()
        .filter(Column::Id.eq(id))
        .filter(Column::StoreId.eq(store_id))
        .one(&state.orm)
        .await?;
    let size = match size {
        Some(s) => s,
        None => return Err(AppError::NotFound),
    };

    Ok(ApiResponse::success("Size", size_from_entity(size), None))
}

pub async fn create_size(
    state: &AppState,
    user: &AuthUser,
    store_id: Uuid,
    payload: CreateSizeRequest,
) -> AppResult<ApiResponse<Size>> {
    let name = required_text(payload.name, "Name")?;
    let value = required_text(payload.value, "Value")?;
    ensure_store_owner(&state.orm, user, store_id).await?;

    let size = ActiveModel {
        id: Set(Uuid::new_v4()),
        store_id: Set(store_id),
        name: Set(name),
        value: Set(value),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(&user.user_id),
        "size_create",
        Some("sizes"),
        Some(serde_json::json!({ "size_id": size.id, "store_id": store_id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Size created",
        size_from_entity(size),
        Some(Meta::empty()),
    ))
}

pub async fn update_size(
    state: &AppState,
    user: &AuthUser,
    store_id: Uuid,
    id: Uuid,
    payload: UpdateSizeRequest,
) -> AppResult<ApiResponse<Size>> {
    let name = required_text(payload.name, "Name")?;
    let value = required_text(payload.value, "Value")?;
    ensure_store_owner(&state.orm, user, store_id).await?;

    let existing = Sizes::find()
        .filter(Column::Id.eq(id))
        .filter(Column::StoreId.eq(store_id))
        .one(&state.orm)
        .await?;
    let existing = match existing {
        Some(s) => s,
        None => return Err(AppError::NotFound),
    };

    let mut active: ActiveModel = existing.into();
    active.name = Set(name);
    active.value = Set(value);
    active.updated_at = Set(Utc::now().into());
    let size = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(&user.user_id),
        "size_update",
        Some("sizes"),
        Some(serde_json::json!({ "size_id": size.id, "store_id": store_id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Updated",
        size_from_entity(size),
        Some(Meta::empty()),
    ))
}

pub async fn delete_size(
    state: &AppState,
    user: &AuthUser,
    store_id: Uuid,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_store_owner(&state.orm, user, store_id).await?;

    let result = Sizes::delete_many()
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
        "size_delete",
        Some("sizes"),
        Some(serde_json::json!({ "size_id": id, "store_id": store_id })),
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

fn size_from_entity(model: SizeModel) -> Size {
    Size {
        id: model.id,
        store_id: model.store_id,
        name: model.name,
        value: model.value,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
