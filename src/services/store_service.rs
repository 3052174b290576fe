use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::{
        required_text,
        stores::{CreateStoreRequest, StoreList, UpdateStoreRequest},
    },
    entity::stores::{ActiveModel, Column, Entity as Stores, Model as StoreModel},
    error::AppResult,
    middleware::{auth::AuthUser, ownership::ensure_store_owner},
    models::Store,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn create_store(
    state: &AppState,
    user: &AuthUser,
    payload: CreateStoreRequest,
) -> AppResult<ApiResponse<Store>> {
    let name = required_text(payload.name, "Name")?;

    let store = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        user_id: Set(user.user_id.clone()),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(&user.user_id),
        "store_create",
        Some("stores"),
        Some(serde_json::json!({ "store_id": store.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Store created",
        store_from_entity(store),
        Some(Meta::empty()),
    ))
}

pub async fn list_stores(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<StoreList>> {
    let items = Stores::find()
        .filter(Column::UserId.eq(user.user_id.as_str()))
        .order_by_desc(Column::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(store_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Stores",
        StoreList { items },
        Some(Meta::empty()),
    ))
}

pub async fn update_store(
    state: &AppState,
    user: &AuthUser,
    store_id: Uuid,
    payload: UpdateStoreRequest,
) -> AppResult<ApiResponse<Store>> {
    let name = required_text(payload.name, "Name")?;
    let existing = ensure_store_owner(&state.orm, user, store_id).await?;

    let mut active: ActiveModel = existing.into();
    active.name = Set(name);
    active.updated_at = Set(Utc::now().into());
    let store = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(&user.user_id),
        "store_update",
        Some("stores"),
        Some(serde_json::json!({ "store_id": store.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Updated",
        store_from_entity(store),
        Some(Meta::empty()),
    ))
}

pub async fn delete_store(
    state: &AppState,
    user: &AuthUser,
    store_id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    // Stores with remaining children are blocked by foreign keys; that
    // surfaces as a generic internal error rather than a validation message.
    let existing = ensure_store_owner(&state.orm, user, store_id).await?;
    Stores::delete_by_id(existing.id).exec(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(&user.user_id),
        "store_delete",
        Some("stores"),
        Some(serde_json::json!({ "store_id": store_id })),
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

pub(crate) fn store_from_entity(model: StoreModel) -> Store {
    Store {
        id: model.id,
        name: model.name,
        user_id: model.user_id,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
