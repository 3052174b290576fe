use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::{
        billboards::{BillboardList, CreateBillboardRequest, UpdateBillboardRequest},
        required_text,
    },
    entity::billboards::{ActiveModel, Column, Entity as Billboards, Model as BillboardModel},
    error::{AppError, AppResult},
    middleware::{
        auth::AuthUser,
        ownership::{ensure_catalog_read, ensure_store_owner},
    },
    models::Billboard,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_billboards(
    state: &AppState,
    viewer: Option<&AuthUser>,
    store_id: Uuid,
) -> AppResult<ApiResponse<BillboardList>> {
    ensure_catalog_read(state, viewer, store_id).await?;

    let items = Billboards::find()
        .filter(Column::StoreId.eq(store_id))
        .order_by_desc(Column::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(billboard_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Billboards",
        BillboardList { items },
        Some(Meta::empty()),
    ))
}

pub async fn get_billboard(
    state: &AppState,
    viewer: Option<&AuthUser>,
    store_id: Uuid,
    id: Uuid,
) -> AppResult<ApiResponse<Billboard>> {
    ensure_catalog_read(state, viewer, store_id).await?;

    let billboard = Billboards::find()
        .filter(Column::Id.eq(id))
        .filter(Column::StoreId.eq(store_id))
        .one(&state.orm)
        .await?;
    let billboard = match billboard {
        Some(b) => b,
        None => return Err(AppError::NotFound),
    };

    Ok(ApiResponse::success(
        "Billboard",
        billboard_from_entity(billboard),
        None,
    ))
}

pub async fn create_billboard(
    state: &AppState,
    user: &AuthUser,
    store_id: Uuid,
    payload: CreateBillboardRequest,
) -> AppResult<ApiResponse<Billboard>> {
    let label = required_text(payload.label, "Label")?;
    let image_url = required_text(payload.image_url, "Image URL")?;
    ensure_store_owner(&state.orm, user, store_id).await?;

    let billboard = ActiveModel {
        id: Set(Uuid::new_v4()),
        store_id: Set(store_id),
        label: Set(label),
        image_url: Set(image_url),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(&user.user_id),
        "billboard_create",
        Some("billboards"),
        Some(serde_json::json!({ "billboard_id": billboard.id, "store_id": store_id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Billboard created",
        billboard_from_entity(billboard),
        Some(Meta::empty()),
    ))
}

pub async fn update_billboard(
    state: &AppState,
    user: &AuthUser,
    store_id: Uuid,
    id: Uuid,
    payload: UpdateBillboardRequest,
) -> AppResult<ApiResponse<Billboard>> {
    let label = required_text(payload.label, "Label")?;
    let image_url = required_text(payload.image_url, "Image URL")?;
    ensure_store_owner(&state.orm, user, store_id).await?;

    let existing = Billboards::find()
        .filter(Column::Id.eq(id))
        .filter(Column::StoreId.eq(store_id))
        .one(&state.orm)
        .await?;
    let existing = match existing {
        Some(b) => b,
        None => return Err(AppError::NotFound),
    };

    let mut active: ActiveModel = existing.into();
    active.label = Set(label);
    active.image_url = Set(image_url);
    active.updated_at = Set(Utc::now().into());
    let billboard = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(&user.user_id),
        "billboard_update",
        Some("billboards"),
        Some(serde_json::json!({ "billboard_id": billboard.id, "store_id": store_id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Updated",
        billboard_from_entity(billboard),
        Some(Meta::empty()),
    ))
}

pub async fn delete_billboard(
    state: &AppState,
    user: &AuthUser,
    store_id: Uuid,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_store_owner(&state.orm, user, store_id).await?;

    let result = Billboards::delete_many()
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
        "billboard_delete",
        Some("billboards"),
        Some(serde_json::json!({ "billboard_id": id, "store_id": store_id })),
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

pub(crate) fn billboard_from_entity(model: BillboardModel) -> Billboard {
    Billboard {
        id: model.id,
        store_id: model.store_id,
        label: model.label,
        image_url: model.image_url,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
