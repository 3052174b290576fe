use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::{
        colors::{ColorList, CreateColorRequest, UpdateColorRequest},
        required_text,
    },
    entity::colors::{ActiveModel, Column, Entity as Colors, Model as ColorModel},
    error::{AppError, AppResult},
    middleware::{
        auth::AuthUser,
        ownership::{ensure_catalog_read, ensure_store_owner},
    },
    models::Color,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_colors(
    state: &AppState,
    viewer: Option<&AuthUser>,
    store_id: Uuid,
) -> AppResult<ApiResponse<ColorList>> {
    ensure_catalog_read(state, viewer, store_id).await?;

    let items = Colors::find()
        .filter(Column::StoreId.eq(store_id))
        .order_by_desc(Column::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(color_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Colors",
        ColorList { items },
        Some(Meta::empty()),
    ))
}

pub async fn get_color(
    state: &AppState,
    viewer: Option<&AuthUser>,
    store_id: Uuid,
    id: Uuid,
) -> AppResult<ApiResponse<Color>> {
    ensure_catalog_read(state, viewer, store_id).await?;

    let color = Colors::find()
        .filter(Column::Id.eq(id))
        .filter(Column::StoreId.eq(store_id))
        .one(&state.orm)
        .await?;
    let color = match color {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };

    Ok(ApiResponse::success("Color", color_from_entity(color), None))
}

pub async fn create_color(
    state: &AppState,
    user: &AuthUser,
    store_id: Uuid,
    payload: CreateColorRequest,
) -> AppResult<ApiResponse<Color>> {
    let name = required_text(payload.name, "Name")?;
    let value = required_text(payload.value, "Value")?;
    ensure_store_owner(&state.orm, user, store_id).await?;

    let color = ActiveModel {
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
        "color_create",
        Some("colors"),
        Some(serde_json::json!({ "color_id": color.id, "store_id": store_id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Color created",
        color_from_entity(color),
        Some(Meta::empty()),
    ))
}

pub async fn update_color(
    state: &AppState,
    user: &AuthUser,
    store_id: Uuid,
    id: Uuid,
    payload: UpdateColorRequest,
) -> AppResult<ApiResponse<Color>> {
    let name = required_text(payload.name, "Name")?;
    let value = required_text(payload.value, "Value")?;
    ensure_store_owner(&state.orm, user, store_id).await?;

    let existing = Colors::find()
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
    active.value = Set(value);
    active.updated_at = Set(Utc::now().into());
    let color = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(&user.user_id),
        "color_update",
        Some("colors"),
        Some(serde_json::json!({ "color_id": color.id, "store_id": store_id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Updated",
        color_from_entity(color),
        Some(Meta::empty()),
    ))
}

pub async fn delete_color(
    state: &AppState,
    user: &AuthUser,
    store_id: Uuid,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_store_owner(&state.orm, user, store_id).await?;

    let result = Colors::delete_many()
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
        "color_delete",
        Some("colors"),
        Some(serde_json::json!({ "color_id": id, "store_id": store_id })),
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

fn color_from_entity(model: ColorModel) -> Color {
    Color {
        id: model.id,
        store_id: model.store_id,
        name: model.name,
        value: model.value,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
