use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::{
    db::OrmConn,
    entity::stores::{Column as StoreCol, Entity as Stores, Model as StoreModel},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    state::AppState,
};

/// The single ownership gate applied before every mutation of a
/// store-scoped resource: the store row must match both the path id and the
/// caller's identity. A missing store and a store owned by someone else are
/// deliberately indistinguishable to the caller.
pub async fn ensure_store_owner(
    orm: &OrmConn,
    user: &AuthUser,
    store_id: Uuid,
) -> AppResult<StoreModel> {
    let store = Stores::find()
        .filter(StoreCol::Id.eq(store_id))
        .filter(StoreCol::UserId.eq(user.user_id.as_str()))
        .one(orm)
        .await?;

    store.ok_or(AppError::Forbidden)
}

/// Read gate for catalog resources. With `public_catalog_reads` enabled
/// (the default) anyone may list or fetch catalog rows within a store scope;
/// otherwise reads require the same ownership proof as mutations.
pub async fn ensure_catalog_read(
    state: &AppState,
    viewer: Option<&AuthUser>,
    store_id: Uuid,
) -> AppResult<()> {
    if state.config.public_catalog_reads {
        return Ok(());
    }

    let user = viewer.ok_or(AppError::Unauthenticated)?;
    ensure_store_owner(&state.orm, user, store_id).await?;
    Ok(())
}
