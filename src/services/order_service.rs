use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{
    dto::orders::{OrderList, OrderWithItems},
    entity::{
        order_items::{Column as OrderItemCol, Entity as OrderItems, Model as OrderItemModel},
        orders::{Column as OrderCol, Entity as Orders, Model as OrderModel},
    },
    error::{AppError, AppResult},
    middleware::{auth::AuthUser, ownership::ensure_store_owner},
    models::{Order, OrderItem},
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Orders carry customer contact data, so reads are owner-only regardless
/// of the public-catalog-reads setting.
pub async fn list_orders(
    state: &AppState,
    user: &AuthUser,
    store_id: Uuid,
) -> AppResult<ApiResponse<OrderList>> {
    ensure_store_owner(&state.orm, user, store_id).await?;

    let orders = Orders::find()
        .filter(OrderCol::StoreId.eq(store_id))
        .order_by_desc(OrderCol::CreatedAt)
        .all(&state.orm)
        .await?;

    let order_ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();
    let mut items_by_order: HashMap<Uuid, Vec<OrderItem>> = HashMap::new();
    if !order_ids.is_empty() {
        for item in OrderItems::find()
            .filter(OrderItemCol::OrderId.is_in(order_ids))
            .all(&state.orm)
            .await?
        {
            items_by_order
                .entry(item.order_id)
                .or_default()
                .push(order_item_from_entity(item));
        }
    }

    let items = orders
        .into_iter()
        .map(|o| {
            let items = items_by_order.remove(&o.id).unwrap_or_default();
            OrderWithItems {
                order: order_from_entity(o),
                items,
            }
        })
        .collect();

    Ok(ApiResponse::success(
        "Orders",
        OrderList { items },
        Some(Meta::empty()),
    ))
}

pub async fn get_order(
    state: &AppState,
    user: &AuthUser,
    store_id: Uuid,
    id: Uuid,
) -> AppResult<ApiResponse<OrderWithItems>> {
    ensure_store_owner(&state.orm, user, store_id).await?;

    let order = Orders::find()
        .filter(OrderCol::Id.eq(id))
        .filter(OrderCol::StoreId.eq(store_id))
        .one(&state.orm)
        .await?;
    let order = match order {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    let items = OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(order.id))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_item_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Order",
        OrderWithItems {
            order: order_from_entity(order),
            items,
        },
        Some(Meta::empty()),
    ))
}

pub(crate) fn order_from_entity(model: OrderModel) -> Order {
    Order {
        id: model.id,
        store_id: model.store_id,
        is_paid: model.is_paid,
        phone: model.phone,
        address: model.address,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

pub(crate) fn order_item_from_entity(model: OrderItemModel) -> OrderItem {
    OrderItem {
        id: model.id,
        order_id: model.order_id,
        product_id: model.product_id,
    }
}
