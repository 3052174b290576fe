use chrono::Utc;
use sea_orm::sea_query::{Expr, LockType};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    entity::{
        order_items::{Column as OrderItemCol, Entity as OrderItems},
        orders::{ActiveModel as OrderActive, Entity as Orders},
        products::{Column as ProdCol, Entity as Products},
    },
    error::AppResult,
    payments::{CheckoutSession, StripeWebhookEvent, CHECKOUT_SESSION_COMPLETED},
    state::AppState,
};

/// Bring the order named by a verified `checkout.session.completed` event to
/// its paid state: set `is_paid`, store the customer's joined address and
/// phone, and archive every product its items reference. The whole sequence
/// runs in one transaction so a mid-sequence failure cannot leave the order
/// paid with its products still live.
///
/// Events of any other kind are acknowledged without touching the database,
/// as is an event whose metadata names no order we know about (the provider
/// redelivers on non-2xx, and redelivery cannot fix an unknown id).
pub async fn reconcile_checkout(state: &AppState, event: StripeWebhookEvent) -> AppResult<()> {
    if event.event_type != CHECKOUT_SESSION_COMPLETED {
        tracing::debug!(event_type = %event.event_type, "ignoring webhook event");
        return Ok(());
    }

    // Past signature verification the delivery is authentic; a shape we
    // cannot read is logged and acknowledged, since redelivery of the same
    // payload cannot succeed either.
    let session: CheckoutSession = match serde_json::from_value(event.data.object) {
        Ok(session) => session,
        Err(err) => {
            tracing::warn!(error = %err, "checkout session payload did not deserialize");
            return Ok(());
        }
    };

    let Some(order_id) = session.metadata.order_id.as_deref() else {
        tracing::warn!(session_id = %session.id, "checkout session carries no order id");
        return Ok(());
    };
    let Ok(order_id) = Uuid::parse_str(order_id) else {
        tracing::warn!(session_id = %session.id, order_id, "order id in metadata is not a uuid");
        return Ok(());
    };

    let (address, phone) = match session.customer_details {
        Some(details) => (
            details
                .address
                .map(|a| a.to_joined_string())
                .unwrap_or_default(),
            details.phone.unwrap_or_default(),
        ),
        None => (String::new(), String::new()),
    };

    let txn = state.orm.begin().await?;

    let order = Orders::find_by_id(order_id)
        .lock(LockType::Update)
        .one(&txn)
        .await?;
    let Some(order) = order else {
        tracing::warn!(%order_id, "webhook names an unknown order, acknowledging anyway");
        return Ok(());
    };

    let mut active: OrderActive = order.into();
    active.is_paid = Set(true);
    active.address = Set(address);
    active.phone = Set(phone);
    active.updated_at = Set(Utc::now().into());
    let order = active.update(&txn).await?;

    let product_ids: Vec<Uuid> = OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(order.id))
        .all(&txn)
        .await?
        .into_iter()
        .map(|item| item.product_id)
        .collect();

    let archived = if product_ids.is_empty() {
        0
    } else {
        Products::update_many()
            .col_expr(ProdCol::IsArchived, Expr::value(true))
            .filter(ProdCol::Id.is_in(product_ids))
            .exec(&txn)
            .await?
            .rows_affected
    };

    txn.commit().await?;

    tracing::info!(order_id = %order.id, archived, "order reconciled as paid");

    if let Err(err) = log_audit(
        &state.pool,
        None,
        "order_paid",
        Some("orders"),
        Some(serde_json::json!({ "order_id": order.id, "products_archived": archived })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(())
}
