use axum::extract::FromRef;

use crate::{
    config::AppConfig,
    db::{DbPool, OrmConn},
    payments::StripeWebhook,
};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub config: AppConfig,
    pub webhook: StripeWebhook,
}
