use serde::Deserialize;
use utoipa::ToSchema;

use crate::models::Store;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateStoreRequest {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStoreRequest {
    pub name: Option<String>,
}

#[derive(Debug, serde::Serialize, ToSchema)]
pub struct StoreList {
    pub items: Vec<Store>,
}
