use serde::Deserialize;
use utoipa::ToSchema;

use crate::models::Billboard;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBillboardRequest {
    pub label: Option<String>,
    pub image_url: Option<String>,
}

/// PATCH replaces both fields, so the same requirements apply as on create.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBillboardRequest {
    pub label: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, serde::Serialize, ToSchema)]
pub struct BillboardList {
    pub items: Vec<Billboard>,
}
