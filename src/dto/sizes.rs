use serde::Deserialize;
use utoipa::ToSchema;

use crate::models::Size;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSizeRequest {
    pub name: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSizeRequest {
    pub name: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, serde::Serialize, ToSchema)]
pub struct SizeList {
    pub items: Vec<Size>,
}
