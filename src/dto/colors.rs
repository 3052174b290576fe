use serde::Deserialize;
use utoipa::ToSchema;

use crate::models::Color;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateColorRequest {
    pub name: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateColorRequest {
    pub name: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, serde::Serialize, ToSchema)]
pub struct ColorList {
    pub items: Vec<Color>,
}
