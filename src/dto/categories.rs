use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Category;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    pub name: Option<String>,
    pub billboard_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub billboard_id: Option<Uuid>,
}

#[derive(Debug, serde::Serialize, ToSchema)]
pub struct CategoryList {
    pub items: Vec<Category>,
}
