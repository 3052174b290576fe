use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Image, Product};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ImageInput {
    pub url: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub category_id: Option<Uuid>,
    pub size_id: Option<Uuid>,
    pub color_id: Option<Uuid>,
    pub images: Option<Vec<ImageInput>>,
    pub is_featured: Option<bool>,
    pub is_archived: Option<bool>,
}

/// PATCH replaces the whole product including its image set.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub category_id: Option<Uuid>,
    pub size_id: Option<Uuid>,
    pub color_id: Option<Uuid>,
    pub images: Option<Vec<ImageInput>>,
    pub is_featured: Option<bool>,
    pub is_archived: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductWithImages {
    pub product: Product,
    pub images: Vec<Image>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductList {
    pub items: Vec<ProductWithImages>,
}
