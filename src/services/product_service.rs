use std::collections::HashMap;

use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::{
        products::{
            CreateProductRequest, ImageInput, ProductList, ProductWithImages, UpdateProductRequest,
        },
        required, required_text,
    },
    entity::{
        product_images::{
            ActiveModel as ImageActive, Column as ImageCol, Entity as ProductImages,
            Model as ImageModel,
        },
        products::{ActiveModel, Column, Entity as Products, Model as ProductModel},
    },
    error::{AppError, AppResult},
    middleware::{
        auth::AuthUser,
        ownership::{ensure_catalog_read, ensure_store_owner},
    },
    models::{Image, Product},
    response::{ApiResponse, Meta},
    routes::params::ProductQuery,
    state::AppState,
};

pub async fn list_products(
    state: &AppState,
    viewer: Option<&AuthUser>,
    store_id: Uuid,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    ensure_catalog_read(state, viewer, store_id).await?;

    let (page, limit, offset) = query.pagination().normalize();

    // Archived products never show up in storefront listings.
    let mut condition = Condition::all()
        .add(Column::StoreId.eq(store_id))
        .add(Column::IsArchived.eq(false));

    if let Some(category_id) = query.category_id {
        condition = condition.add(Column::CategoryId.eq(category_id));
    }
    if let Some(size_id) = query.size_id {
        condition = condition.add(Column::SizeId.eq(size_id));
    }
    if let Some(color_id) = query.color_id {
        condition = condition.add(Column::ColorId.eq(color_id));
    }
    if let Some(is_featured) = query.is_featured {
        condition = condition.add(Column::IsFeatured.eq(is_featured));
    }

    let finder = Products::find()
        .filter(condition)
        .order_by_desc(Column::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;

    let products = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;

    let product_ids: Vec<Uuid> = products.iter().map(|p| p.id).collect();
    let mut images_by_product: HashMap<Uuid, Vec<Image>> = HashMap::new();
    if !product_ids.is_empty() {
        for image in ProductImages::find()
            .filter(ImageCol::ProductId.is_in(product_ids))
            .all(&state.orm)
            .await?
        {
            images_by_product
                .entry(image.product_id)
                .or_default()
                .push(image_from_entity(image));
        }
    }

    let items = products
        .into_iter()
        .map(|p| {
            let images = images_by_product.remove(&p.id).unwrap_or_default();
            ProductWithImages {
                product: product_from_entity(p),
                images,
            }
        })
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Products",
        ProductList { items },
        Some(meta),
    ))
}

pub async fn get_product(
    state: &AppState,
    viewer: Option<&AuthUser>,
    store_id: Uuid,
    id: Uuid,
) -> AppResult<ApiResponse<ProductWithImages>> {
    ensure_catalog_read(state, viewer, store_id).await?;

    let product = Products::find()
        .filter(Column::Id.eq(id))
        .filter(Column::StoreId.eq(store_id))
        .one(&state.orm)
        .await?;
    let product = match product {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };

    let images = ProductImages::find()
        .filter(ImageCol::ProductId.eq(product.id))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(image_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Product",
        ProductWithImages {
            product: product_from_entity(product),
            images,
        },
        None,
    ))
}

pub async fn create_product(
    state: &AppState,
    user: &AuthUser,
    store_id: Uuid,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<ProductWithImages>> {
    let name = required_text(payload.name, "Name")?;
    let images = payload
        .images
        .filter(|images| !images.is_empty())
        .ok_or_else(|| AppError::BadRequest("Images are required".into()))?;
    let price = required(payload.price, "Price")?;
    let category_id = required(payload.category_id, "Category Id")?;
    let size_id = required(payload.size_id, "Size Id")?;
    let color_id = required(payload.color_id, "Color Id")?;
    ensure_store_owner(&state.orm, user, store_id).await?;

    let txn = state.orm.begin().await?;

    let product = ActiveModel {
        id: Set(Uuid::new_v4()),
        store_id: Set(store_id),
        category_id: Set(category_id),
        size_id: Set(size_id),
        color_id: Set(color_id),
        name: Set(name),
        price: Set(price),
        is_featured: Set(payload.is_featured.unwrap_or(false)),
        is_archived: Set(payload.is_archived.unwrap_or(false)),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&txn)
    .await?;

    let images = insert_images(&txn, product.id, images).await?;

    txn.commit().await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(&user.user_id),
        "product_create",
        Some("products"),
        Some(serde_json::json!({ "product_id": product.id, "store_id": store_id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Product created",
        ProductWithImages {
            product: product_from_entity(product),
            images,
        },
        Some(Meta::empty()),
    ))
}

pub async fn update_product(
    state: &AppState,
    user: &AuthUser,
    store_id: Uuid,
    id: Uuid,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<ProductWithImages>> {
    let name = required_text(payload.name, "Name")?;
    let images = payload
        .images
        .filter(|images| !images.is_empty())
        .ok_or_else(|| AppError::BadRequest("Images are required".into()))?;
    let price = required(payload.price, "Price")?;
    let category_id = required(payload.category_id, "Category Id")?;
    let size_id = required(payload.size_id, "Size Id")?;
    let color_id = required(payload.color_id, "Color Id")?;
    ensure_store_owner(&state.orm, user, store_id).await?;

    let txn = state.orm.begin().await?;

    let existing = Products::find()
        .filter(Column::Id.eq(id))
        .filter(Column::StoreId.eq(store_id))
        .one(&txn)
        .await?;
    let existing = match existing {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };

    let mut active: ActiveModel = existing.into();
    active.name = Set(name);
    active.price = Set(price);
    active.category_id = Set(category_id);
    active.size_id = Set(size_id);
    active.color_id = Set(color_id);
    active.is_featured = Set(payload.is_featured.unwrap_or(false));
    active.is_archived = Set(payload.is_archived.unwrap_or(false));
    active.updated_at = Set(Utc::now().into());
    let product = active.update(&txn).await?;

    // The image set is replaced wholesale on every update.
    ProductImages::delete_many()
        .filter(ImageCol::ProductId.eq(product.id))
        .exec(&txn)
        .await?;
    let images = insert_images(&txn, product.id, images).await?;

    txn.commit().await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(&user.user_id),
        "product_update",
        Some("products"),
        Some(serde_json::json!({ "product_id": product.id, "store_id": store_id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Updated",
        ProductWithImages {
            product: product_from_entity(product),
            images,
        },
        Some(Meta::empty()),
    ))
}

pub async fn delete_product(
    state: &AppState,
    user: &AuthUser,
    store_id: Uuid,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_store_owner(&state.orm, user, store_id).await?;

    // product_images rows go with the product via ON DELETE CASCADE.
    let result = Products::delete_many()
        .filter(Column::Id.eq(id))
        .filter(Column::StoreId.eq(store_id))
        .exec(&state.orm)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    if let Err(err) = log_audit(
        &state.pool,
        Some(&user.user_id),
        "product_delete",
        Some("products"),
        Some(serde_json::json!({ "product_id": id, "store_id": store_id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

async fn insert_images<C: sea_orm::ConnectionTrait>(
    conn: &C,
    product_id: Uuid,
    inputs: Vec<ImageInput>,
) -> AppResult<Vec<Image>> {
    let mut images = Vec::with_capacity(inputs.len());
    for input in inputs {
        let image = ImageActive {
            id: Set(Uuid::new_v4()),
            product_id: Set(product_id),
            url: Set(input.url),
            created_at: NotSet,
        }
        .insert(conn)
        .await?;
        images.push(image_from_entity(image));
    }
    Ok(images)
}

fn product_from_entity(model: ProductModel) -> Product {
    Product {
        id: model.id,
        store_id: model.store_id,
        category_id: model.category_id,
        size_id: model.size_id,
        color_id: model.color_id,
        name: model.name,
        price: model.price,
        is_featured: model.is_featured,
        is_archived: model.is_archived,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

fn image_from_entity(model: ImageModel) -> Image {
    Image {
        id: model.id,
        product_id: model.product_id,
        url: model.url,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
