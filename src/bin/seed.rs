use rust_decimal::Decimal;
use store_admin_api::{config::AppConfig, db::create_pool};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    let owner = std::env::var("SEED_USER_ID").unwrap_or_else(|_| "user_demo".to_string());

    let store_id = ensure_store(&pool, &owner, "Demo Store").await?;
    let billboard_id = ensure_billboard(&pool, store_id, "Summer Collection").await?;
    let category_id = ensure_category(&pool, store_id, billboard_id, "Shirts").await?;
    let size_id = ensure_size(&pool, store_id, "Medium", "M").await?;
    let color_id = ensure_color(&pool, store_id, "Black", "#000000").await?;
    seed_products(&pool, store_id, category_id, size_id, color_id).await?;

    println!("Seed completed. Store ID: {store_id} (owner {owner})");
    Ok(())
}

async fn ensure_store(pool: &sqlx::PgPool, user_id: &str, name: &str) -> anyhow::Result<Uuid> {
    let existing: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM stores WHERE user_id = $1 AND name = $2")
            .bind(user_id)
            .bind(name)
            .fetch_optional(pool)
            .await?;
    if let Some((id,)) = existing {
        return Ok(id);
    }

    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO stores (id, name, user_id) VALUES ($1, $2, $3)")
        .bind(id)
        .bind(name)
        .bind(user_id)
        .execute(pool)
        .await?;
    println!("Created store {name}");
    Ok(id)
}

async fn ensure_billboard(pool: &sqlx::PgPool, store_id: Uuid, label: &str) -> anyhow::Result<Uuid> {
    let existing: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM billboards WHERE store_id = $1 AND label = $2")
            .bind(store_id)
            .bind(label)
            .fetch_optional(pool)
            .await?;
    if let Some((id,)) = existing {
        return Ok(id);
    }

    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO billboards (id, store_id, label, image_url) VALUES ($1, $2, $3, $4)")
        .bind(id)
        .bind(store_id)
        .bind(label)
        .bind("https://placehold.co/1200x400")
        .execute(pool)
        .await?;
    println!("Created billboard {label}");
    Ok(id)
}

async fn ensure_category(
    pool: &sqlx::PgPool,
    store_id: Uuid,
    billboard_id: Uuid,
    name: &str,
) -> anyhow::Result<Uuid> {
    let existing: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM categories WHERE store_id = $1 AND name = $2")
            .bind(store_id)
            .bind(name)
            .fetch_optional(pool)
            .await?;
    if let Some((id,)) = existing {
        return Ok(id);
    }

    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO categories (id, store_id, billboard_id, name) VALUES ($1, $2, $3, $4)")
        .bind(id)
        .bind(store_id)
        .bind(billboard_id)
        .bind(name)
        .execute(pool)
        .await?;
    println!("Created category {name}");
    Ok(id)
}

async fn ensure_size(
    pool: &sqlx::PgPool,
    store_id: Uuid,
    name: &str,
    value: &str,
) -> anyhow::Result<Uuid> {
    let existing: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM sizes WHERE store_id = $1 AND name = $2")
            .bind(store_id)
            .bind(name)
            .fetch_optional(pool)
            .await?;
    if let Some((id,)) = existing {
        return Ok(id);
    }

    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO sizes (id, store_id, name, value) VALUES ($1, $2, $3, $4)")
        .bind(id)
        .bind(store_id)
        .bind(name)
        .bind(value)
        .execute(pool)
        .await?;
    println!("Created size {name}");
    Ok(id)
}

async fn ensure_color(
    pool: &sqlx::PgPool,
    store_id: Uuid,
    name: &str,
    value: &str,
) -> anyhow::Result<Uuid> {
    let existing: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM colors WHERE store_id = $1 AND name = $2")
            .bind(store_id)
            .bind(name)
            .fetch_optional(pool)
            .await?;
    if let Some((id,)) = existing {
        return Ok(id);
    }

    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO colors (id, store_id, name, value) VALUES ($1, $2, $3, $4)")
        .bind(id)
        .bind(store_id)
        .bind(name)
        .bind(value)
        .execute(pool)
        .await?;
    println!("Created color {name}");
    Ok(id)
}

async fn seed_products(
    pool: &sqlx::PgPool,
    store_id: Uuid,
    category_id: Uuid,
    size_id: Uuid,
    color_id: Uuid,
) -> anyhow::Result<()> {
    let products = vec![
        ("Classic Tee", Decimal::new(1999, 2), true),
        ("Linen Shirt", Decimal::new(4950, 2), false),
        ("Oxford Button-Down", Decimal::new(6500, 2), false),
    ];

    for (name, price, is_featured) in products {
        let existing: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM products WHERE store_id = $1 AND name = $2")
                .bind(store_id)
                .bind(name)
                .fetch_optional(pool)
                .await?;
        if existing.is_some() {
            continue;
        }

        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO products (id, store_id, category_id, size_id, color_id, name, price, is_featured)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(id)
        .bind(store_id)
        .bind(category_id)
        .bind(size_id)
        .bind(color_id)
        .bind(name)
        .bind(price)
        .bind(is_featured)
        .execute(pool)
        .await?;

        sqlx::query("INSERT INTO product_images (id, product_id, url) VALUES ($1, $2, $3)")
            .bind(Uuid::new_v4())
            .bind(id)
            .bind("https://placehold.co/600x600")
            .execute(pool)
            .await?;
    }

    println!("Seeded products");
    Ok(())
}
