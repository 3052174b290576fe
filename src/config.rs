use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub stripe_webhook_secret: String,
    /// When true (the default), GET endpoints for catalog resources
    /// (billboards, categories, sizes, colors, products) are readable without
    /// authentication, scoped to the store in the path. Orders are always
    /// owner-only regardless of this flag.
    pub public_catalog_reads: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let jwt_secret = env::var("JWT_SECRET")?;
        let stripe_webhook_secret = env::var("STRIPE_WEBHOOK_SECRET")?;
        let public_catalog_reads = env::var("PUBLIC_CATALOG_READS")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(true);
        Ok(Self {
            database_url,
            host,
            port,
            jwt_secret,
            stripe_webhook_secret,
            public_catalog_reads,
        })
    }
}
