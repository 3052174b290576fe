use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        billboards::{BillboardList, CreateBillboardRequest, UpdateBillboardRequest},
        categories::{CategoryList, CreateCategoryRequest, UpdateCategoryRequest},
        colors::{ColorList, CreateColorRequest, UpdateColorRequest},
        orders::{OrderList, OrderWithItems},
        products::{CreateProductRequest, ImageInput, ProductList, ProductWithImages, UpdateProductRequest},
        sizes::{CreateSizeRequest, SizeList, UpdateSizeRequest},
        stores::{CreateStoreRequest, StoreList, UpdateStoreRequest},
    },
    models::{Billboard, Category, Color, Image, Order, OrderItem, Product, Size, Store},
    response::{ApiResponse, ErrorDetail, Meta},
    routes::{billboards, categories, colors, health, orders, params, products, sizes, stores, webhook},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        stores::create_store,
        stores::list_stores,
        stores::update_store,
        stores::delete_store,
        billboards::list_billboards,
        billboards::get_billboard,
        billboards::create_billboard,
        billboards::update_billboard,
        billboards::delete_billboard,
        categories::list_categories,
        categories::get_category,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        sizes::list_sizes,
        sizes::get_size,
        sizes::create_size,
        sizes::update_size,
        sizes::delete_size,
        colors::list_colors,
        colors::get_color,
        colors::create_color,
        colors::update_color,
        colors::delete_color,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        orders::list_orders,
        orders::get_order,
        webhook::stripe_webhook
    ),
    components(
        schemas(
            Store,
            Billboard,
            Category,
            Size,
            Color,
            Product,
            Image,
            Order,
            OrderItem,
            CreateStoreRequest,
            UpdateStoreRequest,
            CreateBillboardRequest,
            UpdateBillboardRequest,
            CreateCategoryRequest,
            UpdateCategoryRequest,
            CreateSizeRequest,
            UpdateSizeRequest,
            CreateColorRequest,
            UpdateColorRequest,
            CreateProductRequest,
            UpdateProductRequest,
            ImageInput,
            StoreList,
            BillboardList,
            CategoryList,
            SizeList,
            ColorList,
            ProductList,
            ProductWithImages,
            OrderList,
            OrderWithItems,
            params::Pagination,
            params::ProductQuery,
            Meta,
            ErrorDetail,
            ApiResponse<ErrorDetail>,
            ApiResponse<Store>,
            ApiResponse<StoreList>,
            ApiResponse<Billboard>,
            ApiResponse<BillboardList>,
            ApiResponse<Category>,
            ApiResponse<CategoryList>,
            ApiResponse<Size>,
            ApiResponse<SizeList>,
            ApiResponse<Color>,
            ApiResponse<ColorList>,
            ApiResponse<ProductWithImages>,
            ApiResponse<ProductList>,
            ApiResponse<OrderWithItems>,
            ApiResponse<OrderList>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Stores", description = "Store endpoints"),
        (name = "Billboards", description = "Billboard endpoints"),
        (name = "Categories", description = "Category endpoints"),
        (name = "Sizes", description = "Size endpoints"),
        (name = "Colors", description = "Color endpoints"),
        (name = "Products", description = "Product endpoints"),
        (name = "Orders", description = "Order endpoints"),
        (name = "Webhook", description = "Stripe webhook endpoint"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
