pub mod billboard_service;
pub mod category_service;
pub mod color_service;
pub mod order_service;
pub mod product_service;
pub mod size_service;
pub mod store_service;
pub mod webhook_service;
