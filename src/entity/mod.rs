pub mod audit_logs;
pub mod billboards;
pub mod categories;
pub mod colors;
pub mod order_items;
pub mod orders;
pub mod product_images;
pub mod products;
pub mod sizes;
pub mod stores;

pub use audit_logs::Entity as AuditLogs;
pub use billboards::Entity as Billboards;
pub use categories::Entity as Categories;
pub use colors::Entity as Colors;
pub use order_items::Entity as OrderItems;
pub use orders::Entity as Orders;
pub use product_images::Entity as ProductImages;
pub use products::Entity as Products;
pub use sizes::Entity as Sizes;
pub use stores::Entity as Stores;
