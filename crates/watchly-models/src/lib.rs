pub mod media;
pub mod catalog_item;
pub mod item_detail;

pub use media::{MediaKind, MediaType};
pub use catalog_item::CatalogItem;
pub use item_detail::ItemDetail;
