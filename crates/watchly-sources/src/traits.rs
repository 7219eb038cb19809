use async_trait::async_trait;
use watchly_models::{CatalogItem, ItemDetail, MediaKind};
use crate::error::TransportError;

/// Request/response access to the remote catalog. Implementations do not
/// retry; retrying is a decision of whoever drives the screen.
#[async_trait]
pub trait RemoteCatalogClient: Send + Sync {
    fn source_name(&self) -> &str;

    /// First page of titles of the given kind.
    async fn list_items(&self, kind: MediaKind) -> Result<Vec<CatalogItem>, TransportError>;

    /// Full record for an id previously seen in a listing.
    async fn get_item_detail(&self, id: u64) -> Result<ItemDetail, TransportError>;
}
