pub mod traits;
pub mod watchmode;
pub mod error;

pub use traits::RemoteCatalogClient;
pub use watchmode::WatchmodeClient;
pub use error::TransportError;
