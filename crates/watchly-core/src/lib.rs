pub mod classify;
pub mod state;
pub mod coordinator;
pub mod screens;

pub use classify::{classify, user_message, Endpoint, ErrorCategory, ErrorMessage};
pub use state::{CatalogScreenState, DetailScreenState, LoadPhase, ScreenState};
pub use coordinator::FetchCoordinator;
pub use screens::{CatalogCoordinator, CatalogLists, CatalogScreen, DetailCoordinator, DetailScreen, Screen};
