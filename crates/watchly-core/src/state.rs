use serde::Serialize;
use std::fmt::Debug;
use watchly_models::{CatalogItem, ItemDetail};
use crate::classify::ErrorMessage;

/// Where a screen is in its fetch cycle. `Idle` only before the first load
/// (or after a cancelled first load).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    Success,
    Failed,
}

/// Transitions shared by every screen. Implementations keep `is_loading` and
/// `error` mutually exclusive.
pub trait ScreenState: Clone + Default + Debug + Send + Sync + 'static {
    fn phase(&self) -> LoadPhase;
    fn is_loading(&self) -> bool;
    fn error(&self) -> Option<&ErrorMessage>;
    fn has_data(&self) -> bool;

    /// Clear the error, then raise the loading flag. Data stays in place.
    fn begin_loading(&mut self);

    /// Drop the loading flag without a result.
    fn cancel_loading(&mut self);

    /// Returns true if there was an error to clear.
    fn dismiss_error(&mut self) -> bool;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalogScreenState {
    pub movies: Vec<CatalogItem>,
    pub tv_shows: Vec<CatalogItem>,
    pub is_loading: bool,
    pub error: Option<ErrorMessage>,
    pub phase: LoadPhase,
}

impl CatalogScreenState {
    /// Both lists arrived.
    pub fn succeed(&mut self, movies: Vec<CatalogItem>, tv_shows: Vec<CatalogItem>) {
        self.movies = movies;
        self.tv_shows = tv_shows;
        self.is_loading = false;
        self.error = None;
        self.phase = LoadPhase::Success;
    }

    /// The joined fetch failed. Lists from an earlier success are left alone.
    pub fn fail(&mut self, error: ErrorMessage) {
        self.is_loading = false;
        self.error = Some(error);
        self.phase = LoadPhase::Failed;
    }
}

impl ScreenState for CatalogScreenState {
    fn phase(&self) -> LoadPhase {
        self.phase
    }

    fn is_loading(&self) -> bool {
        self.is_loading
    }

    fn error(&self) -> Option<&ErrorMessage> {
        self.error.as_ref()
    }

    fn has_data(&self) -> bool {
        !self.movies.is_empty() || !self.tv_shows.is_empty()
    }

    fn begin_loading(&mut self) {
        self.error = None;
        self.is_loading = true;
        self.phase = LoadPhase::Loading;
    }

    fn cancel_loading(&mut self) {
        if self.is_loading {
            self.is_loading = false;
            self.phase = if self.has_data() { LoadPhase::Success } else { LoadPhase::Idle };
        }
    }

    fn dismiss_error(&mut self) -> bool {
        self.error.take().is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DetailScreenState {
    pub detail: Option<ItemDetail>,
    pub is_loading: bool,
    pub error: Option<ErrorMessage>,
    pub phase: LoadPhase,
}

impl DetailScreenState {
    pub fn succeed(&mut self, detail: ItemDetail) {
        self.detail = Some(detail);
        self.is_loading = false;
        self.error = None;
        self.phase = LoadPhase::Success;
    }

    /// A detail for a different title than the one that failed is not kept
    /// around; a detail for the same title (failed refresh) is.
    pub fn fail(&mut self, requested_id: u64, error: ErrorMessage) {
        if self.detail.as_ref().is_some_and(|d| d.id != requested_id) {
            self.detail = None;
        }
        self.is_loading = false;
        self.error = Some(error);
        self.phase = LoadPhase::Failed;
    }
}

impl ScreenState for DetailScreenState {
    fn phase(&self) -> LoadPhase {
        self.phase
    }

    fn is_loading(&self) -> bool {
        self.is_loading
    }

    fn error(&self) -> Option<&ErrorMessage> {
        self.error.as_ref()
    }

    fn has_data(&self) -> bool {
        self.detail.is_some()
    }

    fn begin_loading(&mut self) {
        self.error = None;
        self.is_loading = true;
        self.phase = LoadPhase::Loading;
    }

    fn cancel_loading(&mut self) {
        if self.is_loading {
            self.is_loading = false;
            self.phase = if self.has_data() { LoadPhase::Success } else { LoadPhase::Idle };
        }
    }

    fn dismiss_error(&mut self) -> bool {
        self.error.take().is_some()
    }
}
