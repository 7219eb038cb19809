use futures::future::BoxFuture;
use futures::FutureExt;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::info;
use watchly_models::{CatalogItem, ItemDetail, MediaKind};
use watchly_sources::{RemoteCatalogClient, TransportError};
use crate::classify::{Endpoint, ErrorMessage};
use crate::coordinator::FetchCoordinator;
use crate::state::{CatalogScreenState, DetailScreenState, ScreenState};

/// What a screen fetches and how the outcome lands in its state.
pub trait Screen: Send + Sync + 'static {
    type Params: Clone + Debug + PartialEq + Send + Sync + 'static;
    type State: ScreenState;
    type Output: Send + 'static;

    const NAME: &'static str;
    const ENDPOINT: Endpoint;

    fn fetch(
        client: Arc<dyn RemoteCatalogClient>,
        params: Self::Params,
    ) -> BoxFuture<'static, Result<Self::Output, TransportError>>;

    fn apply_success(state: &mut Self::State, params: &Self::Params, output: Self::Output);

    fn apply_failure(state: &mut Self::State, params: &Self::Params, error: ErrorMessage);
}

/// Result of the joined movies + tv series fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogLists {
    pub movies: Vec<CatalogItem>,
    pub tv_shows: Vec<CatalogItem>,
}

/// Home screen: movies and tv series side by side.
#[derive(Debug)]
pub struct CatalogScreen;

impl Screen for CatalogScreen {
    type Params = ();
    type State = CatalogScreenState;
    type Output = CatalogLists;

    const NAME: &'static str = "catalog";
    const ENDPOINT: Endpoint = Endpoint::List;

    // All-or-nothing: the first failure cancels the other request.
    fn fetch(client: Arc<dyn RemoteCatalogClient>, _params: ()) -> BoxFuture<'static, Result<CatalogLists, TransportError>> {
        async move {
            let (movies, tv_shows) = futures::try_join!(
                client.list_items(MediaKind::Movie),
                client.list_items(MediaKind::TvSeries)
            )?;
            Ok(CatalogLists { movies, tv_shows })
        }
        .boxed()
    }

    fn apply_success(state: &mut CatalogScreenState, _params: &(), output: CatalogLists) {
        info!("Catalog loaded: {} movies, {} tv shows", output.movies.len(), output.tv_shows.len());
        state.succeed(output.movies, output.tv_shows);
    }

    fn apply_failure(state: &mut CatalogScreenState, _params: &(), error: ErrorMessage) {
        state.fail(error);
    }
}

/// Detail screen for a single title id.
#[derive(Debug)]
pub struct DetailScreen;

impl Screen for DetailScreen {
    type Params = u64;
    type State = DetailScreenState;
    type Output = ItemDetail;

    const NAME: &'static str = "detail";
    const ENDPOINT: Endpoint = Endpoint::Detail;

    fn fetch(client: Arc<dyn RemoteCatalogClient>, id: u64) -> BoxFuture<'static, Result<ItemDetail, TransportError>> {
        async move { client.get_item_detail(id).await }.boxed()
    }

    fn apply_success(state: &mut DetailScreenState, id: &u64, detail: ItemDetail) {
        info!("Loaded details for title {} ({})", id, detail.title);
        state.succeed(detail);
    }

    fn apply_failure(state: &mut DetailScreenState, id: &u64, error: ErrorMessage) {
        state.fail(*id, error);
    }
}

pub type CatalogCoordinator = FetchCoordinator<CatalogScreen>;
pub type DetailCoordinator = FetchCoordinator<DetailScreen>;

impl FetchCoordinator<CatalogScreen> {
    /// Initial mount and pull-to-refresh.
    pub fn refresh(&self) {
        self.load(());
    }
}

impl FetchCoordinator<DetailScreen> {
    pub fn load_detail(&self, id: u64) {
        self.load(id);
    }
}
