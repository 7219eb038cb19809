//! Per-screen fetch coordination.
//!
//! A `FetchCoordinator` owns one screen's state behind a `watch` channel and
//! is the only writer to it. Every `load` takes a fresh ticket and aborts the
//! request it supersedes; a finished request only touches the state if its
//! ticket is still the current one, checked inside the same critical section
//! that applies the result.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use watchly_sources::{RemoteCatalogClient, TransportError};
use crate::classify::{classify, ErrorMessage};
use crate::screens::Screen;
use crate::state::ScreenState;


pub struct FetchCoordinator<S: Screen> {
    client: Arc<dyn RemoteCatalogClient>,
    state: Arc<watch::Sender<S::State>>,
    current_ticket: Arc<AtomicU64>,
    last_params: Mutex<Option<S::Params>>,
    in_flight: Mutex<Option<JoinHandle<()>>>,
}

impl<S: Screen> std::fmt::Debug for FetchCoordinator<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchCoordinator")
            .field("screen", &S::NAME)
            .field("ticket", &self.current_ticket.load(Ordering::SeqCst))
            .field("state", &*self.state.borrow())
            .finish()
    }
}

impl<S: Screen> FetchCoordinator<S> {
    pub fn new(client: Arc<dyn RemoteCatalogClient>) -> Self {
        let (state, _) = watch::channel(S::State::default());
        Self {
            client,
            state: Arc::new(state),
            current_ticket: Arc::new(AtomicU64::new(0)),
            last_params: Mutex::new(None),
            in_flight: Mutex::new(None),
        }
    }

    /// Observe the screen state. The receiver sees every value this
    /// coordinator publishes from now on.
    pub fn subscribe(&self) -> watch::Receiver<S::State> {
        self.state.subscribe()
    }

    pub fn state(&self) -> S::State {
        self.state.borrow().clone()
    }

    /// Parameters of the most recent `load`, which `retry` will reuse.
    pub fn last_params(&self) -> Option<S::Params> {
        self.last_params.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Start a fetch. Must be called from within a tokio runtime.
    pub fn load(&self, params: S::Params) {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = in_flight.take() {
            if !previous.is_finished() {
                debug!("{}: superseding in-flight request", S::NAME);
            }
            previous.abort();
        }

        let ticket = self.current_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        *self.last_params.lock().unwrap_or_else(PoisonError::into_inner) = Some(params.clone());
        self.state.send_modify(|state| state.begin_loading());
        info!("{}: loading {:?} (ticket {})", S::NAME, params, ticket);

        let client = Arc::clone(&self.client);
        let state = Arc::clone(&self.state);
        let current_ticket = Arc::clone(&self.current_ticket);
        *in_flight = Some(tokio::spawn(async move {
            let result = S::fetch(client, params.clone()).await;
            apply_result::<S>(&state, &current_ticket, ticket, &params, result);
        }));
    }

    /// Re-run the last `load` with the same parameters. Returns false when
    /// nothing was loaded yet.
    pub fn retry(&self) -> bool {
        match self.last_params() {
            Some(params) => {
                info!("{}: retrying {:?}", S::NAME, params);
                self.load(params);
                true
            }
            None => {
                debug!("{}: retry requested before any load", S::NAME);
                false
            }
        }
    }

    /// Clear the error. Loading flag and data are untouched.
    pub fn dismiss_error(&self) {
        self.state.send_if_modified(|state| state.dismiss_error());
    }

    /// Forget the in-flight request, if any. Its result will never be applied.
    pub fn cancel(&self) {
        self.current_ticket.fetch_add(1, Ordering::SeqCst);
        if let Some(handle) = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner).take() {
            handle.abort();
        }
        self.state.send_if_modified(|state| {
            let was_loading = state.is_loading();
            state.cancel_loading();
            was_loading
        });
    }
}

impl<S: Screen> Drop for FetchCoordinator<S> {
    fn drop(&mut self) {
        self.current_ticket.fetch_add(1, Ordering::SeqCst);
        if let Some(handle) = self.in_flight.get_mut().unwrap_or_else(PoisonError::into_inner).take() {
            handle.abort();
        }
    }
}

/// Publish a finished request's outcome unless a newer request superseded it.
/// Returns whether the state changed.
pub(crate) fn apply_result<S: Screen>(
    state: &watch::Sender<S::State>,
    current_ticket: &AtomicU64,
    ticket: u64,
    params: &S::Params,
    result: Result<S::Output, TransportError>,
) -> bool {
    let applied = state.send_if_modified(|state| {
        if current_ticket.load(Ordering::SeqCst) != ticket {
            return false;
        }
        match result {
            Ok(output) => S::apply_success(state, params, output),
            Err(error) => {
                let category = classify(&error, S::ENDPOINT);
                let message: ErrorMessage = category.message(S::ENDPOINT);
                warn!("{}: request for {:?} failed: {} ({:?})", S::NAME, params, error, category);
                S::apply_failure(state, params, message);
            }
        }
        true
    });

    if !applied {
        debug!("{}: dropping stale result for ticket {}", S::NAME, ticket);
    }
    applied
}
