use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::sync::Arc;
use tokio::sync::watch;
use watchly_config::{Config, PathManager};
use watchly_core::{FetchCoordinator, Screen, ScreenState};
use watchly_sources::{RemoteCatalogClient, WatchmodeClient};

/// Load and validate the config, then build the API client from it.
pub fn build_client() -> Result<Arc<dyn RemoteCatalogClient>> {
    let path = PathManager::default().config_file();
    let config = Config::load_or_default(&path)
        .map_err(|e| eyre!("Failed to read config from {}: {}", path.display(), e))?;

    config
        .validate()
        .map_err(|e| eyre!("{} (run `watchly config init` to create {})", e, path.display()))?;

    let client = WatchmodeClient::from_config(&config.api).map_err(|e| eyre!("{}", e))?;
    Ok(Arc::new(client))
}

/// Wait for the screen to settle. Every error is shown once and dismissed;
/// a failed load is retried up to `retries` times.
pub async fn settle<S: Screen>(
    coordinator: &FetchCoordinator<S>,
    rx: &mut watch::Receiver<S::State>,
    retries: u32,
    output: &Output,
) -> Result<S::State> {
    let mut attempts = 0;
    loop {
        let state = rx
            .wait_for(|state| !state.is_loading())
            .await
            .map_err(|_| eyre!("{} screen closed before loading finished", S::NAME))?
            .clone();

        let Some(error) = state.error().cloned() else {
            return Ok(state);
        };

        output.error(error);
        coordinator.dismiss_error();

        if attempts >= retries {
            return Ok(state);
        }
        attempts += 1;
        output.warn(format!("Retrying ({}/{})", attempts, retries));
        coordinator.retry();
    }
}
