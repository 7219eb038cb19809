use super::screen::{build_client, settle};
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde_json::json;
use watchly_core::{CatalogCoordinator, LoadPhase};

pub async fn run_catalog(retries: u32, output: &Output) -> Result<()> {
    tracing::debug!("Catalog command started");
    let client = build_client()?;

    let catalog = CatalogCoordinator::new(client);
    let mut rx = catalog.subscribe();
    catalog.refresh();

    let state = settle(&catalog, &mut rx, retries, output).await?;
    if state.phase == LoadPhase::Failed {
        return Err(eyre!("Catalog could not be loaded"));
    }

    output.catalog_section("Movies", &state.movies);
    output.catalog_section("TV Shows", &state.tv_shows);
    output.json(&json!({
        "type": "catalog",
        "movies": state.movies,
        "tv_shows": state.tv_shows,
    }));
    Ok(())
}
