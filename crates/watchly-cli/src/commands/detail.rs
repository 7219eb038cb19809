use super::screen::{build_client, settle};
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde_json::json;
use watchly_core::{DetailCoordinator, LoadPhase};

pub async fn run_detail(id: u64, retries: u32, output: &Output) -> Result<()> {
    tracing::debug!("Detail command started for title {}", id);
    let client = build_client()?;

    let screen = DetailCoordinator::new(client);
    let mut rx = screen.subscribe();
    screen.load_detail(id);

    let state = settle(&screen, &mut rx, retries, output).await?;
    let detail = match (state.phase, state.detail) {
        (LoadPhase::Success, Some(detail)) => detail,
        _ => return Err(eyre!("Details for title {} could not be loaded", id)),
    };

    output.detail(&detail);
    output.json(&json!({ "type": "detail", "detail": detail }));
    Ok(())
}
