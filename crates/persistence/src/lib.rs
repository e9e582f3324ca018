#![deny(warnings)]

//! Persistence layer: JSON save files for campaign state.

use anyhow::{Context, Result};
use campaign_core::{CampaignState, ScenarioManager};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Returns the default location of the campaign save file.
pub fn default_database_path() -> &'static str {
    "saves/scenarios.json"
}

/// Read a campaign state from a JSON file.
pub fn load_state(path: &Path) -> Result<CampaignState> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let state: CampaignState =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    Ok(state)
}

/// Write a campaign state as pretty JSON, creating parent directories.
pub fn save_state(path: &Path, state: &CampaignState) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    let text = serde_json::to_string_pretty(state)?;
    fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Load a manager; a missing file starts an empty campaign.
pub fn load_manager(path: &Path) -> Result<ScenarioManager> {
    if !path.exists() {
        warn!(path = %path.display(), "no save file found, starting empty campaign");
        return Ok(ScenarioManager::default());
    }
    let manager = ScenarioManager::from_state(load_state(path)?);
    info!(
        path = %path.display(),
        scenarios = manager.len(),
        world_status = manager.world_status().len(),
        "loaded campaign"
    );
    Ok(manager)
}

pub fn save_manager(path: &Path, manager: &ScenarioManager) -> Result<()> {
    save_state(path, &manager.to_state())?;
    info!(path = %path.display(), scenarios = manager.len(), "saved campaign");
    Ok(())
}
