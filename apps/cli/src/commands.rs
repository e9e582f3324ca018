//! Command execution against the persisted campaign.

use crate::config::DiaryConfig;
use crate::render::GraphvizRenderer;
use crate::Command;
use anyhow::Result;
use campaign_core::{render_full_tree, render_scenario_tree, Scenario, ScenarioManager};
use std::io::Write;
use tracing::info;

pub fn run(cfg: &DiaryConfig, command: Command, out: &mut impl Write) -> Result<()> {
    let mut manager = persistence::load_manager(&cfg.database)?;
    match command {
        Command::List => {
            for line in manager.short() {
                writeln!(out, "{line}")?;
            }
        }
        Command::Show(id) => {
            writeln!(out, "{}", manager.get(&id)?.format_full())?;
        }
        Command::Progress => {
            let progress = manager.progress(cfg.scenario_count);
            writeln!(out, "Discovered: {}", progress.discovered_summary())?;
            writeln!(out, "Played:     {}", progress.played_summary())?;
        }
        Command::Save(scenario) => {
            let Some(mut scenario) = scenario.map(|s| *s) else {
                writeln!(out, "nothing to save")?;
                return Ok(());
            };
            carry_predecessors(&manager, &mut scenario);
            let short = scenario.format_short();
            manager.add_scenario(Some(scenario));
            persistence::save_manager(&cfg.database, &manager)?;
            writeln!(out, "saved {short}")?;
        }
        Command::Remove(id) => {
            let removed = manager.remove_scenario(&id)?;
            persistence::save_manager(&cfg.database, &manager)?;
            writeln!(out, "removed {}", removed.format_short())?;
        }
        Command::Achievements => {
            let mut catalog = manager.achievements().to_vec();
            catalog.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.cmp(b)));
            for achievement in catalog {
                writeln!(out, "{achievement}")?;
            }
        }
        Command::StatusList => {
            for achievement in manager.world_status() {
                writeln!(out, "{achievement}")?;
            }
        }
        Command::StatusAdd(achievement) => {
            writeln!(out, "world status: {achievement}")?;
            manager.add_world_status(achievement);
            persistence::save_manager(&cfg.database, &manager)?;
        }
        Command::StatusRemove(achievement) => {
            manager.remove_world_status(&achievement)?;
            persistence::save_manager(&cfg.database, &manager)?;
            writeln!(out, "removed world status: {achievement}")?;
        }
        Command::Help => writeln!(out, "{}", crate::USAGE)?,
        Command::RenderAll => {
            let mut renderer = GraphvizRenderer::new(cfg.layout_command.clone());
            let path = render_full_tree(&manager, &mut renderer, &cfg.tree_output, &cfg.tree_format)?;
            writeln!(out, "{}", path.display())?;
        }
        Command::Render(id) => {
            let mut renderer = GraphvizRenderer::new(cfg.layout_command.clone());
            let path = render_scenario_tree(
                &manager,
                &mut renderer,
                &cfg.tree_output,
                &id,
                &cfg.tree_format,
                cfg.max_hops,
            )?;
            writeln!(out, "{}", path.display())?;
        }
    }
    Ok(())
}

/// Predecessors are owned by the linker, so an edit keeps the stored ones.
fn carry_predecessors(manager: &ScenarioManager, scenario: &mut Scenario) {
    if let Ok(existing) = manager.get(&scenario.id) {
        if scenario.predecessors.is_empty() && !existing.predecessors.is_empty() {
            info!(id = %scenario.id, "keeping recorded predecessors");
            scenario.predecessors = existing.predecessors.clone();
        }
    }
}
