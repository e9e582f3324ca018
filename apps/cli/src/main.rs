#![deny(warnings)]

//! Headless command-line diary for tracking a scenario campaign.

mod commands;
mod config;
mod render;

use anyhow::{anyhow, bail, Context, Result};
use campaign_core::{Achievement, CampaignError, Difficulty, Scenario, ScenarioId};
use config::DiaryConfig;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
usage: scenario-diary [--config FILE] [--db FILE] [--format FMT] [--hops N|none] COMMAND

commands:
  list                       list known scenarios
  show ID                    print everything known about a scenario
  progress                   discovered and played scenarios
  save --id ID [fields]      create or replace a scenario
       --name TEXT --aim TEXT --successors 2,3 --difficulty EASY|MEDIUM|HARD
       --attempts N --description TEXT --reward TEXT... --played
       --achievement NAME:TYPE:STATUS... --requires NAME:TYPE:STATUS...
  remove ID                  delete a scenario
  status list                print the world status
  status add|remove NAME:TYPE:STATUS
  achievements               every achievement seen so far
  render --all | render ID   render the campaign tree";

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Help,
    List,
    Show(ScenarioId),
    Progress,
    /// `None` when the submitted id was blank.
    Save(Option<Box<Scenario>>),
    Remove(ScenarioId),
    Achievements,
    StatusList,
    StatusAdd(Achievement),
    StatusRemove(Achievement),
    RenderAll,
    Render(ScenarioId),
}

#[derive(Debug, Clone, PartialEq, Default)]
struct Overrides {
    config: Option<PathBuf>,
    database: Option<PathBuf>,
    format: Option<String>,
    max_hops: Option<Option<usize>>,
}

impl Overrides {
    fn apply(&self, cfg: &mut DiaryConfig) {
        if let Some(db) = &self.database {
            cfg.database = db.clone();
        }
        if let Some(format) = &self.format {
            cfg.tree_format = format.clone();
        }
        if let Some(hops) = self.max_hops {
            cfg.max_hops = hops;
        }
    }
}

fn next_value(it: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    it.next().ok_or_else(|| anyhow!("{flag} needs a value"))
}

fn parse_hops(s: &str) -> Result<Option<usize>> {
    if s.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    s.parse()
        .map(Some)
        .with_context(|| format!("invalid hop limit {s:?}"))
}

fn parse_achievement(s: &str) -> Result<Achievement> {
    Ok(s.parse()?)
}

/// Build the scenario described by `save` flags; a blank id yields `None`.
fn parse_save(args: Vec<String>) -> Result<Option<Box<Scenario>>> {
    let mut id = String::new();
    let mut scenario = Scenario::new("");
    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--id" => id = next_value(&mut it, &arg)?,
            "--name" => scenario.name = Some(next_value(&mut it, &arg)?),
            "--aim" => scenario.aim = Some(next_value(&mut it, &arg)?),
            "--successors" => {
                scenario.successors = next_value(&mut it, &arg)?
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(ScenarioId::from)
                    .collect();
            }
            "--difficulty" => {
                scenario.difficulty = Some(next_value(&mut it, &arg)?.parse::<Difficulty>()?);
            }
            "--attempts" => {
                let n = next_value(&mut it, &arg)?;
                scenario.attempts = Some(n.parse().with_context(|| format!("invalid attempts {n:?}"))?);
            }
            "--description" => scenario.description = Some(next_value(&mut it, &arg)?),
            "--reward" => scenario.rewards.push(next_value(&mut it, &arg)?),
            "--achievement" => scenario
                .achievements
                .push(parse_achievement(&next_value(&mut it, &arg)?)?),
            "--requires" => scenario
                .requirements
                .push(parse_achievement(&next_value(&mut it, &arg)?)?),
            "--played" => scenario.played = true,
            other => bail!("unknown save option {other:?}"),
        }
    }
    let id = id.trim();
    if id.is_empty() {
        return Ok(None);
    }
    scenario.id = ScenarioId::from(id);
    Ok(Some(Box::new(scenario)))
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<(Overrides, Command)> {
    let mut overrides = Overrides::default();
    let mut it = args.into_iter();
    let command = loop {
        let arg = it.next().ok_or_else(|| anyhow!("missing command\n{USAGE}"))?;
        match arg.as_str() {
            "--config" => overrides.config = Some(next_value(&mut it, &arg)?.into()),
            "--db" => overrides.database = Some(next_value(&mut it, &arg)?.into()),
            "--format" => overrides.format = Some(next_value(&mut it, &arg)?),
            "--hops" => overrides.max_hops = Some(parse_hops(&next_value(&mut it, &arg)?)?),
            "-h" | "--help" => return Ok((overrides, Command::Help)),
            _ => break arg,
        }
    };

    let rest: Vec<String> = it.collect();
    let single_id = |rest: &[String]| -> Result<ScenarioId> {
        match rest {
            [id] => Ok(ScenarioId::from(id.trim())),
            _ => bail!("{command} expects exactly one scenario id"),
        }
    };
    let command = match command.as_str() {
        "list" => Command::List,
        "progress" => Command::Progress,
        "achievements" => Command::Achievements,
        "show" => Command::Show(single_id(rest.as_slice())?),
        "remove" => Command::Remove(single_id(rest.as_slice())?),
        "save" => Command::Save(parse_save(rest)?),
        "status" => match rest.as_slice() {
            [op] if op == "list" => Command::StatusList,
            [op, value] if op == "add" => Command::StatusAdd(parse_achievement(value)?),
            [op, value] if op == "remove" => Command::StatusRemove(parse_achievement(value)?),
            _ => bail!("usage: status list | status add|remove NAME:TYPE:STATUS"),
        },
        "render" => match rest.as_slice() {
            [flag] if flag == "--all" => Command::RenderAll,
            _ => Command::Render(single_id(rest.as_slice())?),
        },
        other => bail!("unknown command {other:?}\n{USAGE}"),
    };
    Ok((overrides, command))
}

fn main() -> Result<()> {
    // Logging setup
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let (overrides, command) = parse_args(std::env::args().skip(1))?;
    if command == Command::Help {
        println!("{USAGE}");
        return Ok(());
    }
    let mut cfg = DiaryConfig::load(overrides.config.as_deref())?;
    overrides.apply(&mut cfg);
    info!(database = %cfg.database.display(), ?command, "starting diary");

    let mut stdout = std::io::stdout().lock();
    if let Err(err) = commands::run(&cfg, command, &mut stdout) {
        if let Some(not_found) = err.downcast_ref::<CampaignError>() {
            eprintln!("error: {not_found}");
            std::process::exit(2);
        }
        return Err(err);
    }
    Ok(())
}
