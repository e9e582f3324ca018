#![deny(warnings)]

//! Core campaign bookkeeping for the scenario diary.
//!
//! This crate defines the serializable scenario and achievement types, the
//! graph linker that keeps predecessor edges consistent with successor lists,
//! the [`ScenarioManager`] aggregate and the tree builders that turn the
//! scenario graph into an abstract node/edge description for rendering.

pub mod achievement;
pub mod dot;
pub mod error;
pub mod linker;
pub mod manager;
pub mod scenario;
pub mod tree;

pub use achievement::{Achievement, AchievementStatus, AchievementType};
pub use error::{CampaignError, ParseError};
pub use linker::link_scenarios;
pub use manager::{CampaignState, Progress, ScenarioManager};
pub use scenario::{Difficulty, Scenario, ScenarioId};
pub use tree::{
    build_full_tree, build_scenario_tree, render_full_tree, render_scenario_tree,
    scenario_tree_path, GraphDescription, GraphEdge, GraphNode, GraphRenderer, Highlight,
    LabelMode, RenderRequest,
};
