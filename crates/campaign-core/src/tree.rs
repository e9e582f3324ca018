//! Scenario tree construction.
//!
//! The builders here only produce a [`GraphDescription`]; drawing it is left
//! to a [`GraphRenderer`] so the layout backend can be swapped freely.

use crate::error::CampaignError;
use crate::manager::ScenarioManager;
use crate::scenario::{Scenario, ScenarioId};
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// How node labels are rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelMode {
    /// Full multi-line label on every node.
    Full,
    /// Short label, full text as tooltip.
    Compact,
}

impl LabelMode {
    /// Interactive formats get compact labels with tooltips.
    pub fn for_format(format: &str) -> Self {
        if format.eq_ignore_ascii_case("svg") {
            LabelMode::Compact
        } else {
            LabelMode::Full
        }
    }
}

/// Visual hint for unplayed scenarios.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Highlight {
    /// Unplayed, with at least one requirement met by the world status.
    Ready,
    /// Unplayed, no requirement met.
    Blocked,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphNode {
    pub id: ScenarioId,
    pub label: String,
    pub tooltip: Option<String>,
    pub highlight: Option<Highlight>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphEdge {
    pub from: ScenarioId,
    pub to: ScenarioId,
    pub label: Option<String>,
}

/// Abstract node/edge graph handed to a renderer.
///
/// Edges are keyed by their endpoints: the first edge recorded between two
/// nodes wins. Edge endpoints need not be described as nodes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphDescription {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
}

impl GraphDescription {
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn node(&self, id: &ScenarioId) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    pub fn edge(&self, from: &ScenarioId, to: &ScenarioId) -> Option<&GraphEdge> {
        self.edges.iter().find(|e| &e.from == from && &e.to == to)
    }

    fn add_node(&mut self, node: GraphNode) {
        if self.node(&node.id).is_none() {
            self.nodes.push(node);
        }
    }

    /// No-op if an edge between the two nodes already exists.
    fn add_edge(&mut self, from: &ScenarioId, to: &ScenarioId, label: Option<String>) {
        if self.edge(from, to).is_none() {
            self.edges.push(GraphEdge {
                from: from.clone(),
                to: to.clone(),
                label,
            });
        }
    }
}

/// Where and in which format a rendered graph should end up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderRequest {
    pub output: PathBuf,
    pub format: String,
}

/// A layout/drawing backend.
pub trait GraphRenderer {
    fn render(&mut self, graph: &GraphDescription, request: &RenderRequest) -> Result<()>;
}

fn graph_node(manager: &ScenarioManager, scenario: &Scenario, mode: LabelMode) -> GraphNode {
    let highlight = if scenario.played {
        None
    } else if scenario.requirements.iter().any(|r| manager.is_satisfied(r)) {
        Some(Highlight::Ready)
    } else {
        Some(Highlight::Blocked)
    };
    let (label, tooltip) = match mode {
        LabelMode::Full => (scenario.format_full(), None),
        LabelMode::Compact => (scenario.format_short(), Some(scenario.format_full())),
    };
    GraphNode {
        id: scenario.id.clone(),
        label,
        tooltip,
        highlight,
    }
}

/// Snapshot of the whole campaign graph.
///
/// Every scenario becomes a node. Numeric successors give unlabeled edges;
/// for unplayed scenarios each requirement granted by another scenario gives
/// an edge from the grantor labeled with the requirement.
pub fn build_full_tree(manager: &ScenarioManager, mode: LabelMode) -> GraphDescription {
    let scenarios = manager.values();
    let mut graph = GraphDescription::default();
    for scenario in &scenarios {
        graph.add_node(graph_node(manager, scenario, mode));

        for successor in scenario.numeric_successors() {
            graph.add_edge(&scenario.id, successor, None);
        }

        if scenario.played {
            continue;
        }
        for requirement in &scenario.requirements {
            for grantor in &scenarios {
                if grantor.id == scenario.id || !grantor.achievements.contains(requirement) {
                    continue;
                }
                graph.add_edge(&grantor.id, &scenario.id, Some(requirement.to_string()));
            }
        }
    }
    debug!(
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "built full scenario tree"
    );
    graph
}

/// Explain how `root_id` became reachable, up to `max_hops` steps back.
///
/// Expands from the root over a work list that grows while it is walked.
/// Each entry pulls in the scenarios granting its closed requirements and its
/// recorded predecessors at the next hop. Entries beyond `max_hops` are not
/// expanded and get no node of their own, but edges already recorded towards
/// them stay in the result.
pub fn build_scenario_tree(
    manager: &ScenarioManager,
    root_id: &ScenarioId,
    max_hops: Option<usize>,
    mode: LabelMode,
) -> Result<GraphDescription, CampaignError> {
    let root = manager.get(root_id)?;
    let scenarios = manager.values();
    let mut work: Vec<(&Scenario, usize)> = vec![(root, 0)];
    let mut graph = GraphDescription::default();

    let mut next = 0;
    while next < work.len() {
        let (scenario, hop) = work[next];
        next += 1;
        if max_hops.is_some_and(|max| hop > max) {
            continue;
        }
        graph.add_node(graph_node(manager, scenario, mode));

        for requirement in scenario.requirements.iter().filter(|r| r.is_closed()) {
            for &grantor in &scenarios {
                if queued(&work, &grantor.id) || !grantor.achievements.contains(requirement) {
                    continue;
                }
                work.push((grantor, hop + 1));
                graph.add_edge(&grantor.id, &scenario.id, Some(requirement.to_string()));
            }
        }

        for predecessor_id in &scenario.predecessors {
            let predecessor = manager.get(predecessor_id)?;
            graph.add_edge(&predecessor.id, &scenario.id, None);
            if !queued(&work, &predecessor.id) {
                work.push((predecessor, hop + 1));
            }
        }
    }

    debug!(
        root = %root_id,
        visited = work.len(),
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "built scenario tree"
    );
    Ok(graph)
}

fn queued(work: &[(&Scenario, usize)], id: &ScenarioId) -> bool {
    work.iter().any(|(s, _)| &s.id == id)
}

/// Output path for a single-scenario tree: `tree.pdf` becomes `tree-7.pdf`.
pub fn scenario_tree_path(base: &Path, root_id: &ScenarioId) -> PathBuf {
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match base.extension() {
        Some(ext) => format!("{stem}-{root_id}.{}", ext.to_string_lossy()),
        None => format!("{stem}-{root_id}"),
    };
    base.with_file_name(file_name)
}

/// Build and render the whole campaign graph.
pub fn render_full_tree(
    manager: &ScenarioManager,
    renderer: &mut dyn GraphRenderer,
    output: &Path,
    format: &str,
) -> Result<PathBuf> {
    let graph = build_full_tree(manager, LabelMode::for_format(format));
    let request = RenderRequest {
        output: output.to_path_buf(),
        format: format.to_string(),
    };
    renderer.render(&graph, &request)?;
    info!(path = %request.output.display(), "rendered scenario tree");
    Ok(request.output)
}

/// Build and render the tree leading to one scenario.
///
/// An unknown root or predecessor surfaces as a [`CampaignError`] inside the
/// returned error.
pub fn render_scenario_tree(
    manager: &ScenarioManager,
    renderer: &mut dyn GraphRenderer,
    base: &Path,
    root_id: &ScenarioId,
    format: &str,
    max_hops: Option<usize>,
) -> Result<PathBuf> {
    let graph = build_scenario_tree(manager, root_id, max_hops, LabelMode::for_format(format))?;
    let request = RenderRequest {
        output: scenario_tree_path(base, root_id),
        format: format.to_string(),
    };
    renderer.render(&graph, &request)?;
    info!(root = %root_id, path = %request.output.display(), "rendered scenario tree");
    Ok(request.output)
}
