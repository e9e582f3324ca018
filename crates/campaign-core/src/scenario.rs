//! Scenario records: the nodes of the campaign graph.

use crate::achievement::Achievement;
use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Scenario number as printed in the campaign book, e.g. "1", "42".
///
/// Successor lists may also carry free-text tokens (branches such as
/// "61 or 62 by choice"); those are stored as ids too but never linked.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ScenarioId(pub String);

impl ScenarioId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for a non-empty string of ASCII digits.
    pub fn is_numeric(&self) -> bool {
        !self.0.is_empty() && self.0.bytes().all(|b| b.is_ascii_digit())
    }

    /// Key ordering ids by numeric value; anything unparsable sorts last.
    pub fn sort_key(&self) -> (u64, &str) {
        let n = if self.is_numeric() {
            self.0.parse().unwrap_or(u64::MAX)
        } else {
            u64::MAX
        };
        (n, self.0.as_str())
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ScenarioId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ScenarioId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Difficulty the party chose for a scenario.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        };
        f.write_str(s)
    }
}

impl FromStr for Difficulty {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EASY" => Ok(Difficulty::Easy),
            "MEDIUM" => Ok(Difficulty::Medium),
            "HARD" => Ok(Difficulty::Hard),
            other => Err(ParseError::Difficulty(other.to_string())),
        }
    }
}

/// A scenario of the campaign and everything the diary knows about it.
///
/// A scenario that is only referenced as someone's successor exists as a
/// stub: the id is set and every other field is empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: ScenarioId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub aim: Option<String>,
    /// Scenarios unlocked by completing this one, plus free-text branches.
    #[serde(default)]
    pub successors: BTreeSet<ScenarioId>,
    /// Scenarios listing this one as a successor. Maintained by the linker.
    #[serde(default)]
    pub predecessors: BTreeSet<ScenarioId>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub attempts: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub rewards: Vec<String>,
    /// Granted on completion.
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    /// Must be satisfied to unlock.
    #[serde(default)]
    pub requirements: Vec<Achievement>,
    #[serde(default)]
    pub played: bool,
}

impl Scenario {
    /// An empty, unplayed scenario with only the id set.
    pub fn new(id: impl Into<ScenarioId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            aim: None,
            successors: BTreeSet::new(),
            predecessors: BTreeSet::new(),
            difficulty: None,
            attempts: None,
            description: None,
            rewards: Vec::new(),
            achievements: Vec::new(),
            requirements: Vec::new(),
            played: false,
        }
    }

    /// Successor ids that refer to real scenarios.
    pub fn numeric_successors(&self) -> impl Iterator<Item = &ScenarioId> {
        self.successors.iter().filter(|s| s.is_numeric())
    }

    /// Multi-line dump of every field, used as the full node label.
    pub fn format_full(&self) -> String {
        format!(
            "{short}\nRequirements: {requirements}\nAim: {aim}\nPredecessors: {predecessors}\nSuccessors: {successors}\nDifficulty: {difficulty}, Attempts: {attempts}\nRewards: {rewards}\nAchievements: {achievements}\n{description}",
            short = self.format_short(),
            requirements = join(&self.requirements),
            aim = self.aim.as_deref().unwrap_or_default(),
            predecessors = join(&self.predecessors),
            successors = join(&self.successors),
            difficulty = self.difficulty.map(|d| d.to_string()).unwrap_or_default(),
            attempts = self.attempts.map(|a| a.to_string()).unwrap_or_default(),
            rewards = join(&self.rewards),
            achievements = join(&self.achievements),
            description = self.description.as_deref().unwrap_or_default(),
        )
    }

    /// `Nr. {id} {name}`, with an empty name for stubs.
    pub fn format_short(&self) -> String {
        format!("Nr. {} {}", self.id, self.name.as_deref().unwrap_or_default())
    }
}

fn join<T: fmt::Display>(items: impl IntoIterator<Item = T>) -> String {
    items
        .into_iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
