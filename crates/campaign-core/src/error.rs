use crate::achievement::Achievement;
use crate::scenario::ScenarioId;
use thiserror::Error;

/// Lookup failures raised by the scenario manager and the tree builders.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CampaignError {
    /// No scenario with this id has been saved or unlocked yet.
    #[error("Scenario ID {0} not found")]
    ScenarioNotFound(ScenarioId),
    /// The exact achievement is not part of the world status.
    #[error("world status {0} not found")]
    WorldStatusNotFound(Achievement),
}

/// Failures parsing the textual forms of achievements and difficulties.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown achievement type: {0}")]
    AchievementType(String),
    #[error("unknown achievement status: {0}")]
    AchievementStatus(String),
    #[error("expected NAME:TYPE:STATUS, got {0:?}")]
    AchievementShorthand(String),
    #[error("unknown difficulty: {0}")]
    Difficulty(String),
}
