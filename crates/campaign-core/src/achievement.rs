//! Achievements granted by scenarios and tracked as global world status.

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Who an achievement belongs to.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum AchievementType {
    /// Earned by the adventuring party.
    Group,
    /// Shared by the whole campaign world.
    Global,
}

/// Whether an achievement is currently in effect.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum AchievementStatus {
    Open,
    Closed,
}

impl fmt::Display for AchievementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AchievementType::Group => f.write_str("GROUP"),
            AchievementType::Global => f.write_str("GLOBAL"),
        }
    }
}

impl fmt::Display for AchievementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AchievementStatus::Open => f.write_str("OPEN"),
            AchievementStatus::Closed => f.write_str("CLOSED"),
        }
    }
}

impl FromStr for AchievementType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GROUP" => Ok(AchievementType::Group),
            "GLOBAL" => Ok(AchievementType::Global),
            other => Err(ParseError::AchievementType(other.to_string())),
        }
    }
}

impl FromStr for AchievementStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "OPEN" => Ok(AchievementStatus::Open),
            "CLOSED" => Ok(AchievementStatus::Closed),
            other => Err(ParseError::AchievementStatus(other.to_string())),
        }
    }
}

/// A named fact that a scenario grants on completion or demands to unlock.
///
/// Equality and hashing cover all three fields, so the same name with a
/// different status is a different value. There are no mutators: build a
/// replacement to change the status.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Achievement {
    name: String,
    category: AchievementType,
    status: AchievementStatus,
}

impl Achievement {
    pub fn new(
        name: impl Into<String>,
        category: AchievementType,
        status: AchievementStatus,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            status,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> AchievementType {
        self.category
    }

    pub fn status(&self) -> AchievementStatus {
        self.status
    }

    pub fn is_closed(&self) -> bool {
        self.status == AchievementStatus::Closed
    }
}

impl fmt::Display for Achievement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) {}", self.name, self.category, self.status)
    }
}

/// Parses the `NAME:TYPE:STATUS` shorthand, e.g. `Key:GROUP:CLOSED`.
///
/// The name may itself contain colons; type and status are taken from the
/// last two segments.
impl FromStr for Achievement {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.rsplitn(3, ':');
        let status = parts.next().unwrap_or_default();
        let category = parts
            .next()
            .ok_or_else(|| ParseError::AchievementShorthand(s.to_string()))?;
        let name = parts
            .next()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| ParseError::AchievementShorthand(s.to_string()))?;
        Ok(Achievement::new(name, category.parse()?, status.parse()?))
    }
}
