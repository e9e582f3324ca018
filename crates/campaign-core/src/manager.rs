//! The scenario manager: owner of all scenarios and the world status.

use crate::achievement::Achievement;
use crate::error::CampaignError;
use crate::linker::link_scenarios;
use crate::scenario::{Scenario, ScenarioId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Serializable snapshot of a campaign, as stored on disk.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignState {
    #[serde(default)]
    pub world_status: Vec<Achievement>,
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
}

/// Campaign progress against the number of scenarios in the campaign book.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    /// Known scenarios, stubs included.
    pub discovered: usize,
    pub played: usize,
    pub total: usize,
}

impl Progress {
    pub fn discovered_summary(&self) -> String {
        summary(self.discovered, self.total)
    }

    pub fn played_summary(&self) -> String {
        summary(self.played, self.total)
    }
}

fn summary(n: usize, total: usize) -> String {
    let pct = if total == 0 {
        0.0
    } else {
        100.0 * n as f64 / total as f64
    };
    format!("{n}/{total} ({pct:.2} %)")
}

/// Aggregate root for a campaign.
///
/// Holds the scenario map keyed by id, the world status (at most one entry
/// per achievement name) and the achievement catalog offered for selection.
/// The catalog is extended on every add but only rebuilt from scratch on
/// removal, so editing a scenario's achievements leaves stale entries behind
/// until the next removal or reload.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScenarioManager {
    scenarios: BTreeMap<ScenarioId, Scenario>,
    world_status: BTreeSet<Achievement>,
    achievements: Vec<Achievement>,
}

impl ScenarioManager {
    /// Build a manager, linking the scenario graph and collecting the catalog.
    pub fn new(
        scenarios: impl IntoIterator<Item = Scenario>,
        world_status: impl IntoIterator<Item = Achievement>,
    ) -> Self {
        let mut manager = Self {
            scenarios: scenarios.into_iter().map(|s| (s.id.clone(), s)).collect(),
            ..Self::default()
        };
        for achievement in world_status {
            manager.add_world_status(achievement);
        }
        manager.relink();
        manager.rebuild_catalog();
        manager
    }

    pub fn from_state(state: CampaignState) -> Self {
        Self::new(state.scenarios, state.world_status)
    }

    /// Snapshot for persistence, scenarios in numeric id order.
    pub fn to_state(&self) -> CampaignState {
        CampaignState {
            world_status: self.world_status.iter().cloned().collect(),
            scenarios: self.values().into_iter().cloned().collect(),
        }
    }

    /// Re-run the graph linker over the current scenario set.
    pub fn relink(&mut self) {
        link_scenarios(&mut self.scenarios);
    }

    /// Upsert a scenario by id.
    ///
    /// `None`, or a scenario with a blank id, means there is nothing to save
    /// and leaves the manager untouched. The linker is not re-run.
    pub fn add_scenario(&mut self, scenario: Option<Scenario>) {
        let Some(scenario) = scenario else {
            return;
        };
        if scenario.id.as_str().trim().is_empty() {
            debug!("ignoring scenario without id");
            return;
        }
        let granted = scenario.achievements.iter();
        let required = scenario.requirements.iter();
        for achievement in granted.chain(required) {
            if !self.achievements.contains(achievement) {
                self.achievements.push(achievement.clone());
            }
        }
        debug!(id = %scenario.id, "saving scenario");
        self.scenarios.insert(scenario.id.clone(), scenario);
    }

    /// Remove a scenario and rebuild the achievement catalog.
    pub fn remove_scenario(&mut self, id: &ScenarioId) -> Result<Scenario, CampaignError> {
        let removed = self
            .scenarios
            .remove(id)
            .ok_or_else(|| CampaignError::ScenarioNotFound(id.clone()))?;
        self.rebuild_catalog();
        debug!(id = %id, "removed scenario");
        Ok(removed)
    }

    /// Record an achievement in the world status.
    ///
    /// Any entry sharing the name is evicted first, whatever its type or
    /// status. Adding a value that is already present does nothing.
    pub fn add_world_status(&mut self, achievement: Achievement) {
        if self.world_status.contains(&achievement) {
            return;
        }
        self.world_status.retain(|a| a.name() != achievement.name());
        if !self.achievements.contains(&achievement) {
            self.achievements.push(achievement.clone());
        }
        debug!(%achievement, "world status updated");
        self.world_status.insert(achievement);
    }

    pub fn remove_world_status(&mut self, achievement: &Achievement) -> Result<(), CampaignError> {
        if self.world_status.remove(achievement) {
            Ok(())
        } else {
            Err(CampaignError::WorldStatusNotFound(achievement.clone()))
        }
    }

    pub fn world_status(&self) -> &BTreeSet<Achievement> {
        &self.world_status
    }

    /// Whether the requirement currently holds in the world status.
    pub fn is_satisfied(&self, requirement: &Achievement) -> bool {
        self.world_status.contains(requirement)
    }

    /// Every achievement known to the campaign, unique by full identity.
    pub fn achievements(&self) -> &[Achievement] {
        &self.achievements
    }

    pub fn get(&self, id: &ScenarioId) -> Result<&Scenario, CampaignError> {
        self.scenarios
            .get(id)
            .ok_or_else(|| CampaignError::ScenarioNotFound(id.clone()))
    }

    pub fn get_mut(&mut self, id: &ScenarioId) -> Result<&mut Scenario, CampaignError> {
        self.scenarios
            .get_mut(id)
            .ok_or_else(|| CampaignError::ScenarioNotFound(id.clone()))
    }

    pub fn contains(&self, id: &ScenarioId) -> bool {
        self.scenarios.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Scenario ids sorted by numeric value ("2" before "10").
    pub fn keys(&self) -> Vec<&ScenarioId> {
        let mut keys: Vec<&ScenarioId> = self.scenarios.keys().collect();
        keys.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        keys
    }

    /// Scenarios sorted by numeric id.
    pub fn values(&self) -> Vec<&Scenario> {
        let mut values: Vec<&Scenario> = self.scenarios.values().collect();
        values.sort_by(|a, b| a.id.sort_key().cmp(&b.id.sort_key()));
        values
    }

    /// Short labels of all scenarios in numeric id order.
    pub fn short(&self) -> Vec<String> {
        self.values().iter().map(|s| s.format_short()).collect()
    }

    pub fn progress(&self, total: usize) -> Progress {
        Progress {
            discovered: self.scenarios.len(),
            played: self.scenarios.values().filter(|s| s.played).count(),
            total,
        }
    }

    fn rebuild_catalog(&mut self) {
        let values = self.values();
        let granted = values.iter().flat_map(|s| s.achievements.iter());
        let required = values.iter().flat_map(|s| s.requirements.iter());
        let mut catalog: Vec<Achievement> = Vec::new();
        for achievement in granted.chain(required).chain(self.world_status.iter()) {
            if !catalog.contains(achievement) {
                catalog.push(achievement.clone());
            }
        }
        debug!(entries = catalog.len(), "rebuilt achievement catalog");
        self.achievements = catalog;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievement::{AchievementStatus, AchievementType};
    use proptest::prelude::*;

    fn ach(name: &str, status: AchievementStatus) -> Achievement {
        Achievement::new(name, AchievementType::Group, status)
    }

    fn id(s: &str) -> ScenarioId {
        ScenarioId::from(s)
    }

    fn scenario(sid: &str, successors: &[&str]) -> Scenario {
        let mut s = Scenario::new(sid);
        s.successors = successors.iter().map(|t| id(t)).collect();
        s
    }

    #[test]
    fn construction_links_and_stubs() {
        let m = ScenarioManager::new(vec![scenario("1", &["2", "3"])], vec![]);
        assert_eq!(m.len(), 3);
        assert!(m.get(&id("3")).unwrap().predecessors.contains(&id("1")));
    }

    #[test]
    fn keys_and_values_sort_numerically() {
        let m = ScenarioManager::new(
            vec![Scenario::new("2"), Scenario::new("10"), Scenario::new("1")],
            vec![],
        );
        let keys: Vec<&str> = m.keys().iter().map(|k| k.as_str()).collect();
        assert_eq!(keys, ["1", "2", "10"]);
        let values: Vec<&str> = m.values().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(values, ["1", "2", "10"]);
        assert_eq!(m.short(), ["Nr. 1 ", "Nr. 2 ", "Nr. 10 "]);
    }

    #[test]
    fn world_status_is_unique_by_name() {
        let mut m = ScenarioManager::default();
        m.add_world_status(ach("Gold", AchievementStatus::Open));
        m.add_world_status(ach("Gold", AchievementStatus::Closed));
        let gold: Vec<&Achievement> = m.world_status().iter().filter(|a| a.name() == "Gold").collect();
        assert_eq!(gold.len(), 1);
        assert_eq!(gold[0].status(), AchievementStatus::Closed);
    }

    #[test]
    fn world_status_add_is_idempotent() {
        let mut m = ScenarioManager::default();
        m.add_world_status(ach("Gold", AchievementStatus::Open));
        let before = m.clone();
        m.add_world_status(ach("Gold", AchievementStatus::Open));
        assert_eq!(m, before);
    }

    #[test]
    fn remove_world_status_requires_exact_value() {
        let mut m = ScenarioManager::default();
        m.add_world_status(ach("Gold", AchievementStatus::Open));
        let err = m
            .remove_world_status(&ach("Gold", AchievementStatus::Closed))
            .unwrap_err();
        assert!(matches!(err, CampaignError::WorldStatusNotFound(_)));
        m.remove_world_status(&ach("Gold", AchievementStatus::Open)).unwrap();
        assert!(m.world_status().is_empty());
    }

    #[test]
    fn add_none_is_a_no_op() {
        let mut m = ScenarioManager::new(vec![scenario("1", &["2"])], vec![]);
        let before = m.clone();
        m.add_scenario(None);
        assert_eq!(m, before);
        m.add_scenario(Some(Scenario::new("  ")));
        assert_eq!(m, before);
    }

    #[test]
    fn add_scenario_upserts_and_extends_catalog() {
        let mut m = ScenarioManager::default();
        let mut s = Scenario::new("4");
        s.achievements = vec![ach("Key", AchievementStatus::Closed)];
        s.requirements = vec![ach("Map", AchievementStatus::Open)];
        m.add_scenario(Some(s.clone()));
        assert_eq!(m.achievements().len(), 2);

        s.name = Some("Crypt".to_string());
        m.add_scenario(Some(s));
        assert_eq!(m.len(), 1);
        assert_eq!(m.get(&id("4")).unwrap().name.as_deref(), Some("Crypt"));
        assert_eq!(m.achievements().len(), 2);
    }

    #[test]
    fn add_scenario_does_not_relink() {
        let mut m = ScenarioManager::default();
        m.add_scenario(Some(scenario("1", &["2"])));
        assert!(!m.contains(&id("2")));
        m.relink();
        assert!(m.contains(&id("2")));
    }

    #[test]
    fn remove_unknown_scenario_fails() {
        let mut m = ScenarioManager::default();
        assert_eq!(
            m.remove_scenario(&id("99")).unwrap_err(),
            CampaignError::ScenarioNotFound(id("99"))
        );
    }

    #[test]
    fn remove_scenario_prunes_catalog() {
        let mut only_here = Scenario::new("1");
        only_here.achievements = vec![ach("Relic", AchievementStatus::Closed)];
        let mut other = Scenario::new("2");
        other.requirements = vec![ach("Key", AchievementStatus::Closed)];
        let mut m = ScenarioManager::new(vec![only_here, other], vec![]);
        assert!(m.achievements().contains(&ach("Relic", AchievementStatus::Closed)));

        let removed = m.remove_scenario(&id("1")).unwrap();
        assert_eq!(removed.id, id("1"));
        assert!(!m.contains(&id("1")));
        assert!(!m.achievements().contains(&ach("Relic", AchievementStatus::Closed)));
        assert!(m.achievements().contains(&ach("Key", AchievementStatus::Closed)));
    }

    #[test]
    fn catalog_only_grows_until_a_removal() {
        let key = ach("Key", AchievementStatus::Closed);
        let relic = ach("Relic", AchievementStatus::Closed);
        let mut m = ScenarioManager::new(vec![Scenario::new("1")], vec![]);

        let mut s = Scenario::new("4");
        s.achievements = vec![key.clone()];
        m.add_scenario(Some(s.clone()));
        s.achievements = vec![relic.clone()];
        m.add_scenario(Some(s));
        assert_eq!(m.get(&id("4")).unwrap().achievements, [relic.clone()]);
        assert_eq!(m.achievements(), [key.clone(), relic.clone()]);

        m.remove_scenario(&id("1")).unwrap();
        assert!(!m.achievements().contains(&key));
        assert_eq!(m.achievements(), [relic]);
    }

    #[test]
    fn catalog_includes_world_status() {
        let m = ScenarioManager::new(vec![], vec![ach("Gold", AchievementStatus::Open)]);
        assert_eq!(m.achievements(), [ach("Gold", AchievementStatus::Open)]);
    }

    #[test]
    fn lookup_of_unknown_id_fails() {
        let m = ScenarioManager::default();
        let err = m.get(&id("3")).unwrap_err();
        assert_eq!(err.to_string(), "Scenario ID 3 not found");
    }

    #[test]
    fn progress_counts_stubs_and_played() {
        let mut played = scenario("1", &["2"]);
        played.played = true;
        let m = ScenarioManager::new(vec![played], vec![]);
        let p = m.progress(4);
        assert_eq!((p.discovered, p.played, p.total), (2, 1, 4));
        assert_eq!(p.discovered_summary(), "2/4 (50.00 %)");
        assert_eq!(p.played_summary(), "1/4 (25.00 %)");
        assert_eq!(m.progress(0).played_summary(), "1/0 (0.00 %)");
    }

    #[test]
    fn state_roundtrip_preserves_everything() {
        let mut s1 = scenario("1", &["2", "3 or 4"]);
        s1.name = Some("Black Barrow".to_string());
        s1.played = true;
        s1.achievements = vec![ach("Key", AchievementStatus::Closed)];
        let m = ScenarioManager::new(vec![s1], vec![ach("Gold", AchievementStatus::Open)]);
        assert!(m.contains(&id("2")));

        let json = serde_json::to_string_pretty(&m.to_state()).unwrap();
        let back: CampaignState = serde_json::from_str(&json).unwrap();
        let restored = ScenarioManager::from_state(back);
        assert_eq!(restored, m);
    }

    proptest! {
        #[test]
        fn values_are_in_numeric_order(ids in prop::collection::btree_set(0u32..10_000, 0..30)) {
            let m = ScenarioManager::new(ids.iter().map(|i| Scenario::new(i.to_string())), vec![]);
            let listed: Vec<u32> = m.keys().iter().filter_map(|k| k.as_str().parse().ok()).collect();
            let expected: Vec<u32> = ids.into_iter().collect();
            prop_assert_eq!(listed, expected);
        }
    }
}
