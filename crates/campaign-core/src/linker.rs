//! Repairs predecessor back-edges and materializes stub scenarios.

use crate::scenario::{Scenario, ScenarioId};
use std::collections::BTreeMap;
use tracing::debug;

/// Make every numeric successor reference resolvable.
///
/// For each scenario `S` and each numeric successor `T` of `S`, `T` ends up in
/// the map with `S` among its predecessors. Missing successors are created as
/// stubs after the scan completes, so stubs are never scanned themselves in
/// the same pass. Free-text successor tokens are left untouched.
///
/// Running this repeatedly yields the same result as running it once.
pub fn link_scenarios(scenarios: &mut BTreeMap<ScenarioId, Scenario>) {
    let mut links: Vec<(ScenarioId, ScenarioId)> = Vec::new();
    for scenario in scenarios.values() {
        for successor in scenario.numeric_successors() {
            links.push((successor.clone(), scenario.id.clone()));
        }
    }

    let mut stubs: BTreeMap<ScenarioId, Scenario> = BTreeMap::new();
    for (successor, predecessor) in links {
        match scenarios.get_mut(&successor) {
            Some(target) => {
                target.predecessors.insert(predecessor);
            }
            None => {
                stubs
                    .entry(successor.clone())
                    .or_insert_with(|| Scenario::new(successor))
                    .predecessors
                    .insert(predecessor);
            }
        }
    }

    if !stubs.is_empty() {
        debug!(count = stubs.len(), "creating stub scenarios");
    }
    scenarios.extend(stubs);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn scenario(id: &str, successors: &[&str]) -> Scenario {
        let mut s = Scenario::new(id);
        s.successors = successors.iter().map(|s| ScenarioId::from(*s)).collect();
        s
    }

    fn map(scenarios: Vec<Scenario>) -> BTreeMap<ScenarioId, Scenario> {
        scenarios.into_iter().map(|s| (s.id.clone(), s)).collect()
    }

    fn id(s: &str) -> ScenarioId {
        ScenarioId::from(s)
    }

    #[test]
    fn links_existing_successor() {
        let mut m = map(vec![scenario("1", &["2"]), scenario("2", &[])]);
        link_scenarios(&mut m);
        assert!(m[&id("2")].predecessors.contains(&id("1")));
        assert!(m[&id("1")].predecessors.is_empty());
    }

    #[test]
    fn creates_stub_for_unknown_successor() {
        let mut m = map(vec![scenario("1", &["5"])]);
        link_scenarios(&mut m);
        let stub = &m[&id("5")];
        assert_eq!(stub.predecessors.len(), 1);
        assert!(stub.predecessors.contains(&id("1")));
        assert!(stub.name.is_none());
        assert!(!stub.played);
    }

    #[test]
    fn stub_collects_all_referencing_scenarios() {
        let mut m = map(vec![scenario("1", &["9"]), scenario("4", &["9"])]);
        link_scenarios(&mut m);
        let preds: Vec<&str> = m[&id("9")].predecessors.iter().map(|p| p.as_str()).collect();
        assert_eq!(preds, ["1", "4"]);
    }

    #[test]
    fn free_text_successor_is_kept_but_not_linked() {
        let mut m = map(vec![scenario("1", &["2", "61 or 62"])]);
        link_scenarios(&mut m);
        assert_eq!(m.len(), 2);
        assert!(m[&id("1")].successors.contains(&id("61 or 62")));
    }

    fn campaign() -> impl Strategy<Value = Vec<(u8, Vec<u8>)>> {
        prop::collection::vec((0u8..40, prop::collection::vec(0u8..40, 0..4)), 0..20)
    }

    fn build(layout: &[(u8, Vec<u8>)]) -> BTreeMap<ScenarioId, Scenario> {
        let mut m = BTreeMap::new();
        for (sid, succs) in layout {
            let mut s = Scenario::new(sid.to_string());
            s.successors = succs.iter().map(|t| ScenarioId(t.to_string())).collect();
            m.insert(s.id.clone(), s);
        }
        m
    }

    proptest! {
        #[test]
        fn every_successor_knows_its_predecessor(layout in campaign()) {
            let mut m = build(&layout);
            link_scenarios(&mut m);
            for s in m.values() {
                for t in s.numeric_successors() {
                    let target = m.get(t);
                    prop_assert!(target.is_some());
                    prop_assert!(target.map_or(false, |t| t.predecessors.contains(&s.id)));
                }
            }
        }

        #[test]
        fn linking_is_idempotent(layout in campaign()) {
            let mut once = build(&layout);
            link_scenarios(&mut once);
            let mut twice = once.clone();
            link_scenarios(&mut twice);
            prop_assert_eq!(once, twice);
        }
    }
}
