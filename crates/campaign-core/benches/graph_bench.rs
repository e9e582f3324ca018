use campaign_core::{
    build_full_tree, build_scenario_tree, Achievement, AchievementStatus, AchievementType,
    LabelMode, Scenario, ScenarioId, ScenarioManager,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// A campaign where scenario `i` unlocks `2i` and `2i + 1`, and every tenth
/// scenario requires a key granted by the one before it.
fn build_campaign(n: usize) -> Vec<Scenario> {
    let mut scenarios = Vec::with_capacity(n);
    for i in 1..=n {
        let mut s = Scenario::new(i.to_string());
        s.name = Some(format!("Scenario {i}"));
        s.successors = [2 * i, 2 * i + 1]
            .into_iter()
            .map(|t| ScenarioId(t.to_string()))
            .collect();
        let key = |k: usize| {
            Achievement::new(format!("Key {k}"), AchievementType::Group, AchievementStatus::Closed)
        };
        if i % 10 == 9 {
            s.achievements.push(key((i + 1) / 10));
        }
        if i % 10 == 0 {
            s.requirements.push(key(i / 10));
        }
        s.played = i % 3 == 0;
        scenarios.push(s);
    }
    scenarios
}

fn bench_graph(c: &mut Criterion) {
    let scenarios = build_campaign(500);
    c.bench_function("link 500 scenarios", |b| {
        b.iter(|| black_box(ScenarioManager::new(scenarios.clone(), vec![])))
    });

    let manager = ScenarioManager::new(scenarios, vec![]);
    let root = ScenarioId::from("480");
    c.bench_function("full tree 500 scenarios", |b| {
        b.iter(|| black_box(build_full_tree(&manager, LabelMode::Compact)))
    });
    c.bench_function("scenario tree unbounded", |b| {
        b.iter(|| black_box(build_scenario_tree(&manager, &root, None, LabelMode::Full)))
    });
}

criterion_group!(benches, bench_graph);
criterion_main!(benches);
