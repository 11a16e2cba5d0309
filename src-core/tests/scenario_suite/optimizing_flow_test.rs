// FICHIER : src-core/tests/scenario_suite/optimizing_flow_test.rs

use crate::common::{coin, goal};
use multinet::scenario::{
    ListUpdate, OptimizingLimits, Phase, ScenarioManager, TerminalScoreComparator, Transition,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn manager(limits: OptimizingLimits) -> ScenarioManager<u32> {
    ScenarioManager::optimizing(limits, Box::new(TerminalScoreComparator))
}

/// Vérifie les invariants après chaque opération.
fn check(m: &ScenarioManager<u32>, limits: &OptimizingLimits) {
    assert!(m.net_index() <= m.count(), "curseur {} > {}", m.net_index(), m.count());
    assert!(m.optimizing_attempts() <= limits.max_optimizing_attempts);
    if m.best_count() > 0 {
        assert!(m.best_list().is_complete());
    }
    if m.phase() == Some(Phase::Optimizing) {
        assert!(m.best_count() > 0);
    }
}

#[test]
fn test_long_random_run_preserves_invariants() {
    let limits = OptimizingLimits {
        max_discovering_evaluations: 6,
        max_optimizing_evaluations: 3,
        max_optimizing_attempts: 2,
    };
    let mut m = manager(limits);
    let mut rng = StdRng::seed_from_u64(2024);
    let mut best_score = f32::NEG_INFINITY;
    let mut saw = [false; 3];

    for trial in 0..5_000u32 {
        m.begin_trial();
        check(&m, &limits);

        let roll: f32 = rng.random();
        let score: f32 = rng.random_range(-5.0..20.0);
        if roll < 0.4 {
            continue; // timeout : aucune mise à jour
        }

        let record = if roll < 0.85 {
            coin(&format!("c{}", m.net_index()), score, trial)
        } else {
            goal(score, trial)
        };

        let before = m.best_list().clone();
        let ListUpdate {
            best_improved,
            transition,
        } = m.update_list(record).unwrap();
        check(&m, &limits);

        match transition {
            Transition::Advanced { index } => {
                assert_eq!(m.count(), index);
                assert_eq!(m.net_index(), index);
                assert_eq!(m.phase(), Some(Phase::Discovering));
                saw[0] = true;
            }
            Transition::RolledBack { anchor, attempt } => {
                assert_eq!(m.net_index(), anchor + 1);
                assert_eq!(m.count(), anchor + 1);
                assert!(attempt >= 1 && attempt <= limits.max_optimizing_attempts);
                saw[1] = true;
            }
            Transition::RestartedFromBest => {
                assert_eq!(m.net_index(), 0);
                assert_eq!(m.scenario_list(), m.best_list());
                saw[2] = true;
            }
            Transition::Recorded => panic!("réservé au mode linéaire"),
        }

        if best_improved {
            let new_best = m.best_score().unwrap();
            assert!(new_best > best_score);
            best_score = new_best;
        } else {
            assert_eq!(m.best_list(), &before, "la meilleure liste est intacte");
        }
    }

    assert!(saw.iter().all(|s| *s), "toutes les transitions ont été exercées");
    assert_eq!(m.total_trials(), 5_000);
}

#[test]
fn test_discovery_then_optimization_cycle() {
    let limits = OptimizingLimits {
        max_discovering_evaluations: 2,
        max_optimizing_evaluations: 1,
        max_optimizing_attempts: 1,
    };
    let mut m = manager(limits);

    // Découverte : c0, c1, objectif
    m.begin_trial();
    m.update_list(coin("c0", 1.0, 1)).unwrap();
    m.begin_trial();
    m.update_list(coin("c1", 2.0, 2)).unwrap();
    m.begin_trial();
    let update = m.update_list(goal(10.0, 3)).unwrap();
    assert!(update.best_improved);
    assert_eq!(m.phase(), Some(Phase::Optimizing));

    // Optimisation du segment 1 : un nouveau c1 puis une victoire moins bonne
    m.begin_trial();
    m.begin_trial();
    assert_eq!(m.net_index(), 1);
    m.update_list(coin("c1", 2.5, 4)).unwrap();
    assert_eq!(m.anchor(), Some(1));
    let update = m.update_list(goal(8.0, 5)).unwrap();
    assert_eq!(update.transition, Transition::RolledBack { anchor: 1, attempt: 1 });

    // Seconde tentative : meilleure victoire, la meilleure liste intègre le nouveau c1
    let update = m.update_list(goal(12.0, 6)).unwrap();
    assert!(update.best_improved);
    assert_eq!(update.transition, Transition::RestartedFromBest);
    assert_eq!(m.best_genome(1), Some(&4));
    assert_eq!(m.best_score(), Some(12.0));
    assert_eq!(m.optimizing_attempts(), 0);

    let names: Vec<&str> = (0..m.best_count())
        .filter_map(|i| m.best_checkpoint_name(i))
        .collect();
    assert_eq!(names, vec!["c0", "c1", "WinTrigger"]);
}
