// FICHIER : src-core/tests/scenario_suite/training_flow_test.rs

use crate::common::setup_test_env;
use multinet::genetics::NeuralNetworkGenome;
use multinet::storage::{ScenarioStore, StorageConfig, TrainingRecorder};
use multinet::training::{
    neural_factory, CourseSimulation, LevelReport, Simulation, Trainer, TrainingEvent,
};
use multinet::utils::config::{AppConfig, GenomeSourceKind, SearchModeKind};

fn trainer(config: &AppConfig, seed: u64) -> (Trainer<NeuralNetworkGenome>, CourseSimulation) {
    let sim = CourseSimulation::standard();
    let factory = neural_factory(
        sim.sensor_count(),
        &config.evolution.hidden_layers,
        sim.actuator_count(),
    );
    let trainer = Trainer::new(config, factory, seed).expect("trainer valide");
    (trainer, sim)
}

#[tokio::test]
async fn test_training_run_persists_every_improvement() {
    let mut env = setup_test_env();
    env.config.scenario.genome_source = GenomeSourceKind::Evolved;
    env.config.scenario.max_discovering_evaluations = 40;
    env.config.scenario.max_optimizing_evaluations = 10;
    env.config.evolution.population_size = 6;
    env.config.timing.timeout_eval = 2.0;
    env.config.timing.timeout_view = 4.0;

    let (mut trainer, mut sim) = trainer(&env.config, 17);
    let mut recorder = TrainingRecorder::new(StorageConfig::from_app(&env.config));

    let mut improvements = 0;
    let mut views = 0;
    for _ in 0..300 {
        if let LevelReport::Viewed { .. } = trainer.run_level(&mut sim) {
            views += 1;
        }
        let events = trainer.drain_events();
        improvements += events
            .iter()
            .filter(|e| matches!(e, TrainingEvent::PersistBest { .. }))
            .count();
        assert_eq!(recorder.record_all(events).await, 0, "enregistrement");

        let m = trainer.manager();
        assert!(m.net_index() <= m.count());
    }

    // view_every = 20 : niveaux 20, 40, ... 280
    assert_eq!(views, 14);
    assert_eq!(trainer.manager().total_trials(), 286);
    assert_eq!(recorder.saved().len(), improvements);

    if let Some(score) = trainer.manager().best_score() {
        let store = ScenarioStore::new(StorageConfig::from_app(&env.config));
        let latest = store.latest().await.unwrap().expect("sauvegarde présente");
        let list = store.load_best::<NeuralNetworkGenome>(&latest).await.unwrap();
        assert!(list.is_complete());
        assert!(list.terminal_score().unwrap() <= score);
    }
}

#[test]
fn test_same_seed_same_run() {
    let mut env = setup_test_env();
    env.config.scenario.mode = SearchModeKind::Linear;
    env.config.timing.timeout_eval = 1.0;

    let (mut a, mut sim_a) = trainer(&env.config, 99);
    let (mut b, mut sim_b) = trainer(&env.config, 99);
    for _ in 0..60 {
        assert_eq!(a.run_level(&mut sim_a), b.run_level(&mut sim_b));
    }
    assert_eq!(a.manager().net_index(), b.manager().net_index());
    assert_eq!(a.manager().best_list(), b.manager().best_list());
    assert_eq!(a.drain_events(), b.drain_events());
}

#[test]
fn test_viewing_without_best_runs_fresh_genome() {
    let env = setup_test_env();
    let (mut trainer, mut sim) = trainer(&env.config, 5);
    assert_eq!(trainer.manager().best_count(), 0);

    trainer.clock_mut().request_view();
    let report = trainer.run_level(&mut sim);
    assert_eq!(
        report,
        LevelReport::Viewed {
            reached: 0,
            segments: 0
        }
    );
    assert!(trainer.drain_events().is_empty());
    assert_eq!(trainer.manager().total_trials(), 0, "un visionnage n'est pas un essai");
}
