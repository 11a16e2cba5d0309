// FICHIER : src-core/tests/scenario_suite/population_test.rs

use multinet::genetics::{EvolutionEngine, Genome, NeuralNetworkGenome};
use multinet::training::neural_factory;
use multinet::utils::config::EvolutionConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn population(size: usize, seed: u64) -> Vec<NeuralNetworkGenome> {
    let factory = neural_factory(8, &[6], 2);
    let mut rng = StdRng::seed_from_u64(seed);
    (0..size).map(|_| factory(&mut rng)).collect()
}

#[test]
fn test_full_pass_keeps_elites_and_clones_them() {
    let config = EvolutionConfig {
        population_size: 10,
        ..Default::default()
    };
    let genomes = population(10, 11);
    let mut engine = EvolutionEngine::new(&config, genomes.clone(), 5).unwrap();

    let scores = [1.0, 5.0, 3.0, 8.0, 2.0, 9.0, 4.0, 7.0, 6.0, 0.0];
    for score in scores {
        engine.submit_score(score);
    }

    assert_eq!(engine.generation(), 1);
    assert_eq!(engine.active_index(), 5);
    assert_eq!(engine.fitness(0), Some(9.0));

    // Élites triées : slots d'origine 5, 3, 7, 8, 1
    let origins = [5, 3, 7, 8, 1];
    for (slot, origin) in origins.iter().enumerate() {
        let elite = engine.individual(slot).unwrap();
        assert_eq!(elite.genome, genomes[*origin]);

        let clone = engine.individual(slot + 5).unwrap();
        assert_eq!(clone.fitness, 0.0);
        assert_ne!(clone.genome, elite.genome, "le clone est muté");
        assert_eq!(clone.genome.layer_sizes, elite.genome.layer_sizes);
        assert!(clone.genome.distance(&elite.genome) > 0.0);
    }

    assert_eq!(engine.best_score(), Some(9.0));
    assert_eq!(engine.best_genome(), Some(&genomes[5]));
}

#[test]
fn test_repetitions_are_averaged_and_best_is_monotonic() {
    let config = EvolutionConfig {
        population_size: 4,
        evaluation_repetitions: 3,
        ..Default::default()
    };
    let mut engine = EvolutionEngine::new(&config, population(4, 3), 9).unwrap();

    let mut best_so_far = f32::NEG_INFINITY;
    let slot_scores = [[3.0, 6.0, 9.0], [1.0, 1.0, 1.0], [-2.0, 0.0, 2.0], [4.0, 4.0, 10.0]];
    for (slot, scores) in slot_scores.iter().enumerate() {
        for &score in scores {
            assert_eq!(engine.active_index(), slot);
            engine.submit_score(score);
            let best = engine.best_score().unwrap();
            assert!(best >= best_so_far);
            best_so_far = best;
        }
    }

    // Tri : 6.0 (slot 0), 6.0 (slot 3), 1.0, 0.0 ; l'égalité garde l'ordre d'origine
    assert_eq!(engine.generation(), 1);
    assert_eq!(engine.fitness(0), Some(6.0));
    assert_eq!(engine.fitness(1), Some(6.0));
    assert_eq!(engine.best_score(), Some(10.0));

    // Les élites ne sont pas rejouées : la passe suivante commence au slot 2
    assert_eq!(engine.active_index(), 2);
}
