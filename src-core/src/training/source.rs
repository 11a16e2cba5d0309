// FICHIER : src-core/src/training/source.rs

use crate::genetics::engine::EvolutionEngine;
use crate::genetics::genomes::NeuralNetworkGenome;
use crate::genetics::traits::{Genome, GenomeFactory};
use crate::genetics::types::FitnessScore;
use crate::utils::config::{EvolutionConfig, GenomeSourceKind};
use crate::utils::error::Result;
use rand::rngs::StdRng;
use rand::RngCore;

/// Origine du génome essayé à chaque essai d'entraînement.
#[derive(Debug)]
pub enum GenomeSource<G: Genome> {
    /// Un génome aléatoire neuf par essai.
    Random,
    /// Le slot actif d'une population, réalimentée quand le segment change.
    Evolved(EvolutionEngine<G>),
}

impl<G: Genome> GenomeSource<G> {
    pub fn from_config(
        kind: GenomeSourceKind,
        config: &EvolutionConfig,
        factory: &GenomeFactory<G>,
        rng: &mut StdRng,
    ) -> Result<Self> {
        match kind {
            GenomeSourceKind::Random => Ok(GenomeSource::Random),
            GenomeSourceKind::Evolved => {
                let genomes = spawn(factory, config.population_size, rng);
                let engine = EvolutionEngine::new(config, genomes, rng.next_u64())?;
                Ok(GenomeSource::Evolved(engine))
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GenomeSource::Random => "random",
            GenomeSource::Evolved(_) => "evolved",
        }
    }

    pub fn next_genome(&self, factory: &GenomeFactory<G>, rng: &mut StdRng) -> G {
        match self {
            GenomeSource::Random => factory(rng),
            GenomeSource::Evolved(engine) => engine.current_genome().clone(),
        }
    }

    /// Retour du score d'essai (timeouts compris).
    pub fn feedback(&mut self, score: FitnessScore) {
        if let GenomeSource::Evolved(engine) = self {
            engine.submit_score(score);
        }
    }

    /// Nouvelle population aléatoire pour un nouveau segment.
    pub fn reseed(&mut self, factory: &GenomeFactory<G>, rng: &mut StdRng) -> Result<()> {
        if let GenomeSource::Evolved(engine) = self {
            let genomes = spawn(factory, engine.population_size(), rng);
            engine.reseed(genomes)?;
            tracing::debug!("Population réinitialisée ({} génomes)", engine.population_size());
        }
        Ok(())
    }

    pub fn engine(&self) -> Option<&EvolutionEngine<G>> {
        match self {
            GenomeSource::Evolved(engine) => Some(engine),
            GenomeSource::Random => None,
        }
    }
}

fn spawn<G>(factory: &GenomeFactory<G>, count: usize, rng: &mut StdRng) -> Vec<G> {
    (0..count).map(|_| factory(rng)).collect()
}

/// Fabrique de réseaux `inputs -> hidden.. -> outputs` initialisés au hasard.
pub fn neural_factory(
    inputs: usize,
    hidden: &[usize],
    outputs: usize,
) -> GenomeFactory<NeuralNetworkGenome> {
    let layers = NeuralNetworkGenome::topology(inputs, hidden, outputs);
    Box::new(move |rng: &mut dyn RngCore| NeuralNetworkGenome::new_random(layers.clone(), rng))
}

// --- Tests Unitaires ---
#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn config() -> EvolutionConfig {
        EvolutionConfig {
            population_size: 4,
            ..Default::default()
        }
    }

    #[test]
    fn test_random_source_draws_fresh_genomes() {
        let factory = neural_factory(8, &[4], 2);
        let mut rng = StdRng::seed_from_u64(1);
        let mut source =
            GenomeSource::from_config(GenomeSourceKind::Random, &config(), &factory, &mut rng)
                .unwrap();
        let a = source.next_genome(&factory, &mut rng);
        let b = source.next_genome(&factory, &mut rng);
        assert_ne!(a, b);
        source.feedback(1.0);
        assert!(source.engine().is_none());
        assert_eq!(source.name(), "random");
    }

    #[test]
    fn test_evolved_source_follows_engine_and_reseeds() {
        let factory = neural_factory(8, &[4], 2);
        let mut rng = StdRng::seed_from_u64(2);
        let mut source =
            GenomeSource::from_config(GenomeSourceKind::Evolved, &config(), &factory, &mut rng)
                .unwrap();

        let first = source.next_genome(&factory, &mut rng);
        assert_eq!(source.next_genome(&factory, &mut rng), first);

        source.feedback(3.0);
        assert_eq!(source.engine().map(|e| e.active_index()), Some(1));
        assert_ne!(source.next_genome(&factory, &mut rng), first);

        source.reseed(&factory, &mut rng).unwrap();
        let engine = source.engine().unwrap();
        assert_eq!(engine.active_index(), 0);
        assert_eq!(engine.best_score(), Some(3.0), "le meilleur global survit");
    }
}
