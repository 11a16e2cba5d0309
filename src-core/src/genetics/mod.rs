pub mod engine;
pub mod genomes;
pub mod operators;
pub mod traits;
pub mod types;

pub use engine::EvolutionEngine;
pub use genomes::NeuralNetworkGenome;
pub use traits::{Genome, GenomeFactory, Policy};
pub use types::{Champion, FitnessScore, Individual};
