// src-core/src/genetics/traits.rs

use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Le trait Genome définit l'unité entraînable manipulée par l'évolution.
/// Un clone est toujours une copie indépendante (aucun partage interne).
pub trait Genome: Clone + Send + Sync + Debug + Serialize + for<'de> Deserialize<'de> {
    /// Applique une perturbation aléatoire en place.
    fn mutate(&mut self, rate: f32, rng: &mut dyn RngCore);

    /// (Optionnel) Distance génétique entre deux génomes (pour la diversité)
    fn distance(&self, _other: &Self) -> f32 {
        0.0
    }
}

/// Ce que la simulation pilote : capteurs en entrée, actions en sortie.
pub trait Policy {
    fn act(&self, inputs: &[f32]) -> Vec<f32>;
}

/// Fabrique de génomes aléatoires (taille du réseau fixée par l'appelant).
pub type GenomeFactory<G> = Box<dyn Fn(&mut dyn RngCore) -> G + Send + Sync>;
