use serde::{Deserialize, Serialize};

/// Score brut d'un essai, ou moyenne de plusieurs essais pour un slot de population.
pub type FitnessScore = f32;

/// Un individu dans la population : un génome + sa performance.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Individual<G> {
    pub genome: G,
    pub fitness: FitnessScore,
}

impl<G> Individual<G> {
    pub fn new(genome: G) -> Self {
        Self {
            genome,
            fitness: 0.0,
        }
    }
}

/// Meilleur génome jamais observé, indépendant de la population courante.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Champion<G> {
    pub genome: G,
    /// Score brut (avant moyenne) qui l'a fait élire.
    pub score: FitnessScore,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_individual_starts_at_zero() {
        let ind = Individual::new(vec![1.0_f32, 2.0]);
        assert_eq!(ind.fitness, 0.0);
        assert_eq!(ind.genome.len(), 2);
    }
}
