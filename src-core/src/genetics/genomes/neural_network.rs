use crate::genetics::operators::mutation;
use crate::genetics::traits::{Genome, Policy};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

/// Écart-type de la perturbation gaussienne appliquée aux poids.
pub const MUTATION_SIGMA: f32 = 0.1;

/// Perceptron multicouche (tanh) encodé comme un vecteur plat de poids.
/// Pour chaque neurone de sortie d'une couche : `n_in` poids puis un biais.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NeuralNetworkGenome {
    pub weights: Vec<f32>,
    pub layer_sizes: Vec<usize>,
}

impl NeuralNetworkGenome {
    pub fn new_random(layer_sizes: Vec<usize>, rng: &mut dyn RngCore) -> Self {
        let total_weights = Self::calculate_total_weights(&layer_sizes);
        let weights: Vec<f32> = (0..total_weights)
            .map(|_| rng.random_range(-1.0..1.0))
            .collect();

        Self {
            weights,
            layer_sizes,
        }
    }

    /// Construit la topologie `[inputs, hidden.., outputs]`.
    pub fn topology(inputs: usize, hidden: &[usize], outputs: usize) -> Vec<usize> {
        let mut sizes = Vec::with_capacity(hidden.len() + 2);
        sizes.push(inputs);
        sizes.extend_from_slice(hidden);
        sizes.push(outputs);
        sizes
    }

    pub fn calculate_total_weights(sizes: &[usize]) -> usize {
        sizes
            .windows(2)
            .map(|pair| (pair[0] * pair[1]) + pair[1])
            .sum()
    }

    pub fn output_size(&self) -> usize {
        self.layer_sizes.last().copied().unwrap_or(0)
    }

    /// Propagation avant. Les entrées manquantes valent 0, les entrées en trop sont ignorées.
    pub fn predict(&self, inputs: &[f32]) -> Vec<f32> {
        let Some(&n_first) = self.layer_sizes.first() else {
            return Vec::new();
        };

        let mut current_activations: Vec<f32> = (0..n_first)
            .map(|i| inputs.get(i).copied().unwrap_or(0.0))
            .collect();
        let mut weight_idx = 0;

        for pair in self.layer_sizes.windows(2) {
            let (n_in, n_out) = (pair[0], pair[1]);
            let mut next_activations = vec![0.0; n_out];

            for activation in next_activations.iter_mut() {
                let mut sum = 0.0;
                for &input_val in current_activations.iter().take(n_in) {
                    sum += input_val * self.weights.get(weight_idx).copied().unwrap_or(0.0);
                    weight_idx += 1;
                }
                sum += self.weights.get(weight_idx).copied().unwrap_or(0.0);
                weight_idx += 1;
                *activation = sum.tanh();
            }
            current_activations = next_activations;
        }

        current_activations
    }
}

impl Genome for NeuralNetworkGenome {
    fn mutate(&mut self, rate: f32, rng: &mut dyn RngCore) {
        let mutated = mutation::gaussian_mutation(&mut self.weights, rate, MUTATION_SIGMA, rng);
        if mutated == 0 {
            // Un clone muté doit toujours différer de son parent
            mutation::perturb_one(&mut self.weights, MUTATION_SIGMA, rng);
        }
    }

    fn distance(&self, other: &Self) -> f32 {
        self.weights
            .iter()
            .zip(other.weights.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f32>()
            .sqrt()
    }
}

impl Policy for NeuralNetworkGenome {
    fn act(&self, inputs: &[f32]) -> Vec<f32> {
        self.predict(inputs)
    }
}
