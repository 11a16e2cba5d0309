use rand::{Rng, RngCore};
use rand_distr::{Distribution, Normal};

/// `Normal::new` accepte un écart-type négatif : on le filtre nous-mêmes.
fn gaussian(sigma: f32) -> Option<Normal<f32>> {
    if sigma > 0.0 && sigma.is_finite() {
        Normal::new(0.0, sigma).ok()
    } else {
        None
    }
}

/// Perturbation gaussienne de chaque gène avec la probabilité `mutation_rate`.
/// Renvoie le nombre de gènes modifiés.
pub fn gaussian_mutation(
    genes: &mut [f32],
    mutation_rate: f32,
    sigma: f32,
    rng: &mut dyn RngCore,
) -> usize {
    let Some(normal) = gaussian(sigma) else {
        tracing::warn!("Sigma de mutation invalide ({}), génome inchangé", sigma);
        return 0;
    };

    let mut mutated = 0;
    for gene in genes.iter_mut() {
        if rng.random::<f32>() < mutation_rate {
            *gene += normal.sample(rng);
            mutated += 1;
        }
    }
    mutated
}

/// Perturbe un seul gène tiré au hasard (garantit qu'une mutation a eu lieu).
pub fn perturb_one(genes: &mut [f32], sigma: f32, rng: &mut dyn RngCore) {
    if genes.is_empty() {
        return;
    }
    let Some(normal) = gaussian(sigma) else {
        return;
    };
    let idx = rng.random_range(0..genes.len());
    let mut delta: f32 = normal.sample(rng);
    // Un tirage exactement nul laisserait le clone identique à son parent
    if delta == 0.0 {
        delta = sigma;
    }
    genes[idx] += delta;
}
