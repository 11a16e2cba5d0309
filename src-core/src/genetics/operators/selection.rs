use crate::genetics::traits::Genome;
use crate::genetics::types::Individual;
use rand::RngCore;

/// Tri décroissant par fitness.
/// `sort_by` est stable : à égalité, l'ordre d'origine des slots est conservé.
/// `total_cmp` fournit un ordre total (les NaN sont écartés en amont).
pub fn sort_by_fitness<G>(individuals: &mut [Individual<G>]) {
    individuals.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
}

/// Sélection par troncature : chaque slot `i` de `[elite, len)` devient un
/// clone muté de l'élite `i % elite`, avec une fitness remise à 0.
///
/// Pour une taille paire, `i % elite == i - elite`. Pour une taille impaire,
/// le dernier slot reprend l'élite 0 au lieu d'un clone fraîchement muté.
pub fn cull_weak<G: Genome>(
    individuals: &mut [Individual<G>],
    elite: usize,
    mutation_rate: f32,
    rng: &mut dyn RngCore,
) {
    if elite == 0 {
        return;
    }
    for i in elite..individuals.len() {
        let mut child = individuals[i % elite].genome.clone();
        child.mutate(mutation_rate, rng);
        individuals[i] = Individual::new(child);
    }
}
