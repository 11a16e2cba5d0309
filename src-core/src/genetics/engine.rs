use super::operators::selection;
use super::traits::Genome;
use super::types::{Champion, FitnessScore, Individual};
use crate::utils::config::EvolutionConfig;
use crate::utils::error::{AppError, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Moteur de population à élitisme : la moitié haute survit intacte,
/// la moitié basse est remplacée par des clones mutés.
///
/// Chaque slot est évalué `evaluation_repetitions` fois d'affilée ; sa fitness
/// est la moyenne de ces essais. Les élites ne sont pas ré-évaluées : leur
/// fitness de la passe précédente reste la référence.
#[derive(Debug)]
pub struct EvolutionEngine<G: Genome> {
    population: Vec<Individual<G>>,
    elite: usize,
    evaluation_repetitions: usize,
    mutation_rate: f32,
    eval_index: usize,
    pop_index: usize,
    generation: usize,
    best: Option<Champion<G>>,
    rng: StdRng,
}

impl<G: Genome> EvolutionEngine<G> {
    pub fn new(config: &EvolutionConfig, genomes: Vec<G>, seed: u64) -> Result<Self> {
        if genomes.len() < 2 {
            return Err(AppError::Config(format!(
                "Population trop petite : {} (minimum 2)",
                genomes.len()
            )));
        }
        if config.evaluation_repetitions == 0 {
            return Err(AppError::Config(
                "evaluation_repetitions doit être >= 1".to_string(),
            ));
        }

        let population: Vec<Individual<G>> = genomes.into_iter().map(Individual::new).collect();
        let elite = population.len() / 2;

        Ok(Self {
            population,
            elite,
            evaluation_repetitions: config.evaluation_repetitions,
            mutation_rate: config.mutation_rate,
            eval_index: 0,
            pop_index: 0,
            generation: 0,
            best: None,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Génome du slot actif ; l'index reste toujours dans `[0, size)`.
    pub fn current_genome(&self) -> &G {
        &self.population[self.pop_index].genome
    }

    pub fn submit_score(&mut self, score: FitnessScore) {
        let score = if score.is_finite() {
            score
        } else {
            tracing::warn!("Score non fini ({}) ramené à 0 pour le slot {}", score, self.pop_index);
            0.0
        };

        // Le meilleur global se juge sur le score brut, avant moyenne
        let is_new_best = self.best.as_ref().is_none_or(|b| score > b.score);
        if is_new_best {
            self.best = Some(Champion {
                genome: self.population[self.pop_index].genome.clone(),
                score,
            });
            tracing::debug!("Nouveau meilleur génome global : {:.3}", score);
        }

        let repetitions = self.evaluation_repetitions;
        let slot = &mut self.population[self.pop_index];
        if self.eval_index == 0 {
            slot.fitness = 0.0;
        }
        slot.fitness += score;
        self.eval_index += 1;

        if self.eval_index >= repetitions {
            slot.fitness /= repetitions as f32;
            self.eval_index = 0;
            self.pop_index += 1;

            if self.pop_index >= self.population.len() {
                self.next_generation();
            }
        }
    }

    /// Fin de passe : tri, remplacement des faibles, reprise après les élites.
    fn next_generation(&mut self) {
        selection::sort_by_fitness(&mut self.population);
        selection::cull_weak(
            &mut self.population,
            self.elite,
            self.mutation_rate,
            &mut self.rng,
        );
        self.generation += 1;
        self.pop_index = self.elite;
        tracing::debug!(
            "Génération {} : meilleure fitness de passe {:.3}",
            self.generation,
            self.population[0].fitness
        );
    }

    /// Remplace toute la population (même taille) en conservant le meilleur global.
    pub fn reseed(&mut self, genomes: Vec<G>) -> Result<()> {
        if genomes.len() != self.population.len() {
            return Err(AppError::Config(format!(
                "Taille de population incohérente : {} au lieu de {}",
                genomes.len(),
                self.population.len()
            )));
        }
        self.population = genomes.into_iter().map(Individual::new).collect();
        self.eval_index = 0;
        self.pop_index = 0;
        Ok(())
    }

    pub fn best_genome(&self) -> Option<&G> {
        self.best.as_ref().map(|b| &b.genome)
    }

    pub fn best_score(&self) -> Option<FitnessScore> {
        self.best.as_ref().map(|b| b.score)
    }

    pub fn fitness(&self, index: usize) -> Option<FitnessScore> {
        self.population.get(index).map(|ind| ind.fitness)
    }

    pub fn individual(&self, index: usize) -> Option<&Individual<G>> {
        self.population.get(index)
    }

    pub fn active_index(&self) -> usize {
        self.pop_index
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn elite_count(&self) -> usize {
        self.elite
    }

    pub fn population_size(&self) -> usize {
        self.population.len()
    }
}
