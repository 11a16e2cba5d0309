// FICHIER : src-core/src/training/trainer.rs

use super::clock::TrialClock;
use super::simulation::{Simulation, TrialEvent};
use super::source::GenomeSource;
use crate::genetics::traits::{Genome, GenomeFactory, Policy};
use crate::genetics::types::FitnessScore;
use crate::scenario::list::ScenarioList;
use crate::scenario::manager::{ListUpdate, ScenarioManager, Transition};
use crate::scenario::record::ScenarioRecord;
use crate::utils::config::AppConfig;
use crate::utils::error::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Demandes adressées au journal et à la persistance.
#[derive(Clone, Debug, PartialEq)]
pub enum TrainingEvent<G> {
    /// Segment validé pendant l'entraînement.
    SegmentCommitted { index: usize, line: String },
    /// Checkpoint rejoué pendant le visionnage.
    ScenarioLogged { index: usize, line: String },
    PersistBest {
        score: FitnessScore,
        list: ScenarioList<G>,
    },
    FlushLog,
    ClearLog,
}

impl<G> TrainingEvent<G> {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SegmentCommitted { .. } => "segment_committed",
            Self::ScenarioLogged { .. } => "scenario_logged",
            Self::PersistBest { .. } => "persist_best",
            Self::FlushLog => "flush_log",
            Self::ClearLog => "clear_log",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum LevelReport {
    Trained {
        net_index: usize,
        event: TrialEvent,
        score: FitnessScore,
        update: Option<ListUpdate>,
    },
    Viewed {
        reached: usize,
        segments: usize,
    },
}

/// Orchestration niveau par niveau : un essai d'entraînement, ou le rejeu
/// de la meilleure liste en visionnage.
pub struct Trainer<G: Genome> {
    manager: ScenarioManager<G>,
    source: GenomeSource<G>,
    factory: GenomeFactory<G>,
    clock: TrialClock,
    rng: StdRng,
    events: Vec<TrainingEvent<G>>,
    last_index: usize,
    replaying_loaded: bool,
}

impl<G: Genome + Policy> Trainer<G> {
    pub fn new(config: &AppConfig, factory: GenomeFactory<G>, seed: u64) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        let source = GenomeSource::from_config(
            config.scenario.genome_source,
            &config.evolution,
            &factory,
            &mut rng,
        )?;
        Ok(Self::with_parts(
            ScenarioManager::from_config(&config.scenario),
            source,
            factory,
            TrialClock::new(&config.timing),
            rng,
        ))
    }

    pub fn with_parts(
        manager: ScenarioManager<G>,
        source: GenomeSource<G>,
        factory: GenomeFactory<G>,
        clock: TrialClock,
        rng: StdRng,
    ) -> Self {
        let last_index = manager.net_index();
        Self {
            manager,
            source,
            factory,
            clock,
            rng,
            events: Vec::new(),
            last_index,
            replaying_loaded: false,
        }
    }

    /// Joue un niveau complet puis incrémente le compteur de redémarrages.
    pub fn run_level<S: Simulation + ?Sized>(&mut self, sim: &mut S) -> LevelReport {
        let report = if self.clock.begin_level() {
            self.view_best(sim)
        } else {
            self.train_once(sim)
        };
        self.clock.record_restart();
        report
    }

    fn train_once<S: Simulation + ?Sized>(&mut self, sim: &mut S) -> LevelReport {
        self.manager.begin_trial();

        let net_index = self.manager.net_index();
        if net_index != self.last_index {
            if let Err(e) = self.source.reseed(&self.factory, &mut self.rng) {
                tracing::warn!("Réinitialisation de la population impossible : {}", e);
            }
            self.last_index = net_index;
        }

        let genome = self.source.next_genome(&self.factory, &mut self.rng);

        sim.reset();
        if let Some(resume) = self.manager.resume_point() {
            sim.restore(resume.pose(), &self.manager.collected_checkpoints());
        }

        let report = sim.run_trial(&genome, &mut self.clock);
        self.source.feedback(report.score);

        let update = match &report.event {
            // Timeout : aucune liste touchée, les compteurs ont déjà avancé
            TrialEvent::TimedOut => None,
            TrialEvent::Reached(checkpoint) => {
                let record =
                    ScenarioRecord::new(genome, checkpoint.clone(), report.score, report.pose);
                self.fold(record)
            }
        };

        tracing::debug!(
            "Essai {} segment {} : {:?} ({:.2})",
            self.manager.total_trials(),
            net_index,
            report.event,
            report.score
        );

        LevelReport::Trained {
            net_index,
            event: report.event,
            score: report.score,
            update,
        }
    }

    fn fold(&mut self, record: ScenarioRecord<G>) -> Option<ListUpdate> {
        let line = record.log_line();
        let update = match self.manager.update_list(record) {
            Ok(update) => update,
            Err(e) => {
                tracing::warn!("Essai ignoré : {}", e);
                return None;
            }
        };

        if let Transition::Advanced { index } = update.transition {
            self.events.push(TrainingEvent::SegmentCommitted {
                index: index - 1,
                line,
            });
        }

        if update.best_improved {
            if let Some(score) = self.manager.best_score() {
                self.events.push(TrainingEvent::PersistBest {
                    score,
                    list: self.manager.best_list().snapshot(),
                });
            }
        }
        Some(update)
    }

    /// Rejoue la meilleure liste : un génome par segment, enchaînés sur le même niveau.
    fn view_best<S: Simulation + ?Sized>(&mut self, sim: &mut S) -> LevelReport {
        sim.reset();
        let segments = self.manager.best_count();

        if segments == 0 {
            let genome = (self.factory)(&mut self.rng);
            sim.run_trial(&genome, &mut self.clock);
            self.replaying_loaded = false;
            return LevelReport::Viewed {
                reached: 0,
                segments,
            };
        }

        let mut reached = 0;
        for index in 0..segments {
            let Some(genome) = self.manager.best_genome(index) else {
                break;
            };
            let report = sim.run_trial(genome, &mut self.clock);
            let Some(checkpoint) = report.checkpoint() else {
                break;
            };

            reached += 1;
            if !self.replaying_loaded {
                let line =
                    ScenarioRecord::new((), checkpoint.clone(), report.score, report.pose).log_line();
                self.events
                    .push(TrainingEvent::ScenarioLogged { index, line });
            }
            if checkpoint.is_terminal() {
                break;
            }
        }

        if !self.replaying_loaded {
            if reached > 0 {
                self.events.push(TrainingEvent::FlushLog);
            }
            self.events.push(TrainingEvent::ClearLog);
        }
        self.replaying_loaded = false;

        tracing::info!("Visionnage : {}/{} segments rejoués", reached, segments);
        LevelReport::Viewed { reached, segments }
    }

    /// Installe une meilleure liste persistée ; le prochain niveau la rejoue.
    pub fn load_best(&mut self, list: ScenarioList<G>) {
        self.manager.adopt_best(list);
        self.last_index = self.manager.net_index();
        self.clock.request_view();
        self.replaying_loaded = true;
    }

    pub fn drain_events(&mut self) -> Vec<TrainingEvent<G>> {
        std::mem::take(&mut self.events)
    }

    pub fn manager(&self) -> &ScenarioManager<G> {
        &self.manager
    }

    pub fn clock(&self) -> &TrialClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut TrialClock {
        &mut self.clock
    }

    pub fn source(&self) -> &GenomeSource<G> {
        &self.source
    }

    /// Tableau d'état : checkpoints, fitness, évaluations du segment actif.
    pub fn status_lines(&self) -> Vec<String> {
        let mut names = String::new();
        let mut scores = String::new();
        let mut evals = String::new();

        if self.clock.is_viewing() {
            for index in 0..self.manager.best_count() {
                names.push_str(&format!("{}\t", self.manager.best_checkpoint_name(index).unwrap_or("-")));
                scores.push_str(&format!("{:.2}\t", self.manager.best_fitness(index).unwrap_or(0.0)));
            }
            return vec!["Visionnage des meilleurs réseaux".to_string(), names, scores];
        }

        for row in self.manager.segments() {
            let name = row.checkpoint.as_deref().unwrap_or("...");
            let score = row.fitness.map(|f| format!("{:.2}", f)).unwrap_or_else(|| "-".to_string());
            if row.active {
                names.push_str(&format!("[{}]\t", name));
                scores.push_str(&format!("[{}]\t", score));
                evals.push_str(&format!(
                    "{}/{}\t",
                    self.manager.evaluations(),
                    self.manager.max_evaluations()
                ));
            } else {
                names.push_str(&format!("{}\t", name));
                scores.push_str(&format!("{}\t", score));
                evals.push('\t');
            }
        }
        vec![self.clock.status_line(), names, scores, evals]
    }
}
