// FICHIER : src-core/src/scenario/manager.rs

use super::comparator::{build_comparator, ListComparator, ListScore};
use super::list::ScenarioList;
use super::record::{Checkpoint, ScenarioRecord};
use crate::genetics::types::FitnessScore;
use crate::utils::config::{ScenarioConfig, SearchModeKind};
use crate::utils::error::{AppError, Result};
use serde::{Deserialize, Serialize};

/// Phase de la recherche optimisante.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Construit de nouvelles tentatives complètes, segment après segment.
    Discovering,
    /// Rejoue un à un les segments de la meilleure liste pour les améliorer.
    Optimizing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OptimizingLimits {
    pub max_discovering_evaluations: u32,
    pub max_optimizing_evaluations: u32,
    pub max_optimizing_attempts: u32,
}

impl Default for OptimizingLimits {
    fn default() -> Self {
        Self {
            max_discovering_evaluations: 1500,
            max_optimizing_evaluations: 500,
            max_optimizing_attempts: 5,
        }
    }
}

/// Stratégie de recherche ; les champs propres à chaque variante vivent dans la variante.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchMode {
    /// Avance segment par segment, sans phase ni retour arrière.
    Linear { max_evaluations: u32 },
    Optimizing {
        phase: Phase,
        /// Dernier segment amélioré pendant l'optimisation (point de retour arrière).
        anchor: Option<usize>,
        attempts: u32,
        limits: OptimizingLimits,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Checkpoint intermédiaire validé, passage au segment `index`.
    Advanced { index: usize },
    /// Victoire comparée à la meilleure liste, curseurs inchangés.
    Recorded,
    /// Reprise depuis le segment qui suit `anchor`.
    RolledBack { anchor: usize, attempt: u32 },
    /// Reprise de l'optimisation depuis le début de la meilleure liste.
    RestartedFromBest,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListUpdate {
    pub best_improved: bool,
    pub transition: Transition,
}

/// Vue en lecture seule d'un segment, pour l'affichage.
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentView {
    pub index: usize,
    /// `None` pour le segment en cours qui n'a encore aucun checkpoint.
    pub checkpoint: Option<String>,
    pub fitness: Option<FitnessScore>,
    pub active: bool,
}

/// Pilote un génome actif à travers les segments successifs de la tâche et
/// conserve la meilleure tentative complète.
///
/// Invariants :
/// - `net_index <= scenario_list.len()` ;
/// - après un checkpoint intermédiaire, `scenario_list.len() == net_index` ;
/// - `best_list` n'est remplacée que par une copie d'une candidate strictement supérieure.
#[derive(Debug)]
pub struct ScenarioManager<G> {
    scenario_list: ScenarioList<G>,
    best_list: ScenarioList<G>,
    net_index: usize,
    evaluations: u32,
    total_trials: u64,
    mode: SearchMode,
    comparator: Box<dyn ListComparator>,
}

impl<G: Clone> ScenarioManager<G> {
    pub fn linear(max_evaluations: u32, comparator: Box<dyn ListComparator>) -> Self {
        Self::with_mode(SearchMode::Linear { max_evaluations }, comparator)
    }

    pub fn optimizing(limits: OptimizingLimits, comparator: Box<dyn ListComparator>) -> Self {
        Self::with_mode(
            SearchMode::Optimizing {
                phase: Phase::Discovering,
                anchor: None,
                attempts: 0,
                limits,
            },
            comparator,
        )
    }

    pub fn from_config(config: &ScenarioConfig) -> Self {
        let comparator = build_comparator(config.comparator);
        match config.mode {
            SearchModeKind::Linear => Self::linear(config.max_evaluations, comparator),
            SearchModeKind::Optimizing => Self::optimizing(
                OptimizingLimits {
                    max_discovering_evaluations: config.max_discovering_evaluations,
                    max_optimizing_evaluations: config.max_optimizing_evaluations,
                    max_optimizing_attempts: config.max_optimizing_attempts,
                },
                comparator,
            ),
        }
    }

    fn with_mode(mode: SearchMode, comparator: Box<dyn ListComparator>) -> Self {
        Self {
            scenario_list: ScenarioList::new(),
            best_list: ScenarioList::new(),
            net_index: 0,
            evaluations: 0,
            total_trials: 0,
            mode,
            comparator,
        }
    }

    /// Début d'essai. Le plafond est testé AVANT l'incrément : avec un plafond
    /// `cap`, la transition se déclenche au `cap + 1`-ième appel.
    pub fn begin_trial(&mut self) {
        self.total_trials += 1;

        let (phase, anchor, attempts, limits) = match &mut self.mode {
            SearchMode::Linear { .. } => {
                self.evaluations += 1;
                return;
            }
            SearchMode::Optimizing {
                phase,
                anchor,
                attempts,
                limits,
            } => (phase, anchor, attempts, *limits),
        };

        match *phase {
            Phase::Discovering => {
                if self.evaluations >= limits.max_discovering_evaluations {
                    tracing::info!(
                        "Plafond de découverte atteint au segment {} : reprise depuis la meilleure liste",
                        self.net_index
                    );
                    self.scenario_list = self.best_list.snapshot();
                    self.net_index = 0;
                    self.evaluations = 0;
                    *anchor = None;
                    *attempts = 0;

                    // Rien à optimiser tant qu'aucune tentative complète n'existe
                    if !self.best_list.is_empty() {
                        *phase = Phase::Optimizing;
                    }
                } else {
                    self.evaluations += 1;
                }
            }
            Phase::Optimizing => {
                if self.evaluations >= limits.max_optimizing_evaluations {
                    if self.net_index + 1 >= self.best_list.len() {
                        tracing::info!(
                            "Passe d'optimisation terminée ({} évaluations max) : retour au segment 0",
                            limits.max_optimizing_evaluations
                        );
                        self.net_index = 0;
                    } else {
                        tracing::info!(
                            "Plafond d'optimisation au segment {} (score {:?}) : segment suivant",
                            self.net_index,
                            self.scenario_list.get(self.net_index).map(|r| r.score())
                        );
                        self.net_index += 1;
                    }
                    self.evaluations = 0;
                } else {
                    self.evaluations += 1;
                }
            }
        }
    }

    /// Intègre le résultat d'un essai terminé sur un checkpoint.
    ///
    /// Un score non fini est rejeté sans toucher aux listes.
    pub fn update_list(&mut self, record: ScenarioRecord<G>) -> Result<ListUpdate> {
        if !record.score().is_finite() {
            return Err(AppError::InvalidOutcome(format!(
                "score {} pour le checkpoint {}",
                record.score(),
                record.checkpoint()
            )));
        }

        if self.net_index > self.scenario_list.len() {
            tracing::warn!(
                "Curseur {} au-delà de la liste ({}), recalé",
                self.net_index,
                self.scenario_list.len()
            );
            self.net_index = self.scenario_list.len();
        }

        let candidate = self.scenario_list.extended(self.net_index, record);
        let terminal = candidate.is_complete();
        let best_improved = terminal && self.try_replace_best(&candidate);

        let transition = match &mut self.mode {
            SearchMode::Linear { .. } => {
                if terminal {
                    Transition::Recorded
                } else {
                    self.scenario_list = candidate;
                    self.net_index += 1;
                    Transition::Advanced {
                        index: self.net_index,
                    }
                }
            }
            SearchMode::Optimizing {
                phase,
                anchor,
                attempts,
                limits,
            } => {
                if !terminal {
                    if *phase == Phase::Optimizing {
                        *anchor = Some(self.net_index);
                    }
                    // Tout checkpoint intermédiaire fait sortir de l'optimisation
                    *phase = Phase::Discovering;
                    self.scenario_list = candidate;
                    self.net_index += 1;
                    Transition::Advanced {
                        index: self.net_index,
                    }
                } else {
                    if best_improved {
                        *anchor = None;
                    }

                    let rollback = (*anchor).filter(|&a| {
                        *attempts < limits.max_optimizing_attempts
                            && self.scenario_list.get(a).is_some_and(|r| !r.is_terminal())
                    });

                    match rollback {
                        Some(a) => {
                            *attempts += 1;
                            tracing::info!(
                                "Nouvel essai depuis le segment {} (tentative {})",
                                a,
                                *attempts
                            );
                            self.scenario_list = self.scenario_list.prefix(a + 1);
                            self.net_index = a + 1;
                            *phase = Phase::Discovering;
                            Transition::RolledBack {
                                anchor: a,
                                attempt: *attempts,
                            }
                        }
                        None => {
                            if anchor.is_some() && *attempts < limits.max_optimizing_attempts {
                                tracing::warn!(
                                    "Point de reprise {:?} inutilisable, reprise depuis la meilleure liste",
                                    anchor
                                );
                            }
                            self.net_index = 0;
                            self.scenario_list = self.best_list.snapshot();
                            *attempts = 0;
                            *phase = if self.best_list.is_empty() {
                                Phase::Discovering
                            } else {
                                Phase::Optimizing
                            };
                            Transition::RestartedFromBest
                        }
                    }
                }
            }
        };

        if !matches!(transition, Transition::Recorded) {
            self.evaluations = 0;
        }

        Ok(ListUpdate {
            best_improved,
            transition,
        })
    }

    fn try_replace_best(&mut self, candidate: &ScenarioList<G>) -> bool {
        let superior = self
            .comparator
            .is_superior(&ListScore::of(candidate), &ListScore::of(&self.best_list));
        if superior {
            tracing::info!(
                "🏆 Nouvelle meilleure liste ({} segments, score final {:?}, politique {})",
                candidate.len(),
                candidate.terminal_score(),
                self.comparator.name()
            );
            self.best_list = candidate.snapshot();
        }
        superior
    }

    /// Installe une meilleure liste chargée depuis la persistance et repart de son début.
    pub fn adopt_best(&mut self, list: ScenarioList<G>) {
        self.best_list = list;
        self.scenario_list = self.best_list.snapshot();
        self.net_index = 0;
        self.evaluations = 0;
        let has_best = !self.best_list.is_empty();
        if let SearchMode::Optimizing {
            phase,
            anchor,
            attempts,
            ..
        } = &mut self.mode
        {
            *anchor = None;
            *attempts = 0;
            *phase = if has_best {
                Phase::Optimizing
            } else {
                Phase::Discovering
            };
        }
    }

    // --- Curseurs & état ---

    pub fn net_index(&self) -> usize {
        self.net_index
    }

    pub fn evaluations(&self) -> u32 {
        self.evaluations
    }

    pub fn total_trials(&self) -> u64 {
        self.total_trials
    }

    pub fn max_evaluations(&self) -> u32 {
        match &self.mode {
            SearchMode::Linear { max_evaluations } => *max_evaluations,
            SearchMode::Optimizing { phase, limits, .. } => match phase {
                Phase::Discovering => limits.max_discovering_evaluations,
                Phase::Optimizing => limits.max_optimizing_evaluations,
            },
        }
    }

    pub fn mode(&self) -> &SearchMode {
        &self.mode
    }

    pub fn phase(&self) -> Option<Phase> {
        match &self.mode {
            SearchMode::Linear { .. } => None,
            SearchMode::Optimizing { phase, .. } => Some(*phase),
        }
    }

    pub fn anchor(&self) -> Option<usize> {
        match &self.mode {
            SearchMode::Optimizing { anchor, .. } => *anchor,
            SearchMode::Linear { .. } => None,
        }
    }

    pub fn optimizing_attempts(&self) -> u32 {
        match &self.mode {
            SearchMode::Optimizing { attempts, .. } => *attempts,
            SearchMode::Linear { .. } => 0,
        }
    }

    // --- Reprise d'un segment ---

    /// Checkpoint depuis lequel le prochain essai doit repartir (`None` = début du niveau).
    pub fn resume_point(&self) -> Option<&ScenarioRecord<G>> {
        self.net_index
            .checked_sub(1)
            .and_then(|i| self.scenario_list.get(i))
    }

    /// Checkpoints déjà acquis avant le segment courant.
    pub fn collected_checkpoints(&self) -> Vec<Checkpoint> {
        self.scenario_list
            .checkpoints()
            .take(self.net_index)
            .cloned()
            .collect()
    }

    // --- Accesseurs bornés à [0, count) ---

    pub fn scenario_list(&self) -> &ScenarioList<G> {
        &self.scenario_list
    }

    pub fn best_list(&self) -> &ScenarioList<G> {
        &self.best_list
    }

    pub fn count(&self) -> usize {
        self.scenario_list.len()
    }

    pub fn entry(&self, index: usize) -> Option<&ScenarioRecord<G>> {
        self.scenario_list.get(index)
    }

    pub fn fitness(&self, index: usize) -> Option<FitnessScore> {
        self.entry(index).map(|r| r.score())
    }

    pub fn checkpoint_name(&self, index: usize) -> Option<&str> {
        self.entry(index).map(|r| r.checkpoint().name())
    }

    pub fn best_count(&self) -> usize {
        self.best_list.len()
    }

    pub fn best_entry(&self, index: usize) -> Option<&ScenarioRecord<G>> {
        self.best_list.get(index)
    }

    pub fn best_fitness(&self, index: usize) -> Option<FitnessScore> {
        self.best_entry(index).map(|r| r.score())
    }

    pub fn best_checkpoint_name(&self, index: usize) -> Option<&str> {
        self.best_entry(index).map(|r| r.checkpoint().name())
    }

    pub fn best_genome(&self, index: usize) -> Option<&G> {
        self.best_entry(index).map(|r| r.genome())
    }

    /// Score final de la meilleure liste (absent tant qu'aucune victoire).
    pub fn best_score(&self) -> Option<FitnessScore> {
        self.best_list.terminal_score()
    }

    /// Une ligne par segment validé, plus le segment en cours s'il n'a pas encore d'entrée.
    pub fn segments(&self) -> Vec<SegmentView> {
        let mut rows: Vec<SegmentView> = self
            .scenario_list
            .iter()
            .enumerate()
            .map(|(index, record)| SegmentView {
                index,
                checkpoint: Some(record.checkpoint().name().to_string()),
                fitness: Some(record.score()),
                active: index == self.net_index,
            })
            .collect();

        if self.net_index == rows.len() {
            rows.push(SegmentView {
                index: self.net_index,
                checkpoint: None,
                fitness: None,
                active: true,
            });
        }
        rows
    }
}
