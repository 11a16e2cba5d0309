use super::list::ScenarioList;
use crate::genetics::types::FitnessScore;
use crate::utils::config::ComparatorKind;
use std::fmt::Debug;

/// Résumé d'une liste, seul élément vu par les politiques de comparaison.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ListScore {
    pub len: usize,
    pub terminal: Option<FitnessScore>,
    pub total: FitnessScore,
}

impl ListScore {
    pub fn of<G>(list: &ScenarioList<G>) -> Self {
        Self {
            len: list.len(),
            terminal: list.terminal_score(),
            total: list.total_score(),
        }
    }
}

/// Politique décidant si une liste candidate remplace la meilleure liste.
///
/// Règles communes : une candidate incomplète ne gagne jamais ; une candidate
/// complète gagne toujours contre une meilleure liste vide ou incomplète.
/// Une égalité ne remplace jamais.
pub trait ListComparator: Send + Sync + Debug {
    fn name(&self) -> &'static str;

    /// Comparaison entre deux listes complètes.
    fn beats(&self, candidate: &ListScore, best: &ListScore) -> bool;

    fn is_superior(&self, candidate: &ListScore, best: &ListScore) -> bool {
        match (candidate.terminal, best.terminal) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(_), Some(_)) => self.beats(candidate, best),
        }
    }
}

/// Préfère le score strictement supérieur sur le segment final.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalScoreComparator;

impl ListComparator for TerminalScoreComparator {
    fn name(&self) -> &'static str {
        "terminal_score"
    }

    fn beats(&self, candidate: &ListScore, best: &ListScore) -> bool {
        match (candidate.terminal, best.terminal) {
            (Some(c), Some(b)) => c > b,
            _ => false,
        }
    }
}

/// Préfère la somme strictement supérieure des scores de tous les segments.
#[derive(Debug, Default, Clone, Copy)]
pub struct TotalScoreComparator;

impl ListComparator for TotalScoreComparator {
    fn name(&self) -> &'static str {
        "total_score"
    }

    fn beats(&self, candidate: &ListScore, best: &ListScore) -> bool {
        candidate.total > best.total
    }
}

pub fn build_comparator(kind: ComparatorKind) -> Box<dyn ListComparator> {
    match kind {
        ComparatorKind::TerminalScore => Box::new(TerminalScoreComparator),
        ComparatorKind::TotalScore => Box::new(TotalScoreComparator),
    }
}
