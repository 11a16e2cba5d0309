use super::record::{Checkpoint, ScenarioRecord};
use crate::genetics::types::FitnessScore;
use serde::{Deserialize, Serialize};

/// Suite ordonnée de checkpoints atteints : une tentative (partielle ou complète) de la tâche.
///
/// Les éléments ne sont jamais modifiés individuellement : une liste se remplace
/// en entier par une copie profonde (`snapshot`, `prefix`, `extended`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioList<G> {
    records: Vec<ScenarioRecord<G>>,
}

impl<G> Default for ScenarioList<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G> ScenarioList<G> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Accès borné à `[0, len)` ; hors bornes = `None`.
    pub fn get(&self, index: usize) -> Option<&ScenarioRecord<G>> {
        self.records.get(index)
    }

    pub fn last(&self) -> Option<&ScenarioRecord<G>> {
        self.records.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScenarioRecord<G>> {
        self.records.iter()
    }

    /// Une liste complète se termine par l'objectif.
    pub fn is_complete(&self) -> bool {
        self.last().is_some_and(ScenarioRecord::is_terminal)
    }

    /// Score du segment final, uniquement pour une liste complète.
    pub fn terminal_score(&self) -> Option<FitnessScore> {
        self.last().filter(|r| r.is_terminal()).map(|r| r.score())
    }

    pub fn total_score(&self) -> FitnessScore {
        self.records.iter().map(|r| r.score()).sum()
    }

    pub fn checkpoints(&self) -> impl Iterator<Item = &Checkpoint> {
        self.records.iter().map(|r| r.checkpoint())
    }
}

impl<G: Clone> ScenarioList<G> {
    /// Copie profonde indépendante.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    /// Copie des `len` premiers éléments (tronquée à la taille réelle).
    pub fn prefix(&self, len: usize) -> Self {
        let end = len.min(self.records.len());
        Self {
            records: self.records[..end].to_vec(),
        }
    }

    /// Copie du préfixe `[0, len)` suivie de `record`.
    pub fn extended(&self, len: usize, record: ScenarioRecord<G>) -> Self {
        let mut list = self.prefix(len);
        list.records.push(record);
        list
    }
}

impl<G> FromIterator<ScenarioRecord<G>> for ScenarioList<G> {
    fn from_iter<I: IntoIterator<Item = ScenarioRecord<G>>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
