// FICHIER : src-core/src/training/simulation.rs

use super::clock::TrialClock;
use crate::genetics::traits::Policy;
use crate::genetics::types::FitnessScore;
use crate::scenario::record::{Checkpoint, Pose};

/// Fin d'un essai : premier checkpoint touché, ou timeout.
#[derive(Clone, Debug, PartialEq)]
pub enum TrialEvent {
    Reached(Checkpoint),
    TimedOut,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TrialReport {
    pub pose: Pose,
    pub score: FitnessScore,
    pub event: TrialEvent,
}

impl TrialReport {
    pub fn checkpoint(&self) -> Option<&Checkpoint> {
        match &self.event {
            TrialEvent::Reached(checkpoint) => Some(checkpoint),
            TrialEvent::TimedOut => None,
        }
    }
}

/// Environnement piloté par une politique.
///
/// L'état persiste entre deux `run_trial` : le visionnage enchaîne plusieurs
/// politiques sur un même niveau sans réinitialiser la simulation.
pub trait Simulation {
    fn sensor_count(&self) -> usize;
    fn actuator_count(&self) -> usize;

    /// Remet l'agent au départ et tous les checkpoints en place.
    fn reset(&mut self);

    /// Replace l'agent sur `pose` ; les checkpoints de `collected` sont retirés du niveau.
    fn restore(&mut self, pose: &Pose, collected: &[Checkpoint]);

    /// Joue jusqu'au prochain checkpoint ou jusqu'au timeout de `clock`.
    fn run_trial(&mut self, policy: &dyn Policy, clock: &mut TrialClock) -> TrialReport;
}
