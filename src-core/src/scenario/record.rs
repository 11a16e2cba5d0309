use crate::genetics::types::FitnessScore;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Nom historique du déclencheur de victoire.
pub const GOAL_NAME: &str = "WinTrigger";

/// État de l'agent au moment d'un checkpoint ou de la fin d'un essai.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Default)]
pub struct Pose {
    pub position: (f32, f32),
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub facing_right: bool,
    pub jump: bool,
    pub grounded: bool,
}

/// Identifiant d'un checkpoint : une pièce intermédiaire ou l'objectif final.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Checkpoint {
    Coin(String),
    Goal,
}

impl Checkpoint {
    pub fn coin(name: impl Into<String>) -> Self {
        Checkpoint::Coin(name.into())
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Checkpoint::Goal)
    }

    pub fn name(&self) -> &str {
        match self {
            Checkpoint::Coin(name) => name,
            Checkpoint::Goal => GOAL_NAME,
        }
    }
}

impl fmt::Display for Checkpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Instantané d'un checkpoint atteint : génome (copie possédée), score et pose.
/// Immuable une fois construit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRecord<G> {
    genome: G,
    checkpoint: Checkpoint,
    score: FitnessScore,
    pose: Pose,
}

impl<G> ScenarioRecord<G> {
    pub fn new(genome: G, checkpoint: Checkpoint, score: FitnessScore, pose: Pose) -> Self {
        Self {
            genome,
            checkpoint,
            score,
            pose,
        }
    }

    pub fn genome(&self) -> &G {
        &self.genome
    }

    pub fn checkpoint(&self) -> &Checkpoint {
        &self.checkpoint
    }

    pub fn score(&self) -> FitnessScore {
        self.score
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    pub fn is_terminal(&self) -> bool {
        self.checkpoint.is_terminal()
    }

    /// Ligne de journal : checkpoint, position, vitesses, orientation, saut, sol.
    pub fn log_line(&self) -> String {
        let p = &self.pose;
        format!(
            "{},  ({:.2}, {:.2}), {:.3}, {:.3}, {}, {}, {}",
            self.checkpoint,
            p.position.0,
            p.position.1,
            p.velocity_x,
            p.velocity_y,
            p.facing_right,
            p.jump,
            p.grounded
        )
    }
}
