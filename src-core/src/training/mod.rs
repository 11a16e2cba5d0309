pub mod clock;
pub mod sandbox;
pub mod simulation;
pub mod source;
pub mod trainer;

pub use clock::TrialClock;
pub use sandbox::CourseSimulation;
pub use simulation::{Simulation, TrialEvent, TrialReport};
pub use source::{neural_factory, GenomeSource};
pub use trainer::{LevelReport, Trainer, TrainingEvent};
