//! Découpage de la tâche en segments entre checkpoints et recherche de la
//! meilleure tentative complète.

pub mod comparator;
pub mod list;
pub mod manager;
pub mod record;

pub use comparator::{
    build_comparator, ListComparator, ListScore, TerminalScoreComparator, TotalScoreComparator,
};
pub use list::ScenarioList;
pub use manager::{
    ListUpdate, OptimizingLimits, Phase, ScenarioManager, SearchMode, SegmentView, Transition,
};
pub use record::{Checkpoint, Pose, ScenarioRecord, GOAL_NAME};
