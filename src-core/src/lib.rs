pub mod genetics;
pub mod scenario;
pub mod storage;
pub mod training;
pub mod utils;

pub use scenario::ScenarioManager;
pub use training::Trainer;
pub use utils::{AppConfig, AppError, Result};
