// FICHIER : src-core/src/storage/mod.rs

pub mod recorder;
pub mod scenario_log;
pub mod store;

use crate::utils::config::AppConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use recorder::TrainingRecorder;
pub use scenario_log::ScenarioLog;
pub use store::ScenarioStore;

// --- CONFIGURATION ---

/// Arborescence de sortie d'un entraînement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_root: PathBuf,
}

impl StorageConfig {
    pub fn new(data_root: PathBuf) -> Self {
        Self { data_root }
    }

    pub fn from_app(config: &AppConfig) -> Self {
        Self::new(config.paths.output_dir.clone())
    }

    /// Dossier des meilleures listes sauvegardées.
    pub fn nets_root(&self) -> PathBuf {
        self.data_root.join("nets")
    }

    pub fn net_path(&self, name: &str) -> PathBuf {
        self.nets_root().join(format!("{}.json", name))
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_root.join("scenarios.log")
    }
}
