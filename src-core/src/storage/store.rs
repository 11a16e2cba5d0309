// FICHIER : src-core/src/storage/store.rs

use super::StorageConfig;
use crate::genetics::types::FitnessScore;
use crate::scenario::list::ScenarioList;
use crate::utils::error::{AppError, Result};
use crate::utils::fs::{self, Path, PathBuf};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Sauvegarde des meilleures listes (génomes compris), une par fichier nommé d'après le score.
#[derive(Debug, Clone)]
pub struct ScenarioStore {
    config: StorageConfig,
}

impl ScenarioStore {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Écrit `<root>/nets/<score>.json` et renvoie son chemin.
    pub async fn save_best<G: Serialize>(
        &self,
        score: FitnessScore,
        list: &ScenarioList<G>,
    ) -> Result<PathBuf> {
        if list.is_empty() {
            return Err(AppError::Config(
                "Liste vide : rien à sauvegarder".to_string(),
            ));
        }
        let path = self.config.net_path(&format!("{:.2}", score));
        fs::write_json_atomic(&path, list).await?;
        tracing::info!("💾 Meilleure liste sauvegardée : {}", path.display());
        Ok(path)
    }

    pub async fn load_best<G: DeserializeOwned>(&self, path: &Path) -> Result<ScenarioList<G>> {
        let list: ScenarioList<G> = fs::read_json(path).await?;
        if list.is_empty() {
            return Err(AppError::NotFound(format!(
                "Aucun segment dans {}",
                path.display()
            )));
        }
        Ok(list)
    }

    /// Dernière sauvegarde écrite (date de modification), si elle existe.
    pub async fn latest(&self) -> Result<Option<PathBuf>> {
        let mut latest: Option<(std::time::SystemTime, PathBuf)> = None;
        for path in fs::list_files(&self.config.nets_root(), "json").await? {
            let modified = tokio::fs::metadata(&path).await?.modified()?;
            if latest.as_ref().is_none_or(|(t, _)| modified >= *t) {
                latest = Some((modified, path));
            }
        }
        Ok(latest.map(|(_, path)| path))
    }
}
