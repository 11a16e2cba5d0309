// FICHIER : src-core/src/storage/scenario_log.rs

use crate::utils::error::Result;
use crate::utils::fs::{self, PathBuf};
use chrono::Utc;
use std::collections::BTreeMap;

/// Journal des checkpoints rejoués, indexé par segment.
/// Tamponné en mémoire jusqu'au `flush`, vidé par `clear` en fin de niveau.
#[derive(Debug, Clone)]
pub struct ScenarioLog {
    path: PathBuf,
    lines: BTreeMap<usize, String>,
}

impl ScenarioLog {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lines: BTreeMap::new(),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Une ligne par segment : un nouveau passage remplace l'ancien.
    pub fn log(&mut self, index: usize, line: impl Into<String>) {
        self.lines.insert(index, line.into());
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Ajoute le bloc courant au fichier, précédé d'un horodatage.
    pub async fn flush(&self) -> Result<()> {
        if self.lines.is_empty() {
            return Ok(());
        }
        let mut block = format!("# {}\n", Utc::now().to_rfc3339());
        for line in self.lines.values() {
            block.push_str(line);
            block.push('\n');
        }
        fs::append_text(&self.path, &block).await?;
        tracing::debug!("{} lignes de scénario écrites", self.lines.len());
        Ok(())
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
