// FICHIER : src-core/src/storage/recorder.rs

use super::scenario_log::ScenarioLog;
use super::store::ScenarioStore;
use super::StorageConfig;
use crate::training::trainer::TrainingEvent;
use crate::utils::error::Result;
use crate::utils::fs::PathBuf;
use serde::Serialize;

/// Applique les événements d'entraînement au journal et au stockage.
#[derive(Debug, Clone)]
pub struct TrainingRecorder {
    store: ScenarioStore,
    log: ScenarioLog,
    saved: Vec<PathBuf>,
}

impl TrainingRecorder {
    pub fn new(config: StorageConfig) -> Self {
        let log = ScenarioLog::new(config.log_path());
        Self {
            store: ScenarioStore::new(config),
            log,
            saved: Vec::new(),
        }
    }

    pub async fn record<G: Serialize>(&mut self, event: TrainingEvent<G>) -> Result<()> {
        match event {
            TrainingEvent::SegmentCommitted { index, line } => {
                tracing::debug!(segment = index, "Segment validé : {}", line);
            }
            TrainingEvent::ScenarioLogged { index, line } => self.log.log(index, line),
            TrainingEvent::PersistBest { score, list } => {
                let path = self.store.save_best(score, &list).await?;
                self.saved.push(path);
            }
            TrainingEvent::FlushLog => self.log.flush().await?,
            TrainingEvent::ClearLog => self.log.clear(),
        }
        Ok(())
    }

    /// Applique tout le lot même si un événement échoue ; renvoie le nombre d'échecs.
    pub async fn record_all<G: Serialize>(&mut self, events: Vec<TrainingEvent<G>>) -> usize {
        let mut failures = 0;
        for event in events {
            let kind = event.kind();
            if let Err(e) = self.record(event).await {
                tracing::warn!(event_kind = kind, "Enregistrement impossible : {}", e);
                failures += 1;
            }
        }
        failures
    }

    pub fn store(&self) -> &ScenarioStore {
        &self.store
    }

    pub fn log(&self) -> &ScenarioLog {
        &self.log
    }

    /// Fichiers écrits depuis la création de l'enregistreur.
    pub fn saved(&self) -> &[PathBuf] {
        &self.saved
    }
}
