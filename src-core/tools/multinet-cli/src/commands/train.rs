use clap::{Args, ValueEnum};
use multinet::{
    genetics::NeuralNetworkGenome,
    storage::{StorageConfig, TrainingRecorder},
    training::{neural_factory, CourseSimulation, LevelReport, Simulation, Trainer},
    user_error, user_info, user_success,
    utils::{
        config::{GenomeSourceKind, SearchModeKind},
        prelude::*,
    },
};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeArg {
    Linear,
    Optimizing,
}

impl From<ModeArg> for SearchModeKind {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Linear => SearchModeKind::Linear,
            ModeArg::Optimizing => SearchModeKind::Optimizing,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceArg {
    Random,
    Evolved,
}

impl From<SourceArg> for GenomeSourceKind {
    fn from(source: SourceArg) -> Self {
        match source {
            SourceArg::Random => GenomeSourceKind::Random,
            SourceArg::Evolved => GenomeSourceKind::Evolved,
        }
    }
}

/// Entraînement sur le parcours de référence
#[derive(Args, Clone, Debug)]
pub struct TrainArgs {
    /// Nombre de niveaux à jouer (essais + visionnages)
    #[arg(short, long, default_value = "200")]
    pub levels: u64,

    /// Graine du générateur (sinon config, sinon aléatoire)
    #[arg(short, long, env = "MULTINET_SEED")]
    pub seed: Option<u64>,

    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Origine des génomes essayés
    #[arg(long, value_enum)]
    pub source: Option<SourceArg>,

    /// Affiche le tableau d'état tous les N niveaux (0 = jamais)
    #[arg(long, default_value = "0")]
    pub status_every: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSummary {
    pub run_id: Uuid,
    pub levels: u64,
    pub trials: u64,
    pub views: u64,
    pub best_score: Option<f32>,
    pub saved: usize,
}

pub async fn handle(args: TrainArgs) -> Result<()> {
    let mut config = AppConfig::get().clone();
    if let Some(mode) = args.mode {
        config.scenario.mode = mode.into();
    }
    if let Some(source) = args.source {
        config.scenario.genome_source = source.into();
    }
    config.validate()?;

    let seed = args
        .seed
        .or(config.core.seed)
        .unwrap_or_else(|| Uuid::new_v4().as_u128() as u64);

    user_info!(
        "TRAIN_START",
        "Niveaux : {} | Mode : {:?} | Source : {:?} | Graine : {}",
        args.levels,
        config.scenario.mode,
        config.scenario.genome_source,
        seed
    );

    let summary = run_training(&config, args.levels, seed, args.status_every).await?;

    match summary.best_score {
        Some(score) => user_success!(
            "TRAIN_DONE",
            "{} essais, {} visionnages, meilleur score {:.2} ({} sauvegardes)",
            summary.trials,
            summary.views,
            score,
            summary.saved
        ),
        None => user_info!(
            "TRAIN_DONE",
            "{} essais sans atteindre l'objectif",
            summary.trials
        ),
    }
    Ok(())
}

pub async fn run_training(
    config: &AppConfig,
    levels: u64,
    seed: u64,
    status_every: u64,
) -> Result<TrainingSummary> {
    let run_id = Uuid::new_v4();
    tracing::info!(run_id = %run_id, seed, "Début d'entraînement");

    let mut sim = CourseSimulation::standard();
    let factory = neural_factory(
        sim.sensor_count(),
        &config.evolution.hidden_layers,
        sim.actuator_count(),
    );
    let mut trainer: Trainer<NeuralNetworkGenome> = Trainer::new(config, factory, seed)?;
    let mut recorder = TrainingRecorder::new(StorageConfig::from_app(config));

    let mut views = 0;
    for level in 0..levels {
        if let LevelReport::Viewed { .. } = trainer.run_level(&mut sim) {
            views += 1;
        }
        let failures = recorder.record_all(trainer.drain_events()).await;
        if failures > 0 {
            user_error!(
                "PERSIST_FAIL",
                "Niveau {} : {} écriture(s) échouée(s), entraînement poursuivi",
                level + 1,
                failures
            );
        }

        if status_every > 0 && (level + 1) % status_every == 0 {
            for line in trainer.status_lines() {
                println!("{}", line);
            }
        }
    }

    Ok(TrainingSummary {
        run_id,
        levels,
        trials: trainer.manager().total_trials(),
        views,
        best_score: trainer.manager().best_score(),
        saved: recorder.saved().len(),
    })
}

// --- TESTS UNITAIRES ---
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_short_run_counts_trials_and_views() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.paths.output_dir = dir.path().to_path_buf();
        config.timing.view_every = 5;
        config.timing.timeout_eval = 1.0;
        config.timing.timeout_view = 1.0;

        let summary = run_training(&config, 12, 7, 0).await.unwrap();
        assert_eq!(summary.levels, 12);
        // Niveaux 5 et 10 en visionnage
        assert_eq!(summary.views, 2);
        assert_eq!(summary.trials, 10);
    }

    #[tokio::test]
    async fn test_evolved_linear_run() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.paths.output_dir = dir.path().to_path_buf();
        config.scenario.mode = ModeArg::Linear.into();
        config.scenario.genome_source = SourceArg::Evolved.into();
        config.evolution.population_size = 4;
        config.timing.timeout_eval = 0.5;

        let summary = run_training(&config, 8, 3, 4).await.unwrap();
        assert_eq!(summary.trials, 8);
        // Chaque amélioration de la meilleure liste produit une sauvegarde
        assert_eq!(summary.best_score.is_some(), summary.saved > 0);
    }

    #[tokio::test]
    async fn test_unwritable_output_does_not_abort_training() {
        let dir = tempfile::tempdir().unwrap();
        let occupied = dir.path().join("sortie");
        std::fs::write(&occupied, b"x").unwrap();

        let mut config = AppConfig::default();
        config.paths.output_dir = occupied;
        config.timing.view_every = 4;
        config.timing.timeout_eval = 0.5;
        config.timing.timeout_view = 0.5;

        let summary = run_training(&config, 10, 11, 0).await.unwrap();
        assert_eq!(summary.levels, 10);
        assert_eq!(summary.views, 2);
        assert_eq!(summary.saved, 0);
    }
}
