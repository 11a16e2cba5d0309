use clap::Args;
use multinet::{
    genetics::NeuralNetworkGenome,
    scenario::ScenarioList,
    storage::{ScenarioStore, StorageConfig},
    training::{neural_factory, CourseSimulation, LevelReport, Simulation, Trainer},
    user_info, user_success,
    utils::{io::PathBuf, prelude::*},
};

/// Rejoue une meilleure liste sauvegardée en mode visionnage
#[derive(Args, Clone, Debug)]
pub struct ReplayArgs {
    /// Fichier `nets/<score>.json` (par défaut : la dernière sauvegarde)
    #[arg(short, long)]
    pub from: Option<PathBuf>,

    /// Nombre de rejeux
    #[arg(short, long, default_value = "1")]
    pub levels: u32,
}

pub async fn handle(args: ReplayArgs) -> Result<()> {
    let config = AppConfig::get();
    let store = ScenarioStore::new(StorageConfig::from_app(config));

    let path = match args.from {
        Some(path) => path,
        None => store
            .latest()
            .await?
            .ok_or_else(|| AppError::NotFound("aucune sauvegarde dans nets/".to_string()))?,
    };
    user_info!("REPLAY_START", "Rejeu de {}", path.display());

    let list: ScenarioList<NeuralNetworkGenome> = store.load_best(&path).await?;
    let results = replay(config, list, args.levels)?;

    for (attempt, (reached, segments)) in results.iter().enumerate() {
        user_success!(
            "REPLAY_DONE",
            "Rejeu {} : {}/{} segments",
            attempt + 1,
            reached,
            segments
        );
    }
    Ok(())
}

/// Rejoue `list` `levels` fois ; renvoie `(segments atteints, segments)` par rejeu.
pub fn replay(
    config: &AppConfig,
    list: ScenarioList<NeuralNetworkGenome>,
    levels: u32,
) -> Result<Vec<(usize, usize)>> {
    let mut sim = CourseSimulation::standard();
    let factory = neural_factory(
        sim.sensor_count(),
        &config.evolution.hidden_layers,
        sim.actuator_count(),
    );
    let mut trainer: Trainer<NeuralNetworkGenome> = Trainer::new(config, factory, 0)?;

    let mut results = Vec::new();
    for _ in 0..levels {
        trainer.load_best(list.clone());
        if let LevelReport::Viewed { reached, segments } = trainer.run_level(&mut sim) {
            results.push((reached, segments));
        }
    }
    Ok(results)
}
