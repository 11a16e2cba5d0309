use clap::{Parser, Subcommand};

mod commands;

use multinet::{
    user_error, user_info,
    utils::{context, prelude::*},
};

#[derive(Parser)]
#[command(name = "multinet-cli")]
#[command(about = "Entraînement multi-segments de politiques neuronales", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone)]
enum Commands {
    /// Lance un entraînement sur le parcours de référence
    Train(commands::train::TrainArgs),

    /// Rejoue une meilleure liste sauvegardée
    Replay(commands::replay::ReplayArgs),

    /// Affiche la configuration résolue
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Configuration (CRITIQUE)
    if let Err(e) = AppConfig::init() {
        eprintln!("❌ CRITICAL ERROR: Impossible d'initialiser la configuration.");
        eprintln!("   Détails : {}", e);
        std::process::exit(1);
    }

    // 2. Logger
    context::init_logging();

    user_info!("CLI_START", "multinet-cli v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    if let Err(e) = execute_command(cli.command).await {
        user_error!(
            "CMD_FAIL",
            error = e,
            component = "CLI",
            action = "EXECUTE_COMMAND"
        );
        std::process::exit(1);
    }

    tracing::debug!("Fin de l'exécution du CLI");
    Ok(())
}

async fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Train(args) => commands::train::handle(args).await,
        Commands::Replay(args) => commands::replay::handle(args).await,
        Commands::Config => commands::config::handle(),
    }
}
