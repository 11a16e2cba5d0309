// FICHIER : src-core/src/utils/logger.rs

use crate::utils::config::AppConfig;
use std::path::Path;
use std::sync::Once;
use tracing_appender::rolling;
use tracing_subscriber::{
    filter::filter_fn, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

/// Préfixe des fichiers de trace journaliers (`multinet.log.AAAA-MM-JJ`).
pub const LOG_FILE_PREFIX: &str = "multinet.log";

static INIT: Once = Once::new();

/// Filtre console : `RUST_LOG` s'il est défini, sinon `core.log_level`.
fn console_filter(config: &AppConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.core.log_level.as_str()))
}

/// Les événements portant un champ `event` viennent des macros `user_*`,
/// déjà affichées sur le terminal.
fn is_user_event(metadata: &tracing::Metadata<'_>) -> bool {
    metadata.fields().iter().any(|f| f.name() == "event")
}

fn prepare_log_dir(log_dir: &Path) {
    if let Err(e) = std::fs::create_dir_all(log_dir) {
        eprintln!("⚠️ Traces fichier désactivées, {:?} indisponible : {}", log_dir, e);
    }
}

/// Installe le collecteur global : essais et transitions en JSON dans
/// `paths.log_dir`, résumé compact sur la console. Sans effet au second appel.
pub fn init_logging() {
    INIT.call_once(|| {
        let config = AppConfig::get();
        let log_dir = config.paths.log_dir.clone();
        prepare_log_dir(&log_dir);

        let trial_trace = fmt::layer()
            .json()
            .with_writer(rolling::daily(&log_dir, LOG_FILE_PREFIX))
            .with_target(true)
            .with_file(true)
            .with_line_number(true);

        let console = fmt::layer()
            .compact()
            .with_target(false)
            .with_filter(console_filter(config))
            .with_filter(filter_fn(|metadata| !is_user_event(metadata)));

        if tracing_subscriber::registry()
            .with(trial_trace)
            .with(console)
            .try_init()
            .is_err()
        {
            tracing::debug!("Collecteur de traces déjà installé, configuration conservée");
            return;
        }

        tracing::info!("Traces d'entraînement dans {:?}", log_dir);
    });
}
