// FICHIER : src-core/src/utils/config.rs

use crate::utils::env;
use crate::utils::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Singleton global pour la configuration
static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Variables d'environnement reconnues
pub const ENV_CONFIG_PATH: &str = "MULTINET_CONFIG";
pub const ENV_MODE: &str = "MULTINET_ENV_MODE";
pub const ENV_SEED: &str = "MULTINET_SEED";
pub const ENV_VERBOSE: &str = "MULTINET_VERBOSE";

/// Configuration globale structurée par domaine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub core: CoreConfig,
    #[serde(default)]
    pub evolution: EvolutionConfig,
    #[serde(default)]
    pub scenario: ScenarioConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

// --- SOUS-STRUCTURES DE CONFIGURATION ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CoreConfig {
    pub env_mode: String,
    pub log_level: String,
    /// Graine du générateur pseudo-aléatoire (None = entropie système).
    pub seed: Option<u64>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            env_mode: "development".to_string(),
            log_level: "info".to_string(),
            seed: None,
        }
    }
}

/// Paramètres du moteur de population (élitisme + moyenne sur répétitions).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub evaluation_repetitions: usize,
    pub mutation_rate: f32,
    /// Couches cachées du réseau ; entrées/sorties viennent de la simulation.
    pub hidden_layers: Vec<usize>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 10,
            evaluation_repetitions: 1,
            mutation_rate: 0.1,
            hidden_layers: vec![12],
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SearchModeKind {
    Linear,
    #[default]
    Optimizing,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ComparatorKind {
    #[default]
    TerminalScore,
    TotalScore,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GenomeSourceKind {
    #[default]
    Random,
    Evolved,
}

/// Paramètres du gestionnaire de scénarios multi-segments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScenarioConfig {
    pub mode: SearchModeKind,
    /// Plafond d'évaluations du mode linéaire (affichage uniquement).
    pub max_evaluations: u32,
    pub max_discovering_evaluations: u32,
    pub max_optimizing_evaluations: u32,
    pub max_optimizing_attempts: u32,
    pub comparator: ComparatorKind,
    pub genome_source: GenomeSourceKind,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            mode: SearchModeKind::Optimizing,
            max_evaluations: 1500,
            max_discovering_evaluations: 1500,
            max_optimizing_evaluations: 500,
            max_optimizing_attempts: 5,
            comparator: ComparatorKind::TerminalScore,
            genome_source: GenomeSourceKind::Random,
        }
    }
}

/// Paramètres de cadencement des essais (mode visionnage, timeouts).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimingConfig {
    pub time_scale: f32,
    pub timeout_eval: f32,
    pub timeout_view: f32,
    /// Un niveau sur `view_every` est rejoué en mode visionnage.
    pub view_every: u32,
    pub step_seconds: f32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            time_scale: 30.0,
            timeout_eval: 10.0,
            timeout_view: 30.0,
            view_every: 20,
            step_seconds: 0.02,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PathsConfig {
    pub output_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("multinet_output"),
            log_dir: PathBuf::from("multinet_output").join("logs"),
        }
    }
}

// --- IMPLÉMENTATION PRINCIPALE ---

impl AppConfig {
    /// Initialise le singleton global (idempotent).
    pub fn init() -> Result<()> {
        if CONFIG.get().is_some() {
            return Ok(());
        }

        let target_env = if cfg!(test) {
            "test".to_string()
        } else {
            env::get_or(ENV_MODE, "development")
        };

        let mut config = match env::get_optional(ENV_CONFIG_PATH) {
            Some(path) if target_env != "test" => Self::from_file(path)?,
            _ => Self::default(),
        };
        config.core.env_mode = target_env;

        if env::get_optional(ENV_SEED).is_some() {
            config.core.seed = Some(env::get_parsed(ENV_SEED)?);
        }
        if env::is_enabled(ENV_VERBOSE) {
            config.core.log_level = "debug".to_string();
        }

        config.validate()?;

        if CONFIG.set(config).is_err() {
            tracing::debug!("AppConfig déjà initialisé par un autre appel, on conserve l'existant.");
        }
        Ok(())
    }

    /// Accès au singleton ; retombe sur les valeurs par défaut si `init()` n'a pas été appelé.
    pub fn get() -> &'static AppConfig {
        CONFIG.get_or_init(AppConfig::default)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Lecture impossible de {:?} : {}", path, e))
        })?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Vérifie la cohérence des paramètres avant de démarrer un entraînement.
    pub fn validate(&self) -> Result<()> {
        let evo = &self.evolution;
        if evo.population_size < 2 {
            return Err(AppError::Config(format!(
                "population_size doit être >= 2 (reçu {})",
                evo.population_size
            )));
        }
        if evo.evaluation_repetitions == 0 {
            return Err(AppError::Config(
                "evaluation_repetitions doit être >= 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&evo.mutation_rate) {
            return Err(AppError::Config(format!(
                "mutation_rate hors bornes [0, 1] : {}",
                evo.mutation_rate
            )));
        }

        let sc = &self.scenario;
        if sc.max_evaluations == 0
            || sc.max_discovering_evaluations == 0
            || sc.max_optimizing_evaluations == 0
        {
            return Err(AppError::Config(
                "les plafonds d'évaluations doivent être >= 1".to_string(),
            ));
        }

        let timing = &self.timing;
        let positive = |v: f32| v > 0.0 && v.is_finite();
        if !positive(timing.timeout_eval)
            || !positive(timing.timeout_view)
            || !positive(timing.step_seconds)
        {
            return Err(AppError::Config(
                "timeouts et pas de simulation doivent être finis et > 0".to_string(),
            ));
        }
        if timing.view_every == 0 {
            return Err(AppError::Config("view_every doit être >= 1".to_string()));
        }
        Ok(())
    }
}
