// FICHIER : src-core/tests/common/mod.rs

use multinet::scenario::{Checkpoint, Pose, ScenarioRecord};
use multinet::utils::{io::PathBuf, prelude::*};
use std::sync::Once;
use tempfile::TempDir;

static INIT: Once = Once::new();

#[allow(dead_code)]
pub struct TestEnv {
    pub config: AppConfig,
    pub output: PathBuf,
    pub _tmp_dir: TempDir,
}

/// Configuration par défaut isolée dans un dossier temporaire unique.
pub fn setup_test_env() -> TestEnv {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });

    let test_uuid = Uuid::new_v4().to_string();
    let temp_dir = tempfile::Builder::new()
        .prefix(&format!("multinet_it_{}_", test_uuid))
        .tempdir()
        .expect("❌ Impossible de créer le dossier temporaire");

    let output = temp_dir.path().join("out");
    let mut config = AppConfig::default();
    config.core.env_mode = "test".to_string();
    config.paths.output_dir = output.clone();
    config.paths.log_dir = output.join("logs");

    TestEnv {
        config,
        output,
        _tmp_dir: temp_dir,
    }
}

#[allow(dead_code)]
pub fn coin(name: &str, score: f32, genome: u32) -> ScenarioRecord<u32> {
    ScenarioRecord::new(genome, Checkpoint::coin(name), score, Pose::default())
}

#[allow(dead_code)]
pub fn goal(score: f32, genome: u32) -> ScenarioRecord<u32> {
    ScenarioRecord::new(genome, Checkpoint::Goal, score, Pose::default())
}
