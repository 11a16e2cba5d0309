// FICHIER : src-core/src/utils/mod.rs

// =========================================================================
//  MULTINET UTILS - Foundation Layer
// =========================================================================

// --- 1. MODULES INTERNES ---
pub mod config;
pub mod env;
pub mod error;
pub mod fs;
pub mod logger;
pub mod macros;

// --- 2. FAÇADES SÉMANTIQUES ---

/// **Core Foundation** : Types de base et Erreurs.
pub mod core {
    pub use super::error::{AppError, Result};
    pub use chrono::{DateTime, Utc};
    pub use uuid::Uuid;
}

/// **Physical Layer (I/O)** : Accès disque atomique.
pub mod io {
    pub use super::fs::{
        append_text, ensure_dir, exists, list_files, read_json, write_atomic, write_json_atomic,
        Path, PathBuf,
    };
}

/// **Application Context** : Accès global Config/Log/Env.
pub mod context {
    pub use super::config::AppConfig;
    pub use super::env::{get, get_optional, get_or, get_parsed, is_enabled};
    pub use super::logger::init_logging;
}

/// **Le Prélude** : À utiliser via `use crate::utils::prelude::*;`
pub mod prelude {
    pub use super::context::AppConfig;
    pub use super::core::{AppError, Result, Utc, Uuid};
    pub use serde::{Deserialize, Serialize};
    pub use tracing::{debug, error, info, instrument, warn};
}

// --> Config & Erreurs
pub use config::AppConfig;
pub use error::{AppError, Result};
pub use logger::init_logging;
