use std::io;

/// Type de résultat standard pour MultiNet.
pub type Result<T> = std::result::Result<T, AppError>;

/// Enumération centrale des erreurs de l'application.
/// Elle dérive `thiserror::Error` pour faciliter la conversion automatique.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Erreur de configuration : {0}")]
    Config(String),

    #[error("Erreur d'entrée/sortie : {0}")]
    Io(#[from] io::Error),

    #[error("Erreur Système : {0}")]
    System(#[from] anyhow::Error),

    #[error("Introuvable : {0}")]
    NotFound(String),

    #[error("Erreur de sérialisation : {0}")]
    Serialization(#[from] serde_json::Error),

    /// Résultat d'essai rejeté avant toute mise à jour des listes.
    #[error("Résultat d'essai invalide : {0}")]
    InvalidOutcome(String),
}

// Permet de faire : return Err("Mon erreur".to_string().into());
impl From<String> for AppError {
    fn from(s: String) -> Self {
        AppError::System(anyhow::anyhow!(s))
    }
}

// Permet de faire : return Err("Mon erreur literal".into());
impl From<&str> for AppError {
    fn from(s: &str) -> Self {
        AppError::System(anyhow::anyhow!(s.to_string()))
    }
}
