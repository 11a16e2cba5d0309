// FICHIER : src-core/src/utils/fs.rs

use crate::utils::error::{AppError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::instrument;

// --- RE-EXPORTS (Isolation de la couche OS) ---
pub use std::path::{Path, PathBuf};

/// Crée le dossier s'il n'existe pas encore.
pub async fn ensure_dir(path: &Path) -> Result<()> {
    if !exists(path).await {
        fs::create_dir_all(path).await?;
    }
    Ok(())
}

pub async fn exists(path: &Path) -> bool {
    fs::try_exists(path).await.unwrap_or(false)
}

/// Écriture atomique : fichier temporaire puis renommage.
pub async fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent).await?;
    }

    let tmp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&tmp_path).await?;
    file.write_all(content).await?;
    file.flush().await.ok();
    file.sync_all().await.ok();

    if let Err(e) = fs::rename(&tmp_path, path).await {
        let _ = fs::remove_file(&tmp_path).await;
        tracing::error!("Renommage atomique échoué {:?} -> {:?} : {}", tmp_path, path, e);
        return Err(AppError::Io(e));
    }
    Ok(())
}

pub async fn write_json_atomic<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let content = serde_json::to_vec_pretty(data)?;
    write_atomic(path, &content).await
}

#[instrument(skip(path), fields(path = ?path))]
pub async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !exists(path).await {
        return Err(AppError::NotFound(format!("{}", path.display())));
    }
    let content = fs::read(path).await?;
    Ok(serde_json::from_slice(&content)?)
}

/// Ajoute du texte en fin de fichier (création si absent).
pub async fn append_text(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent).await?;
    }
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    file.write_all(text.as_bytes()).await?;
    file.flush().await?;
    Ok(())
}

/// Liste les fichiers d'un dossier portant l'extension donnée.
pub async fn list_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    if !exists(dir).await {
        return Ok(files);
    }
    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some(extension) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Sample {
        name: String,
        score: f32,
    }

    #[tokio::test]
    async fn test_json_atomic_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("sample.json");
        let data = Sample {
            name: "coin_1".to_string(),
            score: 4.5,
        };

        write_json_atomic(&path, &data).await.unwrap();
        assert!(exists(&path).await);
        assert!(!exists(&path.with_extension("tmp")).await);

        let loaded: Sample = read_json(&path).await.unwrap();
        assert_eq!(loaded, data);
    }

    #[tokio::test]
    async fn test_read_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let res: Result<Sample> = read_json(&dir.path().join("absent.json")).await;
        assert!(matches!(res, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_append_and_list() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("run.log");
        append_text(&log, "a\n").await.unwrap();
        append_text(&log, "b\n").await.unwrap();
        let content = tokio::fs::read_to_string(&log).await.unwrap();
        assert_eq!(content, "a\nb\n");

        write_atomic(&dir.path().join("x.json"), b"{}").await.unwrap();
        let files = list_files(dir.path(), "json").await.unwrap();
        assert_eq!(files.len(), 1);
        assert!(list_files(&dir.path().join("none"), "json")
            .await
            .unwrap()
            .is_empty());
    }
}
