//! Saving and loading the configuration document.

use crate::error::PersistenceError;
use std::path::Path;
use ticket_pool_core::ConfigDocument;

/// Write `document` to `path` as pretty JSON.
///
/// # Errors
///
/// Returns [`PersistenceError::Io`] if the file cannot be written.
pub async fn save(path: &Path, document: &ConfigDocument) -> Result<(), PersistenceError> {
    let text = document.to_json()?;
    tokio::fs::write(path, text)
        .await
        .map_err(|source| PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::info!(path = %path.display(), "Configuration saved");
    Ok(())
}

/// Read and fully parse the document at `path`.
///
/// # Errors
///
/// - [`PersistenceError::Io`] if the file cannot be read
/// - [`PersistenceError::Document`] if a section or field is missing or invalid
pub async fn load(path: &Path) -> Result<ConfigDocument, PersistenceError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let document = ConfigDocument::from_json(&text)?;
    tracing::info!(path = %path.display(), "Configuration loaded");
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use ticket_pool_core::{DocumentError, PoolConfig};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("ticket-system-{}-{name}.json", std::process::id()))
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let path = temp_path("round-trip");
        let document = ConfigDocument::new(PoolConfig::new(30, 3, 2, 9), PoolConfig::new(8, 1, 1, 4));

        assert!(save(&path, &document).await.is_ok());
        let loaded = load(&path).await;
        let _ = tokio::fs::remove_file(&path).await;

        assert_eq!(loaded.ok(), Some(document));
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let result = load(&temp_path("does-not-exist")).await;
        assert!(matches!(result, Err(PersistenceError::Io { .. })));
    }

    #[tokio::test]
    async fn missing_field_is_a_document_error() {
        let path = temp_path("missing-field");
        let written = tokio::fs::write(&path, r#"{"normal": {}, "vip": {}}"#).await;
        assert!(written.is_ok());

        let result = load(&path).await;
        let _ = tokio::fs::remove_file(&path).await;

        assert!(matches!(
            result,
            Err(PersistenceError::Document(DocumentError::MissingField {
                section: "normal",
                field: "totalTickets"
            }))
        ));
    }
}
