//! File-backed templates: the per-stove status document and the summary page.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::config::settings::TemplatesConfig;
use crate::models::StoveDocument;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("failed to read template {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("template {path} is not a valid stove document: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("stove template produced id {found:?} instead of {expected:?}")]
    IdMismatch { expected: String, found: String },
}

/// Where handlers get their templates from.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateSource: Send + Sync {
    /// Status document for `stove_id`, with the placeholder substituted.
    fn load_stove_status(&self, stove_id: &str) -> Result<StoveDocument, TemplateError>;

    /// Summary page, verbatim.
    fn load_summary_page(&self) -> Result<String, TemplateError>;
}

/// Reads both templates from disk on every call. Nothing is cached.
#[derive(Debug, Clone)]
pub struct FileTemplateStore {
    stove_status_path: PathBuf,
    summary_path: PathBuf,
    placeholder: String,
}

impl FileTemplateStore {
    pub fn new(config: &TemplatesConfig) -> Self {
        Self {
            stove_status_path: config.directory.join(&config.stove_status_file),
            summary_path: config.directory.join(&config.summary_file),
            placeholder: config.placeholder.clone(),
        }
    }

    /// Load both templates once so a broken install fails at startup.
    pub fn preflight(&self) -> Result<(), TemplateError> {
        self.load_stove_status("preflight")?;
        self.load_summary_page()?;
        Ok(())
    }

    fn read(path: &Path) -> Result<String, TemplateError> {
        std::fs::read_to_string(path).map_err(|source| TemplateError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl TemplateSource for FileTemplateStore {
    fn load_stove_status(&self, stove_id: &str) -> Result<StoveDocument, TemplateError> {
        let text = Self::read(&self.stove_status_path)?.replace(&self.placeholder, stove_id);

        let document: StoveDocument =
            serde_json::from_str(&text).map_err(|source| TemplateError::Json {
                path: self.stove_status_path.clone(),
                source,
            })?;

        if document.stove_id != stove_id {
            return Err(TemplateError::IdMismatch {
                expected: stove_id.to_string(),
                found: document.stove_id,
            });
        }

        debug!("Loaded status template for stove {}", stove_id);
        Ok(document)
    }

    fn load_summary_page(&self) -> Result<String, TemplateError> {
        Self::read(&self.summary_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn bundled() -> FileTemplateStore {
        let mut config = crate::config::Settings::default().templates;
        config.directory = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets");
        FileTemplateStore::new(&config)
    }

    fn store_with_status(content: &str) -> (tempfile::TempDir, FileTemplateStore) {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("stove-status.json")).unwrap();
        file.write_all(content.as_bytes()).unwrap();

        let mut config = crate::config::Settings::default().templates;
        config.directory = dir.path().to_path_buf();
        let store = FileTemplateStore::new(&config);
        (dir, store)
    }

    #[test]
    fn test_bundled_templates_load() {
        let store = bundled();
        store.preflight().unwrap();

        let doc = store.load_stove_status("12345").unwrap();
        assert_eq!(doc.stove_id, "12345");
        assert_eq!(doc.status["name"], "Stove 12345");
        assert_eq!(doc.status["sensors"]["inputRoomTemperature"], "19.6");
        assert_eq!(doc.status["lastConfirmedRevision"], 1572181181);

        let page = store.load_summary_page().unwrap();
        assert!(page.contains("/web/stove/333444"));
    }

    #[test]
    fn test_every_placeholder_is_replaced() {
        let (_dir, store) =
            store_with_status(r#"{"stoveID":"__stove_id__","name":"Stove __stove_id__ (__stove_id__)"}"#);

        let doc = store.load_stove_status("42").unwrap();
        assert_eq!(doc.status["name"], "Stove 42 (42)");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let mut config = crate::config::Settings::default().templates;
        config.directory = PathBuf::from("/definitely/not/here");
        let store = FileTemplateStore::new(&config);

        assert!(matches!(store.load_summary_page(), Err(TemplateError::Io { .. })));
        assert!(matches!(store.preflight(), Err(TemplateError::Io { .. })));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let (_dir, store) = store_with_status(r#"{"stoveID": "__stove_id__", "#);
        assert!(matches!(
            store.load_stove_status("1"),
            Err(TemplateError::Json { .. })
        ));
    }

    #[test]
    fn test_fixed_id_template_is_rejected() {
        let (_dir, store) = store_with_status(r#"{"stoveID": "777"}"#);
        match store.load_stove_status("1") {
            Err(TemplateError::IdMismatch { expected, found }) => {
                assert_eq!(expected, "1");
                assert_eq!(found, "777");
            }
            other => panic!("expected IdMismatch, got {:?}", other),
        }
    }
}
