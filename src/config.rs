//! Caller-side settings: how much of a file is sampled and which uploads are
//! accepted at all. The validators themselves take no configuration.
//!
//! Settings live in a YAML document; every field is optional.
//!
//! ```yaml
//! max_content_chars: 5000
//! content_sample_chars: 50
//! markup_sample_chars: 500
//! preview_chars: 100
//! allowed_extensions: [txt, pdf, docx]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::diagnostics::{to_error_source, yaml_span, PdaError};
use crate::err_ctx;

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "pushdown.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Upper bound on characters read from a text file.
    pub max_content_chars: usize,
    /// Characters handed to the content validator.
    pub content_sample_chars: usize,
    /// Characters handed to the xml and multilevel validators.
    pub markup_sample_chars: usize,
    /// Characters of input echoed back in reports.
    pub preview_chars: usize,
    /// Extensions a probed file may carry.
    pub allowed_extensions: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_content_chars: 5000,
            content_sample_chars: 50,
            markup_sample_chars: 500,
            preview_chars: 100,
            allowed_extensions: [
                "txt", "pdf", "doc", "docx", "xls", "xlsx", "jpg", "jpeg", "png", "gif", "xml",
                "html", "htm", "json",
            ]
            .iter()
            .map(|ext| ext.to_string())
            .collect(),
        }
    }
}

impl EngineConfig {
    /// Parses a YAML document; `name` labels diagnostics.
    pub fn from_yaml(name: &str, source: &str) -> Result<Self, PdaError> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(source).map_err(|e| {
            let src = to_error_source(name, source);
            err_ctx!(
                Config,
                e.to_string(),
                &src,
                yaml_span(&e, source),
                "see the field list in the pushdown documentation"
            )
        })
    }

    /// Reads and parses a configuration file.
    pub fn from_file(path: &Path) -> Result<Self, PdaError> {
        let source = fs::read_to_string(path).map_err(|e| PdaError::io(path.display(), e))?;
        let config = Self::from_yaml(&path.display().to_string(), &source)?;
        debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// `explicit` when given, else [`DEFAULT_CONFIG_FILE`] if present, else
    /// defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, PdaError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::from_file(&fallback)
                } else {
                    debug!("no configuration file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn allows_extension(&self, extension: &str) -> bool {
        let extension = extension.trim_start_matches('.');
        self.allowed_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(extension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::ErrorType;
    use miette::Diagnostic;

    #[test]
    fn missing_fields_take_defaults() {
        let config = EngineConfig::from_yaml("inline", "preview_chars: 20\n").expect("valid");
        assert_eq!(config.preview_chars, 20);
        assert_eq!(config.max_content_chars, 5000);
        assert!(config.allows_extension("PDF"));
        assert!(config.allows_extension(".json"));
        assert!(!config.allows_extension("exe"));
    }

    #[test]
    fn empty_document_is_the_default() {
        assert_eq!(EngineConfig::from_yaml("inline", "  \n").ok(), Some(EngineConfig::default()));
    }

    #[test]
    fn unknown_fields_are_labeled_config_errors() {
        let err = EngineConfig::from_yaml("pushdown.yaml", "max_chars: 10\n").expect_err("unknown field");
        assert_eq!(err.error_type(), ErrorType::Config);
        assert!(err.to_string().contains("max_chars"));
        assert!(err.source_code().is_some());
    }

    #[test]
    fn reads_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("pushdown.yaml");
        fs::write(&path, "allowed_extensions: [md]\n").expect("write");
        let config = EngineConfig::load(Some(&path)).expect("load");
        assert_eq!(config.allowed_extensions, vec!["md"]);
    }

    #[test]
    fn missing_explicit_file_is_an_io_error() {
        let err = EngineConfig::load(Some(Path::new("/nonexistent/pushdown.yaml"))).expect_err("missing");
        assert_eq!(err.error_type(), ErrorType::Io);
    }
}
