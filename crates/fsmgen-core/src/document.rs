//! Raw, user-authored state machine descriptions
//!
//! A [`SpecDocument`] is what the collaborating surface (editor window,
//! spec file, CLI) hands over. Nothing in it is trusted until
//! [`SpecDocument::validate`] turns it into a
//! [`StateMachineSpec`](fsmgen_artifact::StateMachineSpec).

use crate::error::DocumentError;
use fsmgen_artifact::{SpecError, StateMachineSpec};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unvalidated generator input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecDocument {
    /// Aggregator name, as typed
    pub name: String,
    /// Output directory, as typed
    pub path: String,
    /// State names, as typed and in order
    #[serde(default)]
    pub states: Vec<String>,
    /// Index into `states` of the default state
    #[serde(default)]
    pub default_index: usize,
}

impl SpecDocument {
    /// Create document
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        path: impl Into<String>,
        states: impl IntoIterator<Item = impl Into<String>>,
        default_index: usize,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            states: states.into_iter().map(Into::into).collect(),
            default_index,
        }
    }

    /// Normalize and validate
    ///
    /// # Errors
    /// Returns the first [`SpecError`] found
    pub fn validate(&self) -> Result<StateMachineSpec, SpecError> {
        StateMachineSpec::new(&self.name, &self.path, &self.states, self.default_index)
    }

    /// Parse text in the given format
    ///
    /// # Errors
    /// Returns [`DocumentError::Format`] if the text does not deserialize
    pub fn parse(text: &str, format: SpecFormat) -> Result<Self, DocumentError> {
        let parsed: Result<Self, String> = match format {
            SpecFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
            SpecFormat::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
            SpecFormat::Toml => toml::from_str(text).map_err(|e| e.to_string()),
        };
        parsed.map_err(|message| DocumentError::Format { format, message })
    }

    /// Load a spec file, choosing the format from its extension
    ///
    /// # Errors
    /// - [`DocumentError::UnsupportedExtension`] for unknown extensions
    /// - [`DocumentError::Io`] if the file cannot be read
    /// - [`DocumentError::Format`] if it does not deserialize
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let format = SpecFormat::for_path(path)?;
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| DocumentError::io_error(path, e))?;
        Self::parse(&text, format)
    }
}

/// Supported spec file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecFormat {
    /// JSON
    Json,
    /// YAML
    Yaml,
    /// TOML
    Toml,
}

impl SpecFormat {
    const ALL: [SpecFormat; 3] = [SpecFormat::Json, SpecFormat::Yaml, SpecFormat::Toml];

    /// Get file extensions for this format
    #[inline]
    #[must_use]
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            SpecFormat::Json => &["json"],
            SpecFormat::Yaml => &["yaml", "yml"],
            SpecFormat::Toml => &["toml"],
        }
    }

    /// Get human-readable name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            SpecFormat::Json => "json",
            SpecFormat::Yaml => "yaml",
            SpecFormat::Toml => "toml",
        }
    }

    /// Format for a file path
    ///
    /// # Errors
    /// Returns [`DocumentError::UnsupportedExtension`] if no format claims it
    pub fn for_path(path: &Path) -> Result<Self, DocumentError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.extensions().contains(&extension.as_str()))
            .ok_or(DocumentError::UnsupportedExtension(extension))
    }
}

impl std::fmt::Display for SpecFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn expected() -> SpecDocument {
        SpecDocument::new("Char", "out", ["Idle", "Walk"], 1)
    }

    #[test]
    fn parse_json() {
        let text = r#"{"name": "Char", "path": "out", "states": ["Idle", "Walk"], "default_index": 1}"#;
        assert_eq!(SpecDocument::parse(text, SpecFormat::Json).unwrap(), expected());
    }

    #[test]
    fn parse_yaml() {
        let text = "name: Char\npath: out\nstates:\n  - Idle\n  - Walk\ndefault_index: 1\n";
        assert_eq!(SpecDocument::parse(text, SpecFormat::Yaml).unwrap(), expected());
    }

    #[test]
    fn parse_toml() {
        let text = "name = \"Char\"\npath = \"out\"\nstates = [\"Idle\", \"Walk\"]\ndefault_index = 1\n";
        assert_eq!(SpecDocument::parse(text, SpecFormat::Toml).unwrap(), expected());
    }

    #[test]
    fn default_index_defaults_to_zero() {
        let doc = SpecDocument::parse(r#"{"name": "M", "path": "p", "states": ["A"]}"#, SpecFormat::Json)
            .unwrap();
        assert_eq!(doc.default_index, 0);
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(SpecFormat::for_path(Path::new("a/spec.yml")).unwrap(), SpecFormat::Yaml);
        assert_eq!(SpecFormat::for_path(Path::new("spec.JSON")).unwrap(), SpecFormat::Json);
        assert!(matches!(
            SpecFormat::for_path(Path::new("spec.ini")),
            Err(DocumentError::UnsupportedExtension(ext)) if ext == "ini"
        ));
    }

    #[test]
    fn malformed_text_names_format() {
        let err = SpecDocument::parse("{", SpecFormat::Json).unwrap_err();
        assert!(err.to_string().starts_with("invalid json spec"));
    }

    #[test]
    fn validate_normalizes() {
        let spec = SpecDocument::new(" Char ", "out", ["Idle", " ", "Idle", "Walk"], 1)
            .validate()
            .unwrap();
        assert_eq!(spec.states().len(), 2);
        assert_eq!(spec.default_state().as_str(), "Walk");
    }
}
