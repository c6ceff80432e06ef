//! Generator configuration
//!
//! Everything here has a working default; a TOML file only needs the keys
//! it wants to change:
//!
//! ```toml
//! [dialect]
//! extension = "txt"
//! indent = "\t"
//! ```

use crate::error::ConfigError;
use fsmgen_merge::Dialect;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Generator configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Tokens and layout of the generated sources
    pub dialect: Dialect,
}

impl GeneratorConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a different target file extension
    #[inline]
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.dialect = self.dialect.with_extension(extension);
        self
    }

    /// With a different dialect
    #[inline]
    #[must_use]
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Parse TOML text
    ///
    /// # Errors
    /// Returns [`ConfigError::Toml`] on malformed input and
    /// [`ConfigError::Invalid`] if a required token is blank.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file
    ///
    /// # Errors
    /// As [`from_toml_str`](Self::from_toml_str), plus [`ConfigError::Io`].
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ConfigError::io_error(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Render as TOML
    ///
    /// # Errors
    /// Returns [`ConfigError::TomlWrite`] if serialization fails
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check that the scanner has something to match on and the renderer
    /// something to indent with
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] naming the first blank field
    pub fn validate(&self) -> Result<(), ConfigError> {
        let d = &self.dialect;
        let required = [
            ("extension", &d.extension),
            ("declaration_prefix", &d.declaration_prefix),
            ("statement_terminator", &d.statement_terminator),
            ("method_signature", &d.method_signature),
            ("default_field", &d.default_field),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("dialect.{field} must not be blank")));
            }
        }
        // indent is whitespace, so not trimmed
        if d.indent.is_empty() {
            return Err(ConfigError::Invalid("dialect.indent must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_default() {
        let config = GeneratorConfig::from_toml_str("").unwrap();
        assert_eq!(config, GeneratorConfig::default());
        assert_eq!(config.dialect.extension, "cs");
    }

    #[test]
    fn partial_dialect_override() {
        let config = GeneratorConfig::from_toml_str("[dialect]\nextension = \"txt\"\n").unwrap();
        assert_eq!(config.dialect.extension, "txt");
        assert_eq!(config.dialect.declaration_prefix, "public IState");
    }

    #[test]
    fn blank_token_is_rejected() {
        let err = GeneratorConfig::from_toml_str("[dialect]\nmethod_signature = \"  \"\n").unwrap_err();
        assert!(err.to_string().contains("method_signature"));
    }

    #[test]
    fn leading_dot_in_extension_is_dropped() {
        let config = GeneratorConfig::from_toml_str("[dialect]\nextension = \".txt\"\n").unwrap();
        assert_eq!(config.dialect.extension, "txt");
    }

    #[test]
    fn empty_indent_is_rejected() {
        let err = GeneratorConfig::from_toml_str("[dialect]\nindent = \"\"\n").unwrap_err();
        assert!(err.to_string().contains("indent"));

        let tabs = GeneratorConfig::from_toml_str("[dialect]\nindent = \"\\t\"\n").unwrap();
        assert_eq!(tabs.dialect.indent, "\t");
    }

    #[test]
    fn toml_round_trip() {
        let config = GeneratorConfig::new().with_extension("gen");
        let text = config.to_toml_string().unwrap();
        assert_eq!(GeneratorConfig::from_toml_str(&text).unwrap(), config);
    }
}
