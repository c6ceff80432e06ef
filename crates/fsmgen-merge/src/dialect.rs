//! Target-language tokens the renderer emits and the scanner recognizes
//!
//! Everything that must agree between a freshly rendered file and a later
//! scan of that file lives here, so the two can never drift apart.

use fsmgen_artifact::Identifier;
use serde::{Deserialize, Deserializer, Serialize};

/// Line-level vocabulary of the generated source files
///
/// The default is the C# / Unity vocabulary the scaffolding was designed
/// for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dialect {
    /// File extension without the dot
    #[serde(deserialize_with = "deserialize_extension")]
    pub extension: String,
    /// Leading tokens of a state field declaration
    pub declaration_prefix: String,
    /// Statement terminator ending a declaration
    pub statement_terminator: String,
    /// Signature line of the state-construction method
    pub method_signature: String,
    /// Field assigned the default state inside the construction method
    pub default_field: String,
    /// One level of indentation
    pub indent: String,
}

impl Default for Dialect {
    fn default() -> Self {
        Self::csharp()
    }
}

impl Dialect {
    /// C# dialect (`public IState Idle;`, `protected override void GenerateStates()`)
    #[must_use]
    pub fn csharp() -> Self {
        Self {
            extension: "cs".to_string(),
            declaration_prefix: "public IState".to_string(),
            statement_terminator: ";".to_string(),
            method_signature: "protected override void GenerateStates()".to_string(),
            default_field: "defaultState".to_string(),
            indent: "    ".to_string(),
        }
    }

    /// With a different file extension (a leading dot is ignored)
    #[inline]
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension: String = extension.into();
        self.extension = strip_dot(&extension);
        self
    }

    /// With a different indentation unit
    #[inline]
    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// File name for a generated type
    #[inline]
    #[must_use]
    pub fn file_name(&self, name: &Identifier) -> String {
        format!("{name}.{}", self.extension)
    }

    /// `    public IState Idle;`
    #[must_use]
    pub fn declaration_line(&self, state: &Identifier) -> String {
        format!(
            "{}{} {state}{}",
            self.indent, self.declaration_prefix, self.statement_terminator
        )
    }

    /// `        this.Idle = new Idle(this);`
    #[must_use]
    pub fn construction_line(&self, state: &Identifier) -> String {
        format!(
            "{0}{0}this.{state} = new {state}(this){1}",
            self.indent, self.statement_terminator
        )
    }

    /// `        this.defaultState = Idle;`
    #[must_use]
    pub fn default_line(&self, state: &Identifier) -> String {
        format!(
            "{0}{0}this.{1} = {state}{2}",
            self.indent, self.default_field, self.statement_terminator
        )
    }

    /// Extract the declared state from an already-trimmed line.
    ///
    /// The line must start with the declaration prefix followed by
    /// whitespace and end with the statement terminator. The name is the
    /// leading run of identifier characters after the prefix, so
    /// `public IState Idle = null;` still declares `Idle`.
    #[must_use]
    pub fn parse_declaration(&self, trimmed: &str) -> Option<Identifier> {
        let rest = trimmed.strip_prefix(self.declaration_prefix.as_str())?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let rest = rest.strip_suffix(self.statement_terminator.as_str())?;
        let rest = rest.trim_start();
        let end = rest
            .find(|c: char| !(c.is_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        Identifier::normalized(&rest[..end])
    }

    /// Whether a trimmed line starts the construction method
    #[inline]
    #[must_use]
    pub fn is_method_signature(&self, trimmed: &str) -> bool {
        trimmed.starts_with(self.method_signature.as_str())
    }
}

fn strip_dot(extension: &str) -> String {
    extension.trim_start_matches('.').to_string()
}

fn deserialize_extension<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Ok(strip_dot(&raw))
}
