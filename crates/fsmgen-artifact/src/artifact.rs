//! Line-oriented source artifacts
//!
//! A [`SourceArtifact`] is the in-memory form of one generated file: an
//! ordered sequence of lines plus the line ending the file was written
//! with. The merge engine only ever reasons about whole lines.

use crate::hash::ContentHash;
use serde::{Deserialize, Serialize};

/// Line terminator used when rendering an artifact back to text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
}

impl LineEnding {
    /// Detect the ending used by `text` (any `\r\n` wins)
    #[inline]
    #[must_use]
    pub fn detect(text: &str) -> Self {
        if text.contains("\r\n") {
            Self::CrLf
        } else {
            Self::Lf
        }
    }

    /// The terminator itself
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// One text file held as lines
///
/// # Invariants
/// - `hash` is always `ContentHash::of_lines(&lines)`
/// - no element of `lines` contains a line terminator
/// - immutable after construction; edits produce a new artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceArtifact {
    lines: Vec<String>,
    line_ending: LineEnding,
    hash: ContentHash,
}

impl SourceArtifact {
    /// Build from lines using `\n` endings
    #[inline]
    #[must_use]
    pub fn new(lines: Vec<String>) -> Self {
        Self::with_line_ending(lines, LineEnding::Lf)
    }

    /// Build from lines with an explicit ending
    #[must_use]
    pub fn with_line_ending(lines: Vec<String>, line_ending: LineEnding) -> Self {
        let hash = ContentHash::of_lines(&lines);
        Self {
            lines,
            line_ending,
            hash,
        }
    }

    /// Split file text into lines.
    ///
    /// Both `\n` and `\r\n` terminate a line; a trailing terminator does not
    /// produce an extra empty line.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let lines = text.lines().map(str::to_owned).collect();
        Self::with_line_ending(lines, LineEnding::detect(text))
    }

    /// Render back to file text; every line, including the last, is terminated
    #[must_use]
    pub fn render(&self) -> String {
        let ending = self.line_ending.as_str();
        let capacity = self.lines.iter().map(|l| l.len() + ending.len()).sum();
        let mut out = String::with_capacity(capacity);
        for line in &self.lines {
            out.push_str(line);
            out.push_str(ending);
        }
        out
    }

    /// All lines
    #[inline]
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the artifact has no lines
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Content hash of the lines
    #[inline]
    #[must_use]
    pub fn hash(&self) -> &ContentHash {
        &self.hash
    }

    /// Line ending used by [`render`](Self::render)
    #[inline]
    #[must_use]
    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Recompute the hash and compare with the stored one
    #[inline]
    #[must_use]
    pub fn verify(&self) -> bool {
        ContentHash::of_lines(&self.lines) == self.hash
    }

    pub(crate) fn into_lines(self) -> Vec<String> {
        self.lines
    }
}
