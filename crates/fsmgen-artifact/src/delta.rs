//! Line deltas for artifact transformations
//!
//! A [`LineDelta`] is a batch of [`LineEdit`]s expressed against one
//! specific artifact (identified by its content hash). All edit indices
//! refer to the ORIGINAL artifact; [`SourceArtifact::apply`] applies them
//! bottom-up so earlier indices never shift under later edits.

use crate::artifact::SourceArtifact;
use crate::hash::ContentHash;
use std::ops::Range;

/// Replace `remove` lines starting at `start` with `insert`
///
/// A pure insertion has `remove == 0`; `start == len` appends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEdit {
    start: usize,
    remove: usize,
    insert: Vec<String>,
}

impl LineEdit {
    /// Insert `lines` before line `at`
    #[inline]
    #[must_use]
    pub fn insert(at: usize, lines: Vec<String>) -> Self {
        Self {
            start: at,
            remove: 0,
            insert: lines,
        }
    }

    /// Replace the lines in `range` with `lines`
    #[inline]
    #[must_use]
    pub fn replace(range: Range<usize>, lines: Vec<String>) -> Self {
        Self {
            start: range.start,
            remove: range.end.saturating_sub(range.start),
            insert: lines,
        }
    }

    /// First affected line
    #[inline]
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// One past the last removed line
    #[inline]
    #[must_use]
    pub fn end(&self) -> usize {
        self.start + self.remove
    }

    /// Lines written in place of the removed range
    #[inline]
    #[must_use]
    pub fn inserted(&self) -> &[String] {
        &self.insert
    }
}

/// A set of non-overlapping edits bound to a base artifact
///
/// # Invariants
/// - `base_hash` must match the artifact being transformed
/// - removed ranges never overlap; insertions at the same index keep the
///   order in which they were added
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDelta {
    base_hash: ContentHash,
    edits: Vec<LineEdit>,
}

impl LineDelta {
    /// Empty delta against `base_hash`
    #[inline]
    #[must_use]
    pub fn new(base_hash: ContentHash) -> Self {
        Self {
            base_hash,
            edits: Vec::new(),
        }
    }

    /// Empty delta against `artifact`
    #[inline]
    #[must_use]
    pub fn for_artifact(artifact: &SourceArtifact) -> Self {
        Self::new(*artifact.hash())
    }

    /// Add an edit (builder style)
    #[inline]
    #[must_use]
    pub fn with_edit(mut self, edit: LineEdit) -> Self {
        self.edits.push(edit);
        self
    }

    /// Add an edit
    #[inline]
    pub fn push(&mut self, edit: LineEdit) {
        self.edits.push(edit);
    }

    /// Edits in insertion order
    #[inline]
    #[must_use]
    pub fn edits(&self) -> &[LineEdit] {
        &self.edits
    }

    /// Base hash this delta was computed against
    #[inline]
    #[must_use]
    pub fn base_hash(&self) -> &ContentHash {
        &self.base_hash
    }

    /// Whether applying this delta changes nothing structurally
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Verify the delta can apply to `artifact`
    ///
    /// # Errors
    /// Returns error if the base hash doesn't match
    pub fn validate_base(&self, artifact: &SourceArtifact) -> Result<(), DeltaError> {
        let actual = *artifact.hash();
        if self.base_hash != actual {
            return Err(DeltaError::BaseMismatch {
                expected: self.base_hash,
                actual,
            });
        }
        Ok(())
    }

    /// Edits sorted by start; ties keep insertion order
    fn ordered(&self, len: usize) -> Result<Vec<&LineEdit>, DeltaError> {
        let mut ordered: Vec<&LineEdit> = self.edits.iter().collect();
        ordered.sort_by_key(|e| e.start);

        for edit in &ordered {
            if edit.end() > len {
                return Err(DeltaError::OutOfBounds {
                    start: edit.start,
                    end: edit.end(),
                    len,
                });
            }
        }
        for pair in ordered.windows(2) {
            if pair[0].end() > pair[1].start {
                return Err(DeltaError::Overlapping {
                    first: pair[0].start..pair[0].end(),
                    second: pair[1].start..pair[1].end(),
                });
            }
        }
        Ok(ordered)
    }
}

impl SourceArtifact {
    /// Apply `delta`, producing a new artifact
    ///
    /// # Errors
    /// - [`DeltaError::BaseMismatch`] if the delta was computed for other content
    /// - [`DeltaError::OutOfBounds`] if an edit reaches past the last line
    /// - [`DeltaError::Overlapping`] if two edits touch the same lines
    pub fn apply(&self, delta: &LineDelta) -> Result<SourceArtifact, DeltaError> {
        delta.validate_base(self)?;
        let ordered = delta.ordered(self.len())?;

        let ending = self.line_ending();
        let mut lines = self.clone().into_lines();
        for edit in ordered.into_iter().rev() {
            lines.splice(edit.start..edit.end(), edit.insert.iter().cloned());
        }
        Ok(SourceArtifact::with_line_ending(lines, ending))
    }
}

/// Errors specific to delta operations
#[derive(Debug, thiserror::Error)]
pub enum DeltaError {
    /// Delta computed against different content
    #[error("base hash mismatch: expected {expected}, got {actual}")]
    BaseMismatch {
        /// Hash the delta was planned against
        expected: ContentHash,
        /// Hash of the artifact it was applied to
        actual: ContentHash,
    },

    /// Edit reaches past the end of the artifact
    #[error("edit {start}..{end} out of bounds for {len} lines")]
    OutOfBounds {
        /// Edit start
        start: usize,
        /// Edit end (exclusive)
        end: usize,
        /// Artifact length
        len: usize,
    },

    /// Two edits touch the same lines
    #[error("overlapping edits: {first:?} and {second:?}")]
    Overlapping {
        /// Earlier edit range
        first: Range<usize>,
        /// Later edit range
        second: Range<usize>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    fn artifact(items: &[&str]) -> SourceArtifact {
        SourceArtifact::new(lines(items))
    }

    #[test]
    fn indices_refer_to_original_lines() {
        let base = artifact(&["a", "b", "c", "d"]);
        let delta = LineDelta::for_artifact(&base)
            .with_edit(LineEdit::insert(1, lines(&["a2"])))
            .with_edit(LineEdit::replace(2..3, lines(&["C1", "C2"])));

        let out = base.apply(&delta).unwrap();
        assert_eq!(out.lines(), lines(&["a", "a2", "b", "C1", "C2", "d"]).as_slice());
    }

    #[test]
    fn edits_listed_out_of_order_still_apply() {
        let base = artifact(&["a", "b", "c"]);
        let delta = LineDelta::for_artifact(&base)
            .with_edit(LineEdit::replace(2..3, lines(&["z"])))
            .with_edit(LineEdit::insert(0, lines(&["top"])));

        let out = base.apply(&delta).unwrap();
        assert_eq!(out.lines(), lines(&["top", "a", "b", "z"]).as_slice());
    }

    #[test]
    fn same_index_inserts_keep_order() {
        let base = artifact(&["x"]);
        let delta = LineDelta::for_artifact(&base)
            .with_edit(LineEdit::insert(1, lines(&["first"])))
            .with_edit(LineEdit::insert(1, lines(&["second"])));

        let out = base.apply(&delta).unwrap();
        assert_eq!(out.lines(), lines(&["x", "first", "second"]).as_slice());
    }

    #[test]
    fn append_at_end_is_in_bounds() {
        let base = artifact(&["x"]);
        let delta = LineDelta::for_artifact(&base).with_edit(LineEdit::insert(1, lines(&["y"])));
        assert_eq!(base.apply(&delta).unwrap().len(), 2);
    }

    #[test]
    fn rejects_foreign_base() {
        let base = artifact(&["a"]);
        let other = artifact(&["b"]);
        let delta = LineDelta::for_artifact(&other);
        assert!(matches!(base.apply(&delta), Err(DeltaError::BaseMismatch { .. })));
    }

    #[test]
    fn rejects_out_of_bounds() {
        let base = artifact(&["a", "b"]);
        let delta = LineDelta::for_artifact(&base).with_edit(LineEdit::replace(1..3, vec![]));
        assert!(matches!(
            base.apply(&delta),
            Err(DeltaError::OutOfBounds { start: 1, end: 3, len: 2 })
        ));
    }

    #[test]
    fn rejects_overlap() {
        let base = artifact(&["a", "b", "c"]);
        let delta = LineDelta::for_artifact(&base)
            .with_edit(LineEdit::replace(0..2, vec![]))
            .with_edit(LineEdit::insert(1, lines(&["x"])));
        assert!(matches!(base.apply(&delta), Err(DeltaError::Overlapping { .. })));
    }

    #[test]
    fn empty_delta_is_identity() {
        let base = SourceArtifact::parse("a\r\nb\r\n");
        let out = base.apply(&LineDelta::for_artifact(&base)).unwrap();
        assert_eq!(out, base);
    }
}
