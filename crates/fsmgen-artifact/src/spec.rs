//! Validated state machine specifications
//!
//! [`StateMachineSpec`] is the only input the generator trusts. It is built
//! from raw user text by [`StateMachineSpec::new`], which normalizes every
//! name, drops blanks and duplicates, and resolves the default state.

use crate::identifier::Identifier;
use indexmap::IndexSet;
use std::path::{Path, PathBuf};

/// A normalized, validated description of one state machine
///
/// # Invariants
/// - `states` is non-empty, duplicate-free and in user-declared order
/// - `default_index < states.len()`
/// - `name` is not one of `states`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateMachineSpec {
    name: Identifier,
    path: PathBuf,
    states: Vec<Identifier>,
    default_index: usize,
}

impl StateMachineSpec {
    /// Validate and normalize raw input.
    ///
    /// `default_index` addresses the normalized list, after blanks and
    /// duplicates are dropped.
    ///
    /// # Errors
    /// Checks run in this order and the first failure is returned:
    /// - [`SpecError::EmptyPath`] if `path` is blank
    /// - [`SpecError::EmptyName`] if `name` normalizes to empty
    /// - [`SpecError::EmptyStateList`] if no state survives normalization
    /// - [`SpecError::NameCollidesWithState`] if a state shares the
    ///   aggregator's name (both would map to the same file)
    /// - [`SpecError::DefaultIndexOutOfRange`] if `default_index` is past
    ///   the normalized list
    pub fn new<S: AsRef<str>>(
        name: &str,
        path: &str,
        raw_states: &[S],
        default_index: usize,
    ) -> Result<Self, SpecError> {
        let path = path.trim();
        if path.is_empty() {
            return Err(SpecError::EmptyPath);
        }
        let name = Identifier::parse(name).map_err(|_| SpecError::EmptyName)?;

        let states: IndexSet<Identifier> = raw_states
            .iter()
            .filter_map(|raw| Identifier::normalized(raw.as_ref()))
            .collect();
        if states.is_empty() {
            return Err(SpecError::EmptyStateList);
        }

        if states.contains(&name) {
            return Err(SpecError::NameCollidesWithState(name));
        }
        if default_index >= states.len() {
            return Err(SpecError::DefaultIndexOutOfRange {
                index: default_index,
                len: states.len(),
            });
        }

        Ok(Self {
            name,
            path: PathBuf::from(path),
            states: states.into_iter().collect(),
            default_index,
        })
    }

    /// Aggregator name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &Identifier {
        &self.name
    }

    /// Output directory
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// States in declaration order
    #[inline]
    #[must_use]
    pub fn states(&self) -> &[Identifier] {
        &self.states
    }

    /// Index of the default state within [`states`](Self::states)
    #[inline]
    #[must_use]
    pub fn default_index(&self) -> usize {
        self.default_index
    }

    /// The default state
    #[inline]
    #[must_use]
    pub fn default_state(&self) -> &Identifier {
        &self.states[self.default_index]
    }
}

/// Specification validation failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpecError {
    /// Output path is blank
    #[error("please provide a path")]
    EmptyPath,

    /// State machine name is blank
    #[error("please provide a name for the state machine")]
    EmptyName,

    /// No state left after normalization
    #[error("please provide at least one state to insert into the machine")]
    EmptyStateList,

    /// A state has the same name as the state machine
    #[error("state '{0}' has the same name as the state machine")]
    NameCollidesWithState(Identifier),

    /// Default index past the end of the state list
    #[error("default state index {index} is out of range for {len} states")]
    DefaultIndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of states after normalization
        len: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(spec: &StateMachineSpec) -> Vec<&str> {
        spec.states().iter().map(Identifier::as_str).collect()
    }

    #[test]
    fn blanks_and_duplicates_are_dropped() {
        let spec = StateMachineSpec::new("Char", "/out", &["A", " ", "A", "B"], 1).unwrap();
        assert_eq!(names(&spec), vec!["A", "B"]);
        assert_eq!(spec.default_state().as_str(), "B");
        assert_eq!(spec.default_index(), 1);
    }

    #[test]
    fn names_are_normalized() {
        let spec = StateMachineSpec::new(" Char SM ", " /out ", &["Walk Fast", "Idle"], 0).unwrap();
        assert_eq!(spec.name().as_str(), "CharSM");
        assert_eq!(spec.path(), Path::new("/out"));
        assert_eq!(names(&spec), vec!["WalkFast", "Idle"]);
    }

    #[test]
    fn default_index_addresses_normalized_states() {
        let skip_blank = StateMachineSpec::new("M", "p", &["A", " ", "B"], 1).unwrap();
        assert_eq!(skip_blank.default_state().as_str(), "B");

        let skip_duplicate = StateMachineSpec::new("M", "p", &["A", "A", "B"], 1).unwrap();
        assert_eq!(skip_duplicate.default_state().as_str(), "B");
    }

    #[test]
    fn state_named_like_machine_is_rejected() {
        assert_eq!(
            StateMachineSpec::new("Idle", "p", &["Walk", " Id le"], 0),
            Err(SpecError::NameCollidesWithState(Identifier::parse("Idle").unwrap()))
        );
    }

    #[test]
    fn validation_order() {
        let none: [&str; 0] = [];
        assert_eq!(StateMachineSpec::new("", " ", &none, 0), Err(SpecError::EmptyPath));
        assert_eq!(StateMachineSpec::new("  ", "p", &none, 0), Err(SpecError::EmptyName));
        assert_eq!(
            StateMachineSpec::new("M", "p", &[" ", ""], 0),
            Err(SpecError::EmptyStateList)
        );
    }

    #[test]
    fn default_must_name_a_state() {
        assert_eq!(
            StateMachineSpec::new("M", "p", &["A"], 1),
            Err(SpecError::DefaultIndexOutOfRange { index: 1, len: 1 })
        );
        assert_eq!(
            StateMachineSpec::new("M", "p", &["A", " ", "A"], 1),
            Err(SpecError::DefaultIndexOutOfRange { index: 1, len: 1 })
        );
    }
}
