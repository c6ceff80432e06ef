//! fsmgen Artifact System
//!
//! Line-based artifacts and the value types every other fsmgen crate
//! builds on.
//!
//! # Core Concepts
//!
//! - [`Identifier`]: whitespace-free, non-empty name produced by [`normalize`]
//! - [`StateMachineSpec`]: validated generator input
//! - [`SourceArtifact`]: one file as an ordered sequence of lines
//! - [`LineDelta`]: edits bound to a specific artifact by [`ContentHash`]
//!
//! # Example
//!
//! ```rust
//! use fsmgen_artifact::{LineDelta, LineEdit, SourceArtifact};
//!
//! let artifact = SourceArtifact::parse("class A\n{\n}\n");
//! let delta = LineDelta::for_artifact(&artifact)
//!     .with_edit(LineEdit::insert(2, vec!["    int x;".to_string()]));
//! let updated = artifact.apply(&delta).unwrap();
//! assert_eq!(updated.render(), "class A\n{\n    int x;\n}\n");
//! ```

#![warn(unreachable_pub)]

mod artifact;
mod delta;
mod hash;
mod identifier;
mod spec;

pub use artifact::{LineEnding, SourceArtifact};
pub use delta::{DeltaError, LineDelta, LineEdit};
pub use hash::ContentHash;
pub use identifier::{normalize, Identifier, IdentifierError};
pub use spec::{SpecError, StateMachineSpec};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn spec_drives_line_edits() {
        let spec = StateMachineSpec::new("Char", "out", &["Idle", "Walk"], 0).unwrap();
        let artifact = SourceArtifact::parse("{\n}\n");

        let body: Vec<String> = spec
            .states()
            .iter()
            .map(|s| format!("    {s};"))
            .collect();
        let delta = LineDelta::for_artifact(&artifact).with_edit(LineEdit::insert(1, body));
        let updated = artifact.apply(&delta).unwrap();

        assert_eq!(updated.render(), "{\n    Idle;\n    Walk;\n}\n");
        assert!(updated.verify());
        assert_ne!(updated.hash(), artifact.hash());
    }
}
