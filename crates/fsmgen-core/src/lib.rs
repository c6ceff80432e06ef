//! fsmgen Core - state machine source generator
//!
//! Turns a [`SpecDocument`] into source files on disk:
//! - Validates and normalizes the spec before touching the filesystem
//! - Writes one entity file per state, never overwriting an existing one
//! - Renders the aggregator fresh, or merges new states into it in place
//!
//! # Example
//!
//! ```rust,no_run
//! use fsmgen_core::{Generator, GeneratorConfig, SpecDocument};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let generator = Generator::new(GeneratorConfig::new());
//! let document = SpecDocument::new("Player", "Assets/States", ["Idle", "Run"], 0);
//!
//! let report = generator.generate(&document).await?;
//! println!("Wrote {} files", report.files_written());
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod config;
pub mod document;
pub mod error;
pub mod generator;
pub mod report;

pub use config::GeneratorConfig;
pub use document::{SpecDocument, SpecFormat};
pub use error::{ConfigError, DocumentError, ErrorKind, GenerationError, GenerationResult};
pub use generator::Generator;
pub use report::{AggregatorOutcome, GenerationReport, MethodAction};

pub use fsmgen_artifact::{Identifier, StateMachineSpec};
pub use fsmgen_merge::Dialect;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving the generator
    pub use crate::{
        AggregatorOutcome, Dialect, GenerationError, GenerationReport, Generator,
        GeneratorConfig, SpecDocument,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
