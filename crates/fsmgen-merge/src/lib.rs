//! fsmgen Merge Engine
//!
//! Renders fresh state machine sources and merges spec changes into
//! previously generated aggregator files without touching user edits
//! outside the regions the generator owns.
//!
//! # Core Operations
//!
//! - **Render**: entity and aggregator skeletons ([`TemplateRenderer`])
//! - **Scan**: locate declarations and the construction method ([`ArtifactScanner`])
//! - **Plan**: compute the reconciling edit ([`MergePlanner`])
//! - **Apply**: run the plan's [`LineDelta`](fsmgen_artifact::LineDelta) bottom-up
//!
//! # Architecture
//!
//! ```text
//! SourceArtifact → ArtifactScanner → ScanResult ─┐
//!                                                ├→ MergePlanner → MergePlan → LineDelta → SourceArtifact'
//!                          StateMachineSpec ─────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use fsmgen_artifact::{SourceArtifact, StateMachineSpec};
//! use fsmgen_merge::MergeEngine;
//!
//! let engine = MergeEngine::default();
//! let spec = StateMachineSpec::new("Char", "out", &["Idle"], 0).unwrap();
//! let fresh = SourceArtifact::parse(&engine.renderer().render_aggregator(&spec));
//!
//! let grown = StateMachineSpec::new("Char", "out", &["Idle", "Run"], 1).unwrap();
//! let outcome = engine.merge(&fresh, &grown).unwrap();
//! assert!(outcome.artifact.render().contains("this.defaultState = Run;"));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod dialect;
pub mod error;
pub mod planner;
pub mod scanner;
pub mod template;

pub use dialect::Dialect;
pub use error::{MergeError, MergeResult, ScanFailure};
pub use planner::{MergePlan, MergePlanner, MethodPlacement};
pub use scanner::{ArtifactScanner, MethodBounds, ScanResult};
pub use template::TemplateRenderer;

use fsmgen_artifact::{SourceArtifact, StateMachineSpec};

/// Result of merging a spec into an existing artifact
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// The updated artifact
    pub artifact: SourceArtifact,
    /// The plan that produced it
    pub plan: MergePlan,
}

/// Scan, plan and apply in one call
#[derive(Debug, Clone, Default)]
pub struct MergeEngine {
    scanner: ArtifactScanner,
    planner: MergePlanner,
    renderer: TemplateRenderer,
}

impl MergeEngine {
    /// Create engine for `dialect`
    #[must_use]
    pub fn new(dialect: Dialect) -> Self {
        let renderer = TemplateRenderer::new(dialect.clone());
        Self {
            scanner: ArtifactScanner::new(dialect),
            planner: MergePlanner::new(renderer.clone()),
            renderer,
        }
    }

    /// Renderer sharing this engine's dialect
    #[inline]
    #[must_use]
    pub fn renderer(&self) -> &TemplateRenderer {
        &self.renderer
    }

    /// Scanner sharing this engine's dialect
    #[inline]
    #[must_use]
    pub fn scanner(&self) -> &ArtifactScanner {
        &self.scanner
    }

    /// Reconcile `artifact` with `spec`
    ///
    /// # Errors
    /// - [`MergeError::StructuralScanFailure`] if the method cannot be delimited
    /// - [`MergeError::ClassBoundaryNotFound`] if the method is absent and
    ///   there is nowhere to insert it
    /// - [`MergeError::Delta`] if the plan's edits conflict
    pub fn merge(
        &self,
        artifact: &SourceArtifact,
        spec: &StateMachineSpec,
    ) -> MergeResult<MergeOutcome> {
        let scan = self.scanner.scan(artifact)?;
        tracing::debug!(
            declared = scan.declared.len(),
            method_found = scan.method.is_some(),
            "Scanned {}",
            spec.name()
        );

        let plan = self.planner.plan(&scan, spec)?;
        let updated = artifact.apply(&plan.to_delta())?;
        Ok(MergeOutcome {
            artifact: updated,
            plan,
        })
    }
}
