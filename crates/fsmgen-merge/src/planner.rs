//! Merge planning
//!
//! Turns a [`ScanResult`] and the desired [`StateMachineSpec`] into a
//! [`MergePlan`]: declarations to append after the existing block, and a
//! full replacement (or fresh insertion) of the construction method.

use crate::error::{MergeError, MergeResult};
use crate::scanner::ScanResult;
use crate::template::TemplateRenderer;
use fsmgen_artifact::{ContentHash, Identifier, LineDelta, LineEdit, StateMachineSpec};

/// How the construction method gets updated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodPlacement {
    /// Method exists; lines strictly between the braces are replaced
    ReplaceBody {
        /// Opening brace line
        body_start: usize,
        /// Closing brace line
        body_end: usize,
    },
    /// Method missing; a complete method is inserted before `line`
    Insert {
        /// Class closing brace line
        line: usize,
    },
}

/// The edit reconciling one artifact with one spec
///
/// Bound to the scanned artifact through `base_hash`; applying it to any
/// other content fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePlan {
    base_hash: ContentHash,
    declarations_to_insert: Vec<Identifier>,
    declaration_lines: Vec<String>,
    insertion_line: usize,
    new_method_body: Vec<String>,
    method_lines: Vec<String>,
    placement: MethodPlacement,
}

impl MergePlan {
    /// States that get a new declaration, in spec order
    #[inline]
    #[must_use]
    pub fn declarations_to_insert(&self) -> &[Identifier] {
        &self.declarations_to_insert
    }

    /// Line before which new declarations are inserted
    #[inline]
    #[must_use]
    pub fn insertion_line(&self) -> usize {
        self.insertion_line
    }

    /// Statements that make up the construction method body
    #[inline]
    #[must_use]
    pub fn new_method_body(&self) -> &[String] {
        &self.new_method_body
    }

    /// Class closing brace line, only when the method has to be created
    #[inline]
    #[must_use]
    pub fn method_insertion_line(&self) -> Option<usize> {
        match self.placement {
            MethodPlacement::Insert { line } => Some(line),
            MethodPlacement::ReplaceBody { .. } => None,
        }
    }

    /// How the method is updated
    #[inline]
    #[must_use]
    pub fn placement(&self) -> MethodPlacement {
        self.placement
    }

    /// Hash of the artifact this plan was computed from
    #[inline]
    #[must_use]
    pub fn base_hash(&self) -> &ContentHash {
        &self.base_hash
    }

    /// Express the plan as line edits against the scanned artifact
    #[must_use]
    pub fn to_delta(&self) -> LineDelta {
        let mut delta = LineDelta::new(self.base_hash);
        if !self.declaration_lines.is_empty() {
            delta.push(LineEdit::insert(
                self.insertion_line,
                self.declaration_lines.clone(),
            ));
        }
        match self.placement {
            MethodPlacement::ReplaceBody {
                body_start,
                body_end,
            } => delta.push(LineEdit::replace(
                body_start + 1..body_end,
                self.method_lines.clone(),
            )),
            MethodPlacement::Insert { line } => {
                delta.push(LineEdit::insert(line, self.method_lines.clone()));
            }
        }
        delta
    }
}

/// Computes merge plans
#[derive(Debug, Clone, Default)]
pub struct MergePlanner {
    renderer: TemplateRenderer,
}

impl MergePlanner {
    /// Create planner rendering with `renderer`
    #[inline]
    #[must_use]
    pub fn new(renderer: TemplateRenderer) -> Self {
        Self { renderer }
    }

    /// Plan the merge of `spec` into the scanned artifact.
    ///
    /// # Errors
    /// [`MergeError::ClassBoundaryNotFound`] when the method is absent and
    /// no class closing brace was found to insert it before.
    pub fn plan(&self, scan: &ScanResult, spec: &StateMachineSpec) -> MergeResult<MergePlan> {
        let dialect = self.renderer.dialect();

        let declarations_to_insert: Vec<Identifier> = spec
            .states()
            .iter()
            .filter(|s| !scan.is_declared(s))
            .cloned()
            .collect();
        let declaration_lines = declarations_to_insert
            .iter()
            .map(|s| dialect.declaration_line(s))
            .collect();
        let insertion_line = scan.last_declaration.map_or(0, |idx| idx + 1);

        let new_method_body = self.renderer.method_body(spec);
        let (placement, method_lines) = match (scan.method, scan.class_close) {
            (Some(bounds), _) => (
                MethodPlacement::ReplaceBody {
                    body_start: bounds.body_start,
                    body_end: bounds.body_end,
                },
                new_method_body.clone(),
            ),
            (None, Some(line)) => {
                let mut block = self.renderer.method_block(spec);
                block.push(String::new());
                (MethodPlacement::Insert { line }, block)
            }
            (None, None) => {
                return Err(MergeError::ClassBoundaryNotFound {
                    signature: dialect.method_signature.clone(),
                })
            }
        };

        Ok(MergePlan {
            base_hash: scan.base_hash,
            declarations_to_insert,
            declaration_lines,
            insertion_line,
            new_method_body,
            method_lines,
            placement,
        })
    }
}
