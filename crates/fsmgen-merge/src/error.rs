//! Error types for scanning and merging

use fsmgen_artifact::DeltaError;

/// Why the construction method could not be delimited
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanFailure {
    /// The signature occurs more than once
    #[error("method signature also found at line {}", .first + 1)]
    Ambiguous {
        /// Index of the first occurrence
        first: usize,
    },

    /// The signature is neither followed by nor ending with an opening brace
    #[error("expected an opening brace on or after the method signature")]
    MissingOpenBrace,

    /// End of file reached before the method body closed
    #[error("method body is never closed")]
    Unterminated,
}

/// Errors during scan, plan and apply
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// The construction method exists but cannot be delimited line by line
    #[error("structural scan failed at line {}: {reason}", .line + 1)]
    StructuralScanFailure {
        /// Index of the offending signature line
        line: usize,
        /// What went wrong
        reason: ScanFailure,
    },

    /// Neither the method nor the class closing brace could be located
    #[error("could not find the class end to insert `{signature}`")]
    ClassBoundaryNotFound {
        /// Signature of the method that needed inserting
        signature: String,
    },

    /// The plan could not be applied
    #[error("delta error: {0}")]
    Delta(#[from] DeltaError),
}

impl MergeError {
    /// Create structural scan failure at `line`
    #[inline]
    #[must_use]
    pub fn scan_failure(line: usize, reason: ScanFailure) -> Self {
        Self::StructuralScanFailure { line, reason }
    }
}

/// Result type alias for merge operations
pub type MergeResult<T> = Result<T, MergeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_failure_reports_one_based_lines() {
        let err = MergeError::scan_failure(4, ScanFailure::Ambiguous { first: 1 });
        assert_eq!(
            err.to_string(),
            "structural scan failed at line 5: method signature also found at line 2"
        );
    }

    #[test]
    fn class_boundary_names_signature() {
        let err = MergeError::ClassBoundaryNotFound {
            signature: "protected override void GenerateStates()".to_string(),
        };
        assert!(err.to_string().contains("GenerateStates()"));
    }
}
