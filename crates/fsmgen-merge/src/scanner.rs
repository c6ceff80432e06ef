//! Line-granular structural scan of an existing aggregator file
//!
//! No parsing happens here. Declarations are recognized by prefix, and
//! the construction method is delimited by counting lines whose trimmed
//! text is exactly `{` or `}`. A brace that shares its line with anything
//! else is invisible to the scan; user code formatted that way inside the
//! construction method will be mis-delimited.

use crate::dialect::Dialect;
use crate::error::{MergeError, MergeResult, ScanFailure};
use fsmgen_artifact::{ContentHash, Identifier, SourceArtifact};
use indexmap::IndexSet;
use serde::Serialize;

/// Where the construction method sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MethodBounds {
    /// Line holding the signature
    pub signature_line: usize,
    /// Line holding the opening brace (may equal `signature_line`)
    pub body_start: usize,
    /// Line holding the matching closing brace
    pub body_end: usize,
}

/// What the scanner found; recomputed on every merge
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    /// Hash of the scanned artifact
    pub base_hash: ContentHash,
    /// Declared state names in file order
    pub declared: IndexSet<Identifier>,
    /// Last declaration line, if any
    pub last_declaration: Option<usize>,
    /// Construction method, if present
    pub method: Option<MethodBounds>,
    /// Last line that is exactly `}`
    pub class_close: Option<usize>,
}

impl ScanResult {
    /// Whether `state` already has a declaration
    #[inline]
    #[must_use]
    pub fn is_declared(&self, state: &Identifier) -> bool {
        self.declared.contains(state)
    }
}

/// Scanner for one dialect
#[derive(Debug, Clone, Default)]
pub struct ArtifactScanner {
    dialect: Dialect,
}

impl ArtifactScanner {
    /// Create scanner for `dialect`
    #[inline]
    #[must_use]
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    /// Scan `artifact`.
    ///
    /// # Errors
    /// [`MergeError::StructuralScanFailure`] if the method signature occurs
    /// twice, has no opening brace line, or its body never closes.
    pub fn scan(&self, artifact: &SourceArtifact) -> MergeResult<ScanResult> {
        let lines = artifact.lines();

        let mut declared = IndexSet::new();
        let mut last_declaration = None;
        for (idx, line) in lines.iter().enumerate() {
            if let Some(name) = self.dialect.parse_declaration(line.trim()) {
                declared.insert(name);
                last_declaration = Some(idx);
            }
        }

        let method = self.locate_method(lines)?;
        let class_close = lines.iter().rposition(|l| l.trim() == "}");

        Ok(ScanResult {
            base_hash: *artifact.hash(),
            declared,
            last_declaration,
            method,
            class_close,
        })
    }

    fn locate_method(&self, lines: &[String]) -> MergeResult<Option<MethodBounds>> {
        let mut found: Option<MethodBounds> = None;
        let mut idx = 0;
        while idx < lines.len() {
            let trimmed = lines[idx].trim();
            if !self.dialect.is_method_signature(trimmed) {
                idx += 1;
                continue;
            }
            if let Some(first) = found {
                return Err(MergeError::scan_failure(
                    idx,
                    ScanFailure::Ambiguous {
                        first: first.signature_line,
                    },
                ));
            }

            let body_start = if trimmed.ends_with('{') {
                idx
            } else if lines.get(idx + 1).map(|l| l.trim()) == Some("{") {
                idx + 1
            } else {
                return Err(MergeError::scan_failure(idx, ScanFailure::MissingOpenBrace));
            };
            let body_end = matching_close(lines, body_start)
                .ok_or_else(|| MergeError::scan_failure(idx, ScanFailure::Unterminated))?;

            found = Some(MethodBounds {
                signature_line: idx,
                body_start,
                body_end,
            });
            idx = body_end + 1;
        }
        Ok(found)
    }
}

/// Index of the line closing the block opened at `open`
fn matching_close(lines: &[String], open: usize) -> Option<usize> {
    let mut depth = 1usize;
    for (idx, line) in lines.iter().enumerate().skip(open + 1) {
        match line.trim() {
            "{" => depth += 1,
            "}" => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scan(text: &str) -> MergeResult<ScanResult> {
        ArtifactScanner::default().scan(&SourceArtifact::parse(text))
    }

    fn names(result: &ScanResult) -> Vec<&str> {
        result.declared.iter().map(Identifier::as_str).collect()
    }

    const TWO_STATES: &str = "\
public class Char : BaseStateMachine
{
    public IState Idle;
    public IState Walk;

    public override void ChangeState(IState newState)
    {
        base.ChangeState(newState);
    }

    protected override void GenerateStates()
    {
        this.Idle = new Idle(this);
        this.Walk = new Walk(this);
        this.defaultState = Idle;
    }
}
";

    #[test]
    fn finds_declarations_method_and_class_end() {
        let result = scan(TWO_STATES).unwrap();
        assert_eq!(names(&result), vec!["Idle", "Walk"]);
        assert_eq!(result.last_declaration, Some(3));
        assert_eq!(
            result.method,
            Some(MethodBounds {
                signature_line: 10,
                body_start: 11,
                body_end: 15,
            })
        );
        assert_eq!(result.class_close, Some(16));
    }

    #[test]
    fn brace_on_signature_line() {
        let text = "\
class X
{
    protected override void GenerateStates() {
        this.A = new A(this);
    }
}
";
        let method = scan(text).unwrap().method.unwrap();
        assert_eq!(method.body_start, 2);
        assert_eq!(method.body_end, 4);
    }

    #[test]
    fn nested_isolated_braces_are_counted() {
        let text = "\
class X
{
    protected override void GenerateStates()
    {
        if (debug)
        {
            Log();
        }
        this.A = new A(this);
    }
}
";
        let method = scan(text).unwrap().method.unwrap();
        assert_eq!(method.body_end, 9);
    }

    #[test]
    fn inline_braces_are_ignored() {
        let text = "\
class X
{
    protected override void GenerateStates()
    {
        if (debug) { Log(); }
    }
}
";
        let method = scan(text).unwrap().method.unwrap();
        assert_eq!(method.body_end, 5);
    }

    #[test]
    fn scattered_declarations_record_last() {
        let text = "\
class X
{
    public IState A;
    int counter;
    public IState B;
}
";
        let result = scan(text).unwrap();
        assert_eq!(names(&result), vec!["A", "B"]);
        assert_eq!(result.last_declaration, Some(4));
        assert_eq!(result.method, None);
    }

    #[test]
    fn no_closing_brace() {
        let result = scan("class X\n{\n    public IState A;\n").unwrap();
        assert_eq!(result.class_close, None);
        assert_eq!(result.method, None);
    }

    #[test]
    fn duplicate_signature_is_ambiguous() {
        let text = "\
class X
{
    protected override void GenerateStates()
    {
    }
    protected override void GenerateStates()
    {
    }
}
";
        let err = scan(text).unwrap_err();
        assert!(matches!(
            err,
            MergeError::StructuralScanFailure {
                line: 5,
                reason: ScanFailure::Ambiguous { first: 2 }
            }
        ));
    }

    #[test]
    fn signature_without_brace_line() {
        let text = "class X\n{\n    protected override void GenerateStates()\n    this.A = null;\n}\n";
        let err = scan(text).unwrap_err();
        assert!(matches!(
            err,
            MergeError::StructuralScanFailure {
                reason: ScanFailure::MissingOpenBrace,
                ..
            }
        ));
    }

    #[test]
    fn unterminated_body() {
        let text = "class X\n{\n    protected override void GenerateStates()\n    {\n        this.A = null;\n";
        let err = scan(text).unwrap_err();
        assert!(matches!(
            err,
            MergeError::StructuralScanFailure {
                line: 2,
                reason: ScanFailure::Unterminated
            }
        ));
    }

    #[test]
    fn scan_result_serializes() {
        let result = scan(TWO_STATES).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["declared"], serde_json::json!(["Idle", "Walk"]));
        assert_eq!(json["method"]["body_end"], 15);
    }
}
