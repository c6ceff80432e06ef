//! Boilerplate for entity and aggregator files

use crate::dialect::Dialect;
use fsmgen_artifact::{Identifier, StateMachineSpec};

/// Renders the fixed skeletons
///
/// Entity files are only ever rendered for states whose file does not
/// exist yet; the renderer itself knows nothing about the filesystem.
#[derive(Debug, Clone, Default)]
pub struct TemplateRenderer {
    dialect: Dialect,
}

impl TemplateRenderer {
    /// Create renderer for `dialect`
    #[inline]
    #[must_use]
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    /// Dialect in use
    #[inline]
    #[must_use]
    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// Skeleton for one state bound to its aggregator type
    #[must_use]
    pub fn render_entity(&self, entity: &Identifier, aggregator: &Identifier) -> String {
        let i = &self.dialect.indent;
        let lines = [
            "using System;".to_string(),
            "using UnityEngine;".to_string(),
            String::new(),
            format!("public class {entity} : BaseState<{aggregator}>"),
            "{".to_string(),
            format!("{i}public {entity}({aggregator} stateMachine) : base(stateMachine)"),
            format!("{i}{{"),
            format!(
                "{i}{i}if (stateMachine == null) throw new ArgumentNullException(nameof(stateMachine));"
            ),
            format!("{i}}}"),
            String::new(),
            format!("{i}public override void Enter() {{ }}"),
            format!("{i}public override void StateUpdate() {{ }}"),
            format!("{i}public override void StateLateUpdate() {{ }}"),
            format!("{i}public override void StateFixedUpdate() {{ }}"),
            "}".to_string(),
        ];
        join_lines(&lines)
    }

    /// Complete aggregator file for a first generation
    #[must_use]
    pub fn render_aggregator(&self, spec: &StateMachineSpec) -> String {
        let i = &self.dialect.indent;
        let mut lines = vec![
            format!("public class {} : BaseStateMachine", spec.name()),
            "{".to_string(),
        ];
        lines.extend(spec.states().iter().map(|s| self.dialect.declaration_line(s)));
        lines.push(String::new());
        lines.extend([
            format!("{i}public override void ChangeState(IState newState)"),
            format!("{i}{{"),
            format!("{i}{i}base.ChangeState(newState);"),
            format!("{i}}}"),
            String::new(),
        ]);
        lines.extend(self.method_block(spec));
        lines.push("}".to_string());
        join_lines(&lines)
    }

    /// Statements of the construction method: every state, then the default
    #[must_use]
    pub fn method_body(&self, spec: &StateMachineSpec) -> Vec<String> {
        let mut body: Vec<String> = spec
            .states()
            .iter()
            .map(|s| self.dialect.construction_line(s))
            .collect();
        body.push(self.dialect.default_line(spec.default_state()));
        body
    }

    /// The construction method from signature to closing brace
    #[must_use]
    pub fn method_block(&self, spec: &StateMachineSpec) -> Vec<String> {
        let i = &self.dialect.indent;
        let mut block = vec![
            format!("{i}{}", self.dialect.method_signature),
            format!("{i}{{"),
        ];
        block.extend(self.method_body(spec));
        block.push(format!("{i}}}"));
        block
    }
}

fn join_lines(lines: &[String]) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
