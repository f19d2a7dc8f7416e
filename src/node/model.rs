use super::kind::DecisionKind;
use serde_json::Value;

/// One node of the synthesis search tree, as seen at sampling time.
///
/// Nodes are built once and never mutated. The parameter payload is kept as the raw
/// JSON the provider sent, because its shape is only checked when a feature row is
/// extracted from it.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionNode {
    sid: String,
    kind: DecisionKind,
    score: f64,
    is_terminal: bool,
    parameters: Value,
}

impl DecisionNode {
    pub fn new(
        sid: impl Into<String>,
        kind: DecisionKind,
        score: f64,
        is_terminal: bool,
        parameters: Value,
    ) -> Self {
        Self {
            sid: sid.into(),
            kind,
            score,
            is_terminal,
            parameters,
        }
    }

    /// Builds a node from its raw decision tag.
    pub fn from_tag(
        sid: impl Into<String>,
        tag: &str,
        score: f64,
        is_terminal: bool,
        parameters: Value,
    ) -> Self {
        Self::new(sid, DecisionKind::from_tag(tag), score, is_terminal, parameters)
    }

    pub fn sid(&self) -> &str {
        &self.sid
    }

    pub fn kind(&self) -> &DecisionKind {
        &self.kind
    }

    pub fn tag(&self) -> &str {
        self.kind.tag()
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn is_terminal(&self) -> bool {
        self.is_terminal
    }

    pub fn parameters(&self) -> &Value {
        &self.parameters
    }
}
