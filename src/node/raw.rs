use super::model::DecisionNode;
use serde::Deserialize;
use serde_json::Value;

/// Decision header of a node view
#[derive(Debug, Deserialize, Clone)]
pub struct RawDecision {
    pub tag: String,
}

/// Node view as serialized by the synthesis engine.
///
/// Field names follow the engine's camelCase JSON; snake_case is accepted too.
#[derive(Debug, Deserialize, Clone)]
pub struct RawNode {
    pub sid: String,
    #[serde(default)]
    pub score: f64,
    #[serde(alias = "isTerminal")]
    pub is_terminal: bool,
    pub decision: RawDecision,
    #[serde(default)]
    pub parameters: Value,
}

impl From<RawNode> for DecisionNode {
    fn from(raw: RawNode) -> Self {
        DecisionNode::from_tag(
            raw.sid,
            &raw.decision.tag,
            raw.score,
            raw.is_terminal,
            raw.parameters,
        )
    }
}
