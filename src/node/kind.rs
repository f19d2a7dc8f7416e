use std::fmt;

pub const ROOT_TAG: &str = "RootView";
pub const SINGLE_BIND_TAG: &str = "SingleBindView";
pub const GROUP_BIND_TAG: &str = "GroupBindView";
pub const DATAFLOW_TAG: &str = "DataflowDecisionView";

/// The kind of decision a node represents.
///
/// Four kinds are known up front. Refactorings form an open family: any tag that is
/// not one of the known ones is a refactoring labelled by the tag itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DecisionKind {
    Root,
    SingleBind,
    GroupBind,
    Dataflow,
    Refactoring(String),
}

impl DecisionKind {
    /// Classifies a raw decision tag.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            ROOT_TAG => DecisionKind::Root,
            SINGLE_BIND_TAG => DecisionKind::SingleBind,
            GROUP_BIND_TAG => DecisionKind::GroupBind,
            DATAFLOW_TAG => DecisionKind::Dataflow,
            other => DecisionKind::Refactoring(other.to_string()),
        }
    }

    /// The wire tag of this kind, as the tree provider reports it.
    pub fn tag(&self) -> &str {
        match self {
            DecisionKind::Root => ROOT_TAG,
            DecisionKind::SingleBind => SINGLE_BIND_TAG,
            DecisionKind::GroupBind => GROUP_BIND_TAG,
            DecisionKind::Dataflow => DATAFLOW_TAG,
            DecisionKind::Refactoring(label) => label,
        }
    }

    pub fn is_bind(&self) -> bool {
        matches!(self, DecisionKind::SingleBind | DecisionKind::GroupBind)
    }

    pub fn is_refactoring(&self) -> bool {
        matches!(self, DecisionKind::Refactoring(_))
    }
}

impl From<&str> for DecisionKind {
    fn from(tag: &str) -> Self {
        DecisionKind::from_tag(tag)
    }
}

impl fmt::Display for DecisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}
