//! Boundary to the synthesis engine that hosts the decision tree.
//!
//! The crawler only needs two things from an engine: a way to open the tree of a
//! target algorithm, and a way to sample one random root-to-leaf walk from it.

pub mod dump;

use crate::error::ProviderError;
use crate::node::DecisionNode;
use async_trait::async_trait;
use std::path::Path;

pub use dump::DumpTreeProvider;

/// A node visited during a walk, together with the children of its parent.
#[derive(Debug, Clone)]
pub struct WalkStep {
    pub node: DecisionNode,
    pub siblings: Vec<DecisionNode>,
}

/// One sampled path through the tree.
#[derive(Debug, Clone)]
pub struct Walk {
    /// Visited nodes, root first.
    pub steps: Vec<WalkStep>,
    /// Outcome label of the walk. Negative when synthesis failed along the path.
    pub label: f64,
}

/// An opened tree that can be sampled repeatedly.
#[async_trait]
pub trait SynthesisTree: Send {
    async fn sample_walk(&mut self) -> Result<Walk, ProviderError>;
}

/// Opens synthesis trees for target algorithms.
#[async_trait]
pub trait TreeProvider: Send + Sync {
    async fn open(&self, source: &Path) -> Result<Box<dyn SynthesisTree>, ProviderError>;
}
