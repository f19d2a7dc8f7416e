use super::{SynthesisTree, TreeProvider, Walk, WalkStep};
use crate::error::ProviderError;
use crate::node::{DecisionNode, RawNode};
use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Label of a walk that ends on a node the dump has no reward for.
pub const DEAD_END_LABEL: f64 = -1.0;

/// A node of a serialized synthesis tree, with its subtree.
#[derive(Debug, Deserialize, Clone)]
pub struct DumpNode {
    #[serde(flatten)]
    pub node: RawNode,
    #[serde(default)]
    pub reward: Option<f64>,
    #[serde(default)]
    pub children: Vec<DumpNode>,
}

/// Serves synthesis trees from JSON dumps, one dump file per target algorithm.
#[derive(Debug, Clone, Default)]
pub struct DumpTreeProvider {
    seed: Option<u64>,
}

impl DumpTreeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every opened tree walk the same pseudo-random sequence.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

#[async_trait]
impl TreeProvider for DumpTreeProvider {
    async fn open(&self, source: &Path) -> Result<Box<dyn SynthesisTree>, ProviderError> {
        let content =
            tokio::fs::read_to_string(source)
                .await
                .map_err(|e| ProviderError::Io {
                    path: source.display().to_string(),
                    source: e,
                })?;
        let root: DumpNode = serde_json::from_str(&content)?;
        let tree = DumpTree::from_root(root, self.rng());
        debug!(
            "Loaded synthesis tree dump from {} ({} nodes)",
            source.display(),
            tree.nodes.len()
        );
        Ok(Box::new(tree))
    }
}

struct TreeEntry {
    node: DecisionNode,
    reward: Option<f64>,
    children: Vec<usize>,
}

/// A loaded tree, flattened into an arena so walks can hand out sibling sets cheaply.
pub struct DumpTree {
    nodes: Vec<TreeEntry>,
    rng: StdRng,
}

impl DumpTree {
    pub fn from_root(root: DumpNode, rng: StdRng) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            rng,
        };
        tree.push(root);
        tree
    }

    fn push(&mut self, dump: DumpNode) -> usize {
        let index = self.nodes.len();
        self.nodes.push(TreeEntry {
            node: dump.node.into(),
            reward: dump.reward,
            children: Vec::with_capacity(dump.children.len()),
        });
        for child in dump.children {
            let child_index = self.push(child);
            self.nodes[index].children.push(child_index);
        }
        index
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn walk(&mut self) -> Result<Walk, ProviderError> {
        let root = self.nodes.first().ok_or(ProviderError::EmptyTree)?;
        let mut steps = vec![WalkStep {
            node: root.node.clone(),
            siblings: Vec::new(),
        }];

        let mut current = 0;
        while let Some(&next) = self.nodes[current].children.choose(&mut self.rng) {
            let siblings = self.nodes[current]
                .children
                .iter()
                .map(|&i| self.nodes[i].node.clone())
                .collect();
            steps.push(WalkStep {
                node: self.nodes[next].node.clone(),
                siblings,
            });
            current = next;
        }

        Ok(Walk {
            steps,
            label: self.nodes[current].reward.unwrap_or(DEAD_END_LABEL),
        })
    }
}

#[async_trait]
impl SynthesisTree for DumpTree {
    async fn sample_walk(&mut self) -> Result<Walk, ProviderError> {
        self.walk()
    }
}
