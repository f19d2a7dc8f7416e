//! Common test utilities: node builders, a scripted tree provider and an in-memory sink.
use async_trait::async_trait;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use synthcrawl::prelude::*;

/// Root node with the score used throughout the engine's own fixtures.
#[allow(dead_code)]
pub fn root(sid: &str) -> DecisionNode {
    DecisionNode::from_tag(sid, "RootView", 1010.0, false, Value::Null)
}

/// Single bind decision with a typical engine parameter payload.
#[allow(dead_code)]
pub fn single_bind(sid: &str) -> DecisionNode {
    DecisionNode::from_tag(
        sid,
        "SingleBindView",
        2000.0,
        false,
        json!({
            "tag": "BindEdgeParameter",
            "pCritical": false,
            "pPossibleDeadlock": false,
            "pNumberOfBindedFunctions": 1,
            "pPercentOfBindedInputs": 0.5
        }),
    )
}

#[allow(dead_code)]
pub fn group_bind(sid: &str) -> DecisionNode {
    DecisionNode::from_tag(
        sid,
        "GroupBindView",
        2100.0,
        false,
        json!({
            "tag": "BindEdgeParameter",
            "pOnlyDependentFunctions": true,
            "pNumberOfBindedFunctions": 3
        }),
    )
}

/// Dataflow decision whose not-transferable input flags are `flags`.
#[allow(dead_code)]
pub fn dataflow(sid: &str, flags: Value) -> DecisionNode {
    DecisionNode::from_tag(
        sid,
        "DataflowDecisionView",
        3000.0,
        false,
        json!({
            "pWaitTime": 2,
            "pNotTransferableInputs": flags,
            "pRestrictedTime": false
        }),
    )
}

#[allow(dead_code)]
pub fn refactoring(sid: &str, tag: &str) -> DecisionNode {
    DecisionNode::from_tag(sid, tag, 500.0, false, Value::Null)
}

#[allow(dead_code)]
pub fn terminal(node: DecisionNode) -> DecisionNode {
    DecisionNode::new(
        node.sid(),
        node.kind().clone(),
        node.score(),
        true,
        node.parameters().clone(),
    )
}

/// Root → single bind (with a refactoring alternative) → terminal dataflow.
///
/// Produces three rows; sids are prefixed so walks can be told apart.
#[allow(dead_code)]
pub fn three_step_walk(prefix: &str, label: f64) -> Walk {
    let bind = single_bind(&format!("{prefix}-0"));
    let alt = refactoring(&format!("{prefix}-1"), "BreakLoopView");
    let flow = terminal(dataflow(&format!("{prefix}-0-0"), json!([1, 0, 1])));

    Walk {
        steps: vec![
            WalkStep {
                node: root(&format!("{prefix}-")),
                siblings: vec![],
            },
            WalkStep {
                node: bind.clone(),
                siblings: vec![bind, alt],
            },
            WalkStep {
                node: flow.clone(),
                siblings: vec![flow],
            },
        ],
        label,
    }
}

/// What the scripted tree does on a given call to `sample_walk`.
#[derive(Clone)]
#[allow(dead_code)]
pub enum Step {
    Walk(Walk),
    /// Raises the interrupt, then still returns the walk.
    InterruptWith(Walk),
    Fail(&'static str),
    Panic(&'static str),
}

/// A tree provider replaying a fixed script of walks; the script repeats when exhausted.
#[derive(Clone)]
#[allow(dead_code)]
pub struct ScriptedProvider {
    steps: Arc<Vec<Step>>,
    interrupt: Option<Arc<InterruptHandle>>,
    fail_open: bool,
    opened: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl ScriptedProvider {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: Arc::new(steps),
            interrupt: None,
            fail_open: false,
            opened: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_interrupt(mut self, handle: InterruptHandle) -> Self {
        self.interrupt = Some(Arc::new(handle));
        self
    }

    pub fn failing_open() -> Self {
        let mut provider = Self::new(vec![]);
        provider.fail_open = true;
        provider
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }
}

struct ScriptedTree {
    steps: Arc<Vec<Step>>,
    interrupt: Option<Arc<InterruptHandle>>,
    next: usize,
}

#[async_trait]
impl SynthesisTree for ScriptedTree {
    async fn sample_walk(&mut self) -> std::result::Result<Walk, ProviderError> {
        let step = self.steps[self.next % self.steps.len()].clone();
        self.next += 1;
        match step {
            Step::Walk(walk) => Ok(walk),
            Step::InterruptWith(walk) => {
                if let Some(handle) = &self.interrupt {
                    handle.interrupt();
                }
                Ok(walk)
            }
            Step::Fail(message) => Err(ProviderError::Generic(message.to_string())),
            Step::Panic(message) => panic!("{}", message),
        }
    }
}

#[async_trait]
impl TreeProvider for ScriptedProvider {
    async fn open(
        &self,
        _source: &Path,
    ) -> std::result::Result<Box<dyn SynthesisTree>, ProviderError> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        if self.fail_open {
            return Err(ProviderError::Generic("engine did not start".to_string()));
        }
        Ok(Box::new(ScriptedTree {
            steps: self.steps.clone(),
            interrupt: self.interrupt.clone(),
            next: 0,
        }))
    }
}

/// An artifact saved by [`MemorySink`].
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct Saved {
    pub dir: PathBuf,
    pub suffix: String,
    pub records: Vec<Record>,
}

/// Keeps saved artifacts in memory instead of writing files.
#[derive(Clone, Default)]
#[allow(dead_code)]
pub struct MemorySink {
    saved: Arc<Mutex<Vec<Saved>>>,
}

#[allow(dead_code)]
impl MemorySink {
    pub fn saved(&self) -> Vec<Saved> {
        self.saved.lock().unwrap().clone()
    }
}

impl ArtifactSink for MemorySink {
    fn save(
        &self,
        records: &[Record],
        dir: &Path,
        suffix: &str,
        _what: &str,
    ) -> std::result::Result<PathBuf, PersistError> {
        self.saved.lock().unwrap().push(Saved {
            dir: dir.to_path_buf(),
            suffix: suffix.to_string(),
            records: records.to_vec(),
        });
        Ok(dir.join(format!("memory{suffix}.csv")))
    }
}

/// Creates an (empty) target algorithm source file so the existence check passes.
#[allow(dead_code)]
pub fn touch(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, "{}").unwrap();
    path
}
