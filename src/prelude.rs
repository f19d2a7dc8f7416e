//! Prelude module for convenient imports
//!
//! Re-exports the types needed to configure and run a crawl, so a binary only needs
//! `use synthcrawl::prelude::*;`.

// Crawling and sampling
pub use crate::crawl::{CrawlConfig, CrawlSummary, Crawler};
pub use crate::sampling::{
    Interrupt, InterruptHandle, Sampler, SamplingOutcome, SamplingParams, SamplingResult,
    SamplingStats, StopReason,
};

// Tree boundary
pub use crate::node::{DecisionKind, DecisionNode};
pub use crate::tree::{DumpTreeProvider, SynthesisTree, TreeProvider, Walk, WalkStep};

// Feature rows
pub use crate::features::{AlternativeCounts, FeatureRow, FieldValue, Record, RowParams, extract};

// Persistence
pub use crate::persist::{ArtifactSink, CsvSink};

// Error types
pub use crate::error::{
    ConfigError, ExtractionError, ParamsError, PersistError, ProviderError, SamplingError,
};

pub use std::path::{Path, PathBuf};

// Result type alias for binaries and examples
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
