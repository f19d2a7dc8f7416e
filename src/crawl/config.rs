use crate::error::ConfigError;
use crate::sampling::SamplingParams;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding the target algorithm descriptions of the default crawl.
pub const EXAMPLES_DIR: &str = "examples";
/// Directory crawl artifacts are written to by default.
pub const DEFAULT_DATA_DIR: &str = "data";

/// The hand-tuned default crawl: `(path under EXAMPLES_DIR, samples per batch, total samples)`.
///
/// Sample counts were picked from a fixed-size trial crawl so that every example yields
/// roughly 400k rows and the grand total negative label share is close to one half.
/// Only examples with a negative label share strictly between 0 and 1 are included.
/// Batch sizes keep the progress reporting pace similar across examples.
pub const MANUAL_FULL_CRAWL: [(&str, usize, usize); 10] = [
    ("spi3.lua", 149, 39757),
    ("sum.lua", 131, 28014),
    ("constantFolding.lua", 128, 26607),
    ("pid.lua", 72, 14356),
    ("teacup.lua", 88, 16559),
    ("generated/matrix-mult-1x3.lua", 98, 18219),
    ("generated/cyclic3.lua", 95, 17677),
    ("generated/cyclic4.lua", 63, 13345),
    ("generated/cyclic5.lua", 59, 12933),
    ("generated/vars.lua", 27, 10452),
];

/// Target algorithms to crawl, in crawl order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrawlConfig {
    entries: Vec<(PathBuf, SamplingParams)>,
}

impl CrawlConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// The hand-tuned default crawl over the engine's bundled examples.
    pub fn manual_full() -> Self {
        Self::manual_full_in(EXAMPLES_DIR)
    }

    pub fn manual_full_in(examples_dir: impl AsRef<Path>) -> Self {
        let dir = examples_dir.as_ref();
        MANUAL_FULL_CRAWL
            .iter()
            .fold(Self::new(), |config, &(example, per_batch, total)| {
                config.with(dir.join(example), SamplingParams::new(per_batch, total))
            })
    }

    /// Adds an entry; a source that is already present keeps its position.
    pub fn with(mut self, source: impl Into<PathBuf>, params: SamplingParams) -> Self {
        let source = source.into();
        match self.entries.iter_mut().find(|(path, _)| *path == source) {
            Some((_, slot)) => *slot = params,
            None => self.entries.push((source, params)),
        }
        self
    }

    /// Loads a config from a JSON object keyed by target algorithm path, e.g.
    /// `{"examples/sum.lua": {"samplesPerBatch": 131, "totalSamples": 28014}}`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(json)?;
        let Value::Object(map) = value else {
            return Err(ConfigError::NotAMapping);
        };

        let mut config = Self::new();
        for (source, params) in map {
            let params: SamplingParams = serde_json::from_value(params)?;
            params
                .validate()
                .map_err(|err| ConfigError::InvalidParams {
                    example: source.clone(),
                    source: err,
                })?;
            config = config.with(source, params);
        }
        Ok(config)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, &SamplingParams)> {
        self.entries
            .iter()
            .map(|(path, params)| (path.as_path(), params))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
