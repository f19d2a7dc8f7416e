use thiserror::Error;

/// Contract violations raised while turning a decision node into a feature row.
///
/// These indicate that the tree provider handed over a payload that does not match
/// the shape implied by the node's decision kind.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionError {
    #[error("Node '{sid}' ({tag}) must carry its parameters as a mapping, found: {found}")]
    ParametersNotMapping {
        sid: String,
        tag: String,
        found: String,
    },

    #[error("Node '{sid}' is missing the required parameter field '{field}'")]
    MissingField { sid: String, field: &'static str },

    #[error("Parameter field '{field}' of node '{sid}' must be a sequence, found: {found}")]
    NotASequence {
        sid: String,
        field: &'static str,
        found: String,
    },

    #[error("Parameter field '{field}' of node '{sid}' holds a non-integer flag: {found}")]
    NonIntegerFlag {
        sid: String,
        field: &'static str,
        found: String,
    },

    #[error("Parameter field '{field}' of node '{sid}' clashes with a row column of the same name")]
    ColumnCollision { sid: String, field: String },
}

/// Errors reported by a tree provider while opening a tree or sampling a walk.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Could not read tree source '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse tree dump: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("The synthesis tree has no root node")]
    EmptyTree,

    #[error("Tree provider failure: {0}")]
    Generic(String),
}

/// Sampling parameters that cannot drive a run.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamsError {
    #[error("samplesPerBatch must be positive")]
    ZeroBatchSize,

    #[error("totalSamples must be positive")]
    ZeroTotalSamples,
}

/// Anything that stops a sampling run from completing.
#[derive(Error, Debug)]
pub enum SamplingError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Params(#[from] ParamsError),
}

/// Errors that can occur while writing tabular artifacts.
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Could not prepare output location '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Errors that can occur when loading a crawl configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read crawl config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse crawl config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Crawl config must be a JSON object keyed by target algorithm path")]
    NotAMapping,

    #[error("Invalid sampling parameters for '{example}': {source}")]
    InvalidParams {
        example: String,
        #[source]
        source: ParamsError,
    },
}
