//! Crawls one or many target algorithms and writes their datasets plus a summary.

pub mod config;

pub use config::{CrawlConfig, DEFAULT_DATA_DIR, EXAMPLES_DIR, MANUAL_FULL_CRAWL};

use crate::error::PersistError;
use crate::features::Record;
use crate::persist::ArtifactSink;
use crate::sampling::{Interrupt, Sampler, SamplingParams, SamplingResult};
use crate::tree::TreeProvider;
use std::path::{Path, PathBuf};
use tracing::{error, info};

pub const SUMMARY_SUFFIX: &str = "_crawling_summary";

/// Per-example statistics of a finished crawl, one record per crawled example.
#[derive(Debug, Clone, Default)]
pub struct CrawlSummary {
    pub entries: Vec<Record>,
    /// Where the summary artifact was written, if it was.
    pub path: Option<PathBuf>,
}

impl CrawlSummary {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Runs the sampler over target algorithms one at a time and persists what it gathers.
pub struct Crawler<P, S> {
    sampler: Sampler<P>,
    sink: S,
    data_dir: PathBuf,
}

impl<P: TreeProvider, S: ArtifactSink> Crawler<P, S> {
    pub fn new(provider: P, sink: S, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            sampler: Sampler::new(provider, Interrupt::never()),
            sink,
            data_dir: data_dir.into(),
        }
    }

    /// Lets `interrupt` stop the sampling of whichever example is being crawled.
    pub fn with_interrupt(self, interrupt: Interrupt) -> Self {
        Self {
            sampler: Sampler::new(self.sampler.into_provider(), interrupt),
            sink: self.sink,
            data_dir: self.data_dir,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Crawls a single target algorithm and saves its rows.
    ///
    /// Never fails: a missing source yields `None`, any other problem ends sampling
    /// early and the partial rows are still saved and returned.
    pub async fn crawl_example(
        &self,
        source: &Path,
        params: SamplingParams,
    ) -> Option<SamplingResult> {
        info!(
            "Starting producing model input data from a target algorithm at {}",
            source.display()
        );

        let result = self.sampler.sample(source, params).await?.into_result();

        let suffix = format!("_{}", file_stem(source));
        if let Err(e) = self.sink.save(
            &result.records(),
            &self.data_dir,
            &suffix,
            &format!("dataset of {}", result.example),
        ) {
            error!(
                "Could not save the dataset of {}, keeping it in the summary: {}",
                result.example, e
            );
        }

        Some(result)
    }

    /// Crawls every entry of `config` (the hand-tuned default when `None`) in order,
    /// then saves the crawl summary.
    ///
    /// Only a failure to save the summary itself is reported; the crawled summary
    /// entries are still logged in that case.
    pub async fn crawl_many(
        &self,
        config: Option<CrawlConfig>,
    ) -> Result<CrawlSummary, PersistError> {
        let config = config.unwrap_or_else(|| {
            info!("Using the default hand-tuned crawl config.");
            CrawlConfig::manual_full()
        });

        let listing = config
            .iter()
            .map(|(source, _)| source.display().to_string())
            .collect::<Vec<_>>()
            .join("\n\t");
        info!(
            "Crawling the data from {} examples: \n\t{}",
            config.len(),
            listing
        );

        let mut summary = CrawlSummary::default();
        for (i, (source, params)) in config.iter().enumerate() {
            info!(
                "===================== Processing {} ({} / {}) =====================",
                source.display(),
                i + 1,
                config.len()
            );
            if let Some(result) = self.crawl_example(source, *params).await {
                summary.entries.push(result.summary_record());
            }
        }

        info!(
            "Done! Produced crawling summary for {} examples.",
            summary.len()
        );
        let path = self.sink.save(
            &summary.entries,
            &self.data_dir,
            SUMMARY_SUFFIX,
            "crawling summary",
        );
        match path {
            Ok(path) => {
                summary.path = Some(path);
                Ok(summary)
            }
            Err(e) => {
                error!(
                    "Could not save the crawling summary of {} examples: {}",
                    summary.len(),
                    e
                );
                Err(e)
            }
        }
    }
}

fn file_stem(source: &Path) -> String {
    source
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "example".to_string())
}
