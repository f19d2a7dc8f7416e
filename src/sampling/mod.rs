//! Batched random walks over one target algorithm's synthesis tree.
//!
//! The sampler never fails: interruptions, provider errors, malformed nodes and even
//! panics inside the provider all end the run early, and the rows gathered up to that
//! point are always handed back.

pub mod interrupt;
pub mod stats;

pub use interrupt::{Interrupt, InterruptHandle};
pub use stats::{SamplingResult, SamplingStats, StopReason};

use crate::error::{ParamsError, SamplingError};
use crate::features::{FeatureRow, extract};
use crate::tree::TreeProvider;
use futures::FutureExt;
use serde::Deserialize;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::path::Path;
use tracing::{error, info, warn};

/// How many walks to take from one target algorithm and how to batch them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SamplingParams {
    #[serde(alias = "samplesPerBatch", alias = "n_samples_per_batch")]
    pub samples_per_batch: usize,
    #[serde(alias = "totalSamples", alias = "n_samples")]
    pub total_samples: usize,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            samples_per_batch: 150,
            total_samples: 10_000,
        }
    }
}

impl SamplingParams {
    pub const fn new(samples_per_batch: usize, total_samples: usize) -> Self {
        Self {
            samples_per_batch,
            total_samples,
        }
    }

    /// Both counts must be positive.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.samples_per_batch == 0 {
            return Err(ParamsError::ZeroBatchSize);
        }
        if self.total_samples == 0 {
            return Err(ParamsError::ZeroTotalSamples);
        }
        Ok(())
    }

    /// Number of batches; zero when the parameters do not pass [`validate`](Self::validate).
    pub fn batch_count(&self) -> usize {
        match self.samples_per_batch {
            0 => 0,
            size => self.total_samples.div_ceil(size),
        }
    }

    /// Number of walks in the given batch; only the last one may be short.
    pub fn batch_len(&self, batch: usize) -> usize {
        let done = batch.saturating_mul(self.samples_per_batch);
        self.samples_per_batch
            .min(self.total_samples.saturating_sub(done))
    }
}

/// Everything gathered by one sampling run, whichever way it ended.
#[derive(Debug, Clone)]
pub struct SamplingOutcome {
    pub example: String,
    pub rows: Vec<FeatureRow>,
    pub samples: usize,
    pub stop: StopReason,
}

impl SamplingOutcome {
    pub fn was_interrupted(&self) -> bool {
        self.stop == StopReason::Interrupted
    }

    pub fn into_result(self) -> SamplingResult {
        SamplingResult::new(self.example, self.rows, self.samples, self.stop)
    }
}

/// Drives random walks against a tree provider and turns every visited node into a row.
pub struct Sampler<P> {
    provider: P,
    interrupt: Interrupt,
}

impl<P: TreeProvider> Sampler<P> {
    pub fn new(provider: P, interrupt: Interrupt) -> Self {
        Self {
            provider,
            interrupt,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn into_provider(self) -> P {
        self.provider
    }

    /// Samples `params.total_samples` walks from the tree of `source`.
    ///
    /// Returns `None` when the source does not exist. Otherwise always returns the
    /// rows accumulated so far, in visit order.
    pub async fn sample(&self, source: &Path, params: SamplingParams) -> Option<SamplingOutcome> {
        if !tokio::fs::try_exists(source).await.unwrap_or(false) {
            error!(
                "Couldn't find a target algorithm description at '{}'.",
                source.display()
            );
            return None;
        }

        let example = example_name(source);
        let started_at = self.interrupt.generation();
        let mut rows = Vec::new();
        let mut samples = 0;

        let run = AssertUnwindSafe(self.run(
            source,
            &example,
            params,
            started_at,
            &mut rows,
            &mut samples,
        ))
        .catch_unwind()
        .await;

        let stop = match run {
            Ok(Ok(stop)) => stop,
            Ok(Err(e)) => {
                error!(
                    example = %example,
                    rows = rows.len(),
                    "Unexpected error, processing nodes gathered so far: {}", e
                );
                StopReason::Failed(e.to_string())
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!(
                    example = %example,
                    rows = rows.len(),
                    "Sampling panicked, processing nodes gathered so far: {}", message
                );
                StopReason::Failed(message)
            }
        };

        Some(self.finalize(example, rows, samples, stop))
    }

    async fn run(
        &self,
        source: &Path,
        example: &str,
        params: SamplingParams,
        started_at: u64,
        rows: &mut Vec<FeatureRow>,
        samples: &mut usize,
    ) -> Result<StopReason, SamplingError> {
        params.validate()?;

        let mut tree = tokio::select! {
            biased;
            _ = self.interrupt.raised_since(started_at) => return Ok(self.interrupted()),
            tree = self.provider.open(source) => tree?,
        };

        let batches = params.batch_count();
        for batch in 0..batches {
            let batch_len = params.batch_len(batch);
            info!(
                "Crawl batch {}/{} of {}: {} walks",
                batch + 1,
                batches,
                example,
                batch_len
            );

            for _ in 0..batch_len {
                let walk = tokio::select! {
                    biased;
                    _ = self.interrupt.raised_since(started_at) => return Ok(self.interrupted()),
                    walk = tree.sample_walk() => walk?,
                };

                for step in &walk.steps {
                    let row = extract(&step.node, &step.siblings, example)?;
                    rows.push(row.with_label(walk.label));
                }
                *samples += 1;
            }
        }

        Ok(StopReason::Completed)
    }

    fn interrupted(&self) -> StopReason {
        warn!("Interrupted by user, processing nodes gathered so far.");
        StopReason::Interrupted
    }

    fn finalize(
        &self,
        example: String,
        rows: Vec<FeatureRow>,
        samples: usize,
        stop: StopReason,
    ) -> SamplingOutcome {
        info!(
            "Finished sampling {} ({}): {} walks, {} rows",
            example,
            stop,
            samples,
            rows.len()
        );
        SamplingOutcome {
            example,
            rows,
            samples,
            stop,
        }
    }
}

/// Label used for a target algorithm in rows and summaries: its file name.
pub fn example_name(source: &Path) -> String {
    source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.display().to_string())
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
