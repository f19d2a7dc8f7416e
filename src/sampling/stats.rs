use crate::features::{FeatureRow, Record};
use ahash::AHashSet;
use std::fmt;

/// How a sampling run came to an end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    Completed,
    Interrupted,
    Failed(String),
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::Completed => write!(f, "completed"),
            StopReason::Interrupted => write!(f, "interrupted"),
            StopReason::Failed(_) => write!(f, "failed"),
        }
    }
}

/// Derived statistics of one example's sampling run.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingStats {
    /// Walks that were fully converted into rows.
    pub samples: usize,
    pub rows: usize,
    pub unique_nodes: usize,
    /// Share of labeled rows with a negative label.
    pub neg_label_share: f64,
    pub avg_rows_per_sample: f64,
    pub stop: StopReason,
}

impl SamplingStats {
    pub fn from_rows(rows: &[FeatureRow], samples: usize, stop: StopReason) -> Self {
        let unique_nodes = rows
            .iter()
            .map(|row| row.sid.as_str())
            .collect::<AHashSet<_>>()
            .len();

        let (labeled, negative) = rows
            .iter()
            .filter_map(|row| row.label)
            .fold((0usize, 0usize), |(labeled, negative), label| {
                (labeled + 1, negative + usize::from(label < 0.0))
            });

        Self {
            samples,
            rows: rows.len(),
            unique_nodes,
            neg_label_share: ratio(negative, labeled),
            avg_rows_per_sample: ratio(rows.len(), samples),
            stop,
        }
    }

    /// Appends the stats as summary columns.
    pub fn write_into(&self, record: &mut Record) {
        record.insert("samples", self.samples);
        record.insert("rows", self.rows);
        record.insert("unique_nodes", self.unique_nodes);
        record.insert("neg_label_share", self.neg_label_share);
        record.insert("avg_rows_per_sample", self.avg_rows_per_sample);
        record.insert("stop", self.stop.to_string());
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// Rows and statistics produced for one target algorithm.
#[derive(Debug, Clone)]
pub struct SamplingResult {
    pub example: String,
    pub rows: Vec<FeatureRow>,
    pub stats: SamplingStats,
}

impl SamplingResult {
    pub fn new(example: String, rows: Vec<FeatureRow>, samples: usize, stop: StopReason) -> Self {
        let stats = SamplingStats::from_rows(&rows, samples, stop);
        Self {
            example,
            rows,
            stats,
        }
    }

    pub fn records(&self) -> Vec<Record> {
        self.rows.iter().map(FeatureRow::to_record).collect()
    }

    /// One line of the crawl summary: `{example, ...stats}`.
    pub fn summary_record(&self) -> Record {
        let mut record = Record::new();
        record.insert("example", self.example.as_str());
        self.stats.write_into(&mut record);
        record
    }
}
