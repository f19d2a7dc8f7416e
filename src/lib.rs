//! # synthcrawl - Training Data Crawler for Synthesis Decision Trees
//!
//! **synthcrawl** produces labeled training data for a model that guides a hardware
//! synthesis search. It samples random root-to-leaf walks through the synthesis tree of
//! a target algorithm, turns every visited node into a flat feature row describing the
//! decision and its competing alternatives, and writes the rows plus per-algorithm
//! statistics as CSV.
//!
//! ## Core Workflow
//!
//! 1.  **Provide a Tree**: Implement [`tree::TreeProvider`] for your synthesis engine, or
//!     use [`tree::DumpTreeProvider`] to walk JSON tree dumps.
//! 2.  **Sample**: A [`sampling::Sampler`] performs batched random walks and never fails;
//!     interruptions and errors end the run early with the rows gathered so far.
//! 3.  **Extract**: [`features::extract`] converts each visited node and its siblings into
//!     a [`features::FeatureRow`], shaping parameters by decision kind.
//! 4.  **Crawl**: A [`crawl::Crawler`] runs the sampler over a [`crawl::CrawlConfig`] one
//!     target algorithm at a time and saves each dataset plus a crawl summary.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use synthcrawl::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     synthcrawl::logging::init_logging("info");
//!
//!     let config = CrawlConfig::new()
//!         .with("trees/sum.json", SamplingParams::new(50, 1000))
//!         .with("trees/fibonacci.json", SamplingParams::new(50, 500));
//!
//!     let crawler = Crawler::new(DumpTreeProvider::new(), CsvSink::new(), "data")
//!         .with_interrupt(Interrupt::ctrl_c());
//!
//!     let summary = crawler.crawl_many(Some(config)).await?;
//!     println!("Crawled {} examples", summary.len());
//!     Ok(())
//! }
//! ```

pub mod crawl;
pub mod error;
pub mod features;
pub mod logging;
pub mod node;
pub mod persist;
pub mod prelude;
pub mod sampling;
pub mod tree;
