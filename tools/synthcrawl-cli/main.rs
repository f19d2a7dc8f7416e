use clap::{Parser, Subcommand};
use std::time::Instant;
use synthcrawl::crawl::DEFAULT_DATA_DIR;
use synthcrawl::logging::init_logging;
use synthcrawl::prelude::*;

/// Crawls synthesis trees and produces model training data
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory the datasets and the crawl summary are written to
    #[arg(short, long, default_value = DEFAULT_DATA_DIR, global = true)]
    data_dir: PathBuf,

    /// Seed for the random walks, for reproducible crawls
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl every target algorithm of a config and write a crawl summary
    Crawl {
        /// JSON crawl config; the hand-tuned default crawl is used when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Crawl a single target algorithm and report how long it took
    Example {
        /// Tree dump of the target algorithm
        source: PathBuf,

        /// Total number of random walks
        #[arg(short = 'n', long, default_value_t = SamplingParams::default().total_samples)]
        samples: usize,

        /// Walks per progress batch
        #[arg(short, long, default_value_t = SamplingParams::default().samples_per_batch)]
        batch: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let provider = match cli.seed {
        Some(seed) => DumpTreeProvider::with_seed(seed),
        None => DumpTreeProvider::new(),
    };
    let crawler =
        Crawler::new(provider, CsvSink::new(), &cli.data_dir).with_interrupt(Interrupt::ctrl_c());

    match cli.command {
        Command::Crawl { config } => {
            let config = config.map(CrawlConfig::from_file).transpose()?;
            let summary = crawler.crawl_many(config).await?;
            if let Some(path) = summary.path {
                println!(
                    "Crawled {} examples, summary written to '{}'",
                    summary.entries.len(),
                    path.display()
                );
            }
        }
        Command::Example {
            source,
            samples,
            batch,
        } => {
            let params = SamplingParams::new(batch, samples);
            if let Err(e) = params.validate() {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }

            let start = Instant::now();
            let result = crawler.crawl_example(&source, params).await;
            let elapsed = start.elapsed();

            match result {
                Some(result) => println!(
                    "{}: {} walks, {} rows ({}) in {:.2} s",
                    result.example,
                    result.stats.samples,
                    result.stats.rows,
                    result.stats.stop,
                    elapsed.as_secs_f64()
                ),
                None => {
                    eprintln!("No data produced for '{}'", source.display());
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
