//! Crawl orchestration tests: config order, skipped sources and summaries.
mod common;
use common::*;
use synthcrawl::crawl::SUMMARY_SUFFIX;
use synthcrawl::prelude::*;

#[tokio::test]
async fn test_missing_source_is_skipped_from_summary() {
    let dir = tempfile::tempdir().unwrap();
    let valid = touch(dir.path(), "sum.lua");
    let missing = dir.path().join("missing.lua");

    let sink = MemorySink::default();
    let provider = ScriptedProvider::new(vec![Step::Walk(three_step_walk("a", 1.0))]);
    let crawler = Crawler::new(provider, sink.clone(), dir.path().join("data"));

    let config = CrawlConfig::new()
        .with(&missing, SamplingParams::new(1, 2))
        .with(&valid, SamplingParams::new(1, 2));
    let summary = crawler.crawl_many(Some(config)).await.unwrap();

    assert_eq!(summary.len(), 1);
    assert_eq!(
        summary.entries[0].get("example"),
        Some(&FieldValue::Text("sum.lua".into()))
    );
    assert_eq!(
        summary.entries[0].get("rows"),
        Some(&FieldValue::Int(6))
    );

    let saved = sink.saved();
    let suffixes: Vec<_> = saved.iter().map(|s| s.suffix.as_str()).collect();
    assert_eq!(suffixes, vec!["_sum", SUMMARY_SUFFIX]);
    assert_eq!(saved[0].records.len(), 6);
    assert_eq!(saved[1].records.len(), 1);
    assert!(saved.iter().all(|s| s.dir == dir.path().join("data")));
}

#[tokio::test]
async fn test_examples_are_crawled_in_config_order() {
    let dir = tempfile::tempdir().unwrap();
    let names = ["pid.lua", "constantFolding.lua", "teacup.lua"];
    let config = names.iter().fold(CrawlConfig::new(), |config, name| {
        config.with(touch(dir.path(), name), SamplingParams::new(2, 3))
    });

    let sink = MemorySink::default();
    let provider = ScriptedProvider::new(vec![Step::Walk(three_step_walk("a", 1.0))]);
    let crawler = Crawler::new(provider.clone(), sink.clone(), dir.path());

    let summary = crawler.crawl_many(Some(config)).await.unwrap();

    let examples: Vec<_> = summary
        .entries
        .iter()
        .map(|entry| entry.get("example").unwrap().to_string())
        .collect();
    assert_eq!(examples, names);
    assert_eq!(provider.opened(), 3);
    assert_eq!(sink.saved().len(), 4);
}

#[tokio::test]
async fn test_failed_example_does_not_abort_the_crawl() {
    let dir = tempfile::tempdir().unwrap();
    let broken = touch(dir.path(), "cyclic4.lua");
    let fine = touch(dir.path(), "cyclic5.lua");

    let sink = MemorySink::default();
    let provider = ScriptedProvider::new(vec![
        Step::Walk(three_step_walk("a", 1.0)),
        Step::Fail("synthesis engine crashed"),
    ]);
    let crawler = Crawler::new(provider, sink.clone(), dir.path());

    let config = CrawlConfig::new()
        .with(&broken, SamplingParams::new(5, 5))
        .with(&fine, SamplingParams::new(1, 1));
    let summary = crawler.crawl_many(Some(config)).await.unwrap();

    // Partial results still make it into the summary.
    assert_eq!(summary.len(), 2);
    assert_eq!(
        summary.entries[0].get("stop"),
        Some(&FieldValue::Text("failed".into()))
    );
    assert_eq!(summary.entries[0].get("samples"), Some(&FieldValue::Int(1)));
    assert_eq!(
        summary.entries[1].get("stop"),
        Some(&FieldValue::Text("completed".into()))
    );
}

#[tokio::test]
async fn test_interrupt_only_stops_the_current_example() {
    let dir = tempfile::tempdir().unwrap();
    let first = touch(dir.path(), "spi3.lua");
    let second = touch(dir.path(), "sum.lua");

    let (handle, interrupt) = Interrupt::channel();
    let provider = ScriptedProvider::new(vec![
        Step::InterruptWith(three_step_walk("a", 1.0)),
        Step::Walk(three_step_walk("b", 1.0)),
    ])
    .with_interrupt(handle);
    let crawler =
        Crawler::new(provider, MemorySink::default(), dir.path()).with_interrupt(interrupt);

    let interrupted = crawler
        .crawl_example(&first, SamplingParams::new(10, 10))
        .await
        .unwrap();
    assert_eq!(interrupted.stats.stop, StopReason::Interrupted);
    assert_eq!(interrupted.rows.len(), 3);

    // A fresh tree is opened for the next example; its first walk interrupts again.
    let next = crawler
        .crawl_example(&second, SamplingParams::new(10, 10))
        .await
        .unwrap();
    assert_eq!(next.stats.stop, StopReason::Interrupted);
    assert_eq!(next.stats.samples, 1);
}

#[tokio::test]
async fn test_empty_config_still_writes_a_summary() {
    let dir = tempfile::tempdir().unwrap();
    let sink = MemorySink::default();
    let crawler = Crawler::new(ScriptedProvider::new(vec![]), sink.clone(), dir.path());

    let summary = crawler.crawl_many(Some(CrawlConfig::new())).await.unwrap();

    assert!(summary.is_empty());
    assert!(summary.path.is_some());
    let saved = sink.saved();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].suffix, SUMMARY_SUFFIX);
}

#[tokio::test]
async fn test_default_config_is_used_when_none_is_given() {
    let dir = tempfile::tempdir().unwrap();
    let sink = MemorySink::default();
    let provider = ScriptedProvider::new(vec![Step::Walk(three_step_walk("a", 1.0))]);
    let crawler = Crawler::new(provider.clone(), sink.clone(), dir.path());

    // The bundled examples do not exist relative to the test's working directory
    // layout, so every default entry is skipped without error.
    let default_sources_exist = CrawlConfig::manual_full()
        .iter()
        .any(|(source, _)| source.exists());
    if default_sources_exist {
        return;
    }

    let summary = crawler.crawl_many(None).await.unwrap();
    assert!(summary.is_empty());
    assert_eq!(provider.opened(), 0);
}
