//! Spans and events emitted by generation and traversal.

use graphstep_core::{Explorer, GraphConfigBuilder};
use graphstep_test_support::tracing::RecordingLayer;
use rstest::rstest;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

#[rstest]
fn generation_span_records_pass_counts() {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let config = GraphConfigBuilder::new()
        .build()
        .expect("defaults are valid");

    let graph = tracing::subscriber::with_default(subscriber, || config.generate())
        .expect("generation succeeds");
    assert_eq!(graph.directed().edge_count(), 31);

    let span = layer
        .span_named("core.generate_directed")
        .expect("generation span must exist");
    assert_eq!(span.fields.get("vertex_count").map(String::as_str), Some("11"));
    assert_eq!(span.fields.get("initial_edges").map(String::as_str), Some("38"));
    assert_eq!(span.fields.get("pruned_pairs").map(String::as_str), Some("7"));
}

#[rstest]
fn completion_event_summarises_the_traversal() {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let config = GraphConfigBuilder::new()
        .build()
        .expect("defaults are valid");

    tracing::subscriber::with_default(subscriber, || {
        let mut explorer = Explorer::new(&config).expect("generation succeeds");
        explorer.start_dfs();
        while explorer.step().is_some() {}
    });

    assert!(layer.span_named("core.explorer.new").is_some());
    assert!(layer.span_named("core.traversal.start").is_some());

    let completed = layer.events_with_message("traversal completed");
    assert_eq!(completed.len(), 1);
    let event = &completed[0];
    assert_eq!(event.level, Level::INFO);
    assert_eq!(event.fields.get("mode").map(String::as_str), Some("DFS"));
    assert_eq!(event.fields.get("visited").map(String::as_str), Some("11"));
    assert_eq!(
        event.fields.get("tree_edges").map(String::as_str),
        Some("8")
    );
    assert_eq!(event.fields.get("roots").map(String::as_str), Some("3"));

    let steps = layer.events_with_message("traversal step");
    assert_eq!(steps.len(), 22);
    assert!(steps.iter().all(|event| event.level == Level::DEBUG));
}
