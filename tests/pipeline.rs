//! End-to-end pipeline tests: resolve, search, assemble, derive
//!
//! Everything runs against scripted mocks, so these exercise the same
//! code paths fixture mode uses in the CLI.

mod common;

use citenet::search::{JobStatusSnapshot, MockJobClient, MockPaperLookup};
use citenet::{
    analytics, BuildOptions, CancellationToken, CitationNetworkService, NodeRole, PaperId,
    PaperRef, PipelineError, SearchError, SortAlgorithm,
};
use common::{fast_poll, keyword_inputs, root_paper, scripted_client, search_results, service_with};
use std::sync::Arc;
use std::time::Duration;

fn root_ref() -> PaperRef {
    PaperRef::Id { id: "root".into() }
}

#[tokio::test]
async fn successful_build_produces_network_and_tree() {
    let client = scripted_client(search_results());
    let service = service_with(client.clone());

    let outcome = service
        .build(
            &root_ref(),
            &keyword_inputs(),
            &BuildOptions::default(),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(outcome.paper.id, PaperId::from("root"));
    assert_eq!(outcome.network.node_count(), 4);
    assert_eq!(outcome.network.edge_count(), 3);
    assert_eq!(outcome.network.stats.citing_count, 3);
    assert_eq!(outcome.network.root_node().role, NodeRole::Root);

    // Every search result cites the root, so the tree is two levels deep.
    assert_eq!(outcome.tree.depth(), 2);
    assert_eq!(outcome.tree.levels[1].len(), 3);
    for paper in &outcome.tree.levels[1] {
        assert_eq!(
            outcome.tree.relationships[&paper.id].parent,
            Some(PaperId::from("root"))
        );
    }

    // The submitted request carried the caller's phrases.
    let submissions = client.submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].1.phrases.len(), 3);
}

#[tokio::test]
async fn citation_sort_orders_the_ranking_deterministically() {
    let service = service_with(scripted_client(search_results()));

    let options = BuildOptions {
        sort: SortAlgorithm::Citations,
        ..BuildOptions::default()
    };
    let outcome = service
        .build(
            &root_ref(),
            &keyword_inputs(),
            &options,
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    let ids: Vec<&str> = outcome
        .network
        .ranking
        .iter()
        .map(PaperId::as_str)
        .collect();
    // Root first, then descending citation counts: c (300), a (120), b (60).
    assert_eq!(ids, vec!["root", "c", "a", "b"]);
}

#[tokio::test]
async fn never_finishing_job_times_out_after_the_attempt_cap() {
    // The default mock reports `processing` forever.
    let client = Arc::new(MockJobClient::new());
    let service = service_with(client.clone());

    let err = service
        .build(
            &root_ref(),
            &keyword_inputs(),
            &BuildOptions::default(),
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Search(SearchError::Timeout { attempts: 30 })
    ));
    assert_eq!(client.status_calls(), 30);
}

#[tokio::test]
async fn cancellation_aborts_a_slow_poll_promptly() {
    let client = Arc::new(MockJobClient::new());
    let lookup = MockPaperLookup::new().with_paper(root_paper());
    let service = CitationNetworkService::new(client, Arc::new(lookup)).with_poll_config(
        citenet::PollConfig {
            interval: Duration::from_secs(60),
            max_attempts: 30,
        },
    );

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        trigger.cancel();
    });

    let started = std::time::Instant::now();
    let err = service
        .build(
            &root_ref(),
            &keyword_inputs(),
            &BuildOptions::default(),
            &cancel,
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Search(SearchError::Cancelled)
    ));
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn provider_failure_message_reaches_the_caller() {
    let client = Arc::new(
        MockJobClient::new().with_snapshots([JobStatusSnapshot::error("corpus shard offline")]),
    );
    let service = service_with(client);

    let err = service
        .build(
            &root_ref(),
            &keyword_inputs(),
            &BuildOptions::default(),
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

    match err {
        PipelineError::Search(SearchError::JobFailed(message)) => {
            assert_eq!(message, "corpus shard offline");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn unknown_root_reference_fails_before_submission() {
    let client = Arc::new(MockJobClient::new());
    let service = CitationNetworkService::new(
        client.clone(),
        Arc::new(MockPaperLookup::new()),
    )
    .with_poll_config(fast_poll());

    let err = service
        .build(
            &PaperRef::CorpusId {
                corpus_id: "nowhere".into(),
            },
            &keyword_inputs(),
            &BuildOptions::default(),
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::PaperNotFound(_)));
    assert!(client.submissions().is_empty());
}

#[tokio::test]
async fn empty_search_results_degrade_to_a_root_only_network() {
    let service = service_with(scripted_client(Vec::new()));

    let outcome = service
        .build(
            &root_ref(),
            &keyword_inputs(),
            &BuildOptions::default(),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(outcome.network.node_count(), 1);
    assert_eq!(outcome.network.edge_count(), 0);
    assert_eq!(outcome.tree.depth(), 1);
}

#[test]
fn built_outcome_feeds_the_analytics_layer() {
    let service = service_with(scripted_client(search_results()));

    let outcome = tokio_test::block_on(service.build(
        &root_ref(),
        &keyword_inputs(),
        &BuildOptions::default(),
        &CancellationToken::new(),
    ))
    .unwrap();

    let clusters = analytics::cluster_by_year(&outcome.network, 5);
    let total: usize = clusters.iter().map(|c| c.members.len()).sum();
    assert_eq!(total, outcome.network.node_count());

    // Every non-root node is one undirected hop from the root.
    for id in &outcome.network.ranking {
        let path = analytics::shortest_path(&outcome.network, &PaperId::from("root"), id).unwrap();
        assert!(path.len() <= 2);
    }
}
