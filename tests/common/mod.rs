//! Shared helpers for pipeline integration tests
//!
//! Builds the canned papers and scripted provider responses the
//! end-to-end tests run against.

use citenet::search::{JobStatusSnapshot, MockJobClient, MockPaperLookup};
use citenet::{CitationNetworkService, Paper, PollConfig, UserInputs};
use std::sync::Arc;
use std::time::Duration;

/// Polling configuration that keeps tests fast without changing the
/// attempt cap.
pub fn fast_poll() -> PollConfig {
    PollConfig {
        interval: Duration::from_millis(1),
        max_attempts: 30,
    }
}

/// The root paper every fixture network is built around
pub fn root_paper() -> Paper {
    Paper::new("root", "Spectral Methods on Citation Graphs")
        .with_year(2022)
        .with_citation_count(40)
        .with_fields_of_study(["Computer Science", "Mathematics"])
        .with_authors(["Ada Lovelace"])
}

/// A small result set with distinct citation counts and years
pub fn search_results() -> Vec<Paper> {
    vec![
        Paper::new("a", "Graph Partitioning Revisited")
            .with_year(2019)
            .with_citation_count(120)
            .with_relevance_score(0.9),
        Paper::new("b", "Community Detection at Scale")
            .with_year(2021)
            .with_citation_count(60)
            .with_relevance_score(0.7),
        Paper::new("c", "A Survey of Ranking Signals")
            .with_year(2016)
            .with_citation_count(300)
            .with_relevance_score(0.4),
    ]
}

/// Keyword-only user inputs that satisfy the phrase minimum
pub fn keyword_inputs() -> UserInputs {
    UserInputs::new().with_keywords(["spectral", "partitioning", "ranking"])
}

/// A provider that goes queued -> processing -> success with `results`
pub fn scripted_client(results: Vec<Paper>) -> Arc<MockJobClient> {
    Arc::new(MockJobClient::new().with_snapshots([
        JobStatusSnapshot::queued(),
        JobStatusSnapshot::processing(),
        JobStatusSnapshot::success(results),
    ]))
}

/// A service wired to the given client, resolving only `root_paper()`
pub fn service_with(client: Arc<MockJobClient>) -> CitationNetworkService {
    let lookup = MockPaperLookup::new().with_paper(root_paper());
    CitationNetworkService::new(client, Arc::new(lookup)).with_poll_config(fast_poll())
}
