//! The consumer-facing composite operation: resolve a root paper, run the
//! asynchronous search, and assemble the network and tree
//!
//! `CitationNetworkService` is the single entry point; transports call it
//! and never reach into the orchestrator or builders directly. Mock mode
//! is capability substitution: hand the service a `MockJobClient` and
//! `MockPaperLookup` and every contract downstream stays identical.

use crate::graph::{
    GraphError, Network, NetworkBuilder, Paper, SortAlgorithm, UserInputs, WeightingMode,
};
use crate::search::{
    build_search_terms, CancellationToken, JobClient, JobOrchestrator, JobRequest, JobType,
    LookupError, PaperLookup, PaperRef, PollConfig, SearchError, SearchFilters,
};
use crate::tree::Tree;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Default cap on the number of search results requested per build
pub const DEFAULT_RESULT_LIMIT: usize = 50;

/// Errors surfaced by the composite build operation
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Rejected before any external call
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("paper not found: {0}")]
    PaperNotFound(String),

    #[error("paper lookup unavailable: {0}")]
    LookupUnavailable(String),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl From<LookupError> for PipelineError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::NotFound(reference) => PipelineError::PaperNotFound(reference),
            LookupError::Unavailable(message) => PipelineError::LookupUnavailable(message),
        }
    }
}

/// Options for one network build
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    /// Node ordering in the finished network
    pub sort: SortAlgorithm,
    /// Scoring strategy for candidate papers
    pub weighting: WeightingMode,
    /// Provider-side search filters
    pub filters: SearchFilters,
    /// Maximum number of search results to request
    pub limit: usize,
    /// Papers the root is already known to cite, merged in as referenced
    /// nodes alongside the search results
    pub known_references: Vec<Paper>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            sort: SortAlgorithm::default(),
            weighting: WeightingMode::default(),
            filters: SearchFilters::default(),
            limit: DEFAULT_RESULT_LIMIT,
            known_references: Vec::new(),
        }
    }
}

/// Everything one build produces
#[derive(Debug, Clone, Serialize)]
pub struct BuildOutcome {
    /// The resolved root paper
    pub paper: Paper,
    /// The scored, ranked citation network (stats included)
    pub network: Network,
    /// The leveled hierarchy derived from the network
    pub tree: Tree,
}

/// Builds citation networks from a root paper reference.
pub struct CitationNetworkService {
    job_client: Arc<dyn JobClient>,
    paper_lookup: Arc<dyn PaperLookup>,
    poll: PollConfig,
}

impl CitationNetworkService {
    /// Create a service over the given collaborators with default polling
    pub fn new(job_client: Arc<dyn JobClient>, paper_lookup: Arc<dyn PaperLookup>) -> Self {
        Self {
            job_client,
            paper_lookup,
            poll: PollConfig::default(),
        }
    }

    /// Override the orchestrator's polling configuration
    pub fn with_poll_config(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }

    /// Resolve the root, execute the search, and assemble network and tree.
    ///
    /// Validation failures are rejected before any external call. The
    /// graph stage never fails on empty search results; a root with no
    /// related papers yields a root-only network and a one-level tree.
    pub async fn build(
        &self,
        root_ref: &PaperRef,
        inputs: &UserInputs,
        options: &BuildOptions,
        cancel: &CancellationToken,
    ) -> Result<BuildOutcome, PipelineError> {
        if options.limit == 0 {
            return Err(PipelineError::Validation(
                "result limit must be at least 1".to_string(),
            ));
        }

        let paper = self.paper_lookup.resolve(root_ref).await?;
        info!(root = %paper.id, "building citation network");

        let terms = build_search_terms(&paper, inputs)?;
        let job_type = if terms.query.is_some() {
            JobType::CombinedSearch
        } else {
            JobType::KeywordSearch
        };
        let request = JobRequest {
            phrases: terms.phrases,
            query: terms.query,
            limit: options.limit,
            filters: options.filters.clone(),
        };

        let orchestrator = JobOrchestrator::new(self.job_client.clone()).with_config(self.poll);
        let results = orchestrator
            .submit_and_await(job_type, &request, cancel)
            .await?;
        debug!(root = %paper.id, results = results.len(), "search finished");

        let network = NetworkBuilder::new(paper.clone())
            .search_results(results)
            .referenced_papers(options.known_references.clone())
            .sort(options.sort)
            .weighting(options.weighting)
            .user_inputs(inputs.clone())
            .build();

        let tree = Tree::from_network(&network)
            .ok_or_else(|| GraphError::RootMissing(network.root.clone()))?;

        info!(
            root = %paper.id,
            nodes = network.stats.total_nodes,
            edges = network.stats.total_edges,
            depth = tree.depth(),
            "citation network built"
        );
        Ok(BuildOutcome {
            paper,
            network,
            tree,
        })
    }
}
