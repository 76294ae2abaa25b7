//! External capability surface — the asynchronous search provider and the
//! paper lookup collaborator
//!
//! Defines the client traits and wire types for the provider's
//! "create job, poll status" protocol. Two implementations of each trait:
//! the live HTTP clients live with the transport layer outside this crate;
//! `MockJobClient` / `MockPaperLookup` return preconfigured data for tests
//! and fixture mode. Both paths produce structurally identical results.

use crate::graph::{Paper, PaperId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use thiserror::Error;
use uuid::Uuid;

/// Provider-issued identifier for a submitted search job
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The provider's search job flavors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JobType {
    /// Phrase-list search
    KeywordSearch,
    /// Free-text query search
    QuerySearch,
    /// Phrases and query together
    CombinedSearch,
}

/// Journal quartile ranking filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quartile {
    Q1,
    Q2,
    Q3,
    Q4,
}

/// Publication venue type filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PublicationType {
    Journal,
    BookSeries,
    Conference,
}

/// Field-of-study filter values accepted by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldOfStudyFilter(pub String);

/// Filters attached to a search job. All optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields_of_study: Vec<FieldOfStudyFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_citation_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_access: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downloadable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quartile: Option<Quartile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_type: Option<PublicationType>,
}

/// Body of a search job submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRequest {
    /// 3–10 deduplicated phrases (see `search::phrase`)
    pub phrases: Vec<String>,
    /// Optional 50–5000 char free-text query
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Maximum number of results to return
    pub limit: usize,
    /// Search filters
    #[serde(default)]
    pub filters: SearchFilters,
}

/// Lifecycle state of a submitted job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Queued,
    Processing,
    Success,
    Error,
}

/// One poll's view of a job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStatusSnapshot {
    pub state: JobState,
    /// Present on `Success`; papers are in provider relevance order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<Paper>>,
    /// Present on `Error`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl JobStatusSnapshot {
    pub fn queued() -> Self {
        Self {
            state: JobState::Queued,
            results: None,
            error: None,
        }
    }

    pub fn processing() -> Self {
        Self {
            state: JobState::Processing,
            results: None,
            error: None,
        }
    }

    pub fn success(results: Vec<Paper>) -> Self {
        Self {
            state: JobState::Success,
            results: Some(results),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            state: JobState::Error,
            results: None,
            error: Some(message.into()),
        }
    }
}

/// Transport-level failures talking to the provider
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("provider unreachable: {0}")]
    Unreachable(String),

    #[error("provider rejected the request: {0}")]
    Rejected(String),
}

/// The provider's asynchronous job protocol.
///
/// Abstracts over transport so the orchestrator does not depend on how the
/// provider is reached.
#[async_trait]
pub trait JobClient: Send + Sync {
    /// Submit a search job, returning the provider's job id.
    async fn create_job(&self, job_type: JobType, request: &JobRequest)
        -> Result<JobId, ClientError>;

    /// Fetch the current status of a job.
    async fn job_status(&self, id: &JobId) -> Result<JobStatusSnapshot, ClientError>;
}

/// Errors from paper resolution
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("paper not found: {0}")]
    NotFound(String),

    #[error("paper lookup unavailable: {0}")]
    Unavailable(String),
}

/// How a caller addresses the root paper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PaperRef {
    /// By internal paper id
    Id { id: PaperId },
    /// By the provider's corpus id
    CorpusId { corpus_id: String },
}

impl PaperRef {
    /// The string key used for resolution
    pub fn key(&self) -> &str {
        match self {
            PaperRef::Id { id } => id.as_str(),
            PaperRef::CorpusId { corpus_id } => corpus_id,
        }
    }
}

impl std::fmt::Display for PaperRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Resolves a paper reference to a full paper record.
#[async_trait]
pub trait PaperLookup: Send + Sync {
    async fn resolve(&self, reference: &PaperRef) -> Result<Paper, LookupError>;
}

/// Mock job client — serves a scripted sequence of status snapshots.
///
/// Status call `n` returns the `n`-th snapshot; once the script is
/// exhausted the last snapshot repeats (so a single `processing()` entry
/// models a job that never finishes). Call counts are recorded so tests
/// can assert the orchestrator's polling discipline.
pub struct MockJobClient {
    script: Vec<JobStatusSnapshot>,
    submit_error: Option<String>,
    status_calls: AtomicUsize,
    submitted: Mutex<Vec<(JobType, JobRequest)>>,
}

impl MockJobClient {
    /// Create a client that reports `processing` forever
    pub fn new() -> Self {
        Self {
            script: vec![JobStatusSnapshot::processing()],
            submit_error: None,
            status_calls: AtomicUsize::new(0),
            submitted: Mutex::new(Vec::new()),
        }
    }

    /// Script the status snapshots served to consecutive polls
    pub fn with_snapshots(mut self, snapshots: impl IntoIterator<Item = JobStatusSnapshot>) -> Self {
        self.script = snapshots.into_iter().collect();
        self
    }

    /// Make `create_job` fail with the given message
    pub fn with_submit_error(mut self, message: impl Into<String>) -> Self {
        self.submit_error = Some(message.into());
        self
    }

    /// How many times `job_status` has been called
    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    /// The submissions this client has accepted
    pub fn submissions(&self) -> Vec<(JobType, JobRequest)> {
        self.submitted.lock().expect("mock lock poisoned").clone()
    }
}

impl Default for MockJobClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JobClient for MockJobClient {
    async fn create_job(
        &self,
        job_type: JobType,
        request: &JobRequest,
    ) -> Result<JobId, ClientError> {
        if let Some(message) = &self.submit_error {
            return Err(ClientError::Rejected(message.clone()));
        }
        self.submitted
            .lock()
            .expect("mock lock poisoned")
            .push((job_type, request.clone()));
        Ok(JobId::from_string(Uuid::new_v4().to_string()))
    }

    async fn job_status(&self, _id: &JobId) -> Result<JobStatusSnapshot, ClientError> {
        let call = self.status_calls.fetch_add(1, Ordering::SeqCst);
        let snapshot = self
            .script
            .get(call)
            .or_else(|| self.script.last())
            .cloned()
            .ok_or_else(|| ClientError::Unreachable("mock script is empty".to_string()))?;
        Ok(snapshot)
    }
}

/// Mock paper lookup — canned papers keyed by id/corpus id.
#[derive(Default)]
pub struct MockPaperLookup {
    papers: HashMap<String, Paper>,
}

impl MockPaperLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a paper, resolvable by its id
    pub fn with_paper(mut self, paper: Paper) -> Self {
        self.papers.insert(paper.id.as_str().to_string(), paper);
        self
    }
}

#[async_trait]
impl PaperLookup for MockPaperLookup {
    async fn resolve(&self, reference: &PaperRef) -> Result<Paper, LookupError> {
        self.papers
            .get(reference.key())
            .cloned()
            .ok_or_else(|| LookupError::NotFound(reference.key().to_string()))
    }
}
