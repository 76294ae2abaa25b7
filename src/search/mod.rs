//! Search pipeline: phrase building, the external job capability, and the
//! submit-and-poll orchestrator

mod cancel;
mod client;
mod orchestrator;
mod phrase;

pub use cancel::CancellationToken;
pub use client::{
    ClientError, FieldOfStudyFilter, JobClient, JobId, JobRequest, JobState, JobStatusSnapshot,
    JobType, LookupError, MockJobClient, MockPaperLookup, PaperLookup, PaperRef,
    PublicationType, Quartile, SearchFilters,
};
pub use orchestrator::{JobOrchestrator, PollConfig};
pub use phrase::{
    build_search_terms, SearchTerms, MAX_PHRASES, MAX_QUERY_CHARS, MIN_PHRASES, MIN_QUERY_CHARS,
};

use thiserror::Error;

/// Errors surfaced by the search pipeline.
///
/// Variants are distinct so the caller can choose user messaging: a timeout
/// suggests "try again later", a failed job surfaces the provider's message,
/// insufficient phrases prompts for more input.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("insufficient phrases: {supplied} supplied, {required} required")]
    InsufficientPhrases { supplied: usize, required: usize },

    #[error("job submission failed: {0}")]
    Submission(String),

    #[error("search job failed: {0}")]
    JobFailed(String),

    #[error("search job timed out after {attempts} status checks")]
    Timeout { attempts: u32 },

    #[error("search cancelled by caller")]
    Cancelled,
}
