//! Job orchestrator — turns the provider's "create job, poll status"
//! protocol into a single awaited result
//!
//! Submits once, then polls on a fixed interval up to a bounded attempt
//! count. Submission failures, provider-reported job failures, timeouts,
//! and caller cancellation all surface as distinct errors so the caller
//! can decide whether to retry, re-prompt, or abort. The orchestrator
//! itself never retries.

use super::cancel::CancellationToken;
use super::client::{JobClient, JobRequest, JobState, JobType};
use super::SearchError;
use crate::graph::Paper;
use std::sync::Arc;
use std::time::Duration;
use tokio::time;
use tracing::{debug, trace, warn};

/// Polling behaviour for the orchestrator.
///
/// The defaults give the provider roughly a minute to finish: a 2 second
/// interval times a 30 attempt cap. Both directly determine worst-case
/// latency, so they are configuration rather than constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Sleep between consecutive status checks. Default: 2 seconds.
    pub interval: Duration,
    /// Maximum number of status checks before giving up. Default: 30.
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            max_attempts: 30,
        }
    }
}

/// Submits search jobs and awaits their terminal state.
pub struct JobOrchestrator {
    client: Arc<dyn JobClient>,
    config: PollConfig,
}

impl JobOrchestrator {
    /// Create an orchestrator with default polling behaviour
    pub fn new(client: Arc<dyn JobClient>) -> Self {
        Self {
            client,
            config: PollConfig::default(),
        }
    }

    /// Override the polling configuration
    pub fn with_config(mut self, config: PollConfig) -> Self {
        self.config = config;
        self
    }

    /// Submit a job and poll until a terminal state, the attempt cap, or
    /// cancellation.
    ///
    /// On success the provider's results are returned in provider order;
    /// the orchestrator never reorders them. Each poll is preceded by an
    /// interval sleep which the cancellation token can interrupt
    /// immediately.
    pub async fn submit_and_await(
        &self,
        job_type: JobType,
        request: &JobRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<Paper>, SearchError> {
        if cancel.is_cancelled() {
            return Err(SearchError::Cancelled);
        }

        let job_id = self
            .client
            .create_job(job_type, request)
            .await
            .map_err(|err| SearchError::Submission(err.to_string()))?;
        debug!(%job_id, ?job_type, phrases = request.phrases.len(), "search job submitted");

        for attempt in 1..=self.config.max_attempts {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!(%job_id, attempt, "polling cancelled by caller");
                    return Err(SearchError::Cancelled);
                }
                _ = time::sleep(self.config.interval) => {}
            }

            let snapshot = self
                .client
                .job_status(&job_id)
                .await
                .map_err(|err| SearchError::JobFailed(err.to_string()))?;
            trace!(%job_id, attempt, state = ?snapshot.state, "poll");

            match snapshot.state {
                JobState::Queued | JobState::Processing => continue,
                JobState::Success => {
                    let results = snapshot.results.unwrap_or_else(|| {
                        warn!(%job_id, "job succeeded without a results payload");
                        Vec::new()
                    });
                    debug!(%job_id, attempt, results = results.len(), "search job finished");
                    return Ok(results);
                }
                JobState::Error => {
                    let message = snapshot
                        .error
                        .unwrap_or_else(|| "provider reported an unspecified error".to_string());
                    return Err(SearchError::JobFailed(message));
                }
            }
        }

        Err(SearchError::Timeout {
            attempts: self.config.max_attempts,
        })
    }
}
