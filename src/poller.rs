//! Resubmits a search while the provider answers "accepted, not ready".
//!
//! The loop is an explicit three-state machine:
//!
//! ```text
//! Requesting --sentinel--> Waiting --sleep, attempts += 1--> Requesting
//!     |                       |
//!     | other status          | attempts == max
//!     v                       v
//!   Done(Some(response))    Done(None)  => ProviderTimeout
//! ```
//!
//! Only the last response body is kept. Sleeping goes through [`Clock`] so
//! tests run without real delay.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::client::ProviderClient;
use crate::error::{RecommenderError, Result};
use crate::transport::RawResponse;

/// HTTP 202: the provider queued the request and wants it resubmitted
pub const ACCEPTED_NOT_READY: u16 = 202;

/// Suspension point used between attempts
#[async_trait]
pub trait Clock: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Real clock backed by the tokio timer. Suspends only the calling task.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Retry bounds for the poller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
    pub sentinel_status: u16,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_secs(2),
            sentinel_status: ACCEPTED_NOT_READY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollState {
    Requesting,
    Waiting,
    /// `None` when the attempt budget ran out
    Done(Option<RawResponse>),
}

pub struct JobPoller {
    policy: PollPolicy,
    clock: Arc<dyn Clock>,
}

impl JobPoller {
    pub fn new(policy: PollPolicy, clock: Arc<dyn Clock>) -> Self {
        Self { policy, clock }
    }

    /// GET `url` until the provider stops answering with the sentinel status.
    ///
    /// Returns the final response with its status untouched. Fails with
    /// `ProviderTimeout` once `max_attempts` sentinel answers were seen.
    pub async fn run(&self, client: &ProviderClient, url: &str) -> Result<RawResponse> {
        let mut state = PollState::Requesting;
        let mut attempts: u32 = 0;

        loop {
            state = match state {
                PollState::Requesting => {
                    let response = client.fetch(url).await?;
                    if response.status == self.policy.sentinel_status {
                        tracing::warn!(
                            "[{}] search still processing (HTTP {}), attempt {}/{}",
                            client.provider(),
                            response.status,
                            attempts + 1,
                            self.policy.max_attempts
                        );
                        PollState::Waiting
                    } else {
                        PollState::Done(Some(response))
                    }
                }
                PollState::Waiting => {
                    self.clock.sleep(self.policy.backoff).await;
                    attempts += 1;
                    if attempts >= self.policy.max_attempts {
                        PollState::Done(None)
                    } else {
                        PollState::Requesting
                    }
                }
                PollState::Done(Some(response)) => return Ok(response),
                PollState::Done(None) => {
                    return Err(RecommenderError::ProviderTimeout {
                        provider: client.provider().to_string(),
                        attempts,
                    })
                }
            };
        }
    }
}
