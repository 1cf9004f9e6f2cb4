use crate::config::{DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_BASE_DELAY, Settings};
use crate::domain::account::AccountSnapshot;
use crate::domain::payment::{PaymentOutcome, PaymentRequest, PaymentResponse};
use crate::domain::ports::{AccountProviderBox, PaymentGateway, PaymentGatewayBox};
use crate::error::{PaymentError, Result};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Exponential backoff for transient upstream failures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts including the first one. Never below 1.
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_RETRY_ATTEMPTS,
            base_delay: DEFAULT_RETRY_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    pub fn none() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Delay before retry number `attempt` (1-based): `base_delay * 2^(attempt - 1)`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1).min(16);
        self.base_delay.saturating_mul(1 << exp)
    }
}

/// Aggregate of repeated submissions of one request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct SimulationReport {
    pub submitted: usize,
    pub completed: usize,
    pub pending: usize,
    pub failed: usize,
    pub success_rate: f64,
}

impl SimulationReport {
    fn record(&mut self, outcome: &PaymentOutcome) {
        self.submitted += 1;
        match outcome {
            PaymentOutcome::Completed => self.completed += 1,
            PaymentOutcome::Pending => self.pending += 1,
            PaymentOutcome::Failed { .. } => self.failed += 1,
        }
        self.success_rate = self.completed as f64 / self.submitted as f64;
    }
}

/// Caller-side orchestration of the account provider and the payment gateway.
///
/// The two backends share no state. Payments are independent of each other, so
/// batches and simulations submit them concurrently.
pub struct CheckoutService {
    accounts: AccountProviderBox,
    payments: Arc<dyn PaymentGateway>,
    retry: RetryPolicy,
}

impl CheckoutService {
    /// Creates a new `CheckoutService`.
    ///
    /// # Arguments
    ///
    /// * `accounts` - Source of the payer's account snapshot.
    /// * `payments` - Gateway that processes payments.
    pub fn new(accounts: AccountProviderBox, payments: PaymentGatewayBox) -> Self {
        Self {
            accounts,
            payments: Arc::from(payments),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Retry policy taken from `settings`.
    pub fn retry_policy_from(settings: &Settings) -> RetryPolicy {
        RetryPolicy::new(settings.retry_attempts, settings.retry_base_delay)
    }

    /// Fetches the account snapshot, retrying only retryable upstream failures.
    pub async fn account(&self) -> Result<AccountSnapshot> {
        let mut attempt = 1;
        loop {
            match self.accounts.fetch_account().await {
                Ok(snapshot) => return Ok(snapshot),
                Err(e) if e.is_retryable() && attempt < self.retry.max_attempts => {
                    let delay = self.retry.backoff(attempt);
                    warn!(attempt, delay_ms = delay.as_millis() as u64, error = %e, "Account fetch failed, retrying");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Submits one payment. Never retried: the gateway offers no idempotency key.
    pub async fn checkout(&self, request: &PaymentRequest) -> Result<PaymentResponse> {
        self.payments.submit_payment(request).await
    }

    /// Submits every request concurrently. Results come back in request order and
    /// one failure does not stop the rest.
    pub async fn checkout_batch(
        &self,
        requests: Vec<PaymentRequest>,
    ) -> Vec<Result<PaymentResponse>> {
        let mut tasks = self.spawn_submissions(requests.into_iter());
        let mut results: Vec<Option<Result<PaymentResponse>>> =
            std::iter::repeat_with(|| None).take(tasks.len()).collect();

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, result)) => results[index] = Some(result),
                Err(e) => warn!(error = %e, "Payment task did not finish"),
            }
        }
        results
            .into_iter()
            .map(|slot| slot.unwrap_or_else(|| Err(PaymentError::Interrupted)))
            .collect()
    }

    /// Submits the same request `count` times concurrently and tallies the outcomes.
    ///
    /// Stops at the first error, since an error means the gateway itself is unusable.
    /// Outstanding submissions are aborted when the task set is dropped.
    pub async fn simulate(&self, request: &PaymentRequest, count: usize) -> Result<SimulationReport> {
        let mut tasks = self.spawn_submissions(std::iter::repeat_n(request.clone(), count));
        let mut report = SimulationReport::default();

        while let Some(joined) = tasks.join_next().await {
            let (_, result) = joined?;
            report.record(result?.outcome());
        }
        debug!(?report, "Simulation finished");
        Ok(report)
    }

    fn spawn_submissions<I>(&self, requests: I) -> JoinSet<(usize, Result<PaymentResponse>)>
    where
        I: Iterator<Item = PaymentRequest>,
    {
        let mut tasks = JoinSet::new();
        for (index, request) in requests.enumerate() {
            let payments = Arc::clone(&self.payments);
            tasks.spawn(async move { (index, payments.submit_payment(&request).await) });
        }
        tasks
    }
}
