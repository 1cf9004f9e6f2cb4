use super::random::{SeededRandomSource, ThreadRngSource};
use crate::config::{DEFAULT_PAYMENT_LATENCY, DEFAULT_SUCCESS_PROBABILITY, Settings};
use crate::domain::payment::{
    DECLINED_MESSAGE, PaymentOutcome, PaymentRequest, PaymentResponse, TransactionId,
};
use crate::domain::ports::{PaymentGateway, RandomSourceBox};
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use std::time::Duration;
use tracing::{info, warn};

/// Payment gateway that decides each outcome by a random draw.
///
/// Every call is independent: there is no ledger, no idempotency key and no retry.
/// Identical requests may therefore produce different outcomes.
pub struct PaymentSimulator {
    latency: Duration,
    success_probability: f64,
    max_amount: Option<Decimal>,
    random: RandomSourceBox,
}

impl PaymentSimulator {
    /// Creates a simulator with the default latency and success probability.
    pub fn new(random: RandomSourceBox) -> Self {
        Self {
            latency: DEFAULT_PAYMENT_LATENCY,
            success_probability: DEFAULT_SUCCESS_PROBABILITY,
            max_amount: None,
            random,
        }
    }

    /// Builds a simulator from settings, seeding the outcome source when a seed is configured.
    pub fn from_settings(settings: &Settings) -> Self {
        let random: RandomSourceBox = match settings.seed {
            Some(seed) => Box::new(SeededRandomSource::new(seed)),
            None => Box::new(ThreadRngSource),
        };
        Self {
            latency: settings.payment_latency,
            success_probability: settings.success_probability,
            max_amount: settings.max_amount,
            random,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Sets the success probability, clamped into `[0, 1]`. `NaN` means never succeed.
    pub fn with_success_probability(mut self, probability: f64) -> Self {
        self.success_probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        self
    }

    pub fn with_max_amount(mut self, max_amount: Decimal) -> Self {
        self.max_amount = Some(max_amount);
        self
    }

    pub fn success_probability(&self) -> f64 {
        self.success_probability
    }

    fn validate(&self, request: &PaymentRequest) -> Result<()> {
        if let Some(max) = self.max_amount
            && request.amount().value() > max
        {
            return Err(PaymentError::Validation(format!(
                "Amount {} exceeds the limit of {}",
                request.amount().value(),
                max
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl PaymentGateway for PaymentSimulator {
    async fn submit_payment(&self, request: &PaymentRequest) -> Result<PaymentResponse> {
        // Reject before the caller pays for the simulated delay.
        self.validate(request)?;

        info!(
            amount = %request.amount().value(),
            currency = %request.currency(),
            description = request.description(),
            "Submitting payment request"
        );
        tokio::time::sleep(self.latency).await;

        let outcome = if self.random.next_unit() < self.success_probability {
            PaymentOutcome::Completed
        } else {
            PaymentOutcome::failed(DECLINED_MESSAGE)
        };
        let response =
            PaymentResponse::for_request(request, TransactionId::generate(), Utc::now(), outcome);

        if response.success() {
            info!(transaction_id = %response.transaction_id(), "Payment successful");
        } else {
            warn!(
                transaction_id = %response.transaction_id(),
                status = %response.status(),
                "Payment failed"
            );
        }
        Ok(response)
    }
}
