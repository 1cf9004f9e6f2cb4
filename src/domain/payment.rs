use super::account::{Amount, Currency};
use crate::error::{PaymentError, Result};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Explanation attached to every declined payment.
pub const DECLINED_MESSAGE: &str = "Payment processing failed. Please try again.";

/// Longest description the checkout widget accepts on a purchase unit.
pub const MAX_DESCRIPTION_LEN: usize = 127;

const TRANSACTION_ID_PREFIX: &str = "txn_";
const TRANSACTION_ID_LEN: usize = 8;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Opaque identifier naming one payment attempt.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransactionId(String);

impl TransactionId {
    /// Generates a fresh `txn_` identifier from eight random base-36 characters.
    ///
    /// Uniqueness is probabilistic: 36^8 possible suffixes per process run.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let suffix: String = (0..TRANSACTION_ID_LEN)
            .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
            .collect();
        Self(format!("{}{}", TRANSACTION_ID_PREFIX, suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A payment as submitted by the caller. Never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRequest {
    amount: Amount,
    currency: Currency,
    description: String,
}

impl PaymentRequest {
    pub fn new(amount: Amount, currency: Currency, description: &str) -> Result<Self> {
        if amount.value().normalize().scale() > currency.minor_units() {
            return Err(PaymentError::Validation(format!(
                "Amount {} has more than {} decimal places for {}",
                amount.value(),
                currency.minor_units(),
                currency
            )));
        }

        let description = description.trim();
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(PaymentError::Validation(format!(
                "Description exceeds {} characters",
                MAX_DESCRIPTION_LEN
            )));
        }
        Ok(Self {
            amount,
            currency,
            description: description.to_string(),
        })
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Completed,
    Pending,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Completed => "completed",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of processing a payment.
///
/// A decline is an expected business outcome, not an error, so it lives here
/// rather than in `PaymentError`.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentOutcome {
    Completed,
    Pending,
    Failed { reason: String },
}

impl PaymentOutcome {
    /// Builds a `Failed` outcome; a blank reason falls back to [`DECLINED_MESSAGE`].
    pub fn failed(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        if reason.trim().is_empty() {
            PaymentOutcome::Failed {
                reason: DECLINED_MESSAGE.to_string(),
            }
        } else {
            PaymentOutcome::Failed { reason }
        }
    }

    pub fn status(&self) -> PaymentStatus {
        match self {
            PaymentOutcome::Completed => PaymentStatus::Completed,
            PaymentOutcome::Pending => PaymentStatus::Pending,
            PaymentOutcome::Failed { .. } => PaymentStatus::Failed,
        }
    }
}

/// What the payment backend reports back for one attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentResponse {
    transaction_id: TransactionId,
    amount: Amount,
    currency: Currency,
    timestamp: DateTime<Utc>,
    outcome: PaymentOutcome,
}

impl PaymentResponse {
    /// Builds a response echoing the request's amount and currency.
    pub fn for_request(
        request: &PaymentRequest,
        transaction_id: TransactionId,
        timestamp: DateTime<Utc>,
        outcome: PaymentOutcome,
    ) -> Self {
        Self {
            transaction_id,
            amount: request.amount(),
            currency: request.currency().clone(),
            timestamp,
            outcome,
        }
    }

    pub fn transaction_id(&self) -> &TransactionId {
        &self.transaction_id
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn outcome(&self) -> &PaymentOutcome {
        &self.outcome
    }

    pub fn status(&self) -> PaymentStatus {
        self.outcome.status()
    }

    pub fn success(&self) -> bool {
        matches!(self.outcome, PaymentOutcome::Completed)
    }

    /// Human-readable explanation, present only for failed payments.
    pub fn message(&self) -> Option<&str> {
        match &self.outcome {
            PaymentOutcome::Failed { reason } => Some(reason),
            _ => None,
        }
    }
}
