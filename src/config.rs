//! Process configuration resolved from the environment at start-up.
//!
//! Nothing secret is compiled into the binary: the checkout-widget client id must
//! come from `PAYSIM_CLIENT_ID` (or a `.env` file loaded by the binary).

use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const ENV_CLIENT_ID: &str = "PAYSIM_CLIENT_ID";
pub const ENV_SUCCESS_PROBABILITY: &str = "PAYSIM_SUCCESS_PROBABILITY";
pub const ENV_ACCOUNT_LATENCY_MS: &str = "PAYSIM_ACCOUNT_LATENCY_MS";
pub const ENV_PAYMENT_LATENCY_MS: &str = "PAYSIM_PAYMENT_LATENCY_MS";
pub const ENV_MAX_AMOUNT: &str = "PAYSIM_MAX_AMOUNT";
pub const ENV_SEED: &str = "PAYSIM_SEED";
pub const ENV_RETRY_ATTEMPTS: &str = "PAYSIM_RETRY_ATTEMPTS";
pub const ENV_RETRY_BASE_MS: &str = "PAYSIM_RETRY_BASE_MS";

pub const DEFAULT_SUCCESS_PROBABILITY: f64 = 0.9;
pub const DEFAULT_ACCOUNT_LATENCY: Duration = Duration::from_millis(500);
pub const DEFAULT_PAYMENT_LATENCY: Duration = Duration::from_millis(800);
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_BASE_DELAY: Duration = Duration::from_millis(100);

/// Checkout-widget client identifier. `Debug` only shows a short prefix.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientId(String);

impl ClientId {
    pub fn new(value: &str) -> Result<Self> {
        let value = value.trim();
        if value.is_empty() {
            return Err(PaymentError::Config(format!("{} is blank", ENV_CLIENT_ID)));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix: String = self.0.chars().take(4).collect();
        write!(f, "ClientId({}***)", prefix)
    }
}

/// Runtime settings for the account provider, the payment simulator and the
/// checkout service.
#[derive(Debug, Clone)]
pub struct Settings {
    client_id: ClientId,
    /// Probability in `[0, 1]` that a simulated payment completes.
    pub success_probability: f64,
    /// Simulated network latency of an account fetch.
    pub account_latency: Duration,
    /// Simulated processing latency of a payment.
    pub payment_latency: Duration,
    /// Upper bound on a single payment, if any.
    pub max_amount: Option<Decimal>,
    /// Seed for reproducible outcomes; `None` draws from the thread RNG.
    pub seed: Option<u64>,
    pub retry_attempts: u32,
    pub retry_base_delay: Duration,
}

impl Settings {
    /// Settings with every default applied and the given client id.
    pub fn new(client_id: ClientId) -> Self {
        Self {
            client_id,
            success_probability: DEFAULT_SUCCESS_PROBABILITY,
            account_latency: DEFAULT_ACCOUNT_LATENCY,
            payment_latency: DEFAULT_PAYMENT_LATENCY,
            max_amount: None,
            seed: None,
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            retry_base_delay: DEFAULT_RETRY_BASE_DELAY,
        }
    }

    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let client_id = lookup(ENV_CLIENT_ID)
            .ok_or_else(|| PaymentError::Config(format!("{} is not set", ENV_CLIENT_ID)))?;
        let mut settings = Self::new(ClientId::new(&client_id)?);

        if let Some(p) = parse_var::<f64, _>(&lookup, ENV_SUCCESS_PROBABILITY)? {
            if !(0.0..=1.0).contains(&p) {
                return Err(PaymentError::Config(format!(
                    "{} must be within [0, 1], got {}",
                    ENV_SUCCESS_PROBABILITY, p
                )));
            }
            settings.success_probability = p;
        }
        if let Some(ms) = parse_var::<u64, _>(&lookup, ENV_ACCOUNT_LATENCY_MS)? {
            settings.account_latency = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_var::<u64, _>(&lookup, ENV_PAYMENT_LATENCY_MS)? {
            settings.payment_latency = Duration::from_millis(ms);
        }
        if let Some(max) = parse_var::<Decimal, _>(&lookup, ENV_MAX_AMOUNT)? {
            if max <= Decimal::ZERO {
                return Err(PaymentError::Config(format!(
                    "{} must be positive, got {}",
                    ENV_MAX_AMOUNT, max
                )));
            }
            settings.max_amount = Some(max);
        }
        settings.seed = parse_var::<u64, _>(&lookup, ENV_SEED)?;
        if let Some(attempts) = parse_var::<u32, _>(&lookup, ENV_RETRY_ATTEMPTS)? {
            settings.retry_attempts = attempts.max(1);
        }
        if let Some(ms) = parse_var::<u64, _>(&lookup, ENV_RETRY_BASE_MS)? {
            settings.retry_base_delay = Duration::from_millis(ms);
        }

        Ok(settings)
    }

    /// The checkout-widget client identifier.
    pub fn client_id(&self) -> &str {
        self.client_id.as_str()
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| PaymentError::Config(format!("Invalid {}='{}': {}", key, raw, e))),
        _ => Ok(None),
    }
}
