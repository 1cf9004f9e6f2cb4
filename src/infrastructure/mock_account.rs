use crate::config::{DEFAULT_ACCOUNT_LATENCY, Settings};
use crate::domain::account::{AccountId, AccountSnapshot, Balance, Currency};
use crate::domain::ports::AccountProvider;
use crate::error::Result;
use async_trait::async_trait;
use rust_decimal_macros::dec;
use std::time::Duration;
use tracing::info;

/// Account provider returning one fixed snapshot after a simulated network delay.
#[derive(Debug, Clone)]
pub struct MockAccountProvider {
    latency: Duration,
}

impl Default for MockAccountProvider {
    fn default() -> Self {
        Self::new(DEFAULT_ACCOUNT_LATENCY)
    }
}

impl MockAccountProvider {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.account_latency)
    }
}

#[async_trait]
impl AccountProvider for MockAccountProvider {
    async fn fetch_account(&self) -> Result<AccountSnapshot> {
        info!(latency_ms = self.latency.as_millis() as u64, "Fetching account data");
        tokio::time::sleep(self.latency).await;

        Ok(AccountSnapshot::new(
            AccountId::new("acc_12345"),
            "John Doe",
            Balance::new(dec!(1250.75))?,
            Currency::usd(),
        ))
    }
}
