#![allow(dead_code)]

use async_trait::async_trait;
use paysim::domain::account::{AccountSnapshot, Amount, Currency};
use paysim::domain::payment::PaymentRequest;
use paysim::domain::ports::AccountProvider;
use paysim::error::{PaymentError, Result};
use paysim::infrastructure::mock_account::MockAccountProvider;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::Error;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

pub fn request(amount: Decimal, currency: &str, description: &str) -> PaymentRequest {
    PaymentRequest::new(
        Amount::new(amount).unwrap(),
        Currency::new(currency).unwrap(),
        description,
    )
    .unwrap()
}

pub fn generate_request_csv(path: &Path, rows: &[[&str; 3]]) -> std::result::Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["amount", "currency", "description"])?;
    for row in rows {
        wtr.write_record(row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Account provider that fails a set number of times before delegating to the mock.
pub struct FlakyAccountProvider {
    failures_left: AtomicU32,
    pub calls: Arc<AtomicU32>,
    error: fn() -> PaymentError,
}

impl FlakyAccountProvider {
    pub fn unavailable(failures: u32) -> Self {
        Self {
            failures_left: AtomicU32::new(failures),
            calls: Arc::new(AtomicU32::new(0)),
            error: || PaymentError::UpstreamUnavailable("account backend timed out".to_string()),
        }
    }

    pub fn not_found() -> Self {
        Self {
            failures_left: AtomicU32::new(u32::MAX),
            calls: Arc::new(AtomicU32::new(0)),
            error: || PaymentError::AccountNotFound("acc_12345".to_string()),
        }
    }
}

#[async_trait]
impl AccountProvider for FlakyAccountProvider {
    async fn fetch_account(&self) -> Result<AccountSnapshot> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let remaining = self.failures_left.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures_left.store(remaining - 1, Ordering::SeqCst);
            return Err((self.error)());
        }
        MockAccountProvider::new(Duration::ZERO).fetch_account().await
    }
}
