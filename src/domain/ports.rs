use super::account::AccountSnapshot;
use super::payment::{PaymentRequest, PaymentResponse};
use crate::error::Result;
use async_trait::async_trait;

/// Source of account data shown to the payer.
#[async_trait]
pub trait AccountProvider: Send + Sync {
    async fn fetch_account(&self) -> Result<AccountSnapshot>;
}

/// Backend that processes a payment and reports its outcome.
///
/// A declined payment is `Ok` with a failed outcome; `Err` means the payment
/// could not be processed at all.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn submit_payment(&self, request: &PaymentRequest) -> Result<PaymentResponse>;
}

/// Uniform random draws in `[0, 1)`.
pub trait RandomSource: Send + Sync {
    fn next_unit(&self) -> f64;
}

pub type AccountProviderBox = Box<dyn AccountProvider>;
pub type PaymentGatewayBox = Box<dyn PaymentGateway>;
pub type RandomSourceBox = Box<dyn RandomSource>;
