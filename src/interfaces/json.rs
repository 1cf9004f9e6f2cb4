//! JSON wire shapes. Field names and the `success`/`status`/`message` triple match
//! what the checkout page consumed.

use crate::application::checkout::SimulationReport;
use crate::domain::account::{AccountSnapshot, Amount, Currency};
use crate::domain::payment::{PaymentRequest, PaymentResponse, PaymentStatus};
use crate::error::{PaymentError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct AccountDto {
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    pub currency: String,
}

impl From<&AccountSnapshot> for AccountDto {
    fn from(account: &AccountSnapshot) -> Self {
        Self {
            id: account.id().to_string(),
            name: account.name().to_string(),
            balance: account.balance().value(),
            currency: account.currency().to_string(),
        }
    }
}

/// Unvalidated payment request as received from a caller.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct PaymentRequestDto {
    pub amount: Decimal,
    pub currency: String,
    #[serde(default)]
    pub description: String,
}

impl TryFrom<PaymentRequestDto> for PaymentRequest {
    type Error = PaymentError;

    fn try_from(dto: PaymentRequestDto) -> Result<Self> {
        PaymentRequest::new(
            Amount::new(dto.amount)?,
            Currency::new(&dto.currency)?,
            &dto.description,
        )
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponseDto {
    pub success: bool,
    pub transaction_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub currency: String,
    pub timestamp: DateTime<Utc>,
    pub status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<&PaymentResponse> for PaymentResponseDto {
    fn from(response: &PaymentResponse) -> Self {
        Self {
            success: response.success(),
            transaction_id: response.transaction_id().to_string(),
            amount: response.amount().value(),
            currency: response.currency().to_string(),
            timestamp: response.timestamp(),
            status: response.status(),
            message: response.message().map(str::to_string),
        }
    }
}

pub fn account_to_json(account: &AccountSnapshot) -> Result<String> {
    Ok(serde_json::to_string_pretty(&AccountDto::from(account))?)
}

pub fn response_to_json(response: &PaymentResponse) -> Result<String> {
    Ok(serde_json::to_string_pretty(&PaymentResponseDto::from(response))?)
}

pub fn report_to_json(report: &SimulationReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
