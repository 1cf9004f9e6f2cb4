use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// Currency codes the checkout widget accepts.
pub const SUPPORTED_CURRENCIES: [&str; 6] = ["USD", "EUR", "GBP", "CAD", "AUD", "JPY"];

/// Smallest unit a payment amount may be expressed in (two fractional digits).
const MAX_AMOUNT_SCALE: u32 = 2;

/// A non-negative account balance.
///
/// This is a wrapper around `rust_decimal::Decimal` so a snapshot can never carry
/// an overdrawn figure.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Balance(Decimal);

impl Balance {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Result<Self> {
        if value >= Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(PaymentError::Validation(
                "Balance must not be negative".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl From<Balance> for Decimal {
    fn from(balance: Balance) -> Self {
        balance.0
    }
}

/// A positive monetary amount for a payment.
///
/// Amounts are limited to cents; anything finer is rejected rather than rounded.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self> {
        if value <= Decimal::ZERO {
            return Err(PaymentError::Validation(
                "Amount must be positive".to_string(),
            ));
        }
        if value.normalize().scale() > MAX_AMOUNT_SCALE {
            return Err(PaymentError::Validation(format!(
                "Amount {} has more than {} decimal places",
                value, MAX_AMOUNT_SCALE
            )));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = PaymentError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

/// A three-letter ISO-4217 style currency code, stored upper case.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Currency(String);

impl Currency {
    pub fn new(code: &str) -> Result<Self> {
        let code = code.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(PaymentError::Validation(format!(
                "Currency code '{}' must be three letters",
                code
            )));
        }

        let code = code.to_ascii_uppercase();
        if !SUPPORTED_CURRENCIES.contains(&code.as_str()) {
            return Err(PaymentError::Validation(format!(
                "Unsupported currency: {}",
                code
            )));
        }
        Ok(Self(code))
    }

    pub fn usd() -> Self {
        Self("USD".to_string())
    }

    pub fn code(&self) -> &str {
        &self.0
    }

    /// Fractional digits of the currency's minor unit.
    pub fn minor_units(&self) -> u32 {
        match self.0.as_str() {
            "JPY" => 0,
            _ => MAX_AMOUNT_SCALE,
        }
    }
}

impl FromStr for Currency {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque account identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Point-in-time view of an account as returned by an account provider.
///
/// Fields are read-only; a snapshot has no lifecycle beyond the fetch that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountSnapshot {
    id: AccountId,
    name: String,
    balance: Balance,
    currency: Currency,
}

impl AccountSnapshot {
    pub fn new(id: AccountId, name: impl Into<String>, balance: Balance, currency: Currency) -> Self {
        Self {
            id,
            name: name.into(),
            balance,
            currency,
        }
    }

    pub fn id(&self) -> &AccountId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> Balance {
        self.balance
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }
}
