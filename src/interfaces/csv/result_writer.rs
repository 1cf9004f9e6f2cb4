use crate::domain::payment::{PaymentResponse, PaymentStatus};
use crate::error::Result;
use chrono::SecondsFormat;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct ResultRecord<'a> {
    transaction_id: &'a str,
    status: PaymentStatus,
    success: bool,
    amount: Decimal,
    currency: &'a str,
    timestamp: String,
    message: Option<&'a str>,
}

impl<'a> From<&'a PaymentResponse> for ResultRecord<'a> {
    fn from(response: &'a PaymentResponse) -> Self {
        Self {
            transaction_id: response.transaction_id().as_str(),
            status: response.status(),
            success: response.success(),
            amount: response.amount().value(),
            currency: response.currency().code(),
            timestamp: response
                .timestamp()
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            message: response.message(),
        }
    }
}

/// Writes payment responses as CSV, one row per response.
pub struct PaymentResultWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> PaymentResultWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_result(&mut self, response: &PaymentResponse) -> Result<()> {
        self.writer.serialize(ResultRecord::from(response))?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
