use crate::domain::payment::PaymentRequest;
use crate::error::{PaymentError, Result};
use crate::interfaces::json::PaymentRequestDto;
use std::io::Read;

/// Reads payment requests from a CSV source with an `amount, currency, description` header.
///
/// Each row is deserialized and then validated, so a malformed or invalid row yields
/// an `Err` item without ending the stream.
pub struct PaymentRequestReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> PaymentRequestReader<R> {
    /// Creates a new `PaymentRequestReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and validates requests.
    pub fn requests(self) -> impl Iterator<Item = Result<PaymentRequest>> {
        self.reader.into_deserialize().map(|result| {
            let dto: PaymentRequestDto = result.map_err(PaymentError::from)?;
            PaymentRequest::try_from(dto)
        })
    }
}
