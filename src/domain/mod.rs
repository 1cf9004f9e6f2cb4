//! Domain layer: money value objects, the account snapshot, the payment
//! request/response contract and the ports the backends implement.

pub mod account;
pub mod payment;
pub mod ports;
