//! Application layer orchestrating the account provider and the payment gateway.
//!
//! This module defines the `CheckoutService`, which plays the part the checkout
//! page played: load the account once, then submit payments on demand.

pub mod checkout;
