//! In-process backends behind the domain ports.

pub mod mock_account;
pub mod random;
pub mod simulator;
