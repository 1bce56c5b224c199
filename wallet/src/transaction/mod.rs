//! Transfer construction, signing, and verification.
//!
//! The lifecycle is build → sign → verify: [`TransactionBuilder`] validates
//! eagerly and produces an immutable [`Transaction`], [`sign_transaction`]
//! attaches the ECDSA signature, and [`verify_transfer`] is the procedure
//! the ledger runs before accepting anything.

pub mod builder;
pub mod signing;
pub mod verification;

pub use builder::{Transaction, TransactionBuilder, ValidationError};
pub use signing::sign_transaction;
pub use verification::{verify_transfer, VerificationError};
