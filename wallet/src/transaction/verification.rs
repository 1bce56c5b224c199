//! Transaction verification: the procedure the ledger runs.
//!
//! Every transaction submitted through [`crate::ledger::Ledger`] must pass
//! [`verify_transfer`] before it can affect a balance. The checks are
//! ordered from cheapest to most expensive (field inspection before address
//! re-derivation before ECDSA) to fail fast on garbage.
//!
//! Construction-time validation ([`super::builder`]) already guarantees
//! well-formed addresses, a non-zero value, and a key/address pairing, so
//! for transactions built in-process only the signature check can actually
//! fire. The full procedure runs anyway: a ledger must not care where a
//! transaction came from.

use thiserror::Error;

use super::builder::Transaction;
use crate::identity::address::Address;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur during transfer verification.
///
/// Each variant maps to one validation rule, with enough context for
/// debugging and nothing that leaks key material.
#[derive(Debug, Error)]
pub enum VerificationError {
    /// The transfer value is zero.
    #[error("value must be > 0")]
    ZeroValue,

    /// The transaction is not signed.
    #[error("transaction is unsigned")]
    MissingSignature,

    /// The embedded public key does not derive the claimed sender address.
    #[error("public key does not derive sender address {address}")]
    SenderKeyMismatch { address: String },

    /// The ECDSA signature does not verify over the canonical bytes.
    #[error("signature does not verify against sender {sender}")]
    InvalidSignature { sender: String },
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Verifies a signed transfer.
///
/// The checks, in order:
///
/// 1. **Value**: must be > 0.
/// 2. **Signature present**: unsigned transfers are rejected outright.
/// 3. **Sender identity**: the sender address is independently re-derived
///    from the embedded public key and compared. A transaction carrying a
///    different identity's key fails here, so a stolen signature can't be
///    replayed under a substituted key.
/// 4. **Signature**: the `(r, s)` pair must verify against the public key
///    over the reconstructed canonical serialization. The verifier builds
///    those bytes itself from the fields it checked; it never trusts a
///    caller-supplied digest.
///
/// # Errors
///
/// Returns the first failing check as a [`VerificationError`].
pub fn verify_transfer(tx: &Transaction) -> Result<(), VerificationError> {
    // 1. Value must be non-zero.
    if tx.value() == 0 {
        return Err(VerificationError::ZeroValue);
    }

    // 2. Signature must be present.
    let signature = tx.signature().ok_or(VerificationError::MissingSignature)?;

    // 3. Re-derive the sender address from the embedded public key. The
    //    address in the transaction is a claim; the key is the evidence.
    let derived = Address::derive(tx.sender_public_key(), tx.sender().network());
    if &derived != tx.sender() {
        return Err(VerificationError::SenderKeyMismatch {
            address: tx.sender().as_str().to_string(),
        });
    }

    // 4. ECDSA verification over the reconstructed canonical bytes.
    if !tx.sender_public_key().verify(&tx.signable_bytes(), signature) {
        return Err(VerificationError::InvalidSignature {
            sender: tx.sender().as_str().to_string(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
