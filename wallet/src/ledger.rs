//! # Ledger Boundary
//!
//! The wallet does not know what a ledger is made of (blocks, a database
//! table, a test HashMap) and it must not. This module is the entire
//! contract between the two sides: a ledger accepts verified transactions
//! and answers balance queries, full stop.
//!
//! Acceptance failure is deliberately opaque. Whether a ledger rejected a
//! transfer because the signature was bad, the funds were short, or its
//! mempool was full is the ledger's business; the wallet only needs to know
//! the transfer did not land.

use thiserror::Error;

use crate::identity::address::Address;
use crate::transaction::builder::Transaction;
use crate::transaction::verification::VerificationError;

/// A transaction the ledger declined to accept.
#[derive(Debug, Error)]
#[error("transaction rejected by ledger: {reason}")]
pub struct LedgerError {
    reason: String,
}

impl LedgerError {
    /// Creates a rejection with a human-readable reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// The rejection reason, for display and logging.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl From<VerificationError> for LedgerError {
    fn from(err: VerificationError) -> Self {
        Self::new(err.to_string())
    }
}

/// The ledger collaborator interface.
///
/// Implementations are expected to run
/// [`verify_transfer`](crate::transaction::verify_transfer) inside
/// `accept_transaction`; the wallet signs, but the ledger decides.
///
/// `total_amount` sums the effect of every accepted transaction on one
/// address: credits minus debits. An address the ledger has never seen has
/// a balance of zero, not an error.
pub trait Ledger {
    /// Submits a signed transaction. On `Ok(())` the transfer is accepted
    /// and visible to subsequent `total_amount` calls.
    fn accept_transaction(&mut self, tx: &Transaction) -> Result<(), LedgerError>;

    /// The current balance of an address, in base units.
    fn total_amount(&self, address: &Address) -> u64;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Network;
    use crate::crypto::keys::CurveId;
    use crate::identity::wallet::Wallet;
    use std::collections::HashMap;

    /// Minimal trait implementation: records nothing but per-address
    /// credits, rejects everything with an even value.
    struct PickyLedger {
        credits: HashMap<String, u64>,
    }

    impl Ledger for PickyLedger {
        fn accept_transaction(&mut self, tx: &Transaction) -> Result<(), LedgerError> {
            if tx.value() % 2 == 0 {
                return Err(LedgerError::new("this ledger only likes odd values"));
            }
            *self
                .credits
                .entry(tx.recipient().as_str().to_string())
                .or_insert(0) += tx.value();
            Ok(())
        }

        fn total_amount(&self, address: &Address) -> u64 {
            self.credits.get(address.as_str()).copied().unwrap_or(0)
        }
    }

    #[test]
    fn trait_is_object_safe() {
        let ledger: Box<dyn Ledger> = Box::new(PickyLedger {
            credits: HashMap::new(),
        });
        let (wallet, _) = Wallet::generate(CurveId::NistP256, Network::Mainnet).unwrap();
        assert_eq!(ledger.total_amount(wallet.address()), 0);
    }

    #[test]
    fn rejection_reason_is_preserved() {
        let mut ledger = PickyLedger {
            credits: HashMap::new(),
        };
        let (a, _) = Wallet::generate(CurveId::NistP256, Network::Mainnet).unwrap();
        let (b, _) = Wallet::generate(CurveId::NistP256, Network::Mainnet).unwrap();

        let tx = a.transfer_to(b.address(), 2).unwrap();
        let err = ledger.accept_transaction(&tx).unwrap_err();
        assert!(err.reason().contains("odd"));

        let tx = a.transfer_to(b.address(), 3).unwrap();
        assert!(ledger.accept_transaction(&tx).is_ok());
        assert_eq!(ledger.total_amount(b.address()), 3);
    }

    #[test]
    fn unknown_address_has_zero_balance() {
        let ledger = PickyLedger {
            credits: HashMap::new(),
        };
        let (wallet, _) = Wallet::generate(CurveId::Secp256k1, Network::Testnet).unwrap();
        assert_eq!(ledger.total_amount(wallet.address()), 0);
    }

    #[test]
    fn verification_error_converts_to_rejection() {
        let err: LedgerError = VerificationError::ZeroValue.into();
        assert!(err.reason().contains("value"));
    }
}
