//! In-memory ledger used by the `demo` subcommand.
//!
//! Verifies every submitted transfer, keeps plain per-address balances, and
//! rejects overdrafts. Real deployments would talk to a node; this client
//! ships without a network layer, so the demo settles against this.

use std::collections::HashMap;

use lumen_wallet::identity::Address;
use lumen_wallet::ledger::{Ledger, LedgerError};
use lumen_wallet::transaction::{verify_transfer, Transaction};

/// Balance map keyed by encoded address.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    balances: HashMap<String, u64>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits an address out of thin air. The demo's faucet.
    pub fn credit(&mut self, address: &Address, value: u64) {
        *self
            .balances
            .entry(address.as_str().to_string())
            .or_insert(0) += value;
    }
}

impl Ledger for MemoryLedger {
    fn accept_transaction(&mut self, tx: &Transaction) -> Result<(), LedgerError> {
        verify_transfer(tx)?;

        let available = self
            .balances
            .get(tx.sender().as_str())
            .copied()
            .unwrap_or(0);
        if available < tx.value() {
            return Err(LedgerError::new(format!(
                "insufficient funds: balance {} < value {}",
                available,
                tx.value()
            )));
        }

        *self
            .balances
            .entry(tx.sender().as_str().to_string())
            .or_insert(0) -= tx.value();
        *self
            .balances
            .entry(tx.recipient().as_str().to_string())
            .or_insert(0) += tx.value();
        Ok(())
    }

    fn total_amount(&self, address: &Address) -> u64 {
        self.balances.get(address.as_str()).copied().unwrap_or(0)
    }
}
