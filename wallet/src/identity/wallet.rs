//! # Wallets
//!
//! A [`Wallet`] binds a keypair to its derived address and is the only type
//! in the crate that holds a secret scalar. Everything a wallet does in
//! public (its address, its public key, the transfers it signs) is
//! derived; the secret never travels.
//!
//! Construction returns a [`WalletCreated`] event *value* instead of
//! writing to a global logger. The library has no opinion about whether a
//! new wallet is worth a log line; the binary does (see `lumen-cli`), and a
//! test harness usually wants silence.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::config::Network;
use crate::crypto::keys::{CurveId, KeyError, Keypair, PublicKey, SignError};
use crate::identity::address::Address;
use crate::transaction::builder::{Transaction, TransactionBuilder, ValidationError};
use crate::transaction::signing::sign_transaction;

/// Errors from wallet-level transfer operations.
#[derive(Debug, Error)]
pub enum WalletError {
    #[error("transfer validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("transfer signing failed: {0}")]
    Signing(#[from] SignError),
}

/// Event value describing a freshly constructed wallet.
///
/// Contains only public material, so it is safe to log, serialize, or ship
/// to an audit trail as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalletCreated {
    pub address: Address,
    pub curve: CurveId,
    pub network: Network,
}

/// A cryptographic identity: keypair, network, and cached address.
///
/// The address is computed once at construction; it is a pure function of
/// the public key and network, so caching it is free correctness.
///
/// `Wallet` does not implement `Serialize`. A wallet on the wire is a
/// leaked private key; export the secret deliberately via
/// [`Keypair::secret_key_bytes`] if you really mean to.
pub struct Wallet {
    keypair: Keypair,
    network: Network,
    address: Address,
}

impl Wallet {
    /// Generates a wallet with a fresh OS-RNG keypair.
    ///
    /// Returns the wallet together with its [`WalletCreated`] event; the
    /// caller decides whether and how to record it. Fails only if the
    /// entropy source does.
    pub fn generate(curve: CurveId, network: Network) -> Result<(Self, WalletCreated), KeyError> {
        Ok(Self::from_keypair(Keypair::generate(curve)?, network))
    }

    /// Reconstructs a wallet from 32 bytes of secret scalar material.
    ///
    /// Deterministic; intended for fixtures and KDF-derived identities.
    pub fn from_secret_bytes(
        curve: CurveId,
        network: Network,
        secret: &[u8; 32],
    ) -> Result<(Self, WalletCreated), KeyError> {
        Ok(Self::from_keypair(
            Keypair::from_secret_bytes(curve, secret)?,
            network,
        ))
    }

    fn from_keypair(keypair: Keypair, network: Network) -> (Self, WalletCreated) {
        let address = Address::derive(&keypair.public_key(), network);
        let event = WalletCreated {
            address: address.clone(),
            curve: keypair.curve(),
            network,
        };
        (
            Self {
                keypair,
                network,
                address,
            },
            event,
        )
    }

    /// The wallet's Base58Check address.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// The public half of the wallet's keypair.
    pub fn public_key(&self) -> PublicKey {
        self.keypair.public_key()
    }

    /// The network this wallet derives addresses for.
    pub fn network(&self) -> Network {
        self.network
    }

    /// The curve the wallet's keypair lives on.
    pub fn curve(&self) -> CurveId {
        self.keypair.curve()
    }

    /// Builds and signs a transfer of `value` base units to `recipient`.
    ///
    /// One-stop shop for the common case: validation happens in the
    /// builder, signing happens with this wallet's key, and the returned
    /// transaction is ready for [`crate::ledger::Ledger::accept_transaction`].
    pub fn transfer_to(&self, recipient: &Address, value: u64) -> Result<Transaction, WalletError> {
        let tx = TransactionBuilder::new()
            .sender(self.address.as_str())
            .recipient(recipient.as_str())
            .value(value)
            .sender_public_key(self.public_key())
            .build()?;
        Ok(self.sign(tx)?)
    }

    /// Signs a pre-built transaction with this wallet's key.
    ///
    /// The transaction's embedded sender key must be this wallet's public
    /// key, or verification will reject the result; the builder enforces
    /// the key/address pairing, this method does not re-check it.
    pub fn sign(&self, tx: Transaction) -> Result<Transaction, SignError> {
        sign_transaction(tx, &self.keypair)
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The keypair's own Debug is already redacting; skip it entirely
        // here so a wallet in a log line is just an address.
        write!(
            f,
            "Wallet(address={}, curve={}, network={})",
            self.address,
            self.curve(),
            self.network
        )
    }
}
