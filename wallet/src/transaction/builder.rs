//! Transaction construction via the builder pattern.
//!
//! The [`TransactionBuilder`] enforces a disciplined construction flow:
//! set the fields, call `.build()`, and get back an unsigned, *validated*
//! [`Transaction`], or a [`ValidationError`] naming exactly what was wrong.
//! There is no way to hold a `Transaction` whose addresses don't parse,
//! whose value is zero, or whose embedded public key doesn't derive its
//! sender address. Deserialization funnels through the same checks.
//!
//! The builder does not sign; that happens in [`super::signing`]. This
//! separation keeps construction testable without key material.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SIGNING_PAYLOAD_VERSION;
use crate::crypto::keys::{PublicKey, Signature};
use crate::identity::address::{Address, AddressError};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while constructing a transaction.
///
/// Every variant is detectable without cryptography, so construction stays
/// cheap; signature checks belong to [`super::verification`].
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("invalid sender address: {0}")]
    SenderAddress(AddressError),

    #[error("invalid recipient address: {0}")]
    RecipientAddress(AddressError),

    #[error("value must be > 0")]
    ZeroValue,

    #[error("sender and recipient must differ: both are {address}")]
    SelfTransfer { address: String },

    #[error("sender public key is required")]
    MissingPublicKey,

    #[error("sender public key does not derive the sender address {address}")]
    KeyAddressMismatch { address: String },
}

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A transfer authorization: who pays whom, how much, and the proof.
///
/// Immutable once built: every field is private and there are no setters.
/// A signed transaction that later turns out to be "edited" is a protocol
/// violation by definition, so the type simply doesn't allow it.
///
/// # Canonical Byte Format
///
/// Signing and verification both operate on [`Transaction::signable_bytes`]:
///
/// ```text
/// [version u8] [len u8][sender ASCII] [len u8][recipient ASCII] [value u64 BE]
/// ```
///
/// Exactly the three semantic fields, nothing else. The embedded public key
/// and the signature are excluded; the key is authenticated by re-deriving
/// the sender address from it, and a signature can't cover itself.
/// JSON/serde is intentionally not used here: field ordering is not
/// guaranteed across serialization formats, and a canonical encoding that
/// can drift is not canonical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TransactionWire", into = "TransactionWire")]
pub struct Transaction {
    sender: Address,
    recipient: Address,
    value: u64,
    sender_public_key: PublicKey,
    signature: Option<Signature>,
}

impl Transaction {
    /// Assembles and validates a transaction from raw parts.
    ///
    /// This is the single validation choke point: the builder and every
    /// deserializer call through here. Checks, in order:
    ///
    /// 1. Sender address parses (Base58Check, checksum, known version).
    /// 2. Recipient address parses.
    /// 3. Value is non-zero.
    /// 4. Sender and recipient differ.
    /// 5. The embedded public key derives the sender address; a transfer
    ///    claiming one identity while carrying another's key never gets
    ///    past construction.
    pub fn from_parts(
        sender: &str,
        recipient: &str,
        value: u64,
        sender_public_key: PublicKey,
        signature: Option<Signature>,
    ) -> Result<Self, ValidationError> {
        let sender = Address::parse(sender).map_err(ValidationError::SenderAddress)?;
        let recipient = Address::parse(recipient).map_err(ValidationError::RecipientAddress)?;

        if value == 0 {
            return Err(ValidationError::ZeroValue);
        }

        if sender == recipient {
            return Err(ValidationError::SelfTransfer {
                address: sender.as_str().to_string(),
            });
        }

        let derived = Address::derive(&sender_public_key, sender.network());
        if derived != sender {
            return Err(ValidationError::KeyAddressMismatch {
                address: sender.as_str().to_string(),
            });
        }

        Ok(Self {
            sender,
            recipient,
            value,
            sender_public_key,
            signature,
        })
    }

    /// Returns the canonical byte representation used for signing and
    /// verification.
    ///
    /// Deterministic by construction: a version byte, the two addresses as
    /// length-prefixed ASCII (Base58Check strings are always well under 255
    /// bytes), and the value as a big-endian u64.
    pub fn signable_bytes(&self) -> Vec<u8> {
        let sender = self.sender.as_str().as_bytes();
        let recipient = self.recipient.as_str().as_bytes();

        let mut buf = Vec::with_capacity(3 + sender.len() + recipient.len() + 8);
        buf.push(SIGNING_PAYLOAD_VERSION);
        buf.push(sender.len() as u8);
        buf.extend_from_slice(sender);
        buf.push(recipient.len() as u8);
        buf.extend_from_slice(recipient);
        buf.extend_from_slice(&self.value.to_be_bytes());
        buf
    }

    /// The sender's address.
    pub fn sender(&self) -> &Address {
        &self.sender
    }

    /// The recipient's address.
    pub fn recipient(&self) -> &Address {
        &self.recipient
    }

    /// The transfer value in base units.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// The sender's public key, embedded so the ledger can verify without
    /// a key lookup.
    pub fn sender_public_key(&self) -> &PublicKey {
        &self.sender_public_key
    }

    /// The ECDSA signature, if the transaction has been signed.
    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }

    /// Returns `true` if the transaction carries a signature.
    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    /// Attaches a signature, consuming the unsigned transaction.
    /// Only [`super::signing::sign_transaction`] calls this.
    pub(crate) fn with_signature(mut self, signature: Signature) -> Self {
        self.signature = Some(signature);
        self
    }
}

// ---------------------------------------------------------------------------
// Wire form
// ---------------------------------------------------------------------------

/// The serde-facing shape of a transaction.
///
/// Deserialization goes `TransactionWire -> Transaction` through
/// [`Transaction::from_parts`], so a JSON document that fails semantic
/// validation fails to deserialize; there is no window where an invalid
/// transaction exists as a typed value.
#[derive(Serialize, Deserialize)]
struct TransactionWire {
    sender: String,
    recipient: String,
    value: u64,
    sender_public_key: PublicKey,
    signature: Option<Signature>,
}

impl TryFrom<TransactionWire> for Transaction {
    type Error = ValidationError;

    fn try_from(wire: TransactionWire) -> Result<Self, Self::Error> {
        Transaction::from_parts(
            &wire.sender,
            &wire.recipient,
            wire.value,
            wire.sender_public_key,
            wire.signature,
        )
    }
}

impl From<Transaction> for TransactionWire {
    fn from(tx: Transaction) -> Self {
        Self {
            sender: tx.sender.as_str().to_string(),
            recipient: tx.recipient.as_str().to_string(),
            value: tx.value,
            sender_public_key: tx.sender_public_key,
            signature: tx.signature,
        }
    }
}

// ---------------------------------------------------------------------------
// TransactionBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Transaction`] instances.
///
/// # Usage
///
/// ```rust,no_run
/// use lumen_wallet::config::Network;
/// use lumen_wallet::crypto::{CurveId, Keypair};
/// use lumen_wallet::identity::Address;
/// use lumen_wallet::transaction::TransactionBuilder;
///
/// let keypair = Keypair::generate(CurveId::NistP256)?;
/// let sender = Address::derive(&keypair.public_key(), Network::Mainnet);
///
/// let tx = TransactionBuilder::new()
///     .sender(sender.as_str())
///     .recipient("1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN2")
///     .value(50_000)
///     .sender_public_key(keypair.public_key())
///     .build()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Default)]
pub struct TransactionBuilder {
    sender: String,
    recipient: String,
    value: u64,
    sender_public_key: Option<PublicKey>,
}

impl TransactionBuilder {
    /// Creates an empty builder. All four fields are required; `build()`
    /// reports whichever is missing or invalid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sender's Base58Check address.
    pub fn sender(mut self, address: &str) -> Self {
        self.sender = address.to_string();
        self
    }

    /// Sets the recipient's Base58Check address.
    pub fn recipient(mut self, address: &str) -> Self {
        self.recipient = address.to_string();
        self
    }

    /// Sets the transfer value in base units.
    pub fn value(mut self, value: u64) -> Self {
        self.value = value;
        self
    }

    /// Sets the sender's public key. Must derive the sender address.
    pub fn sender_public_key(mut self, public_key: PublicKey) -> Self {
        self.sender_public_key = Some(public_key);
        self
    }

    /// Consumes the builder and produces an unsigned, validated
    /// [`Transaction`].
    pub fn build(self) -> Result<Transaction, ValidationError> {
        let public_key = self
            .sender_public_key
            .ok_or(ValidationError::MissingPublicKey)?;
        Transaction::from_parts(&self.sender, &self.recipient, self.value, public_key, None)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
