//! Transaction signing.
//!
//! Signing is a separate step from building because the keypair may not be
//! available at construction time (hardware wallet, remote signer, or just
//! a test that doesn't want key material). The signed payload is the
//! canonical [`Transaction::signable_bytes`] output (exactly the
//! `{sender, recipient, value}` tuple under a version byte) hashed with
//! SHA-256 and signed with RFC 6979 deterministic ECDSA.
//!
//! A failed signing operation returns [`SignError`] and nothing else
//! happens: the transaction is consumed but the wallet, its keys, and the
//! process are all fine. Callers retry or report as they see fit.

use super::builder::Transaction;
use crate::crypto::keys::{Keypair, SignError};

/// Signs a transaction, returning the signed copy.
///
/// Takes the transaction by value: the unsigned original ceases to exist
/// and the result carries the `(r, s)` signature. The caller is responsible
/// for the keypair matching the transaction's embedded sender key; the
/// builder enforces the key/address pairing, and a signature from any other
/// key will simply fail verification.
pub fn sign_transaction(tx: Transaction, keypair: &Keypair) -> Result<Transaction, SignError> {
    let payload = tx.signable_bytes();
    let signature = keypair.try_sign(&payload)?;
    Ok(tx.with_signature(signature))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Network;
    use crate::crypto::keys::{CurveId, Keypair};
    use crate::identity::address::Address;
    use crate::transaction::builder::TransactionBuilder;

    fn keypair(seed: u8) -> Keypair {
        Keypair::from_secret_bytes(CurveId::NistP256, &[seed; 32]).unwrap()
    }

    fn unsigned_tx(sender_kp: &Keypair, recipient_seed: u8, value: u64) -> Transaction {
        let sender = Address::derive(&sender_kp.public_key(), Network::Mainnet);
        let recipient = Address::derive(&keypair(recipient_seed).public_key(), Network::Mainnet);
        TransactionBuilder::new()
            .sender(sender.as_str())
            .recipient(recipient.as_str())
            .value(value)
            .sender_public_key(sender_kp.public_key())
            .build()
            .unwrap()
    }

    #[test]
    fn sign_sets_signature_field() {
        let kp = keypair(1);
        let tx = unsigned_tx(&kp, 2, 500);
        assert!(!tx.is_signed());

        let signed = sign_transaction(tx, &kp).unwrap();
        assert!(signed.is_signed());
    }

    #[test]
    fn signing_is_deterministic() {
        // RFC 6979: same keypair and same canonical bytes produce the same
        // (r, s) pair. No RNG is consumed at signing time.
        let kp = keypair(1);
        let sig1 = sign_transaction(unsigned_tx(&kp, 2, 100), &kp).unwrap();
        let sig2 = sign_transaction(unsigned_tx(&kp, 2, 100), &kp).unwrap();
        assert_eq!(
            sig1.signature().unwrap().to_bytes(),
            sig2.signature().unwrap().to_bytes()
        );
    }

    #[test]
    fn different_values_produce_different_signatures() {
        let kp = keypair(1);
        let sig_a = sign_transaction(unsigned_tx(&kp, 2, 100), &kp).unwrap();
        let sig_b = sign_transaction(unsigned_tx(&kp, 2, 200), &kp).unwrap();
        assert_ne!(
            sig_a.signature().unwrap().to_bytes(),
            sig_b.signature().unwrap().to_bytes()
        );
    }

    #[test]
    fn signing_does_not_change_signable_bytes() {
        let kp = keypair(1);
        let tx = unsigned_tx(&kp, 2, 100);
        let before = tx.signable_bytes();
        let signed = sign_transaction(tx, &kp).unwrap();
        assert_eq!(before, signed.signable_bytes());
    }

    #[test]
    fn signature_verifies_against_sender_key() {
        let kp = keypair(1);
        let signed = sign_transaction(unsigned_tx(&kp, 2, 100), &kp).unwrap();
        assert!(signed
            .sender_public_key()
            .verify(&signed.signable_bytes(), signed.signature().unwrap()));
    }

    #[test]
    fn works_on_secp256k1_too() {
        let kp = Keypair::from_secret_bytes(CurveId::Secp256k1, &[5u8; 32]).unwrap();
        let sender = Address::derive(&kp.public_key(), Network::Mainnet);
        let recipient = Address::derive(&keypair(6).public_key(), Network::Mainnet);
        let tx = TransactionBuilder::new()
            .sender(sender.as_str())
            .recipient(recipient.as_str())
            .value(42)
            .sender_public_key(kp.public_key())
            .build()
            .unwrap();

        let signed = sign_transaction(tx, &kp).unwrap();
        assert!(signed
            .sender_public_key()
            .verify(&signed.signable_bytes(), signed.signature().unwrap()));
    }
}
