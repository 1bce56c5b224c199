//! # Hashing Utilities
//!
//! The two hash functions used by the address pipeline, and nothing else:
//!
//! - **SHA-256**: for the signing digest, the first stage of address
//!   derivation, and the double-hash checksum.
//! - **RIPEMD-160**: for compressing the 32-byte SHA-256 digest down to
//!   the 20-byte public key hash that goes into an address.
//!
//! This is the exact `hash160` construction Bitcoin uses for P2PKH
//! addresses. It isn't the fastest or the most modern choice, but the
//! address format is Base58Check and anything else would produce addresses
//! nobody can cross-check against existing tooling.
//!
//! All functions return fixed-size arrays. Callers that need a slice can
//! borrow one; callers that need an owned buffer can copy. Nothing here
//! allocates.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

use crate::config::ADDRESS_CHECKSUM_LENGTH;

/// Compute the SHA-256 digest of the input.
///
/// # Example
///
/// ```
/// use lumen_wallet::crypto::sha256;
///
/// let digest = sha256(b"lumen");
/// assert_eq!(digest.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute the double-SHA-256 digest: `SHA-256(SHA-256(data))`.
///
/// Used for the Base58Check checksum. The double hash is Bitcoin's
/// length-extension countermeasure; we keep it for format compatibility.
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// Compute the RIPEMD-160 digest of the input.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    let mut hasher = Ripemd160::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute `RIPEMD-160(SHA-256(data))`, the public key hash.
///
/// This is stage 2+3 of address derivation. The input must be the
/// fixed-width `x || y` coordinate pair, never a variable-width encoding;
/// see [`crate::identity::Address::derive`].
pub fn hash160(data: &[u8]) -> [u8; 20] {
    ripemd160(&sha256(data))
}

/// Compute the 4-byte Base58Check checksum: the leading bytes of
/// `double_sha256(data)` over the version byte plus public key hash.
pub fn checksum(data: &[u8]) -> [u8; ADDRESS_CHECKSUM_LENGTH] {
    let digest = double_sha256(data);
    let mut out = [0u8; ADDRESS_CHECKSUM_LENGTH];
    out.copy_from_slice(&digest[..ADDRESS_CHECKSUM_LENGTH]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_vector() {
        // SHA-256 of the empty string, the canonical test vector everyone
        // should have memorized by now.
        let digest = sha256(b"");
        let expected =
            hex::decode("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
                .unwrap();
        assert_eq!(digest.as_slice(), expected.as_slice());
    }

    #[test]
    fn test_ripemd160_known_vector() {
        // RIPEMD-160("") from the original function specification.
        let digest = ripemd160(b"");
        let expected = hex::decode("9c1185a5c5e9fc54612808977ee8f548b2258d31").unwrap();
        assert_eq!(digest.as_slice(), expected.as_slice());
    }

    #[test]
    fn test_hash160_known_vector() {
        // hash160("") = RIPEMD-160(SHA-256("")), cross-checked against
        // Bitcoin tooling.
        let digest = hash160(b"");
        let expected = hex::decode("b472a266d0bd89c13706a4132ccfb16f7c3b9fcb").unwrap();
        assert_eq!(digest.as_slice(), expected.as_slice());
    }

    #[test]
    fn sha256_deterministic() {
        assert_eq!(sha256(b"lumen"), sha256(b"lumen"));
    }

    #[test]
    fn double_sha256_differs_from_single() {
        let single = sha256(b"lumen");
        let double = double_sha256(b"lumen");
        assert_ne!(single, double);
        // But double should equal SHA-256 of the single hash.
        assert_eq!(double, sha256(&single));
    }

    #[test]
    fn test_hash160_composition() {
        let data = b"composition check";
        assert_eq!(hash160(data), ripemd160(&sha256(data)));
    }

    #[test]
    fn test_checksum_is_prefix_of_double_sha256() {
        let payload = b"\x00some address payload";
        let full = double_sha256(payload);
        assert_eq!(checksum(payload), full[..4]);
    }

    #[test]
    fn test_checksum_sensitive_to_every_byte() {
        let a = checksum(b"\x00payload");
        let b = checksum(b"\x01payload");
        assert_ne!(a, b);
    }
}
