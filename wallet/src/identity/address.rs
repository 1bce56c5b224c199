//! # Base58Check Addresses
//!
//! An address is a one-way fingerprint of a public key:
//!
//! ```text
//! Base58( version || RIPEMD-160(SHA-256(x || y)) || checksum )
//! ```
//!
//! where `x || y` is the fixed-width 64-byte coordinate pair, the version
//! byte selects the network, and the checksum is the first 4 bytes of the
//! double SHA-256 of the preceding 21 bytes. Same construction as Bitcoin
//! P2PKH, so any block-explorer-grade tooling can validate one.
//!
//! Two rules this module enforces without exception:
//!
//! 1. **Derivation is total.** Any valid public key has an address; there
//!    is no error path.
//! 2. **Coordinates are fixed-width.** The hash input is always exactly 64
//!    bytes. A coordinate whose leading bytes are zero is padded, never
//!    shortened: a variable-width encoding would give the same key a
//!    different address roughly once every 128 keys.
//!
//! [`Address`] is a proof-carrying newtype: if you hold one, its string
//! passed length, checksum, and version validation (or was derived fresh
//! from a key, which is stronger).

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::config::{
    Network, ADDRESS_CHECKSUM_LENGTH, ADDRESS_PAYLOAD_LENGTH, COORDINATE_LENGTH,
    PUBLIC_KEY_HASH_LENGTH,
};
use crate::crypto::hash::{checksum, hash160};
use crate::crypto::keys::PublicKey;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors produced while parsing an address string.
#[derive(Debug, Error)]
pub enum AddressError {
    #[error("address is empty")]
    Empty,

    #[error("address is not valid base58: {0}")]
    Base58(#[from] bs58::decode::Error),

    #[error("address payload must be {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("address checksum mismatch")]
    ChecksumMismatch,

    #[error("unrecognized address version byte 0x{version:02x}")]
    UnknownVersion { version: u8 },
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A validated Base58Check address.
///
/// Immutable once constructed. Holds the encoded string alongside the
/// decoded network and public key hash so downstream code never re-decodes.
///
/// Serializes as the Base58Check string in every format; the string *is*
/// the canonical form; deserialization runs the full [`parse`](Self::parse)
/// validation.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Address {
    encoded: String,
    network: Network,
    hash: [u8; PUBLIC_KEY_HASH_LENGTH],
}

impl Address {
    /// Derives the address for a public key on the given network.
    ///
    /// Total and deterministic: the same key and network always produce the
    /// same address, on every platform. The pipeline is
    /// `hash160(x || y)` → prepend version → append 4-byte checksum →
    /// Base58.
    pub fn derive(public_key: &PublicKey, network: Network) -> Self {
        let (x, y) = public_key.coordinates();
        let mut point = [0u8; 2 * COORDINATE_LENGTH];
        point[..COORDINATE_LENGTH].copy_from_slice(&x);
        point[COORDINATE_LENGTH..].copy_from_slice(&y);
        Self::from_public_key_hash(hash160(&point), network)
    }

    /// Builds an address from an already-computed public key hash.
    ///
    /// Exposed for callers that only hold the 20-byte hash (e.g. imported
    /// watch-only entries). Prefer [`derive`](Self::derive) when the public
    /// key is available.
    pub fn from_public_key_hash(hash: [u8; PUBLIC_KEY_HASH_LENGTH], network: Network) -> Self {
        let mut payload = [0u8; ADDRESS_PAYLOAD_LENGTH];
        payload[0] = network.address_version();
        payload[1..1 + PUBLIC_KEY_HASH_LENGTH].copy_from_slice(&hash);
        let check = checksum(&payload[..1 + PUBLIC_KEY_HASH_LENGTH]);
        payload[1 + PUBLIC_KEY_HASH_LENGTH..].copy_from_slice(&check);

        Self {
            encoded: bs58::encode(payload).into_string(),
            network,
            hash,
        }
    }

    /// Parses and fully validates an address string.
    ///
    /// Checks, in order: non-empty, Base58 alphabet, exact 25-byte payload,
    /// checksum, known version byte. An `Address` that came through here is
    /// as trustworthy as a freshly derived one.
    pub fn parse(s: &str) -> Result<Self, AddressError> {
        if s.is_empty() {
            return Err(AddressError::Empty);
        }

        let payload = bs58::decode(s).into_vec()?;
        if payload.len() != ADDRESS_PAYLOAD_LENGTH {
            return Err(AddressError::InvalidLength {
                expected: ADDRESS_PAYLOAD_LENGTH,
                got: payload.len(),
            });
        }

        let body = &payload[..ADDRESS_PAYLOAD_LENGTH - ADDRESS_CHECKSUM_LENGTH];
        let expected = checksum(body);
        if payload[ADDRESS_PAYLOAD_LENGTH - ADDRESS_CHECKSUM_LENGTH..] != expected {
            return Err(AddressError::ChecksumMismatch);
        }

        let version = payload[0];
        let network = Network::from_address_version(version)
            .ok_or(AddressError::UnknownVersion { version })?;

        let mut hash = [0u8; PUBLIC_KEY_HASH_LENGTH];
        hash.copy_from_slice(&payload[1..1 + PUBLIC_KEY_HASH_LENGTH]);

        Ok(Self {
            encoded: s.to_string(),
            network,
            hash,
        })
    }

    /// The Base58Check string.
    pub fn as_str(&self) -> &str {
        &self.encoded
    }

    /// The network this address belongs to.
    pub fn network(&self) -> Network {
        self.network
    }

    /// The version byte (first byte of the decoded payload).
    pub fn version(&self) -> u8 {
        self.network.address_version()
    }

    /// The 20-byte RIPEMD-160 public key hash.
    pub fn public_key_hash(&self) -> &[u8; PUBLIC_KEY_HASH_LENGTH] {
        &self.hash
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({}, {})", self.encoded, self.network)
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encoded)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Address::parse(&s).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::{CurveId, Keypair};

    fn test_key(seed: u8) -> PublicKey {
        Keypair::from_secret_bytes(CurveId::NistP256, &[seed; 32])
            .unwrap()
            .public_key()
    }

    #[test]
    fn derivation_is_deterministic() {
        let pk = test_key(11);
        let a = Address::derive(&pk, Network::Mainnet);
        let b = Address::derive(&pk, Network::Mainnet);
        assert_eq!(a, b);
        assert_eq!(a.as_str(), b.as_str());
    }

    #[test]
    fn distinct_keys_distinct_addresses() {
        let a = Address::derive(&test_key(1), Network::Mainnet);
        let b = Address::derive(&test_key(2), Network::Mainnet);
        assert_ne!(a, b);
    }

    #[test]
    fn networks_produce_distinct_addresses() {
        let pk = test_key(3);
        let mainnet = Address::derive(&pk, Network::Mainnet);
        let testnet = Address::derive(&pk, Network::Testnet);
        assert_ne!(mainnet.as_str(), testnet.as_str());
        assert_eq!(mainnet.public_key_hash(), testnet.public_key_hash());
    }

    #[test]
    fn mainnet_addresses_start_with_one() {
        // Version byte 0x00 is a leading zero in the payload, which Base58
        // encodes as a literal '1'.
        for seed in 1..=8u8 {
            let addr = Address::derive(&test_key(seed), Network::Mainnet);
            assert!(addr.as_str().starts_with('1'), "got {}", addr.as_str());
        }
    }

    #[test]
    fn parse_roundtrip() {
        let addr = Address::derive(&test_key(5), Network::Testnet);
        let parsed = Address::parse(addr.as_str()).unwrap();
        assert_eq!(addr, parsed);
        assert_eq!(parsed.network(), Network::Testnet);
        assert_eq!(parsed.public_key_hash(), addr.public_key_hash());
    }

    #[test]
    fn rejects_empty_string() {
        assert!(matches!(Address::parse(""), Err(AddressError::Empty)));
    }

    #[test]
    fn rejects_non_base58_characters() {
        // '0', 'O', 'I', and 'l' are excluded from the Base58 alphabet.
        assert!(matches!(
            Address::parse("0OIl0OIl0OIl0OIl0OIl0OIl0"),
            Err(AddressError::Base58(_))
        ));
    }

    #[test]
    fn rejects_wrong_payload_length() {
        let short = bs58::encode([0u8; 10]).into_string();
        assert!(matches!(
            Address::parse(&short),
            Err(AddressError::InvalidLength { got: 10, .. })
        ));
    }

    #[test]
    fn rejects_corrupted_checksum() {
        let addr = Address::derive(&test_key(7), Network::Mainnet);
        let mut payload = bs58::decode(addr.as_str()).into_vec().unwrap();
        payload[10] ^= 0xFF; // corrupt a hash byte, keep the old checksum
        let corrupted = bs58::encode(payload).into_string();
        assert!(matches!(
            Address::parse(&corrupted),
            Err(AddressError::ChecksumMismatch)
        ));
    }

    #[test]
    fn rejects_unknown_version_byte() {
        // Well-formed payload with a valid checksum but a version byte no
        // network claims.
        let mut payload = [0u8; ADDRESS_PAYLOAD_LENGTH];
        payload[0] = 0x42;
        let check = checksum(&payload[..21]);
        payload[21..].copy_from_slice(&check);
        let encoded = bs58::encode(payload).into_string();
        assert!(matches!(
            Address::parse(&encoded),
            Err(AddressError::UnknownVersion { version: 0x42 })
        ));
    }

    #[test]
    fn leading_zero_coordinates_derive_consistently() {
        // Roughly 1 in 128 keys has a leading zero byte in x or y. Scan a
        // fixed seed range until we find one and check that derivation is
        // stable and the address fully validates; the regression this
        // guards against is hashing a shortened coordinate encoding.
        let mut checked = 0;
        for i in 1u32..=4096 {
            let mut seed = [0u8; 32];
            seed[28..].copy_from_slice(&i.to_be_bytes());
            let kp = Keypair::from_secret_bytes(CurveId::NistP256, &seed).unwrap();
            let (x, y) = kp.public_key().coordinates();
            if x[0] != 0 && y[0] != 0 {
                continue;
            }

            let a = Address::derive(&kp.public_key(), Network::Mainnet);
            let b = Address::derive(&kp.public_key(), Network::Mainnet);
            assert_eq!(a, b);
            assert!(Address::parse(a.as_str()).is_ok());
            checked += 1;
            if checked >= 3 {
                break;
            }
        }
        assert!(checked > 0, "no leading-zero coordinate in the seed range");
    }

    #[test]
    fn padding_position_changes_the_hash() {
        // A zero byte padded at the front of x must hash differently from
        // the same bytes shifted, i.e. the pipeline is position-sensitive,
        // not just content-sensitive.
        let mut a = [0u8; 64];
        let mut b = [0u8; 64];
        a[1] = 0xAB; // x = 0x00AB.., y = zeros
        b[0] = 0xAB; // x = 0xAB.., y = zeros
        assert_ne!(hash160(&a), hash160(&b));
    }

    #[test]
    fn json_roundtrip() {
        let addr = Address::derive(&test_key(9), Network::Mainnet);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"{}\"", addr.as_str()));
        let recovered: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(addr, recovered);
    }

    #[test]
    fn json_rejects_tampered_address() {
        let addr = Address::derive(&test_key(9), Network::Mainnet);
        let mut s = addr.as_str().to_string();
        // Swap the last character for a different alphabet member.
        let last = s.pop().unwrap();
        s.push(if last == '2' { '3' } else { '2' });
        assert!(serde_json::from_str::<Address>(&format!("\"{}\"", s)).is_err());
    }
}
