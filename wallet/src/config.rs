//! # Protocol Configuration & Constants
//!
//! Every magic number in the Lumen wallet lives here. If you're hardcoding
//! a constant somewhere else, you're doing it wrong and you owe the team
//! coffee.
//!
//! Most of these values are fixed by the address and signing formats: change
//! one and every previously derived address or signature stops verifying.
//! Treat them as frozen.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Networks
// ---------------------------------------------------------------------------

/// Base58Check version byte for mainnet addresses. `0x00` makes every
/// mainnet address start with `1`, same as Bitcoin P2PKH.
pub const ADDRESS_VERSION_MAINNET: u8 = 0x00;

/// Base58Check version byte for testnet addresses (`0x6F`, Bitcoin testnet
/// convention: addresses start with `m` or `n`).
pub const ADDRESS_VERSION_TESTNET: u8 = 0x6F;

/// The network an address belongs to, encoded in its version byte.
///
/// Mainnet and testnet addresses are deliberately incompatible: a testnet
/// address fails checksum-independent version validation on mainnet, which
/// is the whole point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    /// The Base58Check version byte prepended to the public key hash.
    pub fn address_version(&self) -> u8 {
        match self {
            Network::Mainnet => ADDRESS_VERSION_MAINNET,
            Network::Testnet => ADDRESS_VERSION_TESTNET,
        }
    }

    /// Maps a version byte back to its network. Returns `None` for
    /// unrecognized bytes; we don't guess.
    pub fn from_address_version(version: u8) -> Option<Self> {
        match version {
            ADDRESS_VERSION_MAINNET => Some(Network::Mainnet),
            ADDRESS_VERSION_TESTNET => Some(Network::Testnet),
            _ => None,
        }
    }

    /// Parses a network name as used in CLI flags and config files.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "mainnet" => Some(Network::Mainnet),
            "testnet" => Some(Network::Testnet),
            _ => None,
        }
    }

    /// Lowercase network name, mainly for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Address Pipeline
// ---------------------------------------------------------------------------

/// Length of a RIPEMD-160 digest, the public key hash at the heart of
/// every address.
pub const PUBLIC_KEY_HASH_LENGTH: usize = 20;

/// Length of the Base58Check checksum: the first 4 bytes of
/// `SHA-256(SHA-256(version || hash))`.
pub const ADDRESS_CHECKSUM_LENGTH: usize = 4;

/// Total decoded address payload: version byte + 20-byte public key hash +
/// 4-byte checksum. Anything else is not an address.
pub const ADDRESS_PAYLOAD_LENGTH: usize = 25;

/// Width of one affine coordinate on either supported curve, in bytes.
/// Coordinates are always zero-padded to this width before hashing, so a
/// point with a small x or y hashes the same way everywhere.
pub const COORDINATE_LENGTH: usize = 32;

/// Length of an uncompressed SEC1 point: `0x04 || x || y`.
pub const UNCOMPRESSED_POINT_LENGTH: usize = 1 + 2 * COORDINATE_LENGTH;

// ---------------------------------------------------------------------------
// Signing
// ---------------------------------------------------------------------------

/// ECDSA secret scalar length for both supported curves.
pub const SECRET_KEY_LENGTH: usize = 32;

/// ECDSA signature length: 32-byte `r` followed by 32-byte `s`.
pub const SIGNATURE_LENGTH: usize = 64;

/// Version byte prefixed to the canonical signing payload. Bump this if the
/// payload layout ever changes; old signatures must not verify against a
/// new layout.
pub const SIGNING_PAYLOAD_VERSION: u8 = 1;
