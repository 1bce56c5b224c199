//! Cryptographic primitives: hashing and ECDSA key material.
//!
//! Everything in here is a thin, well-typed wrapper over the RustCrypto
//! crates. No hand-rolled math, no clever shortcuts.

pub mod hash;
pub mod keys;

pub use hash::{checksum, double_sha256, hash160, ripemd160, sha256};
pub use keys::{CurveId, KeyError, Keypair, PublicKey, SignError, Signature};
