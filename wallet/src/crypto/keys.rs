//! # Key Management
//!
//! ECDSA keypair generation and serialization for Lumen identities.
//!
//! Every wallet owns exactly one keypair. This module handles creation,
//! serialization, signing, and verification; address derivation lives in
//! [`crate::identity`].
//!
//! ## Curve choice
//!
//! The curve is an explicit parameter, not an ambient global. Two are
//! supported, both through the RustCrypto `ecdsa` stack:
//!
//! - **NIST P-256**: the default. FIPS-blessed, hardware-accelerated on
//!   most platforms, and what the reference deployment runs.
//! - **secp256k1**: offered because the address format is Bitcoin's, and
//!   some operators want the curve to match.
//!
//! Both use RFC 6979 deterministic nonces over a SHA-256 prehash, so a bad
//! RNG at signing time cannot leak the key (see: PlayStation 3 master key
//! incident, 2010). Randomness is only consumed at generation time, and a
//! failing OS RNG surfaces as [`KeyError::EntropyUnavailable`], never a
//! silent fallback to something weaker.
//!
//! ## Security considerations
//!
//! - Secret scalars come from `OsRng` via the fallible `try_fill_bytes`.
//! - Key bytes are never logged. If you add logging to this module, you
//!   will be asked to leave.

use k256::ecdsa as k256_ecdsa;
use p256::ecdsa as p256_ecdsa;
use p256::ecdsa::signature::{Signer, Verifier};
use rand_core::{OsRng, RngCore};
use serde::de::Error as DeError;
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use thiserror::Error;

use crate::config::{
    COORDINATE_LENGTH, SECRET_KEY_LENGTH, SIGNATURE_LENGTH, UNCOMPRESSED_POINT_LENGTH,
};

/// Candidate scalars outside `[1, n-1]` are redrawn. For P-256 the redraw
/// probability per attempt is about 2^-32, so hitting this bound means the
/// OS RNG is returning garbage, not that we got unlucky.
const MAX_SCALAR_ATTEMPTS: usize = 8;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur during key creation or decoding.
///
/// These are intentionally vague about *why* something failed; leaking
/// details about key material through error messages is a classic footgun.
#[derive(Debug, Error)]
pub enum KeyError {
    /// The operating system RNG refused to produce bytes. There is no safe
    /// recovery except reporting it; retrying with weaker randomness is how
    /// keys end up on rainbow tables.
    #[error("entropy source unavailable: {0}")]
    EntropyUnavailable(String),

    #[error("invalid secret key bytes: wrong length or not a valid scalar")]
    InvalidSecretKey,

    #[error("invalid public key bytes: not a valid curve point")]
    InvalidPublicKey,
}

/// Errors produced while signing.
///
/// A signing failure is recoverable: the wallet and its keys are still
/// intact, the caller just didn't get a signature this time.
#[derive(Debug, Error)]
pub enum SignError {
    #[error("ECDSA signing failed")]
    SigningFailed,
}

// ---------------------------------------------------------------------------
// CurveId
// ---------------------------------------------------------------------------

/// Identifies which elliptic curve a key lives on.
///
/// Keys, signatures, and addresses from different curves are mutually
/// incompatible; carrying the tag explicitly means a mismatch fails loudly
/// at decode time instead of silently at verification time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CurveId {
    NistP256,
    Secp256k1,
}

impl CurveId {
    /// Canonical lowercase name, used in CLI flags and serialized forms.
    pub fn name(&self) -> &'static str {
        match self {
            CurveId::NistP256 => "nist-p256",
            CurveId::Secp256k1 => "secp256k1",
        }
    }

    /// Parses a curve name. Accepts the canonical names plus the short
    /// crate-style aliases people actually type.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "nist-p256" | "p256" | "prime256v1" => Some(CurveId::NistP256),
            "secp256k1" | "k256" => Some(CurveId::Secp256k1),
            _ => None,
        }
    }
}

impl Default for CurveId {
    fn default() -> Self {
        CurveId::NistP256
    }
}

impl fmt::Display for CurveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Keypair
// ---------------------------------------------------------------------------

/// The curve-specific signing key. Both variants share the `ecdsa` crate
/// API, so every method is a two-arm match and nothing more clever.
#[derive(Clone)]
enum SigningBackend {
    NistP256(p256_ecdsa::SigningKey),
    Secp256k1(k256_ecdsa::SigningKey),
}

/// A Lumen identity keypair.
///
/// This is the atomic unit of identity: every address and every transfer
/// authorization traces back to one of these. The secret scalar is the
/// crown jewel: it never leaves this struct except through the explicit
/// [`secret_key_bytes`](Self::secret_key_bytes) escape hatch.
///
/// ## Serialization
///
/// `Keypair` intentionally does NOT implement `Serialize`/`Deserialize`.
/// Serializing private keys should be a deliberate, conscious act, not
/// something that happens because someone shoved a keypair into a JSON
/// response. Use `secret_key_bytes()` / `from_secret_bytes()` explicitly.
///
/// # Examples
///
/// ```
/// use lumen_wallet::crypto::{CurveId, Keypair};
///
/// let kp = Keypair::generate(CurveId::NistP256)?;
/// let sig = kp.try_sign(b"send 100 to bob")?;
/// assert!(kp.public_key().verify(b"send 100 to bob", &sig));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone)]
pub struct Keypair {
    backend: SigningBackend,
}

/// The public half of an identity, safe to share with the world.
///
/// Stored as the uncompressed SEC1 encoding (`0x04 || x || y`, 65 bytes),
/// which keeps both affine coordinates at a fixed 32-byte width. Address
/// derivation hashes `x || y` straight out of this buffer, so a coordinate
/// with leading zero bytes can never shrink the hash input.
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey {
    curve: CurveId,
    sec1: Vec<u8>,
}

/// An ECDSA signature: the `(r, s)` scalar pair, 32 bytes each.
#[derive(Clone, PartialEq, Eq)]
pub struct Signature {
    r: [u8; COORDINATE_LENGTH],
    s: [u8; COORDINATE_LENGTH],
}

impl Keypair {
    /// Generate a fresh keypair on the given curve using the OS RNG.
    ///
    /// Entropy comes from `OsRng` (`/dev/urandom` on Unix,
    /// `BCryptGenRandom` on Windows) through the fallible API. An RNG error
    /// is returned as [`KeyError::EntropyUnavailable`]; candidate bytes
    /// outside the scalar range are redrawn a bounded number of times.
    pub fn generate(curve: CurveId) -> Result<Self, KeyError> {
        let mut candidate = [0u8; SECRET_KEY_LENGTH];
        for _ in 0..MAX_SCALAR_ATTEMPTS {
            OsRng
                .try_fill_bytes(&mut candidate)
                .map_err(|e| KeyError::EntropyUnavailable(e.to_string()))?;
            if let Ok(keypair) = Self::from_secret_bytes(curve, &candidate) {
                return Ok(keypair);
            }
        }
        Err(KeyError::EntropyUnavailable(format!(
            "no valid scalar after {} attempts",
            MAX_SCALAR_ATTEMPTS
        )))
    }

    /// Constructs a keypair deterministically from 32 bytes of secret
    /// scalar material.
    ///
    /// Useful for test fixtures and KDF-derived keys. Rejects scalars
    /// outside `[1, n-1]`: zero and overflowing values are not keys.
    ///
    /// **Warning**: a weak seed makes a weak key. Use a proper CSPRNG or
    /// KDF to produce the bytes.
    pub fn from_secret_bytes(
        curve: CurveId,
        bytes: &[u8; SECRET_KEY_LENGTH],
    ) -> Result<Self, KeyError> {
        let backend = match curve {
            CurveId::NistP256 => SigningBackend::NistP256(
                p256_ecdsa::SigningKey::from_slice(bytes)
                    .map_err(|_| KeyError::InvalidSecretKey)?,
            ),
            CurveId::Secp256k1 => SigningBackend::Secp256k1(
                k256_ecdsa::SigningKey::from_slice(bytes)
                    .map_err(|_| KeyError::InvalidSecretKey)?,
            ),
        };
        Ok(Self { backend })
    }

    /// Reconstruct a keypair from a hex-encoded secret key.
    ///
    /// Convenience for loading fixture keys. Please don't put raw hex keys
    /// in config files in production.
    pub fn from_hex(curve: CurveId, hex_str: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex_str).map_err(|_| KeyError::InvalidSecretKey)?;
        let arr: [u8; SECRET_KEY_LENGTH] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| KeyError::InvalidSecretKey)?;
        Self::from_secret_bytes(curve, &arr)
    }

    /// The curve this keypair lives on.
    pub fn curve(&self) -> CurveId {
        match self.backend {
            SigningBackend::NistP256(_) => CurveId::NistP256,
            SigningBackend::Secp256k1(_) => CurveId::Secp256k1,
        }
    }

    /// Returns the public key, encoded as an uncompressed SEC1 point.
    pub fn public_key(&self) -> PublicKey {
        let sec1 = match &self.backend {
            SigningBackend::NistP256(sk) => {
                sk.verifying_key().to_encoded_point(false).as_bytes().to_vec()
            }
            SigningBackend::Secp256k1(sk) => {
                sk.verifying_key().to_encoded_point(false).as_bytes().to_vec()
            }
        };
        PublicKey {
            curve: self.curve(),
            sec1,
        }
    }

    /// Sign a message with RFC 6979 deterministic ECDSA.
    ///
    /// The message is hashed with SHA-256 internally; callers pass the raw
    /// canonical bytes, not a digest. Deterministic: the same (key, message)
    /// pair always produces the same `(r, s)`.
    ///
    /// A failure here is recoverable: the keypair is untouched and the
    /// caller decides whether to retry or report.
    pub fn try_sign(&self, message: &[u8]) -> Result<Signature, SignError> {
        let mut bytes = [0u8; SIGNATURE_LENGTH];
        match &self.backend {
            SigningBackend::NistP256(sk) => {
                let sig: p256_ecdsa::Signature =
                    sk.try_sign(message).map_err(|_| SignError::SigningFailed)?;
                bytes.copy_from_slice(sig.to_bytes().as_slice());
            }
            SigningBackend::Secp256k1(sk) => {
                let sig: k256_ecdsa::Signature =
                    sk.try_sign(message).map_err(|_| SignError::SigningFailed)?;
                bytes.copy_from_slice(sig.to_bytes().as_slice());
            }
        }
        Ok(Signature::from_bytes(bytes))
    }

    /// Exports the raw 32-byte secret scalar.
    ///
    /// **Handle with extreme care.** This is the only secret standing
    /// between an attacker and the associated identity. Don't log it, don't
    /// send it anywhere in plaintext.
    pub fn secret_key_bytes(&self) -> [u8; SECRET_KEY_LENGTH] {
        match &self.backend {
            SigningBackend::NistP256(sk) => sk.to_bytes().into(),
            SigningBackend::Secp256k1(sk) => sk.to_bytes().into(),
        }
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print secret material in debug output. Not even "partially."
        // A partial leak is still a leak, and grepping logs for hex is trivial.
        write!(
            f,
            "Keypair(curve={}, pub={})",
            self.curve(),
            self.public_key().to_hex()
        )
    }
}

impl PartialEq for Keypair {
    /// Two keypairs are equal if their public keys match. Comparing secret
    /// material in non-constant time is a bad habit, and for identity
    /// purposes the public key is what matters.
    fn eq(&self, other: &Self) -> bool {
        self.public_key() == other.public_key()
    }
}

impl Eq for Keypair {}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

impl PublicKey {
    /// Decode a public key from SEC1 bytes (compressed or uncompressed).
    ///
    /// The point is validated against the curve equation and re-encoded in
    /// uncompressed form, so the internal buffer is always 65 bytes no
    /// matter what arrived on the wire.
    pub fn from_sec1_bytes(curve: CurveId, bytes: &[u8]) -> Result<Self, KeyError> {
        let sec1 = match curve {
            CurveId::NistP256 => p256_ecdsa::VerifyingKey::from_sec1_bytes(bytes)
                .map_err(|_| KeyError::InvalidPublicKey)?
                .to_encoded_point(false)
                .as_bytes()
                .to_vec(),
            CurveId::Secp256k1 => k256_ecdsa::VerifyingKey::from_sec1_bytes(bytes)
                .map_err(|_| KeyError::InvalidPublicKey)?
                .to_encoded_point(false)
                .as_bytes()
                .to_vec(),
        };
        Ok(Self { curve, sec1 })
    }

    /// Parse a hex-encoded SEC1 public key.
    pub fn from_hex(curve: CurveId, hex_str: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex_str).map_err(|_| KeyError::InvalidPublicKey)?;
        Self::from_sec1_bytes(curve, &bytes)
    }

    /// The curve this key lives on.
    pub fn curve(&self) -> CurveId {
        self.curve
    }

    /// The uncompressed SEC1 encoding: `0x04 || x || y`, 65 bytes.
    pub fn as_sec1_bytes(&self) -> &[u8] {
        &self.sec1
    }

    /// The affine coordinates as fixed-width 32-byte big-endian values.
    ///
    /// Sliced straight out of the SEC1 buffer, so zero-padding is
    /// structural: a point whose x or y has leading zero bytes yields the
    /// same 64-byte concatenation on every platform and every codepath.
    pub fn coordinates(&self) -> ([u8; COORDINATE_LENGTH], [u8; COORDINATE_LENGTH]) {
        let mut x = [0u8; COORDINATE_LENGTH];
        let mut y = [0u8; COORDINATE_LENGTH];
        x.copy_from_slice(&self.sec1[1..1 + COORDINATE_LENGTH]);
        y.copy_from_slice(&self.sec1[1 + COORDINATE_LENGTH..UNCOMPRESSED_POINT_LENGTH]);
        (x, y)
    }

    /// Verify an `(r, s)` signature over a message.
    ///
    /// Returns a plain boolean: the vast majority of callers want a yes/no
    /// answer and don't care about the specific failure mode. Malformed
    /// signatures verify as `false`, never as a panic.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        let sig_bytes = signature.to_bytes();
        match self.curve {
            CurveId::NistP256 => {
                let Ok(vk) = p256_ecdsa::VerifyingKey::from_sec1_bytes(&self.sec1) else {
                    return false;
                };
                let Ok(sig) = p256_ecdsa::Signature::from_slice(&sig_bytes) else {
                    return false;
                };
                vk.verify(message, &sig).is_ok()
            }
            CurveId::Secp256k1 => {
                let Ok(vk) = k256_ecdsa::VerifyingKey::from_sec1_bytes(&self.sec1) else {
                    return false;
                };
                let Ok(sig) = k256_ecdsa::Signature::from_slice(&sig_bytes) else {
                    return false;
                };
                vk.verify(message, &sig).is_ok()
            }
        }
    }

    /// Hex-encoded SEC1 representation. 130 characters for 65 bytes.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.sec1)
    }
}

impl Hash for PublicKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.curve.hash(state);
        self.sec1.hash(state);
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({}, {}..)", self.curve, &self.to_hex()[..16])
    }
}

/// Human-readable formats carry the curve tag inline (`nist-p256:04ab...`);
/// binary formats get a `(curve, bytes)` pair. The tag travels with the key
/// so a decoder can never verify against the wrong curve.
impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&format!("{}:{}", self.curve.name(), self.to_hex()))
        } else {
            let mut tuple = serializer.serialize_tuple(2)?;
            tuple.serialize_element(&self.curve)?;
            tuple.serialize_element(&self.sec1)?;
            tuple.end()
        }
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let tagged = String::deserialize(deserializer)?;
            let (name, hex_str) = tagged
                .split_once(':')
                .ok_or_else(|| D::Error::custom("expected `<curve>:<hex>`"))?;
            let curve = CurveId::from_name(name)
                .ok_or_else(|| D::Error::custom(format!("unknown curve `{}`", name)))?;
            PublicKey::from_hex(curve, hex_str).map_err(D::Error::custom)
        } else {
            let (curve, bytes) = <(CurveId, Vec<u8>)>::deserialize(deserializer)?;
            PublicKey::from_sec1_bytes(curve, &bytes).map_err(D::Error::custom)
        }
    }
}

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

impl Signature {
    /// Build a signature from the 64-byte `r || s` concatenation.
    pub fn from_bytes(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        let mut r = [0u8; COORDINATE_LENGTH];
        let mut s = [0u8; COORDINATE_LENGTH];
        r.copy_from_slice(&bytes[..COORDINATE_LENGTH]);
        s.copy_from_slice(&bytes[COORDINATE_LENGTH..]);
        Self { r, s }
    }

    /// The `r` scalar, big-endian.
    pub fn r(&self) -> &[u8; COORDINATE_LENGTH] {
        &self.r
    }

    /// The `s` scalar, big-endian.
    pub fn s(&self) -> &[u8; COORDINATE_LENGTH] {
        &self.s
    }

    /// The 64-byte `r || s` concatenation.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut out = [0u8; SIGNATURE_LENGTH];
        out[..COORDINATE_LENGTH].copy_from_slice(&self.r);
        out[COORDINATE_LENGTH..].copy_from_slice(&self.s);
        out
    }

    /// Hex-encoded signature. 128 characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Parse a hex-encoded signature. Rejects anything that isn't exactly
    /// 64 bytes of hex.
    pub fn from_hex(hex_str: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(hex_str)?;
        let arr: [u8; SIGNATURE_LENGTH] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| hex::FromHexError::InvalidStringLength)?;
        Ok(Self::from_bytes(arr))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex_str = self.to_hex();
        write!(f, "Signature({}...{})", &hex_str[..8], &hex_str[120..])
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            serializer.serialize_bytes(&self.to_bytes())
        }
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let hex_str = String::deserialize(deserializer)?;
            Signature::from_hex(&hex_str).map_err(D::Error::custom)
        } else {
            let bytes = Vec::<u8>::deserialize(deserializer)?;
            let arr: [u8; SIGNATURE_LENGTH] = bytes
                .as_slice()
                .try_into()
                .map_err(|_| D::Error::custom("signature must be exactly 64 bytes"))?;
            Ok(Signature::from_bytes(arr))
        }
    }
}
