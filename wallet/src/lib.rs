// Copyright (c) 2026 Lumen Contributors. MIT License.
// See LICENSE for details.

//! # Lumen Wallet
//!
//! Cryptographic identity and transaction authorization for the Lumen
//! client. This crate owns three things and refuses to own more: keypairs,
//! the addresses derived from them, and the signatures that authorize
//! transfers. Blocks, mempools, and consensus live on the other side of the
//! [`ledger::Ledger`] trait and are somebody else's problem.
//!
//! The identity scheme is the classic Bitcoin construction: an ECDSA
//! keypair, a Base58Check address computed as
//! `Base58(version || RIPEMD-160(SHA-256(x || y)) || checksum)`, and an
//! (r, s) signature over a canonical binary encoding of the transfer tuple
//! `{sender, recipient, value}`. The curve is a parameter; NIST P-256 by
//! default, secp256k1 for the Bitcoin-curious.
//!
//! ## Architecture
//!
//! - **crypto**: Hashing and ECDSA key material. Don't roll your own.
//! - **identity**: Wallets and Base58Check addresses.
//! - **transaction**: Transfer construction, signing, and verification.
//! - **ledger**: The trait boundary to the ledger collaborator.
//! - **config**: Protocol constants and network parameters.
//!
//! ## Design Philosophy
//!
//! 1. Invalid transactions cannot be constructed. Validation happens at the
//!    door, not at the checkout.
//! 2. Every fallible operation returns a `Result`. Nothing in this crate
//!    aborts the process, least of all a signing failure.
//! 3. Private keys never leave the [`identity::Wallet`] and never appear in
//!    logs, `Debug` output, or serialized forms.
//! 4. If it touches money, it has tests. Plural.

pub mod config;
pub mod crypto;
pub mod identity;
pub mod ledger;
pub mod transaction;
