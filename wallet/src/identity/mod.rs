//! Identity: Base58Check addresses and the wallets that own them.

pub mod address;
pub mod wallet;

pub use address::{Address, AddressError};
pub use wallet::{Wallet, WalletCreated, WalletError};
