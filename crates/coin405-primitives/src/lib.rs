//! # coin405-primitives
//!
//! Chain primitives shared across the 405Coin workspace:
//! - 32-byte hashes and the double-SHA-256 primitive
//! - monetary amounts
//! - a minimal Bitcoin-style script builder
//! - consensus (wire) serialization helpers
//! - transactions, block headers, blocks and merkle roots

pub mod amount;
pub mod block;
pub mod hash;
pub mod script;
pub mod serialize;

pub use amount::{Amount, COIN};
pub use block::{Block, BlockHeader, OutPoint, Transaction, TxIn, TxOut};
pub use hash::{sha256, sha256d, Hash256};
pub use script::Script;
