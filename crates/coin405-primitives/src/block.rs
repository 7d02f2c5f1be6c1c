//! Transactions, headers and blocks: the subset chain identity needs.

use crate::amount::Amount;
use crate::hash::{sha256d, Hash256};
use crate::script::Script;
use crate::serialize::{put_compact_size, put_i32, put_i64, put_u32};

/// Sequence value marking an input as final.
pub const SEQUENCE_FINAL: u32 = 0xffff_ffff;

/// Reference to a transaction output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutPoint {
    pub txid: Hash256,
    pub index: u32,
}

impl OutPoint {
    /// The null outpoint used by coinbase inputs.
    pub fn null() -> OutPoint {
        OutPoint {
            txid: Hash256::ZERO,
            index: u32::MAX,
        }
    }

    pub fn is_null(&self) -> bool {
        self.txid.is_zero() && self.index == u32::MAX
    }
}

/// Transaction input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxIn {
    pub prevout: OutPoint,
    pub script_sig: Script,
    pub sequence: u32,
}

impl TxIn {
    /// A coinbase input carrying an arbitrary marker payload.
    pub fn coinbase(script_sig: Script) -> TxIn {
        TxIn {
            prevout: OutPoint::null(),
            script_sig,
            sequence: SEQUENCE_FINAL,
        }
    }
}

/// Transaction output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOut {
    pub value: Amount,
    pub script_pubkey: Script,
}

/// A transaction in the legacy (pre-special-transaction) layout, which is
/// all genesis construction ever produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub version: i32,
    pub inputs: Vec<TxIn>,
    pub outputs: Vec<TxOut>,
    pub lock_time: u32,
}

impl Transaction {
    pub fn consensus_encode(&self, buf: &mut Vec<u8>) {
        put_i32(buf, self.version);
        put_compact_size(buf, self.inputs.len() as u64);
        for input in &self.inputs {
            buf.extend_from_slice(input.prevout.txid.as_bytes());
            put_u32(buf, input.prevout.index);
            put_compact_size(buf, input.script_sig.len() as u64);
            buf.extend_from_slice(input.script_sig.as_bytes());
            put_u32(buf, input.sequence);
        }
        put_compact_size(buf, self.outputs.len() as u64);
        for output in &self.outputs {
            put_i64(buf, output.value);
            put_compact_size(buf, output.script_pubkey.len() as u64);
            buf.extend_from_slice(output.script_pubkey.as_bytes());
        }
        put_u32(buf, self.lock_time);
    }

    pub fn txid(&self) -> Hash256 {
        let mut buf = Vec::with_capacity(256);
        self.consensus_encode(&mut buf);
        sha256d(&buf)
    }
}

/// The 80-byte block header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockHeader {
    pub version: i32,
    pub prev_block: Hash256,
    pub merkle_root: Hash256,
    pub time: u32,
    pub bits: u32,
    pub nonce: u32,
}

impl BlockHeader {
    pub fn consensus_encode(&self, buf: &mut Vec<u8>) {
        put_i32(buf, self.version);
        buf.extend_from_slice(self.prev_block.as_bytes());
        buf.extend_from_slice(self.merkle_root.as_bytes());
        put_u32(buf, self.time);
        put_u32(buf, self.bits);
        put_u32(buf, self.nonce);
    }

    /// Block hash: double SHA-256 over the serialized header. Also serves as
    /// the proof-of-work hash in this implementation.
    pub fn hash(&self) -> Hash256 {
        let mut buf = Vec::with_capacity(80);
        self.consensus_encode(&mut buf);
        sha256d(&buf)
    }
}

/// A full block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub header: BlockHeader,
    pub transactions: Vec<Transaction>,
}

impl Block {
    pub fn hash(&self) -> Hash256 {
        self.header.hash()
    }

    /// Merkle root over the transaction set: pairwise double SHA-256 with the
    /// last node duplicated on odd levels. A one-transaction set yields that
    /// transaction's own hash.
    pub fn merkle_root(&self) -> Hash256 {
        let mut level: Vec<Hash256> = self.transactions.iter().map(Transaction::txid).collect();
        if level.is_empty() {
            return Hash256::ZERO;
        }
        while level.len() > 1 {
            if level.len() % 2 == 1 {
                let tail = level[level.len() - 1];
                level.push(tail);
            }
            level = level
                .chunks(2)
                .map(|pair| {
                    let mut buf = [0u8; 64];
                    buf[..32].copy_from_slice(pair[0].as_bytes());
                    buf[32..].copy_from_slice(pair[1].as_bytes());
                    sha256d(&buf)
                })
                .collect();
        }
        level[0]
    }
}
