//! # coin405-node
//!
//! Composition-root library for the 405Coin node binary: the process-wide
//! chain context other node subsystems (block processing, quorum/DKG logic,
//! wallet services) consume.

pub mod context;

pub use context::{active, install, ChainContext};
