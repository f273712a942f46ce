//! chain/mod.rs
//! Byte-segment chains: the data currency of every codec.
//!
//! Notes:
//! - `ByteChain` is an ordered list of shared `Bytes` segments; cloning never copies payload.
//! - `ChainSource` reads a chain front to back through peek/skip (and `std::io::Read`).
//! - `ChainWriter` grows an output chain one independently sized segment at a time.

pub mod types;
pub mod source;
pub mod writer;

pub use types::*;
pub use source::*;
pub use writer::*;
