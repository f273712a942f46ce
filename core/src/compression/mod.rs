//! compression/mod.rs
//! Uniform compress/uncompress over byte chains.
//!
//! Notes:
//! - `Codec` owns the shared contract (empty input, length checks); codecs only see valid calls.
//! - Levels are resolved per codec at construction, never at use.
//! - Registry resolves codec types (or raw tags) to constructed codecs.

pub mod constants;
pub mod types;
pub mod codec;
pub mod registry;
pub mod codecs;

pub use constants::*;
pub use types::*;
pub use codec::*;
pub use registry::*;
pub use codecs::{Lz4Codec, Lz4Mode, NoCompressionCodec, SnappyCodec, ZlibCodec, ZlibOptions};
