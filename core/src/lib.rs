//! codec-core
//!
//! One compress/uncompress interface over several independent compression
//! algorithms, operating on chains of byte segments.

#![forbid(unsafe_code)]

pub mod chain;
pub mod compression;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::chain::{ByteChain, ChainSource, ChainWriter};
    pub use crate::compression::{
        get_codec, get_codec_by_id, Codec, CodecError, CodecResult, CodecType, CompressionLevel,
    };
}
