//! compression/registry.rs
//! Codec registry and factory functions.
//!
//! The codec set is closed, so the registry is a `match` over `CodecType`
//! rather than a mutable factory table.
use log::debug;

use crate::compression::codec::Codec;
use crate::compression::codecs::{Lz4Codec, NoCompressionCodec, SnappyCodec, ZlibCodec};
use crate::compression::types::{CodecResult, CodecType, CompressionLevel};

/// Constructor signature shared by every registered codec.
pub type CodecFactory = fn(CompressionLevel) -> CodecResult<Codec>;

/// Constructor registered for `codec_type`.
pub fn factory(codec_type: CodecType) -> CodecFactory {
    match codec_type {
        CodecType::NoCompression => |level: CompressionLevel| NoCompressionCodec::new(level).map(Codec::from),
        CodecType::Lz4           => |level: CompressionLevel| Lz4Codec::new(level).map(Codec::from),
        CodecType::Snappy        => |level: CompressionLevel| SnappyCodec::new(level).map(Codec::from),
        CodecType::Zlib          => |level: CompressionLevel| ZlibCodec::new(level).map(Codec::from),
    }
}

/// Build a codec of `codec_type` at `level`.
///
/// # Errors
/// `CodecError::InvalidArgument` if the codec rejects `level`.
///
/// # Panics
/// If the constructed codec reports a type other than `codec_type`
/// (a registration mistake, not a runtime condition).
pub fn get_codec(codec_type: CodecType, level: CompressionLevel) -> CodecResult<Codec> {
    let codec = factory(codec_type)(level)?;
    assert_eq!(
        codec.codec_type(),
        codec_type,
        "codec registered under the wrong type"
    );
    debug!("registry: built {} codec at level {}", codec_type, level);
    Ok(codec)
}

/// Build a codec from a raw registry tag (see `constants::codec_ids`).
///
/// # Errors
/// `CodecError::InvalidArgument` for an unknown tag or an unsupported level.
pub fn get_codec_by_id(codec_id: u16, level: CompressionLevel) -> CodecResult<Codec> {
    get_codec(CodecType::from_id(codec_id)?, level)
}
