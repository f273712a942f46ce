//! codecs/none.rs
//! Pass-through codec.

use crate::chain::ByteChain;
use crate::compression::constants::NO_COMPRESSION_LEVEL;
use crate::compression::types::{CodecBackend, CodecError, CodecResult, CodecType, CompressionLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoCompressionCodec;

impl NoCompressionCodec {
    /// Every symbolic level maps to 0; numeric levels other than 0 are rejected.
    pub fn new(level: CompressionLevel) -> CodecResult<Self> {
        let level = level.resolve(NO_COMPRESSION_LEVEL, NO_COMPRESSION_LEVEL, NO_COMPRESSION_LEVEL);
        if level != NO_COMPRESSION_LEVEL {
            return Err(CodecError::invalid_level(CodecType::NoCompression, level));
        }
        Ok(Self)
    }
}

impl CodecBackend for NoCompressionCodec {
    fn codec_type(&self) -> CodecType {
        CodecType::NoCompression
    }

    fn compress_chain(&self, data: &ByteChain) -> CodecResult<ByteChain> {
        Ok(data.clone())
    }

    fn uncompress_chain(&self, data: &ByteChain, uncompressed_length: Option<u64>) -> CodecResult<ByteChain> {
        if let Some(expected) = uncompressed_length {
            let actual = data.len() as u64;
            if actual != expected {
                return Err(CodecError::InvalidLength {
                    codec: CodecType::NoCompression,
                    expected,
                    actual,
                });
            }
        }
        Ok(data.clone())
    }
}
