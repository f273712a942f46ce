//! compression/codec.rs
//! `Codec`: the single public compress/uncompress surface over every algorithm.
//!
//! Shared contract enforced here, before any algorithm runs:
//! - empty input compresses to an empty chain;
//! - a missing length is rejected when the algorithm needs one;
//! - a known length above the codec ceiling is rejected;
//! - empty compressed input only decompresses with an unknown or zero length.
use log::trace;

use crate::chain::ByteChain;
use crate::compression::codecs::{Lz4Codec, NoCompressionCodec, SnappyCodec, ZlibCodec};
use crate::compression::types::{CodecBackend, CodecError, CodecResult, CodecType};

/// A constructed codec. Immutable and stateless between calls, so one instance
/// can serve concurrent callers.
#[derive(Debug, Clone)]
pub enum Codec {
    NoCompression(NoCompressionCodec),
    Lz4(Lz4Codec),
    Snappy(SnappyCodec),
    Zlib(ZlibCodec),
}

impl Codec {
    fn backend(&self) -> &dyn CodecBackend {
        match self {
            Codec::NoCompression(c) => c,
            Codec::Lz4(c)           => c,
            Codec::Snappy(c)        => c,
            Codec::Zlib(c)          => c,
        }
    }

    pub fn codec_type(&self) -> CodecType {
        self.backend().codec_type()
    }

    /// True if `uncompress` requires a known uncompressed length.
    pub fn needs_uncompressed_length(&self) -> bool {
        self.backend().needs_uncompressed_length()
    }

    /// Largest uncompressed length this codec accepts.
    pub fn max_uncompressed_length(&self) -> u64 {
        self.backend().max_uncompressed_length()
    }

    /// Compress `data` into a new chain. The input is left untouched.
    pub fn compress(&self, data: &ByteChain) -> CodecResult<ByteChain> {
        if data.is_empty() {
            return Ok(ByteChain::new());
        }
        let out = self.backend().compress_chain(data)?;
        trace!(
            "{}: compressed {} bytes ({} segments) into {} bytes ({} segments)",
            self.codec_type(),
            data.len(),
            data.segment_count(),
            out.len(),
            out.segment_count()
        );
        Ok(out)
    }

    /// Decompress `data` into a new chain.
    ///
    /// `uncompressed_length` is `None` when the caller does not know it.
    ///
    /// # Errors
    /// - `InvalidArgument` if the length is unknown but required;
    /// - `LengthTooLarge` if the length exceeds `max_uncompressed_length()`;
    /// - `InvalidLength` for empty input with a non-zero length, or a length mismatch;
    /// - `Runtime` if the algorithm rejects the data.
    pub fn uncompress(&self, data: &ByteChain, uncompressed_length: Option<u64>) -> CodecResult<ByteChain> {
        let backend = self.backend();
        let codec = backend.codec_type();

        match uncompressed_length {
            None if backend.needs_uncompressed_length() => {
                return Err(CodecError::InvalidArgument(format!(
                    "{}: uncompressed length required",
                    codec
                )));
            }
            Some(have) if have > backend.max_uncompressed_length() => {
                return Err(CodecError::LengthTooLarge {
                    codec,
                    have,
                    max: backend.max_uncompressed_length(),
                });
            }
            _ => {}
        }

        if data.is_empty() {
            return match uncompressed_length {
                None | Some(0) => Ok(ByteChain::new()),
                Some(expected) => Err(CodecError::InvalidLength { codec, expected, actual: 0 }),
            };
        }

        let out = backend.uncompress_chain(data, uncompressed_length)?;
        trace!(
            "{}: uncompressed {} bytes into {} bytes ({} segments)",
            codec,
            data.len(),
            out.len(),
            out.segment_count()
        );
        Ok(out)
    }
}

impl From<NoCompressionCodec> for Codec {
    fn from(codec: NoCompressionCodec) -> Self {
        Codec::NoCompression(codec)
    }
}

impl From<Lz4Codec> for Codec {
    fn from(codec: Lz4Codec) -> Self {
        Codec::Lz4(codec)
    }
}

impl From<SnappyCodec> for Codec {
    fn from(codec: SnappyCodec) -> Self {
        Codec::Snappy(codec)
    }
}

impl From<ZlibCodec> for Codec {
    fn from(codec: ZlibCodec) -> Self {
        Codec::Zlib(codec)
    }
}
