//! codecs/lz4.rs
//! LZ4 block codec (single-shot, two modes).
//!
//! Design notes:
//! - Fast mode uses `lz4_flex`'s block compressor; high-compression mode uses
//!   the LZ4 HC entry point from the `lz4` bindings. Both emit the plain LZ4
//!   block format, so one safe decoder (`lz4_flex`) handles either.
//! - The block format carries no length, so decompression needs the caller's.
//! - Fragmented input is coalesced into a private copy; the block API only takes one slice.
use ::lz4::block::{compress_to_buffer, CompressionMode};
use lz4_flex::block::{compress_into, decompress_into, get_maximum_output_size};
use log::debug;

use crate::chain::ByteChain;
use crate::compression::constants::{LZ4_HC_CLEVEL, LZ4_LEVEL_FAST, LZ4_LEVEL_HIGH, LZ4_MAX_UNCOMPRESSED_LENGTH};
use crate::compression::types::{CodecBackend, CodecError, CodecResult, CodecType, CompressionLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lz4Mode {
    Fast,
    HighCompression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lz4Codec {
    mode: Lz4Mode,
}

impl Lz4Codec {
    /// `Fastest`/`Default` select fast mode (1), `Best` selects high compression (2).
    ///
    /// # Errors
    /// `CodecError::InvalidArgument` for numeric levels other than 1 and 2.
    pub fn new(level: CompressionLevel) -> CodecResult<Self> {
        let mode = match level.resolve(LZ4_LEVEL_FAST, LZ4_LEVEL_FAST, LZ4_LEVEL_HIGH) {
            LZ4_LEVEL_FAST => Lz4Mode::Fast,
            LZ4_LEVEL_HIGH => Lz4Mode::HighCompression,
            other => return Err(CodecError::invalid_level(CodecType::Lz4, other)),
        };
        debug!("lz4: level {} -> {:?}", level, mode);
        Ok(Self { mode })
    }

    pub fn mode(&self) -> Lz4Mode {
        self.mode
    }
}

impl CodecBackend for Lz4Codec {
    fn codec_type(&self) -> CodecType {
        CodecType::Lz4
    }

    fn needs_uncompressed_length(&self) -> bool {
        true
    }

    fn max_uncompressed_length(&self) -> u64 {
        LZ4_MAX_UNCOMPRESSED_LENGTH
    }

    fn compress_chain(&self, data: &ByteChain) -> CodecResult<ByteChain> {
        let input = data.coalesced();
        let mut out = vec![0u8; get_maximum_output_size(input.len())];

        let written = match self.mode {
            Lz4Mode::Fast => compress_into(&input, &mut out)
                .map_err(|e| CodecError::runtime(CodecType::Lz4, e.to_string()))?,
            Lz4Mode::HighCompression => compress_to_buffer(
                &input,
                Some(CompressionMode::HIGHCOMPRESSION(LZ4_HC_CLEVEL)),
                false,
                &mut out,
            )
            .map_err(|e| CodecError::runtime(CodecType::Lz4, e.to_string()))?,
        };

        assert!(
            written <= out.len(),
            "lz4: compressor reported {} bytes written into a {}-byte buffer",
            written,
            out.len()
        );
        out.truncate(written);
        Ok(ByteChain::from(out))
    }

    fn uncompress_chain(&self, data: &ByteChain, uncompressed_length: Option<u64>) -> CodecResult<ByteChain> {
        let expected = uncompressed_length.ok_or_else(|| {
            CodecError::InvalidArgument("lz4: uncompressed length required".into())
        })?;
        let expected = usize::try_from(expected).map_err(|_| CodecError::LengthTooLarge {
            codec: CodecType::Lz4,
            have: expected,
            max: usize::MAX as u64,
        })?;

        let input = data.coalesced();
        let mut out = vec![0u8; expected];
        let produced = decompress_into(&input, &mut out)
            .map_err(|e| CodecError::runtime(CodecType::Lz4, format!("decompression failed: {}", e)))?;

        // A block that decodes short of the declared length is truncated or corrupt.
        if produced != expected {
            return Err(CodecError::runtime(
                CodecType::Lz4,
                format!("decompression returned invalid value {} (expected {})", produced, expected),
            ));
        }
        Ok(ByteChain::from(out))
    }
}
