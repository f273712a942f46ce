//! codecs/snappy.rs
//! Raw Snappy codec fed through a `ChainSource`.
//!
//! Design notes:
//! - The raw format is `varint32(uncompressed_len)` followed by literal/copy elements.
//! - Compression pulls the source in 64 KiB fragments and encodes each one on its
//!   own; the element streams are concatenated behind a single length header, the
//!   way snappy itself compresses a `Source`. Fragments are borrowed straight from
//!   the chain whenever one span covers them.
//! - Decompression reads only the header first, then decodes in a second pass.
use log::trace;
use snap::raw::{decompress_len, max_compress_len, Decoder, Encoder};

use crate::chain::{ByteChain, ChainSource};
use crate::compression::constants::{
    SNAPPY_BLOCK_SIZE, SNAPPY_LEVEL, SNAPPY_MAX_HEADER_LEN, SNAPPY_MAX_UNCOMPRESSED_LENGTH,
};
use crate::compression::types::{CodecBackend, CodecError, CodecResult, CodecType, CompressionLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnappyCodec;

impl SnappyCodec {
    /// Every symbolic level maps to 1; numeric levels other than 1 are rejected.
    pub fn new(level: CompressionLevel) -> CodecResult<Self> {
        let level = level.resolve(SNAPPY_LEVEL, SNAPPY_LEVEL, SNAPPY_LEVEL);
        if level != SNAPPY_LEVEL {
            return Err(CodecError::invalid_level(CodecType::Snappy, level));
        }
        Ok(Self)
    }
}

impl CodecBackend for SnappyCodec {
    fn codec_type(&self) -> CodecType {
        CodecType::Snappy
    }

    fn max_uncompressed_length(&self) -> u64 {
        SNAPPY_MAX_UNCOMPRESSED_LENGTH
    }

    fn compress_chain(&self, data: &ByteChain) -> CodecResult<ByteChain> {
        let mut source = ChainSource::new(data);
        let total = source.available();
        if total as u64 > SNAPPY_MAX_UNCOMPRESSED_LENGTH {
            return Err(CodecError::LengthTooLarge {
                codec: CodecType::Snappy,
                have: total as u64,
                max: SNAPPY_MAX_UNCOMPRESSED_LENGTH,
            });
        }

        let capacity = max_compress_len(total);
        let mut out = Vec::with_capacity(capacity);
        write_varint32(&mut out, total as u32);

        let mut encoder = Encoder::new();
        let mut block = vec![0u8; max_compress_len(SNAPPY_BLOCK_SIZE)];
        let mut scratch = Vec::new();
        let mut fragments = 0usize;

        while source.available() > 0 {
            let want = source.available().min(SNAPPY_BLOCK_SIZE);
            let span = source.peek();
            if span.len() >= want {
                append_fragment(&mut encoder, &span[..want], &mut block, &mut out)?;
                source.skip(want);
            } else {
                gather(&mut source, want, &mut scratch);
                append_fragment(&mut encoder, &scratch, &mut block, &mut out)?;
            }
            fragments += 1;
        }

        assert!(
            out.len() <= capacity,
            "snappy: wrote {} bytes past the {}-byte compression bound",
            out.len(),
            capacity
        );
        trace!("snappy: {} bytes in {} fragments -> {} bytes", total, fragments, out.len());
        Ok(ByteChain::from(out))
    }

    fn uncompress_chain(&self, data: &ByteChain, uncompressed_length: Option<u64>) -> CodecResult<ByteChain> {
        let actual = {
            let mut source = ChainSource::new(data);
            let mut header = [0u8; SNAPPY_MAX_HEADER_LEN];
            let n = source.copy_to_slice(&mut header);
            decompress_len(&header[..n]).map_err(|e| {
                CodecError::runtime(CodecType::Snappy, format!("reading uncompressed length failed: {}", e))
            })?
        };

        if let Some(expected) = uncompressed_length {
            if expected != actual as u64 {
                return Err(CodecError::runtime(
                    CodecType::Snappy,
                    format!("invalid uncompressed length: expected {}, embedded {}", expected, actual),
                ));
            }
        }

        let mut out = vec![0u8; actual];
        let source = ChainSource::new(data);
        let input = source.contiguous();
        let produced = Decoder::new()
            .decompress(&input, &mut out)
            .map_err(|e| CodecError::runtime(CodecType::Snappy, format!("raw uncompress failed: {}", e)))?;

        if produced != actual {
            return Err(CodecError::runtime(
                CodecType::Snappy,
                format!("raw uncompress produced {} bytes, header declared {}", produced, actual),
            ));
        }
        Ok(ByteChain::from(out))
    }
}

// Encode one fragment (<= SNAPPY_BLOCK_SIZE) and append its element stream,
// without the fragment's own length header.
fn append_fragment(
    encoder: &mut Encoder,
    fragment: &[u8],
    block: &mut [u8],
    out: &mut Vec<u8>,
) -> CodecResult<()> {
    let written = encoder
        .compress(fragment, block)
        .map_err(|e| CodecError::runtime(CodecType::Snappy, e.to_string()))?;
    let header = varint32_len(fragment.len() as u32);
    out.extend_from_slice(&block[header..written]);
    Ok(())
}

// Copy the next `want` bytes of `source` into `scratch`, spanning segments.
fn gather(source: &mut ChainSource<'_>, want: usize, scratch: &mut Vec<u8>) {
    scratch.clear();
    while scratch.len() < want {
        let span = source.peek();
        let take = span.len().min(want - scratch.len());
        scratch.extend_from_slice(&span[..take]);
        source.skip(take);
    }
}

fn write_varint32(out: &mut Vec<u8>, mut value: u32) {
    while value >= 0x80 {
        out.push((value as u8) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
}

fn varint32_len(value: u32) -> usize {
    match value {
        0..=0x7f => 1,
        0x80..=0x3fff => 2,
        0x4000..=0x1f_ffff => 3,
        0x20_0000..=0x0fff_ffff => 4,
        _ => 5,
    }
}
