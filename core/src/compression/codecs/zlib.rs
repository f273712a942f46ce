//! codecs/zlib.rs
//! zlib (deflate) codec: drives `flate2`'s low-level streams over a growing output chain.
//!
//! Design notes:
//! - The algorithm state lives in a `StreamGuard` for exactly one call and is
//!   released on every exit path, including early `?` returns.
//! - Output grows by appending fresh segments (`ChainWriter::grow`) only when the
//!   active one is full; bytes already written are never copied.
//! - The first segment is sized from the compression bound (compress) or the
//!   declared length (uncompress) when that is at most `max_single_step_length`;
//!   otherwise, and for every later segment, `default_buffer_length` is used.
//! - Status codes the zlib contract rules out are invariant violations and panic.
use std::ops::{Deref, DerefMut};

use flate2::{Compress, Compression, Decompress, FlushCompress, FlushDecompress, Status};
use log::{debug, trace};

use crate::chain::{ByteChain, ChainWriter};
use crate::compression::constants::{
    DEFAULT_BUFFER_LENGTH, MAX_SINGLE_STEP_LENGTH, ZLIB_LEVEL_BEST, ZLIB_LEVEL_DEFAULT,
    ZLIB_LEVEL_FASTEST, ZLIB_MAX_LEVEL, ZLIB_MIN_LEVEL,
};
use crate::compression::types::{CodecBackend, CodecError, CodecResult, CodecType, CompressionLevel};

/// Output sizing policy for the zlib driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZlibOptions {
    /// Largest first output segment sized from a known length.
    pub max_single_step_length: usize,
    /// First segment size otherwise, and the size of every appended segment.
    pub default_buffer_length: usize,
}

impl Default for ZlibOptions {
    fn default() -> Self {
        Self {
            max_single_step_length: MAX_SINGLE_STEP_LENGTH,
            default_buffer_length: DEFAULT_BUFFER_LENGTH,
        }
    }
}

impl ZlibOptions {
    fn first_segment_length(&self, known: Option<u64>) -> usize {
        match known {
            Some(n) if n <= self.max_single_step_length as u64 => n as usize,
            _ => self.default_buffer_length,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZlibCodec {
    level: i32,
    compression: Compression,
    options: ZlibOptions,
}

impl ZlibCodec {
    /// `Fastest` → 1, `Default` → zlib default (-1), `Best` → 9.
    ///
    /// # Errors
    /// `CodecError::InvalidArgument` for numeric levels outside 0..=9 other than -1.
    pub fn new(level: CompressionLevel) -> CodecResult<Self> {
        Self::with_options(level, ZlibOptions::default())
    }

    /// Same as `new`, with a custom output sizing policy.
    pub fn with_options(level: CompressionLevel, options: ZlibOptions) -> CodecResult<Self> {
        let level = level.resolve(ZLIB_LEVEL_FASTEST, ZLIB_LEVEL_DEFAULT, ZLIB_LEVEL_BEST);
        let compression = match level {
            ZLIB_LEVEL_DEFAULT => Compression::default(),
            ZLIB_MIN_LEVEL..=ZLIB_MAX_LEVEL => Compression::new(level as u32),
            other => return Err(CodecError::invalid_level(CodecType::Zlib, other)),
        };
        if options.default_buffer_length == 0 {
            return Err(CodecError::InvalidArgument(
                "zlib: default buffer length must be non-zero".into(),
            ));
        }
        debug!("zlib: level {} ({:?}), {:?}", level, compression, options);
        Ok(Self { level, compression, options })
    }

    /// Resolved numeric level (-1 is zlib's default).
    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn options(&self) -> ZlibOptions {
        self.options
    }

    // Chain a new segment once the active one is full.
    fn reserve(&self, out: &mut ChainWriter) {
        if out.remaining() == 0 {
            trace!(
                "zlib: output segment full after {} bytes, chaining {} more",
                out.len(),
                self.options.default_buffer_length
            );
            out.grow(self.options.default_buffer_length);
        }
    }

    // One inflate call on `input`, growing the output first if needed.
    fn inflate_step(
        &self,
        stream: &mut Decompress,
        out: &mut ChainWriter,
        input: &[u8],
    ) -> CodecResult<InflateStep> {
        self.reserve(out);

        let in_before = stream.total_in();
        let out_before = stream.total_out();
        let status = stream.decompress_vec(input, out.tail_mut(), FlushDecompress::None);
        let consumed = (stream.total_in() - in_before) as usize;
        let produced = stream.total_out() - out_before;

        match status {
            Ok(Status::StreamEnd) => Ok(InflateStep { consumed, stream_end: true }),
            Ok(Status::Ok) if consumed > 0 || produced > 0 => Ok(InflateStep { consumed, stream_end: false }),
            // Room to write but nothing moved: the stream ends before its trailer.
            Ok(Status::Ok) | Ok(Status::BufError) => Err(CodecError::runtime(
                CodecType::Zlib,
                format!("inflate error: buffer error (truncated stream after {} bytes)", stream.total_in()),
            )),
            Err(e) => Err(CodecError::runtime(
                CodecType::Zlib,
                match e.needs_dictionary() {
                    Some(adler) => format!("inflate error: need dictionary (adler32 {:#010x})", adler),
                    None => format!("inflate error: data error: {}", e),
                },
            )),
        }
    }
}

struct InflateStep {
    consumed: usize,
    stream_end: bool,
}

/// Owns a `flate2` stream for the duration of one call.
///
/// The stream is released when the guard drops. A guard dropped before
/// `complete()` belongs to a failed call; any buffered data is discarded.
struct StreamGuard<S> {
    stream: S,
    op: &'static str,
    completed: bool,
}

impl<S> StreamGuard<S> {
    fn new(stream: S, op: &'static str) -> Self {
        Self { stream, op, completed: false }
    }

    fn complete(&mut self) {
        self.completed = true;
    }
}

impl<S> Deref for StreamGuard<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.stream
    }
}

impl<S> DerefMut for StreamGuard<S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut self.stream
    }
}

impl<S> Drop for StreamGuard<S> {
    fn drop(&mut self) {
        if !self.completed {
            debug!("zlib: {} stream released before completion, pending data dropped", self.op);
        }
    }
}

/// Conservative upper bound on the zlib-wrapped deflate output for `source_len` input bytes
/// (zlib's `deflateBound` fallback formula plus the 6-byte zlib wrapper).
pub fn deflate_bound(source_len: u64) -> u64 {
    source_len
        .saturating_add((source_len.saturating_add(7)) >> 3)
        .saturating_add((source_len.saturating_add(63)) >> 6)
        .saturating_add(5 + 6)
}

impl CodecBackend for ZlibCodec {
    fn codec_type(&self) -> CodecType {
        CodecType::Zlib
    }

    fn compress_chain(&self, data: &ByteChain) -> CodecResult<ByteChain> {
        let mut stream = StreamGuard::new(Compress::new(self.compression, true), "deflate");

        let max_compressed_length = deflate_bound(data.len() as u64);
        let mut out = ChainWriter::with_capacity(self.options.first_segment_length(Some(max_compressed_length)));

        for segment in data.segments() {
            let mut input: &[u8] = segment;
            while !input.is_empty() {
                self.reserve(&mut out);

                let before = stream.total_in();
                let status = stream.compress_vec(input, out.tail_mut(), FlushCompress::None);
                assert!(
                    matches!(status, Ok(Status::Ok)),
                    "zlib: deflate returned {:?} while feeding input",
                    status
                );
                input = &input[(stream.total_in() - before) as usize..];
            }
        }

        loop {
            self.reserve(&mut out);
            match stream.compress_vec(&[], out.tail_mut(), FlushCompress::Finish) {
                Ok(Status::Ok) => continue,
                Ok(Status::StreamEnd) => break,
                other => panic!("zlib: deflate returned {:?} while finishing the stream", other),
            }
        }

        stream.complete();
        trace!(
            "zlib: deflated {} -> {} bytes in {} segments",
            stream.total_in(),
            stream.total_out(),
            out.segment_count()
        );
        Ok(out.finish())
    }

    fn uncompress_chain(&self, data: &ByteChain, uncompressed_length: Option<u64>) -> CodecResult<ByteChain> {
        let mut stream = StreamGuard::new(Decompress::new(true), "inflate");
        let mut out = ChainWriter::with_capacity(self.options.first_segment_length(uncompressed_length));

        let mut stream_end = false;
        for segment in data.segments() {
            let mut input: &[u8] = segment;
            while !input.is_empty() {
                if stream_end {
                    return Err(CodecError::runtime(CodecType::Zlib, "junk after end of stream"));
                }
                let step = self.inflate_step(&mut stream, &mut out, input)?;
                stream_end = step.stream_end;
                input = &input[step.consumed..];
            }
        }

        // Input exhausted: drain whatever the decoder still holds.
        while !stream_end {
            stream_end = self.inflate_step(&mut stream, &mut out, &[])?.stream_end;
        }

        let total_out = stream.total_out();
        if let Some(expected) = uncompressed_length {
            if expected != total_out {
                return Err(CodecError::runtime(
                    CodecType::Zlib,
                    format!("invalid uncompressed length: expected {}, got {}", expected, total_out),
                ));
            }
        }

        stream.complete();
        trace!(
            "zlib: inflated {} -> {} bytes in {} segments",
            stream.total_in(),
            total_out,
            out.segment_count()
        );
        Ok(out.finish())
    }
}
