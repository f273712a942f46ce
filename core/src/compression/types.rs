//! compression/types.rs
//! Codec identifiers, level hints, errors, and the per-algorithm extension points.
use std::fmt;
use std::str::FromStr;

use num_enum::TryFromPrimitive;
use thiserror::Error;

use crate::chain::ByteChain;
use crate::compression::constants::{codec_ids, DEFAULT_MAX_UNCOMPRESSED_LENGTH, UNKNOWN_UNCOMPRESSED_LENGTH};

/// Closed set of supported algorithms. The discriminant is the registry tag.
#[repr(u16)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum CodecType {
    /// Identity transform.
    NoCompression = codec_ids::NO_COMPRESSION,
    /// LZ4 block format; fast single-shot compressor.
    Lz4           = codec_ids::LZ4,
    /// Raw Snappy; self-describing length, low overhead.
    Snappy        = codec_ids::SNAPPY,
    /// zlib-wrapped deflate, driven incrementally.
    Zlib          = codec_ids::ZLIB,
}

impl CodecType {
    pub const ALL: [CodecType; 4] = [
        CodecType::NoCompression,
        CodecType::Lz4,
        CodecType::Snappy,
        CodecType::Zlib,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            CodecType::NoCompression => "none",
            CodecType::Lz4           => "lz4",
            CodecType::Snappy        => "snappy",
            CodecType::Zlib          => "zlib",
        }
    }

    #[inline(always)]
    pub const fn id(self) -> u16 {
        self as u16
    }

    /// Resolve a raw registry tag.
    ///
    /// # Errors
    /// `CodecError::InvalidArgument` if the tag names no codec.
    pub fn from_id(raw: u16) -> CodecResult<Self> {
        CodecType::try_from_primitive(raw).map_err(|_| {
            CodecError::InvalidArgument(format!("compression type {} not supported", raw))
        })
    }
}

impl fmt::Display for CodecType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CodecType {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CodecType::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CodecError::InvalidArgument(format!("unknown compression type: {:?}", s)))
    }
}

/// Compression level hint.
///
/// Symbolic hints are mapped by each codec to one of its own numeric levels;
/// `Level(n)` is passed through and validated by the codec at construction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CompressionLevel {
    Fastest,
    #[default]
    Default,
    Best,
    Level(i32),
}

impl CompressionLevel {
    /// Map to a codec-specific numeric level.
    #[inline]
    pub const fn resolve(self, fastest: i32, default: i32, best: i32) -> i32 {
        match self {
            CompressionLevel::Fastest  => fastest,
            CompressionLevel::Default  => default,
            CompressionLevel::Best     => best,
            CompressionLevel::Level(n) => n,
        }
    }
}

impl From<i32> for CompressionLevel {
    fn from(level: i32) -> Self {
        CompressionLevel::Level(level)
    }
}

impl fmt::Display for CompressionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompressionLevel::Fastest  => f.write_str("fastest"),
            CompressionLevel::Default  => f.write_str("default"),
            CompressionLevel::Best     => f.write_str("best"),
            CompressionLevel::Level(n) => write!(f, "{}", n),
        }
    }
}

/// Convert a raw `u64` length (with `UNKNOWN_UNCOMPRESSED_LENGTH` as sentinel) to the
/// `Option` form taken by `Codec::uncompress`.
#[inline]
pub const fn known_length(raw: u64) -> Option<u64> {
    if raw == UNKNOWN_UNCOMPRESSED_LENGTH {
        None
    } else {
        Some(raw)
    }
}

pub type CodecResult<T> = Result<T, CodecError>;

/// Recoverable codec failures.
///
/// Broken algorithm contracts (impossible status codes, output larger than the
/// buffer it was written into) are not represented here: they panic.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Unsupported level, unknown codec tag, or a missing required length.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Declared uncompressed length exceeds the codec's ceiling.
    #[error("{codec}: uncompressed length too large: {have} > {max}")]
    LengthTooLarge { codec: CodecType, have: u64, max: u64 },

    /// Declared uncompressed length does not match the data.
    #[error("{codec}: invalid uncompressed length: expected {expected}, actual {actual}")]
    InvalidLength { codec: CodecType, expected: u64, actual: u64 },

    /// The algorithm rejected the data (corrupt, truncated, trailing junk, ...).
    #[error("codec {codec} failed: {msg}")]
    Runtime { codec: CodecType, msg: String },
}

impl CodecError {
    pub(crate) fn runtime(codec: CodecType, msg: impl Into<String>) -> Self {
        CodecError::Runtime { codec, msg: msg.into() }
    }

    pub(crate) fn invalid_level(codec: CodecType, level: i32) -> Self {
        CodecError::InvalidArgument(format!("{}: invalid level: {}", codec, level))
    }
}

/// Per-algorithm extension points behind `Codec`.
///
/// `Codec` validates lengths and short-circuits empty input before calling in,
/// so implementations may assume:
/// - `data` is non-empty;
/// - a known `uncompressed_length` is within `max_uncompressed_length()`;
/// - `uncompressed_length` is known whenever `needs_uncompressed_length()` is true.
pub(crate) trait CodecBackend: Send + Sync {
    fn codec_type(&self) -> CodecType;

    fn needs_uncompressed_length(&self) -> bool {
        false
    }

    fn max_uncompressed_length(&self) -> u64 {
        DEFAULT_MAX_UNCOMPRESSED_LENGTH
    }

    fn compress_chain(&self, data: &ByteChain) -> CodecResult<ByteChain>;

    fn uncompress_chain(&self, data: &ByteChain, uncompressed_length: Option<u64>) -> CodecResult<ByteChain>;
}
