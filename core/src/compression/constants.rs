//! compression/constants.rs
//! Stable codec IDs, level mappings, length ceilings and buffer sizing defaults.

/// Stable codec IDs (u16) used as registry keys.
pub mod codec_ids {
    pub const NO_COMPRESSION: u16 = 0x0000;
    pub const LZ4: u16            = 0x0001;
    pub const SNAPPY: u16         = 0x0002;
    pub const ZLIB: u16           = 0x0003;
}

/// Raw "uncompressed length not known" value, for callers that carry lengths as plain `u64`.
pub const UNKNOWN_UNCOMPRESSED_LENGTH: u64 = u64::MAX;

/// Default ceiling: everything except the unknown-length sentinel.
pub const DEFAULT_MAX_UNCOMPRESSED_LENGTH: u64 = UNKNOWN_UNCOMPRESSED_LENGTH - 1;

// --- No compression ---
pub const NO_COMPRESSION_LEVEL: i32 = 0;

// --- LZ4 block ---
pub const LZ4_LEVEL_FAST: i32 = 1;
pub const LZ4_LEVEL_HIGH: i32 = 2;
/// Level handed to the LZ4 HC entry point in high-compression mode.
pub const LZ4_HC_CLEVEL: i32 = 9;
/// ~1.8 GiB; lz4 documents "max supported value is ~1.9GB".
pub const LZ4_MAX_UNCOMPRESSED_LENGTH: u64 = (1u64 << 30) * 9 / 5;

// --- Snappy raw ---
pub const SNAPPY_LEVEL: i32 = 1;
/// The embedded length header is a 32-bit varint.
pub const SNAPPY_MAX_UNCOMPRESSED_LENGTH: u64 = u32::MAX as u64;
pub const SNAPPY_MAX_HEADER_LEN: usize = 5;
/// Input is compressed in fragments of at most this size (snappy's block size).
pub const SNAPPY_BLOCK_SIZE: usize = 1 << 16;

// --- zlib ---
pub const ZLIB_LEVEL_FASTEST: i32 = 1;
/// zlib's `Z_DEFAULT_COMPRESSION`.
pub const ZLIB_LEVEL_DEFAULT: i32 = -1;
pub const ZLIB_LEVEL_BEST: i32 = 9;
pub const ZLIB_MIN_LEVEL: i32 = 0;
pub const ZLIB_MAX_LEVEL: i32 = 9;

/// Largest first output segment sized from a known length (64 MiB).
pub const MAX_SINGLE_STEP_LENGTH: usize = 64 << 20;
/// First segment size when no usable length is known, and size of every later segment (4 MiB).
pub const DEFAULT_BUFFER_LENGTH: usize = 4 << 20;
