//! compression/codecs/mod.rs
//! Algorithm-specific codecs.
//!
//! Notes:
//! - Each codec resolves and validates its level at construction; calls never re-validate it.
//! - Codecs hold only their resolved settings, so every call is self-contained.
//! - Only zlib drives its algorithm incrementally; the others are single-shot.

pub mod none;
pub mod lz4;
pub mod snappy;
pub mod zlib;

pub use self::none::*;
pub use self::lz4::*;
pub use self::snappy::*;
pub use self::zlib::*;
