//! chain/source.rs
//! Pull-based reader over a `ByteChain`.
//!
//! Summary: exposes a chain as a sequential byte source (available / peek / skip)
//! for algorithms that consume input span by span instead of as one slice.
use std::borrow::Cow;
use std::io::{self, BufRead, Read};

use bytes::Bytes;

use crate::chain::ByteChain;

/// Cursor over a borrowed chain.
///
/// Invariant: unless the source is exhausted, the current position points at a
/// non-empty remainder of some segment, so `peek` never returns an empty span
/// while `available() > 0`.
#[derive(Clone, Debug)]
pub struct ChainSource<'a> {
    segments: &'a [Bytes],
    index: usize,
    offset: usize,
    available: usize,
}

impl<'a> ChainSource<'a> {
    pub fn new(chain: &'a ByteChain) -> Self {
        let mut source = Self {
            segments: chain.as_segments(),
            index: 0,
            offset: 0,
            available: chain.len(),
        };
        source.settle();
        source
    }

    /// Bytes left to read.
    pub fn available(&self) -> usize {
        self.available
    }

    /// Next contiguous span, empty once the source is exhausted.
    ///
    /// The span borrows the chain, not the source, so it stays valid across `skip`.
    pub fn peek(&self) -> &'a [u8] {
        match self.segments.get(self.index) {
            Some(segment) => &segment[self.offset..],
            None => &[],
        }
    }

    /// Advance by `n` bytes, possibly across segment boundaries.
    ///
    /// # Panics
    /// If `n` exceeds `available()`.
    pub fn skip(&mut self, mut n: usize) {
        assert!(
            n <= self.available,
            "skip of {} bytes past end of source ({} available)",
            n,
            self.available
        );
        self.available -= n;
        while n > 0 {
            let span = self.segments[self.index].len() - self.offset;
            let step = span.min(n);
            self.offset += step;
            n -= step;
            self.settle();
        }
    }

    /// Copy up to `dst.len()` bytes into `dst`, returning how many were copied.
    pub fn copy_to_slice(&mut self, dst: &mut [u8]) -> usize {
        let mut copied = 0;
        while copied < dst.len() && self.available > 0 {
            let span = self.peek();
            let take = span.len().min(dst.len() - copied);
            dst[copied..copied + take].copy_from_slice(&span[..take]);
            self.skip(take);
            copied += take;
        }
        copied
    }

    /// The unread remainder as one slice.
    ///
    /// Borrows when the remainder already lives in a single span; gathers into
    /// a private copy otherwise. Does not advance the source.
    pub fn contiguous(&self) -> Cow<'a, [u8]> {
        let span = self.peek();
        if span.len() == self.available {
            return Cow::Borrowed(span);
        }
        let mut gathered = vec![0u8; self.available];
        let copied = self.clone().copy_to_slice(&mut gathered);
        debug_assert_eq!(copied, gathered.len());
        Cow::Owned(gathered)
    }

    // Move past exhausted and empty segments.
    fn settle(&mut self) {
        while let Some(segment) = self.segments.get(self.index) {
            if self.offset < segment.len() {
                break;
            }
            self.index += 1;
            self.offset = 0;
        }
    }
}

impl Read for ChainSource<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.copy_to_slice(buf))
    }
}

impl BufRead for ChainSource<'_> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        Ok(self.peek())
    }

    fn consume(&mut self, amt: usize) {
        self.skip(amt);
    }
}
