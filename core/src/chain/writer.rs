//! chain/writer.rs
//! Growable output chain.
//!
//! Summary: one active segment exposes writable tail capacity; `grow` seals it
//! and starts a new, independently sized segment. Written bytes are never moved.
use std::mem;

use bytes::Bytes;

use crate::chain::ByteChain;

#[derive(Debug)]
pub struct ChainWriter {
    sealed: ByteChain,
    active: Vec<u8>,
}

impl ChainWriter {
    /// Start with one active segment of `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sealed: ByteChain::new(),
            active: Vec::with_capacity(capacity),
        }
    }

    /// Writable capacity left in the active segment.
    pub fn remaining(&self) -> usize {
        self.active.capacity() - self.active.len()
    }

    /// Active segment. Writers must only fill its spare capacity
    /// (e.g. `flate2`'s `*_vec` calls), never reallocate it.
    pub fn tail_mut(&mut self) -> &mut Vec<u8> {
        &mut self.active
    }

    /// Seal the full active segment and chain a fresh one of `capacity` bytes after it.
    ///
    /// # Panics
    /// If the active segment still has capacity left.
    pub fn grow(&mut self, capacity: usize) {
        assert_eq!(
            self.remaining(),
            0,
            "output segment grown before it was full"
        );
        let full = mem::replace(&mut self.active, Vec::with_capacity(capacity));
        if !full.is_empty() {
            self.sealed.push(full);
        }
    }

    /// Bytes written so far across all segments.
    pub fn len(&self) -> usize {
        self.sealed.len() + self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn segment_count(&self) -> usize {
        self.sealed.segment_count() + 1
    }

    /// Trim the unused tail of the active segment and hand the chain over.
    pub fn finish(mut self) -> ByteChain {
        if !self.active.is_empty() {
            self.active.shrink_to_fit();
            self.sealed.push(Bytes::from(self.active));
        }
        self.sealed
    }
}
