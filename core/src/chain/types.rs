//! chain/types.rs
//! `ByteChain`: an ordered sequence of contiguous byte segments treated as one logical buffer.
use std::fmt;

use bytes::{Bytes, BytesMut};

/// Logical buffer made of zero or more shared segments.
///
/// - Segments may be empty; they contribute nothing to `len()`.
/// - `Clone` shares the underlying storage of every segment.
/// - Equality compares logical contents, not segmentation.
#[derive(Clone, Default)]
pub struct ByteChain {
    segments: Vec<Bytes>,
}

impl ByteChain {
    /// Empty chain with no segments.
    pub fn new() -> Self {
        Self { segments: Vec::new() }
    }

    /// Build a chain from already-split segments, preserving their order.
    pub fn from_segments<I, B>(segments: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Bytes>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Chain one more segment after the current tail.
    pub fn push(&mut self, segment: impl Into<Bytes>) {
        self.segments.push(segment.into());
    }

    /// Chain all segments of `other` after this chain.
    pub fn append(&mut self, other: ByteChain) {
        self.segments.extend(other.segments);
    }

    /// Total number of bytes across all segments.
    pub fn len(&self) -> usize {
        self.segments.iter().map(Bytes::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(Bytes::is_empty)
    }

    /// True when the chain spans more than one segment.
    pub fn is_chained(&self) -> bool {
        self.segments.len() > 1
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn as_segments(&self) -> &[Bytes] {
        &self.segments
    }

    /// Iterate the contiguous segments in order.
    pub fn segments(&self) -> std::slice::Iter<'_, Bytes> {
        self.segments.iter()
    }

    /// Single contiguous view of the whole chain.
    ///
    /// Shares storage when the chain already has at most one segment;
    /// otherwise copies into one fresh allocation.
    pub fn coalesced(&self) -> Bytes {
        match self.segments.as_slice() {
            [] => Bytes::new(),
            [only] => only.clone(),
            many => {
                let mut joined = BytesMut::with_capacity(self.len());
                for segment in many {
                    joined.extend_from_slice(segment);
                }
                joined.freeze()
            }
        }
    }

    /// Collapse the chain into a single segment in place.
    pub fn coalesce(&mut self) {
        if self.is_chained() {
            let joined = self.coalesced();
            self.segments = vec![joined];
        }
    }

    /// Copy the logical contents into one `Vec`.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        for segment in &self.segments {
            out.extend_from_slice(segment);
        }
        out
    }

    fn bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.segments.iter().flat_map(|s| s.iter().copied())
    }
}

impl PartialEq for ByteChain {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.bytes().eq(other.bytes())
    }
}

impl Eq for ByteChain {}

impl fmt::Debug for ByteChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteChain")
            .field("len", &self.len())
            .field("segments", &self.segments.len())
            .finish()
    }
}

impl From<Bytes> for ByteChain {
    fn from(segment: Bytes) -> Self {
        Self { segments: vec![segment] }
    }
}

impl From<BytesMut> for ByteChain {
    fn from(segment: BytesMut) -> Self {
        Self::from(segment.freeze())
    }
}

impl From<Vec<u8>> for ByteChain {
    fn from(segment: Vec<u8>) -> Self {
        Self::from(Bytes::from(segment))
    }
}

impl From<&'static [u8]> for ByteChain {
    fn from(segment: &'static [u8]) -> Self {
        Self::from(Bytes::from_static(segment))
    }
}

impl FromIterator<Bytes> for ByteChain {
    fn from_iter<T: IntoIterator<Item = Bytes>>(iter: T) -> Self {
        Self::from_segments(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_segments_do_not_count() {
        let chain = ByteChain::from_segments([Bytes::new(), Bytes::new()]);
        assert!(chain.is_empty());
        assert!(chain.is_chained());
        assert_eq!(chain.len(), 0);
    }

    #[test]
    fn coalesce_joins_segments_in_order() {
        let mut chain = ByteChain::from_segments([&b"hel"[..], &b""[..], &b"lo"[..]]);
        assert_eq!(chain.segment_count(), 3);

        chain.coalesce();
        assert_eq!(chain.segment_count(), 1);
        assert_eq!(chain.to_vec(), b"hello");
    }

    #[test]
    fn coalesced_single_segment_shares_storage() {
        let original = Bytes::from(vec![7u8; 32]);
        let chain = ByteChain::from(original.clone());
        assert_eq!(chain.coalesced().as_ptr(), original.as_ptr());
    }

    #[test]
    fn equality_ignores_segmentation() {
        let a = ByteChain::from(b"abcdef".to_vec());
        let mut b = ByteChain::from(&b"abc"[..]);
        b.append(ByteChain::from(&b"def"[..]));
        assert_eq!(a, b);
        assert_ne!(a, ByteChain::from(&b"abcdeg"[..]));
    }
}
