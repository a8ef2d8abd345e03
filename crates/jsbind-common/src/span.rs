use std::ops::Range;

use serde::Serialize;

/// Byte-offset span into a type expression. Start is inclusive, end is exclusive.
///
/// Type expressions are short single-line strings taken from a manifest, so
/// byte offsets are all a diagnostic needs to underline the offending part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Create a new span from byte offsets.
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end, "span start ({start}) must be <= end ({end})");
        Self { start, end }
    }

    /// Merge two spans into one that covers both.
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// The span as a `usize` range, clamped to `len` and widened to at
    /// least one byte when the text allows it. Diagnostic renderers need a
    /// non-empty label.
    pub fn to_range(self, len: usize) -> Range<usize> {
        let start = (self.start as usize).min(len);
        let end = (self.end as usize).min(len).max(start);
        if start == end {
            start..(end + 1).min(len)
        } else {
            start..end
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_merge() {
        let merged = Span::new(5, 10).merge(Span::new(8, 15));
        assert_eq!(merged, Span::new(5, 15));
    }

    #[test]
    fn empty_span_widens_for_labels() {
        assert_eq!(Span::new(3, 3).to_range(10), 3..4);
        assert_eq!(Span::new(10, 10).to_range(10), 10..10);
        assert_eq!(Span::new(2, 40).to_range(10), 2..10);
    }
}
