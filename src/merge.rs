use crate::{
    error::{RealignError, Result},
    model::Segment,
};

pub const DEFAULT_MIN_SENTENCE_LENGTH: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergePolicy {
    /// Segments with at most this many characters are folded into their predecessor.
    pub min_len: usize,
    /// Keep a short first segment on its own instead of failing with `EmptyAccumulator`.
    pub keep_short_first: bool,
}

impl Default for MergePolicy {
    fn default() -> Self {
        Self {
            min_len: DEFAULT_MIN_SENTENCE_LENGTH,
            keep_short_first: true,
        }
    }
}

/// Absorb short segments into the entry before them.
///
/// Blank segments carry no text: they only stretch the previous entry's end
/// time, and are dropped when nothing precedes them.
pub fn merge_short_segments(segments: Vec<Segment>, policy: MergePolicy) -> Result<Vec<Segment>> {
    let mut out: Vec<Segment> = Vec::with_capacity(segments.len());

    for seg in segments {
        if seg.text.is_empty() {
            if let Some(prev) = out.last_mut() {
                prev.end_ms = seg.end_ms;
            }
            continue;
        }

        if seg.char_len() > policy.min_len {
            out.push(seg);
            continue;
        }

        if let Some(prev) = out.last_mut() {
            prev.end_ms = seg.end_ms;
            prev.text.push(' ');
            prev.text.push_str(&seg.text);
            continue;
        }

        if !policy.keep_short_first {
            return Err(RealignError::EmptyAccumulator { text: seg.text });
        }
        out.push(seg);
    }

    Ok(out)
}
