use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub cues: Vec<Cue>,
    #[serde(default)]
    pub meta: Meta,
}

impl Transcript {
    pub fn new(cues: Vec<Cue>) -> Self {
        Self {
            cues,
            meta: Meta::default(),
        }
    }

    pub fn duration_ms(&self) -> i64 {
        self.cues.last().map(|c| c.end_ms).unwrap_or(0).max(0)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Meta {
    pub source: Option<String>,
    pub language: Option<String>,
}

/// One original timed subtitle fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cue {
    pub start_ms: i64,
    pub end_ms: i64,
    pub text: String,
}

impl Cue {
    pub fn new(start_ms: i64, end_ms: i64, text: impl Into<String>) -> Self {
        Self {
            start_ms,
            end_ms,
            text: text.into(),
        }
    }
}

/// Inclusive character range `[start, end]` naming one sentence in the assembled text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharSpan {
    pub start: usize,
    pub end: usize,
}

impl CharSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// A re-timed caption holding one sentence, or a merged run of short ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub start_ms: i64,
    pub end_ms: i64,
    pub text: String,
}

impl Segment {
    pub fn new(start_ms: i64, end_ms: i64, text: impl Into<String>) -> Self {
        Self {
            start_ms,
            end_ms,
            text: text.into(),
        }
    }

    /// Length in characters, the unit the merge threshold compares against.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}
