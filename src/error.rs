use thiserror::Error;

pub type Result<T> = std::result::Result<T, RealignError>;

/// Failures of a single realignment run. Every variant is terminal for the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RealignError {
    #[error("malformed cue #{index}: {reason}")]
    MalformedCue { index: usize, reason: String },

    #[error("cue ledger exhausted resolving offset {offset} ({emitted} segments emitted)")]
    LedgerExhausted { offset: usize, emitted: usize },

    #[error("sentence span ending at {offset} lies before the cue cursor at {cursor}")]
    SpanOutOfOrder { offset: usize, cursor: usize },

    #[error("short segment {text:?} has no preceding segment to merge into")]
    EmptyAccumulator { text: String },
}

impl RealignError {
    pub(crate) fn malformed(index: usize, reason: impl Into<String>) -> Self {
        Self::MalformedCue {
            index,
            reason: reason.into(),
        }
    }
}
