//! Re-time subtitle cues so that every caption carries exactly one sentence.
//!
//! Cue texts are joined into one document, split into sentences, and each
//! sentence boundary is given a time by linear interpolation inside the cue
//! that contains it. Very short sentences are then folded into their
//! predecessor.

pub mod assemble;
pub mod error;
pub mod ledger;
pub mod merge;
pub mod model;
pub mod realign;
pub mod segmenter;
pub mod timeline;

// Collaborators around the core: I/O formats, translation, configuration.
pub mod config;
pub mod formats;
pub mod translate;

pub use error::RealignError;
pub use model::{CharSpan, Cue, Segment, Transcript};
pub use realign::{RealignOptions, realign};
pub use segmenter::{PunctuationSegmenter, SentenceSegmenter};
