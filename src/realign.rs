use crate::{
    assemble::assemble,
    error::Result,
    merge::{DEFAULT_MIN_SENTENCE_LENGTH, MergePolicy, merge_short_segments},
    model::{Cue, Segment},
    segmenter::SentenceSegmenter,
    timeline::map_timeline,
};

/// Everything one realignment run needs, passed explicitly.
pub struct RealignOptions<'a> {
    pub min_sentence_length: usize,
    pub keep_short_first: bool,
    pub source_language: Option<String>,
    pub target_language: Option<String>,
    pub segmenter: &'a dyn SentenceSegmenter,
}

impl<'a> RealignOptions<'a> {
    pub fn new(segmenter: &'a dyn SentenceSegmenter) -> Self {
        Self {
            min_sentence_length: DEFAULT_MIN_SENTENCE_LENGTH,
            keep_short_first: true,
            source_language: None,
            target_language: None,
            segmenter,
        }
    }

    pub fn merge_policy(&self) -> MergePolicy {
        MergePolicy {
            min_len: self.min_sentence_length,
            keep_short_first: self.keep_short_first,
        }
    }
}

/// Re-time `cues` so each output segment holds one sentence.
///
/// Runs the whole chain: assemble, segment, map the timeline, merge short
/// sentences. Any fault fails the run; no partial output is returned.
pub fn realign(cues: &[Cue], opts: &RealignOptions<'_>) -> Result<Vec<Segment>> {
    let span = tracing::info_span!(
        "realign",
        cues = cues.len(),
        source_language = opts.source_language.as_deref().unwrap_or("und")
    );
    let _g = span.enter();

    let assembly = assemble(cues)?;
    let spans = opts.segmenter.segment(assembly.text());
    tracing::info!(sentences = spans.len(), "segmented text");

    let segments = map_timeline(&assembly, spans)?;
    let sentences = segments.len();
    let merged = merge_short_segments(segments, opts.merge_policy())?;

    tracing::info!(
        sentences,
        segments = merged.len(),
        min_sentence_length = opts.min_sentence_length,
        "realigned timeline"
    );

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::RealignError, model::CharSpan, segmenter::PunctuationSegmenter};

    #[test]
    fn short_answer_is_folded_into_the_question() -> anyhow::Result<()> {
        let segmenter = PunctuationSegmenter::default();
        let cues = vec![
            Cue::new(0, 3_000, "Is dynamic programming hard to"),
            Cue::new(3_000, 5_000, "learn? Yes. But it pays off in the end."),
        ];
        let out = realign(&cues, &RealignOptions::new(&segmenter))?;

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].text, "Is dynamic programming hard to learn? Yes.");
        assert_eq!(out[0].start_ms, 0);
        assert_eq!(out[1].text, "But it pays off in the end.");
        assert_eq!(out[0].end_ms, out[1].start_ms);
        assert_eq!(out[1].end_ms, 5_000);
        Ok(())
    }

    #[test]
    fn segmenter_overrunning_text_fails_the_run() {
        let overrun = |text: &str| vec![CharSpan::new(0, text.chars().count() + 5)];
        let cues = vec![Cue::new(0, 1_000, "Hello there everyone.")];
        let err = realign(&cues, &RealignOptions::new(&overrun)).unwrap_err();
        assert!(matches!(err, RealignError::LedgerExhausted { .. }));
    }

    #[test]
    fn min_sentence_length_is_configurable() -> anyhow::Result<()> {
        let segmenter = PunctuationSegmenter::default();
        let cues = vec![Cue::new(0, 1_000, "One two. Three four.")];
        let mut opts = RealignOptions::new(&segmenter);
        assert_eq!(realign(&cues, &opts)?.len(), 1);

        opts.min_sentence_length = 0;
        assert_eq!(realign(&cues, &opts)?.len(), 2);
        Ok(())
    }
}
