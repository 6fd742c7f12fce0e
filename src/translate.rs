use anyhow::{Context, Result, bail};
use std::{collections::VecDeque, fs, path::Path};

use crate::model::Segment;

/// Supplies translated text for batches of segment texts.
///
/// Answers must come back in the same order and count as the request.
pub trait Translator {
    fn translate_batch(
        &mut self,
        texts: &[String],
        source: Option<&str>,
        target: &str,
    ) -> Result<Vec<String>>;
}

/// Replace segment texts with their translations, batch by batch.
/// Timing is never touched.
pub fn translate_segments(
    segments: &mut [Segment],
    translator: &mut dyn Translator,
    source: Option<&str>,
    target: &str,
    batch_size: usize,
) -> Result<()> {
    let span = tracing::info_span!(
        "apply_translation",
        target_language = target,
        segments = segments.len()
    );
    let _g = span.enter();

    for (batch_no, chunk) in segments.chunks_mut(batch_size.max(1)).enumerate() {
        let texts: Vec<String> = chunk.iter().map(|s| s.text.clone()).collect();
        let translated = translator
            .translate_batch(&texts, source, target)
            .with_context(|| format!("translation batch {batch_no} failed"))?;

        if translated.len() != chunk.len() {
            bail!(
                "translation batch {batch_no} returned {} texts for {} segments",
                translated.len(),
                chunk.len()
            );
        }

        for (seg, text) in chunk.iter_mut().zip(translated) {
            seg.text = text;
        }
        tracing::debug!(batch_no, size = chunk.len(), "applied translation batch");
    }

    Ok(())
}

/// Translations prepared out of band, one line per segment in output order.
#[derive(Debug, Clone, Default)]
pub struct LineFileTranslator {
    lines: VecDeque<String>,
}

impl LineFileTranslator {
    pub fn from_text(raw: &str) -> Self {
        Self {
            lines: raw.lines().map(|l| l.trim().to_string()).collect(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed reading translations: {}", path.display()))?;
        Ok(Self::from_text(raw.trim_end_matches('\n')))
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl Translator for LineFileTranslator {
    fn translate_batch(
        &mut self,
        texts: &[String],
        _source: Option<&str>,
        _target: &str,
    ) -> Result<Vec<String>> {
        if self.lines.len() < texts.len() {
            bail!(
                "translation file ran out: {} lines left for {} segments",
                self.lines.len(),
                texts.len()
            );
        }
        Ok(self.lines.drain(..texts.len()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Upper {
        calls: usize,
    }

    impl Translator for Upper {
        fn translate_batch(
            &mut self,
            texts: &[String],
            _source: Option<&str>,
            _target: &str,
        ) -> Result<Vec<String>> {
            self.calls += 1;
            Ok(texts.iter().map(|t| t.to_uppercase()).collect())
        }
    }

    fn segments() -> Vec<Segment> {
        vec![
            Segment::new(0, 10, "one"),
            Segment::new(10, 20, "two"),
            Segment::new(20, 30, "three"),
        ]
    }

    #[test]
    fn batches_and_keeps_timing() -> Result<()> {
        let mut segs = segments();
        let mut tr = Upper { calls: 0 };
        translate_segments(&mut segs, &mut tr, Some("en"), "de", 2)?;

        assert_eq!(tr.calls, 2);
        assert_eq!(segs[2], Segment::new(20, 30, "THREE"));
        assert_eq!(segs[0].start_ms, 0);
        Ok(())
    }

    #[test]
    fn line_file_substitutes_in_order() -> Result<()> {
        let mut segs = segments();
        let mut tr = LineFileTranslator::from_text("eins\nzwei\ndrei");
        translate_segments(&mut segs, &mut tr, None, "de", 50)?;
        let texts: Vec<&str> = segs.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["eins", "zwei", "drei"]);
        assert_eq!(tr.remaining(), 0);
        Ok(())
    }

    #[test]
    fn short_line_file_is_an_error() {
        let mut segs = segments();
        let mut tr = LineFileTranslator::from_text("eins\nzwei");
        let err = translate_segments(&mut segs, &mut tr, None, "de", 50).unwrap_err();
        assert!(format!("{err:#}").contains("ran out"));
    }

    #[test]
    fn load_reads_lines_from_disk() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("de.txt");
        fs::write(&path, "eins\nzwei\n")?;
        assert_eq!(LineFileTranslator::load(&path)?.remaining(), 2);
        Ok(())
    }
}
