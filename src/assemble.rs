use crate::{
    error::{RealignError, Result},
    ledger::{CueLedger, LedgerEntry},
    model::{CharSpan, Cue},
};

/// The whole narration as one document, plus the ledger of per-cue lengths.
#[derive(Debug, Clone)]
pub struct Assembly {
    text: String,
    // Byte offset of every char, with `text.len()` appended as a sentinel.
    char_bytes: Vec<usize>,
    ledger: CueLedger,
}

impl Assembly {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the assembled text in characters.
    pub fn char_len(&self) -> usize {
        self.char_bytes.len() - 1
    }

    /// Slice of the text covered by an inclusive character span, clamped to the text.
    pub fn slice(&self, span: CharSpan) -> &str {
        let len = self.char_len();
        let from = span.start.min(len);
        let to = (span.end + 1).min(len).max(from);
        &self.text[self.char_bytes[from]..self.char_bytes[to]]
    }

    pub fn ledger(&self) -> &CueLedger {
        &self.ledger
    }
}

/// Collapse line breaks to single spaces and append the trailing separator.
pub fn normalize_cue_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 1);
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push(' ');
            }
            '\n' => out.push(' '),
            _ => out.push(ch),
        }
    }
    out.push(' ');
    out
}

/// Validate cues and join their normalized texts in order.
pub fn assemble(cues: &[Cue]) -> Result<Assembly> {
    let mut text = String::new();
    let mut char_bytes = Vec::new();
    let mut entries = Vec::with_capacity(cues.len());
    let mut prev_end: Option<i64> = None;

    for (index, cue) in cues.iter().enumerate() {
        if cue.end_ms < cue.start_ms {
            return Err(RealignError::malformed(
                index,
                format!("ends at {}ms before it starts at {}ms", cue.end_ms, cue.start_ms),
            ));
        }

        if let Some(prev) = prev_end {
            if cue.start_ms < prev {
                tracing::warn!(
                    index,
                    start_ms = cue.start_ms,
                    previous_end_ms = prev,
                    "cue overlaps its predecessor"
                );
            }
        }
        prev_end = Some(cue.end_ms);

        let normalized = normalize_cue_text(&cue.text);
        let mut length = 0usize;
        for (offset, _) in normalized.char_indices() {
            char_bytes.push(text.len() + offset);
            length += 1;
        }
        if length == 0 {
            return Err(RealignError::malformed(index, "normalized text is empty"));
        }
        text.push_str(&normalized);

        entries.push(LedgerEntry {
            start_ms: cue.start_ms,
            end_ms: cue.end_ms,
            length,
        });
    }

    char_bytes.push(text.len());

    tracing::debug!(
        cues = entries.len(),
        chars = char_bytes.len() - 1,
        "assembled cue text"
    );

    Ok(Assembly {
        text,
        char_bytes,
        ledger: CueLedger::new(entries),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_every_line_break_style() {
        assert_eq!(normalize_cue_text("a\nb\r\nc\rd"), "a b c d ");
        assert_eq!(normalize_cue_text(""), " ");
    }

    #[test]
    fn total_length_matches_sum_of_cue_lengths() -> anyhow::Result<()> {
        let cues = vec![
            Cue::new(0, 1000, "Hello\nthere."),
            Cue::new(1000, 2000, "Grüße, Welt!"),
        ];
        let asm = assemble(&cues)?;
        assert_eq!(asm.text(), "Hello there. Grüße, Welt! ");
        assert_eq!(asm.char_len(), asm.ledger().total_length());
        assert_eq!(asm.char_len(), 13 + 13);
        Ok(())
    }

    #[test]
    fn slices_by_characters_not_bytes() -> anyhow::Result<()> {
        let asm = assemble(&[Cue::new(0, 10, "ää bb")])?;
        assert_eq!(asm.slice(CharSpan::new(0, 1)), "ää");
        assert_eq!(asm.slice(CharSpan::new(3, 40)), "bb ");
        Ok(())
    }

    #[test]
    fn rejects_cue_ending_before_start() {
        let err = assemble(&[Cue::new(0, 10, "ok"), Cue::new(20, 5, "bad")]).unwrap_err();
        assert!(matches!(err, RealignError::MalformedCue { index: 1, .. }));
    }

    #[test]
    fn empty_cue_still_contributes_a_separator() -> anyhow::Result<()> {
        let asm = assemble(&[Cue::new(0, 10, "")])?;
        assert_eq!(asm.char_len(), 1);
        Ok(())
    }
}
