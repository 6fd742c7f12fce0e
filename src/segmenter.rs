use std::collections::HashSet;

use crate::model::CharSpan;

/// Maps assembled text to sentence spans.
///
/// Implementations must return inclusive character spans ordered left to right
/// that cover the whole text without gaps or overlap.
pub trait SentenceSegmenter {
    fn segment(&self, text: &str) -> Vec<CharSpan>;
}

impl<F> SentenceSegmenter for F
where
    F: Fn(&str) -> Vec<CharSpan>,
{
    fn segment(&self, text: &str) -> Vec<CharSpan> {
        self(text)
    }
}

const DEFAULT_ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "vs", "etc", "e.g", "i.e", "cf",
    "al", "approx", "dept", "est", "fig", "inc", "ltd", "co", "corp", "no", "vol", "u.s", "u.k",
    "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec",
];

/// Rule-based sentence splitter for space-delimited languages.
///
/// A sentence ends at a run of terminal marks (plus closing quotes or brackets)
/// followed by whitespace. A lone `.` does not end a sentence after a known
/// abbreviation, after a single-letter initial, or before a lowercase word.
/// The one whitespace character after a boundary belongs to the sentence it
/// closes; blank text at the very end is folded into the last sentence.
#[derive(Debug, Clone)]
pub struct PunctuationSegmenter {
    abbreviations: HashSet<String>,
}

impl Default for PunctuationSegmenter {
    fn default() -> Self {
        Self::new(std::iter::empty::<&str>())
    }
}

impl PunctuationSegmenter {
    /// Build a segmenter with the built-in abbreviations plus `extra` ones.
    /// Entries are matched case-insensitively and without their final dot.
    pub fn new<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut abbreviations: HashSet<String> =
            DEFAULT_ABBREVIATIONS.iter().map(|s| s.to_string()).collect();
        for a in extra {
            let a = a.as_ref().trim().trim_end_matches('.').to_lowercase();
            if !a.is_empty() {
                abbreviations.insert(a);
            }
        }
        Self { abbreviations }
    }

    fn dot_is_boundary(&self, before: &[char], after: &[char]) -> bool {
        let before: String = before.iter().collect();
        let mut words = before.split_whitespace().rev();
        let word = words
            .next()
            .map(|w| w.trim_start_matches(|c: char| !c.is_alphanumeric()))
            .unwrap_or("");
        let prev_word = words.next();
        let after: String = after.iter().collect();
        let next_word = after.split_whitespace().next();

        if is_initial(word, prev_word, next_word) {
            return false;
        }
        if self.abbreviations.contains(&word.to_lowercase()) {
            return false;
        }

        !next_word
            .and_then(|w| w.chars().next())
            .is_some_and(|c| c.is_lowercase())
    }
}

/// A lone capital before a dot, as in "John F. Kennedy" or "J. R. Tolkien".
/// The pronoun `I` and letters trailing a lowercase word ("plan B.") are not initials.
fn is_initial(word: &str, prev_word: Option<&str>, next_word: Option<&str>) -> bool {
    let mut letters = word.chars();
    let (Some(c), None) = (letters.next(), letters.next()) else {
        return false;
    };
    if !c.is_uppercase() || c == 'I' {
        return false;
    }

    let starts_upper = |w: &str| {
        w.chars()
            .find(|c| c.is_alphabetic())
            .is_some_and(|c| c.is_uppercase())
    };
    let next_is_initial = next_word.is_some_and(|w| {
        let mut cs = w.chars();
        matches!((cs.next(), cs.next(), cs.next()), (Some(a), Some('.'), None) if a.is_uppercase())
    });

    prev_word.is_none_or(starts_upper) || next_is_initial
}

fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '…' | '。' | '！' | '？')
}

fn is_closing(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '}' | '”' | '’' | '»' | '」' | '』')
}

impl SentenceSegmenter for PunctuationSegmenter {
    fn segment(&self, text: &str) -> Vec<CharSpan> {
        let chars: Vec<char> = text.chars().collect();
        let mut spans = Vec::new();
        let mut start = 0;
        let mut i = 0;

        while i < chars.len() {
            if !is_terminal(chars[i]) {
                i += 1;
                continue;
            }

            let mark = i;
            let mut j = i + 1;
            while j < chars.len() && (is_terminal(chars[j]) || is_closing(chars[j])) {
                j += 1;
            }

            if j < chars.len() && !chars[j].is_whitespace() {
                i = j;
                continue;
            }

            let dots_only = chars[mark..j]
                .iter()
                .filter(|c| is_terminal(**c))
                .all(|c| *c == '.');
            if dots_only && !self.dot_is_boundary(&chars[start..mark], &chars[j..]) {
                i = j;
                continue;
            }

            // The sentence owns one separator after its marks; any further
            // whitespace opens the next span.
            if j < chars.len() {
                j += 1;
            }
            spans.push(CharSpan::new(start, j - 1));
            start = j;
            i = j;
        }

        if start < chars.len() {
            let tail_is_blank = chars[start..].iter().all(|c| c.is_whitespace());
            match spans.last_mut() {
                Some(last) if tail_is_blank => last.end = chars.len() - 1,
                _ => spans.push(CharSpan::new(start, chars.len() - 1)),
            }
        }

        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentences(text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        PunctuationSegmenter::default()
            .segment(text)
            .into_iter()
            .map(|s| chars[s.start..=s.end].iter().collect())
            .collect()
    }

    #[test]
    fn splits_on_terminal_marks_and_keeps_trailing_space() {
        assert_eq!(
            sentences("One here. Two there! Three? "),
            vec!["One here. ", "Two there! ", "Three? "]
        );
    }

    #[test]
    fn spans_cover_the_text_without_gaps() {
        let text = "Hey programmers, I'm Alvin l come to our course on dynamic programming. \
                    So dynamic programming is one of my most favorite topics to teach. ";
        let spans = PunctuationSegmenter::default().segment(text);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0], CharSpan::new(0, 71));
        assert_eq!(spans[1].start, 72);
        assert_eq!(spans[1].end, text.chars().count() - 1);
    }

    #[test]
    fn abbreviations_and_initials_do_not_split() {
        assert_eq!(
            sentences("Ask Dr. Smith about John F. Kennedy now. Then leave."),
            vec!["Ask Dr. Smith about John F. Kennedy now. ", "Then leave."]
        );
        assert_eq!(
            sentences("J. R. R. Tolkien wrote it. "),
            vec!["J. R. R. Tolkien wrote it. "]
        );
    }

    #[test]
    fn pronoun_and_trailing_capitals_still_end_sentences() {
        assert_eq!(
            sentences("Nobody came but only I. Then the lecture started. "),
            vec!["Nobody came but only I. ", "Then the lecture started. "]
        );
        assert_eq!(
            sentences("We fell back to plan B. Everything worked. "),
            vec!["We fell back to plan B. ", "Everything worked. "]
        );
    }

    #[test]
    fn only_one_separator_joins_the_closing_sentence() {
        assert_eq!(sentences("One.   Two."), vec!["One. ", "  Two."]);
        assert_eq!(sentences("One.   "), vec!["One.   "]);
    }

    #[test]
    fn extra_abbreviations_are_honoured() {
        let seg = PunctuationSegmenter::new(["Approx.", "Ch."]);
        let text = "See Ch. Four. Done.";
        let spans = seg.segment(text);
        assert_eq!(spans, vec![CharSpan::new(0, 13), CharSpan::new(14, 18)]);
    }

    #[test]
    fn lowercase_continuation_is_not_a_boundary() {
        assert_eq!(sentences("Wait... and then go. "), vec!["Wait... and then go. "]);
    }

    #[test]
    fn decimals_and_closing_quotes() {
        assert_eq!(
            sentences("It costs 3.50 dollars. \"Really?\" She asked."),
            vec!["It costs 3.50 dollars. ", "\"Really?\" ", "She asked."]
        );
    }

    #[test]
    fn text_without_terminal_is_one_span() {
        let spans = PunctuationSegmenter::default().segment("no punctuation at all ");
        assert_eq!(spans, vec![CharSpan::new(0, 21)]);
        assert!(PunctuationSegmenter::default().segment("").is_empty());
    }

    #[test]
    fn closures_are_segmenters() {
        let whole = |text: &str| vec![CharSpan::new(0, text.chars().count() - 1)];
        assert_eq!(whole.segment("abc"), vec![CharSpan::new(0, 2)]);
    }
}
