use anyhow::{Result, anyhow};

use crate::{
    config::Config,
    formats::time::{format_vtt_timestamp, parse_time_range_arrow},
    model::{Cue, Segment, Transcript},
};

/// One line per segment. `text_only` mode is the plain sentence list handed to
/// external translation; otherwise each line is prefixed by its time range.
pub fn write_txt(segments: &[Segment], cfg: &Config) -> String {
    let text_only = cfg.formats.txt.mode.eq_ignore_ascii_case("text_only");
    write_lines(segments, text_only, cfg.output.timestamp_offset_ms)
}

pub fn write_text_only(segments: &[Segment]) -> String {
    write_lines(segments, true, 0)
}

fn write_lines(segments: &[Segment], text_only: bool, offset: i64) -> String {
    let mut out = String::new();

    for seg in segments {
        if !text_only {
            out.push_str(&format!(
                "[{} --> {}] ",
                format_vtt_timestamp(seg.start_ms + offset),
                format_vtt_timestamp(seg.end_ms + offset),
            ));
        }
        out.push_str(seg.text.trim());
        out.push('\n');
    }

    out
}

/// Read `[start --> end] text` lines. Blank lines are skipped; untimed lines are
/// rejected because realignment needs real cue timings.
pub fn parse_txt(input: &str) -> Result<Transcript> {
    let mut cues: Vec<Cue> = Vec::new();

    for (line_no, raw_line) in input.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        let (range, text) = line
            .strip_prefix('[')
            .and_then(|rest| rest.split_once(']'))
            .ok_or_else(|| anyhow!("TXT line {} has no [start --> end] prefix", line_no + 1))?;

        let (start, end) = parse_time_range_arrow(range.trim())?;
        cues.push(Cue::new(start, end, text.trim()));
    }

    Ok(Transcript::new(cues))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_timestamped_lines() -> Result<()> {
        let t = parse_txt(
            "[00:00:00.000 --> 00:00:04.881] Hey programmers\n\n[00:00:04.881 --> 00:00:10.436] on dynamic programming.\n",
        )?;
        assert_eq!(t.cues.len(), 2);
        assert_eq!(t.cues[1], Cue::new(4_881, 10_436, "on dynamic programming."));
        Ok(())
    }

    #[test]
    fn untimed_line_is_rejected() {
        let err = parse_txt("just words").unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn text_only_lists_sentences() {
        let segs = vec![Segment::new(0, 1, "One."), Segment::new(1, 2, " Two. ")];
        assert_eq!(write_text_only(&segs), "One.\nTwo.\n");

        let cfg = Config::default();
        assert_eq!(
            write_txt(&segs[..1], &cfg),
            "[00:00:00.000 --> 00:00:00.001] One.\n"
        );
    }
}
