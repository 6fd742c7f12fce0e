use anyhow::{Result, anyhow};
use clap::ValueEnum;
use std::path::Path;

use crate::{
    config::Config,
    model::{Cue, Segment, Transcript},
};

pub mod json;
pub mod srt;
pub mod time;
pub mod txt;
pub mod vtt;

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Format {
    Srt,
    Vtt,
    Txt,
    Json,
}

impl Format {
    pub fn extension(self) -> &'static str {
        match self {
            Format::Srt => "srt",
            Format::Vtt => "vtt",
            Format::Txt => "txt",
            Format::Json => "json",
        }
    }

    /// Guess from the file extension; stdin and unknown extensions sniff as TXT.
    pub fn infer(input: &str) -> Format {
        if input == "-" {
            return Format::Txt;
        }
        match Path::new(input)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase()
            .as_str()
        {
            "srt" => Format::Srt,
            "vtt" => Format::Vtt,
            "json" => Format::Json,
            _ => Format::Txt,
        }
    }
}

pub fn parse_any(raw: &str, fmt: Format) -> Result<Transcript> {
    let trimmed = raw.trim_start();
    if fmt == Format::Txt && (trimmed.starts_with('{') || trimmed.starts_with('[')) {
        tracing::info!("input looks like JSON; attempting JSON parse");
        if let Ok(t) = json::parse_json(raw) {
            return Ok(t);
        }
    }
    if fmt == Format::Txt && trimmed.starts_with("WEBVTT") {
        tracing::info!("input looks like WebVTT");
        return parse_srt_or_vtt(raw, Format::Vtt);
    }

    match fmt {
        Format::Srt | Format::Vtt => parse_srt_or_vtt(raw, fmt),
        Format::Txt => txt::parse_txt(raw),
        Format::Json => json::parse_json(raw),
    }
}

fn parse_srt_or_vtt(raw: &str, fmt: Format) -> Result<Transcript> {
    let vtt_first = fmt == Format::Vtt;
    for want_vtt in [vtt_first, !vtt_first] {
        let plain = if want_vtt {
            raw.parse::<aspasia::WebVttSubtitle>()
                .ok()
                .map(|vtt| aspasia::PlainSubtitle::from(&vtt))
        } else {
            raw.parse::<aspasia::SubRipSubtitle>()
                .ok()
                .map(|srt| aspasia::PlainSubtitle::from(&srt))
        };

        if let Some(plain) = plain {
            tracing::info!(
                parsed_as = if want_vtt { "vtt" } else { "srt" },
                fallback = want_vtt != vtt_first,
                "parsed subtitle via aspasia"
            );
            return Ok(plain_to_transcript(&plain));
        }
    }

    Err(anyhow!("failed to parse as SRT or VTT"))
}

fn plain_to_transcript(plain: &aspasia::PlainSubtitle) -> Transcript {
    let cues: Vec<Cue> = plain
        .events()
        .iter()
        .map(|e| Cue::new(moment_to_ms(&e.start), moment_to_ms(&e.end), e.text.clone()))
        .collect();

    Transcript::new(cues)
}

fn moment_to_ms(m: &aspasia::Moment) -> i64 {
    let h = m.hours();
    let min = m.minutes();
    let s = m.seconds();
    let ms = m.ms();
    (((h * 60 + min) * 60 + s) * 1000 + ms) as i64
}

pub fn render_any(
    segments: &[Segment],
    fmt: Format,
    language: Option<&str>,
    cfg: &Config,
) -> Result<String> {
    match fmt {
        Format::Srt => Ok(srt::write_srt(segments, cfg)),
        Format::Vtt => Ok(vtt::write_vtt(segments, language.unwrap_or(""), cfg)),
        Format::Txt => Ok(txt::write_txt(segments, cfg)),
        Format::Json => json::write_json(
            segments,
            language,
            cfg.formats.json.time_units.as_str(),
            cfg.formats.json.wrapped,
        ),
    }
}

/// Wrap caption text to `width` columns; zero keeps it on one line.
pub(crate) fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let text = text.trim();
    if width == 0 {
        return vec![text.to_string()];
    }
    textwrap::wrap(text, width)
        .into_iter()
        .map(|l| l.into_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_format_from_extension() {
        assert_eq!(Format::infer("talk.en.vtt"), Format::Vtt);
        assert_eq!(Format::infer("talk.SRT"), Format::Srt);
        assert_eq!(Format::infer("-"), Format::Txt);
        assert_eq!(Format::infer("notes"), Format::Txt);
    }

    #[test]
    fn txt_input_that_is_json_is_sniffed() -> Result<()> {
        let t = parse_any(r#"[{"start": 0, "end": 10, "text": "hi"}]"#, Format::Txt)?;
        assert_eq!(t.cues.len(), 1);
        Ok(())
    }

    #[test]
    fn zero_width_keeps_one_line() {
        assert_eq!(wrap_lines(" a b c ", 0), vec!["a b c"]);
        assert_eq!(wrap_lines("aaa bbb", 3), vec!["aaa", "bbb"]);
    }
}
