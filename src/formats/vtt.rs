use crate::{config::Config, formats::time::format_vtt_timestamp, model::Segment};

use super::wrap_lines;

/// Render segments as WebVTT: a header naming kind and language, then one
/// `start --> end` block per segment.
pub fn write_vtt(segments: &[Segment], language: &str, cfg: &Config) -> String {
    let offset = cfg.output.timestamp_offset_ms;
    let mut out = String::from("WEBVTT\n");
    if !cfg.formats.vtt.kind.is_empty() {
        out.push_str(&format!("Kind: {}\n", cfg.formats.vtt.kind));
    }
    if !language.is_empty() {
        out.push_str(&format!("Language: {language}\n"));
    }
    out.push('\n');

    for seg in segments {
        out.push_str(&format!(
            "{} --> {}\n",
            format_vtt_timestamp(seg.start_ms + offset),
            format_vtt_timestamp(seg.end_ms + offset)
        ));
        for line in wrap_lines(&seg.text, cfg.formats.vtt.wrap_width) {
            out.push_str(&line);
            out.push('\n');
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_header_then_blocks() {
        let cfg = Config::default();
        let out = write_vtt(
            &[
                Segment::new(3_689, 7_388, "First sentence goes here."),
                Segment::new(7_388, 10_436, "Second sentence goes here."),
            ],
            "en",
            &cfg,
        );
        assert_eq!(
            out,
            "WEBVTT\nKind: captions\nLanguage: en\n\n\
             00:00:03.689 --> 00:00:07.388\nFirst sentence goes here.\n\n\
             00:00:07.388 --> 00:00:10.436\nSecond sentence goes here.\n\n"
        );
    }

    #[test]
    fn empty_language_and_kind_are_omitted() {
        let mut cfg = Config::default();
        cfg.formats.vtt.kind.clear();
        assert_eq!(write_vtt(&[], "", &cfg), "WEBVTT\n\n");
    }
}
