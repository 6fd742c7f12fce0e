use crate::{config::Config, formats::time::format_srt_timestamp, model::Segment};

use super::wrap_lines;

pub fn write_srt(segments: &[Segment], cfg: &Config) -> String {
    let offset = cfg.output.timestamp_offset_ms;
    let mut out = String::new();

    for (i, seg) in segments.iter().enumerate() {
        out.push_str(&(i + 1).to_string());
        out.push('\n');

        out.push_str(&format!(
            "{} --> {}\n",
            format_srt_timestamp(seg.start_ms + offset),
            format_srt_timestamp(seg.end_ms + offset)
        ));

        for line in wrap_lines(&seg.text, cfg.formats.srt.wrap_width) {
            out.push_str(&line);
            out.push('\n');
        }

        out.push('\n');
    }

    out
}
