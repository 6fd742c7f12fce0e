use anyhow::{Context, Result, anyhow};
use std::{fs, path::Path};

use subtitle_realign::{
    config::Config,
    formats::{self, Format, txt::write_text_only},
    model::{Segment, Transcript},
    realign::realign,
    translate::{LineFileTranslator, translate_segments},
};

use crate::cli::{ExtractCmd, IoArgs, RealignCmd};

pub fn run_realign(cmd: RealignCmd, cfg: &Config) -> Result<()> {
    let span = tracing::info_span!("realign_cmd", input = cmd.io.input.as_str(), to = ?cmd.to);
    let _g = span.enter();

    let (transcript, input_format) = read_transcript(&cmd.io)?;
    let mut segments = realign_transcript(&transcript, &cmd.io, cfg)?;

    let source_language = transcript
        .meta
        .language
        .clone()
        .unwrap_or_else(|| cfg.realign.source_language.clone());
    let mut language = source_language.clone();

    if let Some(path) = &cmd.translations {
        let target = cmd
            .target_language
            .clone()
            .or_else(|| cfg.realign.target_language.clone())
            .ok_or_else(|| {
                anyhow!("--translations needs --target-language or realign.target_language")
            })?;

        let mut translator = LineFileTranslator::load(path)?;
        translate_segments(
            &mut segments,
            &mut translator,
            Some(source_language.as_str()),
            target.as_str(),
            cfg.translation.batch_size,
        )?;
        if translator.remaining() > 0 {
            tracing::warn!(
                unused = translator.remaining(),
                "translation file has more lines than segments"
            );
        }
        language = target;
    }

    let to = cmd.to.unwrap_or(match input_format {
        Format::Srt => Format::Srt,
        _ => Format::Vtt,
    });
    let rendered = formats::render_any(&segments, to, Some(language.as_str()), cfg)?;

    emit(&cmd.io, "sentences", to.extension(), &rendered)
}

pub fn run_extract(cmd: ExtractCmd, cfg: &Config) -> Result<()> {
    let span = tracing::info_span!("extract_cmd", input = cmd.io.input.as_str());
    let _g = span.enter();

    let (transcript, _) = read_transcript(&cmd.io)?;
    let segments = realign_transcript(&transcript, &cmd.io, cfg)?;

    emit(&cmd.io, "sentences", "txt", &write_text_only(&segments))
}

fn read_transcript(io: &IoArgs) -> Result<(Transcript, Format)> {
    let input_format = io.from.unwrap_or_else(|| Format::infer(&io.input));
    tracing::info!(?input_format, "input format selected");

    let raw = read_input_to_string(&io.input)?;
    tracing::info!(bytes = raw.len(), "read input");

    let mut transcript = formats::parse_any(&raw, input_format)
        .with_context(|| format!("failed parsing input as {:?}", input_format))?;
    transcript.meta.source = Some(io.input.clone());
    Ok((transcript, input_format))
}

fn realign_transcript(
    transcript: &Transcript,
    io: &IoArgs,
    cfg: &Config,
) -> Result<Vec<Segment>> {
    tracing::info!(
        source = transcript.meta.source.as_deref().unwrap_or("-"),
        cues = transcript.cues.len(),
        duration_ms = transcript.duration_ms(),
        "transcript summary"
    );

    let segmenter = cfg.segmenter.build();
    let mut opts = cfg.realign.options(&segmenter);
    if let Some(n) = io.min_sentence_length {
        opts.min_sentence_length = n;
    }

    let segments = realign(&transcript.cues, &opts).context("realignment failed")?;
    log_segment_samples(&segments, cfg);
    Ok(segments)
}

fn read_input_to_string(input: &str) -> Result<String> {
    if input == "-" {
        use std::io::Read;
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        fs::read_to_string(input).with_context(|| format!("failed reading input: {input}"))
    }
}

fn log_segment_samples(segments: &[Segment], cfg: &Config) {
    if tracing::enabled!(tracing::Level::DEBUG) {
        let n = cfg.logging.debug_segment_samples.min(segments.len());
        for (i, s) in segments.iter().take(n).enumerate() {
            tracing::debug!(
                idx = i,
                start_ms = s.start_ms,
                end_ms = s.end_ms,
                chars = s.char_len(),
                text = s.text.as_str(),
                "segment sample"
            );
        }
    }
}

fn emit(io: &IoArgs, suffix: &str, extension: &str, rendered: &str) -> Result<()> {
    if io.stdout {
        print!("{rendered}");
        tracing::info!(mode = "stdout", "wrote output");
        return Ok(());
    }

    let out_path = derive_output_path(io, suffix, extension)?;
    write_output(&out_path, rendered, io.overwrite)?;
    tracing::info!(path = out_path.as_str(), "wrote output file");
    Ok(())
}

fn derive_output_path(io: &IoArgs, suffix: &str, extension: &str) -> Result<String> {
    if let Some(o) = &io.output {
        return Ok(o.clone());
    }

    if io.input == "-" {
        return Err(anyhow!(
            "output path required when input is stdin and --stdout is not set"
        ));
    }

    let p = Path::new(&io.input);
    let stem = p
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| anyhow!("bad input filename"))?;

    let parent = p.parent().unwrap_or_else(|| Path::new("."));
    let out = parent.join(format!("{stem}.{suffix}.{extension}"));
    Ok(out.to_string_lossy().to_string())
}

fn write_output(path: &str, data: &str, overwrite: bool) -> Result<()> {
    if Path::new(path).exists() && !overwrite {
        return Err(anyhow!(
            "refusing to overwrite existing file (pass --overwrite): {path}"
        ));
    }
    fs::write(path, data).with_context(|| format!("failed writing output: {path}"))?;
    Ok(())
}
