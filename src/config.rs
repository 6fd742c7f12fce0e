use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::{
    merge::DEFAULT_MIN_SENTENCE_LENGTH,
    realign::RealignOptions,
    segmenter::{PunctuationSegmenter, SentenceSegmenter},
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: Logging,
    pub realign: RealignCfg,
    pub segmenter: SegmenterCfg,
    pub translation: TranslationCfg,
    pub output: OutputCfg,
    pub formats: Formats,
}

impl Config {
    pub fn load(path_opt: Option<&Path>) -> Result<Self> {
        let default_path = Path::new("config.toml");
        let path = if let Some(p) = path_opt {
            Some(p)
        } else if default_path.exists() {
            Some(default_path)
        } else {
            None
        };

        let Some(path) = path else {
            return Ok(Config::default());
        };

        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed reading config file: {}", path.display()))?;
        Self::from_toml(&raw)
            .with_context(|| format!("failed parsing TOML config: {}", path.display()))
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn to_toml_pretty(&self) -> Result<String> {
        let s = toml::to_string_pretty(self).context("failed serializing config as TOML")?;
        Ok(s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Logging {
    pub level: String,
    pub format: String,
    pub debug_segment_samples: usize,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            debug_segment_samples: 20,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RealignCfg {
    pub min_sentence_length: usize,
    pub keep_short_first: bool,
    pub source_language: String,
    pub target_language: Option<String>,
}

impl Default for RealignCfg {
    fn default() -> Self {
        Self {
            min_sentence_length: DEFAULT_MIN_SENTENCE_LENGTH,
            keep_short_first: true,
            source_language: "en".to_string(),
            target_language: None,
        }
    }
}

impl RealignCfg {
    pub fn options<'a>(&self, segmenter: &'a dyn SentenceSegmenter) -> RealignOptions<'a> {
        RealignOptions {
            min_sentence_length: self.min_sentence_length,
            keep_short_first: self.keep_short_first,
            source_language: Some(self.source_language.clone()),
            target_language: self.target_language.clone(),
            segmenter,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterCfg {
    /// Added to the built-in abbreviation list, e.g. `["approx", "ch"]`.
    pub extra_abbreviations: Vec<String>,
}

impl SegmenterCfg {
    pub fn build(&self) -> PunctuationSegmenter {
        PunctuationSegmenter::new(&self.extra_abbreviations)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationCfg {
    pub batch_size: usize,
}

impl Default for TranslationCfg {
    fn default() -> Self {
        Self { batch_size: 50 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputCfg {
    pub timestamp_offset_ms: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Formats {
    pub srt: SrtCfg,
    pub vtt: VttCfg,
    pub txt: TxtCfg,
    pub json: JsonCfg,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SrtCfg {
    /// Zero disables wrapping; sentences then stay on one line.
    pub wrap_width: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VttCfg {
    pub wrap_width: usize,
    pub kind: String,
}

impl Default for VttCfg {
    fn default() -> Self {
        Self {
            wrap_width: 0,
            kind: "captions".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TxtCfg {
    pub mode: String,
}

impl Default for TxtCfg {
    fn default() -> Self {
        Self {
            mode: "timestamp_range".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonCfg {
    pub time_units: String,
    pub wrapped: bool,
}

impl Default for JsonCfg {
    fn default() -> Self {
        Self {
            time_units: "seconds".to_string(),
            wrapped: true,
        }
    }
}

pub fn init_tracing(logging: &Logging, cli_override_level: Option<&str>) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt};

    let level = cli_override_level.unwrap_or(logging.level.as_str());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let is_json = logging.format.to_lowercase() == "json";

    // Logs go to stderr so `--stdout` output stays clean.
    if is_json {
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .event_format(fmt::format().json())
            .with_target(true)
            .try_init()
            .map_err(|e| anyhow::anyhow!(e))?;
    } else {
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .pretty()
            .try_init()
            .map_err(|e| anyhow::anyhow!(e))?;
    }

    tracing::info!(
        level = level,
        format = logging.format.as_str(),
        "logging initialized"
    );

    Ok(())
}
