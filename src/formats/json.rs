use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{Cue, Segment, Transcript};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WrappedJson {
    pub schema: String,
    pub version: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub segments: Vec<JsonSegment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSegment {
    pub start: Value,
    pub end: Value,
    pub text: String,
}

pub fn write_json(
    segments: &[Segment],
    language: Option<&str>,
    time_units: &str,
    wrapped: bool,
) -> Result<String> {
    let items: Vec<JsonSegment> = segments
        .iter()
        .map(|s| JsonSegment {
            start: encode_time(s.start_ms, time_units),
            end: encode_time(s.end_ms, time_units),
            text: s.text.clone(),
        })
        .collect();

    if wrapped {
        let w = WrappedJson {
            schema: "subtitle-realign.sentences".to_string(),
            version: 1,
            language: language.map(str::to_string),
            segments: items,
        };
        Ok(serde_json::to_string_pretty(&w)?)
    } else {
        Ok(serde_json::to_string_pretty(&items)?)
    }
}

fn encode_time(ms: i64, units: &str) -> Value {
    match units {
        "ms" => Value::from(ms),
        _ => Value::from((ms as f64) / 1000.0),
    }
}

/// Accepts `{"cues": [...]}`, `{"segments": [...]}` or a bare array of
/// `{start, end, text}` objects; times may be ms, seconds or timestamps.
pub fn parse_json(input: &str) -> Result<Transcript> {
    let v: Value = serde_json::from_str(input)?;

    let items = v
        .get("cues")
        .or_else(|| v.get("segments"))
        .unwrap_or(&v)
        .as_array()
        .ok_or_else(|| anyhow!("unrecognized JSON transcript shape"))?;

    let mut cues: Vec<Cue> = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let obj = item
            .as_object()
            .ok_or_else(|| anyhow!("cue #{i} must be an object"))?;

        let start = obj
            .get("start")
            .ok_or_else(|| anyhow!("cue #{i} missing start"))?;
        let end = obj
            .get("end")
            .ok_or_else(|| anyhow!("cue #{i} missing end"))?;
        let start_ms = decode_time_to_ms(start)?;
        let end_ms = decode_time_to_ms(end)?;
        let text = obj.get("text").and_then(|x| x.as_str()).unwrap_or("");

        cues.push(Cue::new(start_ms, end_ms, text));
    }

    let mut t = Transcript::new(cues);
    t.meta.language = v
        .get("language")
        .and_then(|x| x.as_str())
        .map(str::to_string);
    Ok(t)
}

fn decode_time_to_ms(v: &Value) -> Result<i64> {
    match v {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i)
            } else if let Some(f) = n.as_f64() {
                Ok((f * 1000.0).round() as i64)
            } else {
                Err(anyhow!("bad numeric time"))
            }
        }
        Value::String(s) => crate::formats::time::parse_time_to_ms(s),
        _ => Err(anyhow!("unsupported time type")),
    }
}
