use anyhow::{Result, anyhow};

pub fn format_srt_timestamp(ms: i64) -> String {
    format_timestamp(ms, ',')
}

pub fn format_vtt_timestamp(ms: i64) -> String {
    format_timestamp(ms, '.')
}

/// `HH:MM:SS<sep>mmm`; negative times clamp to zero.
fn format_timestamp(ms_in: i64, ms_sep: char) -> String {
    let ms = ms_in.max(0);

    let milli = ms % 1000;
    let total_seconds = ms / 1000;
    let sec = total_seconds % 60;
    let total_minutes = total_seconds / 60;
    let min = total_minutes % 60;
    let hour = total_minutes / 60;

    format!("{hour:02}:{min:02}:{sec:02}{ms_sep}{milli:03}")
}

/// Accepts plain milliseconds, fractional seconds, `HH:MM:SS.mmm`,
/// `HH:MM:SS,mmm` and the short WebVTT form `MM:SS.mmm`.
pub fn parse_time_to_ms(s: &str) -> Result<i64> {
    let t = s.trim();

    if let Ok(v) = t.parse::<i64>() {
        return Ok(v);
    }

    if let Ok(v) = t.parse::<f64>() {
        return Ok((v * 1000.0).round() as i64);
    }

    let (hms, frac) = match t.rsplit_once(|c: char| c == ',' || c == '.') {
        Some((a, b)) => (a, Some(b)),
        None => (t, None),
    };

    let parts: Vec<&str> = hms.split(':').collect();
    let (h, m, sec) = match parts.as_slice() {
        [h, m, s] => (*h, *m, *s),
        [m, s] => ("0", *m, *s),
        _ => return Err(anyhow!("unrecognized timestamp: '{t}'")),
    };

    let h: i64 = h.parse().map_err(|_| anyhow!("bad hours: '{t}'"))?;
    let m: i64 = m.parse().map_err(|_| anyhow!("bad minutes: '{t}'"))?;
    let sec: i64 = sec.parse().map_err(|_| anyhow!("bad seconds: '{t}'"))?;

    let mut ms = ((h * 60 + m) * 60 + sec) * 1000;

    if let Some(frac) = frac {
        let digits: String = frac.trim().chars().chain("000".chars()).take(3).collect();
        let milli: i64 = digits
            .parse()
            .map_err(|_| anyhow!("bad milliseconds: '{t}'"))?;
        ms += milli;
    }

    Ok(ms)
}

pub fn parse_time_range_arrow(line: &str) -> Result<(i64, i64)> {
    let (a, b) = line
        .split_once("-->")
        .ok_or_else(|| anyhow!("missing '-->' in time range: '{line}'"))?;
    let start = parse_time_to_ms(a.trim())?;
    let end = parse_time_to_ms(b.trim())?;
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_both_separators() {
        assert_eq!(format_vtt_timestamp(7_388), "00:00:07.388");
        assert_eq!(format_srt_timestamp(3_723_004), "01:02:03,004");
        assert_eq!(format_srt_timestamp(-5), "00:00:00,000");
    }

    #[test]
    fn parses_common_timestamp_shapes() -> Result<()> {
        assert_eq!(parse_time_to_ms("00:00:03.689")?, 3_689);
        assert_eq!(parse_time_to_ms("00:00:03,689")?, 3_689);
        assert_eq!(parse_time_to_ms("01:05.5")?, 65_500);
        assert_eq!(parse_time_to_ms("1500")?, 1_500);
        assert_eq!(parse_time_to_ms("2.25")?, 2_250);
        assert!(parse_time_to_ms("soon").is_err());
        Ok(())
    }

    #[test]
    fn parses_arrow_ranges() -> Result<()> {
        assert_eq!(
            parse_time_range_arrow("00:00:08.570 --> 00:00:10.436")?,
            (8_570, 10_436)
        );
        assert!(parse_time_range_arrow("00:00:08.570").is_err());
        Ok(())
    }
}
