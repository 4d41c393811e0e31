//! Standard colon-delimited time span format: `[d.]hh:mm[:ss[.fffffff]]`
//! and `d:hh:mm:ss[.fffffff]`.

use std::time::Duration;

const SECS_PER_DAY: u64 = 86_400;
// Largest day count a tick-based time span can hold
const MAX_DAYS: u64 = 10_675_199;
const FRACTION_DIGITS: usize = 7;
const NANOS_PER_TICK: u32 = 100;

fn field(s: &str, max_len: usize, max: u64) -> Option<u64> {
    if s.is_empty() || s.len() > max_len || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: u64 = s.parse().ok()?;
    (value <= max).then_some(value)
}

fn fraction_nanos(s: &str) -> Option<u32> {
    if s.is_empty() || s.len() > FRACTION_DIGITS || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Right-pad to ticks, so ".5" is half a second
    let ticks: u32 = format!("{s:0<width$}", width = FRACTION_DIGITS).parse().ok()?;
    Some(ticks * NANOS_PER_TICK)
}

/// Returns `None` for anything that is not a well-formed classic time span,
/// including signed input.
pub fn parse(token: &str) -> Option<Duration> {
    let token = token.trim();
    let last_colon = token.rfind(':')?;
    let (main, fraction) = match token.rfind('.') {
        Some(dot) if dot > last_colon => (&token[..dot], Some(&token[dot + 1..])),
        _ => (token, None),
    };
    let (days, clock) = match main.split_once('.') {
        Some((days, clock)) => (Some(days), clock),
        None => (None, main),
    };
    let fields: Vec<&str> = clock.split(':').collect();
    let (days, hours, minutes, seconds) = match (days, fields.as_slice()) {
        (days, [h, m]) => (days, *h, *m, None),
        (days, [h, m, s]) => (days, *h, *m, Some(*s)),
        (None, [d, h, m, s]) => (Some(*d), *h, *m, Some(*s)),
        _ => return None,
    };
    if fraction.is_some() && seconds.is_none() {
        return None;
    }

    let days = match days {
        Some(days) => field(days, 8, MAX_DAYS)?,
        None => 0,
    };
    let hours = field(hours, 2, 23)?;
    let minutes = field(minutes, 2, 59)?;
    let seconds = match seconds {
        Some(seconds) => field(seconds, 2, 59)?,
        None => 0,
    };
    let nanos = match fraction {
        Some(fraction) => fraction_nanos(fraction)?,
        None => 0,
    };

    let secs = days * SECS_PER_DAY + hours * 3600 + minutes * 60 + seconds;
    Some(Duration::new(secs, nanos))
}

/// A classic time span with a leading minus sign.
pub fn is_negative(token: &str) -> bool {
    token
        .trim()
        .strip_prefix('-')
        .map_or(false, |rest| parse(rest).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hours_minutes() {
        assert_eq!(parse("01:30"), Some(Duration::from_secs(90 * 60)));
        assert_eq!(parse("1:2"), Some(Duration::from_secs(3600 + 120)));
    }

    #[test]
    fn hours_minutes_seconds() {
        assert_eq!(parse("1:02:03"), Some(Duration::from_secs(3723)));
        assert_eq!(parse(" 00:00:07 "), Some(Duration::from_secs(7)));
    }

    #[test]
    fn days_prefix() {
        let expected = Duration::from_secs(2 * SECS_PER_DAY + 3 * 3600 + 4 * 60 + 5);
        assert_eq!(parse("2.03:04:05"), Some(expected));
        assert_eq!(parse("2:03:04:05"), Some(expected));
        assert_eq!(
            parse("2.03:04"),
            Some(Duration::from_secs(2 * SECS_PER_DAY + 3 * 3600 + 4 * 60))
        );
    }

    #[test]
    fn fraction_is_ticks() {
        assert_eq!(parse("00:00:01.5"), Some(Duration::from_millis(1500)));
        assert_eq!(parse("00:00:00.0000001"), Some(Duration::from_nanos(100)));
        assert_eq!(
            parse("1.00:00:00.25"),
            Some(Duration::from_secs(SECS_PER_DAY) + Duration::from_millis(250))
        );
    }

    #[test]
    fn negative_spans() {
        assert!(is_negative("-01:00:00"));
        assert!(is_negative(" -2.03:04 "));
        assert!(!is_negative("01:00:00"));
        assert!(!is_negative("-25:00"));
        assert!(!is_negative("--01:00"));
        assert!(!is_negative("-1h:30m"));
    }

    #[test]
    fn rejects_malformed() {
        for token in [
            "",
            "12",
            "24:00",
            "00:60",
            "00:00:60",
            "00:00.5",
            "00:00:00.12345678",
            "-01:00:00",
            "1:2:3:4:5",
            "a:b",
            "1h:2m",
            "3d/12h_15m:12s---347ms",
            "10675200.00:00:00",
        ] {
            assert_eq!(parse(token), None, "{token:?}");
        }
    }
}
