use crate::{
    classic,
    error::{Error, Result},
};
use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;
use std::{
    str::FromStr,
    time::{Duration, Instant},
};

lazy_static! {
    static ref SEGMENT: Regex = Regex::new(r"([0-9]+)([dDhHmMsS]+)[- _:/']*").unwrap();
}

/// Matching budget for a single token
pub const MATCH_TIMEOUT: Duration = Duration::from_millis(100);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Unit {
    None,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
}

impl Unit {
    /// Exact lookup, no case folding: `"H"` and greedy captures like `"dh"` are [`Unit::None`].
    pub fn from_suffix(suffix: &str) -> Self {
        match suffix {
            "d" => Self::Day,
            "h" => Self::Hour,
            "m" => Self::Minute,
            "s" => Self::Second,
            "ms" => Self::Millisecond,
            _ => Self::None,
        }
    }
}

/// One `(magnitude, unit)` pair matched in a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    pub magnitude: u64,
    pub unit: Unit,
    pub suffix: &'a str,
}

impl<'a> Segment<'a> {
    fn from_captures(captures: &regex::Captures<'a>) -> Result<Self> {
        let digits = captures[1].to_owned();
        let suffix = captures.get(2).map_or("", |m| m.as_str().trim());
        let magnitude = digits
            .parse()
            .map_err(|_| Error::Format { segment: digits })?;
        Ok(Self {
            magnitude,
            unit: Unit::from_suffix(suffix),
            suffix,
        })
    }

    fn secs(&self, per_unit: u64) -> Result<Duration> {
        let secs = self.magnitude.checked_mul(per_unit).ok_or(Error::Overflow)?;
        Ok(Duration::from_secs(secs))
    }

    pub fn to_duration(&self) -> Result<Duration> {
        match self.unit {
            Unit::Day => self.secs(86_400),
            Unit::Hour => self.secs(3_600),
            Unit::Minute => self.secs(60),
            Unit::Second => Ok(Duration::from_secs(self.magnitude)),
            Unit::Millisecond => Ok(Duration::from_millis(self.magnitude)),
            Unit::None => Err(Error::UnrecognizedUnit {
                unit: self.suffix.to_owned(),
            }),
        }
    }
}

/// Human friendly time interval, e.g. `"1h34m26s134ms"` or `"3d/12h_15m:12s---347ms"`.
///
/// Segments may be separated by any of `- _:/'`. Tokens containing a colon are
/// first tried as a classic `[d.]hh:mm:ss[.fffffff]` time span.
/// Only reading is supported, there is no string rendering.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeInterval(Duration);

impl TimeInterval {
    pub fn from_duration(duration: Duration) -> Self {
        Self(duration)
    }

    pub fn to_duration(self) -> Duration {
        self.0
    }

    pub fn parse(token: &str) -> Result<Duration> {
        Self::parse_within(token, MATCH_TIMEOUT)
    }

    fn parse_within(token: &str, budget: Duration) -> Result<Duration> {
        if token.contains(':') {
            if let Some(duration) = classic::parse(token) {
                debug!("Parsed {token:?} as classic time span: {duration:?}");
                return Ok(duration);
            }
            if classic::is_negative(token) {
                return Err(Error::Negative {
                    token: token.to_owned(),
                });
            }
        }

        let mut result = Duration::ZERO;
        scan(token, budget, |segment| {
            trace!("Segment of {token:?}: {segment:?}");
            result = result
                .checked_add(segment.to_duration()?)
                .ok_or(Error::Overflow)?;
            Ok(())
        })?;
        debug!("Parsed {token:?} as {result:?}");
        Ok(result)
    }

    /// Segments matched in `token`, under the same budget as [`TimeInterval::parse`].
    /// Unrecognized units are returned as [`Unit::None`] rather than failing.
    pub fn segments(token: &str) -> Result<Vec<Segment<'_>>> {
        let mut segments = Vec::new();
        scan(token, MATCH_TIMEOUT, |segment| {
            segments.push(segment);
            Ok(())
        })?;
        Ok(segments)
    }
}

fn check_budget(start: Instant, budget: Duration) -> Result<()> {
    if start.elapsed() >= budget {
        return Err(Error::Timeout {
            millis: budget.as_millis() as u64,
        });
    }
    Ok(())
}

// The budget is checked before every segment and once more after the last search.
fn scan<'t>(
    token: &'t str,
    budget: Duration,
    mut f: impl FnMut(Segment<'t>) -> Result<()>,
) -> Result<()> {
    let start = Instant::now();
    for captures in SEGMENT.captures_iter(token) {
        check_budget(start, budget)?;
        f(Segment::from_captures(&captures)?)?;
    }
    check_budget(start, budget)
}

impl From<Duration> for TimeInterval {
    fn from(value: Duration) -> Self {
        Self::from_duration(value)
    }
}

impl From<TimeInterval> for Duration {
    fn from(value: TimeInterval) -> Self {
        value.to_duration()
    }
}

impl FromStr for TimeInterval {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).map(Self)
    }
}

impl<'de> serde::Deserialize<'de> for TimeInterval {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        crate::serde_interval::deserialize(deserializer).map(Self)
    }
}
