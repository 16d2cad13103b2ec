// Copyright 2015 Axel Rasmussen
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Duration flags use a compact textual form: a sequence of decimal numbers,
//! each with an optional fraction and a mandatory unit suffix, such as
//! "300ms", "1.5h" or "2h45m".

use crate::error::*;
use std::time::Duration;

const NANOSECOND: u64 = 1;
const MICROSECOND: u64 = 1000 * NANOSECOND;
const MILLISECOND: u64 = 1000 * MICROSECOND;
const SECOND: u64 = 1000 * MILLISECOND;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;

/// The largest duration we accept, in nanoseconds. This keeps durations
/// interchangeable with signed 64-bit nanosecond counts.
const MAX_NANOS: u128 = i64::MAX as u128;

fn unit_nanos(unit: &str) -> Option<u64> {
    Some(match unit {
        "ns" => NANOSECOND,
        "us" | "\u{00b5}s" | "\u{03bc}s" => MICROSECOND,
        "ms" => MILLISECOND,
        "s" => SECOND,
        "m" => MINUTE,
        "h" => HOUR,
        _ => return None,
    })
}

/// Split off the leading run of ASCII digits.
fn take_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

/// Parse a duration string like "1h30m" or "0.5s".
pub fn parse_duration(s: &str) -> ValueResult<Duration> {
    let mut rest = s;
    let mut negative = false;
    if let Some(r) = rest.strip_prefix('-') {
        negative = true;
        rest = r;
    } else if let Some(r) = rest.strip_prefix('+') {
        rest = r;
    }

    if rest == "0" {
        return Ok(Duration::from_secs(0));
    }
    if rest.is_empty() {
        return Err(ValueError::Syntax);
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let (whole, r) = take_digits(rest);
        rest = r;
        let mut fraction = "";
        if let Some(r) = rest.strip_prefix('.') {
            let (f, r) = take_digits(r);
            fraction = f;
            rest = r;
        }
        if whole.is_empty() && fraction.is_empty() {
            return Err(ValueError::Syntax);
        }

        let unit_end = rest
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(rest.len());
        let (unit, r) = rest.split_at(unit_end);
        rest = r;
        let unit = unit_nanos(unit).ok_or(ValueError::Syntax)?;

        let whole: u128 = match whole.is_empty() {
            true => 0,
            false => whole.parse::<u128>().map_err(|_| ValueError::Range)?,
        };
        let mut nanos = whole
            .checked_mul(unit as u128)
            .ok_or(ValueError::Range)?;
        if !fraction.is_empty() {
            let scale = 10f64.powi(fraction.len() as i32);
            let f: f64 = fraction.parse::<f64>().map_err(|_| ValueError::Syntax)?;
            nanos += (f * (unit as f64 / scale)) as u128;
        }

        total = total.checked_add(nanos).ok_or(ValueError::Range)?;
        if total > MAX_NANOS {
            return Err(ValueError::Range);
        }
    }

    if negative && total != 0 {
        return Err(ValueError::NegativeDuration);
    }
    Ok(Duration::from_nanos(total as u64))
}

/// Render `v / 10^prec` with trailing fractional zeros removed.
fn format_fraction(v: u64, prec: u32) -> String {
    let divisor = 10u64.pow(prec);
    let whole = v / divisor;
    let frac = v % divisor;
    if frac == 0 {
        return whole.to_string();
    }
    let digits = format!("{:0width$}", frac, width = prec as usize);
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}

/// Format a duration the same way parse_duration reads it, e.g. "1h2m3.5s".
pub fn format_duration(d: &Duration) -> String {
    let nanos = d.as_nanos().min(u64::MAX as u128) as u64;
    if nanos == 0 {
        return "0s".to_owned();
    }
    if nanos < MICROSECOND {
        return format!("{}ns", nanos);
    }
    if nanos < MILLISECOND {
        return format!("{}\u{00b5}s", format_fraction(nanos, 3));
    }
    if nanos < SECOND {
        return format!("{}ms", format_fraction(nanos, 6));
    }

    let seconds = format_fraction(nanos % MINUTE, 9);
    let minutes = (nanos / MINUTE) % 60;
    let hours = nanos / HOUR;
    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
