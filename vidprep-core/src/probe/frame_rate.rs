//! Frame-rate parsing and keyframe interval derivation.

use crate::utils::{Parsed, parse_or_default};

/// Parses a frame rate given as `num/den`, an integer, or a decimal.
///
/// Rational form is tried first since ffprobe reports rates as fractions
/// (`24000/1001`). Returns `Parsed::Defaulted(default)` for empty or
/// malformed input, a zero denominator, or a result that is not a positive
/// finite number.
pub fn parse_frame_rate(raw: &str, default: f64) -> Parsed<f64> {
    parse_or_default(raw, default, |s| {
        parse_rational(s)
            .or_else(|| parse_decimal(s))
            .filter(|fps| fps.is_finite() && *fps > 0.0)
    })
}

fn parse_rational(raw: &str) -> Option<f64> {
    let (num, den) = raw.trim().split_once('/')?;
    let num = num.trim().parse::<i64>().ok()?;
    let den = den.trim().parse::<i64>().ok()?;
    if den == 0 {
        return None;
    }
    Some(num as f64 / den as f64)
}

fn parse_decimal(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    // Rejects "inf", "nan" and friends, which `f64::from_str` accepts.
    if !raw
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'+' | b'-' | b'e' | b'E'))
    {
        return None;
    }
    raw.parse::<f64>().ok()
}

/// Keyframe interval of roughly half a second: `max(1, round(fps / 2))`.
///
/// Ties round to even (`f64::round_ties_even`), so 25 fps gives 12 and
/// 27 fps gives 14.
#[must_use]
pub fn derive_keyframe_interval(frame_rate: f64) -> u32 {
    let half = (frame_rate / 2.0).round_ties_even();
    if half.is_finite() && half >= 1.0 {
        half.min(f64::from(u32::MAX)) as u32
    } else {
        1
    }
}
