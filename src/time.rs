//! Duration string conversions
//!
//! Two distinct authored formats map to seconds:
//! - colon-delimited ("1:02:03"), used by region timestamps; right-to-left
//!   segments are seconds, minutes, hours, and so on at arbitrary depth
//! - letter-suffixed ("1h2m3s"), used only by `#t=` URL fragments

use crate::error::FormatError;

/// Parse a colon-delimited duration ("90", "1:30", "1:02:03") to seconds.
///
/// Segments are interpreted right-to-left, each one level deeper worth 60x
/// the previous, so depth is unbounded. Any non-numeric segment fails.
pub fn parse_colon_duration(s: &str) -> Result<f64, FormatError> {
    let mut seconds = 0.0;
    let mut multiplier = 1.0;

    for segment in s.rsplit(':') {
        let value: f64 = segment
            .parse()
            .map_err(|_| FormatError::InvalidDuration(s.to_string()))?;
        if !value.is_finite() {
            return Err(FormatError::InvalidDuration(s.to_string()));
        }
        seconds += value * multiplier;
        multiplier *= 60.0;
    }

    Ok(seconds)
}

/// Parse a `[<h>h][<m>m][<s>s]` duration ("1h2m3s", "45s") to seconds.
///
/// Every component is optional; a component counts only when both its
/// digits and its letter are present. An empty or match-free string is 0,
/// never an error.
#[must_use]
pub fn parse_letter_duration(s: &str) -> u64 {
    let mut seconds = 0;
    let mut rest = s;

    for (letter, multiplier) in [('h', 3600), ('m', 60), ('s', 1)] {
        if let Some((digits, tail)) = rest.split_once(letter) {
            if let Ok(value) = digits.parse::<u64>() {
                seconds += value * multiplier;
            }
            rest = tail;
        }
    }

    seconds
}

/// Format seconds as a colon duration ("4:05", "1:02:03").
///
/// Fractional seconds are rounded; negative input formats as zero.
#[must_use]
pub fn format_colon_duration(seconds: f64) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total = seconds.max(0.0).round() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}
