use std::fmt;

use serde::{Deserialize, Serialize};

/// A metric display string such as `"$184.4M"` split into the parts an animated
/// counter needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedMetric {
    pub number: f64,
    pub prefix: String,
    pub suffix: String,
}

/// Splits `input` into the text before the first digit, the number itself and
/// everything after it.
///
/// The number is a run of ASCII digits with at most one `.` followed by more
/// digits. Strings without any digit come back whole in `suffix` with a zero
/// number. Never fails.
pub fn parse_metric_value(input: &str) -> ParsedMetric {
    let bytes = input.as_bytes();
    let start = match bytes.iter().position(u8::is_ascii_digit) {
        Some(i) => i,
        None => {
            return ParsedMetric {
                number: 0.0,
                prefix: String::new(),
                suffix: input.to_string(),
            }
        }
    };

    let mut end = start + digit_run(&bytes[start..]);
    if bytes.get(end) == Some(&b'.') {
        let fraction = digit_run(&bytes[end + 1..]);
        if fraction > 0 {
            end += 1 + fraction;
        }
    }

    // digit runs are ASCII, so both slice points sit on char boundaries
    let number = input[start..end]
        .parse::<f64>()
        .map(|n| if n.is_finite() { n } else { f64::MAX })
        .unwrap_or(0.0);

    ParsedMetric {
        number,
        prefix: input[..start].to_string(),
        suffix: input[end..].to_string(),
    }
}

fn digit_run(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// `1 - (1 - t)^3`, the curve counters use to slow down near their target.
pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

impl ParsedMetric {
    /// Fractional digits in the shortest rendering of `number`.
    pub fn decimals(&self) -> usize {
        self.number
            .to_string()
            .split_once('.')
            .map(|(_, fraction)| fraction.len())
            .unwrap_or(0)
    }

    /// Display string for a counter that is `progress` of the way (0.0 to 1.0)
    /// through its animation.
    pub fn frame(&self, progress: f64) -> String {
        let progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        let value = if progress >= 1.0 {
            self.number
        } else {
            self.number * ease_out_cubic(progress)
        };
        format!(
            "{}{:.*}{}",
            self.prefix,
            self.decimals(),
            value,
            self.suffix
        )
    }
}

impl fmt::Display for ParsedMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.prefix, self.number, self.suffix)
    }
}

impl From<&str> for ParsedMetric {
    fn from(value: &str) -> Self {
        parse_metric_value(value)
    }
}
