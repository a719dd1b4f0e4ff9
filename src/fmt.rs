use std::fmt::{Debug, Display, Formatter};

use crate::quantity::time::Hours;

/// Duration rendered as `HH:MM:SS`, or `--:--:--` when it is unknown.
pub struct FormattedDuration(pub Hours);

impl Debug for FormattedDuration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for FormattedDuration {
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if !self.0.is_finite() || self.0 < Hours::ZERO {
            return write!(f, "--:--:--");
        }
        let total_seconds = (self.0.0 * 3600.0).floor() as u64;
        write!(
            f,
            "{:02}:{:02}:{:02}",
            total_seconds / 3600,
            (total_seconds % 3600) / 60,
            total_seconds % 60,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_hours() {
        assert_eq!(FormattedDuration(Hours(24.5)).to_string(), "24:30:00");
        assert_eq!(FormattedDuration(Hours(1.0 / 3600.0 * 61.5)).to_string(), "00:01:01");
    }

    #[test]
    fn formats_zero() {
        assert_eq!(FormattedDuration(Hours::ZERO).to_string(), "00:00:00");
    }

    #[test]
    fn formats_unknown() {
        assert_eq!(FormattedDuration(Hours(f64::INFINITY)).to_string(), "--:--:--");
        assert_eq!(FormattedDuration(Hours(f64::NAN)).to_string(), "--:--:--");
        assert_eq!(FormattedDuration(Hours(-1.0)).to_string(), "--:--:--");
    }
}
