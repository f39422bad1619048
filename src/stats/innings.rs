use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// Innings pitched, held as outs and shown as `whole.thirds` (`6.2` = 6⅔)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Innings {
    outs: u32,
}

impl Innings {
    pub fn from_outs(outs: u32) -> Self {
        Self { outs }
    }

    /// Parse the `.1`/`.2` notation. A thirds digit of 3 carries into the
    /// next whole inning; unreadable input is zero innings.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));

        let whole: u32 = whole.parse().unwrap_or(0);
        let thirds = fraction
            .chars()
            .next()
            .and_then(|c| c.to_digit(10))
            .unwrap_or(0);

        Self::from_outs(whole.saturating_mul(3).saturating_add(thirds))
    }

    /// Same as [`Innings::parse`] for a value already coerced to a float
    pub fn from_number(value: f64) -> Self {
        if !value.is_finite() || value <= 0.0 {
            return Self::default();
        }
        let whole = value.trunc();
        let thirds = ((value - whole) * 10.0).round();
        Self::from_outs((whole as u32).saturating_mul(3).saturating_add(thirds as u32))
    }

    pub fn outs(&self) -> u32 {
        self.outs
    }

    /// Workload weight: 5.1 innings is 5.333…
    pub fn as_decimal(&self) -> f64 {
        f64::from(self.outs) / 3.0
    }
}

impl Add for Innings {
    type Output = Innings;

    fn add(self, other: Innings) -> Innings {
        Innings::from_outs(self.outs.saturating_add(other.outs))
    }
}

impl fmt::Display for Innings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.outs / 3, self.outs % 3)
    }
}

impl From<String> for Innings {
    fn from(value: String) -> Self {
        Innings::parse(&value)
    }
}

impl From<Innings> for String {
    fn from(value: Innings) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_thirds_notation() {
        assert_eq!(Innings::parse("5.1").outs(), 16);
        assert_eq!(Innings::parse("6.2").outs(), 20);
        assert_eq!(Innings::parse("7").outs(), 21);
        assert_eq!(Innings::parse("").outs(), 0);
    }

    #[test]
    fn thirds_carry_into_whole_innings() {
        let total = Innings::parse("5.1") + Innings::parse("6.2");
        assert_eq!(total.to_string(), "12.0");

        assert_eq!(Innings::parse("4.3").to_string(), "5.0");
        assert_eq!((Innings::parse("0.2") + Innings::parse("0.2")).to_string(), "1.1");
    }

    #[test]
    fn from_number_matches_text_parse() {
        assert_eq!(Innings::from_number(5.1), Innings::parse("5.1"));
        assert_eq!(Innings::from_number(6.2), Innings::parse("6.2"));
        assert_eq!(Innings::from_number(12.0), Innings::parse("12.0"));
    }

    #[test]
    fn huge_values_clamp_to_max_outs() {
        assert_eq!(Innings::parse("2000000000").outs(), u32::MAX);
        assert_eq!(Innings::from_number(2_000_000_000.0).outs(), u32::MAX);
        assert_eq!(Innings::from_number(f64::MAX).outs(), u32::MAX);

        let total = Innings::from_outs(u32::MAX) + Innings::parse("1.1");
        assert_eq!(total.outs(), u32::MAX);
    }

    #[test]
    fn decimal_weight_uses_thirds() {
        let ip = Innings::parse("5.1");
        assert!((ip.as_decimal() - 16.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn serializes_as_display_string() {
        let json = serde_json::to_string(&Innings::parse("6.2")).unwrap();
        assert_eq!(json, "\"6.2\"");

        let back: Innings = serde_json::from_str("\"6.2\"").unwrap();
        assert_eq!(back.outs(), 20);
    }
}
