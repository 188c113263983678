//! Temporal primitives: teaching weekdays and times of day.
//!
//! # Time Model
//! A block lives on one [`Weekday`] between two [`TimeOfDay`] values with
//! minute resolution. Times never wrap past midnight.
//!
//! # Text Encoding
//! Times are read from a fixed-width `hh?mm` encoding: the first two
//! characters are the hour, the last two the minute, and whatever sits in
//! between is ignored (`"14:00"`, `"14.00"`, `"1400"`, `"14hs00"`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ModelError;

/// One of the six teaching days. There is no Sunday.
///
/// Serialized as its canonical name; deserialized through [`FromStr`], so
/// case and accents are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Weekday {
    /// Lunes.
    Monday,
    /// Martes.
    Tuesday,
    /// Miércoles.
    Wednesday,
    /// Jueves.
    Thursday,
    /// Viernes.
    Friday,
    /// Sábado.
    Saturday,
}

impl Weekday {
    /// All weekdays in calendar order.
    pub const ALL: [Weekday; 6] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Canonical upper-case name.
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "LUNES",
            Weekday::Tuesday => "MARTES",
            Weekday::Wednesday => "MIERCOLES",
            Weekday::Thursday => "JUEVES",
            Weekday::Friday => "VIERNES",
            Weekday::Saturday => "SABADO",
        }
    }

    /// Zero-based position in the week (Monday = 0).
    pub fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for Weekday {
    type Err = ModelError;

    /// Parses a weekday name, ignoring case, surrounding whitespace and the
    /// accents of `MIÉRCOLES` / `SÁBADO`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .trim()
            .chars()
            .map(|c| match c {
                'É' | 'é' => 'E',
                'Á' | 'á' => 'A',
                other => other.to_ascii_uppercase(),
            })
            .collect();

        Weekday::ALL
            .into_iter()
            .find(|day| day.name() == folded)
            .ok_or_else(|| ModelError::UnknownWeekday(s.trim().to_string()))
    }
}

impl TryFrom<String> for Weekday {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Weekday> for String {
    fn from(value: Weekday) -> Self {
        value.name().to_string()
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A wall-clock time with minute resolution.
///
/// Ordering is chronological. Serialized as `"hh:mm"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Creates a time, checking both components.
    pub fn new(hour: u32, minute: u32) -> Result<Self, ModelError> {
        if hour > 23 {
            return Err(ModelError::HourOutOfRange(hour));
        }
        if minute > 59 {
            return Err(ModelError::MinuteOutOfRange(minute));
        }
        Ok(Self {
            hour: hour as u8,
            minute: minute as u8,
        })
    }

    /// Parses the `hh?mm` encoding (see module docs).
    pub fn parse(text: &str) -> Result<Self, ModelError> {
        let trimmed = text.trim();
        let chars: Vec<char> = trimmed.chars().collect();
        if chars.len() < 4 {
            return Err(ModelError::TooShort(trimmed.to_string()));
        }

        let hour = two_digits(&chars[..2]);
        let minute = two_digits(&chars[chars.len() - 2..]);
        match (hour, minute) {
            (Some(hour), Some(minute)) => Self::new(hour, minute),
            _ => Err(ModelError::NotNumeric(trimmed.to_string())),
        }
    }

    /// Hour component (0-23).
    #[inline]
    pub fn hour(&self) -> u32 {
        u32::from(self.hour)
    }

    /// Minute component (0-59).
    #[inline]
    pub fn minute(&self) -> u32 {
        u32::from(self.minute)
    }

    /// Minutes elapsed since 00:00.
    #[inline]
    pub fn minutes_since_midnight(&self) -> u32 {
        self.hour() * 60 + self.minute()
    }

    /// Minutes from `self` until `later`. Zero if `later` is not after `self`.
    pub fn duration_until(&self, later: TimeOfDay) -> u32 {
        later
            .minutes_since_midnight()
            .saturating_sub(self.minutes_since_midnight())
    }
}

fn two_digits(chars: &[char]) -> Option<u32> {
    chars.iter().try_fold(0, |acc, c| c.to_digit(10).map(|d| acc * 10 + d))
}

impl FromStr for TimeOfDay {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_case_insensitive() {
        assert_eq!("lunes".parse::<Weekday>().unwrap(), Weekday::Monday);
        assert_eq!("  Jueves ".parse::<Weekday>().unwrap(), Weekday::Thursday);
        assert_eq!("SABADO".parse::<Weekday>().unwrap(), Weekday::Saturday);
    }

    #[test]
    fn test_weekday_accents() {
        assert_eq!("Miércoles".parse::<Weekday>().unwrap(), Weekday::Wednesday);
        assert_eq!("SÁBADO".parse::<Weekday>().unwrap(), Weekday::Saturday);
        assert_eq!(Weekday::Wednesday.to_string(), "MIERCOLES");
    }

    #[test]
    fn test_weekday_rejects_sunday() {
        let err = "domingo".parse::<Weekday>().unwrap_err();
        assert_eq!(err, ModelError::UnknownWeekday("domingo".into()));
        assert!("".parse::<Weekday>().is_err());
    }

    #[test]
    fn test_weekday_serde_uses_parse() {
        assert_eq!(serde_json::to_string(&Weekday::Wednesday).unwrap(), "\"MIERCOLES\"");
        let day: Weekday = serde_json::from_str("\"lunes\"").unwrap();
        assert_eq!(day, Weekday::Monday);
        let day: Weekday = serde_json::from_str("\" Sábado \"").unwrap();
        assert_eq!(day, Weekday::Saturday);
        assert!(serde_json::from_str::<Weekday>("\"domingo\"").is_err());
    }

    #[test]
    fn test_time_parse_separators() {
        for text in ["14:30", "14.30", "1430", " 14hs30 "] {
            let t = TimeOfDay::parse(text).unwrap();
            assert_eq!((t.hour(), t.minute()), (14, 30), "{text}");
        }
    }

    #[test]
    fn test_time_parse_too_short() {
        assert_eq!(
            TimeOfDay::parse(" 9:0 "),
            Err(ModelError::TooShort("9:0".into()))
        );
    }

    #[test]
    fn test_time_parse_not_numeric() {
        assert!(matches!(
            TimeOfDay::parse("9:00"),
            Err(ModelError::NotNumeric(_))
        ));
        assert!(matches!(
            TimeOfDay::parse("ab:cd"),
            Err(ModelError::NotNumeric(_))
        ));
        assert!(matches!(
            TimeOfDay::parse("+9:00"),
            Err(ModelError::NotNumeric(_))
        ));
    }

    #[test]
    fn test_time_out_of_range() {
        assert_eq!(TimeOfDay::parse("24:00"), Err(ModelError::HourOutOfRange(24)));
        assert_eq!(TimeOfDay::parse("10:60"), Err(ModelError::MinuteOutOfRange(60)));
        assert!(TimeOfDay::parse("23:59").is_ok());
        assert!(TimeOfDay::parse("00:00").is_ok());
    }

    #[test]
    fn test_time_ordering_and_duration() {
        let a = TimeOfDay::new(9, 45).unwrap();
        let b = TimeOfDay::new(11, 15).unwrap();
        assert!(a < b);
        assert_eq!(a.duration_until(b), 90);
        assert_eq!(b.duration_until(a), 0);
        assert_eq!(a.to_string(), "09:45");
    }

    #[test]
    fn test_time_serde_as_text() {
        let t = TimeOfDay::new(8, 5).unwrap();
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "\"08:05\"");
        let back: TimeOfDay = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
        assert!(serde_json::from_str::<TimeOfDay>("\"25:00\"").is_err());
    }
}
