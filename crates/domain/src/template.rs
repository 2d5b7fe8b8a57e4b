use std::{fmt, str::FromStr};

use chrono::{Datelike, Local, Weekday};

/// A canonical day of the week, Sunday-first and 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Day {
    Sunday = 0,
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Sunday,
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
    ];

    #[must_use]
    pub fn index(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Day::Sunday => "sunday",
            Day::Monday => "monday",
            Day::Tuesday => "tuesday",
            Day::Wednesday => "wednesday",
            Day::Thursday => "thursday",
            Day::Friday => "friday",
            Day::Saturday => "saturday",
        }
    }

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Day::Sunday => "Sunday",
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
        }
    }

    #[must_use]
    pub fn today() -> Self {
        Local::now().weekday().into()
    }
}

impl TryFrom<u8> for Day {
    type Error = DayError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Day::ALL
            .into_iter()
            .find(|day| day.index() == value)
            .ok_or(DayError::OutOfRange(value))
    }
}

impl FromStr for Day {
    type Err = DayError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim().to_lowercase();
        Day::ALL
            .into_iter()
            .find(|day| day.key() == value)
            .ok_or(DayError::UnknownName)
    }
}

impl From<Weekday> for Day {
    fn from(value: Weekday) -> Self {
        match value {
            Weekday::Sun => Day::Sunday,
            Weekday::Mon => Day::Monday,
            Weekday::Tue => Day::Tuesday,
            Weekday::Wed => Day::Wednesday,
            Weekday::Thu => Day::Thursday,
            Weekday::Fri => Day::Friday,
            Weekday::Sat => Day::Saturday,
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum DayError {
    #[error("day index must be in the range 0 to 6 ({0} > 6)")]
    OutOfRange(u8),
    #[error("unknown day name")]
    UnknownName,
}

/// The non-strength component of a workout day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardioKind {
    Metcon,
    Running,
    Mobility,
    Rest,
}

impl fmt::Display for CardioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                CardioKind::Metcon => "metcon",
                CardioKind::Running => "running",
                CardioKind::Mobility => "mobility",
                CardioKind::Rest => "rest",
            }
        )
    }
}

/// The per-day configuration the assembler consumes. Category names may
/// repeat and may reference categories absent from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyTemplate {
    pub day: Day,
    pub name: String,
    pub warmup: String,
    pub category_names: Vec<String>,
    pub cardio: CardioKind,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("no template configured for {0}")]
pub struct TemplateNotFoundError(pub Day);

/// Pure lookup. No default template is invented here; fallback behavior, if
/// desired, belongs to the configuration layer.
pub fn resolve(
    day: Day,
    templates: &[DailyTemplate],
) -> Result<&DailyTemplate, TemplateNotFoundError> {
    templates
        .iter()
        .find(|template| template.day == day)
        .ok_or(TemplateNotFoundError(day))
}
