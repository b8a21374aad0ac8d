use std::fmt;
use std::iter::successors;
use std::str::FromStr;
use thiserror::Error;
use time::{format_description::FormatItem, macros::format_description, Date, Month, Weekday};

pub(crate) const DAYS_IN_WEEK: usize = 7;

static DATE_KEY_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

// One month of headroom on each side of the representable range so that
// every valid month can be padded with days from its neighbours
const MIN_YEAR: i32 = Date::MIN.year() + 1;
const MAX_YEAR: i32 = Date::MAX.year() - 1;

pub(super) trait WeekdayExt {
    fn index0(&self) -> u16;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> u16 {
        self.number_days_from_sunday().into()
    }
}

/// A calendar month of a specific year.
///
/// Internally this is the first day of the month, so ordering and equality
/// follow the calendar.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct YearMonth(Date);

impl YearMonth {
    pub(crate) fn new(year: i32, month: Month) -> Result<YearMonth, OutOfTimeError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(OutOfTimeError);
        }
        Date::from_calendar_date(year, month, 1)
            .map(YearMonth)
            .map_err(|_| OutOfTimeError)
    }

    /// Construct a `YearMonth` from a year and a month number that need not
    /// lie in `1..=12`.  Month 0 is December of the preceding year, month 13
    /// is January of the following year, and so on in either direction.
    pub(crate) fn normalized(year: i32, month: i32) -> Result<YearMonth, OutOfTimeError> {
        let total = i64::from(year) * 12 + i64::from(month) - 1;
        let year = i32::try_from(total.div_euclid(12)).map_err(|_| OutOfTimeError)?;
        let month = u8::try_from(total.rem_euclid(12) + 1).map_err(|_| OutOfTimeError)?;
        let month = Month::try_from(month).map_err(|_| OutOfTimeError)?;
        YearMonth::new(year, month)
    }

    pub(crate) fn containing(date: Date) -> Result<YearMonth, OutOfTimeError> {
        YearMonth::new(date.year(), date.month())
    }

    pub(crate) fn year(self) -> i32 {
        self.0.year()
    }

    pub(crate) fn month(self) -> Month {
        self.0.month()
    }

    pub(crate) fn first_day(self) -> Date {
        self.0
    }

    pub(crate) fn contains(self, date: Date) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), u8::from(self.month()))
    }
}

impl FromStr for YearMonth {
    type Err = ParseYearMonthError;

    /// Parse a month in `YYYY-MM` format
    fn from_str(s: &str) -> Result<YearMonth, ParseYearMonthError> {
        let (year, month) = s.split_once('-').ok_or(ParseYearMonthError::Syntax)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(ParseYearMonthError::Syntax);
        }
        let year = year
            .parse::<i32>()
            .map_err(|_| ParseYearMonthError::Syntax)?;
        let month = month
            .parse::<u8>()
            .map_err(|_| ParseYearMonthError::Syntax)?;
        let month = Month::try_from(month).map_err(|_| ParseYearMonthError::Month)?;
        Ok(YearMonth::new(year, month)?)
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("year is outside the supported calendar range")]
pub(crate) struct OutOfTimeError;

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum ParseYearMonthError {
    #[error("expected a month in YYYY-MM format")]
    Syntax,
    #[error("month must be between 01 and 12")]
    Month,
    #[error(transparent)]
    OutOfTime(#[from] OutOfTimeError),
}

/// Returns the ISO `YYYY-MM-DD` key under which the backend stores data for
/// `date`
pub(crate) fn date_key(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Parse a date key sent by the backend.  Anything after a `T` (i.e., a
/// time of day) is ignored.
pub(crate) fn parse_date_key(s: &str) -> Option<Date> {
    let s = s.trim();
    let day = s.split_once('T').map_or(s, |(d, _)| d);
    Date::parse(day, &DATE_KEY_FMT).ok()
}

pub(super) fn iter_days_after(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.next_day()).skip(1)
}

pub(super) fn iter_days_before(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.previous_day()).skip(1)
}
