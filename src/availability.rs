use crate::calendar::{date_key, parse_date_key, YearMonth};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::io::Read;
use thiserror::Error;
#[cfg(test)]
use time::Date;

/// Booking status of a single date, as reported by the backend
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum AvailabilityState {
    #[default]
    Available,
    #[serde(alias = "check-in", alias = "checkin")]
    CheckIn,
    #[serde(alias = "check-out", alias = "checkout")]
    CheckOut,
    Turnover,
    #[serde(alias = "booked")]
    Reserved,
    #[serde(other)]
    Unknown,
}

impl AvailabilityState {
    pub(crate) const ALL: [AvailabilityState; 6] = [
        AvailabilityState::Available,
        AvailabilityState::CheckIn,
        AvailabilityState::CheckOut,
        AvailabilityState::Turnover,
        AvailabilityState::Reserved,
        AvailabilityState::Unknown,
    ];

    /// Name of the visual class used to draw a date in this state
    pub(crate) fn visual_class(self) -> &'static str {
        match self {
            AvailabilityState::Available => "available",
            AvailabilityState::CheckIn => "check-in",
            AvailabilityState::CheckOut => "check-out",
            AvailabilityState::Turnover => "turnover",
            AvailabilityState::Reserved => "reserved",
            AvailabilityState::Unknown => "unknown",
        }
    }
}

/// Availability and rate data for one month of one cabin
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct MonthData {
    pub(crate) ym: YearMonth,
    pub(crate) availability: HashMap<String, AvailabilityState>,
    pub(crate) rates: HashMap<String, f64>,
}

impl MonthData {
    pub(crate) fn new(ym: YearMonth) -> MonthData {
        MonthData {
            ym,
            availability: HashMap::new(),
            rates: HashMap::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_state(mut self, date: Date, state: AvailabilityState) -> MonthData {
        self.availability.insert(date_key(date), state);
        self
    }

    #[cfg(test)]
    pub(crate) fn with_rate(mut self, date: Date, rate: f64) -> MonthData {
        self.rates.insert(date_key(date), rate);
        self
    }

    pub(crate) fn state(&self, key: &str) -> Option<AvailabilityState> {
        self.availability.get(key).copied()
    }

    pub(crate) fn rate(&self, key: &str) -> Option<f64> {
        self.rates.get(key).copied()
    }
}

/// The per-cabin, multi-month payload served by the booking backend
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub(crate) struct AvailabilityPayload {
    #[serde(default)]
    pub(crate) cabin: Option<String>,
    pub(crate) months: Vec<MonthEntry>,
}

impl AvailabilityPayload {
    pub(crate) fn from_reader<R: Read>(reader: R) -> Result<AvailabilityPayload, PayloadError> {
        let payload: AvailabilityPayload = serde_json::from_reader(reader)?;
        log::info!(
            "Loaded availability payload with {} month(s)",
            payload.months.len()
        );
        Ok(payload)
    }

    #[cfg(test)]
    pub(crate) fn from_value(value: Value) -> Result<AvailabilityPayload, PayloadError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Convert the payload's months into chronologically-sorted `MonthData`.
    ///
    /// Months that cannot be placed on the calendar are discarded, as are
    /// repeated entries for the same month (the first one wins).
    pub(crate) fn into_months(self) -> Vec<MonthData> {
        let mut months = Vec::with_capacity(self.months.len());
        for entry in self.months {
            match YearMonth::normalized(entry.year, entry.month) {
                Ok(ym) => months.push(MonthData {
                    ym,
                    availability: entry.availability,
                    rates: entry.rates,
                }),
                Err(e) => log::warn!(
                    "Discarding data for year {}, month {}: {e}",
                    entry.year,
                    entry.month
                ),
            }
        }
        months.sort_by_key(|m| m.ym);
        months.dedup_by(|later, earlier| {
            let dup = later.ym == earlier.ym;
            if dup {
                log::warn!("Discarding duplicate data for {}", later.ym);
            }
            dup
        });
        months
    }
}

/// One element of the payload's `months` array.  Per-date records that
/// cannot be understood are dropped so that the date falls back to the
/// defaults.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(from = "RawMonthEntry")]
pub(crate) struct MonthEntry {
    pub(crate) year: i32,
    pub(crate) month: i32,
    pub(crate) availability: HashMap<String, AvailabilityState>,
    pub(crate) rates: HashMap<String, f64>,
}

#[derive(Deserialize)]
struct RawMonthEntry {
    year: i32,
    month: i32,
    #[serde(default)]
    availability: Option<HashMap<String, Value>>,
    #[serde(default)]
    rates: Option<HashMap<String, Value>>,
}

#[derive(Deserialize)]
struct AvailabilityRecord {
    state: AvailabilityState,
}

#[derive(Deserialize)]
struct RateRecord {
    daily_rate: RateValue,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RateValue {
    Number(f64),
    Text(String),
}

impl RateValue {
    fn into_f64(self) -> Option<f64> {
        match self {
            RateValue::Number(n) => Some(n),
            RateValue::Text(s) => s.trim().parse::<f64>().ok(),
        }
        .filter(|n| n.is_finite())
    }
}

impl From<RawMonthEntry> for MonthEntry {
    fn from(raw: RawMonthEntry) -> MonthEntry {
        let availability = raw
            .availability
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(key, value)| {
                let key = canonical_key(&key)?;
                match serde_json::from_value::<AvailabilityRecord>(value) {
                    Ok(rec) => Some((key, rec.state)),
                    Err(e) => {
                        log::debug!("Ignoring unreadable availability record for {key}: {e}");
                        None
                    }
                }
            })
            .collect();
        let rates = raw
            .rates
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(key, value)| {
                let key = canonical_key(&key)?;
                let rate = serde_json::from_value::<RateRecord>(value)
                    .ok()
                    .and_then(|rec| rec.daily_rate.into_f64());
                if rate.is_none() {
                    log::debug!("Ignoring unreadable rate record for {key}");
                }
                rate.map(|r| (key, r))
            })
            .collect();
        MonthEntry {
            year: raw.year,
            month: raw.month,
            availability,
            rates,
        }
    }
}

// Keys are stored in the same `YYYY-MM-DD` form that the grid looks them up
// by
fn canonical_key(key: &str) -> Option<String> {
    let canon = parse_date_key(key).map(date_key);
    if canon.is_none() {
        log::debug!("Ignoring record with unparseable date key {key:?}");
    }
    canon
}

#[derive(Debug, Error)]
#[error("invalid availability payload")]
pub(crate) struct PayloadError(#[from] serde_json::Error);
