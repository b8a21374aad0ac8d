use super::util::{
    date_key, iter_days_after, iter_days_before, WeekdayExt, YearMonth, DAYS_IN_WEEK,
};
use crate::availability::{AvailabilityState, MonthData};
use serde::Serialize;
use time::Date;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct DayCell {
    pub(crate) date: Date,
    pub(crate) is_adjacent_month: bool,
    pub(crate) state: AvailabilityState,
    pub(crate) rate: Option<f64>,
}

impl DayCell {
    pub(crate) fn day(&self) -> u8 {
        self.date.day()
    }

    pub(crate) fn descriptor(&self) -> CellDescriptor {
        CellDescriptor {
            date: self.day(),
            date_key: date_key(self.date),
            is_adjacent_month: self.is_adjacent_month,
            state: self.state,
            rate: self.rate,
        }
    }
}

/// The form in which a day cell is handed to UI consumers
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CellDescriptor {
    pub(crate) date: u8,
    pub(crate) date_key: String,
    pub(crate) is_adjacent_month: bool,
    pub(crate) state: AvailabilityState,
    pub(crate) rate: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct MonthDescriptor {
    pub(crate) year: i32,
    pub(crate) month: u8,
    pub(crate) cells: Vec<CellDescriptor>,
}

/// A month laid out as whole Sunday-first weeks.
///
/// The grid is a pure function of its month and the loaded data; it is
/// rebuilt rather than updated whenever either changes.
#[derive(Clone, Debug, PartialEq)]
// Invariant: `cells.len()` is a nonzero multiple of DAYS_IN_WEEK, and the
// cells are consecutive dates
pub(crate) struct MonthGrid {
    ym: YearMonth,
    cells: Vec<DayCell>,
}

impl MonthGrid {
    /// Build the grid for `ym`, using whichever element of `all_months` is
    /// for `ym` (if any) as the month's own data
    pub(crate) fn for_month(ym: YearMonth, all_months: &[MonthData]) -> MonthGrid {
        let current = all_months.iter().find(|m| m.ym == ym);
        MonthGrid::build(ym, current, all_months)
    }

    /// Build the grid for `ym`.
    ///
    /// The state and rate of every cell, padding included, are looked up
    /// first in `current` and then in each of `all_months` in order.  Dates
    /// with no availability record are `Available`; dates with no rate
    /// record have no rate.
    pub(crate) fn build(
        ym: YearMonth,
        current: Option<&MonthData>,
        all_months: &[MonthData],
    ) -> MonthGrid {
        let resolver = Resolver {
            current,
            all_months,
        };
        let first = ym.first_day();
        let leading = usize::from(first.weekday().index0());
        let mut dates = iter_days_before(first).take(leading).collect::<Vec<_>>();
        dates.reverse();
        dates.push(first);
        dates.extend(iter_days_after(first).take_while(|&d| ym.contains(d)));
        let remaining = DAYS_IN_WEEK - dates.len() % DAYS_IN_WEEK;
        if remaining < DAYS_IN_WEEK {
            if let Some(&last) = dates.last() {
                dates.extend(iter_days_after(last).take(remaining));
            }
        }
        let cells = dates
            .into_iter()
            .map(|date| {
                let key = date_key(date);
                DayCell {
                    date,
                    is_adjacent_month: !ym.contains(date),
                    state: resolver.state(&key),
                    rate: resolver.rate(&key),
                }
            })
            .collect::<Vec<_>>();
        log::debug!(
            "Built calendar grid for {ym}: {} cells, {} leading padding",
            cells.len(),
            leading
        );
        MonthGrid { ym, cells }
    }

    pub(crate) fn year_month(&self) -> YearMonth {
        self.ym
    }

    pub(crate) fn cells(&self) -> &[DayCell] {
        &self.cells
    }

    pub(crate) fn weeks(&self) -> impl Iterator<Item = &[DayCell]> + '_ {
        self.cells.chunks(DAYS_IN_WEEK)
    }

    pub(crate) fn week_count(&self) -> usize {
        self.cells.len().div_ceil(DAYS_IN_WEEK)
    }

    pub(crate) fn descriptor(&self) -> MonthDescriptor {
        MonthDescriptor {
            year: self.ym.year(),
            month: self.ym.month().into(),
            cells: self.cells().iter().map(DayCell::descriptor).collect(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Resolver<'a> {
    current: Option<&'a MonthData>,
    all_months: &'a [MonthData],
}

impl Resolver<'_> {
    fn state(&self, key: &str) -> AvailabilityState {
        self.lookup(|m| m.state(key)).unwrap_or_default()
    }

    fn rate(&self, key: &str) -> Option<f64> {
        self.lookup(|m| m.rate(key))
    }

    fn lookup<T, F>(&self, field: F) -> Option<T>
    where
        F: Fn(&MonthData) -> Option<T>,
    {
        self.current
            .into_iter()
            .chain(self.all_months)
            .find_map(field)
    }
}
