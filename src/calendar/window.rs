use super::grid::MonthGrid;
use super::util::{OutOfTimeError, YearMonth};
use crate::availability::MonthData;
use thiserror::Error;
use time::Date;

/// The set of loaded months together with the one currently on display
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct MonthWindow {
    pub(super) today: Date,
    cabin: Option<String>,
    // Invariant: nonempty, sorted, and without repeated months
    months: Vec<MonthData>,
    index: usize,
}

impl MonthWindow {
    /// `months` must be sorted chronologically without repeats, as returned
    /// by `AvailabilityPayload::into_months()`.  If it is empty, an empty
    /// month is created for `today` so that there is always something to
    /// show.
    pub(crate) fn new(today: Date, mut months: Vec<MonthData>) -> Result<Self, OutOfTimeError> {
        let this_month = YearMonth::containing(today)?;
        if months.is_empty() {
            months.push(MonthData::new(this_month));
        }
        debug_assert!(
            months.windows(2).all(|w| w[0].ym < w[1].ym),
            "loaded months should be sorted and unique"
        );
        let index = default_index(&months, this_month);
        Ok(MonthWindow {
            today,
            cabin: None,
            months,
            index,
        })
    }

    pub(crate) fn cabin(mut self, cabin: Option<String>) -> Self {
        self.cabin = cabin;
        self
    }

    /// Start on `ym` instead of the default month, if it was loaded
    pub(crate) fn start_month(mut self, ym: YearMonth) -> Self {
        if self.jump_to_month(ym).is_err() {
            log::warn!("No data loaded for {ym}; starting on default month");
        }
        self
    }

    pub(crate) fn cabin_name(&self) -> Option<&str> {
        self.cabin.as_deref()
    }

    pub(crate) fn current_month(&self) -> YearMonth {
        self.months[self.index].ym
    }

    /// Returns the 1-based position of the current month and the number of
    /// loaded months
    pub(crate) fn position(&self) -> (usize, usize) {
        (self.index + 1, self.months.len())
    }

    pub(crate) fn current_grid(&self) -> MonthGrid {
        let current = &self.months[self.index];
        MonthGrid::build(current.ym, Some(current), &self.months)
    }

    pub(crate) fn one_month_forwards(&mut self) -> Result<(), OutOfRangeError> {
        if self.index + 1 < self.months.len() {
            self.index += 1;
            Ok(())
        } else {
            Err(OutOfRangeError)
        }
    }

    pub(crate) fn one_month_backwards(&mut self) -> Result<(), OutOfRangeError> {
        self.index = self.index.checked_sub(1).ok_or(OutOfRangeError)?;
        Ok(())
    }

    pub(crate) fn jump_to_first(&mut self) {
        self.index = 0;
    }

    pub(crate) fn jump_to_last(&mut self) {
        self.index = self.months.len() - 1;
    }

    pub(crate) fn jump_to_today(&mut self) -> Result<(), OutOfRangeError> {
        let ym = YearMonth::containing(self.today).map_err(|_| OutOfRangeError)?;
        self.jump_to_month(ym)
    }

    pub(crate) fn jump_to_month(&mut self, ym: YearMonth) -> Result<(), OutOfRangeError> {
        self.index = self
            .months
            .binary_search_by_key(&ym, |m| m.ym)
            .map_err(|_| OutOfRangeError)?;
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("no availability data loaded for that month")]
pub(crate) struct OutOfRangeError;

// The month containing today if loaded, else the first loaded month after
// it, else the last loaded month
fn default_index(months: &[MonthData], this_month: YearMonth) -> usize {
    months
        .iter()
        .position(|m| m.ym >= this_month)
        .unwrap_or(months.len().saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::AvailabilityState;
    use time::macros::date;

    fn ym(year: i32, month: i32) -> YearMonth {
        YearMonth::normalized(year, month).unwrap()
    }

    fn months(pairs: &[(i32, i32)]) -> Vec<MonthData> {
        pairs.iter().map(|&(y, m)| MonthData::new(ym(y, m))).collect()
    }

    #[test]
    fn test_starts_on_todays_month() {
        let window = MonthWindow::new(
            date!(2025 - 05 - 17),
            months(&[(2025, 4), (2025, 5), (2025, 6)]),
        )
        .unwrap();
        assert_eq!(window.current_month(), ym(2025, 5));
        assert_eq!(window.position(), (2, 3));
    }

    #[test]
    fn test_starts_on_next_loaded_month() {
        let window = MonthWindow::new(
            date!(2025 - 05 - 17),
            months(&[(2025, 3), (2025, 7), (2025, 8)]),
        )
        .unwrap();
        assert_eq!(window.current_month(), ym(2025, 7));
    }

    #[test]
    fn test_starts_on_last_month_when_all_past() {
        let window = MonthWindow::new(
            date!(2026 - 01 - 02),
            months(&[(2025, 3), (2025, 4)]),
        )
        .unwrap();
        assert_eq!(window.current_month(), ym(2025, 4));
    }

    #[test]
    fn test_empty_months() {
        let window = MonthWindow::new(date!(2025 - 06 - 09), Vec::new()).unwrap();
        assert_eq!(window.current_month(), ym(2025, 6));
        assert_eq!(window.position(), (1, 1));
        let grid = window.current_grid();
        assert_eq!(grid.cells().len(), 35);
        assert!(grid
            .cells()
            .iter()
            .all(|c| c.state == AvailabilityState::Available && c.rate.is_none()));
    }

    #[test]
    fn test_start_month() {
        let window = MonthWindow::new(
            date!(2025 - 05 - 17),
            months(&[(2025, 4), (2025, 5), (2025, 6)]),
        )
        .unwrap()
        .start_month(ym(2025, 6));
        assert_eq!(window.current_month(), ym(2025, 6));
        let window = window.start_month(ym(2030, 1));
        assert_eq!(window.current_month(), ym(2025, 6));
    }

    #[test]
    fn test_navigation_bounds() {
        let mut window = MonthWindow::new(
            date!(2025 - 04 - 01),
            months(&[(2025, 4), (2025, 5)]),
        )
        .unwrap();
        assert_eq!(window.one_month_backwards(), Err(OutOfRangeError));
        assert_eq!(window.current_month(), ym(2025, 4));
        assert_eq!(window.one_month_forwards(), Ok(()));
        assert_eq!(window.current_month(), ym(2025, 5));
        assert_eq!(window.one_month_forwards(), Err(OutOfRangeError));
        assert_eq!(window.current_month(), ym(2025, 5));
        assert_eq!(window.one_month_backwards(), Ok(()));
        assert_eq!(window.current_month(), ym(2025, 4));
    }

    #[test]
    fn test_jumps() {
        let mut window = MonthWindow::new(
            date!(2025 - 05 - 17),
            months(&[(2025, 4), (2025, 5), (2025, 6), (2025, 7)]),
        )
        .unwrap();
        window.jump_to_last();
        assert_eq!(window.current_month(), ym(2025, 7));
        window.jump_to_first();
        assert_eq!(window.current_month(), ym(2025, 4));
        assert_eq!(window.jump_to_today(), Ok(()));
        assert_eq!(window.current_month(), ym(2025, 5));
        assert_eq!(window.jump_to_month(ym(2025, 6)), Ok(()));
        assert_eq!(window.current_month(), ym(2025, 6));
        assert_eq!(window.jump_to_month(ym(2025, 8)), Err(OutOfRangeError));
        assert_eq!(window.current_month(), ym(2025, 6));
    }

    #[test]
    fn test_jump_to_today_not_loaded() {
        let mut window =
            MonthWindow::new(date!(2025 - 01 - 15), months(&[(2025, 4)])).unwrap();
        assert_eq!(window.jump_to_today(), Err(OutOfRangeError));
    }

    #[test]
    fn test_current_grid_uses_neighbours() {
        let all = vec![
            MonthData::new(ym(2025, 3)).with_rate(date!(2025 - 03 - 30), 180.0),
            MonthData::new(ym(2025, 4)),
        ];
        let window = MonthWindow::new(date!(2025 - 04 - 03), all).unwrap();
        let grid = window.current_grid();
        assert_eq!(grid.cells()[0].date, date!(2025 - 03 - 30));
        assert_eq!(grid.cells()[0].rate, Some(180.0));
    }

    #[test]
    fn test_cabin_name() {
        let window = MonthWindow::new(date!(2025 - 04 - 03), Vec::new())
            .unwrap()
            .cabin(Some(String::from("Pine Hollow")));
        assert_eq!(window.cabin_name(), Some("Pine Hollow"));
    }
}
