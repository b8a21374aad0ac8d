use super::grid::DayCell;
use super::window::MonthWindow;
use crate::availability::AvailabilityState;
use crate::theme::{
    adjacent_style, state_style, RATE_STYLE, STATUS_STYLE, TITLE_STYLE, WEEKDAY_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Text,
    widgets::{Paragraph, StatefulWidget, Widget},
};

static HEADER: &str = " Su     Mo     Tu     We     Th     Fr     Sa ";

static HELP_HINT: &str = "? help";

/// Width of the calendar in columns
const MAIN_WIDTH: u16 = 46;

/// Number of lines taken up by the title, the header, and the header's rule
const HEADER_LINES: u16 = 3;

/// Number of lines taken up by each week of the calendar: one for the day
/// numbers and one for the rates
const WEEK_LINES: u16 = 2;

/// Number of columns per day of week
const DAY_WIDTH: u16 = 7;

/// Widest that a rate may be drawn without running into the next day
const RATE_WIDTH: usize = 6;

/// Columns between entries of the legend
const LEGEND_GAP: u16 = 2;

/// Number of states listed on each line of the legend
const LEGEND_PER_ROW: usize = 3;

const ACS_HLINE: char = '─';

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Calendar;

impl StatefulWidget for Calendar {
    type State = MonthWindow;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let left = area.width.saturating_sub(MAIN_WIDTH) / 2;
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(left),
                Constraint::Length(MAIN_WIDTH.min(area.width)),
                Constraint::Min(0),
            ])
            .split(area);
        let area = chunks[1];
        let grid = state.current_grid();
        let ym = grid.year_month();
        let mut canvas = BufferCanvas::new(area, buf);
        let title = match state.cabin_name() {
            Some(cabin) => format!("{cabin}, {} {}", ym.month(), ym.year()),
            None => format!("{} {}", ym.month(), ym.year()),
        };
        canvas.draw_title(&title);
        canvas.draw_header();
        for (i, week) in std::iter::zip(0u16.., grid.weeks()) {
            for (wd, cell) in std::iter::zip(0u16.., week) {
                canvas.draw_day(i, wd, cell, cell.date == state.today);
                canvas.draw_rate(i, wd, cell);
            }
        }
        let week_qty = u16::try_from(grid.week_count()).unwrap_or(u16::MAX);
        let bottom = HEADER_LINES.saturating_add(WEEK_LINES.saturating_mul(week_qty));
        canvas.hline(bottom, 0, ACS_HLINE, MAIN_WIDTH);
        let legend = AvailabilityState::ALL.chunks(LEGEND_PER_ROW);
        for (y, row) in std::iter::zip(bottom + 1.., legend) {
            canvas.draw_legend_row(y, row);
        }
        let (pos, total) = state.position();
        canvas.draw_status(
            bottom.saturating_add(3),
            &format!("Month {pos} of {total}"),
        );
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_title(&mut self, title: &str) {
        let width = u16::try_from(title.chars().count()).unwrap_or(u16::MAX);
        let x = MAIN_WIDTH.saturating_sub(width) / 2;
        self.mvprint(0, x, title, Some(TITLE_STYLE));
    }

    fn draw_header(&mut self) {
        self.mvprint(1, 0, HEADER, Some(WEEKDAY_STYLE));
        self.hline(2, 0, ACS_HLINE, MAIN_WIDTH);
    }

    fn draw_day(&mut self, week_no: u16, wd: u16, cell: &DayCell, is_today: bool) {
        let s = if is_today {
            format!("[{:2}]", cell.day())
        } else {
            format!(" {:2} ", cell.day())
        };
        self.mvprint(
            week_no * WEEK_LINES + HEADER_LINES,
            DAY_WIDTH * wd,
            s,
            Some(cell_style(cell, state_style(cell.state))),
        );
    }

    fn draw_rate(&mut self, week_no: u16, wd: u16, cell: &DayCell) {
        if let Some(rate) = cell.rate {
            let s = format!("${rate:.0}").chars().take(RATE_WIDTH).collect::<String>();
            self.mvprint(
                week_no * WEEK_LINES + HEADER_LINES + 1,
                DAY_WIDTH * wd,
                s,
                Some(cell_style(cell, RATE_STYLE)),
            );
        }
    }

    fn draw_legend_row(&mut self, y: u16, states: &[AvailabilityState]) {
        let mut x = 0;
        for &st in states {
            let name = st.visual_class();
            self.mvprint(y, x, name, Some(state_style(st)));
            x += u16::try_from(name.len()).unwrap_or(u16::MAX) + LEGEND_GAP;
        }
    }

    fn draw_status(&mut self, y: u16, status: &str) {
        self.mvprint(y, 0, status, Some(STATUS_STYLE));
        let hint_width = u16::try_from(HELP_HINT.len()).unwrap_or(u16::MAX);
        self.mvprint(
            y,
            MAIN_WIDTH.saturating_sub(hint_width),
            HELP_HINT,
            Some(STATUS_STYLE),
        );
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Option<Style>) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style.unwrap_or_default());
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // Using a Paragraph lets us truncate text that extends beyond the
            // calendar's area, though we need to be sure that the Rect passed
            // to the Paragraph is entirely within the frame lest a panic
            // result.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(y, x, String::from(ch).repeat(length.into()), None);
    }
}

fn cell_style(cell: &DayCell, style: Style) -> Style {
    if cell.is_adjacent_month {
        adjacent_style(style)
    } else {
        style
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::MonthData;
    use crate::calendar::YearMonth;
    use crate::theme::{BASE_STYLE, CHECK_IN_STYLE, RESERVED_STYLE};
    use time::macros::date;

    fn rows(buf: &Buffer) -> Vec<String> {
        let width = usize::from(buf.area.width);
        buf.content
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect()
    }

    fn sample_window() -> MonthWindow {
        let months = vec![
            MonthData::new(YearMonth::normalized(2025, 3).unwrap())
                .with_rate(date!(2025 - 03 - 30), 180.0),
            MonthData::new(YearMonth::normalized(2025, 4).unwrap())
                .with_state(date!(2025 - 04 - 01), AvailabilityState::CheckIn)
                .with_state(date!(2025 - 04 - 02), AvailabilityState::Reserved)
                .with_rate(date!(2025 - 04 - 01), 245.0)
                .with_rate(date!(2025 - 04 - 02), 1250.0),
        ];
        MonthWindow::new(date!(2025 - 04 - 02), months)
            .unwrap()
            .cabin(Some(String::from("Pine Hollow")))
    }

    #[test]
    fn test_render_april() {
        let mut window = sample_window();
        let area = Rect::new(0, 0, 46, 17);
        let mut buffer = Buffer::empty(area);
        buffer.set_style(area, BASE_STYLE);
        Calendar.render(area, &mut buffer, &mut window);
        let rows = rows(&buffer);
        assert_eq!(
            rows,
            [
                "           Pine Hollow, April 2025            ",
                " Su     Mo     Tu     We     Th     Fr     Sa ",
                "──────────────────────────────────────────────",
                " 30     31      1    [ 2]     3      4      5 ",
                "$180          $245   $1250                    ",
                "  6      7      8      9     10     11     12 ",
                "                                              ",
                " 13     14     15     16     17     18     19 ",
                "                                              ",
                " 20     21     22     23     24     25     26 ",
                "                                              ",
                " 27     28     29     30      1      2      3 ",
                "                                              ",
                "──────────────────────────────────────────────",
                "available  check-in  check-out                ",
                "turnover  reserved  unknown                   ",
                "Month 2 of 2                            ? help",
            ]
        );
        assert_eq!(buffer[(14, 3)].style(), BASE_STYLE.patch(CHECK_IN_STYLE));
        assert_eq!(buffer[(21, 3)].style(), BASE_STYLE.patch(RESERVED_STYLE));
        assert!(buffer[(0, 3)]
            .style()
            .add_modifier
            .contains(ratatui::style::Modifier::DIM));
        assert!(!buffer[(7, 5)]
            .style()
            .add_modifier
            .contains(ratatui::style::Modifier::DIM));
    }

    #[test]
    fn test_render_centers_in_wide_area() {
        let mut window = sample_window();
        let area = Rect::new(0, 0, 56, 17);
        let mut buffer = Buffer::empty(area);
        Calendar.render(area, &mut buffer, &mut window);
        let rows = rows(&buffer);
        assert_eq!(rows[1], "      Su     Mo     Tu     We     Th     Fr     Sa      ");
    }

    #[test]
    fn test_render_tiny_area_does_not_panic() {
        let mut window = sample_window();
        for (w, h) in [(0, 0), (1, 1), (10, 3), (46, 5), (80, 2)] {
            let area = Rect::new(0, 0, w, h);
            let mut buffer = Buffer::empty(area);
            Calendar.render(area, &mut buffer, &mut window);
        }
    }
}
