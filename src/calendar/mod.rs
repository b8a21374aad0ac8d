mod grid;
mod util;
mod widget;
mod window;
pub(crate) use self::grid::{MonthDescriptor, MonthGrid};
pub(crate) use self::util::{date_key, parse_date_key, YearMonth};
pub(crate) use self::widget::Calendar;
pub(crate) use self::window::MonthWindow;
