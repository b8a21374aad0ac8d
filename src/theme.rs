use crate::availability::AvailabilityState;
use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const RATE_STYLE: Style = BASE_STYLE.fg(Color::Gray);

pub(crate) const STATUS_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) const AVAILABLE_STYLE: Style = BASE_STYLE.fg(Color::LightGreen);

pub(crate) const CHECK_IN_STYLE: Style = BASE_STYLE.fg(Color::LightYellow);

pub(crate) const CHECK_OUT_STYLE: Style = BASE_STYLE.fg(Color::Yellow);

pub(crate) const TURNOVER_STYLE: Style = BASE_STYLE.fg(Color::LightMagenta);

pub(crate) const RESERVED_STYLE: Style = BASE_STYLE
    .fg(Color::LightRed)
    .add_modifier(Modifier::CROSSED_OUT);

pub(crate) const UNKNOWN_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) fn state_style(state: AvailabilityState) -> Style {
    match state {
        AvailabilityState::Available => AVAILABLE_STYLE,
        AvailabilityState::CheckIn => CHECK_IN_STYLE,
        AvailabilityState::CheckOut => CHECK_OUT_STYLE,
        AvailabilityState::Turnover => TURNOVER_STYLE,
        AvailabilityState::Reserved => RESERVED_STYLE,
        AvailabilityState::Unknown => UNKNOWN_STYLE,
    }
}

/// Days from the neighbouring months are drawn faded
pub(crate) fn adjacent_style(style: Style) -> Style {
    style.add_modifier(Modifier::DIM)
}

pub(crate) mod jumpto {
    use super::*;

    pub(crate) const UNFILLED_CELL_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub(crate) const READY_ENTER_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);
}
