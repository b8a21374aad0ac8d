use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};

static BINDINGS: &[(&str, &str)] = &[
    ("h, k, LEFT, UP", "Previous month"),
    ("l, j, RIGHT, DOWN", "Next month"),
    ("PAGE UP, PAGE DOWN", "Previous/next month"),
    ("HOME, END", "First/last loaded month"),
    ("0", "Jump to this month"),
    ("g", "Input month to jump to"),
    ("?", "Show this help"),
    ("q, ESC", "Quit"),
];

static DISMISS: &str = "Press the Any Key to dismiss.";

/// Columns between the widest key list and the descriptions
const KEY_GUTTER: usize = 2;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help(pub(crate) Style);

impl Help {
    fn text() -> Text<'static> {
        let key_width = BINDINGS.iter().map(|(k, _)| k.len()).max().unwrap_or(0) + KEY_GUTTER;
        let mut lines = BINDINGS
            .iter()
            .map(|(keys, desc)| Line::raw(format!("{keys:key_width$}{desc}")))
            .collect::<Vec<_>>();
        lines.push(Line::raw(""));
        lines.push(Line::raw(DISMISS));
        Text::from(lines)
    }
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Help::text();
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .min(area.height)
            .saturating_add(2);
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .min(area.width)
            .saturating_add(2);
        let para = Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Commands ")
                    .title_alignment(Alignment::Center),
            )
            .style(self.0);
        let [help_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [help_area] = Layout::vertical([height])
            .flex(Flex::Center)
            .areas(help_area);
        let outer_area = Rect {
            x: help_area.x.saturating_sub(1),
            y: help_area.y,
            width: help_area.width.saturating_add(2),
            height: help_area.height,
        }
        .intersection(area);
        Clear.render(outer_area, buf);
        Block::new().style(self.0).render(outer_area, buf);
        para.render(help_area, buf);
    }
}
