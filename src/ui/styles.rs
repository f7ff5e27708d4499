use std::borrow::Cow;

use ratatui::prelude::Stylize;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;

use crate::table::Trend;

/// Accent color used for the title, header labels, and focus markers.
pub const ACCENT: Color = Color::Indexed(208);
pub const POSITIVE: Color = Color::Green;
pub const NEGATIVE: Color = Color::Red;

/// Produce a dimmed line for secondary descriptions and hints.
pub fn secondary_line<'a>(text: impl Into<Cow<'a, str>>) -> Line<'a> {
    let owned = text.into().into_owned();
    Line::from(owned.dim())
}

pub fn column_header_style(focused: bool) -> Style {
    let style = Style::default().fg(ACCENT).add_modifier(Modifier::BOLD);
    if focused {
        style.add_modifier(Modifier::UNDERLINED)
    } else {
        style
    }
}

pub fn trend_style(trend: Trend) -> Style {
    match trend {
        Trend::Up => Style::default().fg(POSITIVE),
        Trend::Down => Style::default().fg(NEGATIVE),
        Trend::Flat => Style::default(),
    }
}

pub fn ticker_style() -> Style {
    Style::default().fg(Color::Cyan)
}

pub fn placeholder_style() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

pub fn selected_row_style() -> Style {
    Style::default().add_modifier(Modifier::REVERSED)
}

pub fn banner_style() -> Style {
    Style::default().fg(NEGATIVE)
}
