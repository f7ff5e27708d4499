use std::borrow::Cow;

use crate::fetch::FundRow;

use super::format::{format_number, format_percent, Locale, MISSING};
use super::FundColumn;

/// Marker shown in text renderings when a fund has a logo URL.
pub const LOGO_GLYPH: &str = "▣";
/// Placeholder block for funds without a logo.
pub const LOGO_PLACEHOLDER: &str = "░░";

/// Direction of the daily change, drives the cell color.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    pub fn of(value: f64) -> Self {
        if value > 0.0 {
            Trend::Up
        } else if value < 0.0 {
            Trend::Down
        } else {
            Trend::Flat
        }
    }
}

/// Display form of one table cell, independent of the output surface.
#[derive(Clone, Debug, PartialEq)]
pub enum FundCell<'a> {
    Logo(Option<&'a str>),
    Ticker(&'a str),
    Text(&'a str),
    Number(String),
    Change { text: String, trend: Trend },
    Missing,
}

impl FundCell<'_> {
    pub fn plain_text(&self) -> Cow<'_, str> {
        match self {
            FundCell::Logo(Some(_)) => Cow::Borrowed(LOGO_GLYPH),
            FundCell::Logo(None) => Cow::Borrowed(LOGO_PLACEHOLDER),
            FundCell::Ticker(text) | FundCell::Text(text) => Cow::Borrowed(*text),
            FundCell::Number(text) | FundCell::Change { text, .. } => Cow::Borrowed(text.as_str()),
            FundCell::Missing => Cow::Borrowed(MISSING),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, FundCell::Number(_) | FundCell::Change { .. })
    }
}

pub fn render_cell<'a>(column: FundColumn, row: &'a FundRow, locale: Locale) -> FundCell<'a> {
    match column {
        FundColumn::Logo => FundCell::Logo(row.logo.as_deref().filter(|url| !url.is_empty())),
        FundColumn::Ticker => FundCell::Ticker(&row.stock),
        FundColumn::Name => text_cell(row.name.as_deref()),
        FundColumn::Sector => text_cell(row.sector.as_deref()),
        FundColumn::Type => text_cell(row.fund_type.as_deref()),
        FundColumn::Close => number_cell(row.close, locale),
        FundColumn::Volume => number_cell(row.volume, locale),
        FundColumn::MarketCap => number_cell(row.market_cap, locale),
        FundColumn::Change => match row.change {
            Some(value) => FundCell::Change {
                text: format_percent(value, locale),
                trend: Trend::of(value),
            },
            None => FundCell::Missing,
        },
    }
}

fn text_cell(value: Option<&str>) -> FundCell<'_> {
    value.map(FundCell::Text).unwrap_or(FundCell::Missing)
}

fn number_cell<'a>(value: Option<f64>, locale: Locale) -> FundCell<'a> {
    value
        .map(|v| FundCell::Number(format_number(v, locale)))
        .unwrap_or(FundCell::Missing)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abcd() -> FundRow {
        FundRow {
            stock: "ABCD11".to_string(),
            close: Some(12.345),
            change: Some(-1.2),
            volume: Some(1000.0),
            market_cap: None,
            ..FundRow::default()
        }
    }

    #[test]
    fn formats_reference_row() {
        let row = abcd();
        let locale = Locale::PtBr;
        assert_eq!(
            render_cell(FundColumn::Close, &row, locale),
            FundCell::Number("12,35".to_string())
        );
        assert_eq!(
            render_cell(FundColumn::Change, &row, locale),
            FundCell::Change {
                text: "-1,20%".to_string(),
                trend: Trend::Down,
            }
        );
        assert_eq!(
            render_cell(FundColumn::Volume, &row, locale).plain_text(),
            "1.000"
        );
        assert_eq!(render_cell(FundColumn::MarketCap, &row, locale), FundCell::Missing);
        assert_eq!(
            render_cell(FundColumn::MarketCap, &row, locale).plain_text(),
            "—"
        );
    }

    #[test]
    fn ticker_is_never_formatted() {
        let row = FundRow {
            stock: "hglg11 ".to_string(),
            ..FundRow::default()
        };
        assert_eq!(
            render_cell(FundColumn::Ticker, &row, Locale::PtBr),
            FundCell::Ticker("hglg11 ")
        );
    }

    #[test]
    fn zero_change_is_flat() {
        let row = FundRow {
            stock: "ZERO11".to_string(),
            change: Some(0.0),
            ..FundRow::default()
        };
        match render_cell(FundColumn::Change, &row, Locale::PtBr) {
            FundCell::Change { text, trend } => {
                assert_eq!(text, "0,00%");
                assert_eq!(trend, Trend::Flat);
            }
            other => panic!("unexpected cell {other:?}"),
        }
        assert_eq!(Trend::of(0.01), Trend::Up);
    }

    #[test]
    fn logo_falls_back_to_placeholder() {
        let mut row = abcd();
        assert_eq!(
            render_cell(FundColumn::Logo, &row, Locale::PtBr).plain_text(),
            LOGO_PLACEHOLDER
        );
        row.logo = Some("https://icons.brapi.dev/icons/ABCD11.svg".to_string());
        assert_eq!(
            render_cell(FundColumn::Logo, &row, Locale::PtBr),
            FundCell::Logo(Some("https://icons.brapi.dev/icons/ABCD11.svg"))
        );
    }

    #[test]
    fn missing_text_uses_em_dash() {
        let row = abcd();
        assert_eq!(render_cell(FundColumn::Sector, &row, Locale::PtBr).plain_text(), "—");
    }
}
