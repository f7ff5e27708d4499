use std::cmp::Ordering;

use crate::fetch::FundRow;

pub mod cell;
pub mod format;

pub use cell::{render_cell, FundCell, Trend};
pub use format::{format_number, format_percent, Locale, MISSING};

/// Columns of the fund table, in display order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum FundColumn {
    Logo,
    Ticker,
    Name,
    Sector,
    Type,
    Close,
    Change,
    Volume,
    MarketCap,
}

impl FundColumn {
    pub const ALL: [FundColumn; 9] = [
        FundColumn::Logo,
        FundColumn::Ticker,
        FundColumn::Name,
        FundColumn::Sector,
        FundColumn::Type,
        FundColumn::Close,
        FundColumn::Change,
        FundColumn::Volume,
        FundColumn::MarketCap,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FundColumn::Logo => "Logo",
            FundColumn::Ticker => "Ticker",
            FundColumn::Name => "Nome",
            FundColumn::Sector => "Setor",
            FundColumn::Type => "Tipo",
            FundColumn::Close => "Preço (R$)",
            FundColumn::Change => "Variação (%)",
            FundColumn::Volume => "Volume",
            FundColumn::MarketCap => "Market Cap",
        }
    }

    /// Field name used by the upstream payload and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            FundColumn::Logo => "logo",
            FundColumn::Ticker => "stock",
            FundColumn::Name => "name",
            FundColumn::Sector => "sector",
            FundColumn::Type => "type",
            FundColumn::Close => "close",
            FundColumn::Change => "change",
            FundColumn::Volume => "volume",
            FundColumn::MarketCap => "market_cap",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_ascii_lowercase();
        match key.as_str() {
            "ticker" => Some(FundColumn::Ticker),
            "marketcap" | "market-cap" => Some(FundColumn::MarketCap),
            _ => Self::ALL.into_iter().find(|column| column.key() == key),
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            FundColumn::Close | FundColumn::Change | FundColumn::Volume | FundColumn::MarketCap
        )
    }

    pub fn is_sortable(self) -> bool {
        !matches!(self, FundColumn::Logo)
    }

    fn value(self, row: &FundRow) -> SortValue<'_> {
        match self {
            FundColumn::Logo => SortValue::text(row.logo.as_deref()),
            FundColumn::Ticker => SortValue::text(Some(row.stock.as_str())),
            FundColumn::Name => SortValue::text(row.name.as_deref()),
            FundColumn::Sector => SortValue::text(row.sector.as_deref()),
            FundColumn::Type => SortValue::text(row.fund_type.as_deref()),
            FundColumn::Close => SortValue::number(row.close),
            FundColumn::Change => SortValue::number(row.change),
            FundColumn::Volume => SortValue::number(row.volume),
            FundColumn::MarketCap => SortValue::number(row.market_cap),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            SortDirection::Descending => "▼",
            SortDirection::Ascending => "▲",
        }
    }
}

/// Glyph for a sortable header that is not the active sort key.
pub const NEUTRAL_SORT_GLYPH: &str = "⇅";

/// Active sort key and direction. `key == None` keeps rows in fetch order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SortState {
    pub key: Option<FundColumn>,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            key: None,
            direction: SortDirection::Descending,
        }
    }
}

impl SortState {
    /// Transition applied when a header is activated.
    pub fn on_header_click(self, column: FundColumn) -> Self {
        if !column.is_sortable() {
            return self;
        }
        if self.key == Some(column) {
            Self {
                key: Some(column),
                direction: self.direction.flip(),
            }
        } else {
            Self {
                key: Some(column),
                direction: SortDirection::Descending,
            }
        }
    }

    /// Header indicator for `column`, `None` for non-sortable columns.
    pub fn header_glyph(self, column: FundColumn) -> Option<&'static str> {
        if !column.is_sortable() {
            return None;
        }
        if self.key == Some(column) {
            Some(self.direction.glyph())
        } else {
            Some(NEUTRAL_SORT_GLYPH)
        }
    }

    pub fn describe(self) -> String {
        match self.key {
            Some(column) => format!("{} {}", column.label(), self.direction.glyph()),
            None => "sem ordenação".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum SortValue<'a> {
    Missing,
    Text(&'a str),
    Number(f64),
}

impl<'a> SortValue<'a> {
    fn text(value: Option<&'a str>) -> Self {
        match value {
            Some(text) if !text.is_empty() => SortValue::Text(text),
            _ => SortValue::Missing,
        }
    }

    fn number(value: Option<f64>) -> Self {
        value.map(SortValue::Number).unwrap_or(SortValue::Missing)
    }
}

/// Order two cells of the same column. Missing values go last when ascending
/// and first when descending.
fn compare_values(a: SortValue<'_>, b: SortValue<'_>, direction: SortDirection) -> Ordering {
    let ord = match (a, b) {
        (SortValue::Missing, SortValue::Missing) => return Ordering::Equal,
        (SortValue::Missing, _) => {
            return match direction {
                SortDirection::Ascending => Ordering::Greater,
                SortDirection::Descending => Ordering::Less,
            }
        }
        (_, SortValue::Missing) => {
            return match direction {
                SortDirection::Ascending => Ordering::Less,
                SortDirection::Descending => Ordering::Greater,
            }
        }
        (SortValue::Number(a), SortValue::Number(b)) => cmp_f64(a, b),
        (a, b) => sort_text(a).cmp(&sort_text(b)),
    };

    match direction {
        SortDirection::Ascending => ord,
        SortDirection::Descending => ord.reverse(),
    }
}

fn sort_text(value: SortValue<'_>) -> String {
    match value {
        SortValue::Text(text) => text.to_lowercase(),
        SortValue::Number(n) => n.to_string(),
        SortValue::Missing => String::new(),
    }
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Stable-sort a copy of `rows`; the input order is kept for ties and when no
/// key is active.
pub fn sort_rows(rows: &[FundRow], state: SortState) -> Vec<FundRow> {
    let mut sorted = rows.to_vec();
    if let Some(column) = state.key {
        sorted.sort_by(|a, b| compare_values(column.value(a), column.value(b), state.direction));
    }
    sorted
}
