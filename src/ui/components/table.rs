use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Row, Table},
};
use unicode_width::UnicodeWidthStr;

use crate::fetch::FundRow;
use crate::table::{render_cell, FundCell, FundColumn, Locale, SortState};
use crate::ui::styles;

const MAX_TEXT_WIDTH: usize = 36;

fn header_label(column: FundColumn, sort: SortState) -> String {
    match sort.header_glyph(column) {
        Some(glyph) => format!("{} {}", column.label(), glyph),
        None => column.label().to_string(),
    }
}

/// Width of each column: the widest of its header and the given rows' cells.
pub fn column_widths(rows: &[FundRow], sort: SortState, locale: Locale) -> Vec<u16> {
    FundColumn::ALL
        .iter()
        .map(|column| {
            let header = UnicodeWidthStr::width(header_label(*column, sort).as_str());
            let data = rows
                .iter()
                .map(|row| {
                    UnicodeWidthStr::width(render_cell(*column, row, locale).plain_text().as_ref())
                })
                .max()
                .unwrap_or(0)
                .min(MAX_TEXT_WIDTH);
            u16::try_from(header.max(data)).unwrap_or(u16::MAX)
        })
        .collect()
}

fn header_row(sort: SortState, focus: Option<FundColumn>) -> Row<'static> {
    let cells: Vec<Cell> = FundColumn::ALL
        .iter()
        .map(|column| {
            Cell::from(header_label(*column, sort))
                .style(styles::column_header_style(focus == Some(*column)))
        })
        .collect();
    Row::new(cells)
}

fn body_cell(cell: FundCell<'_>) -> Cell<'static> {
    let text = cell.plain_text().into_owned();
    match cell {
        FundCell::Logo(Some(_)) => Cell::from(text).style(Style::default().fg(styles::ACCENT)),
        FundCell::Logo(None) | FundCell::Missing => {
            Cell::from(text).style(styles::placeholder_style())
        }
        FundCell::Ticker(_) => Cell::from(text).style(styles::ticker_style()),
        FundCell::Text(_) => Cell::from(text),
        FundCell::Number(_) => Cell::from(Line::from(text).alignment(Alignment::Right)),
        FundCell::Change { trend, .. } => Cell::from(
            Line::from(Span::styled(text, styles::trend_style(trend))).alignment(Alignment::Right),
        ),
    }
}

/// Table widget for `rows`; `selected` indexes into `rows`.
pub fn build_fund_table<'a>(
    rows: &[FundRow],
    widths: &[u16],
    sort: SortState,
    focus: Option<FundColumn>,
    selected: Option<usize>,
    locale: Locale,
    title: impl Into<String>,
) -> Table<'a> {
    let body: Vec<Row> = rows
        .iter()
        .enumerate()
        .map(|(idx, fund)| {
            let cells: Vec<Cell> = FundColumn::ALL
                .iter()
                .map(|column| body_cell(render_cell(*column, fund, locale)))
                .collect();
            let row = Row::new(cells);
            if selected == Some(idx) {
                row.style(styles::selected_row_style())
            } else {
                row
            }
        })
        .collect();

    let constraints: Vec<Constraint> = widths.iter().map(|w| Constraint::Length(*w)).collect();

    Table::new(body, constraints)
        .header(header_row(sort, focus))
        .block(Block::default().borders(Borders::ALL).title(title.into()))
        .column_spacing(2)
}
