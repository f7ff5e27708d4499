use unicode_width::UnicodeWidthStr;

use crate::app::PageView;
use crate::table::{render_cell, sort_rows, FundColumn, Locale, SortState};

const COLUMN_GAP: &str = "  ";

/// Plain-text rendering of the page for non-interactive output.
pub fn render_plain(view: &PageView, sort: SortState, locale: Locale) -> String {
    if let Some(message) = view.error() {
        return format!("! {message}\n");
    }

    let rows = sort_rows(view.rows(), sort);

    let header: Vec<String> = FundColumn::ALL
        .iter()
        .map(|column| match sort.header_glyph(*column) {
            Some(glyph) => format!("{} {}", column.label(), glyph),
            None => column.label().to_string(),
        })
        .collect();

    let body: Vec<Vec<(String, bool)>> = rows
        .iter()
        .map(|row| {
            FundColumn::ALL
                .iter()
                .map(|column| {
                    let cell = render_cell(*column, row, locale);
                    (cell.plain_text().into_owned(), cell.is_numeric())
                })
                .collect()
        })
        .collect();

    let widths: Vec<usize> = (0..FundColumn::ALL.len())
        .map(|idx| {
            body.iter()
                .map(|cells| UnicodeWidthStr::width(cells[idx].0.as_str()))
                .chain(std::iter::once(UnicodeWidthStr::width(header[idx].as_str())))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let header_cells: Vec<(String, bool)> = header.into_iter().map(|label| (label, false)).collect();
    push_line(&mut out, &header_cells, &widths);
    let rule: Vec<(String, bool)> = widths.iter().map(|w| ("-".repeat(*w), false)).collect();
    push_line(&mut out, &rule, &widths);
    for cells in &body {
        push_line(&mut out, cells, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[(String, bool)], widths: &[usize]) {
    let mut line = String::new();
    for (idx, ((text, right_align), width)) in cells.iter().zip(widths).enumerate() {
        if idx > 0 {
            line.push_str(COLUMN_GAP);
        }
        let padding = width.saturating_sub(UnicodeWidthStr::width(text.as_str()));
        if *right_align {
            line.push_str(&" ".repeat(padding));
            line.push_str(text);
        } else {
            line.push_str(text);
            line.push_str(&" ".repeat(padding));
        }
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FundRow;
    use crate::records::{Snapshot, SnapshotSource};
    use crate::table::SortDirection;
    use chrono::Local;

    fn loaded(rows: Vec<FundRow>) -> PageView {
        PageView::Loaded(Snapshot {
            rows,
            fetched_at: Local::now(),
            source: SnapshotSource::Network,
        })
    }

    #[test]
    fn prints_sorted_rows_with_aligned_numbers() {
        let view = loaded(vec![
            FundRow {
                stock: "LOW11".to_string(),
                close: Some(9.5),
                ..FundRow::default()
            },
            FundRow {
                stock: "HIGH11".to_string(),
                close: Some(1234.5),
                ..FundRow::default()
            },
        ]);
        let sort = SortState {
            key: Some(FundColumn::Close),
            direction: SortDirection::Descending,
        };
        let text = render_plain(&view, sort, Locale::PtBr);
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].contains("Preço (R$) ▼"));
        assert!(lines[0].contains("Ticker ⇅"));
        assert!(lines[2].contains("HIGH11"));
        assert!(lines[3].contains("LOW11"));

        let high = lines[2].find("1.234,5").unwrap();
        let low = lines[3].find("9,5").unwrap();
        assert_eq!(high + "1.234,5".len(), low + "9,5".len());
    }

    #[test]
    fn failure_prints_only_the_banner() {
        let view = PageView::Failed("Falha ao buscar dados (500)".to_string());
        assert_eq!(
            render_plain(&view, SortState::default(), Locale::PtBr),
            "! Falha ao buscar dados (500)\n"
        );
    }
}
