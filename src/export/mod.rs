use std::fs;
use std::path::Path;

use crate::app::PageView;
use crate::error::{Context, Result};
use crate::table::{sort_rows, Locale, SortState};

pub mod csv;
pub mod html;
pub mod text;

pub use html::render_html;
pub use text::render_plain;

/// Write the sorted table as CSV. Fails when the page holds an error.
pub fn export_csv(path: &Path, view: &PageView, sort: SortState) -> Result<usize> {
    if let Some(message) = view.error() {
        return Err(crate::error::AppError::message(message));
    }
    let rows = sort_rows(view.rows(), sort);
    let file = fs::File::create(path)
        .with_context(|| format!("Failed to create CSV export {}", path.display()))?;
    csv::write_rows_csv(file, &rows)?;
    Ok(rows.len())
}

/// Write the sorted table, or the error banner, as a standalone HTML page.
pub fn export_html(
    path: &Path,
    view: &PageView,
    sort: SortState,
    locale: Locale,
    source_url: &str,
) -> Result<()> {
    let html = render_html(view, sort, locale, source_url);
    fs::write(path, html)
        .with_context(|| format!("Failed to write HTML export {}", path.display()))?;
    Ok(())
}
