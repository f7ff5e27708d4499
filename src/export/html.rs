use std::fmt::Write;

use crate::app::PageView;
use crate::table::{render_cell, sort_rows, FundCell, FundColumn, Locale, SortState, Trend};

const STYLE: &str = "body{font-family:-apple-system,BlinkMacSystemFont,\"Segoe UI\",Roboto,Arial,sans-serif;margin:0;padding:24px;color:#222}\
main{max-width:1200px;margin:0 auto}\
.source{font-size:.875rem;opacity:.7}\
.banner{border:1px solid rgba(239,68,68,.3);background:rgba(239,68,68,.1);border-radius:6px;padding:16px;font-size:.875rem}\
table{min-width:100%;border-collapse:collapse}\
th,td{padding:8px 12px;text-align:left;border-bottom:1px solid rgba(0,0,0,.1);white-space:nowrap}\
th{position:sticky;top:0;background:#fff;font-size:.875rem}\
tbody tr:nth-of-type(odd){background:rgba(0,0,0,.03)}\
td.num{text-align:right;font-variant-numeric:tabular-nums}\
td.ticker{font-family:monospace;font-size:.75rem}\
.glyph{font-size:.75rem;opacity:.7}\
.logo{width:24px;height:24px;border-radius:4px}\
.logo-placeholder{width:24px;height:24px;border-radius:4px;background:rgba(0,0,0,.1)}\
.up{color:#16a34a}.down{color:#dc2626}";

/// Render the page as a standalone HTML document.
pub fn render_html(view: &PageView, sort: SortState, locale: Locale, source_url: &str) -> String {
    let mut out = String::with_capacity(4096 + view.rows().len() * 512);
    let lang = locale.tag();

    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html lang=\"{lang}\">\n<head>\n<meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>Fundos Imobiliários (FIIs)</title>\n<style>{STYLE}</style>\n</head>\n<body>\n<main>\n\
         <header>\n<h1>Fundos Imobiliários (FIIs)</h1>\n\
         <p class=\"source\">Fonte: brapi — <a href=\"{url}\">{url}</a></p>\n</header>\n",
        url = escape(source_url)
    );

    match view.error() {
        Some(message) => {
            let _ = writeln!(out, "<div class=\"banner\">{}</div>", escape(message));
        }
        None => push_table(&mut out, view, sort, locale),
    }

    out.push_str("</main>\n</body>\n</html>\n");
    out
}

fn push_table(out: &mut String, view: &PageView, sort: SortState, locale: Locale) {
    out.push_str("<table>\n<thead>\n<tr>");
    for column in FundColumn::ALL {
        let _ = write!(out, "<th>{}", escape(column.label()));
        if let Some(glyph) = sort.header_glyph(column) {
            let _ = write!(out, " <span class=\"glyph\">{glyph}</span>");
        }
        out.push_str("</th>");
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");

    for row in sort_rows(view.rows(), sort) {
        out.push_str("<tr>");
        for column in FundColumn::ALL {
            push_cell(out, &render_cell(column, &row, locale), &row.stock);
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");
}

fn push_cell(out: &mut String, cell: &FundCell<'_>, stock: &str) {
    let _ = match cell {
        FundCell::Logo(Some(url)) => write!(
            out,
            "<td><img class=\"logo\" src=\"{}\" alt=\"{}\" width=\"24\" height=\"24\"></td>",
            escape(url),
            escape(stock)
        ),
        FundCell::Logo(None) => write!(out, "<td><div class=\"logo-placeholder\"></div></td>"),
        FundCell::Ticker(text) => write!(out, "<td class=\"ticker\">{}</td>", escape(text)),
        FundCell::Text(text) => write!(out, "<td>{}</td>", escape(text)),
        FundCell::Number(text) => write!(out, "<td class=\"num\">{}</td>", escape(text)),
        FundCell::Change { text, trend } => {
            let class = match trend {
                Trend::Up => " class=\"up\"",
                Trend::Down => " class=\"down\"",
                Trend::Flat => "",
            };
            write!(out, "<td class=\"num\"><span{class}>{}</span></td>", escape(text))
        }
        FundCell::Missing => write!(out, "<td>{}</td>", cell.plain_text()),
    };
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
