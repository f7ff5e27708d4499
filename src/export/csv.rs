use std::io;

use crate::error::Result;
use crate::fetch::FundRow;

/// Column order of fund CSV files.
pub const CSV_HEADER: [&str; 9] = [
    "stock",
    "name",
    "sector",
    "type",
    "close",
    "change",
    "volume",
    "market_cap",
    "logo",
];

/// Write `rows` with raw values; `None` becomes an empty field. The header is
/// written even when there are no rows.
pub fn write_rows_csv<W: io::Write>(writer: W, rows: &[FundRow]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    writer.write_record(CSV_HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_rows_csv<R: io::Read>(reader: R) -> Result<Vec<FundRow>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        rows.push(record?);
    }
    Ok(rows)
}
