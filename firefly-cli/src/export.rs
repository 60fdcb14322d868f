use anyhow::{Context, Result};
use firefly_ingest::{ConvertedTable, OutputFormat, Quoting};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Write `table` as CSV to any sink. Returns the number of data rows.
pub fn write_table<W: Write>(table: &ConvertedTable, format: OutputFormat, mut sink: W) -> Result<usize> {
    if format.bom {
        sink.write_all(UTF8_BOM).context("write BOM")?;
    }

    let quote_style = match format.quoting {
        Quoting::All => csv::QuoteStyle::Always,
        Quoting::Minimal => csv::QuoteStyle::Necessary,
    };

    let mut wtr = csv::WriterBuilder::new()
        .delimiter(format.delimiter)
        .quote_style(quote_style)
        .terminator(csv::Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(sink);

    wtr.write_record(&table.header).context("write CSV header")?;
    for row in &table.rows {
        wtr.write_record(row).context("write CSV row")?;
    }
    wtr.flush().context("flush CSV")?;

    Ok(table.len())
}

pub fn write_table_to_path(table: &ConvertedTable, format: OutputFormat, path: &Path) -> Result<usize> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_table(table, format, BufWriter::new(file))
        .with_context(|| format!("write {}", path.display()))
}
