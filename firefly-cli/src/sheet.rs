use anyhow::{Context, Result};
use calamine::{Data, Reader, open_workbook_auto};
use chrono::NaiveDateTime;
use firefly_ingest::Cell;
use std::path::Path;
use tracing::debug;

/// Read the first worksheet of a workbook into a cell grid.
pub fn read_first_sheet(path: &Path) -> Result<Vec<Vec<Cell>>> {
    let mut workbook =
        open_workbook_auto(path).with_context(|| format!("open workbook {}", path.display()))?;

    let first_sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .with_context(|| format!("no worksheet in {}", path.display()))?;

    let range = workbook
        .worksheet_range(&first_sheet)
        .with_context(|| format!("read worksheet {first_sheet:?} of {}", path.display()))?;

    let rows: Vec<Vec<Cell>> = range
        .rows()
        .map(|row| row.iter().map(to_cell).collect())
        .collect();

    debug!(sheet = %first_sheet, rows = rows.len(), "read worksheet");
    Ok(rows)
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(dt) => Cell::DateTime(dt),
            None => Cell::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
            .map(Cell::DateTime)
            .unwrap_or_else(|_| Cell::Text(s.clone())),
        Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(_) => Cell::Empty,
    }
}
