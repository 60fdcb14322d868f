//! Rico brokerage account (conta corrente) spreadsheet parser
//!
//! The export places the movement table somewhere below a banner, not
//! necessarily in the first column:
//!   |   | Movimentação | Liquidação | Lançamento   | Valor   | Saldo   |
//!   |   | 2020-01-01   | 2020-01-02 | TED RECEBIDA | 1234.56 | 2000.00 |
//!
//! The grid is read by the caller (see `firefly-cli`), so this module only
//! deals with cells.

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::error::IngestError;
use crate::types::{Cell, ConvertedTable};

pub const EXPECTED_COLUMNS: [&str; 5] = ["Movimentação", "Liquidação", "Lançamento", "Valor", "Saldo"];

const HEADER_MARKER: &str = "movimenta";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Date,
    Amount,
    Text,
}

impl ColumnKind {
    fn of(label: &str) -> Self {
        let lower = label.to_lowercase();
        if lower.contains("moviment") || lower.contains("liquida") {
            ColumnKind::Date
        } else if lower.contains("valor") || lower.contains("saldo") {
            ColumnKind::Amount
        } else {
            ColumnKind::Text
        }
    }

    fn render(self, cell: &Cell) -> String {
        match self {
            ColumnKind::Date => cell_date(cell)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            ColumnKind::Amount => cell_number(cell)
                .map(|n| format!("{n:.2}").replace('.', ","))
                .unwrap_or_default(),
            ColumnKind::Text => cell.as_text(),
        }
    }
}

/// Locate the header row/column: the first cell starting with "movimenta".
fn find_header(rows: &[Vec<Cell>]) -> Option<(usize, usize)> {
    rows.iter().enumerate().find_map(|(r, row)| {
        row.iter()
            .position(|cell| cell.as_text().trim().to_lowercase().starts_with(HEADER_MARKER))
            .map(|c| (r, c))
    })
}

/// Convert a Rico account sheet into `Movimentação; Liquidação; Lançamento; Valor; Saldo`.
pub fn parse_rico_sheet(rows: &[Vec<Cell>]) -> Result<ConvertedTable> {
    let (header_row, header_col) =
        find_header(rows).ok_or_else(|| IngestError::HeaderNotFound(EXPECTED_COLUMNS[0].to_string()))?;

    let header_cells: Vec<String> = rows[header_row][header_col..]
        .iter()
        .map(|cell| cell.as_text().trim().to_lowercase())
        .collect();

    // (label, absolute column index); first matching column wins
    let columns: Vec<(&str, usize)> = EXPECTED_COLUMNS
        .iter()
        .filter_map(|label| {
            let prefix = label.to_lowercase();
            header_cells
                .iter()
                .position(|h| h.starts_with(&prefix))
                .map(|j| (*label, header_col + j))
        })
        .collect();

    let mut table = ConvertedTable::new(columns.iter().map(|(label, _)| label.to_string()).collect());
    let empty = Cell::Empty;

    for row in &rows[header_row + 1..] {
        let cells: Vec<&Cell> = columns
            .iter()
            .map(|(_, idx)| row.get(*idx).unwrap_or(&empty))
            .collect();

        if cells.iter().all(|cell| cell.is_empty()) {
            break;
        }

        table.rows.push(
            columns
                .iter()
                .zip(cells)
                .map(|((label, _), cell)| ColumnKind::of(label).render(cell))
                .collect(),
        );
    }

    debug!(
        header_row,
        header_col,
        columns = table.header.len(),
        rows = table.len(),
        "parsed Rico account sheet"
    );
    Ok(table)
}

fn cell_date(cell: &Cell) -> Option<NaiveDate> {
    match cell {
        Cell::DateTime(dt) => Some(dt.date()),
        Cell::Text(s) => {
            let s = s.trim();
            NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
                .map(|dt| dt.date())
                .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
                .or_else(|_| NaiveDate::parse_from_str(s, "%d/%m/%Y"))
                .ok()
        }
        _ => None,
    }
}

fn cell_number(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Number(n) if n.is_finite() => Some(*n),
        Cell::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn datetime(s: &str) -> Cell {
        Cell::DateTime(NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap())
    }

    #[test]
    fn test_parses_and_formats() {
        let rows = vec![
            vec![Cell::Empty; 6],
            vec![Cell::Empty; 6],
            vec![
                Cell::Empty,
                text("Movimentação"),
                text("Liquidação"),
                text("Lançamento"),
                text("Valor (R$)"),
                text("Saldo (R$)"),
            ],
            vec![
                Cell::Empty,
                datetime("2020-01-01 12:34:56"),
                datetime("2020-01-02 00:00:00"),
                text("Desc A"),
                Cell::Number(1234.56),
                Cell::Number(2000.0),
            ],
            vec![
                Cell::Empty,
                datetime("2020-02-03 00:00:00"),
                datetime("2020-02-04 00:00:00"),
                text("Desc B"),
                Cell::Number(789.0),
                Cell::Empty,
            ],
        ];

        let table = parse_rico_sheet(&rows).unwrap();
        assert_eq!(table.header, EXPECTED_COLUMNS.to_vec());
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0], vec!["2020-01-01", "2020-01-02", "Desc A", "1234,56", "2000,00"]);
        assert_eq!(table.get(1, "Valor"), Some("789,00"));
        assert_eq!(table.get(1, "Saldo"), Some(""));
    }

    #[test]
    fn test_truncates_after_empty_row() {
        let rows = vec![
            vec![Cell::Empty; 4],
            vec![text(""), text("Movimentação"), text("Liquidação"), text("Valor")],
            vec![Cell::Empty, text("2021-01-01"), text("2021-01-02"), Cell::Number(10.0)],
            vec![Cell::Empty; 4],
            vec![Cell::Empty, text("2022-01-01"), text("2022-01-02"), Cell::Number(20.0)],
        ];

        let table = parse_rico_sheet(&rows).unwrap();
        assert_eq!(table.header, vec!["Movimentação", "Liquidação", "Valor"]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(0, "Valor"), Some("10,00"));
    }

    #[test]
    fn test_columns_reordered_and_unknown_dropped() {
        let rows = vec![
            vec![text("Saldo"), text("Movimentação"), text("Observação"), text("Valor")],
            vec![text("5"), text("03/02/2021"), text("x"), text("abc")],
        ];

        let table = parse_rico_sheet(&rows).unwrap();
        assert_eq!(table.header, vec!["Movimentação", "Valor"]);
        assert_eq!(table.rows[0], vec!["2021-02-03", ""]);
    }

    #[test]
    fn test_missing_header() {
        let rows = vec![
            vec![text("Some"), text("Other"), text("Columns")],
            vec![Cell::Number(1.0), Cell::Number(2.0), Cell::Number(3.0)],
        ];

        let err = parse_rico_sheet(&rows).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<IngestError>(),
            Some(IngestError::HeaderNotFound(_))
        ));
    }
}
