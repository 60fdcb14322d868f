//! Banco do Brasil checking account (conta corrente) CSV parser
//!
//! Expected export:
//!   "Data","Lançamento","Detalhes","N° documento","Valor","Tipo Lançamento"
//!   "02/04/2025","Pix - Enviado","02/04 12:01 Fulano","40201","1.250,00 D",""
//!
//! The `Valor` column carries the credit/debit flag glued to the amount;
//! it is split into `Valor` and a new `Type` column right after it.

use anyhow::Result;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::IngestError;
use crate::types::ConvertedTable;

const VALUE_COLUMN: &str = "Valor";
const TYPE_COLUMN: &str = "Type";

/// Parse a BB checking account CSV export, splitting `Valor` into value + C/D flag.
pub fn parse_bb_cp_csv(text: &str) -> Result<ConvertedTable> {
    let value_re = Regex::new(r"^(?P<value>[\d.,]+)\s*(?P<kind>[CD])")?;

    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(text.as_bytes());

    let input_header: Vec<String> = rdr
        .headers()
        .map_err(IngestError::from)?
        .iter()
        .map(|h| h.trim_matches('"').to_string())
        .collect();

    let value_idx = input_header
        .iter()
        .position(|h| h == VALUE_COLUMN)
        .ok_or_else(|| IngestError::MissingColumn(VALUE_COLUMN.to_string()))?;

    let mut header = input_header.clone();
    header.insert(value_idx + 1, TYPE_COLUMN.to_string());
    let mut table = ConvertedTable::new(header);

    for result in rdr.records() {
        let record = result.map_err(IngestError::from)?;

        let mut row: Vec<String> = input_header
            .iter()
            .enumerate()
            .map(|(i, name)| {
                if name.is_empty() {
                    String::new()
                } else {
                    record.get(i).unwrap_or("").to_string()
                }
            })
            .collect();

        let original = row[value_idx].trim().to_string();
        let kind = match value_re.captures(&original) {
            Some(caps) => {
                row[value_idx] = caps["value"].to_string();
                caps["kind"].to_string()
            }
            None => {
                if !original.is_empty() {
                    warn!(value = %original, "Valor without C/D flag");
                }
                String::new()
            }
        };
        row.insert(value_idx + 1, kind);

        table.rows.push(row);
    }

    debug!(rows = table.len(), "parsed BB checking account CSV");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_value_and_type() {
        let text = r#""Data","Lançamento","Valor","Saldo"
"02/04/2025","Pix - Enviado","1.250,00 D","3.000,00 C"
"03/04/2025","Pix - Recebido","80,00C",""
"#;
        let table = parse_bb_cp_csv(text).unwrap();
        assert_eq!(table.header, vec!["Data", "Lançamento", "Valor", "Type", "Saldo"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(0, "Valor"), Some("1.250,00"));
        assert_eq!(table.get(0, "Type"), Some("D"));
        assert_eq!(table.get(0, "Saldo"), Some("3.000,00 C"));
        assert_eq!(table.get(1, "Valor"), Some("80,00"));
        assert_eq!(table.get(1, "Type"), Some("C"));
    }

    #[test]
    fn test_unflagged_value_kept() {
        let text = "Data,Valor\n01/04/2025,123\n02/04/2025,\n";
        let table = parse_bb_cp_csv(text).unwrap();
        assert_eq!(table.get(0, "Valor"), Some("123"));
        assert_eq!(table.get(0, "Type"), Some(""));
        assert_eq!(table.get(1, "Valor"), Some(""));
        assert_eq!(table.get(1, "Type"), Some(""));
    }

    #[test]
    fn test_short_rows_padded_and_unnamed_columns_blank() {
        let text = "Data,Valor,\n01/04/2025,5,00 D,junk\n02/04/2025\n";
        let table = parse_bb_cp_csv(text).unwrap();
        assert_eq!(table.header, vec!["Data", "Valor", "Type", ""]);
        assert_eq!(table.rows[0], vec!["01/04/2025", "5", "", ""]);
        assert_eq!(table.rows[1], vec!["02/04/2025", "", "", ""]);
    }

    #[test]
    fn test_missing_valor_column() {
        let err = parse_bb_cp_csv("Data,Amount\n01/04/2025,1\n").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<IngestError>(),
            Some(IngestError::MissingColumn(c)) if c == "Valor"
        ));
    }
}
