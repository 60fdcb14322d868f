//! Banco do Brasil LCI/LCA statement parser (text)
//!
//! Expected text sections (fixed-width report saved from Autoatendimento BB):
//! ```text
//!    DATA        HISTÓRICO       VALOR DE CAPITAL      IR          IOF      RENDIMENTOS   VALOR MOVIMENTO   VALOR ATUAL
//!  31/03/2025 Saldo Anterior                 0,00        0,00        0,00           0,00             0,00             0
//!  07/04/2025 Aplicação                 30.000,00        0,00        0,00           0,00        30.000,00       3000000
//!  30/04/2025 Saldo Atual               30.000,00        0,00        0,00         220,59             0,00       3022059
//!
//!                                                   RESUMO DO MÊS
//!                                    RENDIMENTO BRUTO                           220,59
//!                                    IMPOSTO DE RENDA                             0,00
//! ```
//!
//! Table rows become movements. The balance anchors ("Saldo Anterior",
//! "Saldo Atual") are dropped, but the "Saldo Atual" date is reused to date
//! the gross yield, income tax and IOF figures taken from the month summary.
//!
//! The description is whatever precedes the last six numeric tokens. When the
//! report leaves a column blank, a description ending in a number-like token
//! lends that token to the columns and the row is split at the wrong place.

use std::collections::HashMap;

use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::number::{is_zero_amount, normalize_number};
use crate::types::ConvertedTable;

/// Summary labels folded into the output, in emission order.
const SUMMARY_LABELS: [&str; 3] = ["RENDIMENTO BRUTO", "IMPOSTO DE RENDA", "IOF"];

/// One row of the transaction table, fields as printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub date: String,
    pub description: String,
    pub capital_value: String,
    pub ir: String,
    pub iof: String,
    pub earnings: String,
    pub movement_value: String,
    pub current_value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Table(TableRow),
    Summary { label: String, value: String },
    Other,
}

/// A row of the converted statement: `Data; Histórico; Valor Movimento`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub date: String,
    pub description: String,
    pub amount: String,
}

impl OutputRecord {
    fn into_row(self) -> Vec<String> {
        vec![self.date, self.description, self.amount]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BbLcStatement {
    pub records: Vec<OutputRecord>,
}

impl BbLcStatement {
    pub const HEADER: [&'static str; 3] = ["Data", "Histórico", "Valor Movimento"];

    pub fn into_table(self) -> ConvertedTable {
        ConvertedTable {
            header: Self::HEADER.iter().map(|h| h.to_string()).collect(),
            rows: self.records.into_iter().map(OutputRecord::into_row).collect(),
        }
    }
}

/// Compiled line grammars for the LCI/LCA report.
#[derive(Debug, Clone)]
pub struct BbLcParser {
    table_re: Regex,
    summary_re: Regex,
}

impl BbLcParser {
    pub fn new() -> Result<Self> {
        let table_re = Regex::new(concat!(
            r"^ *(?P<date>\d{2}/\d{2}/\d{4})\s+",
            r"(?P<desc>.+?)\s+",
            r"(?P<capital>-?[\d.,]+)\s+",
            r"(?P<ir>-?[\d.,]+)\s+",
            r"(?P<iof>-?[\d.,]+)\s+",
            r"(?P<earnings>-?[\d.,]+)\s+",
            r"(?P<movement>-?[\d.,]+)\s+",
            r"(?P<current>-?[\d.,]+)\s*$"
        ))?;
        let summary_re =
            Regex::new(r"^\s*(?P<label>[A-ZÇÃÕÁÉÍÓÚÂÊÔÜ\s]+)\s+(?P<value>-?[\d.,]+)\s*$")?;

        Ok(Self {
            table_re,
            summary_re,
        })
    }

    /// Classify one line; the table grammar is tried before the summary one.
    pub fn classify(&self, line: &str) -> LineKind {
        if let Some(caps) = self.table_re.captures(line) {
            return LineKind::Table(TableRow {
                date: caps["date"].to_string(),
                description: collapse_whitespace(&caps["desc"]),
                capital_value: caps["capital"].to_string(),
                ir: caps["ir"].to_string(),
                iof: caps["iof"].to_string(),
                earnings: caps["earnings"].to_string(),
                movement_value: caps["movement"].to_string(),
                current_value: caps["current"].to_string(),
            });
        }

        if let Some(caps) = self.summary_re.captures(line) {
            return LineKind::Summary {
                label: collapse_whitespace(&caps["label"]).to_uppercase(),
                value: caps["value"].to_string(),
            };
        }

        LineKind::Other
    }

    pub fn parse(&self, text: &str) -> BbLcStatement {
        let mut records = Vec::new();
        let mut saldo_atual_date: Option<String> = None;
        let mut summary_items: HashMap<String, String> = HashMap::new();
        let mut table_rows = 0usize;

        for line in text.lines() {
            match self.classify(line) {
                LineKind::Table(row) => {
                    table_rows += 1;
                    let lower = row.description.to_lowercase();
                    if lower.starts_with("saldo anterior") {
                        continue;
                    }
                    if lower.starts_with("saldo atual") {
                        // later anchors replace earlier ones
                        saldo_atual_date = Some(row.date);
                        continue;
                    }
                    records.push(OutputRecord {
                        amount: normalize_number(&row.movement_value),
                        date: row.date,
                        description: row.description,
                    });
                }
                LineKind::Summary { label, value } => {
                    summary_items.insert(label, value);
                }
                LineKind::Other => {}
            }
        }

        match &saldo_atual_date {
            Some(date) => {
                for label in SUMMARY_LABELS {
                    let Some(value) = summary_items.get(label) else {
                        continue;
                    };
                    let amount = normalize_number(value);
                    if is_zero_amount(&amount) {
                        continue;
                    }
                    records.push(OutputRecord {
                        date: date.clone(),
                        description: title_case(label),
                        amount,
                    });
                }
            }
            None => debug!("no Saldo Atual row; summary figures skipped"),
        }

        debug!(
            table_rows,
            summary_items = summary_items.len(),
            records = records.len(),
            "parsed BB LCI/LCA statement"
        );

        BbLcStatement { records }
    }
}

/// Parse an LCI/LCA statement report into Firefly rows.
pub fn parse_bb_lc_text(text: &str) -> Result<BbLcStatement> {
    Ok(BbLcParser::new()?.parse(text))
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Capitalize the first letter of every word and lowercase the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}
