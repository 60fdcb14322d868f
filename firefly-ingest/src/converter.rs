//! One entry per supported export: which parser reads it and how the
//! converted table is written back out.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::parsers::{bb_cp, bb_lc, ourocard_ofx, rico_cc};
use crate::types::{Cell, ConvertedTable, OutputFormat, Quoting};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConverterKind {
    /// Banco do Brasil LCI/LCA statement (fixed-width text)
    BbLc,
    /// Banco do Brasil checking account (CSV)
    BbCp,
    /// Ourocard credit card (OFX)
    OurocardOfx,
    /// Rico account (XLSX)
    RicoCc,
}

/// What a converter consumes.
#[derive(Debug, Clone, PartialEq)]
pub enum StatementInput {
    Text(String),
    Sheet(Vec<Vec<Cell>>),
}

impl ConverterKind {
    pub const ALL: [ConverterKind; 4] = [
        ConverterKind::BbLc,
        ConverterKind::BbCp,
        ConverterKind::OurocardOfx,
        ConverterKind::RicoCc,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ConverterKind::BbLc => "bb-lc",
            ConverterKind::BbCp => "bb-cp",
            ConverterKind::OurocardOfx => "ourocard-ofx",
            ConverterKind::RicoCc => "rico-cc",
        }
    }

    /// Spreadsheet converters need a decoded grid instead of text.
    pub fn reads_sheet(self) -> bool {
        matches!(self, ConverterKind::RicoCc)
    }

    pub fn output_format(self) -> OutputFormat {
        match self {
            ConverterKind::BbLc => OutputFormat {
                delimiter: b';',
                quoting: Quoting::All,
                bom: false,
            },
            ConverterKind::BbCp => OutputFormat {
                delimiter: b',',
                quoting: Quoting::All,
                bom: false,
            },
            ConverterKind::OurocardOfx => OutputFormat {
                delimiter: b';',
                quoting: Quoting::Minimal,
                bom: false,
            },
            ConverterKind::RicoCc => OutputFormat {
                delimiter: b';',
                quoting: Quoting::Minimal,
                bom: true,
            },
        }
    }

    pub fn convert(self, input: &StatementInput) -> Result<ConvertedTable> {
        match (self, input) {
            (ConverterKind::BbLc, StatementInput::Text(text)) => {
                Ok(bb_lc::parse_bb_lc_text(text)?.into_table())
            }
            (ConverterKind::BbCp, StatementInput::Text(text)) => bb_cp::parse_bb_cp_csv(text),
            (ConverterKind::OurocardOfx, StatementInput::Text(text)) => {
                Ok(ourocard_ofx::into_table(ourocard_ofx::parse_ofx_text(text)?))
            }
            (ConverterKind::RicoCc, StatementInput::Sheet(rows)) => rico_cc::parse_rico_sheet(rows),
            (kind, _) => bail!("{} cannot read this kind of input", kind.name()),
        }
    }
}

impl std::fmt::Display for ConverterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bb_lc_through_converter() {
        let input = StatementInput::Text(
            " 07/04/2025 Aplicação 30.000,00 0,00 0,00 0,00 30.000,00 3000000\n".to_string(),
        );
        let table = ConverterKind::BbLc.convert(&input).unwrap();
        assert_eq!(table.header, vec!["Data", "Histórico", "Valor Movimento"]);
        assert_eq!(table.rows, vec![vec!["07/04/2025", "Aplicação", "30000,00"]]);
    }

    #[test]
    fn test_input_mismatch() {
        let err = ConverterKind::RicoCc
            .convert(&StatementInput::Text(String::new()))
            .unwrap_err();
        assert!(err.to_string().contains("rico-cc"));
    }

    #[test]
    fn test_output_formats() {
        assert_eq!(ConverterKind::BbLc.output_format().delimiter, b';');
        assert_eq!(ConverterKind::BbCp.output_format().delimiter, b',');
        assert!(ConverterKind::RicoCc.output_format().bom);
        assert!(ConverterKind::ALL.iter().filter(|k| k.reads_sheet()).count() == 1);
    }
}
