//! Ourocard (Banco do Brasil credit card) OFX parser
//!
//! OFX 1.x SGML, leaf tags usually left unclosed:
//!   <STMTTRN>
//!     <TRNTYPE>DEBIT
//!     <DTPOSTED>20250407120000[-3:GMT]
//!     <TRNAMT>-120.50
//!     <FITID>202504071
//!     <MEMO>COMPRA CARTAO
//!   </STMTTRN>

use std::str::FromStr;

use anyhow::Result;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::IngestError;
use crate::types::ConvertedTable;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfxTransaction {
    /// Lowercased TRNTYPE (`debit`, `credit`, ...)
    pub kind: String,
    /// DTPOSTED in UTC as `YYYY-MM-DDTHH:MM:SS`, empty when absent
    pub date: String,
    /// TRNAMT with two decimals and a comma separator
    pub amount: String,
    pub id: String,
    pub memo: String,
}

impl OfxTransaction {
    pub const HEADER: [&'static str; 5] = ["Type", "Date", "Amount", "Id", "Memo"];

    fn into_row(self) -> Vec<String> {
        vec![self.kind, self.date, self.amount, self.id, self.memo]
    }
}

pub fn into_table(txns: Vec<OfxTransaction>) -> ConvertedTable {
    ConvertedTable {
        header: OfxTransaction::HEADER.iter().map(|h| h.to_string()).collect(),
        rows: txns.into_iter().map(OfxTransaction::into_row).collect(),
    }
}

/// Parse OFX text into card transactions. A file without STMTTRN blocks
/// yields an empty list.
pub fn parse_ofx_text(text: &str) -> Result<Vec<OfxTransaction>> {
    let open_re = Regex::new(r"(?i)<STMTTRN>")?;
    let close_re = Regex::new(r"(?i)</STMTTRN>|</BANKTRANLIST>")?;
    let tag_re = Regex::new(r"<(?P<tag>[A-Za-z0-9.]+)>(?P<value>[^<\r\n]*)")?;

    let starts: Vec<_> = open_re.find_iter(text).collect();
    let mut out = Vec::new();

    for (i, start) in starts.iter().enumerate() {
        // unclosed blocks end at the next STMTTRN
        let limit = starts.get(i + 1).map_or(text.len(), |next| next.start());
        let rest = &text[start.end()..limit];
        let body = match close_re.find(rest) {
            Some(close) => &rest[..close.start()],
            None => rest,
        };

        let mut kind = String::new();
        let mut date = String::new();
        let mut amount = String::new();
        let mut id = String::new();
        let mut memo = String::new();

        for caps in tag_re.captures_iter(body) {
            let value = caps["value"].trim();
            match caps["tag"].to_ascii_uppercase().as_str() {
                "TRNTYPE" => kind = value.to_lowercase(),
                "DTPOSTED" => {
                    date = match parse_ofx_datetime(value) {
                        Some(dt) => dt.format("%Y-%m-%dT%H:%M:%S").to_string(),
                        None => {
                            warn!(value, "unparseable DTPOSTED");
                            String::new()
                        }
                    }
                }
                "TRNAMT" => amount = format_amount(value)?,
                "FITID" => id = value.to_string(),
                "MEMO" => memo = value.to_string(),
                _ => {}
            }
        }

        out.push(OfxTransaction {
            kind,
            date,
            amount,
            id,
            memo,
        });
    }

    debug!(transactions = out.len(), "parsed OFX statement");
    Ok(out)
}

fn format_amount(raw: &str) -> Result<String> {
    let amount = Decimal::from_str(&raw.replace(',', "."))
        .map_err(|_| IngestError::InvalidAmount(raw.to_string()))?;
    Ok(format!("{:.2}", amount.round_dp(2)).replace('.', ","))
}

/// `YYYYMMDD[HHMMSS[.XXX]][[offset:TZ]]`, shifted to UTC when an offset is present.
fn parse_ofx_datetime(raw: &str) -> Option<NaiveDateTime> {
    let (stamp, offset) = match raw.split_once('[') {
        Some((stamp, zone)) => {
            let zone = zone.trim_end_matches(']');
            let hours = zone.split(':').next()?;
            (stamp, Some(hours.parse::<f64>().ok()?))
        }
        None => (raw, None),
    };

    let stamp = stamp.trim();
    let stamp = stamp.split('.').next()?;
    let date = NaiveDate::parse_from_str(stamp.get(..8)?, "%Y%m%d").ok()?;
    let time = match stamp.get(8..) {
        Some(rest) if rest.len() >= 6 => NaiveTime::parse_from_str(rest.get(..6)?, "%H%M%S").ok()?,
        Some(rest) if rest.len() >= 4 => NaiveTime::parse_from_str(rest.get(..4)?, "%H%M").ok()?,
        _ => NaiveTime::from_hms_opt(0, 0, 0)?,
    };

    let local = date.and_time(time);
    match offset {
        Some(hours) => Some(local - Duration::minutes((hours * 60.0) as i64)),
        None => Some(local),
    }
}
