use firefly_ingest::parsers::bb_lc::{BbLcParser, BbLcStatement, parse_bb_lc_text};
use firefly_ingest::{ConverterKind, StatementInput};
use std::path::PathBuf;

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("samples")
        .join("bb-lcilca.txt")
}

fn sample_text() -> String {
    std::fs::read_to_string(sample_path()).expect("should read samples/bb-lcilca.txt")
}

/// Real-report regression: one movement plus the gross yield from the summary.
#[test]
fn test_sample_report_yields_two_records() {
    let table = parse_bb_lc_text(&sample_text()).unwrap().into_table();

    assert_eq!(table.header, vec!["Data", "Histórico", "Valor Movimento"]);
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows[0], vec!["07/04/2025", "Aplicação", "30000,00"]);
    assert_eq!(table.rows[1], vec!["30/04/2025", "Rendimento Bruto", "220,59"]);

    assert!(!table.rows.iter().any(|r| r[1].to_lowercase().contains("saldo")));
}

#[test]
fn test_sample_report_is_deterministic() {
    let text = sample_text();
    let parser = BbLcParser::new().unwrap();
    let first = parser.parse(&text);
    let second = parser.parse(&text);
    assert_eq!(first, second);
}

#[test]
fn test_crlf_report_matches_lf_report() {
    let text = sample_text();
    let crlf = text.replace('\n', "\r\n");
    assert_eq!(
        parse_bb_lc_text(&text).unwrap(),
        parse_bb_lc_text(&crlf).unwrap()
    );
}

#[test]
fn test_report_without_saldo_atual_drops_summary() {
    let text: String = sample_text()
        .lines()
        .filter(|l| !l.contains("Saldo Atual"))
        .map(|l| format!("{l}\n"))
        .collect();

    let statement: BbLcStatement = parse_bb_lc_text(&text).unwrap();
    assert_eq!(statement.records.len(), 1);
    assert_eq!(statement.records[0].description, "Aplicação");
}

#[test]
fn test_sample_through_converter_kind() {
    let table = ConverterKind::BbLc
        .convert(&StatementInput::Text(sample_text()))
        .unwrap();
    assert_eq!(table.get(1, "Valor Movimento"), Some("220,59"));
}
