use std::fs;
use std::path::{Path, PathBuf};

use ofx_consolidate::errors::StatementParseError;
use ofx_consolidate::{Amount, ConsolidateConfig, TransactionRecord, consolidate, run};

const CARD_JANUARY: &str = r#"OFXHEADER:100
DATA:OFXSGML
VERSION:102

<OFX>
<CREDITCARDMSGSRSV1>
<CCSTMTTRNRS>
<CCSTMTRS>
<BANKTRANLIST>
<STMTTRN>
<TRNTYPE>DEBIT
<DTPOSTED>20250110
<TRNAMT>100.00
<MEMO>Livraria Cultura
<CURRENCY>
<CURRATE>5.25
<CURSYM>USD
</CURRENCY>
</STMTTRN>
<STMTTRN>
<TRNTYPE>DEBIT
<DTPOSTED>20250111
<TRNAMT>-32.90
<MEMO>Padaria São João
</STMTTRN>
</BANKTRANLIST>
</CCSTMTRS>
</CCSTMTTRNRS>
</CREDITCARDMSGSRSV1>
</OFX>"#;

const CARD_FEBRUARY: &str = r#"<OFX>
<CREDITCARDMSGSRSV1><CCSTMTTRNRS><CCSTMTRS><BANKTRANLIST>
<STMTTRN><DTPOSTED>20250203</DTPOSTED><TRNAMT>-10.00</TRNAMT><MEMO>Metro</MEMO></STMTTRN>
</BANKTRANLIST></CCSTMTRS></CCSTMTTRNRS></CREDITCARDMSGSRSV1>
</OFX>"#;

const ACCOUNT_JANUARY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<OFX>
    <BANKMSGSRSV1>
        <STMTTRNRS>
            <STMTRS>
                <BANKTRANLIST>
                    <STMTTRN>
                        <DTPOSTED>20250115</DTPOSTED>
                        <TRNAMT>-4.50</TRNAMT>
                        <MEMO>Coffee</MEMO>
                    </STMTTRN>
                </BANKTRANLIST>
                <LEDGERBAL>
                    <BALAMT>995.50</BALAMT>
                    <DTASOF>20250101</DTASOF>
                </LEDGERBAL>
            </STMTRS>
        </STMTTRNRS>
    </BANKMSGSRSV1>
</OFX>"#;

const EMPTY_STATEMENT: &str = "<OFX>\n<BANKMSGSRSV1>\n</BANKMSGSRSV1>\n</OFX>";

struct Fixture {
    root: PathBuf,
}

impl Fixture {
    fn new(name: &str) -> Self {
        let root = std::env::temp_dir()
            .join(format!("ofx-consolidate-it-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(root.join("cartao")).unwrap();
        fs::create_dir_all(root.join("conta")).unwrap();
        Fixture { root }
    }

    fn card(&self, name: &str, content: &str) -> &Self {
        fs::write(self.root.join("cartao").join(name), content).unwrap();
        self
    }

    fn account(&self, name: &str, content: &str) -> &Self {
        fs::write(self.root.join("conta").join(name), content).unwrap();
        self
    }

    fn output(&self) -> PathBuf {
        self.root.join("tudo.json")
    }

    fn config(&self) -> ConsolidateConfig {
        ConsolidateConfig {
            sources: vec![self.root.join("cartao"), self.root.join("conta")],
            output: self.output(),
            ..Default::default()
        }
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}

fn read_records(path: &Path) -> Vec<TransactionRecord> {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_run_consolidates_in_file_then_document_order() {
    let fixture = Fixture::new("order");
    fixture
        .card("fatura-2025-02.ofx", CARD_FEBRUARY)
        .card("fatura-2025-01.ofx", CARD_JANUARY)
        .card("leia-me.txt", "not a statement")
        .account("extrato-2025-01.ofx", ACCOUNT_JANUARY);

    let summary = run(&fixture.config()).unwrap();
    assert_eq!(summary.files, 3);
    assert_eq!(summary.records, 4);
    assert_eq!(summary.output, fixture.output());

    let records = read_records(&fixture.output());
    let dates: Vec<_> = records.iter().map(|r| r.date.as_str()).collect();
    assert_eq!(dates, vec!["2025-01-10", "2025-01-11", "2025-02-03", "2025-01-15"]);

    assert_eq!(records[0].amount, Some(Amount::Converted(525.0)));
    assert_eq!(records[1].description.as_deref(), Some("Padaria São João"));
    assert_eq!(records[1].amount, Some(Amount::Raw("-32.90".to_string())));
    assert_eq!(records[2].reference, None);
    assert_eq!(records[3].reference.as_deref(), Some("2025-01-01"));
}

#[test]
fn test_output_format() {
    let fixture = Fixture::new("format");
    fixture.account("extrato-2025-01.ofx", ACCOUNT_JANUARY);

    run(&fixture.config()).unwrap();

    let written = fs::read_to_string(fixture.output()).unwrap();
    let expected = r#"[
    {
        "date": "2025-01-15",
        "descricao": "Coffee",
        "valor": "-4.50",
        "referencia": "2025-01-01"
    }
]"#;
    assert_eq!(written, expected);
}

#[test]
fn test_non_ascii_is_escaped_by_default() {
    let fixture = Fixture::new("ascii");
    fixture.card("fatura-2025-01.ofx", CARD_JANUARY);

    run(&fixture.config()).unwrap();

    let written = fs::read_to_string(fixture.output()).unwrap();
    assert!(written.is_ascii());
    assert!(written.contains(r#""descricao": "Padaria S\u00e3o Jo\u00e3o""#));
    assert!(written.contains(r#""valor": 525.0"#));
}

#[test]
fn test_run_is_idempotent() {
    let fixture = Fixture::new("idempotent");
    fixture
        .card("fatura-2025-01.ofx", CARD_JANUARY)
        .account("extrato-2025-01.ofx", ACCOUNT_JANUARY);

    run(&fixture.config()).unwrap();
    let first = fs::read(fixture.output()).unwrap();
    run(&fixture.config()).unwrap();
    let second = fs::read(fixture.output()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_empty_statements_yield_empty_array() {
    let fixture = Fixture::new("empty");
    fixture.card("fatura-2025-01.ofx", EMPTY_STATEMENT);

    let summary = run(&fixture.config()).unwrap();
    assert_eq!(summary.files, 1);
    assert_eq!(summary.records, 0);
    assert_eq!(fs::read_to_string(fixture.output()).unwrap(), "[]");
}

#[test]
fn test_failure_writes_nothing() {
    let fixture = Fixture::new("failure");
    fixture
        .card("fatura-2025-01.ofx", CARD_JANUARY)
        .account("extrato-2025-01.ofx", "<OFX><STMTTRN><TRNAMT>1.00</TRNAMT></STMTTRN></OFX>");

    let err = run(&fixture.config()).unwrap_err();
    match err {
        StatementParseError::InFile { path, source } => {
            assert!(path.ends_with("extrato-2025-01.ofx"));
            assert!(matches!(*source, StatementParseError::MissingPostedDate));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!fixture.output().exists());
}

#[test]
fn test_missing_source_directory_is_fatal() {
    let fixture = Fixture::new("missing");
    let config = ConsolidateConfig {
        sources: vec![fixture.root.join("nao-existe")],
        ..fixture.config()
    };

    assert!(matches!(
        consolidate(&config),
        Err(StatementParseError::DirectoryUnreadable { .. })
    ));
}

#[test]
fn test_patterns_select_files() {
    let fixture = Fixture::new("patterns");
    fixture
        .card("fatura-2025-01.ofx", CARD_JANUARY)
        .card("fatura-2025-02.ofx", CARD_FEBRUARY);

    let config = ConsolidateConfig {
        patterns: vec!["-02".to_string()],
        ..fixture.config()
    };
    let consolidation = consolidate(&config).unwrap();

    assert_eq!(consolidation.files, 1);
    assert_eq!(consolidation.records.len(), 1);
    assert_eq!(consolidation.records[0].description.as_deref(), Some("Metro"));
}

#[test]
fn test_default_sources_read_card_statements_only() {
    let fixture = Fixture::new("defaults");
    fixture
        .card("fatura-2025-01.ofx", CARD_JANUARY)
        .account("extrato-2025-01.ofx", ACCOUNT_JANUARY);

    let defaults = ConsolidateConfig::default();
    let sources = defaults
        .sources
        .iter()
        .map(|source| fixture.root.join(source.strip_prefix("../../dados/").unwrap()))
        .collect();
    let config = ConsolidateConfig {
        sources,
        output: fixture.output(),
        ..defaults
    };

    let consolidation = consolidate(&config).unwrap();
    assert_eq!(consolidation.files, 1);
    assert_eq!(consolidation.records.len(), 2);
    assert!(consolidation.records.iter().all(|r| r.reference.is_none()));
}
