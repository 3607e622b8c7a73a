use iban_parse::batch::{check_csv, write_report};
use std::path::PathBuf;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("iban-parse-{name}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn check_file_and_write_report() {
    let dir = scratch_dir("report");
    let input = dir.join("accounts.csv");
    std::fs::write(
        &input,
        "account,holder\nDE89 3704 0044 0532 0130 00,a\nDE89370400440532013001,b\n",
    )
    .unwrap();

    let report = check_csv(&input, "account").unwrap();
    assert_eq!(report.summary.total, 2);
    assert_eq!(report.summary.valid, 1);
    assert_eq!(report.summary.wrong_checksum, 1);

    let output = dir.join("report.csv");
    write_report(&output, &report.rows).unwrap();
    let written = std::fs::read_to_string(&output).unwrap();
    let mut lines = written.lines();
    assert_eq!(lines.next(), Some("line,input,valid,iban,country,error"));
    assert_eq!(
        lines.next(),
        Some("2,DE89 3704 0044 0532 0130 00,true,DE89370400440532013000,DE,")
    );
    assert_eq!(
        lines.next(),
        Some("3,DE89370400440532013001,false,,,IBAN check digits are invalid")
    );

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_file_is_reported() {
    let dir = scratch_dir("missing");
    let err = check_csv(&dir.join("nope.csv"), "iban").unwrap_err();
    assert!(err.contains("nope.csv"));
    std::fs::remove_dir_all(&dir).unwrap();
}
