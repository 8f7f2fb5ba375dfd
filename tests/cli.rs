use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn yearend() -> Command {
    Command::cargo_bin("yearend").unwrap()
}

fn write_config(dir: &Path) {
    let config = r#"{
        "transaction": {"separator": "|", "date_format": "%d/%m/%Y", "filename": "transactions.txt"},
        "spreadsheet": {
            "filename": "accounts.xlsx",
            "sheet_name_format": "%b %Y",
            "date_format": "%d/%m/%Y",
            "save_filename": "accounts-out.xlsx"
        },
        "category_mapping": {"TescoSuperstore": "Groceries", "Client Ltd": "Sales"}
    }"#;
    std::fs::write(dir.join("yearend.json"), config).unwrap();
}

fn write_workbook(dir: &Path) {
    let mut book = umya_spreadsheet::new_file_empty_worksheet();
    for name in ["Jan 2018", "Feb 2018"] {
        let ws = book.new_sheet(name).unwrap();
        ws.get_cell_mut("A1").set_value_string("Elref Ltd");
        ws.get_cell_mut("B3").set_value_string("BANK - PAID IN");
        ws.get_cell_mut("B30").set_value_string("BANK - PAID OUT");
        ws.get_cell_mut("B31").set_value_string("28/01/2018");
    }
    umya_spreadsheet::writer::xlsx::write(&book, dir.join("accounts.xlsx")).unwrap();
}

fn setup(transactions: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path());
    write_workbook(dir.path());
    std::fs::write(dir.path().join("transactions.txt"), transactions).unwrap();
    dir
}

fn cell(path: &Path, sheet: &str, addr: &str) -> String {
    let book = umya_spreadsheet::reader::xlsx::read(path).unwrap();
    book.get_sheet_by_name(sheet).unwrap().get_value(addr)
}

#[test]
fn missing_header_column_exits_1() {
    let dir = setup("Date|Description|Amount\n01/02/2018|Tesco|-45.50\n");
    yearend()
        .current_dir(dir.path())
        .arg("import")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("required header column Payee does not exist"));
    assert!(!dir.path().join("accounts-out.xlsx").exists());
}

#[test]
fn empty_transaction_file_exits_1() {
    let dir = setup("");
    yearend()
        .current_dir(dir.path())
        .arg("import")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unable to parse meta"));
}

#[test]
fn debit_lands_in_february_paid_out_block() {
    let dir = setup("Date|Payee|Amount\n01/02/2018|Tesco|-45.50\n");
    yearend()
        .current_dir(dir.path())
        .arg("import")
        .assert()
        .success()
        .stdout(predicate::str::contains("2018-02-01_Tesco_-45.5"))
        .stdout(predicate::str::contains("1 written, 0 skipped"));

    let out = dir.path().join("accounts-out.xlsx");
    assert_eq!(cell(&out, "Feb 2018", "B32"), "01/02/2018");
    assert_eq!(cell(&out, "Feb 2018", "C32"), "Tesco");
    assert_eq!(cell(&out, "Feb 2018", "D32"), "");
    assert_eq!(cell(&out, "Feb 2018", "E32"), "45.5");
    // source workbook untouched
    assert_eq!(cell(&dir.path().join("accounts.xlsx"), "Feb 2018", "B32"), "");
}

#[test]
fn credits_and_debits_are_routed_by_sign() {
    let dir = setup(
        "Reference|Amount|Payee|Date\n\
         r1|1200|Client Ltd|03/01/2018\n\
         r2|-0.40|Bank interest|04/01/2018\n\
         r3|-12.00|Tesco:Superstore|05/01/2018\n",
    );
    yearend().current_dir(dir.path()).arg("import").assert().success();

    let out = dir.path().join("accounts-out.xlsx");
    assert_eq!(cell(&out, "Jan 2018", "C4"), "Client Ltd");
    assert_eq!(cell(&out, "Jan 2018", "E4"), "1200");
    assert_eq!(cell(&out, "Jan 2018", "F4"), "Sales");
    assert_eq!(cell(&out, "Jan 2018", "C5"), "Bank interest");
    assert_eq!(cell(&out, "Jan 2018", "E5"), "-0.4");
    assert_eq!(cell(&out, "Jan 2018", "C32"), "Tesco:Superstore");
    assert_eq!(cell(&out, "Jan 2018", "D32"), "Groceries");
    assert_eq!(cell(&out, "Jan 2018", "E32"), "12");
}

#[test]
fn bad_line_aborts_without_saving() {
    let dir = setup("Date|Payee|Amount\n01/02/2018|Tesco|abc\n02/02/2018|Shell|-30\n");
    yearend()
        .current_dir(dir.path())
        .arg("import")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("line 2"));
    assert!(!dir.path().join("accounts-out.xlsx").exists());
}

#[test]
fn lenient_skips_bad_lines() {
    let dir = setup(
        "Date|Payee|Amount\n01/02/2018|Tesco|abc\n02/02/2018|Shell|-30\n01/03/2018|Nobody|-1\n",
    );
    yearend()
        .current_dir(dir.path())
        .args(["import", "--lenient"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 written, 2 skipped"))
        .stdout(predicate::str::contains("2018-03-01_Nobody_-1"))
        .stderr(predicate::str::contains("Mar 2018"));

    let out = dir.path().join("accounts-out.xlsx");
    assert_eq!(cell(&out, "Feb 2018", "C32"), "Shell");
    assert_eq!(cell(&out, "Feb 2018", "E32"), "30");
}

#[test]
fn record_is_echoed_before_a_missing_sheet_aborts() {
    let dir = setup("Date|Payee|Amount\n01/03/2018|Nobody|-1\n");
    yearend()
        .current_dir(dir.path())
        .arg("import")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("2018-03-01_Nobody_-1"))
        .stderr(predicate::str::contains("Worksheet 'Mar 2018' not found"));
    assert!(!dir.path().join("accounts-out.xlsx").exists());
}

#[test]
fn output_flag_overrides_config() {
    let dir = setup("Date|Payee|Amount\n01/02/2018|Tesco|-1.50\n");
    yearend()
        .current_dir(dir.path())
        .args(["import", "--output", "elsewhere.xlsx"])
        .assert()
        .success();
    assert!(dir.path().join("elsewhere.xlsx").exists());
    assert!(!dir.path().join("accounts-out.xlsx").exists());
}

#[test]
fn check_reports_blocks() {
    let dir = setup("Date|Payee|Amount\n");
    yearend()
        .current_dir(dir.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Feb 2018"))
        .stdout(predicate::str::contains("B3 -> B4"))
        .stdout(predicate::str::contains("B30 -> B32"));
}

#[test]
fn init_writes_config_once() {
    let dir = tempfile::tempdir().unwrap();
    yearend()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("yearend.json"));
    assert!(dir.path().join("yearend.json").exists());

    yearend()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn missing_config_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    yearend()
        .current_dir(dir.path())
        .arg("import")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("yearend.json"));
}
