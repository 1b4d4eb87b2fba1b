// Copyright (c) 2025 Nestegg Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use nestegg::{cli, commands::importer, db};
use rusqlite::Connection;
use std::io::Write;
use tempfile::NamedTempFile;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn run_import(conn: &mut Connection, path: &str) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from(["nestegg", "import", "--path", path]);
    if let Some(("import", import_m)) = matches.subcommand() {
        importer::handle(conn, import_m)
    } else {
        panic!("no import subcommand");
    }
}

fn json_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn json_workbook_concatenates_transaction_tables() {
    let mut conn = setup();
    let file = json_file(
        r#"{
            "Accounts": [
                {"id": "acc_01", "name": "Savings", "bank": "B1", "type": "savings", "interestRate": "4.35"},
                {"id": "acc_02", "name": "Broker", "bank": "B2", "type": "investment", "subtype": "self-directed"}
            ],
            "S_Transactions": [
                {"id": "txn_00001", "accountId": "acc_01", "type": "contribution", "amount": "5000", "date": "2023-01-15T00:00:00.000Z"}
            ],
            "I_SD_Transactions": [
                {"id": "txn_00002", "accountId": "acc_02", "type": "buy", "amount": "1000", "date": "2023-02-01",
                 "assetName": "Apple Inc.", "assetCode": "AAPL", "assetCategory": "Individual Stock", "shares": "5"}
            ]
        }"#,
    );

    run_import(&mut conn, file.path().to_str().unwrap()).unwrap();

    let accounts: i64 = conn
        .query_row("SELECT COUNT(*) FROM accounts", [], |r| r.get(0))
        .unwrap();
    assert_eq!(accounts, 2);

    // Timestamp dates are normalized to plain calendar dates.
    let date: String = conn
        .query_row("SELECT date FROM transactions WHERE id='txn_00001'", [], |r| r.get(0))
        .unwrap();
    assert_eq!(date, "2023-01-15");

    let (category, shares): (String, String) = conn
        .query_row(
            "SELECT asset_category, shares FROM transactions WHERE id='txn_00002'",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .unwrap();
    assert_eq!(category, "Individual Stock");
    assert_eq!(shares, "5");
}

#[test]
fn workbook_without_accounts_table_is_rejected() {
    let mut conn = setup();
    let file = json_file(r#"{"S_Transactions": []}"#);
    let err = run_import(&mut conn, file.path().to_str().unwrap()).unwrap_err();
    assert!(err.to_string().contains("'Accounts' table is required"));
}

#[test]
fn missing_transaction_tables_default_to_empty() {
    let mut conn = setup();
    let file = json_file(
        r#"{"Accounts": [{"id": "acc_01", "name": "S", "bank": "B", "type": "savings"}]}"#,
    );
    run_import(&mut conn, file.path().to_str().unwrap()).unwrap();
    let txns: i64 = conn
        .query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap();
    assert_eq!(txns, 0);
}

#[test]
fn import_replaces_existing_data() {
    let mut conn = setup();
    conn.execute(
        "INSERT INTO accounts(id, name, bank, type) VALUES ('acc_09', 'Old', 'OldBank', 'savings')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO transactions(id, account_id, type, amount, date) VALUES ('txn_00009', 'acc_09', 'contribution', '1', '2020-01-01')",
        [],
    )
    .unwrap();

    let file = json_file(
        r#"{"Accounts": [{"id": "acc_01", "name": "New", "bank": "B", "type": "savings"}]}"#,
    );
    run_import(&mut conn, file.path().to_str().unwrap()).unwrap();

    let names: Vec<String> = {
        let mut stmt = conn.prepare("SELECT name FROM accounts").unwrap();
        let rows = stmt.query_map([], |r| r.get(0)).unwrap();
        rows.collect::<Result<_, _>>().unwrap()
    };
    assert_eq!(names, vec!["New"]);
    let txns: i64 = conn
        .query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap();
    assert_eq!(txns, 0);
}

#[test]
fn workbook_with_garbage_date_is_rejected() {
    let mut conn = setup();
    let file = json_file(
        r#"{
            "Accounts": [{"id": "acc_01", "name": "S", "bank": "B", "type": "savings"}],
            "S_Transactions": [
                {"id": "txn_00001", "accountId": "acc_01", "type": "contribution",
                 "amount": "1", "date": "2023-01-1é5T00:00:00Z"}
            ]
        }"#,
    );
    let err = run_import(&mut conn, file.path().to_str().unwrap()).unwrap_err();
    assert!(err.to_string().contains("Parse workbook"));
}

#[test]
fn malformed_workbook_leaves_store_untouched() {
    let mut conn = setup();
    conn.execute(
        "INSERT INTO accounts(id, name, bank, type) VALUES ('acc_01', 'Keep', 'B', 'savings')",
        [],
    )
    .unwrap();
    let file = json_file(r#"{"Accounts": [{"id": "acc_02""#);
    let err = run_import(&mut conn, file.path().to_str().unwrap()).unwrap_err();
    assert!(err.to_string().contains("Parse workbook"));

    let accounts: i64 = conn
        .query_row("SELECT COUNT(*) FROM accounts", [], |r| r.get(0))
        .unwrap();
    assert_eq!(accounts, 1);
}
