// Copyright (c) 2025 Nestegg Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use nestegg::{cli, commands::exporter, commands::importer, db};
use rusqlite::Connection;

fn setup_with_data() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn.execute_batch(
        r#"
        INSERT INTO accounts(id, name, bank, type, interest_rate) VALUES ('acc_01', 'Savings', 'B1', 'savings', '4.35');
        INSERT INTO accounts(id, name, bank, type, subtype) VALUES ('acc_02', 'Managed', 'B2', 'investment', 'managed');
        INSERT INTO accounts(id, name, bank, type, subtype) VALUES ('acc_03', 'Broker', 'B3', 'investment', 'self-directed');
        INSERT INTO transactions(id, account_id, type, amount, date) VALUES ('txn_00001', 'acc_01', 'contribution', '5000', '2023-01-15');
        INSERT INTO transactions(id, account_id, type, amount, date) VALUES ('txn_00002', 'acc_02', 'contribution', '2000', '2023-02-01');
        INSERT INTO transactions(id, account_id, type, amount, date, asset_name, asset_code, asset_category, shares)
            VALUES ('txn_00003', 'acc_03', 'buy', '1000', '2023-03-01', 'Apple Inc.', 'AAPL', 'Individual Stock', '5');
        "#,
    )
    .unwrap();
    conn
}

fn run_export(conn: &Connection, out: &str, format: &str) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from([
        "nestegg", "export", "--out", out, "--format", format,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(conn, export_m)
    } else {
        panic!("no export subcommand");
    }
}

#[test]
fn partition_routes_by_owning_account_kind() {
    let conn = setup_with_data();
    let accounts = db::load_accounts(&conn).unwrap();
    let transactions = db::load_transactions(&conn).unwrap();
    let (savings, managed, self_directed) = exporter::partition(&accounts, &transactions);
    assert_eq!(savings.len(), 1);
    assert_eq!(savings[0].id, "txn_00001");
    assert_eq!(managed.len(), 1);
    assert_eq!(managed[0].id, "txn_00002");
    assert_eq!(self_directed.len(), 1);
    assert_eq!(self_directed[0].id, "txn_00003");
}

#[test]
fn partition_drops_orphan_transactions() {
    let conn = setup_with_data();
    conn.execute(
        "INSERT INTO transactions(id, account_id, type, amount, date) VALUES ('txn_00009', 'acc_99', 'contribution', '1', '2023-01-01')",
        [],
    )
    .unwrap();
    let accounts = db::load_accounts(&conn).unwrap();
    let transactions = db::load_transactions(&conn).unwrap();
    let (savings, managed, self_directed) = exporter::partition(&accounts, &transactions);
    assert_eq!(savings.len() + managed.len() + self_directed.len(), 3);
}

#[test]
fn csv_workbook_round_trips() {
    let conn = setup_with_data();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().to_str().unwrap().to_string();
    run_export(&conn, &out, "csv").unwrap();

    for table in ["Accounts", "S_Transactions", "I_M_Transactions", "I_SD_Transactions"] {
        assert!(dir.path().join(format!("{}.csv", table)).exists());
    }

    let mut fresh = Connection::open_in_memory().unwrap();
    db::init_schema(&mut fresh).unwrap();
    let matches = cli::build_cli().get_matches_from(["nestegg", "import", "--path", &out]);
    if let Some(("import", import_m)) = matches.subcommand() {
        importer::handle(&mut fresh, import_m).unwrap();
    } else {
        panic!("no import subcommand");
    }

    let accounts = db::load_accounts(&fresh).unwrap();
    let transactions = db::load_transactions(&fresh).unwrap();
    assert_eq!(accounts.len(), 3);
    assert_eq!(transactions.len(), 3);
    let trade = transactions.iter().find(|t| t.id == "txn_00003").unwrap();
    assert_eq!(trade.asset_code.as_deref(), Some("AAPL"));
    assert_eq!(
        trade.asset_category,
        Some(nestegg::models::AssetCategory::IndividualStock)
    );
}

#[test]
fn json_workbook_round_trips() {
    let conn = setup_with_data();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("workbook.json");
    let out_str = out.to_str().unwrap().to_string();
    run_export(&conn, &out_str, "json").unwrap();

    let raw = std::fs::read_to_string(&out).unwrap();
    let v: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(v["Accounts"].as_array().unwrap().len(), 3);
    assert_eq!(v["S_Transactions"][0]["accountId"], "acc_01");

    let mut fresh = Connection::open_in_memory().unwrap();
    db::init_schema(&mut fresh).unwrap();
    let matches = cli::build_cli().get_matches_from(["nestegg", "import", "--path", &out_str]);
    if let Some(("import", import_m)) = matches.subcommand() {
        importer::handle(&mut fresh, import_m).unwrap();
    } else {
        panic!("no import subcommand");
    }
    assert_eq!(db::load_transactions(&fresh).unwrap().len(), 3);
}

#[test]
fn export_without_accounts_errors() {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let err = run_export(&conn, dir.path().to_str().unwrap(), "csv").unwrap_err();
    assert!(err.to_string().contains("no accounts to export"));
}
