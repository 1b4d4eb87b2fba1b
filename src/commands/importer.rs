// Copyright (c) 2025 Nestegg Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::exporter::{
    ACCOUNTS_TABLE, MANAGED_TABLE, SAVINGS_TABLE, SELF_DIRECTED_TABLE,
};
use crate::db::{insert_account, insert_transaction};
use crate::models::{Account, Transaction};
use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum WorkbookError {
    #[error("Invalid workbook: 'Accounts' table is required")]
    MissingAccounts,
}

#[derive(Debug, Deserialize)]
struct Workbook {
    #[serde(rename = "Accounts")]
    accounts: Option<Vec<Account>>,
    #[serde(rename = "S_Transactions", default)]
    savings: Vec<Transaction>,
    #[serde(rename = "I_M_Transactions", default)]
    managed: Vec<Transaction>,
    #[serde(rename = "I_SD_Transactions", default)]
    self_directed: Vec<Transaction>,
}

pub fn handle(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let raw = sub.get_one::<String>("path").unwrap().trim();
    let path = Path::new(raw);

    let (accounts, transactions) = if path.is_dir() {
        read_csv_workbook(path)?
    } else {
        read_json_workbook(path)?
    };

    let tx = conn.transaction()?;
    // A workbook load replaces the session wholesale.
    tx.execute("DELETE FROM transactions", [])?;
    tx.execute("DELETE FROM accounts", [])?;
    for account in &accounts {
        insert_account(&tx, account)
            .with_context(|| format!("Import account '{}'", account.id))?;
    }
    for txn in &transactions {
        insert_transaction(&tx, txn).with_context(|| format!("Import transaction '{}'", txn.id))?;
    }
    tx.commit()?;
    println!(
        "Imported {} accounts and {} transactions from {}",
        accounts.len(),
        transactions.len(),
        raw
    );
    Ok(())
}

fn read_json_workbook(path: &Path) -> Result<(Vec<Account>, Vec<Transaction>)> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Open workbook {}", path.display()))?;
    let workbook: Workbook = serde_json::from_str(&raw)
        .with_context(|| format!("Parse workbook {}", path.display()))?;
    let accounts = workbook.accounts.ok_or(WorkbookError::MissingAccounts)?;
    let mut transactions = workbook.savings;
    transactions.extend(workbook.managed);
    transactions.extend(workbook.self_directed);
    Ok((accounts, transactions))
}

fn read_csv_workbook(dir: &Path) -> Result<(Vec<Account>, Vec<Transaction>)> {
    let accounts_path = dir.join(format!("{}.csv", ACCOUNTS_TABLE));
    if !accounts_path.exists() {
        return Err(WorkbookError::MissingAccounts.into());
    }
    let accounts: Vec<Account> = read_csv_table(&accounts_path)?;

    // The three transaction tables are optional; missing ones default to empty.
    let mut transactions = Vec::new();
    for table in [SAVINGS_TABLE, MANAGED_TABLE, SELF_DIRECTED_TABLE] {
        let path = dir.join(format!("{}.csv", table));
        if path.exists() {
            transactions.extend(read_csv_table::<Transaction>(&path)?);
        }
    }
    Ok((accounts, transactions))
}

fn read_csv_table<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path.display()))?;
    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        rows.push(result.with_context(|| format!("Parse row in {}", path.display()))?);
    }
    Ok(rows)
}
