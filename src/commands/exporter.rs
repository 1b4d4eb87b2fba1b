// Copyright (c) 2025 Nestegg Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::{load_accounts, load_transactions};
use crate::models::{Account, AccountType, InvestmentSubtype, Transaction};
use anyhow::{anyhow, Context, Result};
use rusqlite::Connection;
use serde_json::json;
use std::collections::HashMap;
use std::path::Path;

pub const ACCOUNTS_TABLE: &str = "Accounts";
pub const SAVINGS_TABLE: &str = "S_Transactions";
pub const MANAGED_TABLE: &str = "I_M_Transactions";
pub const SELF_DIRECTED_TABLE: &str = "I_SD_Transactions";

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap().trim();

    let accounts = load_accounts(conn)?;
    if accounts.is_empty() {
        return Err(anyhow!("There are no accounts to export"));
    }
    let transactions = load_transactions(conn)?;
    let (savings, managed, self_directed) = partition(&accounts, &transactions);

    match fmt.as_str() {
        "csv" => {
            let dir = Path::new(out);
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Create export dir {}", dir.display()))?;
            write_csv(&dir.join(format!("{}.csv", ACCOUNTS_TABLE)), &accounts)?;
            write_csv(&dir.join(format!("{}.csv", SAVINGS_TABLE)), &savings)?;
            write_csv(&dir.join(format!("{}.csv", MANAGED_TABLE)), &managed)?;
            write_csv(&dir.join(format!("{}.csv", SELF_DIRECTED_TABLE)), &self_directed)?;
        }
        "json" => {
            let workbook = json!({
                ACCOUNTS_TABLE: accounts,
                SAVINGS_TABLE: savings,
                MANAGED_TABLE: managed,
                SELF_DIRECTED_TABLE: self_directed,
            });
            std::fs::write(out, serde_json::to_string_pretty(&workbook)?)
                .with_context(|| format!("Write workbook {}", out))?;
        }
        other => {
            return Err(anyhow!("Unknown format: {} (use csv|json)", other));
        }
    }
    println!(
        "Exported {} accounts and {} transactions to {}",
        accounts.len(),
        transactions.len(),
        out
    );
    Ok(())
}

/// Route each transaction to exactly one table by its owning account's kind.
/// Transactions whose account no longer exists land nowhere.
pub fn partition<'a>(
    accounts: &'a [Account],
    transactions: &'a [Transaction],
) -> (Vec<&'a Transaction>, Vec<&'a Transaction>, Vec<&'a Transaction>) {
    let by_id: HashMap<&str, &Account> =
        accounts.iter().map(|a| (a.id.as_str(), a)).collect();
    let mut savings = Vec::new();
    let mut managed = Vec::new();
    let mut self_directed = Vec::new();
    for txn in transactions {
        let Some(account) = by_id.get(txn.account_id.as_str()) else {
            continue;
        };
        match (account.r#type, account.subtype) {
            (AccountType::Savings, _) => savings.push(txn),
            (AccountType::Investment, Some(InvestmentSubtype::SelfDirected)) => {
                self_directed.push(txn)
            }
            (AccountType::Investment, _) => managed.push(txn),
        }
    }
    (savings, managed, self_directed)
}

fn write_csv<T: serde::Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Create CSV {}", path.display()))?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
