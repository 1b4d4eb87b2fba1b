// Copyright (c) 2025 Nestegg Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Account, Transaction};
use crate::utils::parse_date;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("app.nestegg", "Nestegg", "nestegg"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("nestegg.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

/// Public so tests can build in-memory databases with the production schema.
pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS accounts(
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        bank TEXT NOT NULL,
        type TEXT NOT NULL CHECK(type IN ('savings','investment')),
        interest_rate TEXT,
        subtype TEXT CHECK(subtype IN ('managed','self-directed')),
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS transactions(
        id TEXT PRIMARY KEY,
        account_id TEXT NOT NULL,
        type TEXT NOT NULL,
        amount TEXT NOT NULL,
        date TEXT NOT NULL,
        asset_name TEXT,
        asset_code TEXT,
        asset_category TEXT,
        shares TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
    CREATE INDEX IF NOT EXISTS idx_transactions_account ON transactions(account_id);
    "#,
    )?;
    Ok(())
}

pub fn insert_account(conn: &Connection, account: &Account) -> Result<()> {
    conn.execute(
        "INSERT INTO accounts(id, name, bank, type, interest_rate, subtype)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            account.id,
            account.name,
            account.bank,
            account.r#type.as_str(),
            account.interest_rate.map(|r| r.to_string()),
            account.subtype.map(|s| s.as_str()),
        ],
    )?;
    Ok(())
}

pub fn insert_transaction(conn: &Connection, txn: &Transaction) -> Result<()> {
    conn.execute(
        "INSERT INTO transactions(id, account_id, type, amount, date, asset_name, asset_code, asset_category, shares)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            txn.id,
            txn.account_id,
            txn.r#type.as_str(),
            txn.amount.to_string(),
            txn.date.to_string(),
            txn.asset_name,
            txn.asset_code,
            txn.asset_category.map(|c| c.as_str()),
            txn.shares.map(|s| s.to_string()),
        ],
    )?;
    Ok(())
}

pub fn load_accounts(conn: &Connection) -> Result<Vec<Account>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, bank, type, interest_rate, subtype FROM accounts ORDER BY id",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, Option<String>>(4)?,
            r.get::<_, Option<String>>(5)?,
        ))
    })?;
    let mut accounts = Vec::new();
    for row in rows {
        let (id, name, bank, typ, rate, subtype) = row?;
        let r#type = typ
            .parse()
            .with_context(|| format!("Account '{}' has invalid type", id))?;
        let interest_rate = rate
            .map(|r| {
                r.parse::<Decimal>()
                    .with_context(|| format!("Invalid interest rate '{}' for account {}", r, id))
            })
            .transpose()?;
        let subtype = subtype
            .map(|s| {
                s.parse()
                    .with_context(|| format!("Account '{}' has invalid subtype", id))
            })
            .transpose()?;
        accounts.push(Account {
            id,
            name,
            bank,
            r#type,
            interest_rate,
            subtype,
        });
    }
    Ok(accounts)
}

pub fn load_transactions(conn: &Connection) -> Result<Vec<Transaction>> {
    query_transactions(conn, "SELECT id, account_id, type, amount, date, asset_name, asset_code, asset_category, shares FROM transactions ORDER BY date, id", &[])
}

pub fn account_transactions(conn: &Connection, account_id: &str) -> Result<Vec<Transaction>> {
    query_transactions(
        conn,
        "SELECT id, account_id, type, amount, date, asset_name, asset_code, asset_category, shares FROM transactions WHERE account_id=?1 ORDER BY date, id",
        &[account_id],
    )
}

fn query_transactions(conn: &Connection, sql: &str, args: &[&str]) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(sql)?;
    let params: Vec<&dyn rusqlite::ToSql> =
        args.iter().map(|s| s as &dyn rusqlite::ToSql).collect();
    let rows = stmt.query_map(rusqlite::params_from_iter(params), |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, Option<String>>(5)?,
            r.get::<_, Option<String>>(6)?,
            r.get::<_, Option<String>>(7)?,
            r.get::<_, Option<String>>(8)?,
        ))
    })?;
    let mut txns = Vec::new();
    for row in rows {
        let (id, account_id, typ, amount, date, asset_name, asset_code, category, shares) = row?;
        let r#type = typ
            .parse()
            .with_context(|| format!("Transaction '{}' has invalid type", id))?;
        let amount = amount
            .parse::<Decimal>()
            .with_context(|| format!("Invalid amount '{}' for transaction {}", amount, id))?;
        let date =
            parse_date(&date).with_context(|| format!("Invalid date for transaction {}", id))?;
        let asset_category = category
            .map(|c| {
                c.parse()
                    .with_context(|| format!("Transaction '{}' has invalid asset category", id))
            })
            .transpose()?;
        let shares = shares
            .map(|s| {
                s.parse::<Decimal>()
                    .with_context(|| format!("Invalid shares '{}' for transaction {}", s, id))
            })
            .transpose()?;
        txns.push(Transaction {
            id,
            account_id,
            r#type,
            amount,
            date,
            asset_name,
            asset_code,
            asset_category,
            shares,
        });
    }
    Ok(txns)
}
