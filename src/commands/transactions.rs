// Copyright (c) 2025 Nestegg Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::insert_transaction;
use crate::models::{AssetCategory, Transaction, TransactionType};
use crate::utils::{
    maybe_print_json, next_transaction_id, parse_date, parse_decimal, parse_month, pretty_table,
};
use anyhow::{anyhow, Result};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let account_id = sub.get_one::<String>("account").unwrap().trim().to_string();
    let date = parse_date(sub.get_one::<String>("date").unwrap().trim())?;
    let r#type: TransactionType = sub.get_one::<String>("type").unwrap().parse()?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap().trim())?;
    if amount < Decimal::ZERO {
        return Err(anyhow!(
            "Amount must be non-negative; the sign is implied by the type"
        ));
    }

    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM accounts WHERE id=?1)",
        params![account_id],
        |r| r.get(0),
    )?;
    if !exists {
        return Err(anyhow!("Account '{}' not found", account_id));
    }

    let asset_name = sub.get_one::<String>("asset-name").map(|s| s.trim().to_string());
    let asset_code = sub.get_one::<String>("asset-code").map(|s| s.trim().to_string());
    let shares = sub
        .get_one::<String>("shares")
        .map(|s| parse_decimal(s.trim()))
        .transpose()?;

    let (asset_name, asset_code, asset_category, shares) = if r#type.is_asset_linked() {
        let name = asset_name.ok_or_else(|| anyhow!("--asset-name is required for {}", r#type))?;
        let code = asset_code.ok_or_else(|| anyhow!("--asset-code is required for {}", r#type))?;
        let shares = match r#type {
            TransactionType::Buy | TransactionType::Sell => {
                let shares =
                    shares.ok_or_else(|| anyhow!("--shares is required for {}", r#type))?;
                if shares <= Decimal::ZERO {
                    return Err(anyhow!("Share count must be positive"));
                }
                Some(shares)
            }
            _ => {
                if shares.is_some() {
                    return Err(anyhow!("--shares applies only to buy/sell"));
                }
                None
            }
        };
        // The category is fixed when the asset first appears and reused for
        // later transactions, even if the derivation heuristic changes.
        let category = match stored_category(conn, &code)? {
            Some(category) => category,
            None => AssetCategory::from_asset_name(&name),
        };
        (Some(name), Some(code), Some(category), shares)
    } else {
        if asset_name.is_some() || asset_code.is_some() || shares.is_some() {
            return Err(anyhow!("Asset fields apply only to asset-linked types"));
        }
        (None, None, None, None)
    };

    let txn = Transaction {
        id: next_transaction_id(conn)?,
        account_id,
        r#type,
        amount,
        date,
        asset_name,
        asset_code,
        asset_category,
        shares,
    };
    insert_transaction(conn, &txn)?;
    println!(
        "Recorded {} {} of {} on {} (acct: {})",
        txn.id, txn.r#type, txn.amount, txn.date, txn.account_id
    );
    Ok(())
}

fn stored_category(conn: &Connection, asset_code: &str) -> Result<Option<AssetCategory>> {
    use rusqlite::OptionalExtension;
    let found: Option<String> = conn
        .query_row(
            "SELECT asset_category FROM transactions
             WHERE asset_code=?1 AND asset_category IS NOT NULL
             ORDER BY id LIMIT 1",
            params![asset_code],
            |r| r.get(0),
        )
        .optional()?;
    Ok(found.map(|c| c.parse()).transpose()?)
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.date.clone(),
                    r.account.clone(),
                    r.r#type.clone(),
                    r.amount.clone(),
                    r.asset.clone(),
                    r.shares.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Account", "Type", "Amount", "Asset", "Shares"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub account: String,
    pub r#type: String,
    pub amount: String,
    pub asset: String,
    pub shares: String,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let mut sql = String::from(
        "SELECT t.id, t.date, t.account_id, t.type, t.amount, t.asset_code, t.shares
         FROM transactions t WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();

    if let Some(acct) = sub.get_one::<String>("account") {
        sql.push_str(" AND t.account_id=?");
        params_vec.push(acct.into());
    }
    if let Some(month) = sub.get_one::<String>("month") {
        sql.push_str(" AND substr(t.date,1,7)=?");
        params_vec.push(parse_month(month.trim())?);
    }
    sql.push_str(" ORDER BY t.date DESC, t.id DESC");
    if let Some(limit) = sub.get_one::<usize>("limit") {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(params))?;

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let asset: Option<String> = r.get(5)?;
        let shares: Option<String> = r.get(6)?;
        data.push(TransactionRow {
            id: r.get(0)?,
            date: r.get(1)?,
            account: r.get(2)?,
            r#type: r.get(3)?,
            amount: r.get(4)?,
            asset: asset.unwrap_or_default(),
            shares: shares.unwrap_or_default(),
        });
    }
    Ok(data)
}
