// Copyright (c) 2025 Nestegg Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calc::balance;
use crate::db::{account_transactions, insert_account, load_accounts};
use crate::models::{Account, AccountType, InvestmentSubtype};
use crate::utils::{fmt_money, maybe_print_json, next_account_id, parse_decimal, pretty_table};
use anyhow::{anyhow, Result};
use rusqlite::{params, Connection};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    let bank = sub.get_one::<String>("bank").unwrap().trim().to_string();
    let r#type: AccountType = sub.get_one::<String>("type").unwrap().parse()?;
    let rate = sub.get_one::<String>("rate");
    let subtype = sub.get_one::<String>("subtype");

    let (interest_rate, subtype) = match r#type {
        AccountType::Savings => {
            if subtype.is_some() {
                return Err(anyhow!("Subtype applies only to investment accounts"));
            }
            let rate = rate.map(|r| parse_decimal(r.trim())).transpose()?;
            (rate, None)
        }
        AccountType::Investment => {
            if rate.is_some() {
                return Err(anyhow!("Interest rate applies only to savings accounts"));
            }
            let subtype: InvestmentSubtype = subtype
                .ok_or_else(|| anyhow!("Investment accounts require --subtype"))?
                .parse()?;
            (None, Some(subtype))
        }
    };

    let account = Account {
        id: next_account_id(conn)?,
        name,
        bank,
        r#type,
        interest_rate,
        subtype,
    };
    insert_account(conn, &account)?;
    println!(
        "Added account {} '{}' ({}, {})",
        account.id, account.name, account.r#type, account.bank
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let accounts = load_accounts(conn)?;
    if maybe_print_json(json_flag, jsonl_flag, &accounts)? {
        return Ok(());
    }
    let mut rows = Vec::new();
    for account in &accounts {
        let txns = account_transactions(conn, &account.id)?;
        let kind = match account.subtype {
            Some(sub) => format!("{} ({})", account.r#type, sub),
            None => account.r#type.to_string(),
        };
        rows.push(vec![
            account.id.clone(),
            account.name.clone(),
            account.bank.clone(),
            kind,
            account
                .interest_rate
                .map(|r| format!("{}%", r))
                .unwrap_or_default(),
            fmt_money(&balance(&txns)),
        ]);
    }
    println!(
        "{}",
        pretty_table(&["Id", "Name", "Bank", "Type", "Rate", "Balance"], rows)
    );
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    let n = conn.execute("DELETE FROM accounts WHERE id=?1", params![id])?;
    if n == 0 {
        return Err(anyhow!("Account '{}' not found", id));
    }
    conn.execute("DELETE FROM transactions WHERE account_id=?1", params![id])?;
    println!("Removed account '{}' and its transactions", id);
    Ok(())
}
