// Copyright (c) 2025 Nestegg Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calc;
use crate::db::{account_transactions, load_accounts, load_transactions};
use crate::models::Transaction;
use crate::utils::{fmt_money, maybe_print_json, parse_date, pretty_table};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("balances", sub)) => balances(conn, sub)?,
        Some(("summary", sub)) => summary(conn, sub)?,
        Some(("growth", sub)) => growth(conn, sub)?,
        Some(("performance", sub)) => performance(conn, sub)?,
        Some(("allocation", sub)) => allocation(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn scoped_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    match sub.get_one::<String>("account") {
        Some(id) => account_transactions(conn, id.trim()),
        None => load_transactions(conn),
    }
}

fn as_of(sub: &clap::ArgMatches) -> Result<NaiveDate> {
    match sub.get_one::<String>("as-of") {
        Some(raw) => parse_date(raw.trim()),
        None => Ok(chrono::Utc::now().date_naive()),
    }
}

fn balances(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let accounts = load_accounts(conn)?;

    #[derive(serde::Serialize)]
    struct BalanceRow {
        id: String,
        name: String,
        balance: Decimal,
    }

    let mut data = Vec::new();
    let mut total = Decimal::ZERO;
    for account in &accounts {
        let bal = calc::balance(&account_transactions(conn, &account.id)?);
        total += bal;
        data.push(BalanceRow {
            id: account.id.clone(),
            name: account.name.clone(),
            balance: bal,
        });
    }
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    let mut rows: Vec<Vec<String>> = data
        .into_iter()
        .map(|r| vec![r.id, r.name, fmt_money(&r.balance)])
        .collect();
    rows.push(vec!["".into(), "Total".into(), fmt_money(&total)]);
    println!("{}", pretty_table(&["Id", "Account", "Balance"], rows));
    Ok(())
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let txns = scoped_transactions(conn, sub)?;
    let summary = calc::summarize(&txns, as_of(sub)?);
    if maybe_print_json(json_flag, jsonl_flag, &summary)? {
        return Ok(());
    }
    let row = |label: &str, totals: &calc::PeriodTotals| {
        vec![
            label.to_string(),
            fmt_money(&totals.contributions),
            fmt_money(&totals.interest),
            fmt_money(&totals.withdrawals),
        ]
    };
    println!(
        "{}",
        pretty_table(
            &["Period", "Contributions", "Gains", "Withdrawals"],
            vec![
                row("This month", &summary.month),
                row("This year", &summary.year),
                row("All time", &summary.all_time),
            ],
        )
    );
    Ok(())
}

fn growth(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let txns = scoped_transactions(conn, sub)?;
    let series = calc::growth_series(&txns, as_of(sub)?);
    if maybe_print_json(json_flag, jsonl_flag, &series)? {
        return Ok(());
    }
    let rows = series
        .iter()
        .map(|p| {
            vec![
                p.month.clone(),
                fmt_money(&p.balance),
                fmt_money(&p.contributions),
                fmt_money(&p.interest),
                fmt_money(&p.withdrawals),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Month", "Balance", "Contributions", "Gains", "Withdrawals"],
            rows,
        )
    );
    Ok(())
}

fn performance(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let txns = scoped_transactions(conn, sub)?;
    let perf = calc::asset_performance(&txns, as_of(sub)?);
    if maybe_print_json(json_flag, jsonl_flag, &perf)? {
        return Ok(());
    }

    if sub.get_flag("history") {
        let mut rows = Vec::new();
        for snapshot in &perf.monthly {
            for (code, state) in &snapshot.assets {
                rows.push(vec![
                    snapshot.month.clone(),
                    code.clone(),
                    fmt_money(&state.investment),
                    fmt_money(&state.dividends),
                    state.shares.to_string(),
                ]);
            }
        }
        println!(
            "{}",
            pretty_table(&["Month", "Asset", "Investment", "Dividends", "Shares"], rows)
        );
        return Ok(());
    }

    let Some(latest) = perf.monthly.last() else {
        println!("No asset transactions recorded");
        return Ok(());
    };
    let mut rows = Vec::new();
    for info in &perf.unique_assets {
        let state = &latest.assets[&info.asset_code];
        // Derived metrics live here in the display layer, zero-guarded.
        let yield_per_share = if state.shares.is_zero() {
            Decimal::ZERO
        } else {
            state.dividends / state.shares
        };
        let roi = if state.investment.is_zero() {
            Decimal::ZERO
        } else {
            state.dividends / state.investment * Decimal::from(100)
        };
        rows.push(vec![
            info.asset_code.clone(),
            info.asset_name.clone(),
            fmt_money(&state.investment),
            fmt_money(&state.dividends),
            state.shares.to_string(),
            format!("${}", yield_per_share.round_dp(4)),
            format!("{}%", roi.round_dp(2)),
        ]);
    }
    println!(
        "{}",
        pretty_table(
            &["Asset", "Name", "Investment", "Dividends", "Shares", "Div/Share", "ROI"],
            rows,
        )
    );
    Ok(())
}

fn allocation(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let txns = scoped_transactions(conn, sub)?;
    let alloc = calc::allocation(&txns);
    if maybe_print_json(json_flag, jsonl_flag, &alloc)? {
        return Ok(());
    }
    let rows = alloc
        .investment
        .iter()
        .map(|(category, invested)| {
            vec![
                category.to_string(),
                fmt_money(invested),
                fmt_money(&alloc.gains[category]),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Category", "Investment", "Gains"], rows)
    );
    Ok(())
}
