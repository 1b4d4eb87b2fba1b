// Copyright (c) 2025 Nestegg Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calc::{balance, project};
use crate::db::load_transactions;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let contribution = parse_decimal(sub.get_one::<String>("contribution").unwrap().trim())?;
    let rate = parse_decimal(sub.get_one::<String>("rate").unwrap().trim())?;
    let years = *sub.get_one::<u32>("years").unwrap();

    let initial = match sub.get_one::<String>("initial") {
        Some(raw) => parse_decimal(raw.trim())?,
        None => balance(&load_transactions(conn)?),
    };
    let start = match sub.get_one::<String>("as-of") {
        Some(raw) => parse_date(raw.trim())?,
        None => chrono::Utc::now().date_naive(),
    };

    let points = project(initial, contribution, rate, years, start);
    if maybe_print_json(json_flag, jsonl_flag, &points)? {
        return Ok(());
    }
    let rows = points
        .iter()
        .map(|p| {
            vec![
                p.month.clone(),
                fmt_money(&p.balance.round_dp(2)),
                fmt_money(&p.total_contributions),
                fmt_money(&p.total_interest.round_dp(2)),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Month", "Balance", "Contributed", "Interest"], rows)
    );
    Ok(())
}
