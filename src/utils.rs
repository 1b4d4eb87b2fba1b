// Copyright (c) 2025 Nestegg Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

const UA: &str = concat!(
    "nestegg/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/nestegg-app/nestegg)"
);

pub fn http_client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_month(s: &str) -> Result<String> {
    chrono::NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok(s.to_string())
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("${}", d.round_dp(2))
}

/// First day of the calendar month containing `d`.
pub fn month_start(d: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(d.year(), d.month(), 1).expect("valid first of month")
}

/// First day of the month after the one containing `d`.
pub fn next_month(d: NaiveDate) -> NaiveDate {
    let (y, m) = if d.month() == 12 {
        (d.year() + 1, 1)
    } else {
        (d.year(), d.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1).expect("valid first of month")
}

/// "yyyy-MM" bucket key.
pub fn month_key(d: NaiveDate) -> String {
    d.format("%Y-%m").to_string()
}

/// Short chart label, e.g. "Mar-24".
pub fn month_label(d: NaiveDate) -> String {
    d.format("%b-%y").to_string()
}

pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Mint the next id in a `prefix_NN...` sequence: max numeric suffix plus one,
/// zero-padded. Ids whose suffix is not numeric are ignored.
pub fn next_id<'a, I>(ids: I, prefix: &str, width: usize) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let max = ids
        .into_iter()
        .filter_map(|id| id.strip_prefix(prefix))
        .filter_map(|suffix| suffix.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    format!("{}{:0width$}", prefix, max + 1, width = width)
}

pub fn next_account_id(conn: &Connection) -> Result<String> {
    let mut stmt = conn.prepare("SELECT id FROM accounts")?;
    let ids = stmt
        .query_map([], |r| r.get::<_, String>(0))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(next_id(ids.iter().map(String::as_str), "acc_", 2))
}

pub fn next_transaction_id(conn: &Connection) -> Result<String> {
    let mut stmt = conn.prepare("SELECT id FROM transactions")?;
    let ids = stmt
        .query_map([], |r| r.get::<_, String>(0))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(next_id(ids.iter().map(String::as_str), "txn_", 5))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

// Advisor endpoint settings
pub fn get_advisor_url(conn: &Connection) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key='advisor_url'",
            [],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

pub fn set_advisor_url(conn: &Connection, url: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('advisor_url', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![url],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_id_pads_and_skips_garbage() {
        assert_eq!(next_id(Vec::<&str>::new(), "acc_", 2), "acc_01");
        assert_eq!(next_id(["acc_01", "acc_07"], "acc_", 2), "acc_08");
        assert_eq!(
            next_id(["txn_00009", "txn_junk", "other_3"], "txn_", 5),
            "txn_00010"
        );
    }

    #[test]
    fn month_helpers_wrap_year_boundaries() {
        let dec = NaiveDate::from_ymd_opt(2024, 12, 15).unwrap();
        assert_eq!(month_start(dec), NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(next_month(dec), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(month_key(dec), "2024-12");
        assert_eq!(month_label(dec), "Dec-24");
    }
}
