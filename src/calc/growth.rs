// Copyright (c) 2025 Nestegg Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::summary::PeriodTotals;
use crate::models::Transaction;
use crate::utils::{month_key, month_label, month_start, next_month};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthPoint {
    pub month: String,
    pub balance: Decimal,
    pub contributions: Decimal,
    pub withdrawals: Decimal,
    pub interest: Decimal,
}

/// Monthly cumulative-balance series from the earliest transaction's month
/// through `today`'s month inclusive. Months without activity still emit a
/// point: zero deltas, balance carried forward. If `today` falls before the
/// earliest transaction month the walk bound is already exceeded and the
/// series is empty.
pub fn growth_series(transactions: &[Transaction], today: NaiveDate) -> Vec<GrowthPoint> {
    if transactions.is_empty() {
        return Vec::new();
    }

    let mut by_month: BTreeMap<String, PeriodTotals> = BTreeMap::new();
    for txn in transactions {
        by_month.entry(month_key(txn.date)).or_default().apply(txn);
    }

    let earliest = transactions
        .iter()
        .map(|t| t.date)
        .min()
        .expect("non-empty transaction list");
    let first = month_start(earliest);
    let last = month_start(today);

    let mut series = Vec::new();
    let mut cumulative = Decimal::ZERO;
    let mut current = first;
    while current <= last {
        let monthly = by_month.get(&month_key(current)).cloned().unwrap_or_default();
        cumulative += monthly.contributions + monthly.interest - monthly.withdrawals;
        series.push(GrowthPoint {
            month: month_label(current),
            balance: cumulative,
            contributions: monthly.contributions,
            withdrawals: monthly.withdrawals,
            interest: monthly.interest,
        });
        current = next_month(current);
    }
    series
}
