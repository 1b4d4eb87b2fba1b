// Copyright (c) 2025 Nestegg Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Transaction;
use crate::utils::same_month;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PeriodTotals {
    pub contributions: Decimal,
    pub interest: Decimal,
    pub withdrawals: Decimal,
}

impl PeriodTotals {
    pub(crate) fn apply(&mut self, txn: &Transaction) {
        let t = txn.r#type;
        if t.is_contribution() {
            self.contributions += txn.amount;
        } else if t.is_gain() {
            self.interest += txn.amount;
        } else if t.is_outflow() {
            self.withdrawals += txn.amount;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    pub month: PeriodTotals,
    pub year: PeriodTotals,
    pub all_time: PeriodTotals,
}

/// Month / year / all-time contribution, gain, and withdrawal totals.
/// `interest` is the generic gains bucket: interest, dividends, stock lending,
/// and distributions all land there. `today` anchors the month/year filters.
pub fn summarize(transactions: &[Transaction], today: NaiveDate) -> TransactionSummary {
    let mut summary = TransactionSummary::default();
    for txn in transactions {
        summary.all_time.apply(txn);
        if txn.date.year() == today.year() {
            summary.year.apply(txn);
        }
        if same_month(txn.date, today) {
            summary.month.apply(txn);
        }
    }
    summary
}
