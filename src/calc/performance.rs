// Copyright (c) 2025 Nestegg Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Transaction;
use crate::utils::{month_label, month_start, next_month, same_month};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetInfo {
    pub asset_code: String,
    pub asset_name: String,
    pub has_dividends: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AssetState {
    pub investment: Decimal,
    pub dividends: Decimal,
    pub shares: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySnapshot {
    pub month: String,
    pub assets: BTreeMap<String, AssetState>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPerformance {
    pub unique_assets: Vec<AssetInfo>,
    pub monthly: Vec<MonthlySnapshot>,
}

/// Per-asset cumulative investment / dividend / share series, one snapshot per
/// calendar month from the first transaction's month through the later of the
/// last transaction's month and `today`'s month. Every known asset appears in
/// every snapshot, flat where it had no activity.
///
/// A sell reduces shares only; the recorded cumulative investment is left
/// untouched, so invested capital is overstated after sales. Yield and ROI are
/// left to the display layer.
pub fn asset_performance(transactions: &[Transaction], today: NaiveDate) -> AssetPerformance {
    if transactions.is_empty() {
        return AssetPerformance {
            unique_assets: Vec::new(),
            monthly: Vec::new(),
        };
    }

    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by_key(|t| t.date);

    let mut assets: BTreeMap<String, AssetInfo> = BTreeMap::new();
    for txn in &sorted {
        if let (Some(code), Some(name)) = (&txn.asset_code, &txn.asset_name) {
            let info = assets.entry(code.clone()).or_insert_with(|| AssetInfo {
                asset_code: code.clone(),
                asset_name: name.clone(),
                has_dividends: false,
            });
            if txn.r#type.is_asset_income() && txn.amount > Decimal::ZERO {
                info.has_dividends = true;
            }
        }
    }

    let mut state: BTreeMap<String, AssetState> = assets
        .keys()
        .map(|code| (code.clone(), AssetState::default()))
        .collect();

    let first = month_start(sorted[0].date);
    let last_txn_month = month_start(sorted[sorted.len() - 1].date);
    let last = last_txn_month.max(month_start(today));

    let mut monthly = Vec::new();
    let mut idx = 0;
    let mut current = first;
    while current <= last {
        while idx < sorted.len() && same_month(sorted[idx].date, current) {
            let txn = sorted[idx];
            if let Some(s) = txn.asset_code.as_ref().and_then(|c| state.get_mut(c)) {
                use crate::models::TransactionType::*;
                match txn.r#type {
                    Buy => {
                        s.investment += txn.amount;
                        s.shares += txn.shares.unwrap_or_default();
                    }
                    Sell => {
                        s.shares -= txn.shares.unwrap_or_default();
                    }
                    Dividend | StockLending | Distribution => {
                        s.dividends += txn.amount;
                    }
                    _ => {}
                }
            }
            idx += 1;
        }
        monthly.push(MonthlySnapshot {
            month: month_label(current),
            assets: state.clone(),
        });
        current = next_month(current);
    }

    AssetPerformance {
        unique_assets: assets.into_values().collect(),
        monthly,
    }
}
