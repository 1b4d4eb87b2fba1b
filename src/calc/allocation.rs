// Copyright (c) 2025 Nestegg Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{AssetCategory, Transaction};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Allocation {
    pub investment: BTreeMap<AssetCategory, Decimal>,
    pub gains: BTreeMap<AssetCategory, Decimal>,
}

fn zeroed() -> BTreeMap<AssetCategory, Decimal> {
    AssetCategory::ALL
        .iter()
        .map(|c| (*c, Decimal::ZERO))
        .collect()
}

/// Invested capital and gains totaled per asset category. All four categories
/// are always present, zeroed when untouched. Transactions without a stored
/// category are skipped.
pub fn allocation(transactions: &[Transaction]) -> Allocation {
    let mut alloc = Allocation {
        investment: zeroed(),
        gains: zeroed(),
    };
    for txn in transactions {
        let Some(category) = txn.asset_category else {
            continue;
        };
        if txn.r#type == crate::models::TransactionType::Buy {
            *alloc.investment.entry(category).or_default() += txn.amount;
        } else if txn.r#type.is_asset_income() {
            *alloc.gains.entry(category).or_default() += txn.amount;
        }
    }
    alloc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn txn(
        r#type: TransactionType,
        amount: &str,
        category: Option<AssetCategory>,
    ) -> Transaction {
        Transaction {
            id: "txn_00001".into(),
            account_id: "acc_02".into(),
            r#type,
            amount: Decimal::from_str(amount).unwrap(),
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            asset_name: None,
            asset_code: None,
            asset_category: category,
            shares: None,
        }
    }

    #[test]
    fn buy_goes_to_investment_and_dividend_to_gains() {
        let txns = vec![
            txn(TransactionType::Buy, "500", Some(AssetCategory::Reit)),
            txn(TransactionType::Dividend, "20", Some(AssetCategory::Reit)),
        ];
        let alloc = allocation(&txns);
        assert_eq!(
            alloc.investment[&AssetCategory::Reit],
            Decimal::from_str("500").unwrap()
        );
        assert_eq!(
            alloc.gains[&AssetCategory::Reit],
            Decimal::from_str("20").unwrap()
        );
        assert_eq!(alloc.investment[&AssetCategory::StockEtf], Decimal::ZERO);
        assert_eq!(alloc.gains[&AssetCategory::ReitEtf], Decimal::ZERO);
    }

    #[test]
    fn uncategorized_and_non_trade_types_are_ignored() {
        let txns = vec![
            txn(TransactionType::Buy, "500", None),
            txn(TransactionType::Sell, "100", Some(AssetCategory::StockEtf)),
            txn(TransactionType::Contribution, "250", Some(AssetCategory::StockEtf)),
        ];
        let alloc = allocation(&txns);
        assert!(alloc.investment.values().all(|v| v.is_zero()));
        assert!(alloc.gains.values().all(|v| v.is_zero()));
    }

    #[test]
    fn interest_never_lands_in_asset_gains() {
        // A categorized interest row can arrive via a workbook import even
        // though tx add would reject it.
        let txns = vec![
            txn(TransactionType::Buy, "500", Some(AssetCategory::IndividualStock)),
            txn(TransactionType::Interest, "20", Some(AssetCategory::IndividualStock)),
        ];
        let alloc = allocation(&txns);
        assert_eq!(alloc.gains[&AssetCategory::IndividualStock], Decimal::ZERO);
        assert_eq!(
            alloc.investment[&AssetCategory::IndividualStock],
            Decimal::from_str("500").unwrap()
        );
    }

    #[test]
    fn all_four_categories_present_for_empty_input() {
        let alloc = allocation(&[]);
        assert_eq!(alloc.investment.len(), 4);
        assert_eq!(alloc.gains.len(), 4);
    }
}
