// Copyright (c) 2025 Nestegg Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Transaction;
use rust_decimal::Decimal;

/// Net balance of a transaction list: withdrawal and sell subtract their
/// amount, every other type adds it. Order-independent; empty input is zero.
pub fn balance(transactions: &[Transaction]) -> Decimal {
    transactions.iter().fold(Decimal::ZERO, |acc, txn| {
        if txn.r#type.is_outflow() {
            acc - txn.amount
        } else {
            acc + txn.amount
        }
    })
}
