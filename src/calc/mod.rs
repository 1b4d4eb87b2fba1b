// Copyright (c) 2025 Nestegg Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure calculation engine. Every function here borrows its inputs, returns
//! freshly built structures, and takes the reference date explicitly where the
//! semantics depend on "now" — safe to call on every refresh.

mod allocation;
mod balance;
mod growth;
mod performance;
mod projection;
mod summary;

pub use allocation::{allocation, Allocation};
pub use balance::balance;
pub use growth::{growth_series, GrowthPoint};
pub use performance::{asset_performance, AssetInfo, AssetPerformance, AssetState, MonthlySnapshot};
pub use projection::{project, ProjectionPoint};
pub use summary::{summarize, PeriodTotals, TransactionSummary};
