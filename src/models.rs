// Copyright (c) 2025 Nestegg Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
#[error("Unknown {kind} '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Savings,
    Investment,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Savings => "savings",
            AccountType::Investment => "investment",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = ParseEnumError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "savings" => Ok(AccountType::Savings),
            "investment" => Ok(AccountType::Investment),
            other => Err(ParseEnumError {
                kind: "account type",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvestmentSubtype {
    Managed,
    SelfDirected,
}

impl InvestmentSubtype {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvestmentSubtype::Managed => "managed",
            InvestmentSubtype::SelfDirected => "self-directed",
        }
    }
}

impl fmt::Display for InvestmentSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvestmentSubtype {
    type Err = ParseEnumError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "managed" => Ok(InvestmentSubtype::Managed),
            "self-directed" => Ok(InvestmentSubtype::SelfDirected),
            other => Err(ParseEnumError {
                kind: "investment subtype",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransactionType {
    Contribution,
    Withdrawal,
    Interest,
    Buy,
    Sell,
    Dividend,
    StockLending,
    Distribution,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Contribution => "contribution",
            TransactionType::Withdrawal => "withdrawal",
            TransactionType::Interest => "interest",
            TransactionType::Buy => "buy",
            TransactionType::Sell => "sell",
            TransactionType::Dividend => "dividend",
            TransactionType::StockLending => "stock-lending",
            TransactionType::Distribution => "distribution",
        }
    }

    /// Withdrawal and sell reduce a balance; every other type adds to it.
    pub fn is_outflow(&self) -> bool {
        matches!(self, TransactionType::Withdrawal | TransactionType::Sell)
    }

    /// Income thrown off by a held asset: dividends, stock lending,
    /// distributions. Excludes plain interest.
    pub fn is_asset_income(&self) -> bool {
        matches!(
            self,
            TransactionType::Dividend
                | TransactionType::StockLending
                | TransactionType::Distribution
        )
    }

    /// Income not tied to principal movement.
    pub fn is_gain(&self) -> bool {
        matches!(
            self,
            TransactionType::Interest
                | TransactionType::Dividend
                | TransactionType::StockLending
                | TransactionType::Distribution
        )
    }

    /// Principal put in: cash contribution or an asset purchase.
    pub fn is_contribution(&self) -> bool {
        matches!(self, TransactionType::Contribution | TransactionType::Buy)
    }

    /// Types that reference an asset (self-directed trades and their income).
    pub fn is_asset_linked(&self) -> bool {
        matches!(
            self,
            TransactionType::Buy
                | TransactionType::Sell
                | TransactionType::Dividend
                | TransactionType::StockLending
                | TransactionType::Distribution
        )
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = ParseEnumError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "contribution" => Ok(TransactionType::Contribution),
            "withdrawal" => Ok(TransactionType::Withdrawal),
            "interest" => Ok(TransactionType::Interest),
            "buy" => Ok(TransactionType::Buy),
            "sell" => Ok(TransactionType::Sell),
            "dividend" => Ok(TransactionType::Dividend),
            "stock-lending" => Ok(TransactionType::StockLending),
            "distribution" => Ok(TransactionType::Distribution),
            other => Err(ParseEnumError {
                kind: "transaction type",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AssetCategory {
    #[serde(rename = "REIT ETF")]
    ReitEtf,
    #[serde(rename = "REIT")]
    Reit,
    #[serde(rename = "Stock ETF")]
    StockEtf,
    #[serde(rename = "Individual Stock")]
    IndividualStock,
}

impl AssetCategory {
    pub const ALL: [AssetCategory; 4] = [
        AssetCategory::ReitEtf,
        AssetCategory::Reit,
        AssetCategory::StockEtf,
        AssetCategory::IndividualStock,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetCategory::ReitEtf => "REIT ETF",
            AssetCategory::Reit => "REIT",
            AssetCategory::StockEtf => "Stock ETF",
            AssetCategory::IndividualStock => "Individual Stock",
        }
    }

    /// Classify an asset by its display name. Computed once when the first
    /// transaction for an asset is recorded, then stored with the transaction;
    /// never re-derived downstream.
    pub fn from_asset_name(name: &str) -> AssetCategory {
        let upper = name.to_uppercase();
        let has_reit = upper.contains("REIT");
        let has_etf = upper.contains("ETF");
        if has_reit && has_etf {
            AssetCategory::ReitEtf
        } else if has_reit {
            AssetCategory::Reit
        } else if has_etf {
            AssetCategory::StockEtf
        } else {
            AssetCategory::IndividualStock
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetCategory {
    type Err = ParseEnumError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "REIT ETF" => Ok(AssetCategory::ReitEtf),
            "REIT" => Ok(AssetCategory::Reit),
            "Stock ETF" => Ok(AssetCategory::StockEtf),
            "Individual Stock" => Ok(AssetCategory::IndividualStock),
            other => Err(ParseEnumError {
                kind: "asset category",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub bank: String,
    pub r#type: AccountType,
    /// Annual interest rate (percent); savings accounts only.
    #[serde(default)]
    pub interest_rate: Option<Decimal>,
    /// Investment accounts only.
    #[serde(default)]
    pub subtype: Option<InvestmentSubtype>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub account_id: String,
    pub r#type: TransactionType,
    /// Non-negative magnitude; the sign is implied by the type.
    pub amount: Decimal,
    /// Serialized as an ISO calendar date; imports also accept full ISO 8601
    /// timestamps, of which only the date part is kept.
    #[serde(with = "iso_date")]
    pub date: NaiveDate,
    #[serde(default)]
    pub asset_name: Option<String>,
    #[serde(default)]
    pub asset_code: Option<String>,
    #[serde(default)]
    pub asset_category: Option<AssetCategory>,
    /// Required and positive for buy/sell, absent otherwise.
    #[serde(default)]
    pub shares: Option<Decimal>,
}

mod iso_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(de)?;
        // Byte 10 may not be a char boundary in garbage input; fall back to
        // the whole string and let the parse report the error.
        let date_part = raw.get(..10).unwrap_or(raw.as_str());
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(serde::de::Error::custom)
    }
}
