// Copyright (c) 2025 Nestegg Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calc::balance;
use crate::db::{account_transactions, load_accounts};
use crate::utils::{
    get_advisor_url, http_client, maybe_print_json, parse_decimal, pretty_table, set_advisor_url,
};
use anyhow::{anyhow, Result};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Low,
    Medium,
    High,
}

impl std::str::FromStr for RiskTolerance {
    type Err = crate::models::ParseEnumError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(RiskTolerance::Low),
            "medium" => Ok(RiskTolerance::Medium),
            "high" => Ok(RiskTolerance::High),
            other => Err(crate::models::ParseEnumError {
                kind: "risk tolerance",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsSuggestionInput {
    pub current_savings: Decimal,
    pub monthly_contribution: Decimal,
    pub interest_rate: Decimal,
    pub financial_goal: Decimal,
    pub timeframe_years: u32,
    pub risk_tolerance: RiskTolerance,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsSuggestionOutput {
    pub suggested_contribution_increase: Decimal,
    pub revised_timeframe_months: Decimal,
    pub alternative_investment_suggestion: String,
    pub considerations: String,
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-endpoint", sub)) => {
            let url = sub.get_one::<String>("url").unwrap().trim();
            set_advisor_url(conn, url)?;
            println!("Advisor endpoint set to {}", url);
            Ok(())
        }
        Some(("ask", sub)) => ask(conn, sub),
        _ => Ok(()),
    }
}

fn ask(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let url = get_advisor_url(conn)?
        .ok_or_else(|| anyhow!("No advisor endpoint configured; run 'suggest set-endpoint'"))?;

    // The advisor sees a snapshot of totals, never the ledger itself.
    let mut current_savings = Decimal::ZERO;
    for account in load_accounts(conn)? {
        current_savings += balance(&account_transactions(conn, &account.id)?);
    }

    let input = SavingsSuggestionInput {
        current_savings,
        monthly_contribution: parse_decimal(sub.get_one::<String>("contribution").unwrap().trim())?,
        interest_rate: parse_decimal(sub.get_one::<String>("rate").unwrap().trim())?,
        financial_goal: parse_decimal(sub.get_one::<String>("goal").unwrap().trim())?,
        timeframe_years: *sub.get_one::<u32>("years").unwrap(),
        risk_tolerance: sub.get_one::<String>("risk").unwrap().trim().parse()?,
    };

    let client = http_client()?;
    let resp = client.post(&url).json(&input).send()?.error_for_status()?;
    let suggestion: SavingsSuggestionOutput = resp.json()?;

    if maybe_print_json(json_flag, jsonl_flag, &suggestion)? {
        return Ok(());
    }
    println!(
        "{}",
        pretty_table(
            &["Field", "Suggestion"],
            vec![
                vec![
                    "Contribution increase".into(),
                    format!("${}", suggestion.suggested_contribution_increase.round_dp(2)),
                ],
                vec![
                    "Revised timeframe (months)".into(),
                    suggestion.revised_timeframe_months.round_dp(0).to_string(),
                ],
                vec![
                    "Alternative investments".into(),
                    suggestion.alternative_investment_suggestion.clone(),
                ],
                vec!["Considerations".into(), suggestion.considerations.clone()],
            ],
        )
    );
    Ok(())
}
