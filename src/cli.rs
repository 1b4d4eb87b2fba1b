// Copyright (c) 2025 Nestegg Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .help("Print output as pretty JSON")
            .action(ArgAction::SetTrue),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .help("Print output as JSON lines")
            .action(ArgAction::SetTrue),
    )
}

fn opt(name: &'static str) -> Arg {
    Arg::new(name).long(name)
}

fn req(name: &'static str) -> Arg {
    opt(name).required(true)
}

pub fn build_cli() -> Command {
    Command::new("nestegg")
        .about("Savings and investment tracking with growth, projection, and asset analytics")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(false)
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("account")
                .about("Manage accounts")
                .subcommand(
                    Command::new("add")
                        .about("Add an account")
                        .arg(req("name"))
                        .arg(req("bank"))
                        .arg(req("type").help("savings | investment"))
                        .arg(opt("rate").help("Annual interest rate in percent (savings only)"))
                        .arg(opt("subtype").help("managed | self-directed (investment only)")),
                )
                .subcommand(json_flags(
                    Command::new("list").about("List accounts with balances"),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Remove an account and all of its transactions")
                        .arg(req("id")),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and list transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(req("account").help("Account id, e.g. acc_01"))
                        .arg(req("date").help("YYYY-MM-DD"))
                        .arg(req("type").help(
                            "contribution | withdrawal | interest | buy | sell | dividend | stock-lending | distribution",
                        ))
                        .arg(req("amount").allow_negative_numbers(true))
                        .arg(opt("asset-name").help("Asset display name (asset-linked types)"))
                        .arg(opt("asset-code").help("Ticker/symbol (asset-linked types)"))
                        .arg(opt("shares").help("Share count (buy/sell only)")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions")
                        .arg(opt("account"))
                        .arg(opt("month").help("YYYY-MM"))
                        .arg(opt("limit").value_parser(value_parser!(usize))),
                )),
        )
        .subcommand(
            Command::new("report")
                .about("Computed views over the ledger")
                .subcommand(json_flags(
                    Command::new("balances").about("Net balance per account"),
                ))
                .subcommand(json_flags(
                    Command::new("summary")
                        .about("Month / year / all-time contribution, gain, withdrawal totals")
                        .arg(opt("account"))
                        .arg(opt("as-of").help("Reference date, defaults to today")),
                ))
                .subcommand(json_flags(
                    Command::new("growth")
                        .about("Monthly cumulative balance series")
                        .arg(opt("account"))
                        .arg(opt("as-of")),
                ))
                .subcommand(json_flags(
                    Command::new("performance")
                        .about("Per-asset cumulative investment, dividends, and shares")
                        .arg(opt("account"))
                        .arg(opt("as-of"))
                        .arg(
                            Arg::new("history")
                                .long("history")
                                .help("Show the full monthly series instead of the latest snapshot")
                                .action(ArgAction::SetTrue),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("allocation")
                        .about("Investment and gains per asset category")
                        .arg(opt("account")),
                )),
        )
        .subcommand(json_flags(
            Command::new("project")
                .about("Forward compound-growth projection")
                .arg(req("contribution").help("Monthly contribution"))
                .arg(req("rate").help("Annual rate in percent"))
                .arg(req("years").value_parser(value_parser!(u32)))
                .arg(opt("initial").help("Starting balance; defaults to the sum of all accounts"))
                .arg(opt("as-of").help("First month label, defaults to today")),
        ))
        .subcommand(
            Command::new("import")
                .about("Import an accounts/transactions workbook (JSON file or CSV directory)")
                .arg(req("path")),
        )
        .subcommand(
            Command::new("export")
                .about("Export the four-table workbook")
                .arg(req("out"))
                .arg(
                    opt("format")
                        .help("csv (directory of tables) | json (single file)")
                        .default_value("csv"),
                ),
        )
        .subcommand(
            Command::new("suggest")
                .about("AI savings suggestions via the configured advisor endpoint")
                .subcommand(
                    Command::new("set-endpoint")
                        .about("Store the advisor endpoint URL")
                        .arg(req("url")),
                )
                .subcommand(json_flags(
                    Command::new("ask")
                        .about("Request a savings suggestion")
                        .arg(req("goal").help("Financial goal amount"))
                        .arg(req("contribution").help("Current monthly contribution"))
                        .arg(req("rate").help("Annual interest rate in percent"))
                        .arg(req("years").value_parser(value_parser!(u32)))
                        .arg(req("risk").help("low | medium | high")),
                )),
        )
}
