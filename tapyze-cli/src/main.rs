use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::sync::Arc;
use tapyze_core::time::{parse_zone, today_in};
use tapyze_core::{
    DateRange, RangePreset, StatementFilter, StatementView, Tab, normalize_all,
};
use tapyze_wallet::{
    ClientContext, RecipientType, RefreshOutcome, StatementsModel, TransferRequest, WalletClient,
    export_statement_csv, read_transaction_feed,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod auth;
mod config;
mod output;
mod state;

use config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "tapyze",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("TAPYZE_BUILD_SHA"), ")"),
    about = "TAPYZE wallet statements from the command line"
)]
struct Cli {
    /// Debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Monthly statement with period totals
    Statements {
        /// Read transactions from a saved JSON feed instead of the API
        #[arg(long)]
        feed: Option<PathBuf>,

        /// First day to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last day to include (YYYY-MM-DD, default: today)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// last-30-days, last-3-months or this-year
        #[arg(long, conflicts_with_all = ["from", "to"])]
        preset: Option<RangePreset>,

        /// all, payment, deposit or withdraw
        #[arg(long, default_value = "all")]
        tab: Tab,

        /// IANA zone for transaction dates (default from config)
        #[arg(long)]
        tz: Option<String>,

        /// Show a single page of the statement
        #[arg(long)]
        page: Option<usize>,

        /// Transactions per page (default from config)
        #[arg(long)]
        per_page: Option<usize>,

        /// Also write the statement to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Print the statement as JSON
        #[arg(long)]
        json: bool,
    },

    /// One page of transaction history
    Transactions {
        /// Read a saved JSON feed instead of the API (the whole file is listed)
        #[arg(long, conflicts_with_all = ["page", "limit"])]
        feed: Option<PathBuf>,

        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = tapyze_wallet::DEFAULT_PAGE_LIMIT)]
        limit: u32,

        #[arg(long, default_value = "all")]
        tab: Tab,

        #[arg(long)]
        tz: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Current wallet balance
    Balance,

    /// Add money to the wallet
    TopUp { amount: Decimal },

    /// Send money to a customer or merchant
    Transfer {
        /// Recipient id
        #[arg(long)]
        to: String,

        /// Recipient is a merchant
        #[arg(long)]
        merchant: bool,

        amount: Decimal,

        #[arg(long, default_value = "Transfer")]
        description: String,
    },

    /// Manage the stored bearer token
    Auth {
        #[command(subcommand)]
        command: AuthCommand,
    },

    /// Manage ~/.tapyze/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum AuthCommand {
    /// Paste a bearer token and store it
    PasteToken,
    /// Forget the stored token
    Clear,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Statements {
            feed,
            from,
            to,
            preset,
            tab,
            tz,
            page,
            per_page,
            csv,
            json,
        } => {
            let cfg = config::load_config()?;
            let zone = parse_zone(tz.as_deref().unwrap_or(&cfg.display.timezone))?;

            let mut model = StatementsModel::new(zone);
            match feed {
                Some(path) => {
                    let feed = read_transaction_feed(&path)?;
                    let generation = model.begin_refresh();
                    model.apply(generation, Ok(feed.transactions))?;
                }
                None => {
                    let client = wallet_client(&cfg)?;
                    if let RefreshOutcome::Retained { error } =
                        model.refresh(&client, cfg.api.statement_limit).await?
                    {
                        bail!("could not fetch transactions: {error}");
                    }
                }
            }

            let today = today_in(zone);
            let range = match (preset, from, to) {
                (Some(preset), _, _) => Some(preset.range_ending(today)),
                (None, None, None) => None,
                (None, from, to) => Some(DateRange::new(
                    from.unwrap_or(NaiveDate::MIN),
                    to.unwrap_or(today),
                )?),
            };
            let mut filter = StatementFilter::all().with_tab(tab);
            if let Some(range) = range {
                filter = filter.with_range(range);
            }
            debug!(?filter, "building statement");

            let view = model.view(&filter)?;

            if let Some(csv_path) = csv {
                let rows = export_statement_csv(&view, &csv_path)?;
                info!(rows, path = %csv_path.display(), "statement exported");
                eprintln!("Wrote {} rows to {}", rows, csv_path.display());
            }

            print_statement(&view, &cfg, page, per_page, json)?;
        }

        Command::Transactions {
            feed,
            page,
            limit,
            tab,
            tz,
            json,
        } => {
            let cfg = config::load_config()?;
            let zone = parse_zone(tz.as_deref().unwrap_or(&cfg.display.timezone))?;

            let from_api = feed.is_none();
            let history = match feed {
                Some(path) => read_transaction_feed(&path)?,
                None => wallet_client(&cfg)?.transactions(page, limit).await?,
            };
            let items = normalize_all(&history.transactions, zone)?;
            let filter = StatementFilter::all().with_tab(tab);
            let selected: Vec<_> = filter.apply(&items).collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&selected)?);
            } else {
                for txn in &selected {
                    println!("{}", output::render_transaction(txn, &cfg.display.currency_symbol));
                }
                if selected.is_empty() {
                    println!("No transactions.");
                }
                if from_api && history.has_more() {
                    println!("\nMore available: --page {}", page + 1);
                }
            }
        }

        Command::Balance => {
            let cfg = config::load_config()?;
            let balance = wallet_client(&cfg)?.balance().await?;
            println!(
                "{} {}",
                output::format_money(balance.balance, &cfg.display.currency_symbol),
                balance.currency
            );
        }

        Command::TopUp { amount } => {
            let cfg = config::load_config()?;
            let receipt = wallet_client(&cfg)?.top_up(amount).await?;
            println!(
                "Top-up complete. New balance: {}",
                output::format_money(receipt.balance, &cfg.display.currency_symbol)
            );
        }

        Command::Transfer {
            to,
            merchant,
            amount,
            description,
        } => {
            let cfg = config::load_config()?;
            let request = TransferRequest {
                recipient_id: to,
                recipient_type: if merchant {
                    RecipientType::Business
                } else {
                    RecipientType::User
                },
                amount,
                description,
            };
            let receipt = wallet_client(&cfg)?.transfer(&request).await?;
            println!(
                "Transfer complete. New balance: {}",
                output::format_money(receipt.sender_balance, &cfg.display.currency_symbol)
            );
        }

        Command::Auth { command } => match command {
            AuthCommand::PasteToken => auth::paste_token()?,
            AuthCommand::Clear => auth::clear_token()?,
        },

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn wallet_client(cfg: &Config) -> Result<WalletClient> {
    let ctx = ClientContext::new(
        cfg.api.base_url.clone(),
        Arc::new(auth::StoredToken::new()?),
    )
    .with_timeout(cfg.api.timeout());
    WalletClient::new(ctx).context("build wallet client")
}

fn print_statement(
    view: &StatementView,
    cfg: &Config,
    page: Option<usize>,
    per_page: Option<usize>,
    json: bool,
) -> Result<()> {
    let symbol = &cfg.display.currency_symbol;

    let Some(page) = page else {
        if json {
            println!("{}", serde_json::to_string_pretty(view)?);
        } else {
            print!(
                "{}",
                output::render_statement(&view.filter, &view.groups, &view.totals, symbol)
            );
        }
        return Ok(());
    };

    let per_page = per_page.unwrap_or(cfg.display.per_page);
    let groups = view.page(page, per_page)?;
    let pages = view.total_pages(per_page)?;

    if json {
        let body = serde_json::json!({
            "filter": view.filter,
            "totals": view.totals,
            "page": page,
            "totalPages": pages,
            "groups": groups,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        print!(
            "{}",
            output::render_statement(&view.filter, &groups, &view.totals, symbol)
        );
        println!("\nPage {} of {}", page, pages.max(1));
    }
    Ok(())
}
