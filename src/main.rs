//! Banksampah main entry point

use anyhow::{bail, Context};
use banksampah_config::{Config, TimeRange};
use banksampah_core::{
    aggregate_by_type, assemble_backup_snapshot, build_income_report, controller_overview,
    daily_profit_series, item_lookup, profit_totals, sorted_by_value, with_fallback, CoreError,
    CoreResult, DateRange, DefaultErrorLogger, ErrorContext, ErrorLogger, LedgerQuery,
    TransactionKind, TypeSummary,
};
use banksampah_ledger::{JsonLedgerSource, LedgerSnapshot, LedgerSource};
use banksampah_utils::{format_decimal, format_rupiah};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use tokio::runtime::Runtime;

const DEFAULT_CONFIG_FILE: &str = "config.yaml";

#[derive(Parser, Debug)]
#[command(name = "banksampah")]
#[command(version = "0.1.0")]
#[command(about = "Financial reports for waste-bank ledgers", long_about = None)]
struct Args {
    /// Configuration file path (defaults to config.yaml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Text,
}

#[derive(clap::Args, Debug, Clone)]
struct RangeArgs {
    /// Preset window: today, last7, last14, last30, all
    #[arg(long, conflicts_with_all = ["from", "to"])]
    range: Option<TimeRange>,

    /// First day of a custom range (YYYY-MM-DD)
    #[arg(long, requires = "to")]
    from: Option<NaiveDate>,

    /// Last day of a custom range (YYYY-MM-DD)
    #[arg(long, requires = "from")]
    to: Option<NaiveDate>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the default configuration
    InitConfig,
    #[command(flatten)]
    Report(ReportCommand),
}

/// Subcommands that read the ledger
#[derive(Subcommand, Debug)]
enum ReportCommand {
    /// Consolidated backup snapshot of one waste bank
    Backup {
        #[arg(long)]
        org: Option<String>,
    },
    /// Daily profit series
    Profit {
        #[arg(long)]
        org: Option<String>,
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Per waste-type summary of one transaction kind
    Types {
        #[arg(long)]
        org: Option<String>,
        /// purchase, sale, withdrawal, income or expense
        #[arg(long)]
        kind: TransactionKind,
        /// Rank rows by value instead of first appearance
        #[arg(long)]
        sort: bool,
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Income report (laporan) of one waste bank
    Laporan {
        #[arg(long)]
        org: Option<String>,
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Overview of every waste bank in the ledger
    Controller {
        #[command(flatten)]
        range: RangeArgs,
    },
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None if PathBuf::from(DEFAULT_CONFIG_FILE).exists() => {
            Config::load(DEFAULT_CONFIG_FILE).context("Failed to load config.yaml")
        }
        None => Ok(Config::default()),
    }
}

/// Log a core error with its context and convert it for the caller
///
/// The returned error carries the code and suggestions; `main` prints it once.
fn reported<T>(result: CoreResult<T>, context: ErrorContext) -> anyhow::Result<T> {
    result.map_err(|e: CoreError| {
        DefaultErrorLogger.log_error(&e, &context);
        anyhow::anyhow!("{}", e.to_details())
    })
}

fn resolve_range(args: &RangeArgs, config: &Config) -> CoreResult<DateRange> {
    let custom = match (args.from, args.to) {
        (Some(from), Some(to)) => Some((from, to)),
        (None, None) => None,
        _ => return Err(CoreError::MissingCustomRange),
    };
    let preset = args.range.unwrap_or(config.reports.default_range);
    DateRange::from_time_range(preset, custom, Utc::now())
}

fn resolve_org(org: Option<String>, config: &Config) -> anyhow::Result<String> {
    match org.or_else(|| config.reports.organization_id.clone()) {
        Some(id) => Ok(id),
        None => bail!("No organization given; pass --org or set reports.organization_id"),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

struct Printer<'a> {
    config: &'a Config,
}

impl Printer<'_> {
    fn money(&self, amount: i64) -> String {
        format_rupiah(
            amount,
            &self.config.currency.symbol,
            &self.config.currency.thousands_separator,
        )
    }

    fn type_rows(&self, title: &str, rows: &[TypeSummary]) {
        println!("{}", title);
        if rows.is_empty() {
            println!("  (none)");
        }
        for row in rows {
            println!(
                "  {:<20} {:>10} {:<3} {:>16}  {} tx  avg {}",
                row.waste_type_name,
                format_decimal(row.total_quantity, 2),
                row.unit.to_string(),
                self.money(row.total_value),
                row.transaction_count,
                format_decimal(row.average_unit_price, 2),
            );
        }
    }
}

async fn run(command: ReportCommand, format: Format, config: Config) -> anyhow::Result<()> {
    let source = JsonLedgerSource::new(config.ledger_path());
    let snapshot: LedgerSnapshot = source
        .load()
        .await
        .with_context(|| format!("Failed to read ledger {}", source.path().display()))?;
    let printer = Printer { config: &config };
    let json = format == Format::Json;

    match command {
        ReportCommand::Backup { org } => {
            let org = resolve_org(org, &config)?;
            let inputs = snapshot.backup_inputs(&org, config.reports.recent_transactions_limit)?;
            let backup = assemble_backup_snapshot(inputs);
            if json {
                return print_json(&backup);
            }
            let s = &backup.summary;
            println!("{} (generated {})", backup.organization.name, backup.generated_at.to_rfc3339());
            println!("Customers:        {}", s.total_customers);
            println!("Customer balance: {}", printer.money(s.total_balance));
            println!("Stock:            {}", format_decimal(s.total_stock, 2));
            println!("Inventory value:  {}", printer.money(s.total_inventory_value));
            println!("Purchases:        {}", printer.money(s.total_purchases));
            println!("Sales:            {}", printer.money(s.total_sales));
            println!("Withdrawals:      {}", printer.money(s.total_withdrawals));
            println!("Profit:           {}", printer.money(s.profit));
            printer.type_rows("Purchases by type", &backup.purchase_summary);
            printer.type_rows("Sales by type", &backup.sales_summary);
        }
        ReportCommand::Profit { org, range } => {
            let org = resolve_org(org, &config)?;
            let range = reported(
                resolve_range(&range, &config),
                ErrorContext::new("profit").with_organization(org.as_str()),
            )?;
            let txns = snapshot.transactions_of(&org);
            let series = daily_profit_series(&txns, &range);
            if json {
                return print_json(&series);
            }
            for point in &series {
                println!("{}  {:>16}", point.date, printer.money(point.profit));
            }
            let totals = profit_totals(&txns, &range);
            println!("Total {}  {:>16}", range.description(), printer.money(totals.profit));
        }
        ReportCommand::Types { org, kind, sort, range } => {
            let org = resolve_org(org, &config)?;
            let range = reported(
                resolve_range(&range, &config),
                ErrorContext::new("types").with_organization(org.as_str()),
            )?;
            let lookup = item_lookup(&snapshot.inventory_of(&org));
            let query = LedgerQuery::of_kind(kind).for_organization(org.as_str()).within(range);
            let rows = with_fallback(
                aggregate_by_type(query.detail_lines(&snapshot.transactions), &lookup),
                query.header_totals(&snapshot.transactions),
            );
            let rows = if sort { sorted_by_value(&rows) } else { rows };
            if json {
                return print_json(&rows);
            }
            printer.type_rows(&format!("{} by type, {}", kind, range.description()), &rows);
        }
        ReportCommand::Laporan { org, range } => {
            let org = resolve_org(org, &config)?;
            snapshot.organization(&org)?;
            let range = reported(
                resolve_range(&range, &config),
                ErrorContext::new("laporan").with_organization(org.as_str()),
            )?;
            let lookup = item_lookup(&snapshot.inventory_of(&org));
            let report = build_income_report(&snapshot.transactions, &org, &range, &lookup);
            if json {
                return print_json(&report);
            }
            println!("Laporan {} ({})", org, range.description());
            println!("Purchases:      {} ({} tx)", printer.money(report.purchases.total_value), report.purchases.count);
            println!("Sales:          {} ({} tx)", printer.money(report.sales.total_value), report.sales.count);
            println!("Withdrawals:    {} ({} tx)", printer.money(report.withdrawals.total_value), report.withdrawals.count);
            println!("Other income:   {}", printer.money(report.general_income.total_value));
            println!("Other expense:  {}", printer.money(report.general_expense.total_value));
            println!("Profit:         {}", printer.money(report.profit));
            println!("Net cash flow:  {}", printer.money(report.net_cash_flow));
            printer.type_rows("Purchases by type", &report.purchase_summary);
            printer.type_rows("Sales by type", &report.sales_summary);
        }
        ReportCommand::Controller { range } => {
            let range = reported(resolve_range(&range, &config), ErrorContext::new("controller"))?;
            let overview = controller_overview(
                &snapshot.organizations,
                &snapshot.customer_counts(),
                &snapshot.transactions,
                &range,
            );
            if json {
                return print_json(&overview);
            }
            println!("Controller overview ({})", range.description());
            for row in overview.organizations.iter().chain(std::iter::once(&overview.totals)) {
                println!(
                    "  {:<28} {:>5} cust  sales {:>16}  purchases {:>16}  profit {:>16}",
                    row.organization_name,
                    row.customer_count,
                    printer.money(row.total_sales),
                    printer.money(row.total_purchases),
                    printer.money(row.profit),
                );
            }
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let command = match args.command {
        Command::InitConfig => {
            print!("{}", Config::generate_default());
            return Ok(());
        }
        Command::Report(command) => command,
    };

    let config = load_config(args.config.as_ref())?;
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();
    log::info!(
        "Config loaded: data path={}, ledger_file={}",
        config.data.path.display(),
        config.data.ledger_file
    );

    let rt = Runtime::new()?;
    rt.block_on(run(command, args.format, config))
}
