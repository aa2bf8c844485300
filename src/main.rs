//! CLI entry point for the sales dashboard.
//!
//! Loads the order dataset, applies an optional purchase-date window and
//! reports or exports the review, category and customer RFM tables.

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use sales_dashboard::analyzers::analyzer::filter_and_aggregate;
use sales_dashboard::analyzers::filter::DateRange;
use sales_dashboard::analyzers::types::OrderRecord;
use sales_dashboard::config::DashboardConfig;
use sales_dashboard::output::{print_json, print_pretty, write_json, write_tables};
use sales_dashboard::parser::load_dataset;
use sales_dashboard::stats::{DashboardSummary, format_brl};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "sales_dashboard")]
#[command(
    about = "Review, category and RFM metrics for an e-commerce order dataset",
    long_about = None
)]
struct Cli {
    /// JSON config file with dataset path and chart sizes
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Dataset and purchase-date window shared by every subcommand.
#[derive(clap::Args)]
struct Selection {
    /// Dataset CSV (defaults to the configured data path)
    #[arg(short, long, value_name = "CSV")]
    data: Option<PathBuf>,

    /// First purchase date to include (YYYY-MM-DD, from midnight)
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Last purchase date to include (YYYY-MM-DD, up to midnight)
    #[arg(long)]
    end: Option<NaiveDate>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Log the dashboard metrics for the selected window
    Summary {
        #[command(flatten)]
        selection: Selection,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Write the four tables as CSV plus a JSON summary
    Export {
        #[command(flatten)]
        selection: Selection,

        /// Directory to write tables to
        #[arg(short, long, default_value = "dashboard")]
        output_dir: PathBuf,
    },
    /// Show the purchase-date window covered by the dataset
    Range {
        /// Dataset CSV (defaults to the configured data path)
        #[arg(short, long, value_name = "CSV")]
        data: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/sales_dashboard.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("sales_dashboard.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let config = DashboardConfig::resolve(cli.config.as_deref())?;

    match cli.command {
        Commands::Summary { selection, format } => {
            let (orders, range) = select(&config, &selection)?;
            let tables = filter_and_aggregate(&orders, range.as_ref());
            let summary =
                DashboardSummary::build(&tables, config.top_categories, config.top_customers);

            match format {
                Format::Json => print_json(&summary)?,
                Format::Text => {
                    print_pretty(&tables);
                    log_summary(&summary);
                }
            }
        }
        Commands::Export {
            selection,
            output_dir,
        } => {
            let (orders, range) = select(&config, &selection)?;
            let tables = filter_and_aggregate(&orders, range.as_ref());
            let summary =
                DashboardSummary::build(&tables, config.top_categories, config.top_customers);

            let written = write_tables(&output_dir, &tables)?;
            write_json(output_dir.join("summary.json"), &summary)?;

            info!(
                files = written.len() + 1,
                output_dir = %output_dir.display(),
                "Export complete"
            );
        }
        Commands::Range { data } => {
            let path = config.dataset_path(data.as_deref());
            let orders = load_dataset(path)?;

            match DateRange::spanning(&orders) {
                Some(range) => info!(start = %range.start, end = %range.end, "Dataset window"),
                None => warn!(path = %path.display(), "Dataset has no orders"),
            }
        }
    }

    Ok(())
}

/// Loads the dataset and resolves the requested purchase-date window.
fn select(
    config: &DashboardConfig,
    selection: &Selection,
) -> Result<(Vec<OrderRecord>, Option<DateRange>)> {
    let path = config.dataset_path(selection.data.as_deref());
    let orders = load_dataset(path)?;
    let range = DateRange::resolve(&orders, selection.start, selection.end);

    match &range {
        Some(range) if range.is_inverted() => {
            warn!(
                start = %range.start,
                end = %range.end,
                "Start is after end, nothing will match"
            )
        }
        Some(range) => {
            info!(start = %range.start, end = %range.end, "Filtering by purchase date")
        }
        None => info!("No date filter, using the full dataset"),
    }

    Ok((orders, range))
}

fn log_summary(summary: &DashboardSummary) {
    for share in &summary.review_shares {
        info!(
            review_score = share.review_score,
            reviews = share.number_of_reviews,
            percent = %format!("{:.1}%", share.percent),
            "Review score"
        );
    }

    for row in &summary.most_ordered_categories {
        info!(category = %row.product_category, orders = row.number_of_orders, "Most ordered");
    }
    for row in &summary.least_ordered_categories {
        info!(category = %row.product_category, orders = row.number_of_orders, "Least ordered");
    }

    for row in &summary.highest_revenue_categories {
        info!(
            category = %row.product_category,
            revenue = %format_brl(row.total_revenue),
            "Highest revenue"
        );
    }
    for row in &summary.lowest_revenue_categories {
        info!(
            category = %row.product_category,
            revenue = %format_brl(row.total_revenue),
            "Lowest revenue"
        );
    }

    info!(
        avg_recency_days = summary.rfm.avg_recency,
        avg_frequency = summary.rfm.avg_frequency,
        avg_monetary = %format_brl(summary.rfm.avg_monetary),
        "RFM averages"
    );

    for row in &summary.best_by_recency {
        info!(customer_id = %row.customer_id, recency = row.recency, "Best by recency");
    }
    for row in &summary.best_by_frequency {
        info!(customer_id = %row.customer_id, frequency = row.frequency, "Best by frequency");
    }
    for row in &summary.best_by_monetary {
        info!(
            customer_id = %row.customer_id,
            monetary = %format_brl(row.monetary),
            "Best by monetary"
        );
    }
}
