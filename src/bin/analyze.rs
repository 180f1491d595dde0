use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tabled::{Table, Tabled, settings::Style};

use vix_lens::analysis::{TrendPoint, align, histogram, summarize, try_fit_line};
use vix_lens::config::ANALYSIS;
use vix_lens::data::{HistoryRequest, provider_for, require_points};
use vix_lens::utils::format_iso_date;
use vix_lens::{BinWidth, Cli, DataSource};

/// Headless VIX analytics: the same numbers the dashboard draws, printed as tables.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[command(flatten)]
    fetch: Cli,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Histogram of VIX closes with upper-tail shares
    Distribution {
        /// Bucket width: 1, 0.5 or 0.1
        #[arg(long, default_value = "1", value_parser = parse_bin_width)]
        bin_width: BinWidth,

        /// Only use the most recent N trading days
        #[arg(long)]
        days: Option<usize>,
    },
    /// VIX level against same-day S&P 500 % change, with a least-squares trend
    Correlation {
        #[arg(long, default_value_t = ANALYSIS.range.trailing_window)]
        days: usize,

        /// Number of most recent aligned rows to print
        #[arg(long, default_value_t = 10)]
        rows: usize,
    },
    /// Spot and front contracts of the VIX futures curve
    Futures,
}

fn parse_bin_width(text: &str) -> Result<BinWidth, String> {
    match text.trim() {
        "1" | "1.0" => Ok(BinWidth::One),
        "0.5" | ".5" => Ok(BinWidth::Half),
        "0.1" | ".1" => Ok(BinWidth::Tenth),
        other => Err(format!("unsupported bin width '{}' (expected 1, 0.5 or 0.1)", other)),
    }
}

fn trailing<T>(items: &[T], days: Option<usize>) -> &[T] {
    match days {
        Some(n) if n < items.len() => &items[items.len() - n..],
        _ => items,
    }
}

#[derive(Tabled)]
struct BucketRow {
    #[tabled(rename = "VIX")]
    label: String,
    #[tabled(rename = "Days")]
    count: usize,
    #[tabled(rename = "Top %")]
    top: String,
}

#[derive(Tabled)]
struct AlignedRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "VIX")]
    vix: String,
    #[tabled(rename = "S&P 500")]
    spx: String,
    #[tabled(rename = "Change %")]
    change: String,
}

#[derive(Tabled)]
struct ContractRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Price")]
    price: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let config = args.fetch.data_source_config(DataSource::default());
    let request = HistoryRequest::from_config(&config);
    let provider = provider_for(&config).context("Failed to build the data provider")?;

    log::info!(
        "Source: {} | {} .. {}",
        provider.source(),
        format_iso_date(request.start),
        format_iso_date(request.end)
    );

    match args.command {
        Command::Distribution { bin_width, days } => {
            let history = provider
                .vix_history(request)
                .await
                .and_then(|p| require_points(p, "VIX history"))
                .context("Failed to load VIX history")?;
            let window = trailing(&history, days);
            let hist = histogram(window, bin_width);

            let rows: Vec<BucketRow> = hist
                .buckets
                .iter()
                .map(|b| BucketRow {
                    label: b.label.clone(),
                    count: b.count,
                    top: b.tail.to_string(),
                })
                .collect();

            println!("{}", Table::new(rows).with(Style::rounded()));
            println!(
                "{} days | mean {:.2} | median {:.2} | ticks {}",
                hist.total,
                hist.mean,
                hist.median,
                hist.tick_labels().collect::<Vec<_>>().join(" ")
            );
        }
        Command::Correlation { days, rows } => {
            let (vix, spx) = futures::future::try_join(
                provider.vix_history(request),
                provider.spx_history(request),
            )
            .await
            .context("Failed to load VIX / S&P 500 history")?;

            let aligned = require_points(align(&vix, &spx), "VIX/S&P 500 overlap")?;
            let window = trailing(&aligned, Some(days));

            let points: Vec<TrendPoint> = window
                .iter()
                .map(|p| TrendPoint::new(p.vix_close, p.spx_change_pct))
                .collect();

            let table: Vec<AlignedRow> = trailing(window, Some(rows))
                .iter()
                .map(|p| AlignedRow {
                    date: format_iso_date(p.date),
                    vix: format!("{:.2}", p.vix_close),
                    spx: format!("{:.2}", p.spx_close),
                    change: format!("{:+.2}", p.spx_change_pct),
                })
                .collect();
            println!("{}", Table::new(table).with(Style::rounded()));

            match try_fit_line(&points) {
                Ok(trend) => println!(
                    "{} points | slope {:+.4}% per VIX point | intercept {:+.4}%",
                    points.len(),
                    trend.slope,
                    trend.intercept
                ),
                Err(e) => println!("{} points | no trend: {}", points.len(), e),
            }
        }
        Command::Futures => {
            let curve = provider
                .futures_curve()
                .await
                .and_then(|p| require_points(p, "VIX futures"))
                .context("Failed to load the VIX futures curve")?;
            if curve.len() < 2 {
                bail!("Futures curve has only {} point(s)", curve.len());
            }

            let rows: Vec<ContractRow> = curve
                .iter()
                .map(|p| ContractRow {
                    month: p.month.clone(),
                    price: format!("{:.2}", p.price),
                })
                .collect();
            println!("{}", Table::new(rows).with(Style::rounded()));

            let summary = summarize(&curve);
            println!(
                "M1 {:.2} | M2 {:.2} | spread {:+.2} | {}",
                summary.m1, summary.m2, summary.spread, summary.shape
            );
        }
    }

    Ok(())
}
