//! TubeTrend command-line shell.

mod render;

use anyhow::{bail, Context};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tubetrend_client::TubularClient;
use tubetrend_models::{
    CategorySelection, DateRange, DateRangePreset, Granularity, Metric, VideoCategory,
};
use tubetrend_pipeline::{
    compare, probe_availability, DashboardState, PipelineConfig, TrendPipeline, ViewOptions,
};

#[derive(Debug, Parser)]
#[command(name = "tubetrend", version, about = "Compare YouTube view trends by video type")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search trends and print the aggregated comparison
    Search(SearchArgs),
    /// Check whether the analytics API has capacity
    Status,
}

#[derive(Debug, Args)]
struct SearchArgs {
    /// Search term; repeat to OR several terms together
    #[arg(short, long = "term", required = true)]
    terms: Vec<String>,

    /// Date range preset: last7, last14, last-month, ytd
    #[arg(long, default_value = "last7")]
    preset: DateRangePreset,

    /// Custom range start (YYYY-MM-DD); overrides the preset
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Custom range end (YYYY-MM-DD), defaults to today
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Category to include (short, video, directo); repeatable, default all
    #[arg(short, long = "category", value_parser = parse_category)]
    categories: Vec<VideoCategory>,

    /// Bucket size: day, week, month, year
    #[arg(short, long, default_value = "day")]
    granularity: Granularity,

    /// Metric to sum: views, views-gain
    #[arg(short, long, default_value = "views")]
    metric: Metric,

    /// Print the full comparison as JSON
    #[arg(long)]
    json: bool,

    /// Print the combined trend table instead of the comparison
    #[arg(long)]
    raw: bool,
}

/// Only the dashboard's checkbox categories can be picked.
fn parse_category(raw: &str) -> Result<VideoCategory, String> {
    let category: VideoCategory = raw.parse()?;
    if VideoCategory::SELECTABLE.contains(&category) {
        Ok(category)
    } else {
        Err(format!("'{}' cannot be selected; use short, video or directo", raw))
    }
}

impl SearchArgs {
    fn date_range(&self, today: NaiveDate) -> anyhow::Result<DateRange> {
        if self.from.is_some() || self.preset == DateRangePreset::Custom {
            let Some(from) = self.from else {
                bail!("--from is required for a custom date range");
            };
            return Ok(DateRange::new(from, self.to.unwrap_or(today))?);
        }

        self.preset
            .resolve(today)
            .context("date range preset could not be resolved")
    }

    fn view_options(&self) -> ViewOptions {
        let selection = if self.categories.is_empty() {
            CategorySelection::all()
        } else {
            CategorySelection::from_categories(&self.categories)
        };

        ViewOptions {
            categories: selection.allowed(),
            granularity: self.granularity,
            metric: self.metric,
        }
    }
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Install rustls crypto provider (required for rustls 0.23+)
    let _ = rustls::crypto::ring::default_provider().install_default();

    init_tracing();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

/// Colored output for dev, JSON when `LOG_FORMAT=json`. Logs go to stderr.
fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env().add_directive(
        "tubetrend=info"
            .parse()
            .unwrap_or_else(|_| LevelFilter::INFO.into()),
    );

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = PipelineConfig::from_env();
    let client = TubularClient::from_env().context("failed to configure analytics client")?;
    info!(base_url = %client.config().base_url, "Analytics client ready");

    match cli.command {
        Command::Search(args) => search(TrendPipeline::new(client, config), args).await,
        Command::Status => {
            let available = probe_availability(&client, config.probe_interval)
                .await
                .context("availability probe failed")?;
            println!("{}", if available { "available" } else { "unavailable" });
            Ok(())
        }
    }
}

async fn search(pipeline: TrendPipeline, args: SearchArgs) -> anyhow::Result<()> {
    let today = Local::now().date_naive();
    let range = args.date_range(today)?;

    let state = args
        .terms
        .iter()
        .fold(DashboardState::new(), |state, term| state.add_term(term));
    if state.terms.is_empty() {
        bail!("at least one non-blank --term is required");
    }

    let query = state.query(range);
    let result = match pipeline.search(&query).await {
        Ok(result) => result,
        Err(e) if e.is_empty_result() => {
            println!("No data: {}", e);
            return Ok(());
        }
        Err(e) => return Err(e).context("search failed"),
    };
    let state = state.with_result(result);

    let Some(result) = state.last_result.as_ref() else {
        return Ok(());
    };

    if args.raw {
        if args.json {
            println!("{}", serde_json::to_string_pretty(&result.combined)?);
        } else {
            print!("{}", render::combined_table(&result.combined));
        }
        return Ok(());
    }

    let comparison = compare(result, &args.view_options());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
        return Ok(());
    }

    println!("Search: {}  ({})", state.terms.combined_query(), range);
    println!();
    print!("{}", render::series_table(&comparison.series));
    println!();
    print!("{}", render::video_list(&comparison.videos));
    if !result.skipped.is_empty() {
        println!();
        println!("{} video(s) skipped after failed detail lookups", result.skipped.len());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> SearchArgs {
        let mut argv = vec!["tubetrend", "search"];
        argv.extend_from_slice(args);
        match Cli::parse_from(argv).command {
            Command::Search(args) => args,
            Command::Status => panic!("expected search"),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["--term", "rust"]);
        assert_eq!(args.granularity, Granularity::Day);
        assert_eq!(args.metric, Metric::Views);
        assert!(args.view_options().categories.is_empty());

        let range = args.date_range(date(2024, 3, 15)).unwrap();
        assert_eq!(range.min, date(2024, 3, 8));
    }

    #[test]
    fn test_custom_range_and_categories() {
        let args = parse(&[
            "-t", "a", "-t", "b", "--from", "2024-01-01", "--to", "2024-02-01", "-c", "short",
            "-g", "week", "-m", "views-gain",
        ]);

        let range = args.date_range(date(2024, 3, 15)).unwrap();
        assert_eq!(range, DateRange::new(date(2024, 1, 1), date(2024, 2, 1)).unwrap());

        let options = args.view_options();
        assert_eq!(options.categories.len(), 1);
        assert!(options.categories.contains(&VideoCategory::Short));
        assert_eq!(options.metric, Metric::ViewsGain);
    }

    #[test]
    fn test_three_categories_exclude_unknown() {
        let args = parse(&["-t", "a", "-c", "short", "-c", "video", "-c", "directo"]);
        let categories = args.view_options().categories;
        assert_eq!(categories.len(), 3);
        assert!(!categories.contains(&VideoCategory::Unknown));
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let argv = ["tubetrend", "search", "-t", "a", "-c", "unknown"];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_raw_flag() {
        assert!(parse(&["-t", "a", "--raw"]).raw);
        assert!(!parse(&["-t", "a"]).raw);
    }

    #[test]
    fn test_custom_preset_requires_from() {
        let args = parse(&["-t", "a", "--preset", "custom"]);
        assert!(args.date_range(date(2024, 3, 15)).is_err());
    }
}
