//! querylens CLI
//!
//! Terminal frontend for the analytics dashboard:
//! - List tenants
//! - Show a tenant's dashboard (KPI cards, confidence split, trend, user table)
//! - Fetch a user's drilldown
//! - Generate a config file

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use querylens::config::{generate_default_config, Config};
use querylens::detail::UserDetail;
use querylens::interaction::{breakdown_line, segment_drilldown};
use querylens::metrics::{user_rows, ConfidenceLevel};
use querylens::model::{parse_date, DatePreset, DateWindow, UserSelection};
use querylens::query::DrilldownQuery;
use querylens::table::{SortDirection, SortKey, TableState};
use querylens::view_model::ViewModel;
use querylens::{AnalyticsApi, DemoApi, Driver, Event, HttpClient, Notice, ViewState};

#[derive(Parser)]
#[command(name = "querylens")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Query analytics dashboard in the terminal")]
#[command(long_about = "querylens shows tenant query volume, confidence distribution, query trends\nand per-user statistics from the analytics REST API.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Analytics API base URL (overrides config and QUERYLENS_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: standard locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    /// Serve built-in demo data instead of calling the API
    #[arg(long, global = true)]
    pub demo: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

/// Date window selection; explicit dates win over `--last`
#[derive(Args, Debug, Clone)]
pub struct WindowArgs {
    /// First day, YYYY-MM-DD (inclusive)
    #[arg(long)]
    pub start: Option<String>,
    /// Last day, YYYY-MM-DD (inclusive, default: today)
    #[arg(long)]
    pub end: Option<String>,
    /// Preset range ending on --end: 7d, 30d or 90d
    #[arg(long)]
    pub last: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tenants by query volume
    Tenants {
        #[command(flatten)]
        window: WindowArgs,
    },

    /// Show a tenant's dashboard
    Dashboard {
        /// Tenant id (default: first tenant listed)
        #[arg(short, long)]
        tenant: Option<String>,
        #[command(flatten)]
        window: WindowArgs,
        /// Restrict the table to one user
        #[arg(short, long)]
        user: Option<String>,
        /// Sort column (user_id, user, total, failed, success, high, medium, low)
        #[arg(long, default_value = "total")]
        sort: String,
        /// Sort ascending instead of descending
        #[arg(long)]
        asc: bool,
        /// Table page (1-based)
        #[arg(long, default_value = "1")]
        page: usize,
        /// Rows per page: 5, 10, 20 or 50 (default: config)
        #[arg(long)]
        page_size: Option<usize>,
        /// Confidence segment to drill into for --user (high, medium, low)
        #[arg(long)]
        segment: Option<String>,
        /// Show the confidence breakdown of one user
        #[arg(long)]
        detail: Option<String>,
    },

    /// Fetch one user's drilldown counts
    Drilldown {
        #[arg(short, long)]
        tenant: String,
        #[arg(short, long)]
        user: String,
        #[command(flatten)]
        window: WindowArgs,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    init_logging(&config);

    match cli.command {
        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &content)?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }

        Commands::Tenants { window } => {
            let window = resolve_window(&window, config.dashboard.default_window_days)?;
            let api = build_api(&config, cli.demo, window)?;
            let mut driver = Driver::new(api, ViewState::new(config.view_settings(), window));
            driver.dispatch(Event::Start);
            while driver.view().tenants().is_empty() && driver.step().await {}
            report_notices(driver.take_notices())?;

            let tenants = driver.view().tenants();
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(tenants)?),
                OutputFormat::Csv => {
                    let mut writer = csv::Writer::from_writer(std::io::stdout());
                    for tenant in tenants {
                        writer.serialize(tenant)?;
                    }
                    writer.flush()?;
                }
                OutputFormat::Table => {
                    println!("Tenants ({})", window);
                    println!();
                    println!("{:<16} {:<28} {:>14}", "ID", "Name", "Total Queries");
                    println!("{}", "-".repeat(60));
                    for tenant in tenants {
                        println!(
                            "{:<16} {:<28} {:>14}",
                            tenant.id,
                            tenant.name,
                            querylens::view_model::group_thousands(tenant.total_queries)
                        );
                    }
                }
            }
        }

        Commands::Dashboard {
            tenant,
            window,
            user,
            sort,
            asc,
            page,
            page_size,
            segment,
            detail,
        } => {
            let window = resolve_window(&window, config.dashboard.default_window_days)?;
            let api = build_api(&config, cli.demo, window)?;

            let mut view = ViewState::new(config.view_settings(), window);
            if let Some(tenant) = tenant {
                view = view.with_tenant(tenant);
            }
            let mut driver = Driver::new(api, view);
            driver.dispatch(Event::Start);
            driver.run_until_idle().await;

            if let Some(user) = &user {
                driver.dispatch(Event::UserSelected(UserSelection::from_value(user)));
                driver.run_until_idle().await;
            }
            report_notices(driver.take_notices())?;

            let mut table = TableState::default();
            table.set_page_size(page_size.unwrap_or(config.dashboard.table_page_size))?;
            table.sort_key = sort.parse::<SortKey>()?;
            table.direction = if asc {
                SortDirection::Ascending
            } else {
                SortDirection::Descending
            };
            table.current_page = page.max(1);

            let model = ViewModel::build(driver.view(), &table);
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&model)?),
                OutputFormat::Csv => {
                    let mut writer = csv::Writer::from_writer(std::io::stdout());
                    for row in &model.table.rows {
                        writer.serialize(row)?;
                    }
                    writer.flush()?;
                }
                OutputFormat::Table => print_dashboard(&model),
            }

            if let Some(segment) = segment {
                let level: ConfidenceLevel = segment.parse().map_err(anyhow::Error::msg)?;
                print_notice(&segment_drilldown(driver.view(), level));
            }

            if let Some(user_id) = detail {
                let rows = user_rows(driver.view().dashboard());
                let Some(row) = rows.iter().find(|r| r.user_id == user_id) else {
                    bail!("User {} is not in this dashboard page", user_id);
                };
                print_detail(&UserDetail::from_row(row));
            }
        }

        Commands::Drilldown {
            tenant,
            user,
            window,
        } => {
            let window = resolve_window(&window, config.dashboard.default_window_days)?;
            let api = build_api(&config, cli.demo, window)?;
            let drilldown = api
                .fetch_user_drilldown(&DrilldownQuery::new(tenant, user, window))
                .await
                .context("Failed to load user drilldown")?;

            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&drilldown)?),
                OutputFormat::Csv => {
                    let mut writer = csv::Writer::from_writer(std::io::stdout());
                    for entry in &drilldown.breakdown {
                        writer.serialize(entry)?;
                    }
                    writer.flush()?;
                }
                OutputFormat::Table => {
                    println!("User {} ({})", drilldown.user_id, drilldown.tenant_id);
                    println!("Total queries: {}", drilldown.total_queries);
                    println!("Success rate:  {:.1}%", drilldown.success_rate_pct);
                    println!("Breakdown:     {}", breakdown_line(&drilldown.breakdown));
                }
            }
        }
    }

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("querylens={}", config.logging.level)));

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn build_api(config: &Config, demo: bool, window: DateWindow) -> anyhow::Result<Arc<dyn AnalyticsApi>> {
    if demo {
        tracing::info!("Using demo data");
        return Ok(Arc::new(DemoApi::new().with_default_window(window)));
    }
    tracing::debug!(base_url = %config.api.base_url, "Using analytics API");
    Ok(Arc::new(HttpClient::new(config.client_config())?))
}

fn resolve_window(args: &WindowArgs, default_days: i64) -> anyhow::Result<DateWindow> {
    let end = match &args.end {
        Some(end) => parse_date(end)?,
        None => Utc::now().date_naive(),
    };
    let window = match (&args.start, &args.last) {
        (Some(start), _) => DateWindow::new(parse_date(start)?, end)?,
        (None, Some(last)) => last.parse::<DatePreset>()?.window(end),
        (None, None) => DateWindow::last_days(end, default_days),
    };
    Ok(window)
}

/// Print notices to stderr; a failed dashboard or tenant load ends the command
fn report_notices(notices: Vec<Notice>) -> anyhow::Result<()> {
    let mut fatal = None;
    for notice in notices {
        eprintln!("{}", notice);
        if notice.is_error() && fatal.is_none() {
            fatal = Some(notice.title);
        }
    }
    match fatal {
        Some(title) => bail!(title),
        None => Ok(()),
    }
}

fn print_notice(notice: &Notice) {
    let marker = if notice.is_error() { "!" } else { "i" };
    println!();
    println!("[{}] {}", marker, notice.title);
    if let Some(description) = &notice.description {
        println!("    {}", description);
    }
}

fn print_dashboard(model: &ViewModel) {
    println!("{}", model.header());
    println!();

    for card in &model.cards {
        println!("{:<22} {:>12}   {}", card.title, card.value, card.subtitle);
    }

    println!();
    println!("Confidence Distribution");
    if model.confidence.is_empty() {
        println!("  No data");
    }
    for slice in &model.confidence {
        println!("  {:<18} {:>8}  {:>3}%", slice.name, slice.value, slice.percentage);
    }

    println!();
    println!("Key Insights");
    println!("  {}% High Confidence Queries", model.insights.high_confidence_pct);
    println!("  {} users with 90%+ success rate", model.insights.users_above_90);
    println!("  {} users need attention", model.insights.users_needing_attention);

    println!();
    println!("Query Trend");
    if model.trend.is_empty() {
        println!("  No data for the selected time range");
    }
    for point in &model.trend {
        println!(
            "  {}  total {:>6}  successful {:>6}  failed {:>5}",
            point.date, point.total, point.successful, point.failed
        );
    }

    println!();
    println!("User Query Statistics");
    let arrow = |key: SortKey| {
        if key != model.table.sort_key {
            ""
        } else if model.table.direction == SortDirection::Ascending {
            " ^"
        } else {
            " v"
        }
    };
    let header = format!(
        "{:<10} {:<24} {:>10} {:>8} {:>9} {:>7} {:>7} {:>7}",
        format!("ID{}", arrow(SortKey::UserId)),
        format!("User{}", arrow(SortKey::UserName)),
        format!("Total{}", arrow(SortKey::TotalQueries)),
        format!("Failed{}", arrow(SortKey::FailedQueries)),
        format!("Success{}", arrow(SortKey::SuccessRate)),
        format!("High{}", arrow(SortKey::HighConfidence)),
        format!("Med{}", arrow(SortKey::MediumConfidence)),
        format!("Low{}", arrow(SortKey::LowConfidence)),
    );
    println!("{}", header);
    println!("{}", "-".repeat(header.len()));

    if model.rows.is_empty() {
        println!("No users found");
    }
    for view in &model.rows {
        let row = &view.row;
        let badges: Vec<&str> = view.badges.iter().map(|b| b.label()).collect();
        let name = if badges.is_empty() {
            row.user_name.clone()
        } else {
            format!("{} [{}]", row.user_name, badges.join(","))
        };
        let confidence = |count: u64| {
            if row.confidence_reported {
                count.to_string()
            } else {
                "-".to_string()
            }
        };
        println!(
            "{:<10} {:<24} {:>10} {:>8} {:>8}% {:>7} {:>7} {:>7}",
            row.user_id,
            name,
            row.total_queries,
            row.failed_queries,
            row.success_rate,
            confidence(row.high_confidence),
            confidence(row.medium_confidence),
            confidence(row.low_confidence),
        );
    }
    println!();
    println!("{}", model.table.status_line());

    println!();
    println!("Recommendations");
    for recommendation in &model.recommendations {
        println!("  - {}", recommendation);
    }
}

fn print_detail(detail: &UserDetail) {
    println!();
    println!("{}", detail.title());
    println!(
        "Total queries: {}   Success rate: {}%",
        detail.total_queries, detail.success_rate
    );
    if !detail.confidence_reported {
        println!("(confidence counts not reported for this user)");
    }
    for segment in &detail.segments {
        let width = (segment.bar_width_pct() / 5.0).round() as usize;
        println!(
            "  {:<28} {:<20} {}",
            segment.label,
            "#".repeat(width),
            segment.summary()
        );
    }
}
