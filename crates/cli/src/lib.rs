use anyhow::{bail, Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use review_catalog::{CatalogClient, FilterStore, ListingState, QualityFilter, ReviewConfig};
use review_protocol::SortOrder;
use review_record::{flatten, group_fields, review_record};
use review_schema::{analyze, CompletionQuality, CoverageTier, Schema};
use review_search::SearchConfig;
use review_session::{AdvancePolicy, CommandPalette, ReviewSession, ReviewView};
use serde_json::json;
use std::io;
use std::path::PathBuf;

mod render;
mod review;
mod source;

use source::{load_product, SourceArgs};

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    print_stdout(&serde_json::to_string_pretty(value)?)
}

#[derive(Parser)]
#[command(name = "catalog-review")]
#[command(about = "Review catalog product data field by field", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Config file (default: ./catalog-review.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Catalog API base URL (overrides config and CATALOG_REVIEW_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List products from the catalog
    List(ListArgs),

    /// Show the reviewable fields of a product, grouped by section
    Fields(FieldsArgs),

    /// Report schema fields the product is missing
    Missing(MissingArgs),

    /// Fuzzy-search a product's fields
    Search(SearchArgs),

    /// Review a product interactively, one input line per key or command
    Review(ReviewArgs),

    /// Show or change the persisted listing filter
    Filter(FilterArgs),
}

#[derive(Args)]
struct ListArgs {
    /// Page to load
    #[arg(long, default_value_t = 1)]
    page: u32,

    /// Sort order: latest|oldest (default from config)
    #[arg(long)]
    sort: Option<SortOrder>,

    /// Only show these completion levels, e.g. high,medium (default: persisted filter)
    #[arg(long, value_delimiter = ',')]
    filter: Option<Vec<CompletionQuality>>,

    /// Output JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct FieldsArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct MissingArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct SearchArgs {
    /// Text to match against field labels and keys
    query: String,

    #[command(flatten)]
    source: SourceArgs,

    /// Maximum number of results
    #[arg(long, default_value_t = 50)]
    limit: usize,

    /// 0.0 accepts only exact matches, 1.0 accepts any fuzzy match
    #[arg(long, default_value_t = 0.3)]
    threshold: f64,

    /// Output JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ReviewArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Where to move after approving: next-unreviewed|increment
    #[arg(long, default_value = "next-unreviewed")]
    policy: AdvancePolicy,
}

#[derive(Args)]
struct FilterArgs {
    #[command(subcommand)]
    action: Option<FilterAction>,

    /// Output JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Clone, Copy)]
enum FilterAction {
    /// Print the selected levels (default)
    Show,
    /// Select or deselect one level
    Toggle { level: CompletionQuality },
    /// Select nothing (show every product)
    Clear,
}

pub async fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();

    let json_output = match &cli.command {
        Commands::List(args) => args.json,
        Commands::Fields(args) => args.json,
        Commands::Missing(args) => args.json,
        Commands::Search(args) => args.json,
        Commands::Filter(args) => args.json,
        Commands::Review(_) => false,
    };
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = load_config(&cli)?;

    match cli.command {
        Commands::List(args) => run_list(args, &config).await?,
        Commands::Fields(args) => run_fields(args, &config).await?,
        Commands::Missing(args) => run_missing(args, &config).await?,
        Commands::Search(args) => run_search(args, &config).await?,
        Commands::Review(args) => run_review(args, &config).await?,
        Commands::Filter(args) => run_filter(args, &config)?,
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<ReviewConfig> {
    let mut config =
        ReviewConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(url) = &cli.api_url {
        config.api_base_url = url.trim().to_string();
    }
    Ok(config)
}

async fn run_list(args: ListArgs, config: &ReviewConfig) -> Result<()> {
    let client = CatalogClient::new(config).context("Failed to set up catalog client")?;
    let filter = match args.filter {
        Some(levels) => QualityFilter::new(levels),
        None => FilterStore::new(&config.state_dir).load(),
    };
    let sort_by = args.sort.unwrap_or(config.sort_by);

    let mut state = ListingState::new(config.page_size, sort_by, filter);
    state
        .load(&client, args.page.max(1))
        .await
        .context("Failed to fetch products")?;

    if args.json {
        let visible = state.visible_products();
        return print_json(&json!({
            "products": visible,
            "pagination": state.pagination(),
            "completionStats": state.completion_stats(),
            "filter": state.filter().levels(),
        }));
    }
    print_stdout(&render::listing_text(&state))
}

async fn run_fields(args: FieldsArgs, config: &ReviewConfig) -> Result<()> {
    let product = load_product(&args.source, config).await?;
    let fields = flatten(review_record(&product));
    let groups = group_fields(&fields);
    log::debug!("Flattened {} fields in {} sections", fields.len(), groups.len());

    if args.json {
        let sections: Vec<_> = groups
            .iter()
            .map(|g| json!({"key": g.key, "name": g.name, "count": g.len()}))
            .collect();
        return print_json(&json!({
            "total": fields.len(),
            "fields": fields,
            "sections": sections,
        }));
    }
    print_stdout(&render::fields_text(&groups))
}

async fn run_missing(args: MissingArgs, config: &ReviewConfig) -> Result<()> {
    let product = load_product(&args.source, config).await?;
    let schema = Schema::product_snapshot().context("Built-in product schema is invalid")?;
    let report = analyze(review_record(&product), &schema);
    log::debug!(
        "{} of {} declared fields missing",
        report.missing_count(),
        report.total_fields
    );

    if args.json {
        let tier = CoverageTier::from_percentage(report.percentage);
        return print_json(&json!({
            "percentage": report.percentage,
            "coverage": tier.label(),
            "totalFields": report.total_fields,
            "filledFields": report.filled_fields,
            "missingFields": report.missing_fields,
            "groupedByCategory": report.grouped_by_category,
        }));
    }
    print_stdout(&render::missing_text(&report))
}

async fn run_search(args: SearchArgs, config: &ReviewConfig) -> Result<()> {
    let search = SearchConfig::default()
        .with_limit(args.limit)
        .with_threshold(args.threshold);
    let mut palette = CommandPalette::new(search).context("Invalid search options")?;

    let product = load_product(&args.source, config).await?;
    let session = ReviewSession::new(flatten(review_record(&product)), AdvancePolicy::default());
    palette.set_query(args.query);
    let sections = palette.results(&session);

    if args.json {
        return print_json(&json!({ "sections": sections }));
    }
    print_stdout(&render::search_text(&sections))
}

async fn run_review(args: ReviewArgs, config: &ReviewConfig) -> Result<()> {
    if args.source.reads_stdin() {
        bail!("review reads its input from stdin; pass the record as a file, --slug or --id");
    }
    let product = load_product(&args.source, config).await?;
    let mut view = ReviewView::from_product(&product, args.policy, SearchConfig::default())
        .context("Failed to start review")?;

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    match review::run_review(&mut view, stdin.lock(), &mut stdout) {
        Err(err)
            if err
                .downcast_ref::<io::Error>()
                .is_some_and(|e| e.kind() == io::ErrorKind::BrokenPipe) =>
        {
            Ok(())
        }
        other => other,
    }
}

fn run_filter(args: FilterArgs, config: &ReviewConfig) -> Result<()> {
    let store = FilterStore::new(&config.state_dir);
    let mut filter = store.load();

    match args.action.unwrap_or(FilterAction::Show) {
        FilterAction::Show => {}
        FilterAction::Toggle { level } => {
            filter.toggle(level);
            save_filter(&store, &filter);
        }
        FilterAction::Clear => {
            filter.clear();
            save_filter(&store, &filter);
        }
    }

    if args.json {
        return print_json(&json!(filter.levels()));
    }
    let levels = filter.levels();
    if levels.is_empty() {
        return print_stdout("Filter: none (showing all products)");
    }
    let labels: Vec<&str> = levels.iter().map(|level| level.label()).collect();
    print_stdout(&format!("Filter: {}", labels.join(", ")))
}

/// Persisting the filter is best effort
fn save_filter(store: &FilterStore, filter: &QualityFilter) {
    if let Err(err) = store.save(filter) {
        log::warn!("Failed to save filter to {}: {err}", store.path().display());
    }
}
