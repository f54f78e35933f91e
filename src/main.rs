use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use mural_admin::board::importer::{BoardCsvImporter, BoardDataset, DatasetCache};
use mural_admin::board::suggestions::{
    board_router, BoardEntry, BoardSummary, FileStateStorage, InMemoryStateStorage, RankingMode,
    ScoringConfig, StateStorage, SuggestionBoardService,
};
use mural_admin::config::AppConfig;
use mural_admin::error::AppError;
use mural_admin::telemetry;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct OpsState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Mural Admin",
    about = "Run the suggestion board admin service and reports from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Inspect the suggestion board without starting the service
    Board {
        #[command(subcommand)]
        command: BoardCommand,
    },
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum BoardCommand {
    /// Print the prioritized board for stakeholder reviews
    Rank(RankArgs),
}

#[derive(Args, Debug)]
struct RankArgs {
    /// Optional board CSV export; the built-in sample board is used otherwise
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Sort key: score, votes, or comments
    #[arg(long, default_value = "score", value_parser = parse_ranking_mode)]
    sort: RankingMode,
    /// Evaluation date for account ages (defaults to today)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
    /// List archived suggestions as well
    #[arg(long)]
    include_archived: bool,
    /// Include the per-factor score breakdown for each suggestion
    #[arg(long)]
    breakdown: bool,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Board {
            command: BoardCommand::Rank(args),
        } => run_board_rank(args),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn parse_ranking_mode(raw: &str) -> Result<RankingMode, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "score" => Ok(RankingMode::Score),
        "votes" => Ok(RankingMode::Votes),
        "comments" => Ok(RankingMode::Comments),
        other => Err(format!(
            "unknown sort key '{other}'; expected score, votes, or comments"
        )),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let cache = DatasetCache::new();
    let dataset = load_dataset(&cache, config.board.csv_path.as_deref())?;
    info!(suggestions = dataset.len(), "board dataset loaded");

    match config.storage.state_dir.clone() {
        Some(dir) => {
            let service = SuggestionBoardService::new(
                FileStateStorage::new(dir),
                dataset,
                ScoringConfig::default(),
            );
            serve(config, Arc::new(service)).await
        }
        None => {
            let service = SuggestionBoardService::new(
                InMemoryStateStorage::default(),
                dataset,
                ScoringConfig::default(),
            );
            serve(config, Arc::new(service)).await
        }
    }
}

fn load_dataset(
    cache: &DatasetCache,
    csv_path: Option<&Path>,
) -> Result<Arc<BoardDataset>, AppError> {
    let dataset = cache.get_or_load(|| match csv_path {
        Some(path) => BoardCsvImporter::from_path(path),
        None => Ok(BoardDataset::sample()),
    })?;
    Ok(dataset)
}

async fn serve<S>(
    config: AppConfig,
    service: Arc<SuggestionBoardService<S>>,
) -> Result<(), AppError>
where
    S: StateStorage + 'static,
{
    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let ops = OpsState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(ops)
        .merge(board_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "suggestion board admin service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_board_rank(args: RankArgs) -> Result<(), AppError> {
    let RankArgs {
        csv,
        sort,
        today,
        include_archived,
        breakdown,
    } = args;

    let config = AppConfig::load()?;
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    let csv_path = csv.or(config.board.csv_path);
    let imported = csv_path.is_some();
    let dataset = Arc::new(match csv_path {
        Some(path) => BoardCsvImporter::from_path(path)?,
        None => BoardDataset::sample(),
    });

    // Same facade the server uses, so the report reflects archived flags
    // recorded in the configured state directory.
    let (entries, vote_weight, hidden) = match config.storage.state_dir {
        Some(dir) => rank_board(
            FileStateStorage::new(dir),
            dataset,
            sort,
            include_archived,
            today,
        ),
        None => rank_board(
            InMemoryStateStorage::default(),
            dataset,
            sort,
            include_archived,
            today,
        ),
    };

    render_board_report(&entries, sort, today, imported, breakdown, vote_weight, hidden);
    Ok(())
}

/// Rank the board and collect the report inputs that live on the service:
/// the configured vote weight and the number of archived suggestions the
/// listing hides.
fn rank_board<S>(
    storage: S,
    dataset: Arc<BoardDataset>,
    sort: RankingMode,
    include_archived: bool,
    today: NaiveDate,
) -> (Vec<BoardEntry>, u32, usize)
where
    S: StateStorage + 'static,
{
    let service = SuggestionBoardService::new(storage, dataset, ScoringConfig::default());
    let entries = service.board_on(sort, include_archived, today);
    let vote_weight = service.engine().config().vote_weight;
    let hidden = service.dataset().len() - entries.len();
    (entries, vote_weight, hidden)
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<OpsState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<OpsState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

fn render_board_report(
    entries: &[BoardEntry],
    mode: RankingMode,
    today: NaiveDate,
    imported: bool,
    breakdown: bool,
    vote_weight: u32,
    hidden: usize,
) {
    println!("Suggestion board");
    println!("Sorted by {} (evaluated {})", mode.label(), today);

    if imported {
        println!("Data source: board CSV export");
    } else {
        println!("Data source: built-in sample board");
    }

    println!("Vote weight: x{vote_weight}");
    if hidden > 0 {
        println!("{hidden} archived suggestion(s) hidden");
    }

    if entries.is_empty() {
        println!("\nThe board is empty.");
        return;
    }

    println!();
    for entry in entries {
        let archived = if entry.state.archived { " | archived" } else { "" };
        println!(
            "{:>2}. [tier {}] {} ({}) | score {} | votes {} | comments {}{}",
            entry.position,
            entry.priority.tier.label(),
            entry.record.title,
            entry.record.client.company,
            entry.ranking_score,
            entry.record.votes,
            entry.record.comments,
            archived
        );

        if breakdown {
            for component in &entry.priority.components {
                println!(
                    "      - {}: +{} ({})",
                    component.factor.label(),
                    component.points,
                    component.notes
                );
            }
        }
    }

    let summary = BoardSummary::of(entries);

    println!("\nBy tier");
    for tier in &summary.tier_counts {
        println!(
            "- tier {}: {} suggestion(s)",
            tier.tier_label, tier.suggestions
        );
    }

    println!("\nDelivery stages");
    for stage in &summary.stage_counts {
        println!(
            "- {}: {} suggestion(s)",
            stage.stage_label, stage.suggestions
        );
    }
}
