//! Askviz Control - CLI client for the askviz analytics backend.
//!
//! Provides one-shot questions, an interactive session and configuration
//! inspection.

use anyhow::Result;
use askviz_common::{BackendConfig, ChartType};
use askvizctl::client::BackendClient;
use askvizctl::output;
use askvizctl::repl;
use askvizctl::session::QuerySession;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "askvizctl")]
#[command(about = "Ask questions about your data and get chart-ready answers", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a single question and print the answer
    Ask {
        /// The question to send to the backend
        question: Vec<String>,

        /// Chart type override (bar, line, pie, area)
        #[arg(long)]
        chart: Option<ChartType>,

        /// Print the normalized result as JSON
        #[arg(long)]
        json: bool,

        /// Backend base URL (overrides config file and environment)
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Start an interactive ask session
    Repl {
        /// Backend base URL (overrides config file and environment)
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Show the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("ASKVIZ_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Ask {
            question,
            chart,
            json,
            base_url,
        } => ask(question.join(" "), chart, json, base_url).await,
        Commands::Repl { base_url } => {
            let config = load_config(base_url)?;
            let client = BackendClient::new(&config)?;
            repl::run(&client).await
        }
        Commands::Config => show_config(),
    }
}

async fn ask(
    question: String,
    chart: Option<ChartType>,
    json: bool,
    base_url: Option<String>,
) -> Result<()> {
    let config = load_config(base_url)?;
    let client = BackendClient::new(&config)?;

    let mut session = QuerySession::new();
    if let Some(chart) = chart {
        session.set_chart_override(chart);
    }
    session.execute(&client, &question).await;

    if let Some(err) = session.error() {
        output::display_error(err);
        std::process::exit(err.exit_code());
    }
    if let Some(result) = session.result() {
        let chart_type = session.chart_type().unwrap_or_default();
        if json {
            println!("{}", output::render_json(result, chart_type)?);
        } else {
            output::display_result(result, chart_type);
        }
    }
    Ok(())
}

fn load_config(base_url: Option<String>) -> Result<BackendConfig> {
    let mut config = BackendConfig::load()?;
    if let Some(base_url) = base_url {
        config.base_url = base_url;
    }
    Ok(config)
}

fn show_config() -> Result<()> {
    let config = BackendConfig::load()?;
    match BackendConfig::config_path() {
        Some(path) if path.exists() => println!("config file: {}", path.display()),
        Some(path) => println!("config file: {} (not present)", path.display()),
        None => println!("config file: <no config directory>"),
    }
    println!("base_url = {}", config.base_url);
    println!("timeout_secs = {}", config.timeout_secs);
    Ok(())
}
