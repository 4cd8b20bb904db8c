//! ExplainIt client - interactive code analysis and explanation
//!
//! Terminal front end for the ExplainIt backend:
//! - uploads a source file for static analysis
//! - renders the per-function risk report
//! - fetches AI explanations for selected functions, cached per session

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use explainit::api::ApiClient;
use explainit::config::{self, Config};
use explainit::controller::SessionController;
use explainit::repl::{colors, Repl};

#[derive(Parser)]
#[command(name = "explainit")]
#[command(about = "Interactive client for the ExplainIt code analysis backend")]
struct Args {
    /// Analysis backend base URL
    #[arg(long, env = "EXPLAINIT_API_BASE")]
    api_base: Option<String>,

    /// File to analyze on startup
    file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (from ~/.explainit/.env or current dir)
    let env_path = dirs::home_dir()
        .map(|h| h.join(".explainit").join(".env"))
        .filter(|p| p.exists());
    if let Some(path) = env_path {
        let _ = dotenvy::from_path(&path);
    } else {
        let _ = dotenvy::dotenv(); // fallback to current dir
    }

    // Initialize logging
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    // Load config file (~/.explainit/config.toml)
    let config = Config::load();

    // Resolve values: CLI args > env vars (handled by clap) > config file > default
    let api_base = config::resolve_api_base(args.api_base, &config);

    // Pretty startup banner
    println!();
    println!(
        "{}",
        colors::banner_accent(&format!("  ExplainIt {}", env!("CARGO_PKG_VERSION")))
    );
    println!("{}", colors::separator(50));
    println!("{}", colors::banner_line("Backend", &api_base));
    println!(
        "{}",
        colors::banner_line("Config", &config::config_path().display().to_string())
    );
    println!("{}", colors::separator(50));
    println!();

    let controller = SessionController::new(ApiClient::new(api_base));
    let mut repl = Repl::new(controller)?;

    if let Some(file) = args.file {
        repl.open_on_startup(&file).await;
    }

    repl.run().await
}
