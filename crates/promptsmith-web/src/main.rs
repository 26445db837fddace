//! Serve the promptsmith JSON API.
//!
//! # Usage
//!
//! ```bash
//! GEMINI_API_KEY=... cargo run -p promptsmith-web
//! GEMINI_API_KEY=... cargo run -p promptsmith-web -- --port 8080 --static-dir ./dist
//! ```
//!
//! Then:
//!
//! ```bash
//! curl -s localhost:3001/api/generate -H 'content-type: application/json' -d '{
//!   "idea": "a CSV parser", "persona": "Software Engineer",
//!   "tone": "Technical", "taskType": "Code Generation"
//! }'
//! ```

use std::path::PathBuf;
use std::process;

use clap::Parser;
use promptsmith::config::Config;
use promptsmith::generation::GeminiClient;
use promptsmith::history::FileStore;
use promptsmith_web::{WebConfig, shared_session, spawn_web};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Prompt generator web server.
#[derive(Parser)]
#[command(about = "JSON API for the promptsmith prompt generator")]
struct Args {
    /// Port to listen on.
    #[arg(long, default_value_t = 3001)]
    port: u16,

    /// Listen on all interfaces instead of localhost only.
    #[arg(long)]
    public: bool,

    /// Directory of static front-end files to serve.
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Generation API key (overrides GEMINI_API_KEY).
    #[arg(long)]
    api_key: Option<String>,

    /// Model to generate with.
    #[arg(long)]
    model: Option<String>,

    /// Directory holding the prompt history.
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::from_env();
    if let Some(key) = args.api_key {
        config = config.with_api_key(key);
    }
    if let Some(model) = args.model {
        config = config.with_model(model);
    }
    if let Some(dir) = args.data_dir {
        config = config.with_data_dir(dir);
    }

    let client = GeminiClient::from_config(&config)?;
    info!(model = client.model(), data_dir = %config.data_dir.display(), "Starting");
    let session = shared_session(FileStore::new(&config.data_dir), client);

    let host = if args.public { [0, 0, 0, 0] } else { [127, 0, 0, 1] };
    let web_config = WebConfig {
        bind_addr: (host, args.port).into(),
        static_dir: args.static_dir,
    };
    let addr = spawn_web(session, web_config).await?;
    println!("API: http://{addr}/api/options");

    tokio::signal::ctrl_c().await?;
    info!("Shutting down");
    Ok(())
}

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(Args::parse()).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
