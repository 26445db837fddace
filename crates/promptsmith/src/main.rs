//! Generate structured LLM prompts from the command line.
//!
//! Reads the API key from `GEMINI_API_KEY` (or `API_KEY`). Only `generate`
//! needs it; everything else works offline.
//!
//! # Examples
//!
//! ```sh
//! # Generate a prompt and record it in history
//! promptsmith generate "a CSV parser" --persona software-engineer --tone technical
//!
//! # Start from a built-in template
//! promptsmith generate --template "SQL Query Generation"
//!
//! # Pipe the idea from stdin
//! echo "an onboarding email" | promptsmith generate --stdin --task content-creation
//!
//! # Show the meta-prompt that would be sent, without calling the API
//! promptsmith assemble "a CSV parser" --task api-design
//!
//! # Browse history and recall an entry by id prefix
//! promptsmith history
//! promptsmith show 3f2a
//! ```

use clap::{Args, Parser, Subcommand};
use promptsmith::config::{Config, ConfigError};
use promptsmith::generation::GeminiClient;
use promptsmith::history::{FileStore, HistoryEntry, HistoryStore};
use promptsmith::options::{Persona, PromptOptions, TaskType, Tone};
use promptsmith::session::{PromptSession, SessionError};
use promptsmith::templates::{OptionOverrides, ResolveError};
use promptsmith::{assembler, templates};
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Turn a short idea into a detailed, structured LLM prompt.
#[derive(Parser)]
#[command(name = "promptsmith", version)]
struct Cli {
    /// Generation API key (overrides GEMINI_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Model to generate with
    #[arg(long, global = true)]
    model: Option<String>,

    /// API base URL
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Directory holding the prompt history
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a prompt and record it in history
    Generate(PromptArgs),
    /// Print the meta-prompt without calling the API
    Assemble(PromptArgs),
    /// List recent prompts, newest first
    History {
        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a prompt from history by id or id prefix
    Show {
        id: String,
        /// Print the whole entry as JSON
        #[arg(long)]
        json: bool,
    },
    /// List built-in templates by category
    Templates {
        /// Print quick-start examples instead
        #[arg(long)]
        examples: bool,
        #[arg(long)]
        json: bool,
    },
    /// List the available personas, tones and task types
    Options {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct PromptArgs {
    /// The idea to expand
    idea: Option<String>,

    /// Read the idea from stdin
    #[arg(long, conflicts_with = "idea")]
    stdin: bool,

    /// Start from a built-in template (title or slug)
    #[arg(long)]
    template: Option<String>,

    /// Persona label or slug, e.g. "data-scientist"
    #[arg(long)]
    persona: Option<Persona>,

    /// Tone label or slug, e.g. "academic"
    #[arg(long)]
    tone: Option<Tone>,

    /// Task type label or slug, e.g. "api-design"
    #[arg(long)]
    task: Option<TaskType>,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("no history entry matches '{0}'")]
    NotFound(String),
    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

// ── Option resolution ──────────────────────────────────────────────

impl PromptArgs {
    /// Template defaults, then explicit flags, then the idea.
    fn resolve(&self) -> Result<PromptOptions, CliError> {
        let idea = if self.stdin {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(CliError::Stdin)?;
            Some(buf.trim_end().to_string())
        } else {
            self.idea.clone()
        };

        let overrides = OptionOverrides {
            template: self.template.clone(),
            persona: self.persona,
            tone: self.tone,
            task_type: self.task.clone(),
            idea,
        };
        Ok(overrides.resolve()?)
    }
}

fn config_from(cli: &Cli) -> Config {
    let mut config = Config::from_env();
    if let Some(key) = &cli.api_key {
        config = config.with_api_key(key.clone());
    }
    if let Some(model) = &cli.model {
        config = config.with_model(model.clone());
    }
    if let Some(base) = &cli.api_base {
        config = config.with_api_base(base.clone());
    }
    if let Some(dir) = &cli.data_dir {
        config = config.with_data_dir(dir.clone());
    }
    config
}

// ── Output ─────────────────────────────────────────────────────────

fn summary_line(entry: &HistoryEntry) -> String {
    let id: String = entry.id.chars().take(8).collect();
    let when = entry
        .created_at()
        .map(|t| {
            t.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|| "-".to_string());
    let first_line = entry.idea().lines().next().unwrap_or_default();
    let mut idea: String = first_line.chars().take(60).collect();
    if first_line.chars().count() > 60 || entry.idea().lines().nth(1).is_some() {
        idea.push('…');
    }
    format!("{id}  {when}  {:<26}  {idea}", entry.options.task_type.label())
}

fn print_history(history: &HistoryStore, json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(history)?);
    } else if history.is_empty() {
        eprintln!("No history yet.");
    } else {
        for entry in history {
            println!("{}", summary_line(entry));
        }
    }
    Ok(())
}

fn print_templates(examples: bool, json: bool) -> Result<(), CliError> {
    if examples {
        if json {
            println!("{}", serde_json::to_string_pretty(&templates::EXAMPLE_PROMPTS)?);
        } else {
            for example in &templates::EXAMPLE_PROMPTS {
                println!(
                    "{} [{} / {} / {}]\n  {}",
                    example.title, example.persona, example.tone, example.task_type, example.idea
                );
            }
        }
        return Ok(());
    }

    if json {
        let groups: Vec<serde_json::Value> = templates::grouped()
            .into_iter()
            .map(|(category, members)| {
                serde_json::json!({"category": category, "templates": members})
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&groups)?);
        return Ok(());
    }

    for (category, members) in templates::grouped() {
        println!("{category}");
        for template in members {
            println!(
                "  {:<22} {}",
                promptsmith::options::slug(template.title),
                template.description
            );
        }
    }
    Ok(())
}

fn print_options(json: bool) -> Result<(), CliError> {
    let personas: Vec<&str> = Persona::ALL.iter().map(|p| p.label()).collect();
    let tones: Vec<&str> = Tone::ALL.iter().map(|t| t.label()).collect();
    let known = TaskType::KNOWN;
    let tasks: Vec<&str> = known.iter().map(TaskType::label).collect();

    if json {
        let value = serde_json::json!({
            "personas": personas,
            "tones": tones,
            "taskTypes": tasks,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    for (heading, labels) in [("Personas", personas), ("Tones", tones), ("Task types", tasks)] {
        println!("{heading}");
        for label in labels {
            println!("  {:<28} {label}", promptsmith::options::slug(label));
        }
    }
    Ok(())
}

// ── Commands ───────────────────────────────────────────────────────

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = config_from(&cli);
    let store = FileStore::new(&config.data_dir);

    match &cli.command {
        Command::Generate(args) => {
            let options = args.resolve()?;
            let client = GeminiClient::from_config(&config)?;
            let mut session = PromptSession::open(store, client);
            let entry = session.generate(&options).await?;
            println!("{}", entry.generated_prompt);
            let id: String = entry.id.chars().take(8).collect();
            eprintln!("Saved to history as {id}");
        }
        Command::Assemble(args) => {
            let options = args.resolve()?;
            println!("{}", assembler::assemble(&options));
        }
        Command::History { json } => {
            let history = promptsmith::history::HistoryCache::new(store).load();
            print_history(&history, *json)?;
        }
        Command::Show { id, json } => {
            let history = promptsmith::history::HistoryCache::new(store).load();
            let entry = history
                .find_by_prefix(id)
                .ok_or_else(|| CliError::NotFound(id.clone()))?;
            if *json {
                println!("{}", serde_json::to_string_pretty(entry)?);
            } else {
                println!("{}", entry.generated_prompt);
            }
        }
        Command::Templates { examples, json } => print_templates(*examples, *json)?,
        Command::Options { json } => print_options(*json)?,
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
