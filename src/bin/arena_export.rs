use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use arena_assistant::report::{collection_lines, inventory_lines};
use arena_assistant::{AssistantConfig, BoosterSession, CardIndex, LogExtract};

#[derive(Parser, Debug)]
#[command(name = "arena-export")]
#[command(
    about = "Export collection, inventory and boosters from the game client log",
    long_about = None
)]
struct Args {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Client log file (overrides config)
    #[arg(short, long, global = true)]
    log_file: Option<PathBuf>,

    /// Card data directory (overrides config)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Localisation language for card names
    #[arg(long, global = true)]
    language: Option<String>,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Latest collection as card lines
    Collection,
    /// Latest inventory
    Inventory,
    /// Every opened booster plus totals
    Boosters {
        /// Spend earned wildcards on random cards of the active set
        #[arg(long)]
        wildcards: bool,

        /// Set code to pick wildcards from
        #[arg(long)]
        set: Option<String>,

        /// Pick seed (derived from the boosters when omitted)
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut config = AssistantConfig::load(args.config.as_deref()).context("loading config")?;
    if let Some(language) = args.language {
        config.language = language;
    }
    let log_path = args.log_file.unwrap_or_else(|| config.log_path());
    let data_dir = args.data_dir.unwrap_or_else(|| config.data_dir());

    match args.command {
        Command::Collection => {
            let extract = read_log(&log_path, config.max_log_bytes)?;
            let index = load_index(&data_dir, &config.language)?;
            let collection = extract
                .latest_collection()
                .context("no collection in log")?;
            if args.json {
                println!("{}", serde_json::to_string(collection)?);
            } else {
                for line in collection_lines(collection, &index) {
                    println!("{line}");
                }
            }
        }
        Command::Inventory => {
            let extract = read_log(&log_path, config.max_log_bytes)?;
            let inventory = extract.latest_inventory().context("no inventory in log")?;
            if args.json {
                println!("{}", serde_json::to_string(inventory)?);
            } else {
                for line in inventory_lines(inventory) {
                    println!("{line}");
                }
            }
        }
        Command::Boosters {
            wildcards,
            set,
            seed,
        } => {
            let file = open_log(&log_path, config.max_log_bytes)?;
            let index = Arc::new(load_index(&data_dir, &config.language)?);
            let mut session = BoosterSession::new(Arc::clone(&index), set.unwrap_or(config.set));
            if let Some(seed) = seed.or(config.seed) {
                session = session.with_seed(seed);
            }
            session
                .load_log(BufReader::new(file))
                .with_context(|| format!("reading boosters from {}", log_path.display()))?;

            let (report, picks) = if wildcards {
                let (report, picks) = session.report_with_picks();
                (report, Some(picks))
            } else {
                (session.report(), None)
            };

            if args.json {
                println!("{}", report.to_json()?);
                if let Some(picks) = picks {
                    println!("{}", serde_json::to_string(&picks)?);
                }
            } else {
                for text in report.booster_texts() {
                    println!("{text}");
                }
                print!("{}", report.summary_text(&index));
                print!("{}", report.wildcard_text());
                if let Some(picks) = picks {
                    info!(seed = picks.seed, set = session.active_set(), "wildcards picked");
                    println!("\nWILDCARDS:");
                    print!("{}", picks.text(&index));
                }
            }
        }
    }
    Ok(())
}

fn open_log(path: &Path, max_bytes: u64) -> Result<File> {
    let file = File::open(path).with_context(|| format!("opening log {}", path.display()))?;
    let size = file
        .metadata()
        .with_context(|| format!("reading metadata of {}", path.display()))?
        .len();
    if size > max_bytes {
        bail!(
            "log {} is {size} bytes, larger than the {max_bytes} byte limit",
            path.display()
        );
    }
    Ok(file)
}

fn read_log(path: &Path, max_bytes: u64) -> Result<LogExtract> {
    let file = open_log(path, max_bytes)?;
    LogExtract::from_reader(BufReader::new(file))
        .with_context(|| format!("scanning log {}", path.display()))
}

fn load_index(dir: &Path, language: &str) -> Result<CardIndex> {
    CardIndex::load(dir, language)
        .with_context(|| format!("loading card data from {}", dir.display()))
}
