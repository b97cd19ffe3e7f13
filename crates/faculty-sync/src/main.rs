use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use faculty_core::{schema, synchronize, synchronize_data, Direction, SyncOptions, SyncRequest};
use serde_json::Value;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const OPTIONS_ENV: &str = "FACULTY_SYNC_OPTIONS";

#[derive(Parser, Debug)]
#[command(author, version, about = "Maps faculty records between the SQL and document schemas", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Map one JSON record in the given direction and print the result
    Map(MapArgs),
    /// Print the document-store collections and indexes as JSON
    Schema(SchemaArgs),
    /// Print the sample faculty document, optionally mapped to SQL rows
    Sample(SampleArgs),
}

#[derive(Args, Debug)]
struct MapArgs {
    /// Either `sql-to-mongo` or `mongo-to-sql`
    #[arg(long)]
    direction: String,
    /// JSON file holding the record; stdin when omitted or `-`
    #[arg(long)]
    input: Option<PathBuf>,
    /// TOML file with sync options (defaults to $FACULTY_SYNC_OPTIONS)
    #[arg(long)]
    options: Option<PathBuf>,
    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,
}

#[derive(Args, Debug, Default)]
struct SchemaArgs {
    #[arg(long)]
    pretty: bool,
}

#[derive(Args, Debug, Default)]
struct SampleArgs {
    /// Map the sample with `mongo-to-sql` before printing
    #[arg(long)]
    direction: Option<String>,
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Map(args) => handle_map(args),
        Command::Schema(args) => print_json(&schema::setup_document(), args.pretty),
        Command::Sample(args) => handle_sample(args),
    }
}

fn handle_map(args: MapArgs) -> Result<()> {
    let options = load_options(args.options.as_deref())?;
    let record = read_record(args.input.as_deref())?;

    let outcome = synchronize_data(&args.direction, record, &options)
        .with_context(|| format!("failed to map record ({})", args.direction))?;
    info!(direction = %args.direction, "Record mapped");

    print_json(&serde_json::to_value(&outcome)?, args.pretty)
}

fn handle_sample(args: SampleArgs) -> Result<()> {
    let sample = schema::sample_faculty();

    let value = match args.direction.as_deref() {
        None => serde_json::to_value(&sample)?,
        Some(tag) => {
            let direction: Direction = tag.parse()?;
            anyhow::ensure!(
                direction == Direction::MongoToSql,
                "the sample is a document; only mongo-to-sql applies"
            );
            let outcome = synchronize(&SyncRequest::MongoToSql(sample), &SyncOptions::default());
            serde_json::to_value(&outcome)?
        }
    };

    print_json(&value, args.pretty)
}

fn load_options(path: Option<&Path>) -> Result<SyncOptions> {
    let path = match path {
        Some(path) => Some(path.to_path_buf()),
        None => std::env::var_os(OPTIONS_ENV).map(PathBuf::from),
    };

    match path {
        Some(path) => {
            debug!(path = %path.display(), "Loading sync options");
            SyncOptions::load(&path)
                .with_context(|| format!("failed to load sync options from {}", path.display()))
        }
        None => Ok(SyncOptions::default()),
    }
}

fn read_record(path: Option<&Path>) -> Result<Value> {
    let contents = match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read record from stdin")?;
            buffer
        }
    };

    serde_json::from_str(&contents).context("record is not valid JSON")
}

fn print_json(value: &Value, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}
