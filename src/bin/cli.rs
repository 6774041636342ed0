//! itemodm CLI
//!
//! Inspects item descriptors and derives keys of JSON records.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use itemodm::metadata::KeyRole;
use itemodm::value::{attribute_map_from_json, attribute_map_to_json};
use itemodm::{AttributeMap, Config, ItemDescriptor, ItemMetadata};
use tracing_subscriber::{fmt, EnvFilter};

/// itemodm CLI
#[derive(Parser, Debug)]
#[command(name = "itemodm-cli")]
#[command(about = "Inspect item metadata and derive record keys")]
#[command(version)]
struct Args {
    /// Log filter used when RUST_LOG is unset
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Repository reported for items without an override
    #[arg(long, default_value = itemodm::config::DEFAULT_REPOSITORY)]
    default_repository: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the parsed metadata of a descriptor
    Inspect {
        /// Descriptor JSON file
        descriptor: PathBuf,
    },

    /// Print the ordered primary keys of a record
    Keys {
        /// Descriptor JSON file
        descriptor: PathBuf,

        /// Record JSON file (one object)
        record: PathBuf,
    },

    /// Print the primary identifier of a record
    Identify {
        /// Descriptor JSON file
        descriptor: PathBuf,

        /// Record JSON file (one object)
        record: PathBuf,
    },
}

fn main() {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("itemodm CLI v{}", itemodm::VERSION);

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> itemodm::Result<()> {
    let config = Config::builder()
        .default_repository(args.default_repository)
        .build();

    match args.command {
        Commands::Inspect { descriptor } => {
            let metadata = load_metadata(&descriptor, &config)?;
            print_metadata(&metadata);
        }
        Commands::Keys { descriptor, record } => {
            let metadata = load_metadata(&descriptor, &config)?;
            let keys = metadata.primary_keys_from_attributes(&load_record(&record)?)?;
            println!("{}", serde_json::to_string_pretty(&attribute_map_to_json(&keys))?);
        }
        Commands::Identify { descriptor, record } => {
            let metadata = load_metadata(&descriptor, &config)?;
            println!(
                "{}",
                metadata.primary_identifier_from_attributes(&load_record(&record)?)?
            );
        }
    }

    Ok(())
}

fn load_metadata(path: &Path, config: &Config) -> itemodm::Result<ItemMetadata> {
    let descriptor = ItemDescriptor::from_path(path)?;
    ItemMetadata::parse(&descriptor, config)
}

fn load_record(path: &Path) -> itemodm::Result<AttributeMap> {
    let contents = fs::read_to_string(path)?;
    attribute_map_from_json(serde_json::from_str(&contents)?)
}

fn print_metadata(metadata: &ItemMetadata) {
    println!("item:       {}", metadata.item_name());
    println!("table:      {}", metadata.table_name());
    println!("repository: {}", metadata.repository_class());
    println!("cas field:  {}", metadata.cas_field().unwrap_or("-"));

    println!("key schema:");
    for key in metadata.key_schema() {
        let role = match key.role {
            KeyRole::Hash => "HASH",
            KeyRole::Range => "RANGE",
            KeyRole::Extra => "EXTRA",
        };
        println!("  {:<6} {} ({})", role, key.name, key.ty);
    }

    println!("attributes:");
    for (property, attribute, ty) in metadata.fields() {
        if property == attribute {
            println!("  {attribute}: {ty}");
        } else {
            println!("  {attribute}: {ty} (property {property})");
        }
    }
}
