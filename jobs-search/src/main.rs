use std::path::PathBuf;
use std::process;

use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use jobs_search::{Dependencies, IndexingError};
use jobs_search_shared::{PositionOpeningRecord, SearchOptions, DEFAULT_SORT_FIELD};

#[derive(Parser)]
#[command(name = "jobs-search")]
#[command(about = "Search and ingest position openings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search position openings and print the results as JSON
    Search {
        /// Free-form query, e.g. "part time nurse jobs in austin, tx"
        query: Option<String>,

        /// Organization id, or a prefix ending in `*`
        #[arg(long)]
        organization_id: Option<String>,

        /// Restrict results to one source
        #[arg(long)]
        source: Option<String>,

        /// Space-delimited tags, any of which may match
        #[arg(long)]
        tags: Option<String>,

        /// `lat,lon` point for nearest-first browsing
        #[arg(long)]
        lat_lon: Option<String>,

        /// Page size (at most 100)
        #[arg(long, default_value = "10")]
        size: usize,

        /// Offset of the first result
        #[arg(long, default_value = "0")]
        from: usize,

        /// Sort field used without keywords
        #[arg(long, default_value = DEFAULT_SORT_FIELD)]
        sort_by: String,

        /// Return highlighted titles
        #[arg(long)]
        hl: bool,
    },
    /// Import a JSON array of position opening records
    Import {
        /// Path to the records file
        file: PathBuf,
    },
    /// Print every external id indexed for a source
    Ids {
        /// Source name, e.g. "usajobs"
        source: String,
    },
    /// Create the position openings index if it does not exist
    CreateIndex,
    /// Delete the position openings index
    DeleteIndex,
    /// Delete postings whose end date has passed
    Purge,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json");

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

async fn run(command: Commands) -> Result<(), IndexingError> {
    let dependencies = Dependencies::new().await?;
    let client = dependencies.client;

    match command {
        Commands::Search {
            query,
            organization_id,
            source,
            tags,
            lat_lon,
            size,
            from,
            sort_by,
            hl,
        } => {
            let options = SearchOptions {
                query,
                organization_id,
                source,
                tags,
                lat_lon,
                size,
                from,
                sort_by,
                hl,
            };
            let results = client.search(&options).await?;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        Commands::Import { file } => {
            let contents = tokio::fs::read_to_string(&file).await?;
            let records: Vec<PositionOpeningRecord> = serde_json::from_str(&contents)?;

            dependencies.importer.ensure_index().await?;
            let count = dependencies.importer.import(records).await?;
            info!(file = %file.display(), count, "Import finished");
        }
        Commands::Ids { source } => {
            for id in client.external_ids(&source).await? {
                println!("{}", id);
            }
        }
        Commands::CreateIndex => client.create_search_index().await?,
        Commands::DeleteIndex => client.delete_search_index().await?,
        Commands::Purge => {
            let deleted = client.delete_expired_on(Utc::now().date_naive()).await?;
            println!("{}", deleted);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command).await {
        error!(error = %e, "Command failed");
        process::exit(1);
    }
}
