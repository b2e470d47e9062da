use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use duckdb::{AccessMode, Config, Connection};
use std::path::PathBuf;
use tablescout::config::IntrospectionConfig;
use tablescout::datasets::{CatalogIntrospector, mutating_verbs};

#[derive(Parser)]
#[command(name = "tablescout", about = "Discover datasets and their schemas")]
pub struct Cli {
    /// Also write logs to the platform data directory
    #[arg(long, global = true)]
    pub log_file: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the tables of a DuckDB database as JSON
    Datasets {
        /// Database file. Defaults to an empty in-memory database.
        database: Option<PathBuf>,

        /// Path to a JSON introspection configuration file
        #[arg(long, env = "TABLESCOUT_CONFIG")]
        config: Option<PathBuf>,
    },
    /// Report whether SQL would invalidate a captured schema
    Classify {
        /// SQL text; multiple statements are allowed
        sql: String,
    },
}

pub fn run_command(command: Commands) -> Result<()> {
    match command {
        Commands::Datasets { database, config } => handle_datasets(database, config),
        Commands::Classify { sql } => {
            handle_classify(&sql);
            Ok(())
        }
    }
}

fn handle_datasets(database: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = match config_path {
        Some(path) => IntrospectionConfig::load_from(&path)?,
        None => IntrospectionConfig::load()?,
    };

    let conn = match &database {
        Some(path) => {
            let options = Config::default()
                .access_mode(AccessMode::ReadOnly)
                .context("Failed to configure read-only access")?;
            Connection::open_with_flags(path, options)
                .with_context(|| format!("Failed to open database {}", path.display()))?
        }
        None => Connection::open_in_memory().context("Failed to open in-memory database")?,
    };

    let tables = CatalogIntrospector::new(&conn, &config).datasets()?;
    println!("{}", serde_json::to_string_pretty(&tables)?);
    Ok(())
}

fn handle_classify(sql: &str) {
    let verbs = mutating_verbs(sql);
    if verbs.is_empty() {
        println!("false");
    } else {
        let names: Vec<&str> = verbs.iter().map(|v| v.as_str()).collect();
        println!("true ({})", names.join(", "));
    }
}
