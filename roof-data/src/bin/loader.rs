use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use roof_core::db::{DbConfig, RepositoryRegistry};
use roof_data::CsvImport;
use roof_db_sqlite::SqliteRepositoryFactory;

/// Import business record CSV exports into the database.
///
/// Each file kind is optional; pass any combination. Files are header-keyed
/// with the original export's column names (Lead_ID, Customer_Name, ...).
/// Rows that fail to parse are logged and skipped; re-importing a file with
/// the same ids replaces those records. The database schema is created or
/// migrated automatically on open.
#[derive(Parser, Debug)]
#[command(name = "roof-data-loader")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to a leads CSV file
    #[arg(long)]
    leads: Option<PathBuf>,

    /// Path to a projects CSV file
    #[arg(long)]
    projects: Option<PathBuf>,

    /// Path to a quotes CSV file
    #[arg(long)]
    quotes: Option<PathBuf>,

    /// Path to a material price list CSV file
    #[arg(long)]
    materials: Option<PathBuf>,

    /// SQLite database URL (e.g. sqlite:roofing.db?mode=rwc to create if missing)
    #[arg(short, long, default_value = "sqlite:roofing.db?mode=rwc")]
    database: String,
}

fn open(path: &PathBuf) -> Result<File> {
    File::open(path).with_context(|| format!("Failed to open: {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut registry = RepositoryRegistry::new();
    registry.register(Box::new(SqliteRepositoryFactory));

    let config = DbConfig {
        backend: "sqlite".to_string(),
        connection_string: args.database.clone(),
    };
    let repo = registry
        .create(&config)
        .await
        .with_context(|| format!("Failed to open database: {}", args.database))?;

    if let Some(path) = &args.leads {
        let leads = CsvImport::parse_leads_lenient(open(path)?);
        let loaded = CsvImport::load_leads(repo.as_ref(), &leads)
            .await
            .context("Failed to load leads")?;
        println!("Loaded {} leads from {}", loaded, path.display());
    }

    if let Some(path) = &args.projects {
        let projects = CsvImport::parse_projects_lenient(open(path)?);
        let loaded = CsvImport::load_projects(repo.as_ref(), &projects)
            .await
            .context("Failed to load projects")?;
        println!("Loaded {} projects from {}", loaded, path.display());
    }

    if let Some(path) = &args.quotes {
        let quotes = CsvImport::parse_quotes_lenient(open(path)?);
        let loaded = CsvImport::load_quotes(repo.as_ref(), &quotes)
            .await
            .context("Failed to load quotes")?;
        println!("Loaded {} quotes from {}", loaded, path.display());
    }

    if let Some(path) = &args.materials {
        let materials = CsvImport::parse_materials_lenient(open(path)?);
        let loaded = CsvImport::load_materials(repo.as_ref(), &materials)
            .await
            .context("Failed to load materials")?;
        println!("Loaded {} materials from {}", loaded, path.display());
    }

    Ok(())
}
