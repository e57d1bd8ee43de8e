//! DummyGen - schema builder for a mock data generation service
//!
//! CLI entry point: build a schema, preview it, download a dataset.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::info;

use dummygen::cli::{Cli, Command};
use dummygen::client::{GenerationClient, HttpGenerationClient};
use dummygen::config::Config;
use dummygen::output::{
    default_output_path, format_catalog, format_schema, format_schema_json, format_table, write_output,
};
use dummygen::session::Session;
use dummygen::store::SchemaStore;
use fieldkit::{OutputFormat, PREVIEW_LIMIT, parse_seed};

fn setup_logging(verbose: bool) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dummygen")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Log to file so command output stays clean
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("dummygen.log"))
        .context("Failed to open log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    info!("DummyGen loaded config: api={}", config.api.base_url);

    let client: Arc<dyn GenerationClient> =
        Arc::new(HttpGenerationClient::from_config(&config.api).context("Failed to create HTTP client")?);
    let store = SchemaStore::from_config(&config.storage);
    let mut session = Session::open(store, client).context("Failed to open schema")?;

    match cli.command {
        Command::Fields { category, refresh } => cmd_fields(&mut session, category.as_deref(), refresh).await,
        Command::Add {
            name,
            field_type,
            settings,
        } => cmd_add(&mut session, &name, &field_type, &settings).await,
        Command::Remove { index } => cmd_remove(&mut session, index),
        Command::Show { json } => cmd_show(&session, json),
        Command::Import { file } => cmd_import(&mut session, file.as_deref()).await,
        Command::Clear => cmd_clear(&mut session),
        Command::Preview { count, seed } => {
            let count = count.unwrap_or(config.generation.default_count);
            cmd_preview(&session, count, seed.as_deref()).await
        }
        Command::Download {
            count,
            format,
            seed,
            output,
        } => {
            let count = count.unwrap_or(config.generation.default_count);
            let format = format.unwrap_or(config.generation.default_format);
            let path = output.unwrap_or_else(|| default_output_path(&config.storage.output_dir, format));
            cmd_download(&session, count, format, seed.as_deref(), &path).await
        }
        Command::Health => cmd_health(&session, &config.api.base_url).await,
    }
}

/// List the field catalog
async fn cmd_fields(session: &mut Session, category: Option<&str>, refresh: bool) -> Result<()> {
    let catalog = if refresh {
        session.refresh_catalog().await?
    } else {
        session.catalog().await?
    };

    let listing = format_catalog(catalog, category);
    if listing.is_empty() {
        match category {
            Some(category) => println!("No field types in category '{}'", category),
            None => println!("The service advertises no field types"),
        }
    } else {
        print!("{}", listing);
    }
    Ok(())
}

/// Add one field
async fn cmd_add(session: &mut Session, name: &str, field_type: &str, settings: &[(String, String)]) -> Result<()> {
    let fields = session.add_field(name, field_type, settings).await?;
    println!(
        "{} Added field {} ({}), {} field(s) in schema",
        "✓".green(),
        name.trim().cyan(),
        field_type,
        fields.len()
    );
    Ok(())
}

/// Remove a field by position
fn cmd_remove(session: &mut Session, index: usize) -> Result<()> {
    match session.remove_field(index)? {
        Some(field) => println!("{} Removed field {}", "✓".green(), field.name.cyan()),
        None => println!("No field at position {} ({} defined)", index, session.schema().len()),
    }
    Ok(())
}

/// Print the schema
fn cmd_show(session: &Session, json: bool) -> Result<()> {
    if json {
        println!("{}", format_schema_json(session.schema()));
    } else {
        print!("{}", format_schema(session.schema()));
    }
    Ok(())
}

/// Replace the schema from JSON shorthand
async fn cmd_import(session: &mut Session, file: Option<&Path>) -> Result<()> {
    let raw = match file {
        Some(path) if path != Path::new("-") => {
            fs::read_to_string(path).context(format!("Failed to read {}", path.display()))?
        }
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read schema from stdin")?;
            buffer
        }
    };

    let fields = session.import_json(&raw).await?;
    println!("{} Imported {} field(s)", "✓".green(), fields.len());
    Ok(())
}

/// Remove every field
fn cmd_clear(session: &mut Session) -> Result<()> {
    session.clear()?;
    println!("{} Schema cleared", "✓".green());
    Ok(())
}

/// Print a sample as a table
async fn cmd_preview(session: &Session, count: u32, seed: Option<&str>) -> Result<()> {
    let seed = seed.map(parse_seed).transpose()?.flatten();
    let records = session.preview(count, seed).await?;

    let columns: Vec<&str> = session.schema().iter().map(|f| f.name.as_str()).collect();
    print!("{}", format_table(&records, &columns));
    if count > PREVIEW_LIMIT {
        println!("{}", format!("(preview shows at most {} records)", PREVIEW_LIMIT).dimmed());
    }
    Ok(())
}

/// Generate the dataset and write it to `path`
async fn cmd_download(
    session: &Session,
    count: u32,
    format: OutputFormat,
    seed: Option<&str>,
    path: &Path,
) -> Result<()> {
    let seed = seed.map(parse_seed).transpose()?.flatten();
    let output = session.download(count, format, seed).await?;

    write_output(&output, path).context(format!("Failed to write {}", path.display()))?;
    println!(
        "{} Wrote {} {} record(s) to {}",
        "✓".green(),
        output.record_count(),
        format,
        path.display().to_string().cyan()
    );
    Ok(())
}

/// Report service health
async fn cmd_health(session: &Session, base_url: &str) -> Result<()> {
    let status = session.health().await?;
    if status.is_healthy() {
        println!("{} {} is {}", "✓".green(), base_url, status.status);
    } else {
        println!("{} {} reported status '{}'", "✗".red(), base_url, status.status);
    }
    Ok(())
}
