//! CLI administration tool for snaplink.
//!
//! Works directly on a file-backed store, without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List all links
//! cargo run --bin admin -- list
//!
//! # Shorten a URL
//! cargo run --bin admin -- shorten example.com/some/page
//!
//! # Delete a link
//! cargo run --bin admin -- delete Uakgb_J5
//!
//! # Show totals
//! cargo run --bin admin -- stats
//! ```
//!
//! # Environment Variables
//!
//! - `STORAGE_FILE`: snapshot path (default: `data/urls.json`), overridden by `--file`
//!
//! The server keeps its own in-memory copy of the snapshot, so run mutating
//! commands while the server is stopped.

use snaplink::application::services::{LinkService, ShortenService};
use snaplink::domain::repositories::UrlRepository;
use snaplink::infrastructure::persistence::FileUrlRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// CLI tool for managing snaplink data.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Snapshot file to operate on
    #[arg(short, long, env = "STORAGE_FILE", default_value = "data/urls.json")]
    file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all links, newest first
    List,

    /// Shorten a URL
    Shorten {
        /// URL to shorten (https:// is added when no scheme is given)
        url: String,
    },

    /// Delete a link
    Delete {
        /// Short code to delete
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show link and click totals
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    ensure_snapshot_exists(&cli.command, &cli.file)?;

    let repository: Arc<dyn UrlRepository> = Arc::new(
        FileUrlRepository::open(&cli.file)
            .await
            .with_context(|| format!("Failed to open {}", cli.file.display()))?,
    );

    match cli.command {
        Commands::List => list_links(LinkService::new(repository)).await?,
        Commands::Shorten { url } => shorten_url(ShortenService::new(repository), &url).await?,
        Commands::Delete { code, yes } => {
            delete_link(LinkService::new(repository), &code, yes).await?
        }
        Commands::Stats => show_stats(LinkService::new(repository)).await?,
    }

    Ok(())
}

/// Refuses to run read-only commands against a snapshot that does not exist.
///
/// Opening a missing file creates it, which would hide a mistyped `--file`.
fn ensure_snapshot_exists(command: &Commands, path: &Path) -> Result<()> {
    let read_only = matches!(command, Commands::List | Commands::Stats);

    if read_only && !path.exists() {
        anyhow::bail!(
            "Snapshot file {} does not exist (check --file or STORAGE_FILE)",
            path.display()
        );
    }

    Ok(())
}

/// Prints all links as a table.
///
/// # Output Format
///
/// ```text
/// Links
///
///   Code       Clicks   Created            URL
///   ──────────────────────────────────────────────────────────────────────
///   Uakgb_J5   3        2025-01-15 10:30   https://example.com/page
/// ```
async fn list_links(service: LinkService<dyn UrlRepository>) -> Result<()> {
    println!("{}", "Links".bright_blue().bold());
    println!();

    let links = service
        .list_links()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        println!(
            "  Create one with: {} admin shorten <URL>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<10} {:<8} {:<18} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(70).bright_black());

    for link in &links {
        println!(
            "  {:<10} {:<8} {:<18} {}",
            link.short_code.cyan(),
            link.clicks.to_string().bright_green(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.original_url
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

async fn shorten_url(service: ShortenService<dyn UrlRepository>, url: &str) -> Result<()> {
    let record = service
        .shorten(url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to shorten URL: {}", e))?;

    println!("{}", "Link created".green().bold());
    println!();
    println!("  Code: {}", record.short_code.bright_yellow().bold());
    println!("  URL:  {}", record.original_url.cyan());
    println!("  ID:   {}", record.id.bright_black());
    println!();

    Ok(())
}

/// Deletes a link after showing it and asking for confirmation.
async fn delete_link(
    service: LinkService<dyn UrlRepository>,
    code: &str,
    skip_confirm: bool,
) -> Result<()> {
    let link = match service.get_link(code).await {
        Ok(link) => link,
        Err(snaplink::AppError::NotFound { .. }) => {
            println!("{}", format!("No link with code '{code}'").yellow());
            return Ok(());
        }
        Err(e) => return Err(anyhow::anyhow!("Failed to look up link: {}", e)),
    };

    println!("  Code:   {}", link.short_code.cyan());
    println!("  URL:    {}", link.original_url);
    println!("  Clicks: {}", link.clicks.to_string().bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let deleted = service
        .delete_link(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    if deleted {
        println!("{}", "Link deleted".green().bold());
    } else {
        println!("{}", "Link was already gone".yellow());
    }

    Ok(())
}

/// Displays link and click totals.
async fn show_stats(service: LinkService<dyn UrlRepository>) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let links = service
        .list_links()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;
    let clicks: u64 = links.iter().map(|link| link.clicks).sum();

    println!(
        "  Links:  {}",
        links.len().to_string().bright_green().bold()
    );
    println!("  Clicks: {}", clicks.to_string().bright_green().bold());
    println!();

    Ok(())
}
