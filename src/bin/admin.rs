//! CLI administration tool for linkfold.
//!
//! Provides database checks, direct short-code lookups and base62 helpers
//! without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Show mapping counts
//! cargo run --bin admin -- stats
//!
//! # Look up the long URL behind a short code
//! cargo run --bin admin -- lookup 4c92
//!
//! # Base62 conversions
//! cargo run --bin admin -- encode 125
//! cargo run --bin admin -- decode 21
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required for `db`, `stats` and `lookup`): PostgreSQL connection string

use linkfold::config::mask_connection_string;
use linkfold::domain::repositories::UrlRepository;
use linkfold::infrastructure::persistence::PgUrlRepository;
use linkfold::utils::base62;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing linkfold.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Show mapping counts
    Stats,

    /// Print the long URL a short code points to
    Lookup {
        /// Short code to resolve
        short_code: String,
    },

    /// Encode a number as base62
    Encode {
        value: u64,
    },

    /// Decode a base62 string to a number
    Decode {
        code: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Encode { value } => handle_encode(value),
        Commands::Decode { code } => handle_decode(&code)?,
        Commands::Db { action } => handle_db_action(action, &connect().await?).await?,
        Commands::Stats => handle_stats(&connect().await?).await?,
        Commands::Lookup { short_code } => handle_lookup(connect().await?, &short_code).await?,
    }

    Ok(())
}

async fn connect() -> Result<PgPool> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    PgPool::connect(&database_url).await.with_context(|| {
        format!(
            "Failed to connect to database at {}",
            mask_connection_string(&database_url)
        )
    })
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}

/// Displays mapping counts.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let mappings: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
        .fetch_one(pool)
        .await?;

    let distinct_urls: i64 = sqlx::query_scalar("SELECT COUNT(DISTINCT long_url) FROM urls")
        .fetch_one(pool)
        .await?;

    println!(
        "  Mappings:      {}",
        mappings.to_string().bright_green().bold()
    );
    println!(
        "  Distinct URLs: {}",
        distinct_urls.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Looks a short code up directly in the durable store, bypassing the cache.
async fn handle_lookup(pool: PgPool, short_code: &str) -> Result<()> {
    let repo = PgUrlRepository::new(Arc::new(pool));

    let long_url = repo
        .find_long_url_by_code(short_code)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    match long_url {
        Some(url) => {
            println!("  {} → {}", short_code.cyan(), url.bright_white());
        }
        None => {
            println!("{}", format!("⚠️  No mapping for '{short_code}'").yellow());
        }
    }

    Ok(())
}

fn handle_encode(value: u64) {
    println!("{}", base62::encode(value).bright_yellow().bold());
}

fn handle_decode(code: &str) -> Result<()> {
    let value = base62::decode(code).with_context(|| format!("Cannot decode '{code}'"))?;
    println!("{}", value.to_string().bright_yellow().bold());
    Ok(())
}
