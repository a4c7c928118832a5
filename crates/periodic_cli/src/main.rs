//! Console front end for the element data access layer.
//!
//! # Responsibility
//! - Parse one lookup request per invocation and render its result.
//! - Reject malformed input (non-numeric numbers, unknown blocks) before
//!   any store call.
//!
//! # Invariants
//! - A failed store open aborts with a non-zero exit code.
//! - "Not found" and "store failed" print distinct messages.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use periodic_core::{
    default_log_level, init_logging, open_repository, Block, Element, ElementRepository,
    ElementStore, RepoResult, StoreConfig,
};

mod render;

#[derive(Parser, Debug)]
#[command(
    name = "periodic",
    version,
    about = "Look up elements of the periodic table reference dataset"
)]
struct Cli {
    /// TOML store configuration (host, database, auth, query_timeout_ms)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Database file; overrides the configured `database`
    #[arg(long, global = true)]
    database: Option<String>,

    /// Absolute directory for rolling log files; logging is off without it
    #[arg(long, global = true)]
    log_dir: Option<String>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Print results as JSON instead of labeled text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search by atomic number
    Number {
        #[arg(allow_negative_numbers = true)]
        atomic_number: i64,
    },
    /// Search by symbol (exact, case-sensitive)
    Symbol {
        #[arg(value_parser = parse_symbol)]
        symbol: String,
    },
    /// List elements in a block (s/p)
    Block {
        #[arg(value_parser = parse_block)]
        block: Block,
    },
    /// List elements in a period
    Period {
        #[arg(allow_negative_numbers = true)]
        period: i64,
    },
    /// List every element by atomic number
    All,
    /// Show dataset statistics
    Stats,
}

fn parse_symbol(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("symbol cannot be empty".to_string());
    }
    Ok(trimmed.to_string())
}

fn parse_block(value: &str) -> Result<Block, String> {
    Block::parse(&value.trim().to_ascii_lowercase())
        .ok_or_else(|| "Invalid block! Please enter 's' or 'p'".to_string())
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).map_err(|err| anyhow!(err))?;
    }

    let mut config = match &cli.config {
        Some(path) => StoreConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => StoreConfig::default(),
    };
    if let Some(database) = &cli.database {
        config.database = database.clone();
    }
    info!(
        "event=app_start module=cli status=ok version={} store_mode={} auth={} query_timeout_ms={}",
        env!("CARGO_PKG_VERSION"),
        if config.is_in_memory() { "memory" } else { "file" },
        config.auth.label(),
        config.query_timeout_ms
    );

    let repo = open_repository(&config)
        .with_context(|| format!("Failed to open element store `{}`", config.database))?;
    info!("event=cli_command module=cli status=start command={}", command_name(&cli.command));

    let outcome = run(&repo, &cli.command, cli.json);
    repo.store().close();

    match outcome {
        Ok(output) => {
            println!("{output}");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("Database error: {err}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run(repo: &ElementRepository<ElementStore>, command: &Command, json: bool) -> Result<String> {
    let output = match command {
        Command::Number { atomic_number } => {
            single(repo.get_by_number(*atomic_number), json)?
        }
        Command::Symbol { symbol } => single(repo.get_by_symbol(symbol), json)?,
        Command::Block { block } => {
            list(repo.get_by_block(*block), &render::block_heading(*block), json)?
        }
        Command::Period { period } => {
            list(repo.get_by_period(*period), &render::period_heading(*period), json)?
        }
        Command::All => list(repo.get_all(), "All Elements", json)?,
        Command::Stats => {
            let summary = repo.get_statistics();
            if json {
                serde_json::to_string_pretty(&summary)?
            } else {
                render::statistics(&summary)
            }
        }
    };
    Ok(output)
}

fn single(result: RepoResult<Option<Element>>, json: bool) -> Result<String> {
    let element = result?;
    if json {
        return Ok(serde_json::to_string_pretty(&element)?);
    }
    Ok(render::element_details(element.as_ref()))
}

fn list(result: RepoResult<Vec<Element>>, heading: &str, json: bool) -> Result<String> {
    let elements = result?;
    if json {
        return Ok(serde_json::to_string_pretty(&elements)?);
    }
    Ok(render::element_list(heading, &elements))
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Number { .. } => "number",
        Command::Symbol { .. } => "symbol",
        Command::Block { .. } => "block",
        Command::Period { .. } => "period",
        Command::All => "all",
        Command::Stats => "stats",
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_block, parse_symbol, Cli, Command};
    use clap::Parser;
    use periodic_core::Block;

    #[test]
    fn block_input_is_trimmed_and_case_folded() {
        assert_eq!(parse_block(" P ").unwrap(), Block::P);
        assert_eq!(parse_block("s").unwrap(), Block::S);
        assert!(parse_block("d").unwrap_err().contains("Invalid block"));
    }

    #[test]
    fn symbol_input_is_trimmed_but_not_case_folded() {
        assert_eq!(parse_symbol("  he ").unwrap(), "he");
        assert!(parse_symbol("   ").is_err());
    }

    #[test]
    fn non_numeric_atomic_number_is_rejected() {
        assert!(Cli::try_parse_from(["periodic", "number", "one"]).is_err());
    }

    #[test]
    fn negative_numbers_reach_the_lookup() {
        let cli = Cli::try_parse_from(["periodic", "number", "-3"]).unwrap();
        assert!(matches!(cli.command, Command::Number { atomic_number: -3 }));

        let cli = Cli::try_parse_from(["periodic", "period", "-1"]).unwrap();
        assert!(matches!(cli.command, Command::Period { period: -1 }));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["periodic", "period", "2", "--json", "--database", "x.db"])
            .unwrap();
        assert!(cli.json);
        assert_eq!(cli.database.as_deref(), Some("x.db"));
        assert!(matches!(cli.command, Command::Period { period: 2 }));
    }
}
