//! Gift recommendation CLI.
//!
//! Usage:
//!     giftwise ask "Tea Leaves"
//!     giftwise --data data/characters.csv ask Amethyst --format json
//!     giftwise lookup Abigail Amethyst
//!     giftwise session

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use giftwise_explain::{describe_reaction, render_report, summarize_report, ReportView};
use giftwise_model::PreferenceTable;
use giftwise_query::{parse_input, Command, QueryError};
use giftwise_recommend::{classify, Recommender};
use giftwise_source_csv::{CsvSource, CsvSourceConfig, PreferenceSource};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "giftwise")]
#[command(about = "Find out which villagers love, like or hate a gift")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Character preference dataset
    #[arg(long, default_value = "characters.csv")]
    data: PathBuf,

    /// Field delimiter of the dataset
    #[arg(long, default_value_t = ',')]
    delimiter: char,
}

#[derive(Subcommand)]
enum Commands {
    /// Report every character's reaction to a gift
    Ask {
        /// Gift name as it appears in the game
        gift: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Check how one character reacts to a gift
    Lookup {
        /// Exact character name
        character: String,

        /// Gift name
        gift: String,
    },

    /// Ask about gifts interactively until "exit"
    Session,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    // Reports go to stdout, logs to stderr.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("giftwise=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let delimiter = u8::try_from(cli.delimiter)
        .ok()
        .filter(u8::is_ascii)
        .with_context(|| {
            format!("Delimiter must be a single ASCII character, got {:?}", cli.delimiter)
        })?;

    let source = CsvSource::new(CsvSourceConfig {
        path: cli.data.clone(),
        delimiter,
    });
    let table = source
        .load()
        .with_context(|| format!("Could not load character data from {}", cli.data.display()))?;

    match cli.command {
        Commands::Ask { gift, format } => run_ask(&table, &gift, format)?,
        Commands::Lookup { character, gift } => run_lookup(&table, &character, &gift)?,
        Commands::Session => run_session(&table)?,
    }

    Ok(())
}

fn run_ask(table: &PreferenceTable, gift: &str, format: OutputFormat) -> Result<()> {
    if gift.trim().is_empty() {
        bail!(QueryError::EmptyQuery);
    }

    let report = Recommender::new(table).recommend(gift);
    match format {
        OutputFormat::Text => {
            print!("{}", render_report(&report));
            if !report.is_empty() {
                println!("\n{}", summarize_report(&report));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&ReportView::from_report(&report))?);
        }
    }

    Ok(())
}

fn run_lookup(table: &PreferenceTable, character: &str, gift: &str) -> Result<()> {
    let tier = classify(table, character, gift)?;
    if let Some(found) = table.get(character) {
        println!("{}", describe_reaction(found, tier, gift));
    }
    Ok(())
}

fn run_session(table: &PreferenceTable) -> Result<()> {
    let recommender = Recommender::new(table);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("{}", "=".repeat(50));
    println!("{:^50}", "Gift Recommendations");
    println!("{}", "=".repeat(50));
    println!("\nType a gift name exactly as it appears in the game.");
    println!("Examples: 'Daffodil', 'Tea Leaves', 'Pufferfish'. Type 'exit' to quit.");

    let mut lines = stdin.lock().lines();
    loop {
        print!("\nGift: ");
        stdout.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read from stdin")?;

        match parse_input(&line) {
            Ok(Command::Exit) => break,
            Ok(Command::Gift(query)) => {
                let report = recommender.recommend(&query.text);
                print!("\n{}", render_report(&report));
            }
            Err(QueryError::EmptyQuery) => {
                println!("Please type a gift name.");
            }
        }
    }

    tracing::debug!("Session ended");
    Ok(())
}
