use anyhow::Result;
use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use k82::{eyeball, search, self_checks, SearchConfig};
use tracing::{warn, Level};

/// Finds numbers written with only 0 and 1 in every base from 2 up to a cap.
#[derive(Parser, Debug)]
#[command(name = "k82")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Run the built-in self-checks.
    #[arg(short, long, conflicts_with = "eyeball")]
    test: bool,
    /// Print dumps and conversions for inspection.
    #[arg(short, long)]
    eyeball: bool,
    /// Highest base hits have to be written in with only 0 and 1.
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(3..=16))]
    base_cap: u32,
    /// Stop once the enumerated bit pattern needs this many bytes.
    #[arg(long, default_value_t = 4)]
    max_bytes: usize,
    /// Number of precomputed powers of the base cap.
    #[arg(long, default_value_t = 40)]
    table_size: usize,
    /// Log more (repeatable).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let (cli, rejected) = match Cli::try_parse() {
        Ok(cli) => (cli, None),
        Err(e) if matches!(
            e.kind(),
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        ) => e.exit(),
        // anything unrecognised falls back to a default search
        Err(e) => (Cli::parse_from(["k82"]), Some(e)),
    };
    init_tracing(cli.verbose);
    if let Some(e) = rejected {
        warn!(kind = %e.kind(), "ignoring arguments, running the default search");
    }

    if cli.test {
        self_checks()?;
        println!("Tests OK");
    } else if cli.eyeball {
        print!("{}", eyeball()?);
    } else {
        let config = SearchConfig {
            base_cap: cli.base_cap,
            max_bytes: cli.max_bytes,
            table_size: cli.table_size,
        };
        search(&config, |n| println!("covers all bases from 2 to {}: {}", config.base_cap, n))?;
    }
    Ok(())
}
