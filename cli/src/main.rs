//! Demo driver for the BOOST client.
//!
//! Logs in with the account from a `.properties` file, then runs one
//! operation and prints its result to stdout. Logs go to stderr.
//!
//! ```bash
//! boost --credentials boost.properties juggle genes.fasta codon_usage.txt \
//!     --strategy MostlyUsed --output-format GENBANK --auto-annotate
//! boost verify genes.fasta --vendor JGI
//! ```

mod credentials;

use std::path::PathBuf;

use anyhow::Context;
use boost_core::{BoostClient, FileFormat, SequenceType, Strategy, Vendor, DEFAULT_BASE_URL};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use credentials::Credentials;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "boost")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Base URL of the BOOST REST service
    #[arg(long, env = "BOOST_URL", default_value = DEFAULT_BASE_URL)]
    url: String,

    /// Properties file holding `username` and `password`
    #[arg(long, env = "BOOST_CREDENTIALS", default_value = "boost.properties")]
    credentials: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Reverse-translate protein sequences into DNA
    ReverseTranslate {
        sequences: PathBuf,
        codon_usage_table: PathBuf,
        #[arg(long, default_value = "Balanced")]
        strategy: Strategy,
        #[arg(long, default_value = "FASTA")]
        output_format: FileFormat,
    },

    /// Replace codons of DNA sequences
    Juggle {
        sequences: PathBuf,
        codon_usage_table: PathBuf,
        #[arg(long, default_value = "Balanced")]
        strategy: Strategy,
        #[arg(long, default_value = "FASTA")]
        output_format: FileFormat,
        /// Let the server annotate coding regions
        #[arg(long)]
        auto_annotate: bool,
    },

    /// Check sequences against a vendor's synthesis constraints
    Verify {
        sequences: PathBuf,
        #[arg(long)]
        vendor: Vendor,
        #[arg(long, default_value = "DNA")]
        sequence_type: SequenceType,
    },

    /// Verify, then modify coding regions to remove violations
    Polish {
        sequences: PathBuf,
        codon_usage_table: PathBuf,
        #[arg(long)]
        vendor: Vendor,
        #[arg(long, default_value = "Balanced")]
        strategy: Strategy,
        #[arg(long, default_value = "DNA")]
        sequence_type: SequenceType,
        /// Treat every sequence as coding when the format has no annotations
        #[arg(long)]
        coding_sequences: bool,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let creds = Credentials::load(&cli.credentials)?;
    let mut client = BoostClient::new(&cli.url);
    client
        .login(&creds.username, &creds.password)
        .with_context(|| format!("login to {} failed", cli.url))?;

    match cli.command {
        Commands::ReverseTranslate {
            sequences,
            codon_usage_table,
            strategy,
            output_format,
        } => {
            let output =
                client.reverse_translate(&sequences, strategy, &codon_usage_table, output_format)?;
            println!("{output}");
        }
        Commands::Juggle {
            sequences,
            codon_usage_table,
            strategy,
            output_format,
            auto_annotate,
        } => {
            let output = client.codon_juggle(
                &sequences,
                auto_annotate,
                strategy,
                &codon_usage_table,
                output_format,
            )?;
            println!("{output}");
        }
        Commands::Verify {
            sequences,
            vendor,
            sequence_type,
        } => {
            let report = client.verify(&sequences, sequence_type, vendor)?;
            for (file, sequences) in &report {
                for (id, violations) in sequences {
                    println!("{file}\t{id}\t{}", violations.join("; "));
                }
            }
            info!(files = report.len(), "verify finished");
        }
        Commands::Polish {
            sequences,
            codon_usage_table,
            vendor,
            strategy,
            sequence_type,
            coding_sequences,
        } => {
            client.polish(
                &sequences,
                sequence_type,
                coding_sequences,
                vendor,
                strategy,
                &codon_usage_table,
            )?;
            info!("polish request accepted");
        }
    }

    Ok(())
}
