#![deny(missing_docs)]

//! # Procgen CLI
//!
//! Command Line Interface for the stored-procedure wrapper generator.
//!
//! Supported Commands:
//! - `scan`: Reports every schema's tables and procedures and prints
//!   ready-to-use configuration.
//! - `models`: Generates row-mapped entities by delegating to the external
//!   ORM generator.
//! - `procedures`: Pipeline catalog -> signatures -> wrapper module, one
//!   `procedures.rs` per schema.

use clap::{Parser, Subcommand};
use procgen_core::{AppResult, MySqlOpener};

use crate::generator::ShellExecutor;

mod config;
mod error;
mod generator;
mod models;
mod procedures;
mod scan;

#[derive(Parser, Debug)]
#[clap(author, version, about = "MySQL stored-procedure wrapper generator")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan a server and report schemas, tables and stored procedures.
    Scan(scan::ScanArgs),
    /// Generate entity structs via the external ORM generator.
    Models(models::ModelsArgs),
    /// Generate stored-procedure wrapper modules.
    Procedures(procedures::ProceduresArgs),
}

fn main() -> AppResult<()> {
    // Pick up .env before clap resolves env-backed arguments.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Scan(args) => {
            // Injecting the live catalog opener
            scan::execute(args, &MySqlOpener)?;
        }
        Commands::Models(args) => {
            // Injecting the real subprocess executor
            let executor = ShellExecutor;
            models::execute(args, &executor)?;
        }
        Commands::Procedures(args) => {
            procedures::execute(args, &MySqlOpener)?;
        }
    }

    Ok(())
}
