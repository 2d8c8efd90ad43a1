#![deny(missing_docs)]

//! # Models Command
//!
//! Generates row-mapped entity structs for the configured databases by
//! delegating to the external ORM generator. This command only prepares the
//! output directory and the delegate invocation; everything about the
//! emitted entities is the delegate's business.

use crate::config::Config;
use crate::generator::{generate_table_models, CommandExecutor};
use procgen_core::{AppError, AppResult};
use std::fs;
use std::path::PathBuf;

/// Arguments for the models command.
#[derive(clap::Args, Debug, Clone)]
pub struct ModelsArgs {
    /// Database name from the config, or `all`.
    #[clap(default_value = "all")]
    pub database: String,

    /// Path to the YAML config; environment variables are used when the
    /// file does not exist.
    #[clap(long, default_value = "databases.yml")]
    pub config: PathBuf,
}

/// Executes entity generation for the selected databases.
///
/// # Arguments
///
/// * `args` - Command arguments.
/// * `executor` - Command runner (use `ShellExecutor` for real execution).
pub fn execute<E: CommandExecutor>(args: &ModelsArgs, executor: &E) -> AppResult<()> {
    let config = Config::load(&args.config)?;
    let selected = config.select(&args.database)?;
    println!("Generating entities for {} database(s)...", selected.len());

    let mut failures = 0;
    for database in &selected {
        println!(
            "Generating `{}` entities into {:?}...",
            database.name, database.out_path
        );

        if let Err(err) = fs::create_dir_all(&database.out_path) {
            eprintln!(
                "Warning: database `{}` failed: cannot create {:?}: {}",
                database.name, database.out_path, err
            );
            failures += 1;
            continue;
        }

        if let Err(err) = generate_table_models(database, &config.models, executor) {
            eprintln!("Warning: database `{}` failed: {}", database.name, err);
            failures += 1;
            continue;
        }

        println!("Database `{}` entities generated.", database.name);
    }

    if failures > 0 && failures == selected.len() {
        return Err(AppError::General(
            "every selected database failed entity generation".into(),
        ));
    }
    if failures > 0 {
        println!(
            "Completed with {} of {} database(s) failed.",
            failures,
            selected.len()
        );
    }
    Ok(())
}
