#![deny(missing_docs)]

//! # Procedures Command
//!
//! Runs the wrapper-generation pipeline for the selected databases: open
//! the catalog, list or look up procedures, parse signatures, emit the
//! wrapper module, persist it as `procedures.rs` under the configured
//! output directory.
//!
//! Databases are processed sequentially and in isolation: a failing schema
//! is reported and the batch moves on. The command itself fails only when
//! every selected database failed.

use crate::config::{Config, DatabaseConfig};
use procgen_core::pipeline::{self, GenerationRequest};
use procgen_core::{AppError, AppResult, GenerationReport, SourceOpener};
use std::fs;
use std::path::PathBuf;

/// Arguments for the procedures command.
#[derive(clap::Args, Debug, Clone)]
pub struct ProceduresArgs {
    /// Database name from the config, or `all`.
    #[clap(default_value = "all")]
    pub database: String,

    /// Path to the YAML config; environment variables are used when the
    /// file does not exist.
    #[clap(long, default_value = "databases.yml")]
    pub config: PathBuf,
}

/// Executes wrapper generation for the selected databases.
///
/// # Arguments
///
/// * `args` - Command arguments.
/// * `opener` - Catalog opener (use `MySqlOpener` for a live server).
pub fn execute<O: SourceOpener>(args: &ProceduresArgs, opener: &O) -> AppResult<()> {
    let config = Config::load(&args.config)?;
    let selected = config.select(&args.database)?;
    println!(
        "Generating procedure wrappers for {} database(s)...",
        selected.len()
    );

    let mut failures = 0;
    for database in &selected {
        println!("Scanning `{}` for stored procedures...", database.name);
        match generate_for_database(database, opener) {
            Ok(report) => {
                println!(
                    "Database `{}`: {} wrapper pair(s) written to {:?}{}",
                    report.schema,
                    report.generated,
                    report.out_file,
                    if report.skipped > 0 {
                        format!(" ({} requested procedure(s) skipped)", report.skipped)
                    } else {
                        String::new()
                    }
                );
            }
            Err(err) => {
                eprintln!("Warning: database `{}` failed: {}", database.name, err);
                failures += 1;
            }
        }
    }

    if failures > 0 && failures == selected.len() {
        return Err(AppError::General(
            "every selected database failed wrapper generation".into(),
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

/// Runs one database's pipeline end to end.
fn generate_for_database<O: SourceOpener>(
    database: &DatabaseConfig,
    opener: &O,
) -> AppResult<GenerationReport> {
    let mut source = opener.open(&database.dsn)?;

    // The core assumes the output directory exists; creating it is this
    // command's job.
    fs::create_dir_all(&database.out_path).map_err(|e| {
        AppError::Persist(format!(
            "cannot create output directory {:?}: {}",
            database.out_path, e
        ))
    })?;

    let request = GenerationRequest {
        schema: &database.name,
        procedures: &database.procedures,
        out_dir: &database.out_path,
    };
    pipeline::run(&mut source, &request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use procgen_core::{CatalogSource, ProcedureInfo};

    /// Opener backed by a fixed per-schema procedure set; DSNs containing
    /// `refused` fail to open.
    struct FakeOpener;

    struct FakeSource {
        schema: String,
    }

    impl SourceOpener for FakeOpener {
        type Source = FakeSource;

        fn open(&self, dsn: &str) -> AppResult<Self::Source> {
            if dsn.contains("refused") {
                return Err(AppError::Connection(format!("cannot reach `{}`", dsn)));
            }
            let schema = dsn.rsplit('/').next().unwrap_or_default().to_string();
            Ok(FakeSource { schema })
        }
    }

    impl CatalogSource for FakeSource {
        fn list_schemas(&mut self) -> AppResult<Vec<String>> {
            Ok(vec![self.schema.clone()])
        }

        fn list_tables(&mut self, _schema: &str) -> AppResult<Vec<String>> {
            Ok(Vec::new())
        }

        fn list_procedures(&mut self, _schema: &str) -> AppResult<Vec<ProcedureInfo>> {
            Ok(vec![ProcedureInfo {
                name: "add_user".into(),
                parameters: Vec::new(),
                definition: "CREATE PROCEDURE add_user(IN p_name VARCHAR(50), IN p_age INT)"
                    .into(),
            }])
        }

        fn get_procedure(&mut self, schema: &str, name: &str) -> AppResult<ProcedureInfo> {
            Err(AppError::NotFound {
                schema: schema.to_string(),
                name: name.to_string(),
            })
        }
    }

    fn write_config(dir: &std::path::Path, first_dsn: &str) -> PathBuf {
        let path = dir.join("databases.yml");
        let yaml = format!(
            r#"
databases:
  - name: "fish"
    dsn: "{first_dsn}"
    out_path: "{out}/fish"
  - name: "scratch"
    dsn: "mysql://localhost/scratch"
    out_path: "{out}/scratch"
"#,
            out = dir.display()
        );
        std::fs::write(&path, yaml).unwrap();
        path
    }

    #[test]
    fn test_writes_artifact_per_database() {
        let dir = tempfile::tempdir().unwrap();
        let args = ProceduresArgs {
            database: "all".into(),
            config: write_config(dir.path(), "mysql://localhost/fish"),
        };

        execute(&args, &FakeOpener).unwrap();

        let fish = std::fs::read_to_string(dir.path().join("fish/procedures.rs")).unwrap();
        assert!(fish.contains(
            "pub fn add_user<C: Queryable>(&self, conn: &mut C, p_name: Value, p_age: Value)"
        ));
        assert!(dir.path().join("scratch/procedures.rs").exists());
    }

    #[test]
    fn test_failing_schema_does_not_abort_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let args = ProceduresArgs {
            database: "all".into(),
            config: write_config(dir.path(), "mysql://refused/fish"),
        };

        // fish cannot connect; scratch still produces a valid artifact.
        execute(&args, &FakeOpener).unwrap();

        assert!(!dir.path().join("fish/procedures.rs").exists());
        assert!(dir.path().join("scratch/procedures.rs").exists());
    }

    #[test]
    fn test_all_schemas_failing_fails_the_command() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("databases.yml");
        std::fs::write(
            &path,
            format!(
                r#"
databases:
  - name: "fish"
    dsn: "mysql://refused/fish"
    out_path: "{out}/fish"
"#,
                out = dir.path().display()
            ),
        )
        .unwrap();

        let args = ProceduresArgs {
            database: "all".into(),
            config: path,
        };
        let err = execute(&args, &FakeOpener).unwrap_err();
        assert!(format!("{}", err).contains("every selected database failed"));
    }

    #[test]
    fn test_single_database_selection() {
        let dir = tempfile::tempdir().unwrap();
        let args = ProceduresArgs {
            database: "scratch".into(),
            config: write_config(dir.path(), "mysql://localhost/fish"),
        };

        execute(&args, &FakeOpener).unwrap();

        assert!(!dir.path().join("fish/procedures.rs").exists());
        assert!(dir.path().join("scratch/procedures.rs").exists());
    }
}
