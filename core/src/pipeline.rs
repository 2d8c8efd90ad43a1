#![deny(missing_docs)]

//! # Generation Pipeline
//!
//! Drives one schema through the three stages: catalog read, signature
//! parse, wrapper emission, then persists the artifact. Each invocation is
//! a fresh, disposable pass; the [`GenerationRequest`] carries all state
//! explicitly and nothing survives between runs.
//!
//! Per-procedure failures are contained and warned about; anything fatal to
//! the schema (connection, catalog query, persist) propagates to the caller
//! so a batch driver can isolate it.

use crate::catalog::CatalogSource;
use crate::emitter::{emit_procedure_module, ARTIFACT_FILE_NAME};
use crate::error::{AppError, AppResult};
use crate::signature::parse_parameters;
use std::fs;
use std::path::{Path, PathBuf};

/// One schema's generation parameters, passed through every stage.
#[derive(Debug)]
pub struct GenerationRequest<'a> {
    /// Schema to introspect.
    pub schema: &'a str,
    /// Explicit procedure subset; empty means every procedure in the schema.
    pub procedures: &'a [String],
    /// Existing, writable directory receiving the artifact.
    pub out_dir: &'a Path,
}

/// Outcome of a completed schema pass.
#[derive(Debug)]
pub struct GenerationReport {
    /// Schema that was processed.
    pub schema: String,
    /// Number of procedures emitted.
    pub generated: usize,
    /// Number of requested procedures skipped because their catalog lookup
    /// failed.
    pub skipped: usize,
    /// Path of the written artifact.
    pub out_file: PathBuf,
}

/// Runs the full pipeline for one schema and writes `procedures.rs` into
/// the request's output directory, overwriting any prior artifact.
pub fn run<S: CatalogSource>(
    source: &mut S,
    request: &GenerationRequest<'_>,
) -> AppResult<GenerationReport> {
    // 1. Catalog read.
    let mut skipped = 0;
    let mut procedures = if request.procedures.is_empty() {
        source.list_procedures(request.schema)?
    } else {
        let mut selected = Vec::with_capacity(request.procedures.len());
        for name in request.procedures {
            match source.get_procedure(request.schema, name) {
                Ok(procedure) => selected.push(procedure),
                Err(err) => {
                    eprintln!("Warning: skipping procedure `{}`: {}", name, err);
                    skipped += 1;
                }
            }
        }
        selected
    };

    // 2. Signature parse.
    for procedure in &mut procedures {
        if procedure.definition.is_empty() {
            eprintln!(
                "Warning: catalog withheld the definition of `{}`; emitting zero-parameter wrappers",
                procedure.name
            );
        }
        procedure.parameters = parse_parameters(&procedure.definition);
        println!(
            "Found procedure `{}` ({} parameters)",
            procedure.name,
            procedure.parameters.len()
        );
    }

    // 3. Emit.
    let code = emit_procedure_module(request.schema, &procedures);

    // 4. Persist: whole-file overwrite of the per-schema artifact.
    let out_file = request.out_dir.join(ARTIFACT_FILE_NAME);
    fs::write(&out_file, code)
        .map_err(|e| AppError::Persist(format!("failed to write {:?}: {}", out_file, e)))?;

    Ok(GenerationReport {
        schema: request.schema.to_string(),
        generated: procedures.len(),
        skipped,
        out_file,
    })
}
