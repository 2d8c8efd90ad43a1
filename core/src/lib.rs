#![deny(missing_docs)]

//! # Procgen Core
//!
//! Core library for the stored-procedure wrapper generator: catalog
//! introspection, signature parsing, identifier naming, wrapper emission,
//! and the per-schema pipeline that ties them together.

/// Shared error types.
pub mod error;

/// Catalog introspection over `information_schema`.
pub mod catalog;

/// Parameter-list extraction from routine definitions.
pub mod signature;

/// Identifier case conversion.
pub mod naming;

/// Wrapper module emission.
pub mod emitter;

/// Per-schema generation pipeline.
pub mod pipeline;

pub use catalog::{
    is_system_schema, CatalogSource, MySqlCatalog, MySqlOpener, ProcedureInfo, SchemaCatalog,
    SourceOpener,
};
pub use emitter::{emit_procedure_module, ARTIFACT_FILE_NAME, GENERATED_HEADER};
pub use error::{AppError, AppResult};
pub use naming::{to_pascal_identifier, to_snake_identifier};
pub use pipeline::{GenerationReport, GenerationRequest};
pub use signature::parse_parameters;
