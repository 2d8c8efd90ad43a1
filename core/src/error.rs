//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// The server could not be reached or refused authentication.
    /// Fatal for the schema being processed; other schemas in a batch continue.
    #[from(ignore)]
    #[display("Connection Error: {_0}")]
    Connection(String),

    /// A catalog read failed (malformed query, permission denial).
    #[from(ignore)]
    #[display("Catalog Error: {_0}")]
    Catalog(String),

    /// A point lookup matched no catalog row.
    #[from(ignore)]
    #[display("procedure `{name}` not found in schema `{schema}`")]
    NotFound {
        /// Schema the lookup ran against.
        schema: String,
        /// Requested procedure name.
        name: String,
    },

    /// The generated artifact could not be written to storage.
    #[from(ignore)]
    #[display("Persist Error: {_0}")]
    Persist(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
