//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for
//! `treecompose`. It uses the `thiserror` library to create a single `Error`
//! enum covering all anticipated failure modes, providing clear and
//! descriptive error messages.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum representing all possible errors. Each
//!   variant corresponds to a specific failure and includes contextual
//!   information to aid in debugging.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`, used
//!   throughout the library to simplify function signatures.
//!
//! Composition and rendering never fail; all errors in this taxonomy belong
//! to the file pipeline and fall into three groups:
//!
//! - *Validation errors*, detected before any filesystem mutation: an
//!   invalid root location, duplicate sibling names within a directory
//!   level, or an entry name that is not a single non-empty path component.
//! - *I/O errors*, detected during mutation and surfaced verbatim from the
//!   underlying platform call, plus the existing-destination conflict when
//!   overwriting was not requested.
//! - *Cancellation*, a distinct terminal condition rather than a generic
//!   error, propagated when a cooperative cancellation check fires.
//!
//! JSON interchange of [`Entry`](crate::entry::Entry) values adds one more
//! wrapped variant for `serde_json` failures.

use thiserror::Error;

/// Main error type for treecompose operations
#[derive(Error, Debug)]
pub enum Error {
    /// The write root does not exist or is not a directory.
    ///
    /// Detected during validation, before any filesystem mutation begins.
    #[error("Not a directory: {path}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    NotADirectory {
        path: String,
        /// Optional hint for how to resolve the problem
        hint: Option<String>,
    },

    /// Two sibling entries share the same name within one directory level.
    ///
    /// Detected during validation of the entire tree, before any filesystem
    /// mutation begins. `parent` is the directory that holds the clashing
    /// siblings.
    #[error("Duplicate entry name '{name}' in directory '{parent}'")]
    DuplicateName { name: String, parent: String },

    /// An entry name is empty, a dot component, or contains a path
    /// separator, so it would not resolve to a child of its parent
    /// directory.
    ///
    /// Detected during validation of the entire tree, before any filesystem
    /// mutation begins.
    #[error("Invalid entry name '{name}' in directory '{parent}'\n  hint: names must be single, non-empty path components")]
    InvalidName { name: String, parent: String },

    /// A file or directory already exists at a target path and overwriting
    /// was not requested.
    #[error("Destination already exists: {path}\n  hint: pass overwrite to replace existing entries")]
    AlreadyExists { path: String },

    /// The write operation was cancelled cooperatively.
    ///
    /// Cancellation is checked after each discrete filesystem mutation; a
    /// cancelled sibling task also surfaces as this variant.
    #[error("Write cancelled")]
    Cancelled,

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON serialization error, wrapped from `serde_json::Error`.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
