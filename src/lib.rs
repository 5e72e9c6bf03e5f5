//! prisma-mapper library
//!
//! This crate rewrites Prisma schemas so that models and fields declared in
//! snake_case are exposed as PascalCase models and camelCase fields, while
//! `@map`/`@@map` directives keep the original database names.
//!
//! The rewrite itself is a pure function over the schema text; see
//! [`rewrite_schema`]. File handling (backup plus atomic replace) lives in
//! [`apply`].

#![deny(warnings)]
#![deny(missing_docs)]

pub mod apply;
pub mod naming;
pub mod options;
pub mod rewrite;
pub mod types;

use std::path::PathBuf;
use thiserror::Error;

pub use apply::{apply_to_file, ApplyOptions, ApplyOutcome};
pub use options::{MapPlacement, RewriteOptions};
pub use rewrite::report::RewriteReport;
pub use rewrite::Rewrite;

/// Errors that can occur while applying a rewrite to a schema file
#[derive(Error, Debug)]
pub enum MapperError {
    /// Failed to read the schema file
    #[error("Failed to read schema {}: {}", .path.display(), .source)]
    Read {
        /// Schema path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Failed to write the backup copy
    #[error("Failed to write backup {}: {}", .path.display(), .source)]
    Backup {
        /// Backup path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Failed to write the rewritten schema to a temporary file
    #[error("Failed to write schema {}: {}", .path.display(), .source)]
    Write {
        /// Schema path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Failed to move the temporary file over the schema
    #[error("Failed to replace schema {}: {}", .path.display(), .source)]
    Persist {
        /// Schema path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

/// Rewrite a schema with the default options
///
/// This is the main entry point. It never fails: lines that do not match a
/// recognised shape are passed through unchanged.
pub fn rewrite_schema(input: &str) -> String {
    rewrite::rewrite(input, &RewriteOptions::default()).text
}

/// Rewrite a schema and report what changed
pub fn rewrite_schema_with(input: &str, options: &RewriteOptions) -> Rewrite {
    rewrite::rewrite(input, options)
}
