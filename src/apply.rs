//! Applying a rewrite to a schema file on disk
//!
//! The file is read in full, rewritten in memory, backed up verbatim and
//! then replaced atomically through a temporary file in the same directory.
//! Nothing is written unless the rewrite produced different text.

use crate::rewrite::report::RewriteReport;
use crate::{rewrite_schema_with, MapperError, RewriteOptions};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

/// Schema location used when none is given
pub const DEFAULT_SCHEMA_PATH: &str = "prisma/schema.prisma";

/// Suffix appended to the schema path for the backup copy
pub const DEFAULT_BACKUP_SUFFIX: &str = ".backup-map";

/// How a schema file is rewritten
#[derive(Debug, Clone)]
pub struct ApplyOptions {
    /// Options for the rewrite itself
    pub rewrite: RewriteOptions,
    /// Backup suffix, or None to skip the backup
    pub backup_suffix: Option<String>,
    /// Compute the rewrite without touching the filesystem
    pub dry_run: bool,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            rewrite: RewriteOptions::default(),
            backup_suffix: Some(DEFAULT_BACKUP_SUFFIX.to_string()),
            dry_run: false,
        }
    }
}

/// Result of applying a rewrite to a file
#[derive(Debug, Clone)]
pub struct ApplyOutcome {
    /// The schema path
    pub path: PathBuf,
    /// Where the backup was written, if it was
    pub backup: Option<PathBuf>,
    /// Whether the rewritten text differs from the original
    pub changed: bool,
    /// Whether the schema file was replaced
    pub written: bool,
    /// What the rewrite changed
    pub report: RewriteReport,
}

/// Read a schema file in full
pub fn read_schema(path: &Path) -> Result<String, MapperError> {
    fs::read_to_string(path).map_err(|source| MapperError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Path of the backup copy for `path`
pub fn backup_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

/// Rewrite the schema file at `path` in place
pub fn apply_to_file(path: &Path, options: &ApplyOptions) -> Result<ApplyOutcome, MapperError> {
    let original = read_schema(path)?;
    let rewrite = rewrite_schema_with(&original, &options.rewrite);
    let changed = rewrite.text != original;

    let mut outcome = ApplyOutcome {
        path: path.to_path_buf(),
        backup: None,
        changed,
        written: false,
        report: rewrite.report,
    };

    if !changed || options.dry_run {
        return Ok(outcome);
    }

    if let Some(suffix) = &options.backup_suffix {
        let backup = backup_path(path, suffix);
        fs::write(&backup, &original).map_err(|source| MapperError::Backup {
            path: backup.clone(),
            source,
        })?;
        info!(path = %backup.display(), "wrote backup");
        outcome.backup = Some(backup);
    }

    write_atomic(path, &rewrite.text)?;
    info!(path = %path.display(), changes = outcome.report.total(), "wrote schema");
    outcome.written = true;

    Ok(outcome)
}

/// Replace `path` with `contents` without leaving a partial file behind
fn write_atomic(path: &Path, contents: &str) -> Result<(), MapperError> {
    let write_err = |source: std::io::Error| MapperError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(contents.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;

    let permissions = fs::metadata(path).map_err(write_err)?.permissions();
    tmp.as_file().set_permissions(permissions).map_err(write_err)?;

    tmp.persist(path).map_err(|e| MapperError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backup_path() {
        let path = Path::new("prisma/schema.prisma");
        assert_eq!(
            backup_path(path, DEFAULT_BACKUP_SUFFIX),
            PathBuf::from("prisma/schema.prisma.backup-map")
        );
    }

    #[test]
    fn test_default_options() {
        let opts = ApplyOptions::default();
        assert_eq!(opts.backup_suffix.as_deref(), Some(".backup-map"));
        assert!(!opts.dry_run);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = apply_to_file(&dir.path().join("missing.prisma"), &ApplyOptions::default())
            .unwrap_err();
        assert!(matches!(err, MapperError::Read { .. }));
        assert!(err.to_string().contains("missing.prisma"));
    }
}
