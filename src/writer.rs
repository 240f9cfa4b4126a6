//! # Disk Writing
//!
//! The final, side-effecting stage of the file pipeline. A [`DiskWriter`]
//! consumes a serialized entry list and a root location, validates the
//! entire tree before the first byte is written, and then materializes each
//! entry on disk.
//!
//! ## Process
//!
//! 1.  **Validate**: The root must be an existing directory, every entry
//!     name must be a single non-empty path component, and sibling names
//!     must be pairwise distinct at every directory level. Validation scans
//!     the whole tree up front and fails fast, never after a partial write.
//!
//! 2.  **Materialize**: Each entry goes through `pending → (delete existing
//!     conflict when overwriting) → create directory / write file → done`.
//!     Directories recurse into their children under an extended working
//!     path, carried as scoped state down the traversal.
//!
//! 3.  **Fan out**: Sibling entries are written concurrently, one task per
//!     sibling, and a directory completes only once all of its children
//!     have completed (structured concurrency: no task escapes its parent's
//!     scope). The first child error aborts all in-flight siblings and
//!     propagates; already-committed sibling writes are not rolled back.
//!
//! Cancellation is cooperative: it is checked after each discrete
//! filesystem mutation and surfaces as [`Error::Cancelled`]. The returned
//! path list preserves declaration order (parents before children), not
//! completion order.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::entry::{Entry, Payload};
use crate::error::{Error, Result};
use crate::permissions::Permissions;

/// Writes a serialized entry list to a root directory.
#[derive(Debug, Clone)]
pub struct DiskWriter {
    root: PathBuf,
    overwrite: bool,
    cancel: CancellationToken,
}

impl DiskWriter {
    /// Create a writer targeting `root`, which must be an existing
    /// directory at write time. Overwriting is off by default.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            overwrite: false,
            cancel: CancellationToken::new(),
        }
    }

    /// Delete conflicting pre-existing files and directories instead of
    /// failing with [`Error::AlreadyExists`].
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Share an externally-owned cancellation token.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// A handle to this writer's cancellation token.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Write the entries concurrently, returning the written paths in
    /// declaration order.
    ///
    /// Sibling entries fan out as independent tasks; within a directory the
    /// returned paths still follow the declared order because results are
    /// collected by original index, not completion order.
    pub async fn write(&self, entries: &[Entry]) -> Result<Vec<PathBuf>> {
        self.validate(entries)?;
        write_level(
            entries.to_vec(),
            self.root.clone(),
            self.overwrite,
            self.cancel.clone(),
        )
        .await
    }

    /// Write the entries sequentially, with semantics identical to
    /// [`DiskWriter::write`] minus the concurrency.
    pub fn write_sync(&self, entries: &[Entry]) -> Result<Vec<PathBuf>> {
        self.validate(entries)?;
        let mut written = Vec::new();
        for entry in entries {
            write_entry_sync(entry, &self.root, self.overwrite, &self.cancel, &mut written)?;
        }
        Ok(written)
    }

    /// Validate the root location and the whole tree's entry names before
    /// any mutation.
    fn validate(&self, entries: &[Entry]) -> Result<()> {
        let is_directory = std::fs::metadata(&self.root)
            .map(|metadata| metadata.is_dir())
            .unwrap_or(false);
        if !is_directory {
            return Err(Error::NotADirectory {
                path: self.root.display().to_string(),
                hint: Some("the write root must be an existing directory".to_string()),
            });
        }
        check_entry_names(entries, &self.root)
    }
}

/// Write entries to `root` with fan-out concurrency.
///
/// Convenience wrapper over [`DiskWriter`].
pub async fn write(
    entries: &[Entry],
    root: impl AsRef<Path>,
    overwrite: bool,
) -> Result<Vec<PathBuf>> {
    DiskWriter::new(root.as_ref())
        .overwrite(overwrite)
        .write(entries)
        .await
}

/// Write entries to `root` sequentially.
///
/// Convenience wrapper over [`DiskWriter`].
pub fn write_sync(
    entries: &[Entry],
    root: impl AsRef<Path>,
    overwrite: bool,
) -> Result<Vec<PathBuf>> {
    DiskWriter::new(root.as_ref())
        .overwrite(overwrite)
        .write_sync(entries)
}

/// Whether a name resolves to exactly one child of its parent directory.
///
/// Rejects empty names, the `.` and `..` dot components, and names
/// containing a path separator, all of which would escape the parent or
/// alias it. Each write task must own its target path exclusively.
fn is_valid_entry_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

/// Enforce well-formed, pairwise-distinct sibling names at every directory
/// level.
///
/// `parent` is the on-disk directory the entries would land in; it is
/// reported in the error so the caller can locate the offender.
fn check_entry_names(entries: &[Entry], parent: &Path) -> Result<()> {
    let mut seen = HashSet::new();
    for entry in entries {
        if !is_valid_entry_name(&entry.name) {
            return Err(Error::InvalidName {
                name: entry.name.clone(),
                parent: parent.display().to_string(),
            });
        }
        if !seen.insert(entry.name.as_str()) {
            return Err(Error::DuplicateName {
                name: entry.name.clone(),
                parent: parent.display().to_string(),
            });
        }
    }
    for entry in entries {
        if let Payload::Directory(children) = &entry.payload {
            check_entry_names(children, &parent.join(&entry.name))?;
        }
    }
    Ok(())
}

/// Write one directory level's entries concurrently, one task per sibling.
///
/// Boxed because the future recurses through directory children.
fn write_level(
    entries: Vec<Entry>,
    directory: PathBuf,
    overwrite: bool,
    cancel: CancellationToken,
) -> BoxFuture<'static, Result<Vec<PathBuf>>> {
    async move {
        let count = entries.len();
        let mut tasks: JoinSet<Result<(usize, Vec<PathBuf>)>> = JoinSet::new();
        for (index, entry) in entries.into_iter().enumerate() {
            let directory = directory.clone();
            let cancel = cancel.clone();
            tasks.spawn(async move {
                let paths = write_entry(entry, directory, overwrite, cancel).await?;
                Ok((index, paths))
            });
        }

        // Collect by original index so the returned list preserves
        // declaration order, not completion order.
        let mut slots: Vec<Option<Vec<PathBuf>>> = (0..count).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok((index, paths))) => slots[index] = Some(paths),
                Ok(Err(error)) => {
                    // Fail fast: abort the remaining in-flight siblings and
                    // propagate the first error. Completed writes stay.
                    tasks.abort_all();
                    return Err(error);
                }
                Err(join_error) => {
                    if join_error.is_cancelled() {
                        return Err(Error::Cancelled);
                    }
                    std::panic::resume_unwind(join_error.into_panic());
                }
            }
        }
        Ok(slots.into_iter().flatten().flatten().collect())
    }
    .boxed()
}

/// Materialize a single entry, recursing into directory children.
async fn write_entry(
    entry: Entry,
    directory: PathBuf,
    overwrite: bool,
    cancel: CancellationToken,
) -> Result<Vec<PathBuf>> {
    if cancel.is_cancelled() {
        return Err(Error::Cancelled);
    }
    let target = directory.join(&entry.name);
    clear_conflict(&target, overwrite, &cancel).await?;

    match entry.payload {
        Payload::File(content) => {
            log::debug!("writing file {}", target.display());
            tokio::fs::write(&target, content.to_bytes()).await?;
            apply_permissions(&target, entry.permissions).await?;
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }
            Ok(vec![target])
        }
        Payload::Directory(children) => {
            log::debug!("creating directory {}", target.display());
            tokio::fs::create_dir(&target).await?;
            apply_permissions(&target, entry.permissions).await?;
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }
            let mut written = vec![target.clone()];
            written.extend(write_level(children, target, overwrite, cancel).await?);
            Ok(written)
        }
    }
}

/// Materialize a single entry sequentially.
fn write_entry_sync(
    entry: &Entry,
    directory: &Path,
    overwrite: bool,
    cancel: &CancellationToken,
    written: &mut Vec<PathBuf>,
) -> Result<()> {
    if cancel.is_cancelled() {
        return Err(Error::Cancelled);
    }
    let target = directory.join(&entry.name);
    clear_conflict_sync(&target, overwrite, cancel)?;

    match &entry.payload {
        Payload::File(content) => {
            log::debug!("writing file {}", target.display());
            std::fs::write(&target, content.to_bytes())?;
            apply_permissions_sync(&target, entry.permissions)?;
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }
            written.push(target);
        }
        Payload::Directory(children) => {
            log::debug!("creating directory {}", target.display());
            std::fs::create_dir(&target)?;
            apply_permissions_sync(&target, entry.permissions)?;
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }
            written.push(target.clone());
            for child in children {
                write_entry_sync(child, &target, overwrite, cancel, written)?;
            }
        }
    }
    Ok(())
}

/// Handle a pre-existing file or directory at the target path.
async fn clear_conflict(target: &Path, overwrite: bool, cancel: &CancellationToken) -> Result<()> {
    match tokio::fs::metadata(target).await {
        Ok(existing) => {
            if !overwrite {
                return Err(Error::AlreadyExists {
                    path: target.display().to_string(),
                });
            }
            log::warn!("overwriting existing entry at {}", target.display());
            if existing.is_dir() {
                tokio::fs::remove_dir_all(target).await?;
            } else {
                tokio::fs::remove_file(target).await?;
            }
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }
            Ok(())
        }
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(error) => Err(error.into()),
    }
}

/// Sequential twin of [`clear_conflict`].
fn clear_conflict_sync(target: &Path, overwrite: bool, cancel: &CancellationToken) -> Result<()> {
    match std::fs::metadata(target) {
        Ok(existing) => {
            if !overwrite {
                return Err(Error::AlreadyExists {
                    path: target.display().to_string(),
                });
            }
            log::warn!("overwriting existing entry at {}", target.display());
            if existing.is_dir() {
                std::fs::remove_dir_all(target)?;
            } else {
                std::fs::remove_file(target)?;
            }
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }
            Ok(())
        }
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(error) => Err(error.into()),
    }
}

/// Apply entry permissions to a just-materialized path.
///
/// Permission bits are Unix-specific; elsewhere this is a no-op.
async fn apply_permissions(target: &Path, permissions: Permissions) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(target, std::fs::Permissions::from_mode(permissions.mode()))
            .await?;
    }
    #[cfg(not(unix))]
    {
        let _ = (target, permissions);
    }
    Ok(())
}

/// Sequential twin of [`apply_permissions`].
fn apply_permissions_sync(target: &Path, permissions: Permissions) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(target, std::fs::Permissions::from_mode(permissions.mode()))?;
    }
    #[cfg(not(unix))]
    {
        let _ = (target, permissions);
    }
    Ok(())
}
