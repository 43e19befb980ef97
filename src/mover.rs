/// Relocation of files and folders into category directories.
///
/// Both kinds of move share one contract, expressed by the [`Mover`] trait:
/// either the item ends up fully at its destination, or nothing of it is left
/// at the destination. A rename that crosses filesystems falls back to a copy
/// followed by removal of the source; [`FileMover`] and [`FolderMover`] differ
/// in how that copy is made and how a partially written destination is
/// cleaned up.
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Whether a move relocates a single file or a whole folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    File,
    Folder,
}

/// Reasons a single relocation can fail.
#[derive(Debug, thiserror::Error)]
pub enum MoveError {
    /// Something already occupies the destination path.
    #[error("destination {} already exists", .destination.display())]
    Collision { destination: PathBuf },
    /// The source path has no final name component.
    #[error("{} has no file name", .source_path.display())]
    NoFileName { source_path: PathBuf },
    /// The underlying move primitive failed.
    #[error("failed to move to {}: {source}", .destination.display())]
    Transfer {
        destination: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result of relocating one file or folder.
#[derive(Debug)]
pub enum MoveOutcome {
    Moved { destination: PathBuf },
    Failed { source: PathBuf, error: MoveError },
}

impl MoveOutcome {
    /// Returns `true` if the item reached its destination.
    pub fn is_moved(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

/// Moves an item into a destination folder, cleaning up after failures.
///
/// Implementors supply the copy fallback and the cleanup of partial
/// artifacts; the move itself defaults to [`fs::rename`] and can be
/// overridden.
pub trait Mover {
    /// What this mover relocates.
    fn kind(&self) -> ItemKind;

    /// Copies `source` to `destination`, which does not exist yet.
    fn copy(&self, source: &Path, destination: &Path) -> io::Result<()>;

    /// Deletes `source` after a successful copy.
    fn remove_source(&self, source: &Path) -> io::Result<()>;

    /// Removes whatever a failed transfer left at `destination`.
    fn remove_partial(&self, destination: &Path) -> io::Result<()>;

    /// Renames `source` to `destination` on the same filesystem.
    fn rename(&self, source: &Path, destination: &Path) -> io::Result<()> {
        fs::rename(source, destination)
    }

    /// The move primitive: a rename, or copy then delete when the rename
    /// would cross filesystems. Any other rename error is returned as is.
    fn transfer(&self, source: &Path, destination: &Path) -> io::Result<()> {
        match self.rename(source, destination) {
            Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
                tracing::debug!(
                    source = %source.display(),
                    destination = %destination.display(),
                    "Rename crosses filesystems, copying instead"
                );
                self.copy(source, destination)?;
                self.remove_source(source)
            }
            result => result,
        }
    }

    /// Moves `source` into `destination_folder`, keeping its name.
    ///
    /// The destination folder must already exist. An existing entry at the
    /// destination is never overwritten and never removed. When the transfer
    /// fails, any artifact it left at the destination is deleted before the
    /// failure is returned.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use sortdir::mover::{FileMover, Mover};
    /// use std::path::Path;
    ///
    /// let outcome = FileMover.relocate(
    ///     Path::new("/path/to/base/photo.jpg"),
    ///     Path::new("/path/to/base/images"),
    /// );
    /// assert!(outcome.is_moved());
    /// ```
    fn relocate(&self, source: &Path, destination_folder: &Path) -> MoveOutcome {
        let failed = |error| MoveOutcome::Failed {
            source: source.to_path_buf(),
            error,
        };

        let Some(name) = source.file_name() else {
            return failed(MoveError::NoFileName {
                source_path: source.to_path_buf(),
            });
        };
        let destination = destination_folder.join(name);

        // symlink_metadata so a dangling link still counts as occupied
        if fs::symlink_metadata(&destination).is_ok() {
            return failed(MoveError::Collision { destination });
        }

        match self.transfer(source, &destination) {
            Ok(()) => {
                tracing::debug!(
                    kind = ?self.kind(),
                    source = %source.display(),
                    destination = %destination.display(),
                    "Moved"
                );
                MoveOutcome::Moved { destination }
            }
            Err(e) => {
                if fs::symlink_metadata(&destination).is_ok()
                    && let Err(cleanup) = self.remove_partial(&destination)
                {
                    tracing::warn!(
                        destination = %destination.display(),
                        error = %cleanup,
                        "Could not remove partial move artifact"
                    );
                }
                failed(MoveError::Transfer {
                    destination,
                    source: e,
                })
            }
        }
    }
}

/// Moves single files; cleanup removes one file.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileMover;

impl Mover for FileMover {
    fn kind(&self) -> ItemKind {
        ItemKind::File
    }

    fn copy(&self, source: &Path, destination: &Path) -> io::Result<()> {
        copy_entry(source, destination)
    }

    fn remove_source(&self, source: &Path) -> io::Result<()> {
        fs::remove_file(source)
    }

    fn remove_partial(&self, destination: &Path) -> io::Result<()> {
        fs::remove_file(destination)
    }
}

/// Moves whole folders; cleanup removes the destination subtree.
#[derive(Debug, Clone, Copy, Default)]
pub struct FolderMover;

impl Mover for FolderMover {
    fn kind(&self) -> ItemKind {
        ItemKind::Folder
    }

    /// Recreates the tree under `destination`, parents before children.
    fn copy(&self, source: &Path, destination: &Path) -> io::Result<()> {
        for entry in WalkDir::new(source).follow_links(false).sort_by_file_name() {
            let entry = entry?;
            let relative = entry
                .path()
                .strip_prefix(source)
                .map_err(io::Error::other)?;
            let target = destination.join(relative);
            if entry.file_type().is_dir() {
                fs::create_dir(&target)?;
            } else {
                copy_entry(entry.path(), &target)?;
            }
        }
        Ok(())
    }

    fn remove_source(&self, source: &Path) -> io::Result<()> {
        remove_tree_or_file(source)
    }

    fn remove_partial(&self, destination: &Path) -> io::Result<()> {
        remove_tree_or_file(destination)
    }
}

fn remove_tree_or_file(path: &Path) -> io::Result<()> {
    if fs::symlink_metadata(path)?.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

/// Copies one non-directory entry. Symbolic links are recreated, not
/// followed.
fn copy_entry(source: &Path, destination: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        if fs::symlink_metadata(source)?.file_type().is_symlink() {
            return std::os::unix::fs::symlink(fs::read_link(source)?, destination);
        }
    }
    fs::copy(source, destination).map(|_| ())
}

/// Picks the mover for `kind`.
pub fn mover_for(kind: ItemKind) -> &'static dyn Mover {
    match kind {
        ItemKind::File => &FileMover,
        ItemKind::Folder => &FolderMover,
    }
}
