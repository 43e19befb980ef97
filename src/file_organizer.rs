/// Directory organization: the walk over a target directory.
///
/// Enumerates the direct children of a target directory once, decides where
/// each one belongs, and relocates it through the matching [`Mover`]. Files
/// are classified by extension; subfolders are profiled and resolved as a
/// whole. Folders already named like a category are left alone.
use crate::config::LOCAL_CONFIG_FILE;
use crate::file_category::CategoryMap;
use crate::mover::{ItemKind, MoveOutcome, mover_for};
use crate::profiler;
use crate::resolver;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors that stop a run before anything is moved.
#[derive(Debug, thiserror::Error)]
pub enum OrganizeError {
    /// The target directory does not exist.
    #[error("Directory not found: {}", .path.display())]
    DirectoryNotFound { path: PathBuf },
    /// The target path exists but is not a directory.
    #[error("Not a directory: {}", .path.display())]
    NotADirectory { path: PathBuf },
    /// The target directory could not be listed.
    #[error("Failed to read directory {}: {source}", .path.display())]
    ReadDirFailed { path: PathBuf, source: io::Error },
    /// A category directory could not be created.
    #[error("Failed to create directory {}: {source}", .path.display())]
    DirectoryCreationFailed { path: PathBuf, source: io::Error },
}

/// Result type for organization runs.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// Caller-resolved switches for a run.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrganizeOptions {
    /// Whether subfolders are reorganized too, or left untouched.
    pub move_subfolders: bool,
}

/// One relocation a run will attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedMove {
    pub source: PathBuf,
    pub kind: ItemKind,
    pub category: String,
}

/// The relocations for a target directory, in encounter order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Plan {
    pub target: PathBuf,
    pub moves: Vec<PlannedMove>,
}

impl Plan {
    /// Returns `true` if there is nothing to move.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Number of planned moves of the given kind.
    pub fn count(&self, kind: ItemKind) -> usize {
        self.moves.iter().filter(|m| m.kind == kind).count()
    }
}

/// A path that could not be moved, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub path: PathBuf,
    pub kind: ItemKind,
    pub reason: String,
}

/// Summary of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub target: PathBuf,
    pub started_at: DateTime<Utc>,
    pub files_moved: usize,
    pub folders_moved: usize,
    /// Failed moves in encounter order.
    pub failures: Vec<Failure>,
}

impl Report {
    fn new(target: PathBuf) -> Self {
        Self {
            target,
            started_at: Utc::now(),
            files_moved: 0,
            folders_moved: 0,
            failures: Vec::new(),
        }
    }

    /// Tallies the outcome of one planned move.
    fn record(&mut self, planned: &PlannedMove, outcome: MoveOutcome) {
        match outcome {
            MoveOutcome::Moved { .. } => match planned.kind {
                ItemKind::File => self.files_moved += 1,
                ItemKind::Folder => self.folders_moved += 1,
            },
            MoveOutcome::Failed { source, error } => self.failures.push(Failure {
                path: source,
                kind: planned.kind,
                reason: error.to_string(),
            }),
        }
    }

    /// Paths that failed to move, in encounter order.
    pub fn failed_paths(&self) -> impl Iterator<Item = &Path> {
        self.failures.iter().map(|f| f.path.as_path())
    }

    pub fn is_complete_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Observer for run progress.
///
/// Both hooks default to doing nothing; `()` is the silent observer.
pub trait Progress {
    /// Called once the plan is known, before the first move.
    fn planned(&mut self, _total: usize) {}

    /// Called after each attempted move.
    fn item_finished(&mut self, _planned: &PlannedMove, _outcome: &MoveOutcome) {}
}

impl Progress for () {}

/// Checks that `target` exists and is a directory.
pub fn validate_target(target: &Path) -> OrganizeResult<()> {
    match fs::metadata(target) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(OrganizeError::NotADirectory {
            path: target.to_path_buf(),
        }),
        Err(_) => Err(OrganizeError::DirectoryNotFound {
            path: target.to_path_buf(),
        }),
    }
}

/// Creates every category directory that does not exist yet.
pub fn ensure_category_dirs(target: &Path, categories: &CategoryMap) -> OrganizeResult<()> {
    for category in categories.categories() {
        let path = target.join(category);
        if path.is_dir() {
            continue;
        }
        fs::create_dir(&path).map_err(|e| OrganizeError::DirectoryCreationFailed {
            path: path.clone(),
            source: e,
        })?;
    }
    Ok(())
}

/// Works out where every direct child of `target` should go, without
/// touching the filesystem.
///
/// Children are visited in file-name order. Files are classified by
/// extension, except a local `.sortdir.toml`, which stays where it is. Subfolders are skipped unless `options.move_subfolders` is set,
/// and are always skipped when their name is a category name; the rest are
/// profiled and resolved. Anything that is neither a file nor a directory is
/// ignored.
///
/// # Errors
///
/// Returns an `OrganizeError` if `target` is missing, not a directory, or
/// cannot be listed.
pub fn plan(
    target: &Path,
    categories: &CategoryMap,
    options: &OrganizeOptions,
) -> OrganizeResult<Plan> {
    validate_target(target)?;

    let entries = fs::read_dir(target).map_err(|e| OrganizeError::ReadDirFailed {
        path: target.to_path_buf(),
        source: e,
    })?;

    let mut children: Vec<PathBuf> = entries.flatten().map(|entry| entry.path()).collect();
    children.sort();

    let mut moves = Vec::new();
    for path in children {
        if path.is_file() {
            if path.file_name().is_some_and(|name| name == LOCAL_CONFIG_FILE) {
                tracing::debug!(file = %path.display(), "Leaving local configuration in place");
                continue;
            }

            moves.push(PlannedMove {
                category: categories.classify_path(&path).to_string(),
                source: path,
                kind: ItemKind::File,
            });
        } else if path.is_dir() {
            if !options.move_subfolders {
                continue;
            }

            let name = path
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_default();
            if categories.is_category(&name) {
                tracing::debug!(folder = %path.display(), "Skipping category folder");
                continue;
            }

            let table = profiler::profile(&path, categories);
            let category = resolver::resolve(&table).to_string();
            moves.push(PlannedMove {
                source: path,
                kind: ItemKind::Folder,
                category,
            });
        }
    }

    Ok(Plan {
        target: target.to_path_buf(),
        moves,
    })
}

/// Organizes `target` into category directories.
///
/// See [`organize_with_progress`].
///
/// # Examples
///
/// ```no_run
/// use sortdir::file_category::CategoryMap;
/// use sortdir::file_organizer::{OrganizeOptions, organize};
/// use std::path::Path;
///
/// let categories = CategoryMap::from_pairs([("jpg", "images"), ("txt", "docs")]);
/// let options = OrganizeOptions { move_subfolders: true };
/// let report = organize(Path::new("/path/to/Downloads"), &categories, &options)?;
/// println!("{} files, {} folders", report.files_moved, report.folders_moved);
/// # Ok::<(), sortdir::file_organizer::OrganizeError>(())
/// ```
pub fn organize(
    target: &Path,
    categories: &CategoryMap,
    options: &OrganizeOptions,
) -> OrganizeResult<Report> {
    organize_with_progress(target, categories, options, &mut ())
}

/// Organizes `target`, reporting each move to `progress`.
///
/// All category directories are created first, then the [`plan`] is
/// executed. A failed move is recorded in the [`Report`] and the run goes on
/// with the next item.
///
/// # Errors
///
/// Returns an `OrganizeError` for setup failures only: a missing or
/// unreadable target, or a category directory that cannot be created.
pub fn organize_with_progress(
    target: &Path,
    categories: &CategoryMap,
    options: &OrganizeOptions,
    progress: &mut dyn Progress,
) -> OrganizeResult<Report> {
    validate_target(target)?;
    ensure_category_dirs(target, categories)?;

    let plan = plan(target, categories, options)?;
    progress.planned(plan.moves.len());

    let mut report = Report::new(target.to_path_buf());
    for planned in &plan.moves {
        let destination_folder = target.join(&planned.category);
        let outcome = mover_for(planned.kind).relocate(&planned.source, &destination_folder);
        progress.item_finished(planned, &outcome);
        report.record(planned, outcome);
    }

    tracing::info!(
        target = %target.display(),
        files_moved = report.files_moved,
        folders_moved = report.folders_moved,
        failed = report.failures.len(),
        "Organization finished"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_map() -> CategoryMap {
        CategoryMap::from_pairs([("jpg", "images"), ("txt", "docs")])
    }

    fn folders() -> OrganizeOptions {
        OrganizeOptions {
            move_subfolders: true,
        }
    }

    #[test]
    fn test_plan_classifies_files_and_folders() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::write(base.join("b.txt"), "x").unwrap();
        fs::write(base.join("a.jpg"), "x").unwrap();
        fs::create_dir(base.join("mix")).unwrap();
        fs::write(base.join("mix/1.jpg"), "x").unwrap();

        let plan = plan(base, &sample_map(), &folders()).unwrap();

        assert_eq!(
            plan.moves,
            vec![
                PlannedMove {
                    source: base.join("a.jpg"),
                    kind: ItemKind::File,
                    category: "images".to_string(),
                },
                PlannedMove {
                    source: base.join("b.txt"),
                    kind: ItemKind::File,
                    category: "docs".to_string(),
                },
                PlannedMove {
                    source: base.join("mix"),
                    kind: ItemKind::Folder,
                    category: "images".to_string(),
                },
            ]
        );
        assert_eq!(plan.count(ItemKind::File), 2);
        assert_eq!(plan.count(ItemKind::Folder), 1);
        // planning never creates category folders
        assert!(!base.join("images").exists());
    }

    #[test]
    fn test_plan_skips_folders_when_disabled() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::create_dir(base.join("mix")).unwrap();

        let plan = plan(base, &sample_map(), &OrganizeOptions::default()).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_plan_skips_category_folders() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        for name in ["images", "docs", "other"] {
            fs::create_dir(base.join(name)).unwrap();
            fs::write(base.join(name).join("x.jpg"), "x").unwrap();
        }

        let plan = plan(base, &sample_map(), &folders()).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_plan_leaves_local_config_in_place() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::write(base.join(LOCAL_CONFIG_FILE), "[categories]\n").unwrap();
        fs::write(base.join("a.jpg"), "x").unwrap();

        let plan = plan(base, &sample_map(), &folders()).unwrap();

        assert_eq!(plan.moves.len(), 1);
        assert_eq!(plan.moves[0].source, base.join("a.jpg"));
    }

    #[test]
    fn test_plan_missing_target() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let missing = temp_dir.path().join("missing");

        let result = plan(&missing, &sample_map(), &folders());
        assert!(matches!(
            result,
            Err(OrganizeError::DirectoryNotFound { .. })
        ));
    }

    #[test]
    fn test_target_is_a_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file = temp_dir.path().join("file.txt");
        fs::write(&file, "x").unwrap();

        let result = organize(&file, &sample_map(), &folders());
        assert!(matches!(result, Err(OrganizeError::NotADirectory { .. })));
    }

    #[test]
    fn test_ensure_category_dirs_creates_all() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::create_dir(base.join("docs")).unwrap();

        ensure_category_dirs(base, &sample_map()).unwrap();

        assert!(base.join("images").is_dir());
        assert!(base.join("docs").is_dir());
        assert!(base.join("other").is_dir());
    }

    #[test]
    fn test_ensure_category_dirs_blocked_by_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::write(base.join("images"), "not a folder").unwrap();

        let result = ensure_category_dirs(base, &sample_map());
        assert!(matches!(
            result,
            Err(OrganizeError::DirectoryCreationFailed { .. })
        ));
    }

    #[test]
    fn test_report_records_outcomes() {
        let file = PlannedMove {
            source: PathBuf::from("/t/a.jpg"),
            kind: ItemKind::File,
            category: "images".to_string(),
        };
        let folder = PlannedMove {
            source: PathBuf::from("/t/mix"),
            kind: ItemKind::Folder,
            category: "images".to_string(),
        };

        let mut report = Report::new(PathBuf::from("/t"));
        report.record(
            &file,
            MoveOutcome::Moved {
                destination: PathBuf::from("/t/images/a.jpg"),
            },
        );
        report.record(
            &folder,
            MoveOutcome::Failed {
                source: PathBuf::from("/t/mix"),
                error: crate::mover::MoveError::Collision {
                    destination: PathBuf::from("/t/images/mix"),
                },
            },
        );

        assert_eq!(report.files_moved, 1);
        assert_eq!(report.folders_moved, 0);
        assert_eq!(
            report.failed_paths().collect::<Vec<_>>(),
            vec![Path::new("/t/mix")]
        );
        assert!(!report.is_complete_success());
    }

    #[derive(Default)]
    struct Recorder {
        total: Option<usize>,
        finished: Vec<(PathBuf, bool)>,
    }

    impl Progress for Recorder {
        fn planned(&mut self, total: usize) {
            self.total = Some(total);
        }

        fn item_finished(&mut self, planned: &PlannedMove, outcome: &MoveOutcome) {
            self.finished
                .push((planned.source.clone(), outcome.is_moved()));
        }
    }

    #[test]
    fn test_progress_sees_every_item() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::write(base.join("a.jpg"), "x").unwrap();
        fs::write(base.join("b.bin"), "x").unwrap();

        let mut recorder = Recorder::default();
        let report =
            organize_with_progress(base, &sample_map(), &folders(), &mut recorder).unwrap();

        assert_eq!(report.files_moved, 2);
        assert_eq!(recorder.total, Some(2));
        assert_eq!(
            recorder.finished,
            vec![(base.join("a.jpg"), true), (base.join("b.bin"), true)]
        );
        assert!(base.join("other/b.bin").exists());
    }
}
