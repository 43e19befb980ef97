//! Output formatting and styling module.
//!
//! All console output of the tool goes through here: colored status lines,
//! the progress bar shown while moving, the dry-run plan and the final report.
//! The organizing core itself never prints.

use crate::file_organizer::{Plan, PlannedMove, Progress, Report};
use crate::mover::{ItemKind, MoveOutcome};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeMap;

/// Manages all CLI output with consistent styling and formatting.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    ///
    /// # Arguments
    ///
    /// * `message` - The message to display
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sortdir::output::OutputFormatter;
    /// OutputFormatter::success("Folder has been reorganized by file type.");
    /// ```
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    ///
    /// # Arguments
    ///
    /// * `message` - The message to display
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sortdir::output::OutputFormatter;
    /// OutputFormatter::error("1. /path/to/a.jpg (destination already exists)");
    /// ```
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    ///
    /// # Arguments
    ///
    /// * `message` - The message to display
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sortdir::output::OutputFormatter;
    /// OutputFormatter::warning("2 items could not be moved:");
    /// ```
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    ///
    /// # Arguments
    ///
    /// * `message` - The message to display
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sortdir::output::OutputFormatter;
    /// OutputFormatter::info("Will reorganize folder: /home/user/Downloads");
    /// ```
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a regular message without styling.
    ///
    /// # Arguments
    ///
    /// * `message` - The message to display
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints a section header.
    ///
    /// # Arguments
    ///
    /// * `header` - The header text
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Creates a progress bar for `total` moves.
    ///
    /// # Arguments
    ///
    /// * `total` - Number of moves the run will attempt
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sortdir::output::OutputFormatter;
    /// let pb = OutputFormatter::create_progress_bar(100);
    /// pb.inc(1);
    /// pb.finish_and_clear();
    /// ```
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░");
        pb.set_style(style);
        pb
    }

    /// Prints a table of item counts per category, sorted by category name.
    ///
    /// # Arguments
    ///
    /// * `category_counts` - Items per category folder
    /// * `total_items` - Total shown in the last row
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sortdir::output::OutputFormatter;
    /// use std::collections::BTreeMap;
    ///
    /// let counts = BTreeMap::from([("images", 3), ("docs", 1)]);
    /// OutputFormatter::summary_table(&counts, 4);
    /// ```
    pub fn summary_table(category_counts: &BTreeMap<&str, usize>, total_items: usize) {
        Self::header("SUMMARY");

        let max_category_len = category_counts
            .keys()
            .map(|name| name.len())
            .max()
            .unwrap_or(0)
            .max(8); // At least "Category" width

        println!(
            "{:<width$} | {}",
            "Category".bold(),
            "Items".bold(),
            width = max_category_len
        );
        println!("{}", "-".repeat(max_category_len + 10));

        for (category, count) in category_counts {
            println!(
                "{:<width$} | {} {}",
                category,
                count.to_string().green(),
                plural(*count, "item", "items"),
                width = max_category_len
            );
        }

        println!("{}", "-".repeat(max_category_len + 10));
        println!(
            "{:<width$} | {} {}",
            "Total".bold(),
            total_items.to_string().green().bold(),
            plural(total_items, "item", "items"),
            width = max_category_len
        );
    }

    /// Prints what a run would do, followed by a per-category summary.
    ///
    /// # Arguments
    ///
    /// * `plan` - The planned moves, in the order they would run
    pub fn plan(plan: &Plan) {
        if plan.is_empty() {
            Self::plain("Nothing to organize.");
            return;
        }

        Self::dry_run_notice("Items would be organized as follows:");
        let mut category_counts: BTreeMap<&str, usize> = BTreeMap::new();
        for planned in &plan.moves {
            println!(" - {}", describe(planned));
            println!("   → Would move to {}/", planned.category);
            *category_counts.entry(planned.category.as_str()).or_insert(0) += 1;
        }

        Self::summary_table(&category_counts, plan.moves.len());
    }

    /// Prints the outcome of a run.
    ///
    /// Failures are listed in the order they happened.
    ///
    /// # Arguments
    ///
    /// * `report` - The finished run
    pub fn report(report: &Report) {
        Self::header("RESULT");
        Self::success(&format!(
            "{} {} and {} {} moved",
            report.files_moved,
            plural(report.files_moved, "file", "files"),
            report.folders_moved,
            plural(report.folders_moved, "folder", "folders"),
        ));

        if report.failures.is_empty() {
            Self::success("Folder has been reorganized by file type.");
            return;
        }

        Self::warning(&format!(
            "{} {} could not be moved:",
            report.failures.len(),
            plural(report.failures.len(), "item", "items"),
        ));
        for (index, failure) in report.failures.iter().enumerate() {
            Self::error(&format!(
                "{}. {} ({})",
                index + 1,
                failure.path.display(),
                failure.reason
            ));
        }
    }

    /// Prints a dry-run notice message.
    ///
    /// # Arguments
    ///
    /// * `message` - The notice to display
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }
}

/// Drives a progress bar from organization events.
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    /// Creates a reporter with an empty bar; the length is set once the run
    /// is planned.
    pub fn new() -> Self {
        Self {
            bar: OutputFormatter::create_progress_bar(0),
        }
    }

    /// Clears the bar from the terminal.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress for ProgressReporter {
    fn planned(&mut self, total: usize) {
        self.bar.set_length(total as u64);
    }

    fn item_finished(&mut self, planned: &PlannedMove, outcome: &MoveOutcome) {
        let name = planned
            .source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match outcome {
            MoveOutcome::Moved { .. } => {
                self.bar.set_message(format!("{} → {}/", name, planned.category))
            }
            MoveOutcome::Failed { .. } => self.bar.println(format!(
                "{} {}",
                "✗".red(),
                describe(planned)
            )),
        }
        self.bar.inc(1);
    }
}

fn describe(planned: &PlannedMove) -> String {
    let name = planned
        .source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| planned.source.display().to_string());
    match planned.kind {
        ItemKind::File => name,
        ItemKind::Folder => format!("{}/", name),
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_describe_marks_folders() {
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

        assert_eq!(describe(&file), "a.jpg");
        assert_eq!(describe(&folder), "mix/");
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "file", "files"), "file");
        assert_eq!(plural(0, "file", "files"), "files");
        assert_eq!(plural(2, "file", "files"), "files");
    }
}
