//! Project sync engine
//!
//! Brings a generated project up to date with the starter template without
//! clobbering local work. The engine re-renders the template for the current
//! project name, then compares each rendered file with the working tree:
//! files the template introduces are written, identical files are skipped,
//! and locally modified files are only reported. There is no stored
//! baseline, so "modified" means "differs from today's template".

use std::fs;
use std::path::PathBuf;

use similar::{ChangeTag, TextDiff};

use crate::error::Result;
use crate::project::{self, ProjectTemplate};

/// Outcome for one template file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// Working tree already matches the template
    UpToDate,
    /// File was missing and has been written
    Written,
    /// File differs locally and was left untouched
    Modified {
        /// Lines the template would add
        added: usize,
        /// Lines the template would remove
        removed: usize,
    },
}

/// One entry of a sync run.
#[derive(Debug)]
pub struct SyncEntry {
    /// Path relative to the project root
    pub path: PathBuf,
    /// What happened to the file
    pub status: SyncStatus,
}

/// Full report of a sync run.
#[derive(Debug)]
pub struct SyncReport {
    /// Per-file outcomes, in template order
    pub entries: Vec<SyncEntry>,
}

impl SyncReport {
    /// Number of files written.
    #[must_use]
    pub fn written(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.status == SyncStatus::Written)
            .count()
    }

    /// Number of files left untouched because of local edits.
    #[must_use]
    pub fn modified(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.status, SyncStatus::Modified { .. }))
            .count()
    }
}

/// Applies non-destructive template updates to one project tree.
pub struct SyncEngine {
    project_root: PathBuf,
}

impl SyncEngine {
    /// Sync the project rooted at `project_root`.
    #[must_use]
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    /// Run the sync and return the per-file report.
    ///
    /// # Errors
    ///
    /// Fails when the directory is not a project (no readable package name),
    /// a template fails to render, or a new file cannot be written.
    pub fn run(&self) -> Result<SyncReport> {
        let name = project::package_name(&self.project_root)?;
        let template = ProjectTemplate::new(&name);

        let mut entries = Vec::new();
        for rendered in template.render_all()? {
            let path = self.project_root.join(&rendered.path);
            let status = if path.exists() {
                let current = fs::read_to_string(&path)?;
                if current == rendered.content {
                    SyncStatus::UpToDate
                } else {
                    diff_status(&current, &rendered.content)
                }
            } else {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&path, &rendered.content)?;
                SyncStatus::Written
            };
            entries.push(SyncEntry {
                path: rendered.path,
                status,
            });
        }
        Ok(SyncReport { entries })
    }
}

fn diff_status(current: &str, upstream: &str) -> SyncStatus {
    let diff = TextDiff::from_lines(current, upstream);
    let mut added = 0;
    let mut removed = 0;
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Insert => added += 1,
            ChangeTag::Delete => removed += 1,
            ChangeTag::Equal => {}
        }
    }
    SyncStatus::Modified { added, removed }
}
