//! One-off relocation of site pages into a subdirectory.
//!
//! Each planned move produces one [`ItemReport`]; a failed or missing item
//! never stops the run. The only fatal case is a destination directory that
//! cannot be created.

use crate::config::RelocationPlan;
use crate::utils::error::{Result, ToolError};
use crate::utils::files::move_path;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// The filesystem operations a relocation needs.
pub trait FileSystem {
    fn exists(&self, path: &Path) -> bool;
    fn create_dir(&self, path: &Path) -> io::Result<()>;
    fn move_path(&self, from: &Path, to: &Path) -> io::Result<()>;
}

/// The real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir(path)
    }

    fn move_path(&self, from: &Path, to: &Path) -> io::Result<()> {
        move_path(from, to)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    File,
    Directory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MoveOutcome {
    Moved { to: String },
    NotFound,
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemReport {
    pub name: String,
    pub kind: ItemKind,
    pub outcome: MoveOutcome,
}

impl ItemReport {
    /// The console line for this item.
    pub fn message(&self) -> String {
        match (&self.outcome, self.kind) {
            (MoveOutcome::Moved { to }, ItemKind::File) => format!("Moved {} -> {}", self.name, to),
            (MoveOutcome::Moved { .. }, ItemKind::Directory) => {
                format!("Moved directory {}", self.name)
            }
            (MoveOutcome::NotFound, _) => format!("Source not found: {}", self.name),
            (MoveOutcome::Failed { reason }, _) => {
                format!("Failed to move {}: {}", self.name, reason)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelocationReport {
    pub destination: PathBuf,
    pub created_destination: bool,
    pub items: Vec<ItemReport>,
}

impl RelocationReport {
    pub fn moved(&self) -> usize {
        self.count(|outcome| matches!(outcome, MoveOutcome::Moved { .. }))
    }

    pub fn not_found(&self) -> usize {
        self.count(|outcome| matches!(outcome, MoveOutcome::NotFound))
    }

    pub fn failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, MoveOutcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&MoveOutcome) -> bool) -> usize {
        self.items.iter().filter(|item| pred(&item.outcome)).count()
    }

    pub fn lines(&self) -> Vec<String> {
        let created = self
            .created_destination
            .then(|| format!("Created {}", self.destination.display()));
        created
            .into_iter()
            .chain(self.items.iter().map(ItemReport::message))
            .collect()
    }

    pub fn print(&self) {
        for line in self.lines() {
            println!("{}", line);
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Why a run stopped before moving anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelocationFailure {
    pub destination: PathBuf,
    pub error: String,
}

impl RelocationFailure {
    /// Returns `None` for errors that are not the missing-destination case.
    pub fn from_error(err: &ToolError) -> Option<Self> {
        match err {
            ToolError::DestinationUnavailable { path, source } => Some(Self {
                destination: path.clone(),
                error: source.to_string(),
            }),
            _ => None,
        }
    }

    pub fn message(&self) -> String {
        format!("Failed to create dir: {}", self.error)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Execute `plan` against `fs`: files first, then directories, each in plan
/// order.
pub fn relocate(plan: &RelocationPlan, fs: &dyn FileSystem) -> Result<RelocationReport> {
    let destination = plan.destination_dir();

    let created_destination = if fs.exists(&destination) {
        false
    } else {
        fs.create_dir(&destination)
            .map_err(|source| ToolError::DestinationUnavailable {
                path: destination.clone(),
                source,
            })?;
        info!("Created destination {}", destination.display());
        true
    };

    let file_moves = plan
        .files
        .iter()
        .map(|f| (f.source.as_str(), f.destination.as_str(), ItemKind::File));
    let dir_moves = plan
        .directories
        .iter()
        .map(|d| (d.as_str(), d.as_str(), ItemKind::Directory));

    let items = file_moves
        .chain(dir_moves)
        .map(|(source, target, kind)| {
            let outcome = move_item(fs, &plan.root.join(source), &destination.join(target), target);
            ItemReport {
                name: source.to_string(),
                kind,
                outcome,
            }
        })
        .collect();

    Ok(RelocationReport {
        destination,
        created_destination,
        items,
    })
}

fn move_item(fs: &dyn FileSystem, src: &Path, dest: &Path, target: &str) -> MoveOutcome {
    if !fs.exists(src) {
        debug!("Skipping missing {}", src.display());
        return MoveOutcome::NotFound;
    }

    match fs.move_path(src, dest) {
        Ok(()) => MoveOutcome::Moved {
            to: target.to_string(),
        },
        Err(e) => {
            warn!("Failed to move {}: {}", src.display(), e);
            MoveOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}
