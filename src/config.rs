//! Configuration for the three tools.
//!
//! Every value the tools used to hard-code lives here as a `Default` impl, so
//! the entry points take an explicit config and tests can point them at a
//! scratch directory.

use crate::utils::error::{Result, ToolError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Icon edge lengths required by the web app manifest.
pub const DEFAULT_ICON_SIZES: [u32; 2] = [192, 512];

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_HOST: &str = "0.0.0.0";

pub const DEFAULT_SITE_ROOT: &str = "/Users/christolotriet/lotriflow-site";
pub const DEFAULT_DESTINATION: &str = "quit";

#[derive(Debug, Clone)]
pub struct IconConfig {
    pub sizes: Vec<u32>,
    pub output_dir: PathBuf,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_ICON_SIZES.to_vec(),
            output_dir: PathBuf::from("."),
        }
    }
}

impl IconConfig {
    pub fn validate(&self) -> Result<()> {
        if self.sizes.iter().any(|&size| size == 0) {
            return Err(ToolError::config("icon size must be at least 1 pixel"));
        }
        Ok(())
    }
}

/// RGBA colours of the generated icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconPalette {
    pub background: [u8; 4],
    pub ring_fill: [u8; 4],
    pub ring_outline: [u8; 4],
    pub inner_fill: [u8; 4],
}

impl Default for IconPalette {
    fn default() -> Self {
        Self {
            background: [10, 10, 15, 255],
            ring_fill: [0, 255, 136, 255],
            ring_outline: [0, 200, 100, 255],
            inner_fill: [10, 10, 15, 200],
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub root: PathBuf,
}

impl ServerConfig {
    /// Build a config, falling back to the directory holding the running
    /// executable when no serve root is given.
    pub fn new(host: String, port: u16, root: Option<PathBuf>) -> Result<Self> {
        let root = match root {
            Some(root) => root,
            None => executable_dir()?,
        };
        Ok(Self { host, port, root })
    }

    pub fn validate(&self) -> Result<()> {
        if !self.root.is_dir() {
            return Err(ToolError::config(format!(
                "serve root {} is not a directory",
                self.root.display()
            )));
        }
        Ok(())
    }
}

fn executable_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| ToolError::config("cannot determine the executable's directory"))
}

/// A single file move; `destination` is the new name inside the
/// destination directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMove {
    pub source: String,
    pub destination: String,
}

impl FileMove {
    pub fn new(source: &str, destination: &str) -> Self {
        Self {
            source: source.to_string(),
            destination: destination.to_string(),
        }
    }
}

/// Ordered list of moves out of `root` into `root/destination`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelocationPlan {
    #[serde(default = "default_site_root")]
    pub root: PathBuf,
    #[serde(default = "default_destination")]
    pub destination: String,
    #[serde(default)]
    pub files: Vec<FileMove>,
    #[serde(default)]
    pub directories: Vec<String>,
}

fn default_site_root() -> PathBuf {
    PathBuf::from(DEFAULT_SITE_ROOT)
}

fn default_destination() -> String {
    DEFAULT_DESTINATION.to_string()
}

impl Default for RelocationPlan {
    fn default() -> Self {
        Self {
            root: default_site_root(),
            destination: default_destination(),
            files: vec![
                FileMove::new("index.html", "index.html"),
                FileMove::new("compare.html", "compare.html"),
                FileMove::new("faq.html", "faq.html"),
                FileMove::new("health-milestones.html", "milestones.html"),
            ],
            directories: vec!["blog".to_string()],
        }
    }
}

impl RelocationPlan {
    /// The default plan applied to another root.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let plan: RelocationPlan = toml::from_str(content)?;
        plan.validate()?;
        Ok(plan)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            ToolError::config(format!(
                "failed to read plan {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn destination_dir(&self) -> PathBuf {
        self.root.join(&self.destination)
    }

    /// Names must be single path segments so every move stays inside `root`.
    pub fn validate(&self) -> Result<()> {
        let names = std::iter::once(self.destination.as_str())
            .chain(
                self.files
                    .iter()
                    .flat_map(|f| [f.source.as_str(), f.destination.as_str()]),
            )
            .chain(self.directories.iter().map(String::as_str));

        for name in names {
            if !is_plain_segment(name) {
                return Err(ToolError::config(format!(
                    "'{}' is not a plain file or directory name",
                    name
                )));
            }
        }
        Ok(())
    }
}

fn is_plain_segment(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}
