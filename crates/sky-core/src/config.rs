//! Run configuration
//!
//! Paths come from three layers, highest priority first: command-line
//! flags, an optional JSON config file, then an interactive prompt for
//! whatever is still missing.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// The four files a run works with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputRole {
    /// Markdown dump table, rewritten in place
    Table,
    /// Level list (`AllLevelList.lua`)
    Levels,
    /// Primary translations (`zh-Hans.lproj/Localizable.strings`)
    Primary,
    /// Secondary translations (`Base.lproj/Localizable.strings`)
    Secondary,
}

impl InputRole {
    /// All roles, in prompt order
    pub const ALL: [InputRole; 4] = [
        InputRole::Table,
        InputRole::Levels,
        InputRole::Primary,
        InputRole::Secondary,
    ];

    /// Human-readable name used in prompts and errors
    pub fn label(self) -> &'static str {
        match self {
            InputRole::Table => "dump table",
            InputRole::Levels => "level list",
            InputRole::Primary => "primary translation file",
            InputRole::Secondary => "secondary translation file",
        }
    }

    /// Typical file name, shown as a hint when prompting
    pub fn hint(self) -> &'static str {
        match self {
            InputRole::Table => "《光•遇》所有地图.md",
            InputRole::Levels => "AllLevelList.lua",
            InputRole::Primary => "zh-Hans.lproj/Localizable.strings",
            InputRole::Secondary => "Base.lproj/Localizable.strings",
        }
    }
}

impl fmt::Display for InputRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Resolved input paths for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncPaths {
    pub table: PathBuf,
    pub levels: PathBuf,
    pub primary: PathBuf,
    pub secondary: PathBuf,
}

impl SyncPaths {
    /// Path for a role
    pub fn get(&self, role: InputRole) -> &Path {
        match role {
            InputRole::Table => &self.table,
            InputRole::Levels => &self.levels,
            InputRole::Primary => &self.primary,
            InputRole::Secondary => &self.secondary,
        }
    }

    /// Fail on the first path that does not exist
    pub fn check_exists(&self) -> Result<()> {
        for role in InputRole::ALL {
            let path = self.get(role);
            if !path.exists() {
                return Err(Error::MissingInput {
                    role: role.label().to_string(),
                    path: path.to_path_buf(),
                });
            }
        }
        Ok(())
    }
}

/// Partial run configuration, as stored in a JSON config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub table: Option<PathBuf>,
    pub levels: Option<PathBuf>,
    pub primary: Option<PathBuf>,
    pub secondary: Option<PathBuf>,
    /// Where to write the JSON run report
    pub report: Option<PathBuf>,
    /// Render to stdout instead of rewriting the table
    pub dry_run: bool,
}

impl SyncConfig {
    /// Load a config file from JSON
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| Error::InvalidConfig {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Save the config file to JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| Error::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Layer `self` over `fallback`: set values win, unset ones are taken
    /// from `fallback`.
    pub fn or(self, fallback: SyncConfig) -> SyncConfig {
        SyncConfig {
            table: self.table.or(fallback.table),
            levels: self.levels.or(fallback.levels),
            primary: self.primary.or(fallback.primary),
            secondary: self.secondary.or(fallback.secondary),
            report: self.report.or(fallback.report),
            dry_run: self.dry_run || fallback.dry_run,
        }
    }

    /// Path configured for a role, if any
    pub fn get(&self, role: InputRole) -> Option<&Path> {
        match role {
            InputRole::Table => self.table.as_deref(),
            InputRole::Levels => self.levels.as_deref(),
            InputRole::Primary => self.primary.as_deref(),
            InputRole::Secondary => self.secondary.as_deref(),
        }
    }

    /// Complete the paths, asking `prompt` for each one still missing
    pub fn resolve_paths<F>(&self, mut prompt: F) -> Result<SyncPaths>
    where
        F: FnMut(InputRole) -> Result<PathBuf>,
    {
        let mut resolve = |role: InputRole| match self.get(role) {
            Some(path) => Ok(path.to_path_buf()),
            None => prompt(role),
        };

        Ok(SyncPaths {
            table: resolve(InputRole::Table)?,
            levels: resolve(InputRole::Levels)?,
            primary: resolve(InputRole::Primary)?,
            secondary: resolve(InputRole::Secondary)?,
        })
    }
}

/// Clean up a path typed at a prompt: surrounding whitespace and the
/// quotes a file manager adds when dragging a file into a terminal.
pub fn clean_prompt_input(input: &str) -> PathBuf {
    PathBuf::from(input.trim().trim_matches(|c| c == '"' || c == '\''))
}
