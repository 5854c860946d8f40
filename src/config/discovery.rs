//! Locating `config.yaml`.
//!
//! A project keeps its config in a directory next to the hooks (`.commit-scope/`
//! by default). Developers may shadow it with an untracked `local/` copy, and a
//! per-user file applies to repositories that ship none.

use std::path::{Path, PathBuf};

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE: &str = "config.yaml";

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "COMMIT_SCOPE_CONFIG_DIR";

/// Default config directory, relative to the repository root.
pub const DEFAULT_CONFIG_DIR: &str = ".commit-scope";

const APP_DIR: &str = "commit-scope";

/// Where the effective configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `{dir}/local/config.yaml`, the developer's untracked override.
    Local(PathBuf),
    /// `{dir}/config.yaml`, shared through the repository.
    Project(PathBuf),
    /// A per-user file under the XDG config home or `~/.commit-scope`.
    User(PathBuf),
    /// No file anywhere: built-in defaults.
    Defaults,
}

impl ConfigSource {
    /// Finds the most specific existing config file for `dir`.
    pub fn locate(dir: &Path) -> Self {
        let local = dir.join("local").join(CONFIG_FILE);
        if local.is_file() {
            return Self::Local(local);
        }

        let project = dir.join(CONFIG_FILE);
        if project.is_file() {
            return Self::Project(project);
        }

        user_config_files()
            .into_iter()
            .find(|path| path.is_file())
            .map_or(Self::Defaults, Self::User)
    }

    /// The file to read, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Local(path) | Self::Project(path) | Self::User(path) => Some(path),
            Self::Defaults => None,
        }
    }
}

/// Per-user config files, preferred first.
fn user_config_files() -> Vec<PathBuf> {
    let mut files = Vec::new();
    match std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        Some(xdg_home) => files.push(PathBuf::from(xdg_home).join(APP_DIR).join(CONFIG_FILE)),
        None => files.extend(
            dirs::home_dir().map(|home| home.join(".config").join(APP_DIR).join(CONFIG_FILE)),
        ),
    }
    files.extend(dirs::home_dir().map(|home| home.join(DEFAULT_CONFIG_DIR).join(CONFIG_FILE)));
    files
}

/// Picks the config directory: `--config-dir`, then the value of
/// [`CONFIG_DIR_ENV`], then [`DEFAULT_CONFIG_DIR`]. Empty values are ignored.
pub fn config_dir(flag: Option<&Path>, env_value: Option<&str>) -> PathBuf {
    flag.map(Path::to_path_buf)
        .or_else(|| env_value.filter(|v| !v.is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR))
}
