//! Configuration loading and root folder resolution
//!
//! Bootstrap configuration only: where the data lives, which port to bind,
//! how verbose to log. Resolution priority:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (`PORTWATCH_ROOT_FOLDER`, then `PORTWATCH_ROOT`)
//! 3. TOML config file
//! 4. OS-dependent compiled default (fallback)
//!
//! A missing or malformed TOML file never stops startup; it is logged and the
//! defaults are used.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Primary root folder environment variable
pub const ROOT_FOLDER_ENV: &str = "PORTWATCH_ROOT_FOLDER";

/// Alternative root folder environment variable
pub const ROOT_ENV: &str = "PORTWATCH_ROOT";

/// Database file name inside the root folder
pub const DATABASE_FILE: &str = "portwatch.db";

/// Default HTTP port of the review service
pub const DEFAULT_PORT: u16 = 5780;

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// Root folder holding the database
    pub root_folder: Option<PathBuf>,

    /// HTTP server port
    pub port: Option<u16>,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl TomlConfig {
    /// Parse a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load from `explicit` if given, else from the platform config location
    ///
    /// Never fails: an unreadable file yields defaults plus a warning. Nothing
    /// is logged here because this runs before the subscriber is installed;
    /// call [`LoadedConfig::log`] once logging is up.
    pub fn load_or_default(explicit: Option<&Path>) -> LoadedConfig {
        let source = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => default_config_file(),
        };

        let Some(path) = source else {
            return LoadedConfig {
                config: Self::default(),
                source: None,
                warning: None,
            };
        };

        match Self::load(&path) {
            Ok(config) => LoadedConfig {
                config,
                source: Some(path),
                warning: None,
            },
            Err(e) => LoadedConfig {
                config: Self::default(),
                warning: Some(format!("Ignoring config file {}: {}", path.display(), e)),
                source: Some(path),
            },
        }
    }

    /// Port from config, else the compiled default
    pub fn port_or_default(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }
}

/// Result of [`TomlConfig::load_or_default`]
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: TomlConfig,
    /// File that was read (or attempted)
    pub source: Option<PathBuf>,
    /// Why the file was ignored, if it was
    pub warning: Option<String>,
}

impl LoadedConfig {
    /// Report where configuration came from
    pub fn log(&self) {
        match (&self.source, &self.warning) {
            (_, Some(warning)) => warn!("{}", warning),
            (Some(path), None) => info!("Loaded config file: {}", path.display()),
            (None, None) => info!("No config file found, using compiled defaults"),
        }
    }
}

/// Resolves the root folder following the priority order in the module docs
#[derive(Debug, Clone)]
pub struct RootFolderResolver {
    module_name: String,
    cli_arg: Option<PathBuf>,
    config: Option<TomlConfig>,
}

impl RootFolderResolver {
    pub fn new(module_name: &str) -> Self {
        Self {
            module_name: module_name.to_string(),
            cli_arg: None,
            config: None,
        }
    }

    pub fn with_cli_arg(mut self, cli_arg: Option<PathBuf>) -> Self {
        self.cli_arg = cli_arg;
        self
    }

    pub fn with_config(mut self, config: TomlConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn resolve(&self) -> PathBuf {
        if let Some(path) = &self.cli_arg {
            info!("[{}] Root folder from command line: {}", self.module_name, path.display());
            return path.clone();
        }

        for var in [ROOT_FOLDER_ENV, ROOT_ENV] {
            if let Ok(path) = std::env::var(var) {
                if !path.is_empty() {
                    info!("[{}] Root folder from {}: {}", self.module_name, var, path);
                    return PathBuf::from(path);
                }
            }
        }

        if let Some(path) = self.config.as_ref().and_then(|c| c.root_folder.clone()) {
            info!("[{}] Root folder from config file: {}", self.module_name, path.display());
            return path;
        }

        let path = get_default_root_folder();
        info!("[{}] Root folder (default): {}", self.module_name, path.display());
        path
    }
}

/// Prepares the root folder and locates the database inside it
#[derive(Debug, Clone)]
pub struct RootFolderInitializer {
    root_folder: PathBuf,
}

impl RootFolderInitializer {
    pub fn new(root_folder: PathBuf) -> Self {
        Self { root_folder }
    }

    pub fn root_folder(&self) -> &Path {
        &self.root_folder
    }

    /// Create the root folder (and parents) if missing
    pub fn ensure_directory_exists(&self) -> Result<()> {
        if !self.root_folder.exists() {
            std::fs::create_dir_all(&self.root_folder)?;
            info!("Created root folder: {}", self.root_folder.display());
        }
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        self.root_folder.join(DATABASE_FILE)
    }
}

/// Platform config file location, if one exists
fn default_config_file() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("portwatch").join("config.toml"));
    if let Some(path) = user_config.filter(|p| p.exists()) {
        return Some(path);
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/portwatch/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// OS-dependent default root folder path
fn get_default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/portwatch (or /var/lib/portwatch for system-wide)
        dirs::data_local_dir()
            .map(|d| d.join("portwatch"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/portwatch"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join("portwatch"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/portwatch"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join("portwatch"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\portwatch"))
    } else {
        PathBuf::from("./portwatch_data")
    }
}
