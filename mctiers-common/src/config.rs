//! Configuration loading and root folder resolution

use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Default listen port for the web service
pub const DEFAULT_PORT: u16 = 5000;

/// Environment variable overriding the root folder
pub const ROOT_ENV_VAR: &str = "MCTIERS_ROOT";

/// Environment variable overriding the listen port
pub const PORT_ENV_VAR: &str = "MCTIERS_PORT";

/// Resolved service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Data directory holding the database
    pub root_folder: PathBuf,
    /// HTTP listen port
    pub port: u16,
}

impl ServiceConfig {
    /// Path of the SQLite database inside the root folder
    pub fn database_path(&self) -> PathBuf {
        self.root_folder.join("mctiers.db")
    }

    /// Create the root folder if it does not exist yet
    pub fn ensure_root_exists(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root_folder)?;
        Ok(())
    }
}

/// Resolve service configuration following the priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable (`MCTIERS_ROOT` / `MCTIERS_PORT`)
/// 3. TOML config file (`root_folder` / `port` keys)
/// 4. OS-dependent compiled default (fallback)
pub fn resolve(cli_root: Option<&str>, cli_port: Option<u16>) -> Result<ServiceConfig> {
    let file = load_config_file()
        .and_then(|path| std::fs::read_to_string(path).map_err(Error::from))
        .ok()
        .map(|contents| parse_config_file(&contents))
        .transpose()?
        .unwrap_or_default();

    let root_folder = cli_root
        .map(PathBuf::from)
        .or_else(|| std::env::var(ROOT_ENV_VAR).ok().map(PathBuf::from))
        .or(file.root_folder)
        .unwrap_or_else(default_root_folder);

    let port = match cli_port {
        Some(port) => port,
        None => match std::env::var(PORT_ENV_VAR) {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| Error::Config(format!("{PORT_ENV_VAR} is not a valid port: {raw}")))?,
            Err(_) => file.port.unwrap_or(DEFAULT_PORT),
        },
    };

    Ok(ServiceConfig { root_folder, port })
}

/// Values a config file may contribute
#[derive(Debug, Default)]
struct FileConfig {
    root_folder: Option<PathBuf>,
    port: Option<u16>,
}

/// Parse the TOML config file contents
fn parse_config_file(contents: &str) -> Result<FileConfig> {
    let value: toml::Value = toml::from_str(contents)
        .map_err(|e| Error::Config(format!("Invalid config file: {e}")))?;

    let root_folder = value
        .get("root_folder")
        .and_then(|v| v.as_str())
        .map(PathBuf::from);

    let port = match value.get("port") {
        None => None,
        Some(v) => {
            let raw = v
                .as_integer()
                .ok_or_else(|| Error::Config("port must be an integer".to_string()))?;
            let port = u16::try_from(raw)
                .map_err(|_| Error::Config(format!("port out of range: {raw}")))?;
            Some(port)
        }
    };

    Ok(FileConfig { root_folder, port })
}

/// Locate the platform config file, if one exists
fn load_config_file() -> Result<PathBuf> {
    let user_config = dirs::config_dir()
        .map(|d| d.join("mctiers").join("config.toml"))
        .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;
    if user_config.exists() {
        return Ok(user_config);
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/mctiers/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
    }

    Err(Error::Config("No config file found".to_string()))
}

/// OS-dependent default data directory
fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("mctiers"))
        .unwrap_or_else(|| Path::new("./mctiers_data").to_path_buf())
}
