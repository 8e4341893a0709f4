//! Task file parsing and discovery

use crate::config::types::Config;
use crate::error::{ConfigError, ConfigResult, GraftError};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default task file names to search for
const TASK_FILE_NAMES: &[&str] = &["graft.yml", "graft.yaml"];

/// Find the task file by searching current and parent directories
pub fn find_task_file() -> ConfigResult<PathBuf> {
    find_task_file_from(
        env::current_dir()
            .map_err(|e| ConfigError::Invalid(format!("failed to get current directory: {}", e)))?,
    )
}

/// Find the task file starting from a specific directory
pub fn find_task_file_from(start_dir: PathBuf) -> ConfigResult<PathBuf> {
    let mut current_dir = start_dir;
    let mut searched_paths = Vec::new();

    loop {
        for file_name in TASK_FILE_NAMES {
            let task_path = current_dir.join(file_name);
            searched_paths.push(task_path.display().to_string());

            if task_path.is_file() {
                return Ok(task_path);
            }
        }

        match current_dir.parent() {
            Some(parent) => current_dir = parent.to_path_buf(),
            None => {
                // Reached root without finding a task file
                return Err(ConfigError::NotFound(searched_paths.join(", ")));
            }
        }
    }
}

/// Parse a task file from a path
pub fn parse_config_file(path: &Path) -> Result<Config, GraftError> {
    let contents = fs::read_to_string(path).map_err(|e| {
        ConfigError::Invalid(format!("failed to read {}: {}", path.display(), e))
    })?;

    parse_config(&contents)
}

/// Parse a task file from a string
pub fn parse_config(yaml: &str) -> Result<Config, GraftError> {
    let config: Config = serde_yaml::from_str(yaml)?;
    Ok(config)
}

/// Parse the task file with automatic discovery
pub fn parse_config_auto() -> Result<(Config, PathBuf), GraftError> {
    let task_path = find_task_file()?;
    let config = parse_config_file(&task_path)?;
    Ok((config, task_path))
}
