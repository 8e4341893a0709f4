//! Common test utilities

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary directory with a graft.yml task file
pub fn create_task_file(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let task_path = temp_dir.path().join("graft.yml");
    fs::write(&task_path, content).unwrap();
    (temp_dir, task_path)
}
