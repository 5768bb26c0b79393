//! Configuration initialization command.

use std::path::{Path, PathBuf};

use carefinder::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Write a default config file to `path` (or `~/.carefinder/config.ini`).
///
/// An existing file is left untouched unless `force` is set.
pub fn run(path: Option<PathBuf>, force: bool) -> Result<(), CliError> {
    let path = path.unwrap_or_else(config_file_path);

    if write_default_config(&path, force)? {
        println!("Created configuration file: {}", path.display());
    } else {
        println!("Configuration file already exists: {}", path.display());
        println!("Use --force to overwrite it with defaults.");
    }
    Ok(())
}

/// Returns whether a file was written.
fn write_default_config(path: &Path, force: bool) -> Result<bool, CliError> {
    if path.exists() && !force {
        return Ok(false);
    }
    ConfigFile::default().save_to(path)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_writes_loadable_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("carefinder").join("config.ini");

        assert!(write_default_config(&path, false).unwrap());
        assert_eq!(ConfigFile::load_from(&path).unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_keeps_existing_file_without_force() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.ini");
        std::fs::write(&path, "[cache]\nttl = 5\n").unwrap();

        assert!(!write_default_config(&path, false).unwrap());
        assert_eq!(ConfigFile::load_from(&path).unwrap().cache.ttl, 5);

        assert!(write_default_config(&path, true).unwrap());
        assert_eq!(ConfigFile::load_from(&path).unwrap().cache.ttl, 1200);
    }
}
