//! Run configuration naming the topology data files.
//!
//! The configuration is a small YAML document pointing at the three
//! delimited text files a snapshot is loaded from. Relative paths are
//! resolved against the configuration file's own directory, so a config can
//! sit next to its data and be invoked from anywhere.

use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Problems with the configuration's content rather than its syntax.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The same file is named for two different record kinds.
    #[error("data files must be distinct: {} is listed twice", .0.display())]
    DuplicatePath(PathBuf),
}

/// Paths to the delimited text files holding one network snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Host records: id;ip;mac;active;location
    pub hosts: PathBuf,
    /// Router records: id;ip;mac;active;location;model;firmware;throughput
    pub routers: PathBuf,
    /// Link records: source_ip;target_ip;link_type;bandwidth;latency;error_rate
    pub links: PathBuf,
}

impl Config {
    /// Reject configurations that point two record kinds at one file.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.hosts == self.routers || self.hosts == self.links {
            return Err(ValidationError::DuplicatePath(self.hosts.clone()));
        }
        if self.routers == self.links {
            return Err(ValidationError::DuplicatePath(self.routers.clone()));
        }
        Ok(())
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        for path in [&mut self.hosts, &mut self.routers, &mut self.links] {
            if path.is_relative() {
                *path = base.join(&path);
            }
        }
    }
}

/// Parse a configuration document without touching the filesystem.
pub fn load_config_from_str(content: &str) -> Result<Config> {
    let config: Config =
        serde_yaml::from_str(content).wrap_err("Failed to parse configuration YAML")?;
    config.validate()?;
    Ok(config)
}

/// Load and validate the configuration file at `path`.
pub fn load_config(path: &Path) -> Result<Config> {
    info!("Loading configuration from {}", path.display());
    let content = fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;
    let mut config = load_config_from_str(&content)
        .wrap_err_with(|| format!("Invalid configuration in {}", path.display()))?;
    if let Some(base) = path.parent() {
        config.resolve_relative_to(base);
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_parse_minimal_config() {
        let config = load_config_from_str(
            "hosts: hosts.txt\nrouters: routers.txt\nlinks: links.txt\n",
        )
        .unwrap();
        assert_eq!(config.hosts, PathBuf::from("hosts.txt"));
        assert_eq!(config.routers, PathBuf::from("routers.txt"));
        assert_eq!(config.links, PathBuf::from("links.txt"));
    }

    #[test]
    fn test_duplicate_path_rejected() {
        let err = load_config_from_str(
            "hosts: data.txt\nrouters: data.txt\nlinks: links.txt\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("listed twice"));
    }

    #[test]
    fn test_validate_catches_router_link_collision() {
        let config = Config {
            hosts: PathBuf::from("a.txt"),
            routers: PathBuf::from("b.txt"),
            links: PathBuf::from("b.txt"),
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::DuplicatePath(PathBuf::from("b.txt")))
        );
    }

    #[test]
    fn test_load_from_file_resolves_relative_paths() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("network.yaml");
        fs::write(
            &config_path,
            "hosts: hosts.txt\nrouters: routers.txt\nlinks: links.txt\n",
        )
        .unwrap();
        let config = load_config(&config_path).unwrap();
        assert_eq!(config.hosts, dir.path().join("hosts.txt"));
        assert_eq!(config.links, dir.path().join("links.txt"));
    }

    #[test]
    fn test_absolute_paths_kept_as_is() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "hosts: /data/hosts.txt").unwrap();
        writeln!(file, "routers: /data/routers.txt").unwrap();
        writeln!(file, "links: /data/links.txt").unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.hosts, PathBuf::from("/data/hosts.txt"));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_config(Path::new("/nonexistent/network.yaml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/network.yaml"));
    }

    #[test]
    fn test_malformed_yaml_rejected() {
        assert!(load_config_from_str("hosts: [unclosed").is_err());
    }
}
