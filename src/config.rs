// src/config.rs
use crate::data::Pid;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

/// House preselected in the renovation modeler until the user picks one.
pub const DEFAULT_HOUSE_PID: Pid = 535_454_150;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key} must be {expected}, got '{value}'")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    /// Directory holding the CSV tables.
    pub assets_dir: PathBuf,
    /// Model JSON; relative paths resolve against `assets_dir`.
    pub model_file: PathBuf,
    pub default_house_pid: Pid,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            workers: 8,
            assets_dir: PathBuf::from("assets"),
            model_file: PathBuf::from("price_model.json"),
            default_house_pid: DEFAULT_HOUSE_PID,
        }
    }
}

impl AppConfig {
    /// Reads `HOST`, `PORT`, `WORKERS`, `ASSETS_DIR`, `MODEL_FILE` and
    /// `DEFAULT_HOUSE_PID` from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(host) = lookup("HOST") {
            cfg.host = host;
        }
        if let Some(port) = lookup("PORT") {
            cfg.port = parse(port, "PORT", "a port number")?;
        }
        if let Some(workers) = lookup("WORKERS") {
            cfg.workers = parse(workers, "WORKERS", "a positive integer")?;
            if cfg.workers == 0 {
                return Err(ConfigError::Invalid {
                    key: "WORKERS",
                    expected: "a positive integer",
                    value: "0".into(),
                });
            }
        }
        if let Some(dir) = lookup("ASSETS_DIR") {
            cfg.assets_dir = PathBuf::from(dir);
        }
        if let Some(file) = lookup("MODEL_FILE") {
            cfg.model_file = PathBuf::from(file);
        }
        if let Some(pid) = lookup("DEFAULT_HOUSE_PID") {
            cfg.default_house_pid = parse(pid, "DEFAULT_HOUSE_PID", "a parcel id")?;
        }

        Ok(cfg)
    }

    pub fn addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|_| ConfigError::Invalid {
            key: "HOST",
            expected: "an IP address",
            value: self.host.clone(),
        })
    }

    pub fn model_path(&self) -> PathBuf {
        if self.model_file.is_absolute() {
            self.model_file.clone()
        } else {
            self.assets_dir.join(&self.model_file)
        }
    }
}

fn parse<T: std::str::FromStr>(
    value: String,
    key: &'static str,
    expected: &'static str,
) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid {
            key,
            expected,
            value,
        })
}
