// Runtime configuration read from the process environment.
//
// Every setting has a default, so an empty environment yields a usable local setup.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

pub const BIND_ADDR_ENV: &str = "FREELANCE_BIND_ADDR";
pub const STORAGE_ENV: &str = "FREELANCE_STORAGE";
pub const DATA_DIR_ENV: &str = "FREELANCE_DATA_DIR";
pub const MAX_PROJECTS_ENV: &str = "FREELANCE_MAX_PROJECTS";
pub const NOTIFICATIONS_ENV: &str = "FREELANCE_NOTIFICATIONS";

const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_MAX_PROJECTS: usize = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} has an invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    File,
    Memory,
}

impl FromStr for StorageKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "file" => Ok(StorageKind::File),
            "memory" => Ok(StorageKind::Memory),
            _ => Err("expected `file` or `memory`".into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub storage: StorageKind,
    pub data_dir: PathBuf,
    pub max_projects: usize,
    pub notifications: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = parse_or(&lookup, BIND_ADDR_ENV, || {
            SocketAddr::from(([127, 0, 0, 1], 8080))
        })?;
        let storage = parse_or(&lookup, STORAGE_ENV, || StorageKind::File)?;
        let data_dir = lookup(DATA_DIR_ENV)
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        let max_projects = parse_or(&lookup, MAX_PROJECTS_ENV, || DEFAULT_MAX_PROJECTS)?;
        let notifications = parse_or(&lookup, NOTIFICATIONS_ENV, || true)?;

        Ok(Self {
            bind_addr,
            storage,
            data_dir,
            max_projects,
            notifications,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            storage: StorageKind::File,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            max_projects: DEFAULT_MAX_PROJECTS,
            notifications: true,
        }
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: impl FnOnce() -> T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: ToString,
{
    let Some(raw) = lookup(name).filter(|v| !v.trim().is_empty()) else {
        return Ok(default());
    };
    raw.trim().parse::<T>().map_err(|err| ConfigError::Invalid {
        name,
        value: raw.clone(),
        reason: err.to_string(),
    })
}
