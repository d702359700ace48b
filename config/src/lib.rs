//! Settings for switchyard: project `.env` plus `$XDG_CONFIG_HOME/<app>/config.toml`,
//! applied to the process environment with priority **existing env > .env > XDG**.
//!
//! Call [`load_and_apply`] once at startup, before anything reads `OPENAI_*`.
//! [`resolve`] does the same lookup without touching the environment and reports
//! where each value came from.

mod dotenv;
mod xdg_toml;

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;

use thiserror::Error;

pub use xdg_toml::config_file_path;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("xdg config path: {0}")]
    XdgPath(String),
    #[error("read xdg config: {0}")]
    XdgRead(std::io::Error),
    #[error("parse xdg toml: {0}")]
    XdgParse(#[from] toml::de::Error),
    #[error("read .env: {0}")]
    DotenvRead(std::io::Error),
}

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Process,
    DotEnv,
    Xdg,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Process => "environment",
            Self::DotEnv => ".env",
            Self::Xdg => "config.toml",
        })
    }
}

/// Winning value and its source for every key found in `.env` or `config.toml`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ResolvedEnv {
    entries: BTreeMap<String, (String, Source)>,
}

impl ResolvedEnv {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|(v, _)| v.as_str())
    }

    pub fn source(&self, key: &str) -> Option<Source> {
        self.entries.get(key).map(|(_, s)| *s)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sets every key whose value came from a file. Process values are left alone.
    pub fn apply(&self) {
        for (key, (value, source)) in &self.entries {
            if *source != Source::Process {
                std::env::set_var(key, value);
            }
        }
    }
}

fn merge(
    process: impl Fn(&str) -> Option<String>,
    dotenv: HashMap<String, String>,
    xdg: HashMap<String, String>,
) -> ResolvedEnv {
    let mut entries = BTreeMap::new();
    for (key, value) in xdg {
        entries.insert(key, (value, Source::Xdg));
    }
    for (key, value) in dotenv {
        entries.insert(key, (value, Source::DotEnv));
    }
    for (key, entry) in entries.iter_mut() {
        if let Some(value) = process(key) {
            *entry = (value, Source::Process);
        }
    }
    ResolvedEnv { entries }
}

/// Reads `.env` (from `override_dir` or the current directory) and the XDG config
/// for `app_name`, and resolves each key against the current environment.
pub fn resolve(app_name: &str, override_dir: Option<&Path>) -> Result<ResolvedEnv, LoadError> {
    let xdg = xdg_toml::load_env_map(app_name)?;
    let dotenv = dotenv::load_env_map(override_dir).map_err(LoadError::DotenvRead)?;
    Ok(merge(|k| std::env::var(k).ok(), dotenv, xdg))
}

/// Resolves and applies: keys missing from the process environment are set from
/// `.env`, else from `config.toml`.
///
/// * `app_name`: e.g. `"switchyard"`, giving `~/.config/switchyard/config.toml`.
/// * `override_dir`: directory holding `.env` instead of the current directory.
pub fn load_and_apply(app_name: &str, override_dir: Option<&Path>) -> Result<(), LoadError> {
    resolve(app_name, override_dir)?.apply();
    Ok(())
}
