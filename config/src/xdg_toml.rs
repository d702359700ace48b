//! `$XDG_CONFIG_HOME/<app>/config.toml` reader.
//!
//! ```toml
//! [model]
//! name = "gpt-4o-mini"   # becomes OPENAI_MODEL
//! temperature = 0.2      # becomes OPENAI_TEMPERATURE
//!
//! [env]
//! OPENAI_API_KEY = "sk-..."
//! ```
//!
//! Keys in `[env]` win over the ones derived from `[model]`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::LoadError;

/// Config home: `$XDG_CONFIG_HOME` when set and non-empty, else `~/.config`.
pub fn config_home() -> Result<PathBuf, LoadError> {
    if let Some(dir) = std::env::var_os("XDG_CONFIG_HOME").filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".config"))
        .ok_or_else(|| LoadError::XdgPath("cannot determine home directory".to_string()))
}

/// `<config home>/<app_name>/config.toml`, whether or not it exists.
pub fn config_file_path(app_name: &str) -> Result<PathBuf, LoadError> {
    Ok(config_home()?.join(app_name).join("config.toml"))
}

#[derive(serde::Deserialize, Default)]
struct ModelTable {
    name: Option<String>,
    temperature: Option<f64>,
}

#[derive(serde::Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    model: ModelTable,
    #[serde(default)]
    env: HashMap<String, String>,
}

/// Env pairs from the file at `path`. A missing file yields an empty map.
pub fn load_env_map_from(path: &Path) -> Result<HashMap<String, String>, LoadError> {
    if !path.is_file() {
        return Ok(HashMap::new());
    }
    let content = std::fs::read_to_string(path).map_err(LoadError::XdgRead)?;
    let file: ConfigFile = toml::from_str(&content)?;

    let mut out = HashMap::new();
    if let Some(name) = file.model.name {
        out.insert("OPENAI_MODEL".to_string(), name);
    }
    if let Some(t) = file.model.temperature {
        out.insert("OPENAI_TEMPERATURE".to_string(), t.to_string());
    }
    out.extend(file.env);
    Ok(out)
}

pub fn load_env_map(app_name: &str) -> Result<HashMap<String, String>, LoadError> {
    load_env_map_from(&config_file_path(app_name)?)
}
