//! Keep an existing configuration file in step with the current `Config`.
//!
//! Keys added in newer versions are filled with their defaults; values the
//! user already set are never touched.

use super::Config;
use crate::errors::{AppError, AppResult};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Every key a complete configuration file carries.
pub const KNOWN_KEYS: [&str; 5] = [
    "api_url",
    "upcoming_limit",
    "trend_months",
    "separator_char",
    "log_level",
];

fn defaults_mapping() -> AppResult<Mapping> {
    match serde_yaml::to_value(Config::default())? {
        Value::Mapping(map) => Ok(map),
        _ => Err(AppError::Config(
            "default configuration is not a mapping".to_string(),
        )),
    }
}

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    if !path.exists() {
        return Ok(Mapping::new());
    }
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Mapping::new());
    }
    match serde_yaml::from_str::<Value>(&content)? {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Config(format!(
            "{} does not contain a YAML mapping",
            path.display()
        ))),
    }
}

/// Keys missing from the file (all of them when the file does not exist).
pub fn missing_keys(path: &Path) -> AppResult<Vec<&'static str>> {
    let map = read_mapping(path)?;
    Ok(KNOWN_KEYS
        .into_iter()
        .filter(|k| !map.contains_key(Value::String((*k).to_string())))
        .collect())
}

/// Add the missing keys with default values and rewrite the file.
///
/// Returns the keys that were added; nothing is written when none are missing.
pub fn migrate_file(path: &Path) -> AppResult<Vec<&'static str>> {
    let mut map = read_mapping(path)?;
    let defaults = defaults_mapping()?;
    let mut added = Vec::new();

    for key in KNOWN_KEYS {
        let k = Value::String(key.to_string());
        if map.contains_key(&k) {
            continue;
        }
        if let Some(v) = defaults.get(&k) {
            map.insert(k, v.clone());
            added.push(key);
        }
    }

    if added.is_empty() {
        return Ok(added);
    }

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let serialized = serde_yaml::to_string(&Value::Mapping(map))?;
    fs::write(path, serialized)?;
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_conf(name: &str) -> std::path::PathBuf {
        let dir = env::temp_dir().join(format!("rtaskflow_migrate_{name}"));
        fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("rtaskflow.conf");
        fs::remove_file(&path).ok();
        path
    }

    #[test]
    fn missing_file_lacks_every_key() {
        let path = temp_conf("absent");
        assert_eq!(missing_keys(&path).expect("check").len(), KNOWN_KEYS.len());
    }

    #[test]
    fn migration_preserves_user_values() {
        let path = temp_conf("preserve");
        fs::write(&path, "api_url: http://hr.local:9000\ntrend_months: 12\n").expect("write");

        let added = migrate_file(&path).expect("migrate");
        assert_eq!(added, vec!["upcoming_limit", "separator_char", "log_level"]);

        let cfg = Config::load_from(&path).expect("load");
        assert_eq!(cfg.api_url, "http://hr.local:9000");
        assert_eq!(cfg.trend_months, 12);
        assert_eq!(cfg.upcoming_limit, 5);
        assert!(missing_keys(&path).expect("check").is_empty());
    }
}
