//! Process-level configuration consulted when resolving Hadoop settings.

use crate::ConfigError;
use log::{debug, info};
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Path of an explicit HDFS default-config file.
pub const HDFS_DEFAULT_CONFIG: &str = "fs.hdfs.hdfsdefault";
/// Path of an explicit HDFS site-config file.
pub const HDFS_SITE_CONFIG: &str = "fs.hdfs.hdfssite";
/// Directory searched for `core-site.xml` / `hdfs-site.xml` after the
/// environment-derived ones.
pub const PATH_HADOOP_CONFIG: &str = "fs.hdfs.hadoopconf";

/// String lookups over an already-loaded process configuration.
pub trait ProcessConfig {
    /// Value for `key`, or `None` when unset.
    fn get_string(&self, key: &str) -> Option<String>;
}

/// Flat key/value process configuration in the `flink-conf.yaml` style.
///
/// Nested mappings are flattened with `.` separators and sequences are joined
/// with `;`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlinkConfig {
    entries: BTreeMap<String, String>,
}

impl FlinkConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`FlinkConfig::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// All entries, sorted by key.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Load from a file; `.json5`/`.json` use JSON5, anything else YAML.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!("loading process config from path: {}", path.display());
        let contents = fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json5") | Some("json") => Self::load_from_json5_str(&contents),
            _ => Self::load_from_yaml_str(&contents),
        }
    }

    /// Parse YAML contents. An empty document yields an empty config.
    pub fn load_from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        debug!("loading process config from yaml (len={})", contents.len());
        let value: YamlValue = serde_yaml::from_str(contents)?;
        let mut config = Self::new();
        match value {
            YamlValue::Null => {}
            YamlValue::Mapping(_) => flatten_yaml(&mut config.entries, None, &value)?,
            _ => {
                return Err(ConfigError::Invalid(
                    "process config must be a mapping".to_string(),
                ));
            }
        }
        Ok(config)
    }

    /// Parse JSON5 contents.
    pub fn load_from_json5_str(contents: &str) -> Result<Self, ConfigError> {
        debug!("loading process config from json5 (len={})", contents.len());
        let value: JsonValue = json5::from_str(contents)?;
        if !value.is_object() {
            return Err(ConfigError::Invalid(
                "process config must be an object".to_string(),
            ));
        }
        let mut config = Self::new();
        flatten_json(&mut config.entries, None, &value);
        Ok(config)
    }
}

impl ProcessConfig for FlinkConfig {
    fn get_string(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}

impl ProcessConfig for BTreeMap<String, String> {
    fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

fn join_key(prefix: Option<&str>, key: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}.{key}"),
        None => key.to_string(),
    }
}

fn flatten_yaml(
    entries: &mut BTreeMap<String, String>,
    prefix: Option<&str>,
    value: &YamlValue,
) -> Result<(), ConfigError> {
    match value {
        YamlValue::Mapping(map) => {
            for (key, child) in map {
                let key = yaml_scalar(key).ok_or_else(|| {
                    ConfigError::Invalid(format!(
                        "process config keys must be scalars (under {})",
                        prefix.unwrap_or("<root>")
                    ))
                })?;
                flatten_yaml(entries, Some(&join_key(prefix, &key)), child)?;
            }
        }
        YamlValue::Sequence(items) => {
            if let Some(prefix) = prefix {
                let joined: Vec<String> = items.iter().filter_map(yaml_scalar).collect();
                entries.insert(prefix.to_string(), joined.join(";"));
            }
        }
        YamlValue::Tagged(tagged) => flatten_yaml(entries, prefix, &tagged.value)?,
        scalar => {
            if let (Some(prefix), Some(value)) = (prefix, yaml_scalar(scalar)) {
                entries.insert(prefix.to_string(), value);
            }
        }
    }
    Ok(())
}

fn yaml_scalar(value: &YamlValue) -> Option<String> {
    match value {
        YamlValue::String(value) => Some(value.clone()),
        YamlValue::Number(value) => Some(value.to_string()),
        YamlValue::Bool(value) => Some(value.to_string()),
        _ => None,
    }
}

fn flatten_json(entries: &mut BTreeMap<String, String>, prefix: Option<&str>, value: &JsonValue) {
    match value {
        JsonValue::Object(map) => {
            for (key, child) in map {
                flatten_json(entries, Some(&join_key(prefix, key)), child);
            }
        }
        JsonValue::Array(items) => {
            if let Some(prefix) = prefix {
                let joined: Vec<String> = items.iter().filter_map(json_scalar).collect();
                entries.insert(prefix.to_string(), joined.join(";"));
            }
        }
        scalar => {
            if let (Some(prefix), Some(value)) = (prefix, json_scalar(scalar)) {
                entries.insert(prefix.to_string(), value);
            }
        }
    }
}

fn json_scalar(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(value) => Some(value.clone()),
        JsonValue::Number(value) => Some(value.to_string()),
        JsonValue::Bool(value) => Some(value.to_string()),
        _ => None,
    }
}
