//! Rendering of resolved configurations for the CLI.

use hdfs_bridge_config::{ConfigError, Configuration, ResolvedHadoopConf};
use serde_json::{Map, Value, json};

/// `key=value` lines sorted by key, values expanded.
pub fn render_properties(conf: &Configuration) -> Result<String, ConfigError> {
    let mut out = String::new();
    for (key, _) in conf.entries()? {
        let value = conf.get(&key)?.unwrap_or_default();
        out.push_str(&key);
        out.push('=');
        out.push_str(&value);
        out.push('\n');
    }
    Ok(out)
}

/// JSON document with the added resources and the expanded properties.
pub fn properties_json(resolved: &ResolvedHadoopConf) -> Result<Value, ConfigError> {
    let mut properties = Map::new();
    for (key, _) in resolved.configuration.entries()? {
        let value = resolved.configuration.get(&key)?.unwrap_or_default();
        properties.insert(key, Value::String(value));
    }
    let resources: Vec<Value> = resolved
        .resources
        .iter()
        .map(|resource| {
            json!({
                "origin": resource.origin.to_string(),
                "path": resource.path.display().to_string(),
            })
        })
        .collect();
    Ok(json!({
        "found": resolved.found(),
        "resources": resources,
        "properties": properties,
    }))
}
