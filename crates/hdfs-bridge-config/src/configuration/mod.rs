//! Overlay key/value store built from an ordered list of resources.
//!
//! Resources are recorded by [`Configuration::add_resource`] and loaded lazily
//! on the first read. Later resources override earlier ones unless a key was
//! marked final; values assigned with [`Configuration::set`] are applied last.

mod resource;
mod substitute;


use crate::ConfigError;
use hdfs_bridge_protocol::{EnvSource, ProcessEnv, writable};
use log::{debug, warn};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashSet};
use std::io::{Read, Write};
use std::sync::Arc;

pub use resource::{HDFS_DEFAULT_RESOURCE, HDFS_SITE_RESOURCE, Resource};

/// Provenance recorded for values assigned in code.
const PROGRAMMATIC_SOURCE: &str = "programmatically";

/// Hadoop-style configuration: resources overlaid in order plus explicit sets.
#[derive(Debug)]
pub struct Configuration {
    resources: Vec<Resource>,
    overlay: BTreeMap<String, OverlayEntry>,
    quiet: bool,
    loaded: RwLock<Option<Arc<Properties>>>,
}

/// A value assigned with `set` or decoded from the wire.
#[derive(Debug, Clone)]
struct OverlayEntry {
    value: String,
    sources: Vec<String>,
}

/// Loaded view of every resource and the overlay.
#[derive(Debug, Default)]
struct Properties {
    values: BTreeMap<String, String>,
    finals: HashSet<String>,
    sources: BTreeMap<String, Vec<String>>,
}

impl Properties {
    fn apply(&mut self, name: String, value: String, is_final: bool, source: &str) {
        if self.finals.contains(&name) {
            if self.values.get(&name) != Some(&value) {
                warn!("ignoring attempt to override final parameter (name={name}, source={source})");
            }
            return;
        }
        if is_final {
            self.finals.insert(name.clone());
        }
        self.sources.insert(name.clone(), vec![source.to_string()]);
        self.values.insert(name, value);
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::empty()
    }
}

impl Clone for Configuration {
    fn clone(&self) -> Self {
        Self {
            resources: self.resources.clone(),
            overlay: self.overlay.clone(),
            quiet: self.quiet,
            loaded: RwLock::new(self.loaded.read().clone()),
        }
    }
}

impl Configuration {
    /// Create a configuration with no resources.
    pub fn empty() -> Self {
        Self {
            resources: Vec::new(),
            overlay: BTreeMap::new(),
            quiet: true,
            loaded: RwLock::new(None),
        }
    }

    /// Create a configuration seeded with the built-in HDFS default and site
    /// resources.
    pub fn hdfs() -> Self {
        let mut conf = Self::empty();
        conf.add_resource(Resource::hdfs_default());
        conf.add_resource(Resource::hdfs_site());
        conf
    }

    /// Append a resource; it overrides everything added before it.
    pub fn add_resource(&mut self, resource: impl Into<Resource>) {
        let resource = resource.into();
        debug!("adding configuration resource (name={})", resource.name());
        self.resources.push(resource);
        self.invalidate();
    }

    /// Resources in the order they are applied.
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Whether missing file resources are skipped (the default) or rejected.
    pub fn set_quiet_mode(&mut self, quiet: bool) {
        self.quiet = quiet;
        self.invalidate();
    }

    /// Assign a value that overrides every resource, final keys included.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.overlay.insert(
            name.into(),
            OverlayEntry {
                value: value.into(),
                sources: vec![PROGRAMMATIC_SOURCE.to_string()],
            },
        );
        self.invalidate();
    }

    /// Value for `name` with `${var}` references expanded.
    ///
    /// `${env.NAME}` references read the process environment.
    pub fn get(&self, name: &str) -> Result<Option<String>, ConfigError> {
        self.get_with_env(name, &ProcessEnv)
    }

    /// Like [`Configuration::get`], resolving `${env.NAME}` against `env`.
    pub fn get_with_env(
        &self,
        name: &str,
        env: &dyn EnvSource,
    ) -> Result<Option<String>, ConfigError> {
        let props = self.properties()?;
        let Some(raw) = props.values.get(name) else {
            return Ok(None);
        };
        let expanded = substitute::substitute_vars(raw, |var| lookup_var(&props, env, var))?;
        Ok(Some(expanded))
    }

    /// Value for `name` without variable expansion.
    pub fn get_raw(&self, name: &str) -> Result<Option<String>, ConfigError> {
        Ok(self.properties()?.values.get(name).cloned())
    }

    /// All raw key/value pairs, sorted by key.
    pub fn entries(&self) -> Result<Vec<(String, String)>, ConfigError> {
        Ok(self
            .properties()?
            .values
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect())
    }

    /// Number of loaded properties.
    pub fn len(&self) -> Result<usize, ConfigError> {
        Ok(self.properties()?.values.len())
    }

    /// Whether no property is loaded.
    pub fn is_empty(&self) -> Result<bool, ConfigError> {
        Ok(self.len()? == 0)
    }

    /// Resources that last set `name`.
    pub fn property_sources(&self, name: &str) -> Result<Option<Vec<String>>, ConfigError> {
        Ok(self.properties()?.sources.get(name).cloned())
    }

    /// Whether `name` was marked final by a resource.
    pub fn is_final(&self, name: &str) -> Result<bool, ConfigError> {
        Ok(self.properties()?.finals.contains(name))
    }

    /// Write every property in Hadoop's `Configuration.write` layout.
    pub fn write<W: Write + ?Sized>(&self, out: &mut W) -> Result<(), ConfigError> {
        let props = self.properties()?;
        let count = i32::try_from(props.values.len())
            .map_err(|_| ConfigError::Invalid(format!("too many properties: {}", props.values.len())))?;
        writable::write_vint(out, count)?;
        for (key, value) in &props.values {
            writable::write_string(out, key)?;
            writable::write_string(out, value)?;
            let sources = props.sources.get(key).map(Vec::as_slice);
            writable::write_compressed_string_array(out, sources)?;
        }
        Ok(())
    }

    /// Replace all assigned values with those read from `input`.
    ///
    /// Unlike Hadoop's `readFields`, which clears the resource list too,
    /// resources stay registered; decoded values land in the overlay and so
    /// take precedence over them.
    pub fn read_fields<R: Read + ?Sized>(&mut self, input: &mut R) -> Result<(), ConfigError> {
        self.overlay.clear();
        self.invalidate();
        let count = writable::read_vint(input)?;
        if count < 0 {
            return Err(ConfigError::Invalid(format!("negative property count: {count}")));
        }
        for _ in 0..count {
            let key = writable::read_string(input)?;
            let value = writable::read_string(input)?;
            let sources = writable::read_compressed_string_array(input)?
                .unwrap_or_else(|| vec![PROGRAMMATIC_SOURCE.to_string()]);
            self.overlay.insert(key, OverlayEntry { value, sources });
        }
        debug!("read configuration fields (count={count})");
        Ok(())
    }

    fn invalidate(&mut self) {
        *self.loaded.get_mut() = None;
    }

    fn properties(&self) -> Result<Arc<Properties>, ConfigError> {
        if let Some(props) = self.loaded.read().as_ref() {
            return Ok(Arc::clone(props));
        }

        let mut props = Properties::default();
        for resource in &self.resources {
            let Some(parsed) = resource.load(self.quiet)? else {
                continue;
            };
            let name = resource.name();
            for property in parsed {
                props.apply(property.name, property.value, property.is_final, &name);
            }
        }
        for (key, entry) in &self.overlay {
            props.values.insert(key.clone(), entry.value.clone());
            props.sources.insert(key.clone(), entry.sources.clone());
        }

        debug!(
            "loaded configuration (resources={}, properties={})",
            self.resources.len(),
            props.values.len()
        );
        let props = Arc::new(props);
        *self.loaded.write() = Some(Arc::clone(&props));
        Ok(props)
    }
}

/// Resolve a `${var}` reference: `env.NAME` from `env`, anything else from
/// the loaded properties.
fn lookup_var(props: &Properties, env: &dyn EnvSource, var: &str) -> Option<String> {
    if let Some(env_name) = var.strip_prefix("env.") {
        return env.var(env_name);
    }
    props.values.get(var).cloned()
}
