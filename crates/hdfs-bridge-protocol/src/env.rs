//! Environment variable access behind a trait so lookups can be substituted.

use std::collections::{BTreeMap, HashMap};

/// Root of a Hadoop installation.
pub const HADOOP_HOME_ENV: &str = "HADOOP_HOME";
/// Directory holding `core-site.xml` / `hdfs-site.xml`.
pub const HADOOP_CONF_DIR_ENV: &str = "HADOOP_CONF_DIR";
/// Overrides the user name reported by the security context.
pub const HADOOP_USER_NAME_ENV: &str = "HADOOP_USER_NAME";
/// Path of the token storage file loaded into the current user's credentials.
pub const HADOOP_TOKEN_FILE_LOCATION_ENV: &str = "HADOOP_TOKEN_FILE_LOCATION";

/// Read-only view over environment variables.
pub trait EnvSource {
    /// Return the value of `key`, or `None` when unset or not valid unicode.
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<T: EnvSource + ?Sized> EnvSource for &T {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}
