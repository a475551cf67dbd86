//! Resolution of the effective Hadoop configuration.
//!
//! Starts from the built-in HDFS resources, then overlays (low -> high):
//! the explicit default/site files named by the process config, and
//! `core-site.xml` / `hdfs-site.xml` from each existing candidate directory
//! (`$HADOOP_HOME/conf`, `$HADOOP_HOME/etc/hadoop`, `$HADOOP_CONF_DIR`, the
//! process config's `fs.hdfs.hadoopconf`).
//!
//! The explicit files are added without an existence check and left to the
//! store's quiet handling of missing resources; candidate files are only added
//! when present on disk.

mod candidates;
mod observer;

use crate::{Configuration, HDFS_DEFAULT_CONFIG, HDFS_SITE_CONFIG, ProcessConfig};
use hdfs_bridge_protocol::{EnvSource, ProcessEnv};
use log::info;
use std::fmt;
use std::path::{Path, PathBuf};

pub use observer::{LogObserver, ResolveObserver};

/// Common configuration file name in a Hadoop conf directory.
pub const CORE_SITE_FILE: &str = "core-site.xml";
/// HDFS configuration file name in a Hadoop conf directory.
pub const HDFS_SITE_FILE: &str = "hdfs-site.xml";

/// Where an added resource came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceOrigin {
    /// `fs.hdfs.hdfsdefault` from the process config.
    ProcessDefaultFile,
    /// `fs.hdfs.hdfssite` from the process config.
    ProcessSiteFile,
    /// `$HADOOP_HOME/conf`.
    HadoopHomeConf,
    /// `$HADOOP_HOME/etc/hadoop`.
    HadoopHomeEtc,
    /// `$HADOOP_CONF_DIR`.
    HadoopConfDir,
    /// `fs.hdfs.hadoopconf` from the process config.
    ProcessConfigDir,
}

impl fmt::Display for ResourceOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ProcessDefaultFile => HDFS_DEFAULT_CONFIG,
            Self::ProcessSiteFile => HDFS_SITE_CONFIG,
            Self::HadoopHomeConf => "HADOOP_HOME/conf",
            Self::HadoopHomeEtc => "HADOOP_HOME/etc/hadoop",
            Self::HadoopConfDir => "HADOOP_CONF_DIR",
            Self::ProcessConfigDir => crate::PATH_HADOOP_CONFIG,
        };
        f.write_str(label)
    }
}

/// A resource added on top of the built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedResource {
    /// Candidate slot or process-config key that produced the file.
    pub origin: ResourceOrigin,
    /// File handed to the configuration, in the form it was added.
    pub path: PathBuf,
}

/// Effective configuration plus the resources that were layered into it.
#[derive(Debug, Clone)]
pub struct ResolvedHadoopConf {
    /// Built-in defaults with every added resource layered on top.
    pub configuration: Configuration,
    /// Added resources in application order.
    pub resources: Vec<AddedResource>,
}

impl ResolvedHadoopConf {
    /// Whether anything beyond the built-in defaults was added.
    pub fn found(&self) -> bool {
        !self.resources.is_empty()
    }
}

/// Inputs for [`resolve_with_report`].
#[derive(Clone, Copy)]
pub struct ResolveOptions<'a> {
    /// Source of the explicit file paths and the fallback conf directory.
    pub process: &'a dyn ProcessConfig,
    /// Environment consulted for `HADOOP_HOME` and `HADOOP_CONF_DIR`.
    pub env: &'a dyn EnvSource,
    /// Receives a note for every found or skipped source.
    pub observer: &'a dyn ResolveObserver,
}

impl<'a> ResolveOptions<'a> {
    /// Resolve against the real process environment, logging notes.
    pub fn new(process: &'a dyn ProcessConfig) -> Self {
        Self {
            process,
            env: &ProcessEnv,
            observer: &LogObserver,
        }
    }

    pub fn with_env(mut self, env: &'a dyn EnvSource) -> Self {
        self.env = env;
        self
    }

    pub fn with_observer(mut self, observer: &'a dyn ResolveObserver) -> Self {
        self.observer = observer;
        self
    }
}

/// Resolve the effective Hadoop configuration using the process environment.
pub fn resolve_hadoop_configuration(process: &dyn ProcessConfig) -> Configuration {
    resolve_with_report(ResolveOptions::new(process)).configuration
}

/// Resolve the effective Hadoop configuration and report what was added.
///
/// Never fails: when nothing is found the built-in defaults are returned.
pub fn resolve_with_report(options: ResolveOptions<'_>) -> ResolvedHadoopConf {
    let ResolveOptions {
        process,
        env,
        observer,
    } = options;
    let mut resolved = ResolvedHadoopConf {
        configuration: Configuration::hdfs(),
        resources: Vec::new(),
    };

    for (key, origin, label) in [
        (
            HDFS_DEFAULT_CONFIG,
            ResourceOrigin::ProcessDefaultFile,
            "hdfs-default",
        ),
        (HDFS_SITE_CONFIG, ResourceOrigin::ProcessSiteFile, "hdfs-site"),
    ] {
        match process.get_string(key) {
            Some(path) => {
                observer.note(&format!(
                    "using {label} configuration file from process config (key={key}, path={path})"
                ));
                add(&mut resolved, origin, PathBuf::from(path));
            }
            None => observer.note(&format!(
                "no {label} configuration file in process config (key={key})"
            )),
        }
    }

    for candidate in candidates::candidate_dirs(env, process) {
        let Some(dir) = candidate.path else {
            continue;
        };
        if !dir.exists() {
            observer.note(&format!(
                "skipping missing hadoop conf dir (origin={}, path={})",
                candidate.origin,
                dir.display()
            ));
            continue;
        }
        for file in [CORE_SITE_FILE, HDFS_SITE_FILE] {
            add_if_exists(&mut resolved, observer, candidate.origin, &dir, file);
        }
    }

    if !resolved.found() {
        observer.note(
            "could not find hadoop configuration via any supported method \
             (process config, environment variables)",
        );
    }
    info!(
        "resolved hadoop configuration (added_resources={})",
        resolved.resources.len()
    );
    resolved
}

fn add(resolved: &mut ResolvedHadoopConf, origin: ResourceOrigin, path: PathBuf) {
    resolved.configuration.add_resource(path.clone());
    resolved.resources.push(AddedResource { origin, path });
}

fn add_if_exists(
    resolved: &mut ResolvedHadoopConf,
    observer: &dyn ResolveObserver,
    origin: ResourceOrigin,
    dir: &Path,
    file: &str,
) {
    let path = dir.join(file);
    if path.exists() {
        observer.note(&format!(
            "adding {} to hadoop configuration (origin={origin})",
            path.display()
        ));
        add(resolved, origin, path);
    }
}
