//! Hadoop client configuration: the overlay store, its binary codec, and the
//! resolver that decides which `*-site.xml` resources to load.
//!
//! The resolver and codec share nothing but the [`Configuration`] type; the
//! resolver builds one, the codec moves one across a process boundary.

mod codec;
mod configuration;
mod error;
mod process;
mod resolver;

/// Binary transport for configuration objects.
pub use codec::{
    HADOOP_CONF_BYTES, MemorySink, MemorySource, Release, ScopedSink, ScopedSource,
    deserialize_from, deserialize_hadoop_conf, serialize_hadoop_conf, serialize_into,
};
/// Overlay store and its resources.
pub use configuration::{Configuration, HDFS_DEFAULT_RESOURCE, HDFS_SITE_RESOURCE, Resource};
/// Error types returned by the store, process config and codec.
pub use error::{ConfigError, ReleaseError};
/// Process-level configuration lookups consumed by the resolver.
pub use process::{
    FlinkConfig, HDFS_DEFAULT_CONFIG, HDFS_SITE_CONFIG, PATH_HADOOP_CONFIG, ProcessConfig,
};
/// Resolution of the effective Hadoop configuration.
pub use resolver::{
    AddedResource, CORE_SITE_FILE, HDFS_SITE_FILE, LogObserver, ResolveObserver, ResolveOptions,
    ResolvedHadoopConf, ResourceOrigin, resolve_hadoop_configuration, resolve_with_report,
};

pub use hdfs_bridge_protocol::{EnvSource, ProcessEnv};
