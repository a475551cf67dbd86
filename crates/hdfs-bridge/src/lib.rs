//! Public surface for hdfs-bridge.
//!
//! Re-exports the configuration, protocol and security crates and wires the
//! three top-level operations: resolving the effective Hadoop configuration,
//! moving it across a process boundary, and checking for an HDFS delegation
//! token.

/// Re-export for convenience.
pub use hdfs_bridge_config as config;
/// Re-export for convenience.
pub use hdfs_bridge_protocol as protocol;
/// Re-export for convenience.
pub use hdfs_bridge_security as security;

pub use hdfs_bridge_config::{
    Configuration, HADOOP_CONF_BYTES, deserialize_hadoop_conf, resolve_hadoop_configuration,
    serialize_hadoop_conf,
};
pub use hdfs_bridge_security::has_hdfs_delegation_token;

mod report;

pub use report::{properties_json, render_properties};

#[inline]
/// Initialize logging using env_logger if the "logging" feature is enabled.
///
/// This is a no-op if the feature is not enabled. Binaries are still expected
/// to call this early in startup to ensure log output is wired up.
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        let _ = env_logger::builder()
            .format_timestamp_millis()
            .parse_default_env()
            .try_init();
    }
}
