//! Wire primitives and ambient lookups shared by the hdfs-bridge crates.

mod env;
pub mod writable;

pub use env::{
    EnvSource, HADOOP_CONF_DIR_ENV, HADOOP_HOME_ENV, HADOOP_TOKEN_FILE_LOCATION_ENV,
    HADOOP_USER_NAME_ENV, ProcessEnv,
};
