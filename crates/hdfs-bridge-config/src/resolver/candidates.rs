//! Candidate configuration directories in precedence order.

use super::ResourceOrigin;
use crate::{PATH_HADOOP_CONFIG, ProcessConfig};
use hdfs_bridge_protocol::{EnvSource, HADOOP_CONF_DIR_ENV, HADOOP_HOME_ENV};
use std::path::PathBuf;

/// A directory that may hold `core-site.xml` / `hdfs-site.xml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct CandidateDir {
    pub(super) origin: ResourceOrigin,
    pub(super) path: Option<PathBuf>,
}

/// Build the four candidate slots, lowest precedence first:
/// `$HADOOP_HOME/conf`, `$HADOOP_HOME/etc/hadoop`, `$HADOOP_CONF_DIR`, then
/// the process config's fallback directory.
pub(super) fn candidate_dirs(env: &dyn EnvSource, process: &dyn ProcessConfig) -> [CandidateDir; 4] {
    // Appended as text so an empty HADOOP_HOME probes `/conf`, not `./conf`.
    let hadoop_home = env.var(HADOOP_HOME_ENV);
    [
        CandidateDir {
            origin: ResourceOrigin::HadoopHomeConf,
            path: hadoop_home.as_ref().map(|home| PathBuf::from(format!("{home}/conf"))),
        },
        CandidateDir {
            origin: ResourceOrigin::HadoopHomeEtc,
            // Hadoop 2.x layout.
            path: hadoop_home
                .as_ref()
                .map(|home| PathBuf::from(format!("{home}/etc/hadoop"))),
        },
        CandidateDir {
            origin: ResourceOrigin::HadoopConfDir,
            path: env.var(HADOOP_CONF_DIR_ENV).map(PathBuf::from),
        },
        CandidateDir {
            origin: ResourceOrigin::ProcessConfigDir,
            path: process.get_string(PATH_HADOOP_CONFIG).map(PathBuf::from),
        },
    ]
}
