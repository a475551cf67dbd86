//! The current user and where its credentials come from.

use crate::{Credentials, SecurityError};
use hdfs_bridge_protocol::{
    EnvSource, HADOOP_TOKEN_FILE_LOCATION_ENV, HADOOP_USER_NAME_ENV, ProcessEnv,
};
use log::debug;
use std::path::PathBuf;

/// A user together with the credentials it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContext {
    name: String,
    credentials: Credentials,
}

impl UserContext {
    pub fn new(name: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            name: name.into(),
            credentials,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}

/// Source of the user the process is acting as.
pub trait SecurityContext {
    /// Resolve the current user, or fail if none can be determined.
    fn current_user(&self) -> Result<UserContext, SecurityError>;
}

/// Resolves the user from the environment.
///
/// The name comes from `HADOOP_USER_NAME`, then `USER`, then `USERNAME`.
/// Tokens come from the storage file named by `HADOOP_TOKEN_FILE_LOCATION`,
/// when set.
#[derive(Debug, Clone, Default)]
pub struct AmbientSecurityContext<E = ProcessEnv> {
    env: E,
}

impl AmbientSecurityContext<ProcessEnv> {
    pub fn new() -> Self {
        Self { env: ProcessEnv }
    }
}

impl<E: EnvSource> AmbientSecurityContext<E> {
    /// Resolve against a custom environment.
    pub fn with_env(env: E) -> Self {
        Self { env }
    }

    fn user_name(&self) -> Option<String> {
        [HADOOP_USER_NAME_ENV, "USER", "USERNAME"]
            .into_iter()
            .filter_map(|key| self.env.var(key))
            .find(|name| !name.is_empty())
    }
}

impl<E: EnvSource> SecurityContext for AmbientSecurityContext<E> {
    fn current_user(&self) -> Result<UserContext, SecurityError> {
        let name = self.user_name().ok_or(SecurityError::NoCurrentUser)?;
        let credentials = match self.env.var(HADOOP_TOKEN_FILE_LOCATION_ENV) {
            Some(location) => Credentials::read_token_storage_file(&PathBuf::from(location))?,
            None => Credentials::new(),
        };
        debug!(
            "resolved current user (name={name}, tokens={})",
            credentials.number_of_tokens()
        );
        Ok(UserContext::new(name, credentials))
    }
}
