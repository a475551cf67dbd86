use hdfs_bridge_security::{Credentials, SecurityContext, SecurityError, UserContext};

/// Security context returning a fixed user, or failing when none is set.
#[derive(Debug, Clone, Default)]
pub struct StubSecurityContext {
    user: Option<UserContext>,
}

impl StubSecurityContext {
    pub fn user(name: &str, credentials: Credentials) -> Self {
        Self {
            user: Some(UserContext::new(name, credentials)),
        }
    }

    pub fn no_user() -> Self {
        Self { user: None }
    }
}

impl SecurityContext for StubSecurityContext {
    fn current_user(&self) -> Result<UserContext, SecurityError> {
        self.user.clone().ok_or(SecurityError::NoCurrentUser)
    }
}
