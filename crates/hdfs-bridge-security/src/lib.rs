//! Credentials of the current user and the HDFS delegation token check.

mod credentials;
mod error;
mod token;
mod user;

pub use credentials::Credentials;
pub use error::SecurityError;
pub use token::{HDFS_DELEGATION_TOKEN_KIND, Token};
pub use user::{AmbientSecurityContext, SecurityContext, UserContext};

use log::debug;

/// Whether the current user holds a token of kind `HDFS_DELEGATION_TOKEN`.
///
/// Failure to obtain the current user is propagated unchanged.
pub fn has_hdfs_delegation_token<C: SecurityContext + ?Sized>(
    context: &C,
) -> Result<bool, SecurityError> {
    let user = context.current_user()?;
    let found = user
        .credentials()
        .tokens()
        .any(|token| token.kind() == HDFS_DELEGATION_TOKEN_KIND);
    debug!(
        "checked for hdfs delegation token (user={}, found={found})",
        user.name()
    );
    Ok(found)
}
