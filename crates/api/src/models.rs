//! Request-scoped models.

use ihub_core::Email;

/// The authenticated identity attached to a request after token
/// verification. The email is the only claim the API consumes.
#[derive(Debug, Clone)]
pub struct Principal {
    /// Verified email address of the caller.
    pub email: Email,
}
