//! Ownership checks for clubboard.
//!
//! Posts have a single owner; only that owner may edit or delete them.

use crate::db::User;
use crate::{BoardError, Result};

/// Check whether `requester` may mutate a resource owned by `owner_id`.
///
/// # Examples
///
/// ```
/// use clubboard::auth::can_mutate;
///
/// assert!(!can_mutate("alice", None));
/// ```
pub fn can_mutate(owner_id: &str, requester: Option<&User>) -> bool {
    matches!(requester, Some(user) if user.id == owner_id)
}

/// Require an authenticated requester.
pub fn require_user(requester: Option<&User>) -> Result<&User> {
    requester.ok_or(BoardError::Unauthenticated)
}

/// Require that `requester` owns the resource.
///
/// Fails with `Unauthenticated` when there is no requester and with
/// `Forbidden` when someone else owns it.
pub fn require_owner(owner_id: &str, requester: Option<&User>) -> Result<()> {
    require_user(requester)?;
    if !can_mutate(owner_id, requester) {
        return Err(BoardError::Forbidden("not the author".to_string()));
    }
    Ok(())
}
