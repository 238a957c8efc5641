//! Authorization guard - gates mutating operations on a post to its author.

use crate::domain::Post;
use crate::error::DomainError;

/// Succeeds iff `acting_username` matches the post's recorded author,
/// case-insensitively. Callers load the post first and fail with `NotFound`
/// when it does not exist, which stays distinct from `Forbidden`.
pub fn authorize_mutation(acting_username: &str, post: &Post) -> Result<(), DomainError> {
    if acting_username.eq_ignore_ascii_case(&post.author) {
        Ok(())
    } else {
        Err(DomainError::Forbidden)
    }
}
