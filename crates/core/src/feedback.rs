//! Rating and comment rules shared by every content kind.

use serde::Serialize;

use crate::error::CoreError;
use crate::roles::ROLE_ADMIN;
use crate::types::DbId;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Lowest accepted rating value.
pub const MIN_RATING: i32 = 1;

/// Highest accepted rating value.
pub const MAX_RATING: i32 = 5;

/// Maximum comment length in characters.
pub const MAX_COMMENT_LENGTH: usize = 2_000;

/* --------------------------------------------------------------------------
Validation
-------------------------------------------------------------------------- */

/// Validate a rating value, returning it narrowed to the `SMALLINT` column type.
pub fn validate_rating(value: i32) -> Result<i16, CoreError> {
    if !(MIN_RATING..=MAX_RATING).contains(&value) {
        return Err(CoreError::Validation(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}, got {value}"
        )));
    }
    // In range, so the narrowing cannot truncate.
    Ok(value as i16)
}

/// Validate comment text and return the trimmed form that gets stored.
///
/// The length cap applies to the text as submitted, surrounding whitespace
/// included.
pub fn validate_comment_text(text: &str) -> Result<String, CoreError> {
    let len = text.chars().count();
    if len > MAX_COMMENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Comment text exceeds maximum length of {MAX_COMMENT_LENGTH} characters ({len} given)"
        )));
    }
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Comment text must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/* --------------------------------------------------------------------------
Summaries
-------------------------------------------------------------------------- */

/// Average and count of the ratings on one target.
///
/// `average` is `None` when the target has no ratings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingSummary {
    pub average: Option<f64>,
    pub count: i64,
}

impl RatingSummary {
    pub fn empty() -> Self {
        Self {
            average: None,
            count: 0,
        }
    }
}

/* --------------------------------------------------------------------------
Permissions
-------------------------------------------------------------------------- */

/// A mutation a user may attempt on an existing comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentAction {
    Edit,
    Delete,
}

/// Check whether `actor_id` (with `actor_role`) may perform `action` on a
/// comment written by `author_id`.
///
/// Authors may edit and delete their own comments. Admins may delete any
/// comment but cannot rewrite someone else's words.
pub fn authorize_comment(
    action: CommentAction,
    author_id: DbId,
    actor_id: DbId,
    actor_role: &str,
) -> Result<(), CoreError> {
    if author_id == actor_id {
        return Ok(());
    }
    match action {
        CommentAction::Delete if actor_role == ROLE_ADMIN => Ok(()),
        CommentAction::Delete => Err(CoreError::Forbidden(
            "Only the author or an admin can delete this comment".to_string(),
        )),
        CommentAction::Edit => Err(CoreError::Forbidden(
            "Only the author can edit this comment".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::roles::ROLE_USER;

    #[test]
    fn ratings_in_range_accepted() {
        for v in 1..=5 {
            assert_eq!(validate_rating(v).unwrap(), v as i16);
        }
    }

    #[test]
    fn ratings_out_of_range_rejected() {
        assert_matches!(validate_rating(0), Err(CoreError::Validation(_)));
        assert_matches!(validate_rating(6), Err(CoreError::Validation(_)));
        assert_matches!(validate_rating(-1), Err(CoreError::Validation(_)));
    }

    #[test]
    fn comment_is_trimmed() {
        assert_eq!(validate_comment_text("  hello \n").unwrap(), "hello");
    }

    #[test]
    fn blank_comment_rejected() {
        assert_matches!(validate_comment_text("   "), Err(CoreError::Validation(_)));
    }

    #[test]
    fn comment_length_counts_characters_not_bytes() {
        // Cyrillic letters are two bytes each in UTF-8.
        let at_limit = "ж".repeat(MAX_COMMENT_LENGTH);
        assert!(validate_comment_text(&at_limit).is_ok());

        let over = "ж".repeat(MAX_COMMENT_LENGTH + 1);
        let err = validate_comment_text(&over).unwrap_err();
        assert!(err.to_string().contains("2000"));
    }

    #[test]
    fn padded_comment_over_limit_rejected() {
        let padded = format!("  {}  ", "a".repeat(MAX_COMMENT_LENGTH));
        assert_matches!(validate_comment_text(&padded), Err(CoreError::Validation(_)));

        let padded_at_limit = format!(" {} ", "a".repeat(MAX_COMMENT_LENGTH - 2));
        assert_eq!(
            validate_comment_text(&padded_at_limit).unwrap().chars().count(),
            MAX_COMMENT_LENGTH - 2
        );
    }

    #[test]
    fn empty_summary_has_no_average() {
        let summary = RatingSummary::empty();
        assert_eq!(summary.average, None);
        assert_eq!(summary.count, 0);
    }

    #[test]
    fn author_may_edit_and_delete() {
        assert!(authorize_comment(CommentAction::Edit, 1, 1, ROLE_USER).is_ok());
        assert!(authorize_comment(CommentAction::Delete, 1, 1, ROLE_USER).is_ok());
    }

    #[test]
    fn admin_may_delete_but_not_edit_others() {
        assert!(authorize_comment(CommentAction::Delete, 1, 2, ROLE_ADMIN).is_ok());
        assert_matches!(
            authorize_comment(CommentAction::Edit, 1, 2, ROLE_ADMIN),
            Err(CoreError::Forbidden(_))
        );
    }

    #[test]
    fn other_users_are_forbidden() {
        assert_matches!(
            authorize_comment(CommentAction::Delete, 1, 2, ROLE_USER),
            Err(CoreError::Forbidden(_))
        );
    }
}
