//! Classification helpers for Postgres constraint violations.

/// True when `e` is a unique violation on the `urls.short_code` constraint.
///
/// Raised by the finalize step when a freshly derived code is already taken;
/// the service retries exactly once with a disambiguated code.
pub fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    is_unique_violation_on(e, "urls_short_code_key")
}

/// True when `e` is a unique violation on the `urls.original_url` constraint.
///
/// Raised when two create requests race past the duplicate pre-check with
/// the same URL; mapped to the duplicate-resource error.
pub fn is_unique_violation_on_url(e: &sqlx::Error) -> bool {
    is_unique_violation_on(e, "urls_original_url_key")
}

fn is_unique_violation_on(e: &sqlx::Error, constraint: &str) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    db_err.constraint() == Some(constraint)
}
