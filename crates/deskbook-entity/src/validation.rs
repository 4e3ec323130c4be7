//! Shared field validators for `validator` derives.

use validator::ValidationError;

/// Rejects empty or whitespace-only strings.
pub(crate) fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be empty".into());
        return Err(err);
    }
    Ok(())
}
