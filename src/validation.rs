//! Input validation for partial updates.
//!
//! Creation stores values exactly as given. An update, however, treats a
//! supplied empty string as an attempt to clear a required column and rejects
//! it before anything is written.

use crate::error::{AppError, Result};
use crate::model::{PostChanges, UserChanges};

fn validate_present(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(AppError::Validation(format!("{} cannot be empty", field)));
    }
    Ok(())
}

/// Supplied fields must be non-empty; absent fields are left alone.
pub fn validate_user_changes(changes: &UserChanges) -> Result<()> {
    if let Some(username) = &changes.username {
        validate_present("Username", username)?;
    }
    if let Some(email) = &changes.email {
        validate_present("Email", email)?;
    }
    Ok(())
}

pub fn validate_post_changes(changes: &PostChanges) -> Result<()> {
    if let Some(title) = &changes.title {
        validate_present("Title", title)?;
    }
    if let Some(content) = &changes.content {
        validate_present("Content", content)?;
    }
    Ok(())
}
