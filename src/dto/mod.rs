pub mod billboards;
pub mod categories;
pub mod colors;
pub mod orders;
pub mod products;
pub mod sizes;
pub mod stores;

use crate::error::{AppError, AppResult};

/// Lift an optional request field, rejecting its absence with a 400 that
/// names the field, before any database work happens.
pub fn required<T>(value: Option<T>, field: &str) -> AppResult<T> {
    value.ok_or_else(|| AppError::BadRequest(format!("{field} is required")))
}

/// Like [`required`] but also rejects blank strings; a whitespace-only
/// input counts as missing.
pub fn required_text(value: Option<String>, field: &str) -> AppResult<String> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(AppError::BadRequest(format!("{field} is required"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_names_the_missing_field() {
        let err = required::<u32>(None, "Price").unwrap_err();
        assert_eq!(err.to_string(), "Price is required");
    }

    #[test]
    fn required_text_rejects_blank_input() {
        assert!(required_text(Some("  ".into()), "Label").is_err());
        assert!(required_text(None, "Label").is_err());
        assert_eq!(required_text(Some("Summer".into()), "Label").unwrap(), "Summer");
    }
}
