//! Validation gate for listing and review payloads.
//!
//! Field constraints match the published schemas: title 1–40 chars,
//! location non-empty, image reference required, price 1–9999, listing
//! text 1–1000 chars, review text 1–350 chars. All failing fields are
//! collected into one [`FieldErrors`] value, not just the first.

use crate::state::ListingDraft;
use serde::Serialize;

/// Maximum title length.
pub const TITLE_MAX: usize = 40;
/// Minimum price.
pub const PRICE_MIN: u32 = 1;
/// Maximum price.
pub const PRICE_MAX: u32 = 9999;
/// Maximum listing text length.
pub const LISTING_TEXT_MAX: usize = 1000;
/// Maximum review text length.
pub const REVIEW_TEXT_MAX: usize = 350;

/// A single field-constraint violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Name of the offending field.
    pub field: &'static str,
    /// Human-readable constraint description.
    pub message: String,
}

/// All field-constraint violations for one payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(pub Vec<FieldError>);

impl FieldErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Whether any violation was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Joined into one message, the way the routing layer flashes it.
        let mut first = true;
        for err in &self.0 {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", err.field, err.message)?;
            first = false;
        }
        Ok(())
    }
}

/// Validate a listing draft, collecting every violation.
///
/// # Errors
///
/// Returns [`FieldErrors`] listing all failing fields.
pub fn validate_listing(draft: &ListingDraft) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();

    let title_len = draft.title.chars().count();
    if title_len == 0 {
        errors.push("title", "must not be empty");
    } else if title_len > TITLE_MAX {
        errors.push("title", format!("must be at most {TITLE_MAX} characters"));
    }

    if draft.location.trim().is_empty() {
        errors.push("location", "must not be empty");
    }

    if draft.image.trim().is_empty() {
        errors.push("image", "is required");
    }

    if !(PRICE_MIN..=PRICE_MAX).contains(&draft.price) {
        errors.push(
            "price",
            format!("must be between {PRICE_MIN} and {PRICE_MAX}"),
        );
    }

    let text_len = draft.text.chars().count();
    if text_len == 0 {
        errors.push("text", "must not be empty");
    } else if text_len > LISTING_TEXT_MAX {
        errors.push(
            "text",
            format!("must be at most {LISTING_TEXT_MAX} characters"),
        );
    }

    errors.into_result()
}

/// Validate review text.
///
/// # Errors
///
/// Returns [`FieldErrors`] if the text is empty or too long.
pub fn validate_review_text(text: &str) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();

    let len = text.chars().count();
    if len == 0 {
        errors.push("text", "must not be empty");
    } else if len > REVIEW_TEXT_MAX {
        errors.push(
            "text",
            format!("must be at most {REVIEW_TEXT_MAX} characters"),
        );
    }

    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> ListingDraft {
        ListingDraft::new("Lakeview", "Geneva", "lake.jpg", 200, "By the water")
    }

    #[test]
    fn accepts_a_valid_draft() {
        assert!(validate_listing(&valid_draft()).is_ok());
    }

    #[test]
    fn collects_all_field_errors_not_just_the_first() {
        let draft = ListingDraft::new("", "", "", 0, "");
        let errors = validate_listing(&draft).unwrap_err();
        let fields: Vec<&str> = errors.0.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["title", "location", "image", "price", "text"]);
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let mut draft = valid_draft();
        draft.price = PRICE_MIN;
        assert!(validate_listing(&draft).is_ok());
        draft.price = PRICE_MAX;
        assert!(validate_listing(&draft).is_ok());
        draft.price = PRICE_MAX + 1;
        assert!(validate_listing(&draft).is_err());
    }

    #[test]
    fn title_length_is_counted_in_characters() {
        let mut draft = valid_draft();
        draft.title = "é".repeat(TITLE_MAX);
        assert!(validate_listing(&draft).is_ok());
        draft.title = "é".repeat(TITLE_MAX + 1);
        assert!(validate_listing(&draft).is_err());
    }

    #[test]
    fn review_text_bounds() {
        assert!(validate_review_text("Great stay").is_ok());
        assert!(validate_review_text("").is_err());
        assert!(validate_review_text(&"x".repeat(REVIEW_TEXT_MAX + 1)).is_err());
    }

    #[test]
    fn display_joins_messages() {
        let draft = ListingDraft::new("", "Geneva", "lake.jpg", 200, "ok");
        let errors = validate_listing(&draft).unwrap_err();
        assert_eq!(errors.to_string(), "title: must not be empty");
    }
}
