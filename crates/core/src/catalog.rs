//! Catalog input rules: titles, prices, list filters and pagination.

use rust_decimal::Decimal;

use crate::error::CoreError;

/// Maximum length of a content title (articles, products, places, works).
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length of a place address.
pub const MAX_ADDRESS_LENGTH: usize = 500;

/// Maximum length of an author's role on a product (e.g. "illustrator").
pub const MAX_AUTHOR_ROLE_LENGTH: usize = 100;

/// Default page size for list endpoints.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Upper bound on page size for list endpoints.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Maximum number of products in one sheet export request.
pub const MAX_SHEET_BATCH: usize = 50;

/// Largest price that fits `NUMERIC(10,2)`.
pub fn max_price() -> Decimal {
    Decimal::new(99_999_999_99, 2)
}

/// Clamp a user-provided page size into `1..=max`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Validate a required, bounded text field such as a title or name and
/// return the trimmed value that gets stored.
///
/// The length cap applies to the value as submitted.
pub fn validate_required_text(field: &str, value: &str, max: usize) -> Result<String, CoreError> {
    if value.chars().count() > max {
        return Err(CoreError::Validation(format!(
            "{field} exceeds maximum length of {max} characters"
        )));
    }
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// Validate a title: non-blank and at most [`MAX_TITLE_LENGTH`] characters.
pub fn validate_title(title: &str) -> Result<String, CoreError> {
    validate_required_text("Title", title, MAX_TITLE_LENGTH)
}

/// Validate a product price: non-negative, two decimal places at most, and
/// within the column's range.
pub fn validate_price(price: Decimal) -> Result<(), CoreError> {
    if price.is_sign_negative() {
        return Err(CoreError::Validation(format!(
            "Price must not be negative, got {price}"
        )));
    }
    if price.scale() > 2 && price.round_dp(2) != price {
        return Err(CoreError::Validation(format!(
            "Price must have at most two decimal places, got {price}"
        )));
    }
    if price > max_price() {
        return Err(CoreError::Validation(format!(
            "Price must not exceed {}",
            max_price()
        )));
    }
    Ok(())
}

/// Validate an optional `[min, max]` price filter.
pub fn validate_price_range(min: Option<Decimal>, max: Option<Decimal>) -> Result<(), CoreError> {
    if let Some(min) = min {
        if min.is_sign_negative() {
            return Err(CoreError::Validation("min_price must not be negative".into()));
        }
    }
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(CoreError::Validation(format!(
                "min_price ({min}) must not exceed max_price ({max})"
            )));
        }
    }
    Ok(())
}

/// Turn a free-text search term into an `ILIKE` pattern.
///
/// Returns `None` for blank input. `%`, `_` and `\` are escaped so they match
/// literally.
pub fn search_pattern(term: Option<&str>) -> Option<String> {
    let term = term?.trim();
    if term.is_empty() {
        return None;
    }
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    Some(pattern)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use assert_matches::assert_matches;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn clamp_limit_uses_default_when_none() {
        assert_eq!(clamp_limit(None, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE), 20);
    }

    #[test]
    fn clamp_limit_respects_bounds() {
        assert_eq!(clamp_limit(Some(500), 20, 100), 100);
        assert_eq!(clamp_limit(Some(0), 20, 100), 1);
        assert_eq!(clamp_offset(Some(-4)), 0);
        assert_eq!(clamp_offset(None), 0);
    }

    #[test]
    fn titles_validated() {
        assert!(validate_title("Петербург").is_ok());
        assert_matches!(validate_title("  "), Err(CoreError::Validation(_)));
        assert_matches!(
            validate_title(&"x".repeat(MAX_TITLE_LENGTH + 1)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn required_text_is_returned_trimmed() {
        assert_eq!(validate_title("  Белый лён \n").unwrap(), "Белый лён");
        assert_eq!(
            validate_required_text("Address", " Linen st. 4 ", 10).unwrap_err().to_string(),
            "invalid input: Address exceeds maximum length of 10 characters"
        );
    }

    #[test]
    fn prices_validated() {
        assert!(validate_price(dec("0")).is_ok());
        assert!(validate_price(dec("19.99")).is_ok());
        assert!(validate_price(dec("19.990")).is_ok());
        assert_matches!(validate_price(dec("-1")), Err(CoreError::Validation(_)));
        assert_matches!(validate_price(dec("1.999")), Err(CoreError::Validation(_)));
        assert_matches!(
            validate_price(dec("100000000.00")),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn price_range_validated() {
        assert!(validate_price_range(None, None).is_ok());
        assert!(validate_price_range(Some(dec("1")), Some(dec("1"))).is_ok());
        assert_matches!(
            validate_price_range(Some(dec("10")), Some(dec("5"))),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn search_pattern_escapes_wildcards() {
        assert_eq!(search_pattern(None), None);
        assert_eq!(search_pattern(Some("   ")), None);
        assert_eq!(search_pattern(Some(" poem ")).as_deref(), Some("%poem%"));
        assert_eq!(search_pattern(Some("50%_off")).as_deref(), Some("%50\\%\\_off%"));
    }
}
