//! Validation of mutation inputs
//!
//! Inputs derive [`validator::Validate`]; this module turns the resulting
//! [`ValidationErrors`] into the `{ field, message }` list that mutation
//! payloads return, with field names in the client's camelCase.

pub mod filters;

use indexmap::IndexMap;
use regex::Regex;
use std::sync::OnceLock;
use validator::{ValidationError, ValidationErrors};

use crate::core::error::{DashboardResult, FieldValidationError, ValidationError as InputError};

/// Collects field errors in the order they were reported
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: IndexMap<String, Vec<String>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a (snake_case) field
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(camel_case(field))
            .or_default()
            .push(message.into());
    }

    /// Merge the output of `Validate::validate`
    ///
    /// `validator` reports fields through a `HashMap`, so they are sorted by
    /// name first to keep responses stable.
    pub fn extend_from(&mut self, result: Result<(), ValidationErrors>) {
        let Err(errors) = result else {
            return;
        };
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        for (field, errors) in fields {
            for error in errors {
                self.add(&field, message_of(error));
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// `Ok` when nothing was reported, otherwise a validation error
    pub fn into_result(self) -> DashboardResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(InputError::FieldErrors(self.into_vec()).into())
        }
    }

    /// Flatten into one entry per message
    pub fn into_vec(self) -> Vec<FieldValidationError> {
        self.errors
            .into_iter()
            .flat_map(|(field, messages)| {
                messages.into_iter().map(move |message| FieldValidationError {
                    field: field.clone(),
                    message,
                })
            })
            .collect()
    }
}

fn message_of(error: &ValidationError) -> String {
    match &error.message {
        Some(message) => message.to_string(),
        None => format!("Invalid value ({}).", error.code),
    }
}

/// `is_visible` -> `isVisible`
pub fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = !out.is_empty();
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Slugs are lowercase ASCII words joined by single dashes
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    static SLUG: OnceLock<Regex> = OnceLock::new();
    let re = SLUG.get_or_init(|| {
        Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$")
            .unwrap_or_else(|e| unreachable!("static regex: {e}"))
    });

    if re.is_match(slug) {
        Ok(())
    } else {
        Err(ValidationError::new("slug").with_message(
            "Enter a valid 'slug' consisting of letters, numbers, underscores or hyphens.".into(),
        ))
    }
}

/// Largest price a product can carry
pub const MAX_PRICE: f64 = 999_999_999_999.99;

/// Prices are finite amounts in `0..=MAX_PRICE`
pub fn validate_price<P: std::borrow::Borrow<f64>>(price: P) -> Result<(), ValidationError> {
    let price: &f64 = price.borrow();
    if *price < 0.0 {
        return Err(ValidationError::new("range")
            .with_message("Ensure this value is greater than or equal to 0.".into()));
    }
    if !price.is_finite() || *price > MAX_PRICE {
        return Err(ValidationError::new("range").with_message(
            format!("Ensure this value is less than or equal to {}.", MAX_PRICE).into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "This field cannot be blank."))]
        name: String,
        #[validate(custom(function = "validate_slug"))]
        page_slug: String,
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("is_visible"), "isVisible");
        assert_eq!(camel_case("available_on"), "availableOn");
        assert_eq!(camel_case("name"), "name");
        assert_eq!(camel_case("_private"), "private");
    }

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("about-us").is_ok());
        assert!(validate_slug("v2").is_ok());
        assert!(validate_slug("About").is_err());
        assert!(validate_slug("a--b").is_err());
        assert!(validate_slug("-a").is_err());
        assert!(validate_slug("").is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(&0.0).is_ok());
        assert!(validate_price(&MAX_PRICE).is_ok());
        assert!(validate_price(&-0.01).is_err());
        assert!(validate_price(&1e13).is_err());
        assert!(validate_price(&f64::INFINITY).is_err());
        assert!(validate_price(&f64::NAN).is_err());
    }

    #[test]
    fn test_errors_from_validator_are_sorted_and_camel_cased() {
        let sample = Sample {
            name: String::new(),
            page_slug: "Not A Slug".to_string(),
        };
        let mut errors = FieldErrors::new();
        errors.extend_from(sample.validate());

        let errors = errors.into_vec();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "name");
        assert_eq!(errors[0].message, "This field cannot be blank.");
        assert_eq!(errors[1].field, "pageSlug");
    }

    #[test]
    fn test_manual_errors_keep_insertion_order() {
        let mut errors = FieldErrors::new();
        errors.add("slug", "taken");
        errors.add("category_id", "missing");
        errors.add("slug", "too long");

        let fields: Vec<_> = errors.into_vec().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["slug", "slug", "categoryId"]);
    }
}
