//! Mutation inputs
//!
//! Every field is optional so that the same input serves create (where the
//! operation checks required fields) and partial update.

use async_graphql::{ID, InputObject, MaybeUndefined};
use chrono::NaiveDate;
use validator::Validate;

use crate::core::validation::filters::{lowercase, round_decimals, trim};
use crate::core::validation::{FieldErrors, validate_price, validate_slug};

const REQUIRED: &str = "This field is required.";

#[derive(Debug, Clone, Default, InputObject, Validate)]
pub struct CategoryInput {
    #[validate(length(
        min = 1,
        max = 128,
        message = "Ensure this value has between 1 and 128 characters."
    ))]
    pub name: Option<String>,

    /// Derived from the name on create when omitted
    #[validate(
        length(max = 128, message = "Ensure this value has at most 128 characters."),
        custom(function = "validate_slug")
    )]
    pub slug: Option<String>,

    pub description: Option<String>,
}

impl CategoryInput {
    pub(crate) fn normalized(mut self) -> Self {
        self.name = trim(self.name);
        self.slug = lowercase(self.slug);
        self.description = trim(self.description);
        self
    }
}

#[derive(Debug, Clone, Default, InputObject, Validate)]
pub struct PageInput {
    #[validate(
        length(max = 100, message = "Ensure this value has at most 100 characters."),
        custom(function = "validate_slug")
    )]
    pub slug: Option<String>,

    #[validate(length(
        min = 1,
        max = 200,
        message = "Ensure this value has between 1 and 200 characters."
    ))]
    pub title: Option<String>,

    pub content: Option<String>,
    pub is_visible: Option<bool>,

    /// `null` clears the date on update
    pub available_on: MaybeUndefined<NaiveDate>,
}

impl PageInput {
    pub(crate) fn normalized(mut self) -> Self {
        self.slug = lowercase(self.slug);
        self.title = trim(self.title);
        self
    }
}

#[derive(Debug, Clone, Default, InputObject, Validate)]
pub struct ProductInput {
    #[validate(length(
        min = 1,
        max = 128,
        message = "Ensure this value has between 1 and 128 characters."
    ))]
    pub name: Option<String>,

    pub description: Option<String>,

    /// Global id of the owning category
    pub category_id: Option<ID>,

    #[validate(custom(function = "validate_price"))]
    pub price: Option<f64>,

    pub is_published: Option<bool>,

    /// `null` clears the date on update
    pub available_on: MaybeUndefined<NaiveDate>,
}

impl ProductInput {
    pub(crate) fn normalized(mut self) -> Self {
        self.name = trim(self.name);
        self.description = trim(self.description);
        self.price = round_decimals(self.price, 2);
        self
    }
}

/// Apply a nullable input: absent keeps `target`, `null` clears it
pub(crate) fn set_nullable<T>(value: MaybeUndefined<T>, target: &mut Option<T>) {
    match value {
        MaybeUndefined::Undefined => {}
        MaybeUndefined::Null => *target = None,
        MaybeUndefined::Value(value) => *target = Some(value),
    }
}

/// Run the derived validation, adding `required` checks for create
pub(crate) fn check<T: Validate>(input: &T, required: &[(&str, bool)]) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for (field, present) in required {
        if !present {
            errors.add(field, REQUIRED);
        }
    }
    errors.extend_from(input.validate());
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_name_is_trimmed_before_validation() {
        let input = CategoryInput {
            name: Some("   ".to_string()),
            ..Default::default()
        }
        .normalized();

        let errors = check(&input, &[]).into_vec();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "name");
    }

    #[test]
    fn test_required_fields_reported_first() {
        let input = ProductInput {
            price: Some(-1.0),
            ..Default::default()
        };
        let errors = check(
            &input,
            &[("name", input.name.is_some()), ("category_id", false)],
        )
        .into_vec();

        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "categoryId", "price"]);
    }

    #[test]
    fn test_price_rounded() {
        let input = ProductInput {
            price: Some(19.999),
            ..Default::default()
        }
        .normalized();
        assert_eq!(input.price, Some(20.0));
    }

    #[test]
    fn test_huge_price_rejected_after_rounding() {
        let input = ProductInput {
            price: Some(1e307),
            ..Default::default()
        }
        .normalized();
        assert_eq!(input.price, Some(1e307));

        let errors = check(&input, &[]).into_vec();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "price");
        assert_eq!(
            errors[0].message,
            "Ensure this value is less than or equal to 999999999999.99."
        );
    }

    #[test]
    fn test_set_nullable() {
        let mut target = Some(1);
        set_nullable(MaybeUndefined::Undefined, &mut target);
        assert_eq!(target, Some(1));
        set_nullable(MaybeUndefined::Value(2), &mut target);
        assert_eq!(target, Some(2));
        set_nullable(MaybeUndefined::Null, &mut target);
        assert_eq!(target, None);
    }

    #[test]
    fn test_page_slug_lowercased() {
        let input = PageInput {
            slug: Some(" About-Us ".to_string()),
            title: Some("About".to_string()),
            ..Default::default()
        }
        .normalized();
        assert_eq!(input.slug.as_deref(), Some("about-us"));
        assert!(check(&input, &[]).is_empty());
    }
}
