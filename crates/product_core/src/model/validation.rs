//! Request-body validation for products.
//!
//! # Responsibility
//! - Accept loosely-typed candidates decoded from request bodies.
//! - Report every field problem at once as a list of field errors.
//!
//! # Invariants
//! - `validate` is pure: same candidate, same errors, no I/O.
//! - A candidate converts into a `NewProduct` only when `validate` is empty.

use crate::model::product::{NewProduct, ProductId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Untrusted product body as received from a caller.
///
/// Fields are optional so that missing values surface as field errors.
/// Numeric fields are decoded as `i64` so that out-of-range values can be
/// reported instead of failing the decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCandidate {
    pub id: Option<ProductId>,
    pub name: Option<String>,
    pub quantity: Option<i64>,
    pub price: Option<i64>,
    pub description: Option<String>,
}

/// One rejected field with a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Non-empty set of field errors for one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Groups messages by field name, preserving per-field order.
    pub fn by_field(&self) -> BTreeMap<&'static str, Vec<String>> {
        let mut grouped: BTreeMap<&'static str, Vec<String>> = BTreeMap::new();
        for error in &self.0 {
            grouped
                .entry(error.field)
                .or_default()
                .push(error.message.clone());
        }
        grouped
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
            first = false;
        }
        Ok(())
    }
}

impl Error for ValidationErrors {}

impl ProductCandidate {
    /// Converts the candidate into a storable product, or returns every
    /// field error found.
    pub fn into_new_product(self) -> Result<NewProduct, ValidationErrors> {
        parse(&self).map_err(ValidationErrors)
    }
}

/// Checks a candidate for well-formedness.
///
/// Returns an empty list when the candidate can be stored. `id` is not
/// inspected here; callers compare it against the addressed id.
pub fn validate(candidate: &ProductCandidate) -> Vec<FieldError> {
    parse(candidate).err().unwrap_or_default()
}

fn parse(candidate: &ProductCandidate) -> Result<NewProduct, Vec<FieldError>> {
    let mut errors = Vec::new();

    let name = required_text(&mut errors, "name", candidate.name.as_deref(), false);
    let quantity = required_count(&mut errors, "quantity", candidate.quantity);
    let price = required_count(&mut errors, "price", candidate.price);
    let description = required_text(
        &mut errors,
        "description",
        candidate.description.as_deref(),
        true,
    );

    match (name, quantity, price, description) {
        (Some(name), Some(quantity), Some(price), Some(description)) if errors.is_empty() => {
            Ok(NewProduct {
                name,
                quantity,
                price,
                description,
            })
        }
        _ => Err(errors),
    }
}

fn required_text(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    value: Option<&str>,
    allow_blank: bool,
) -> Option<String> {
    match value {
        None => {
            errors.push(FieldError::new(field, format!("The {field} field is required.")));
            None
        }
        Some(text) if !allow_blank && text.trim().is_empty() => {
            errors.push(FieldError::new(field, format!("The {field} field must not be blank.")));
            None
        }
        Some(text) => Some(text.to_string()),
    }
}

fn required_count(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    value: Option<i64>,
) -> Option<i32> {
    let Some(raw) = value else {
        errors.push(FieldError::new(field, format!("The {field} field is required.")));
        return None;
    };

    let Ok(value) = i32::try_from(raw) else {
        errors.push(FieldError::new(
            field,
            format!("The {field} field must be between 0 and {}.", i32::MAX),
        ));
        return None;
    };

    if value < 0 {
        errors.push(FieldError::new(
            field,
            format!("The {field} field must not be negative."),
        ));
        return None;
    }

    Some(value)
}

#[cfg(test)]
mod tests {
    use super::{validate, ProductCandidate};

    fn sprite() -> ProductCandidate {
        ProductCandidate {
            id: None,
            name: Some("Sprite".to_string()),
            quantity: Some(50),
            price: Some(2),
            description: Some("Beverage".to_string()),
        }
    }

    #[test]
    fn complete_candidate_has_no_errors() {
        assert!(validate(&sprite()).is_empty());
    }

    #[test]
    fn empty_candidate_reports_every_required_field() {
        let errors = validate(&ProductCandidate::default());
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["name", "quantity", "price", "description"]);
    }

    #[test]
    fn blank_name_is_rejected_but_empty_description_is_allowed() {
        let mut candidate = sprite();
        candidate.name = Some("   ".to_string());
        candidate.description = Some(String::new());

        let errors = validate(&candidate);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "name");
    }

    #[test]
    fn out_of_range_and_negative_numbers_are_rejected() {
        let mut candidate = sprite();
        candidate.quantity = Some(-1);
        candidate.price = Some(i64::from(i32::MAX) + 1);

        let errors = validate(&candidate);
        assert_eq!(errors.len(), 2);
        assert!(errors[0].message.contains("negative"));
        assert!(errors[1].message.contains("between"));
    }

    #[test]
    fn into_new_product_ignores_candidate_id() {
        let mut candidate = sprite();
        candidate.id = Some(42);
        let product = candidate.into_new_product().expect("valid candidate");
        assert_eq!(product.name, "Sprite");
        assert_eq!(product.price, 2);
        assert_eq!(product.quantity, 50);
    }

    #[test]
    fn errors_group_by_field() {
        let errors = ProductCandidate::default()
            .into_new_product()
            .expect_err("empty candidate must fail");
        let grouped = errors.by_field();
        assert_eq!(grouped.len(), 4);
        assert!(grouped["price"][0].contains("required"));
        assert!(errors.to_string().starts_with("name: "));
    }
}
