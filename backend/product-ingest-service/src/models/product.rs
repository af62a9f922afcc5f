use serde::{Deserialize, Serialize};
use validator::Validate;

/// A single product-update record as carried on the wire and persisted to
/// the document store.
///
/// Required string fields default to empty on a missing wire field so that
/// absence surfaces as a validation violation rather than a parse error;
/// required scalar fields are `Option` for the same reason. Unknown wire
/// fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Product {
    #[serde(default)]
    #[validate(length(min = 1, message = "product id cannot be empty"))]
    pub id: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "product name cannot be empty"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "brand cannot be empty"))]
    pub brand: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "category cannot be empty"))]
    pub category: String,

    #[validate(
        required(message = "price must be specified"),
        range(min = 0.0, message = "price cannot be negative")
    )]
    pub price: Option<f64>,

    #[serde(rename = "isAvailable")]
    #[validate(required(message = "availability must be specified"))]
    pub is_available: Option<bool>,

    #[validate(
        required(message = "quantity must be specified"),
        range(min = 0, message = "quantity cannot be negative")
    )]
    pub quantity: Option<i64>,

    pub tags: Option<Vec<String>>,
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl Product {
    /// Run every field constraint and collect the failures, sorted by field
    /// name. An empty vec means the record is valid. The record itself is
    /// never mutated and no constraint short-circuits another.
    pub fn violations(&self) -> Vec<Violation> {
        let Err(errors) = self.validate() else {
            return Vec::new();
        };

        let mut violations: Vec<Violation> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, field_errors)| {
                field_errors.iter().map(move |error| Violation {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| error.code.to_string()),
                })
            })
            .collect();
        violations.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_product() -> Product {
        Product {
            id: "p1".to_string(),
            name: "Laptop".to_string(),
            brand: "Dell".to_string(),
            category: "Electronics".to_string(),
            price: Some(59999.0),
            is_available: Some(true),
            quantity: Some(10),
            tags: Some(vec!["tech".to_string(), "computers".to_string()]),
        }
    }

    #[test]
    fn test_valid_product_has_no_violations() {
        assert!(valid_product().violations().is_empty());
    }

    #[test]
    fn test_parses_wire_payload() {
        let payload = r#"{"id":"p1","name":"Laptop","brand":"Dell","category":"Electronics","price":59999.0,"isAvailable":true,"quantity":10,"tags":["tech","computers"]}"#;
        let product: Product = serde_json::from_str(payload).unwrap();
        assert_eq!(product.id, "p1");
        assert_eq!(product.name, "Laptop");
        assert_eq!(product.price, Some(59999.0));
        assert_eq!(product.is_available, Some(true));
        assert_eq!(product.quantity, Some(10));
        assert_eq!(
            product.tags,
            Some(vec!["tech".to_string(), "computers".to_string()])
        );
        assert!(product.violations().is_empty());
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let payload = r#"{"id":"p1","name":"Laptop","brand":"Dell","category":"Electronics","price":1.0,"isAvailable":true,"quantity":1,"warehouse":"A-12"}"#;
        let product: Product = serde_json::from_str(payload).unwrap();
        assert!(product.violations().is_empty());
    }

    #[test]
    fn test_missing_fields_default_to_absent() {
        let product: Product = serde_json::from_str("{}").unwrap();
        assert_eq!(product.id, "");
        assert_eq!(product.price, None);
        assert_eq!(product.is_available, None);
        assert_eq!(product.tags, None);
    }

    #[test]
    fn test_blank_name_is_a_violation() {
        let mut product = valid_product();
        product.name = String::new();
        let violations = product.violations();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "name");
        assert_eq!(violations[0].message, "product name cannot be empty");
    }

    #[test]
    fn test_negative_numbers_are_violations() {
        let mut product = valid_product();
        product.price = Some(-0.01);
        product.quantity = Some(-5);
        let violations = product.violations();
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].field, "price");
        assert_eq!(violations[0].message, "price cannot be negative");
        assert_eq!(violations[1].field, "quantity");
        assert_eq!(violations[1].message, "quantity cannot be negative");
    }

    #[test]
    fn test_missing_scalars_are_violations() {
        let mut product = valid_product();
        product.price = None;
        product.is_available = None;
        product.quantity = None;
        let violations = product.violations();
        let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["is_available", "price", "quantity"]);
        assert_eq!(violations[1].message, "price must be specified");
    }

    #[test]
    fn test_all_constraints_checked_independently() {
        let product: Product = serde_json::from_str("{}").unwrap();
        let violations = product.violations();
        let fields: Vec<&str> = violations
            .iter()
            .map(|v| v.field.as_str())
            .collect();
        assert_eq!(
            fields,
            vec![
                "brand",
                "category",
                "id",
                "is_available",
                "name",
                "price",
                "quantity"
            ]
        );
    }

    #[test]
    fn test_zero_price_and_quantity_are_valid() {
        let mut product = valid_product();
        product.price = Some(0.0);
        product.quantity = Some(0);
        assert!(product.violations().is_empty());
    }

    #[test]
    fn test_violation_display() {
        let violation = Violation {
            field: "name".to_string(),
            message: "product name cannot be empty".to_string(),
        };
        assert_eq!(violation.to_string(), "name: product name cannot be empty");
    }
}
