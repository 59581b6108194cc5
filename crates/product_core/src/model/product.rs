//! Product records and projections.
//!
//! # Responsibility
//! - Define the canonical row shape of the `Product` table.
//! - Provide the summary projection used by list responses.
//!
//! # Invariants
//! - `id` is unique across live rows and assigned by the store.
//! - Summaries never expose `id`.

use serde::{Deserialize, Serialize};

/// Store-assigned product identifier.
pub type ProductId = i64;

/// One row of the `Product` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit count.
    pub quantity: i32,
    /// Whole currency units.
    pub price: i32,
    pub description: String,
}

/// A validated product that has not been stored yet.
///
/// Produced by [`crate::model::validation::ProductCandidate::into_new_product`];
/// carries no id because the store assigns one on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub quantity: i32,
    pub price: i32,
    pub description: String,
}

impl NewProduct {
    /// Creates a new product draft from literal values.
    pub fn new(
        name: impl Into<String>,
        price: i32,
        quantity: i32,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            quantity,
            price,
            description: description.into(),
        }
    }

    /// Attaches an identifier, yielding a full record.
    pub fn with_id(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            quantity: self.quantity,
            price: self.price,
            description: self.description,
        }
    }
}

/// List-view projection of a product.
///
/// Serialized in `name, price, quantity, description` order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub name: String,
    pub price: i32,
    pub quantity: i32,
    pub description: String,
}

impl From<Product> for ProductSummary {
    fn from(value: Product) -> Self {
        Self {
            name: value.name,
            price: value.price,
            quantity: value.quantity,
            description: value.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NewProduct, ProductSummary};

    #[test]
    fn summary_drops_id_and_keeps_field_order() {
        let product = NewProduct::new("Coke", 3, 100, "Beverage").with_id(1);
        let summary = ProductSummary::from(product);
        let json = serde_json::to_string(&summary).unwrap();
        assert_eq!(
            json,
            r#"{"name":"Coke","price":3,"quantity":100,"description":"Beverage"}"#
        );
    }

    #[test]
    fn with_id_preserves_fields() {
        let product = NewProduct::new("Vodka", 10, 100, "Beverage").with_id(3);
        assert_eq!(product.id, 3);
        assert_eq!(product.name, "Vodka");
        assert_eq!(product.price, 10);
        assert_eq!(product.quantity, 100);
    }
}
