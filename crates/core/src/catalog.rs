//! Catalog entities: categories and their products.
//!
//! The catalog is configured by the admin and read by everyone. Prices are
//! whole currency units stored as integers; there is no fractional money
//! anywhere in this system.

use serde::{Deserialize, Serialize};

use crate::types::{CategoryId, ProductId};

/// A purchasable product, owned by exactly one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub category_id: CategoryId,
    pub name: String,
    /// Price per unit in whole currency units. Always positive.
    pub price: i64,
}

/// A catalog category with its products in insertion order.
///
/// A category may have zero products (freshly created, or emptied by the
/// admin).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Icon reference rendered by the client (e.g. `"fas fa-wheat-awn"`).
    pub icon: String,
    pub products: Vec<Product>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serializes_with_nested_products() {
        let category = Category {
            id: CategoryId::new("rice"),
            name: "Rice".to_owned(),
            icon: "fas fa-wheat-awn".to_owned(),
            products: vec![Product {
                id: ProductId::new("basmati-rice"),
                category_id: CategoryId::new("rice"),
                name: "Premium Basmati".to_owned(),
                price: 1850,
            }],
        };

        let json = serde_json::to_value(&category).unwrap();
        assert_eq!(json["id"], "rice");
        assert_eq!(json["products"][0]["price"], 1850);

        let back: Category = serde_json::from_value(json).unwrap();
        assert_eq!(back, category);
    }
}
