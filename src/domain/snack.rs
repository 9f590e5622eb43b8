//! Snack domain entity and menu grouping.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Concession stand item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Snack {
    pub id: Uuid,
    #[schema(example = "Large Popcorn")]
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = f64, example = 8.5)]
    pub price: Decimal,
    #[schema(example = "Snacks")]
    pub category: String,
    pub image_url: Option<String>,
    pub available: bool,
    pub created_at: DateTime<Utc>,
}

/// Available snacks, flat and grouped by category.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SnackMenu {
    pub snacks: Vec<Snack>,
    pub categories: BTreeMap<String, Vec<Snack>>,
}

impl SnackMenu {
    pub fn from_snacks(snacks: Vec<Snack>) -> Self {
        let mut categories: BTreeMap<String, Vec<Snack>> = BTreeMap::new();
        for snack in &snacks {
            categories
                .entry(snack.category.clone())
                .or_default()
                .push(snack.clone());
        }
        Self { snacks, categories }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snack(name: &str, category: &str) -> Snack {
        Snack {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            price: Decimal::new(450, 2),
            category: category.to_string(),
            image_url: None,
            available: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_menu_groups_by_category() {
        let menu = SnackMenu::from_snacks(vec![
            snack("Medium Soda", "Beverages"),
            snack("Large Popcorn", "Snacks"),
            snack("Nachos with Cheese", "Snacks"),
        ]);

        assert_eq!(menu.snacks.len(), 3);
        assert_eq!(menu.categories.len(), 2);
        assert_eq!(menu.categories["Snacks"].len(), 2);
        assert_eq!(menu.categories["Beverages"][0].name, "Medium Soda");
    }

    #[test]
    fn test_price_serializes_as_number() {
        let json = serde_json::to_value(snack("Candy Mix", "Candy")).unwrap();
        assert_eq!(json["price"], serde_json::json!(4.5));
        assert!(json.get("imageUrl").is_some());
    }
}
