//! Catalog filter and sort pipeline. A pure function over the in-memory
//! product list, recomputed in full on every change; fine at the scale of
//! one campus catalog.

use crate::domain::{Product, ProductStatus};

#[allow(dead_code)]
pub const CATEGORIES: [&str; 6] = [
    "Books",
    "Electronics",
    "Furniture",
    "Fashion",
    "Hostel Essentials",
    "Notes & Study Materials",
];

#[allow(dead_code)]
pub const CONDITIONS: [&str; 3] = ["New", "Like New", "Used"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Newest listings first.
    #[default]
    Latest,
    PriceLow,
    PriceHigh,
}

/// Active filter state. An empty category/condition set means "all";
/// unset price bounds do not constrain.
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    pub search: String,
    pub categories: Vec<String>,
    pub conditions: Vec<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort: SortKey,
}

impl CatalogFilter {
    #[allow(dead_code)]
    pub fn toggle_category(&mut self, category: &str) {
        toggle(&mut self.categories, category);
    }

    #[allow(dead_code)]
    pub fn toggle_condition(&mut self, condition: &str) {
        toggle(&mut self.conditions, condition);
    }

    /// Back to defaults, sort key included.
    #[allow(dead_code)]
    pub fn clear(&mut self) {
        *self = CatalogFilter::default();
    }

    /// Applies the whole pipeline: availability, case-insensitive
    /// substring search over title and description, category and
    /// condition inclusion, price bounds, then the sort key.
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let needle = self.search.to_lowercase();

        let mut matches: Vec<Product> = products
            .iter()
            .filter(|product| product.status == ProductStatus::Available)
            .filter(|product| {
                product.title.to_lowercase().contains(&needle)
                    || product.description.to_lowercase().contains(&needle)
            })
            .filter(|product| {
                self.categories.is_empty() || self.categories.contains(&product.category)
            })
            .filter(|product| {
                self.conditions.is_empty() || self.conditions.contains(&product.condition)
            })
            .filter(|product| self.min_price.map_or(true, |min| product.price >= min))
            .filter(|product| self.max_price.map_or(true, |max| product.price <= max))
            .cloned()
            .collect();

        match self.sort {
            SortKey::PriceLow => matches.sort_by(|a, b| a.price.total_cmp(&b.price)),
            SortKey::PriceHigh => matches.sort_by(|a, b| b.price.total_cmp(&a.price)),
            SortKey::Latest => matches.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        }

        matches
    }
}

fn toggle(set: &mut Vec<String>, value: &str) {
    if let Some(index) = set.iter().position(|entry| entry == value) {
        set.remove(index);
    } else {
        set.push(value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn product(id: &str, title: &str, price: f64, status: ProductStatus, created: &str) -> Product {
        Product {
            id: id.to_string(),
            title: title.to_string(),
            description: format!("{title} in good shape"),
            price,
            category: "Books".to_string(),
            condition: "Used".to_string(),
            campus: None,
            images: Vec::new(),
            meeting_location: None,
            status,
            seller: None,
            specifications: HashMap::new(),
            created_at: created.parse().unwrap(),
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(
                "p1",
                "Drafter",
                25.0,
                ProductStatus::Available,
                "2025-08-12T09:00:00Z",
            ),
            product(
                "p2",
                "Graphing calculator",
                700.0,
                ProductStatus::Available,
                "2025-08-11T09:00:00Z",
            ),
            product(
                "p3",
                "Lab coat",
                40.0,
                ProductStatus::Available,
                "2025-08-10T09:00:00Z",
            ),
            product(
                "p4",
                "Sold-out textbook",
                90.0,
                ProductStatus::Sold,
                "2025-08-13T09:00:00Z",
            ),
        ]
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|product| product.id.as_str()).collect()
    }

    #[test]
    fn only_available_products_are_listed() {
        let filter = CatalogFilter::default();
        let listed = filter.apply(&catalog());
        assert_eq!(ids(&listed), ["p1", "p2", "p3"]);
    }

    #[test]
    fn price_sort_orders_both_ways() {
        let mut filter = CatalogFilter {
            sort: SortKey::PriceLow,
            ..CatalogFilter::default()
        };
        let low = filter.apply(&catalog());
        assert_eq!(
            low.iter().map(|p| p.price).collect::<Vec<_>>(),
            [25.0, 40.0, 700.0]
        );

        filter.sort = SortKey::PriceHigh;
        let high = filter.apply(&catalog());
        assert_eq!(
            high.iter().map(|p| p.price).collect::<Vec<_>>(),
            [700.0, 40.0, 25.0]
        );
    }

    #[test]
    fn clearing_filters_restores_the_available_subset() {
        let products = catalog();
        let mut filter = CatalogFilter {
            search: "calculator".to_string(),
            min_price: Some(100.0),
            sort: SortKey::PriceHigh,
            ..CatalogFilter::default()
        };
        filter.toggle_category("Books");
        assert_eq!(ids(&filter.apply(&products)), ["p2"]);

        filter.clear();
        let unfiltered = CatalogFilter::default();
        assert_eq!(
            ids(&filter.apply(&products)),
            ids(&unfiltered.apply(&products))
        );
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_description() {
        let mut filter = CatalogFilter::default();
        filter.search = "DRAFTER".to_string();
        assert_eq!(ids(&filter.apply(&catalog())), ["p1"]);

        filter.search = "good shape".to_string();
        assert_eq!(filter.apply(&catalog()).len(), 3);
    }

    #[test]
    fn price_bounds_only_apply_when_set() {
        let mut filter = CatalogFilter::default();
        filter.min_price = Some(30.0);
        filter.max_price = Some(100.0);
        assert_eq!(ids(&filter.apply(&catalog())), ["p3"]);
    }

    #[test]
    fn toggling_a_category_twice_removes_it() {
        let mut filter = CatalogFilter::default();
        filter.toggle_category("Books");
        assert_eq!(filter.categories, ["Books"]);
        filter.toggle_category("Books");
        assert!(filter.categories.is_empty());
    }
}
