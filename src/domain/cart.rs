use serde::Deserialize;

use super::product::Product;

/// The signed-in user's cart as the server returns it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<CartItem>,
}

/// One cart line. `product` is `None` when the listing was deleted after
/// being added; such lines are skipped by totals and checkout.
#[derive(Debug, Clone, Deserialize)]
pub struct CartItem {
    pub product: Option<Product>,
    pub quantity: u32,
}

impl Cart {
    /// Lines whose product still exists.
    pub fn valid_items(&self) -> impl Iterator<Item = &CartItem> {
        self.items.iter().filter(|item| item.product.is_some())
    }

    /// Order total over the valid lines only.
    pub fn total(&self) -> f64 {
        self.valid_items()
            .filter_map(|item| {
                item.product
                    .as_ref()
                    .map(|product| product.price * f64::from(item.quantity))
            })
            .sum()
    }
}
