//! Product filter-set
//!
//! Extends [`DistinctFilterSet`]: predicates first, then ordering, then
//! duplicate removal.

use async_graphql::Enum;
use std::cmp::Ordering;

use crate::core::{DistinctFilterSet, FilterSet};
use crate::models::Product;

/// Sort keys accepted by `products(sortBy:)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum ProductOrder {
    Name,
    NameDesc,
    Price,
    PriceDesc,
    UpdatedAt,
    UpdatedAtDesc,
}

#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Exact name match
    pub name: Option<String>,

    /// Case-insensitive substring of the name
    pub name_icontains: Option<String>,

    pub price: Option<f64>,
    pub price_gte: Option<f64>,
    pub price_lte: Option<f64>,
    pub is_published: Option<bool>,
    pub sort_by: Option<ProductOrder>,
}

impl ProductFilter {
    fn matches(&self, product: &Product) -> bool {
        self.name.as_ref().is_none_or(|name| &product.name == name)
            && self.name_icontains.as_ref().is_none_or(|needle| {
                product.name.to_lowercase().contains(&needle.to_lowercase())
            })
            && self.price.is_none_or(|price| product.price == price)
            && self.price_gte.is_none_or(|min| product.price >= min)
            && self.price_lte.is_none_or(|max| product.price <= max)
            && self
                .is_published
                .is_none_or(|published| product.is_published == published)
    }

    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let by_name = || a.name.cmp(&b.name).then(a.pk.cmp(&b.pk));
        let by_price = || a.price.total_cmp(&b.price).then(a.pk.cmp(&b.pk));
        let by_updated = || a.updated_at.cmp(&b.updated_at).then(a.pk.cmp(&b.pk));

        match self.sort_by.unwrap_or(ProductOrder::Name) {
            ProductOrder::Name => by_name(),
            ProductOrder::NameDesc => by_name().reverse(),
            ProductOrder::Price => by_price(),
            ProductOrder::PriceDesc => by_price().reverse(),
            ProductOrder::UpdatedAt => by_updated(),
            ProductOrder::UpdatedAtDesc => by_updated().reverse(),
        }
    }
}

impl FilterSet<Product> for ProductFilter {
    fn apply(&self, items: Vec<Product>) -> Vec<Product> {
        let mut items: Vec<_> = items.into_iter().filter(|p| self.matches(p)).collect();
        items.sort_by(|a, b| self.compare(a, b));
        DistinctFilterSet.apply(items)
    }
}
