//! Products as the dashboard sees them

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::field::FieldValue;
use crate::core::{Data, NodeEntity, NodeKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub pk: i64,
    pub name: String,
    pub description: String,

    /// Owning category
    pub category: i64,

    /// Net price, two decimals
    pub price: f64,
    pub is_published: bool,
    pub available_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(name: impl Into<String>, category: i64, price: f64) -> Self {
        let now = Utc::now();
        Self {
            pk: 0,
            name: name.into(),
            description: String::new(),
            category,
            price,
            is_published: false,
            available_on: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_available_on(&self, date: NaiveDate) -> bool {
        self.is_published && self.available_on.is_none_or(|from| from <= date)
    }
}

crate::impl_entity!(Product, "products");

impl Data for Product {
    fn indexed_fields() -> &'static [&'static str] {
        &["name", "category", "is_published"]
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "pk" => Some(self.pk.into()),
            "name" => Some(self.name.as_str().into()),
            "description" => Some(self.description.as_str().into()),
            "category" => Some(self.category.into()),
            "price" => Some(FieldValue::Float(self.price)),
            "is_published" => Some(self.is_published.into()),
            "available_on" => Some(self.available_on.into()),
            _ => None,
        }
    }
}

impl NodeEntity for Product {
    const KIND: NodeKind = NodeKind::Product;
}
