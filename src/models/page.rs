//! Content pages

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::field::FieldValue;
use crate::core::{Data, NodeEntity, NodeKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub pk: i64,

    /// Unique across pages
    pub slug: String,
    pub title: String,
    pub content: String,
    pub is_visible: bool,
    pub available_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Page {
    pub fn new(slug: impl Into<String>, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            pk: 0,
            slug: slug.into(),
            title: title.into(),
            content: String::new(),
            is_visible: false,
            available_on: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether storefront visitors may see the page on `date`
    pub fn is_published_on(&self, date: NaiveDate) -> bool {
        self.is_visible && self.available_on.is_none_or(|from| from <= date)
    }
}

crate::impl_entity!(Page, "pages");

impl Data for Page {
    fn indexed_fields() -> &'static [&'static str] {
        &["slug", "title", "is_visible"]
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "pk" => Some(self.pk.into()),
            "slug" => Some(self.slug.as_str().into()),
            "title" => Some(self.title.as_str().into()),
            "content" => Some(self.content.as_str().into()),
            "is_visible" => Some(self.is_visible.into()),
            "available_on" => Some(self.available_on.into()),
            _ => None,
        }
    }
}

impl NodeEntity for Page {
    const KIND: NodeKind = NodeKind::Page;
}
