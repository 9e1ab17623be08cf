//! Product categories
//!
//! Categories form a tree. `level` is stored rather than derived so that
//! `categories(level: 0)` does not have to walk parents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::field::FieldValue;
use crate::core::{Data, NodeEntity, NodeKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub pk: i64,
    pub name: String,
    pub slug: String,
    pub description: String,

    /// Parent category, `None` for roots
    pub parent: Option<i64>,

    /// Depth in the tree, roots are level 0
    pub level: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn new(name: impl Into<String>, slug: impl Into<String>, parent: Option<&Category>) -> Self {
        let now = Utc::now();
        Self {
            pk: 0,
            name: name.into(),
            slug: slug.into(),
            description: String::new(),
            parent: parent.map(|p| p.pk),
            level: parent.map_or(0, |p| p.level + 1),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

crate::impl_entity!(Category, "categories");

impl Data for Category {
    fn indexed_fields() -> &'static [&'static str] {
        &["name", "slug", "parent", "level"]
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "pk" => Some(self.pk.into()),
            "name" => Some(self.name.as_str().into()),
            "slug" => Some(self.slug.as_str().into()),
            "description" => Some(self.description.as_str().into()),
            "parent" => Some(self.parent.into()),
            "level" => Some(i64::from(self.level).into()),
            _ => None,
        }
    }
}

impl NodeEntity for Category {
    const KIND: NodeKind = NodeKind::Category;
}
