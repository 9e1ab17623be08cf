//! Relay global identifiers
//!
//! A global id is `base64("<Kind>:<pk>")`. The frontend treats it as opaque;
//! the backend uses the kind to pick a store and the pk to load from it.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fmt;

use crate::core::error::{DashboardResult, EntityError};

/// Every kind of node the API can hand out an id for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Category,
    Page,
    Product,
}

impl NodeKind {
    pub const ALL: [NodeKind; 3] = [NodeKind::Category, NodeKind::Page, NodeKind::Product];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Category => "Category",
            NodeKind::Page => "Page",
            NodeKind::Product => "Product",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == s)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded global id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlobalId {
    kind: NodeKind,

    /// Private on purpose: use [`Self::key_for`] so the kind is always checked.
    pk: i64,
}

impl GlobalId {
    pub fn new(kind: NodeKind, pk: i64) -> Self {
        Self { kind, pk }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Decode the opaque string form
    pub fn decode(raw: &str) -> DashboardResult<Self> {
        let invalid = || EntityError::InvalidId { id: raw.to_string() };

        let bytes = STANDARD.decode(raw.trim()).map_err(|_| invalid())?;
        let text = String::from_utf8(bytes).map_err(|_| invalid())?;
        let (kind, pk) = text.split_once(':').ok_or_else(invalid)?;
        let kind = NodeKind::parse(kind).ok_or_else(invalid)?;
        let pk = pk.parse::<i64>().map_err(|_| invalid())?;

        Ok(Self { kind, pk })
    }

    /// Encode to the opaque string form
    pub fn encode(&self) -> String {
        STANDARD.encode(format!("{}:{}", self.kind, self.pk))
    }

    /// Returns the pk if this id is of `expected` kind, otherwise a
    /// type-mismatch error.
    pub fn key_for(&self, expected: NodeKind) -> DashboardResult<i64> {
        if self.kind == expected {
            Ok(self.pk)
        } else {
            Err(EntityError::TypeMismatch {
                expected: expected.to_string(),
                found: self.kind.to_string(),
            }
            .into())
        }
    }

    pub(crate) fn pk(&self) -> i64 {
        self.pk
    }
}

impl fmt::Display for GlobalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
