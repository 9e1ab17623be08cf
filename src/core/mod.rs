//! Core module containing the fundamental traits and types of the dashboard

pub mod auth;
pub mod entity;
pub mod error;
pub mod field;
pub mod filter;
pub mod id;
pub mod jwt;
pub mod password;
pub mod query;
pub mod service;
pub mod validation;

pub use auth::{AuthContext, AuthPolicy, AuthProvider};
pub use entity::{Data, Entity, NodeEntity};
pub use error::{DashboardError, DashboardResult};
pub use field::FieldValue;
pub use filter::{DistinctFilterSet, FilterSet};
pub use id::{GlobalId, NodeKind};
pub use jwt::{Claims, JwtError, JwtService};
pub use query::{ConnectionArgs, PageWindow};
pub use service::DataService;
