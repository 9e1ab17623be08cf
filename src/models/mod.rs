//! Stored catalog, content and account models

mod macros;

pub mod category;
pub mod page;
pub mod product;
pub mod user;

pub use category::Category;
pub use page::Page;
pub use product::Product;
pub use user::User;
