//! Macros for reducing boilerplate when defining models

/// Implement [`Entity`](crate::core::Entity) for a struct carrying the
/// base fields `pk`, `created_at` and `updated_at`.
///
/// # Example
/// ```rust,ignore
/// impl_entity!(Page, "pages");
/// ```
#[macro_export]
macro_rules! impl_entity {
    ($type:ident, $resource:expr) => {
        impl $crate::core::Entity for $type {
            fn resource_name() -> &'static str {
                $resource
            }

            fn pk(&self) -> i64 {
                self.pk
            }

            fn assign_pk(&mut self, pk: i64) {
                self.pk = pk;
            }

            fn created_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.created_at
            }

            fn updated_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.updated_at
            }

            fn touch(&mut self) {
                self.updated_at = ::chrono::Utc::now();
            }
        }
    };
}
