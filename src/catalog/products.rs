//! Product resolvers and mutations

use super::Catalog;
use super::filters::ProductFilter;
use super::inputs::{ProductInput, check, set_nullable};
use crate::core::FilterSet;
use crate::core::error::DashboardResult;
use crate::models::Product;

impl Catalog {
    /// Products, optionally of one category, through the product filter-set
    ///
    /// `category_id` must be a Category global id; lookup errors propagate.
    pub async fn resolve_products(
        &self,
        category_id: Option<&str>,
        filter: &ProductFilter,
    ) -> DashboardResult<Vec<Product>> {
        let products = match category_id {
            Some(id) => {
                let category = self.get_category(id).await?;
                self.products
                    .search("category", &category.pk.to_string())
                    .await?
            }
            None => self.products.list().await?,
        };
        Ok(filter.apply(products))
    }

    pub async fn create_product(&self, input: ProductInput) -> DashboardResult<Product> {
        let input = input.normalized();
        check(
            &input,
            &[
                ("name", input.name.is_some()),
                ("category_id", input.category_id.is_some()),
                ("price", input.price.is_some()),
            ],
        )
        .into_result()?;
        // Presence was checked above
        let category_id = input.category_id.map(|id| id.0).unwrap_or_default();
        let category = self.get_category(&category_id).await?;

        let mut product = Product::new(
            input.name.unwrap_or_default(),
            category.pk,
            input.price.unwrap_or_default(),
        );
        product.description = input.description.unwrap_or_default();
        product.is_published = input.is_published.unwrap_or(false);
        set_nullable(input.available_on, &mut product.available_on);

        let product = self.products.create(product).await?;
        tracing::info!(pk = product.pk, category = product.category, "product created");
        Ok(product)
    }

    /// Partial update; an explicit `null` for `availableOn` clears the date
    pub async fn update_product(&self, id: &str, input: ProductInput) -> DashboardResult<Product> {
        let mut product = self.get_product(id).await?;

        let input = input.normalized();
        check(&input, &[]).into_result()?;
        if let Some(category_id) = input.category_id.as_deref() {
            product.category = self.get_category(category_id).await?.pk;
        }

        if let Some(name) = input.name {
            product.name = name;
        }
        if let Some(description) = input.description {
            product.description = description;
        }
        if let Some(price) = input.price {
            product.price = price;
        }
        if let Some(is_published) = input.is_published {
            product.is_published = is_published;
        }
        set_nullable(input.available_on, &mut product.available_on);

        Ok(self.products.update(product.pk, product).await?)
    }

    pub async fn delete_product(&self, id: &str) -> DashboardResult<Product> {
        let product = self.get_product(id).await?;
        self.products.delete(product.pk).await?;
        tracing::info!(pk = product.pk, "product deleted");
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::inputs::CategoryInput;
    use crate::config::DashboardConfig;
    use crate::core::error::ValidationError;
    use crate::core::{DashboardError, GlobalId, NodeEntity, NodeKind};
    use crate::models::Category;
    use async_graphql::{ID, MaybeUndefined};
    use chrono::NaiveDate;

    async fn catalog_with_category(name: &str) -> (Catalog, Category) {
        let catalog = Catalog::in_memory(&DashboardConfig::default());
        let category = catalog
            .create_category(
                CategoryInput {
                    name: Some(name.to_string()),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap();
        (catalog, category)
    }

    fn product_input(name: &str, category: &Category, price: f64) -> ProductInput {
        ProductInput {
            name: Some(name.to_string()),
            category_id: Some(ID(category.global_id().encode())),
            price: Some(price),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_product() {
        let (catalog, shoes) = catalog_with_category("Shoes").await;
        let product = catalog
            .create_product(product_input("Sneakers", &shoes, 59.999))
            .await
            .unwrap();

        assert_eq!(product.category, shoes.pk);
        assert_eq!(product.price, 60.0);
        assert!(!product.is_published);
    }

    #[tokio::test]
    async fn test_create_product_validation() {
        let (catalog, _) = catalog_with_category("Shoes").await;
        let err = catalog
            .create_product(ProductInput {
                name: Some(String::new()),
                price: Some(-5.0),
                ..Default::default()
            })
            .await
            .unwrap_err();

        let DashboardError::Validation(ValidationError::FieldErrors(errors)) = err else {
            panic!("expected validation errors");
        };
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["categoryId", "name", "price"]);
    }

    #[tokio::test]
    async fn test_create_product_with_page_id_is_type_mismatch() {
        let (catalog, _) = catalog_with_category("Shoes").await;
        let err = catalog
            .create_product(ProductInput {
                name: Some("Sneakers".to_string()),
                category_id: Some(ID(GlobalId::new(NodeKind::Page, 1).encode())),
                price: Some(1.0),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "TYPE_MISMATCH");
    }

    #[tokio::test]
    async fn test_resolve_products_by_category() {
        let (catalog, shoes) = catalog_with_category("Shoes").await;
        let hats = catalog
            .create_category(
                CategoryInput {
                    name: Some("Hats".to_string()),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap();
        catalog.create_product(product_input("Sneakers", &shoes, 59.0)).await.unwrap();
        catalog.create_product(product_input("Boots", &shoes, 99.0)).await.unwrap();
        catalog.create_product(product_input("Cap", &hats, 15.0)).await.unwrap();

        let shoes_id = shoes.global_id().encode();
        let names: Vec<_> = catalog
            .resolve_products(Some(&shoes_id), &ProductFilter::default())
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Boots", "Sneakers"]);

        let all = catalog
            .resolve_products(None, &ProductFilter::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_update_moves_category() {
        let (catalog, shoes) = catalog_with_category("Shoes").await;
        let product = catalog
            .create_product(product_input("Sneakers", &shoes, 59.0))
            .await
            .unwrap();
        let sale = catalog
            .create_category(
                CategoryInput {
                    name: Some("Sale".to_string()),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap();

        let updated = catalog
            .update_product(
                &product.global_id().encode(),
                ProductInput {
                    category_id: Some(ID(sale.global_id().encode())),
                    price: Some(39.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.category, sale.pk);
        assert_eq!(updated.price, 39.0);
        assert_eq!(updated.name, "Sneakers");
    }

    #[tokio::test]
    async fn test_update_clears_available_on_only_on_null() {
        let (catalog, shoes) = catalog_with_category("Shoes").await;
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let product = catalog
            .create_product(ProductInput {
                available_on: MaybeUndefined::Value(date),
                ..product_input("Sneakers", &shoes, 59.0)
            })
            .await
            .unwrap();
        let id = product.global_id().encode();

        let renamed = catalog
            .update_product(
                &id,
                ProductInput {
                    name: Some("Runners".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.available_on, Some(date));

        let cleared = catalog
            .update_product(
                &id,
                ProductInput {
                    available_on: MaybeUndefined::Null,
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(cleared.available_on, None);
    }

    #[tokio::test]
    async fn test_delete_product() {
        let (catalog, shoes) = catalog_with_category("Shoes").await;
        let product = catalog
            .create_product(product_input("Sneakers", &shoes, 59.0))
            .await
            .unwrap();

        let deleted = catalog
            .delete_product(&product.global_id().encode())
            .await
            .unwrap();
        assert_eq!(deleted.name, "Sneakers");
        assert!(
            catalog
                .resolve_products(None, &ProductFilter::default())
                .await
                .unwrap()
                .is_empty()
        );
    }
}
