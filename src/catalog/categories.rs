//! Category resolvers and mutations

use futures::future::try_join_all;
use std::collections::HashSet;

use super::Catalog;
use super::inputs::{CategoryInput, check};
use crate::core::error::DashboardResult;
use crate::core::validation::filters::slugify;
use crate::core::Entity;
use crate::models::Category;

impl Catalog {
    /// All categories, restricted to one tree level when given
    ///
    /// Ordered by level, then name.
    pub async fn resolve_categories(&self, level: Option<i32>) -> DashboardResult<Vec<Category>> {
        let mut categories: Vec<Category> = self
            .categories
            .list()
            .await?
            .into_iter()
            .filter(|c| level.is_none_or(|level| c.level == level))
            .collect();

        categories.sort_by(|a, b| {
            a.level
                .cmp(&b.level)
                .then_with(|| a.name.cmp(&b.name))
                .then(a.pk.cmp(&b.pk))
        });
        Ok(categories)
    }

    /// Direct children of a category, by name
    pub async fn category_children(&self, parent: i64) -> DashboardResult<Vec<Category>> {
        let mut children: Vec<Category> = self
            .categories
            .search("parent", &parent.to_string())
            .await?;
        children.sort_by(|a, b| a.name.cmp(&b.name).then(a.pk.cmp(&b.pk)));
        Ok(children)
    }

    pub async fn create_category(
        &self,
        input: CategoryInput,
        parent_id: Option<&str>,
    ) -> DashboardResult<Category> {
        let parent = match parent_id {
            Some(id) => Some(self.get_category(id).await?),
            None => None,
        };

        let mut input = input.normalized();
        if input.slug.is_none() {
            input.slug = input.name.as_deref().map(slugify).filter(|s| !s.is_empty());
        }
        let mut errors = check(&input, &[("name", input.name.is_some())]);
        // No slug was sent and none could be derived from the name
        if input.slug.is_none() && input.name.as_deref().is_some_and(|n| !n.is_empty()) {
            errors.add("name", "Enter a name containing letters or numbers.");
        }
        errors.into_result()?;

        let category = Category::new(
            input.name.unwrap_or_default(),
            input.slug.unwrap_or_default(),
            parent.as_ref(),
        )
        .with_description(input.description.unwrap_or_default());

        let category = self.categories.create(category).await?;
        tracing::info!(pk = category.pk, slug = %category.slug, "category created");
        Ok(category)
    }

    /// Partial update; the parent is not changed
    pub async fn update_category(
        &self,
        id: &str,
        input: CategoryInput,
    ) -> DashboardResult<Category> {
        let mut category = self.get_category(id).await?;

        let input = input.normalized();
        check(&input, &[]).into_result()?;

        if let Some(name) = input.name {
            category.name = name;
        }
        if let Some(slug) = input.slug {
            category.slug = slug;
        }
        if let Some(description) = input.description {
            category.description = description;
        }

        Ok(self.categories.update(category.pk(), category).await?)
    }

    /// Delete a category together with its subtree and every product in it
    pub async fn delete_category(&self, id: &str) -> DashboardResult<Category> {
        let category = self.get_category(id).await?;

        let all = self.categories.list().await?;
        let mut doomed = HashSet::from([category.pk]);
        // Grow the set until no category points into it
        loop {
            let before = doomed.len();
            for c in &all {
                if c.parent.is_some_and(|p| doomed.contains(&p)) {
                    doomed.insert(c.pk);
                }
            }
            if doomed.len() == before {
                break;
            }
        }

        let products: Vec<i64> = self
            .products
            .list()
            .await?
            .into_iter()
            .filter(|p| doomed.contains(&p.category))
            .map(|p| p.pk)
            .collect();
        try_join_all(products.iter().map(|pk| self.products.delete(*pk))).await?;
        try_join_all(doomed.iter().map(|pk| self.categories.delete(*pk))).await?;

        tracing::info!(
            pk = category.pk,
            categories = doomed.len(),
            products = products.len(),
            "category deleted"
        );
        Ok(category)
    }
}
