//! Page resolvers and mutations

use super::Catalog;
use super::inputs::{PageInput, check, set_nullable};
use crate::core::error::{DashboardError, DashboardResult};
use crate::core::validation::FieldErrors;
use crate::models::Page;

impl Catalog {
    /// Every page, invisible ones included, ordered by slug
    pub async fn resolve_all_pages(&self) -> DashboardResult<Vec<Page>> {
        let mut pages = self.pages.list().await?;
        pages.sort_by(|a, b| a.slug.cmp(&b.slug));
        Ok(pages)
    }

    pub async fn create_page(&self, input: PageInput) -> DashboardResult<Page> {
        let input = input.normalized();
        let mut errors = check(
            &input,
            &[("slug", input.slug.is_some()), ("title", input.title.is_some())],
        );
        self.check_slug_free(input.slug.as_deref(), None, &mut errors)
            .await?;
        errors.into_result()?;

        let mut page = Page::new(input.slug.unwrap_or_default(), input.title.unwrap_or_default());
        page.content = input.content.unwrap_or_default();
        page.is_visible = input.is_visible.unwrap_or(false);
        set_nullable(input.available_on, &mut page.available_on);

        let slug = page.slug.clone();
        let page = self
            .pages
            .create_unique("slug", &slug, page)
            .await?
            .ok_or_else(slug_taken)?;
        tracing::info!(pk = page.pk, slug = %page.slug, "page created");
        Ok(page)
    }

    /// Partial update; an explicit `null` for `availableOn` clears the date
    pub async fn update_page(&self, id: &str, input: PageInput) -> DashboardResult<Page> {
        let mut page = self.get_page(id).await?;

        let input = input.normalized();
        let mut errors = check(&input, &[]);
        self.check_slug_free(input.slug.as_deref(), Some(page.pk), &mut errors)
            .await?;
        errors.into_result()?;

        if let Some(slug) = input.slug {
            page.slug = slug;
        }
        if let Some(title) = input.title {
            page.title = title;
        }
        if let Some(content) = input.content {
            page.content = content;
        }
        if let Some(is_visible) = input.is_visible {
            page.is_visible = is_visible;
        }
        set_nullable(input.available_on, &mut page.available_on);

        let slug = page.slug.clone();
        self.pages
            .update_unique(page.pk, "slug", &slug, page)
            .await?
            .ok_or_else(slug_taken)
    }

    pub async fn delete_page(&self, id: &str) -> DashboardResult<Page> {
        let page = self.get_page(id).await?;
        self.pages.delete(page.pk).await?;
        tracing::info!(pk = page.pk, slug = %page.slug, "page deleted");
        Ok(page)
    }

    async fn check_slug_free(
        &self,
        slug: Option<&str>,
        own_pk: Option<i64>,
        errors: &mut FieldErrors,
    ) -> DashboardResult<()> {
        let Some(slug) = slug.filter(|s| !s.is_empty()) else {
            return Ok(());
        };
        let taken = self
            .pages
            .search("slug", slug)
            .await?
            .iter()
            .any(|page| Some(page.pk) != own_pk);
        if taken {
            errors.add("slug", SLUG_TAKEN);
        }
        Ok(())
    }
}

const SLUG_TAKEN: &str = "Page with this Slug already exists.";

fn slug_taken() -> DashboardError {
    DashboardError::field("slug", SLUG_TAKEN)
}
