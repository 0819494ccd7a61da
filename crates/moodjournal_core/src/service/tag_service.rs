//! Tag use-case service.
//!
//! # Responsibility
//! - Seed the predefined tag catalog once per store.
//! - Provide find-or-create semantics for automatic and user tags.
//! - Manage user categories. System categories cannot be deleted.
//!
//! # Invariants
//! - Seeding twice never duplicates a system category or predefined tag.
//! - Blank tag/category names are rejected; names are whitespace-normalized.

use crate::model::catalog::predefined_categories;
use crate::model::tag::{
    normalize_tag_name, AutomaticTag, CategoryId, Tag, TagCategory, TagId, DEFAULT_TAG_ICON,
};
use crate::repo::tag_repo::TagRepository;
use crate::repo::{RepoError, RepoResult};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Service error for tag use-cases.
#[derive(Debug)]
pub enum TagServiceError {
    /// Name is blank after trimming.
    InvalidName(String),
    TagNotFound(TagId),
    CategoryNotFound(CategoryId),
    /// Seeded categories cannot be removed by the user.
    SystemCategory(CategoryId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for TagServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(value) => write!(f, "invalid tag name: `{value}`"),
            Self::TagNotFound(id) => write!(f, "tag not found: {id}"),
            Self::CategoryNotFound(id) => write!(f, "tag category not found: {id}"),
            Self::SystemCategory(id) => write!(f, "system tag category cannot be deleted: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TagServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for TagServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::TagNotFound(id) => Self::TagNotFound(id),
            RepoError::CategoryNotFound(id) => Self::CategoryNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Outcome of one catalog seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// The persisted seeded flag was already set; nothing was touched.
    pub already_seeded: bool,
    pub categories_created: usize,
    pub tags_created: usize,
}

/// One category with its tags, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryWithTags {
    pub category: TagCategory,
    pub tags: Vec<Tag>,
}

/// Tag service facade over repository implementations.
pub struct TagService<R: TagRepository> {
    repo: R,
}

impl<R: TagRepository> TagService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Materializes the Weather/Emotions/Activities/People categories.
    ///
    /// Guarded by a persisted seeded flag. Each category and tag is also
    /// find-or-created, so a run interrupted midway is completed by the next.
    pub fn seed_predefined_catalog(&self) -> Result<SeedReport, TagServiceError> {
        let started_at = Instant::now();
        if self.repo.is_catalog_seeded()? {
            debug!("event=catalog_seed module=tag_service status=skipped reason=already_seeded");
            return Ok(SeedReport {
                already_seeded: true,
                ..SeedReport::default()
            });
        }

        let mut report = SeedReport::default();
        for seed in predefined_categories() {
            let category = match self.repo.find_category_by_name(seed.name, true)? {
                Some(existing) => existing,
                None => {
                    let category =
                        TagCategory::new(seed.name, seed.icon, None, true, seed.sort_order);
                    self.repo.insert_category(&category)?;
                    report.categories_created += 1;
                    category
                }
            };

            for tag_data in seed.tags {
                if self
                    .repo
                    .find_tag_in_category(category.id, tag_data.name)?
                    .is_some()
                {
                    continue;
                }
                let tag = Tag::new(tag_data.name, tag_data.icon, false, true, Some(category.id));
                self.repo.insert_tag(&tag)?;
                report.tags_created += 1;
            }
        }
        self.repo.mark_catalog_seeded()?;

        info!(
            "event=catalog_seed module=tag_service status=ok categories_created={} tags_created={} duration_ms={}",
            report.categories_created,
            report.tags_created,
            started_at.elapsed().as_millis()
        );
        Ok(report)
    }

    /// Returns the single automatic tag of this kind, creating it on first use.
    pub fn ensure_automatic_tag(&self, kind: AutomaticTag) -> RepoResult<Tag> {
        self.repo.ensure_automatic_tag(kind)
    }

    /// Creates a user tag, or returns the existing one with the same name.
    ///
    /// Lookup is case-insensitive and scoped to `category_id`; uncategorized
    /// tags are matched among non-automatic tags.
    pub fn create_user_tag(
        &self,
        name: &str,
        icon: Option<&str>,
        category_id: Option<CategoryId>,
    ) -> Result<Tag, TagServiceError> {
        let name = normalize_tag_name(name)
            .ok_or_else(|| TagServiceError::InvalidName(name.to_string()))?;

        let existing = match category_id {
            Some(category_id) => {
                if self.repo.get_category(category_id)?.is_none() {
                    return Err(TagServiceError::CategoryNotFound(category_id));
                }
                self.repo.find_tag_in_category(category_id, &name)?
            }
            None => self.repo.list_tags()?.into_iter().find(|tag| {
                !tag.is_automatic
                    && tag.category_id.is_none()
                    && tag.name.eq_ignore_ascii_case(&name)
            }),
        };
        if let Some(tag) = existing {
            return Ok(tag);
        }

        let tag = Tag::new(
            name,
            icon.unwrap_or(DEFAULT_TAG_ICON),
            false,
            false,
            category_id,
        );
        self.repo.insert_tag(&tag)?;
        debug!(
            "event=tag_create module=tag_service status=ok tag_id={} categorized={}",
            tag.id,
            category_id.is_some()
        );
        Ok(tag)
    }

    /// Creates a user category placed after every existing category.
    pub fn create_category(
        &self,
        name: &str,
        icon: &str,
        color_hex: Option<String>,
    ) -> Result<TagCategory, TagServiceError> {
        let name = normalize_tag_name(name)
            .ok_or_else(|| TagServiceError::InvalidName(name.to_string()))?;
        let next_sort_order = self
            .repo
            .list_categories()?
            .iter()
            .map(|category| category.sort_order)
            .max()
            .map_or(1, |max| max + 1);

        let category = TagCategory::new(name, icon, color_hex, false, next_sort_order);
        self.repo.insert_category(&category)?;
        Ok(category)
    }

    /// Deletes one user category and every tag it owns.
    pub fn delete_category(&self, id: CategoryId) -> Result<(), TagServiceError> {
        let category = self
            .repo
            .get_category(id)?
            .ok_or(TagServiceError::CategoryNotFound(id))?;
        if category.is_system_category {
            return Err(TagServiceError::SystemCategory(id));
        }
        self.repo.delete_category(id)?;
        info!("event=category_delete module=tag_service status=ok category_id={id}");
        Ok(())
    }

    /// Deletes one tag. Entries that carried it keep existing without it.
    pub fn delete_tag(&self, id: TagId) -> Result<(), TagServiceError> {
        self.repo.delete_tag(id)?;
        Ok(())
    }

    /// Lists every category with its tags, in display order.
    pub fn list_catalog(&self) -> RepoResult<Vec<CategoryWithTags>> {
        self.repo
            .list_categories()?
            .into_iter()
            .map(|category| {
                let tags = self.repo.list_tags_in_category(category.id)?;
                Ok(CategoryWithTags { category, tags })
            })
            .collect()
    }

    pub fn list_tags(&self) -> RepoResult<Vec<Tag>> {
        self.repo.list_tags()
    }
}
