// src/domain/category/services/mod.rs
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::application::ports::util::SlugGenerator;
use crate::domain::category::entity::{Category, SlugKey, is_mixed_case};
use crate::domain::category::value_objects::CategoryId;

/// Longest slug, in characters, a category name may produce.
pub const MAX_SLUG_CHARS: usize = 255;

/// Pending slug changes keyed by category id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlugPlan {
    updates: BTreeMap<CategoryId, String>,
    renamed: usize,
    cleared: usize,
}

impl SlugPlan {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.updates.len()
    }

    #[must_use]
    pub fn get(&self, id: CategoryId) -> Option<&str> {
        self.updates.get(&id).map(String::as_str)
    }

    /// Pending `(id, new slug)` pairs in id order.
    pub fn updates(&self) -> impl Iterator<Item = (CategoryId, &str)> {
        self.updates.iter().map(|(id, slug)| (*id, slug.as_str()))
    }

    /// Categories that received a slug derived from their name.
    #[must_use]
    pub const fn renamed(&self) -> usize {
        self.renamed
    }

    /// Categories whose slug was reset to empty.
    #[must_use]
    pub const fn cleared(&self) -> usize {
        self.cleared
    }

    /// The rows as they look once the plan is written and every slug lowercased.
    #[must_use]
    pub fn resolve(&self, categories: &[Category]) -> Vec<Category> {
        categories
            .iter()
            .map(|category| {
                let slug = self.get(category.id).unwrap_or(category.slug.as_str());
                Category {
                    slug: slug.to_lowercase(),
                    ..category.clone()
                }
            })
            .collect()
    }
}

/// Computes lowercase-unique slugs per parent scope.
///
/// Mixed-case slugs that collide case-insensitively with a sibling first try a
/// slug derived from the category name; whatever still collides afterwards is
/// cleared. Lowercase and empty slugs are never rewritten here.
pub struct SlugNormalizer {
    generator: Arc<dyn SlugGenerator>,
}

impl SlugNormalizer {
    #[must_use]
    pub const fn new(generator: Arc<dyn SlugGenerator>) -> Self {
        Self { generator }
    }

    /// Slug derived from a category name, or an empty string when the name
    /// yields nothing usable (including purely numeric results).
    #[must_use]
    pub fn candidate_slug(&self, name: &str) -> String {
        let parameterized = self.generator.slugify(name).replace('_', "-");

        let mut squeezed = String::with_capacity(parameterized.len());
        for ch in parameterized.chars() {
            if ch == '-' && squeezed.ends_with('-') {
                continue;
            }
            squeezed.push(ch);
        }

        let candidate: String = squeezed
            .trim_matches('-')
            .chars()
            .take(MAX_SLUG_CHARS)
            .collect();

        if candidate.chars().all(|ch| ch.is_ascii_digit()) {
            String::new()
        } else {
            candidate
        }
    }

    #[must_use]
    pub fn plan(&self, categories: &[Category]) -> SlugPlan {
        let mut plan = SlugPlan::default();
        let mut slugs: Vec<String> = categories.iter().map(|c| c.slug.clone()).collect();

        let mut counts = occupancy(categories, &slugs);
        for (category, slug) in categories.iter().zip(slugs.iter_mut()) {
            let old_key = SlugKey::new(category.parent_id, slug);
            if !is_mixed_case(slug) || count_of(&counts, &old_key) <= 1 {
                continue;
            }

            let candidate = self.candidate_slug(&category.name);
            if candidate.is_empty() {
                continue;
            }
            let new_key = SlugKey::new(category.parent_id, &candidate);
            if count_of(&counts, &new_key) > 0 {
                continue;
            }

            tracing::debug!(
                category_id = %category.id,
                from = %slug,
                to = %candidate,
                "renaming conflicting category slug"
            );
            decrement(&mut counts, &old_key);
            counts.insert(new_key, 1);
            plan.updates.insert(category.id, candidate.clone());
            plan.renamed += 1;
            *slug = candidate;
        }

        let mut counts = occupancy(categories, &slugs);
        for (category, slug) in categories.iter().zip(slugs.iter_mut()) {
            let old_key = SlugKey::new(category.parent_id, slug);
            if !is_mixed_case(slug) || count_of(&counts, &old_key) <= 1 {
                continue;
            }

            tracing::debug!(
                category_id = %category.id,
                from = %slug,
                "clearing category slug that still conflicts"
            );
            decrement(&mut counts, &old_key);
            plan.updates.insert(category.id, String::new());
            plan.cleared += 1;
            slug.clear();
        }

        plan
    }
}

fn occupancy(categories: &[Category], slugs: &[String]) -> HashMap<SlugKey, usize> {
    let mut counts = HashMap::new();
    for (category, slug) in categories.iter().zip(slugs) {
        if slug.is_empty() {
            continue;
        }
        *counts
            .entry(SlugKey::new(category.parent_id, slug))
            .or_insert(0) += 1;
    }
    counts
}

fn count_of(counts: &HashMap<SlugKey, usize>, key: &SlugKey) -> usize {
    counts.get(key).copied().unwrap_or(0)
}

fn decrement(counts: &mut HashMap<SlugKey, usize>, key: &SlugKey) {
    if let Some(count) = counts.get_mut(key) {
        *count = count.saturating_sub(1);
    }
}
