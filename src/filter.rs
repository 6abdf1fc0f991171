//! Hierarchical facet filtering and free-text search.

use std::collections::{BTreeSet, HashSet};

use rayon::prelude::*;

use crate::hierarchy::LocationHierarchy;
use crate::school::School;

/// Collections at least this large are filtered on the rayon pool.
const PARALLEL_THRESHOLD: usize = 2048;

/// Selected regions, provinces and communes.
///
/// Each list keeps first-selection order and never holds duplicates. An
/// empty list places no constraint on that facet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    regions: Vec<String>,
    provinces: Vec<String>,
    communes: Vec<String>,
}

impl FilterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_regions<I, S>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.regions = dedup_labels(regions);
        self
    }

    pub fn with_provinces<I, S>(mut self, provinces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.provinces = dedup_labels(provinces);
        self
    }

    pub fn with_communes<I, S>(mut self, communes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.communes = dedup_labels(communes);
        self
    }

    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    pub fn provinces(&self) -> &[String] {
        &self.provinces
    }

    pub fn communes(&self) -> &[String] {
        &self.communes
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    /// Number of selected values across all three facets.
    pub fn active_count(&self) -> usize {
        self.regions.len() + self.provinces.len() + self.communes.len()
    }

    pub fn set_regions<I, S>(&mut self, regions: I, hierarchy: &LocationHierarchy)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.regions = dedup_labels(regions);
        self.prune(hierarchy);
    }

    pub fn set_provinces<I, S>(&mut self, provinces: I, hierarchy: &LocationHierarchy)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.provinces = dedup_labels(provinces);
        self.prune(hierarchy);
    }

    pub fn set_communes<I, S>(&mut self, communes: I, hierarchy: &LocationHierarchy)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.communes = dedup_labels(communes);
        self.prune(hierarchy);
    }

    /// Drops selections the higher facets no longer reach.
    ///
    /// Unknown regions go first. Provinces must sit under a selected region
    /// (any region if none is selected). Communes must sit under a selected
    /// province, or under the selected regions when no province is selected.
    /// Applying this twice changes nothing the second time.
    pub fn prune(&mut self, hierarchy: &LocationHierarchy) {
        self.regions.retain(|r| hierarchy.has_region(r));

        let reachable = hierarchy.provinces_for_regions(&self.regions);
        self.provinces.retain(|p| reachable.contains(p.as_str()));

        let reachable = available_communes(self, hierarchy);
        self.communes.retain(|c| reachable.contains(c.as_str()));
    }

    /// Whether `school` passes all three facets.
    pub fn matches(&self, school: &School) -> bool {
        facet_matches(&self.regions, &school.region)
            && facet_matches(&self.provinces, &school.province)
            && facet_matches(&self.communes, &school.commune)
    }
}

/// Communes offered by the commune facet for the current selection.
pub fn available_communes<'h>(
    filters: &FilterOptions,
    hierarchy: &'h LocationHierarchy,
) -> BTreeSet<&'h str> {
    if filters.provinces.is_empty() {
        hierarchy.communes_for_regions(&filters.regions)
    } else {
        hierarchy.communes_for_provinces(&filters.provinces)
    }
}

/// A normalized free-text query. `None` when the query is blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    pub fn parse(query: &str) -> Option<Self> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            needle: trimmed.to_lowercase(),
        })
    }

    /// Case-insensitive, accent-sensitive substring match on any searchable field.
    pub fn matches(&self, school: &School) -> bool {
        school
            .searchable_fields()
            .any(|field| field.to_lowercase().contains(&self.needle))
    }
}

/// Narrows `schools` by the facet filters, then by `query`.
///
/// The result keeps the input order.
pub fn filter_and_search<'a>(
    schools: &'a [School],
    filters: &FilterOptions,
    query: &str,
) -> Vec<&'a School> {
    let query = SearchQuery::parse(query);
    let keep = |school: &&School| {
        filters.matches(school) && query.as_ref().is_none_or(|q| q.matches(school))
    };

    if schools.len() >= PARALLEL_THRESHOLD {
        schools.par_iter().filter(keep).collect()
    } else {
        schools.iter().filter(keep).collect()
    }
}

fn facet_matches(selected: &[String], label: &str) -> bool {
    selected.is_empty() || selected.iter().any(|s| s == label)
}

fn dedup_labels<I, S>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    labels
        .into_iter()
        .map(Into::into)
        .filter(|label| seen.insert(label.clone()))
        .collect()
}
