//! Region → province → commune lookup tables.
//!
//! Built once from the flat school collection. All label sets are
//! `BTreeSet`s, so they come out sorted by Unicode code point with duplicates
//! removed. That collation puts accented Latin letters after unaccented ones
//! ("Tanger-Assilah" < "Tétouan") and Arabic script after Latin.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::warn;

use crate::school::School;

#[derive(Debug, Clone, Default)]
pub struct LocationHierarchy {
    region_provinces: BTreeMap<String, BTreeSet<String>>,
    province_communes: BTreeMap<String, BTreeSet<String>>,
}

impl LocationHierarchy {
    pub fn from_schools(schools: &[School]) -> Self {
        let mut hierarchy = Self::default();
        let mut province_owner: HashMap<&str, &str> = HashMap::new();

        for school in schools {
            let owner = province_owner
                .entry(school.province.as_str())
                .or_insert(school.region.as_str());
            if *owner != school.region {
                warn!(
                    province = %school.province,
                    first = %owner,
                    second = %school.region,
                    "province listed under two regions"
                );
            }

            hierarchy
                .region_provinces
                .entry(school.region.clone())
                .or_default()
                .insert(school.province.clone());
            hierarchy
                .province_communes
                .entry(school.province.clone())
                .or_default()
                .insert(school.commune.clone());
        }
        hierarchy
    }

    pub fn regions(&self) -> BTreeSet<&str> {
        self.region_provinces.keys().map(String::as_str).collect()
    }

    pub fn has_region(&self, region: &str) -> bool {
        self.region_provinces.contains_key(region)
    }

    /// Provinces under any of `regions`; every province when `regions` is empty.
    pub fn provinces_for_regions<S: AsRef<str>>(&self, regions: &[S]) -> BTreeSet<&str> {
        if regions.is_empty() {
            return self.province_communes.keys().map(String::as_str).collect();
        }
        regions
            .iter()
            .filter_map(|r| self.region_provinces.get(r.as_ref()))
            .flatten()
            .map(String::as_str)
            .collect()
    }

    /// Communes under any of `provinces`; every commune when `provinces` is empty.
    pub fn communes_for_provinces<S: AsRef<str>>(&self, provinces: &[S]) -> BTreeSet<&str> {
        if provinces.is_empty() {
            return self
                .province_communes
                .values()
                .flatten()
                .map(String::as_str)
                .collect();
        }
        provinces
            .iter()
            .filter_map(|p| self.province_communes.get(p.as_ref()))
            .flatten()
            .map(String::as_str)
            .collect()
    }

    /// Communes under any province of `regions`; every commune when empty.
    pub fn communes_for_regions<S: AsRef<str>>(&self, regions: &[S]) -> BTreeSet<&str> {
        if regions.is_empty() {
            return self.communes_for_provinces::<&str>(&[]);
        }
        self.provinces_for_regions(regions)
            .into_iter()
            .filter_map(|p| self.province_communes.get(p))
            .flatten()
            .map(String::as_str)
            .collect()
    }
}
