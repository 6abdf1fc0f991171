//! Summary counts for a set of schools.

use std::collections::{BTreeMap, HashSet};

use crate::school::{School, SchoolLevel};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Statistics {
    pub total: usize,
    pub regions: usize,
    pub provinces: usize,
    pub communes: usize,
    /// Most common level first; ties keep level order.
    pub by_level: Vec<(SchoolLevel, usize)>,
}

impl Statistics {
    pub fn from_schools<'a, I>(schools: I) -> Self
    where
        I: IntoIterator<Item = &'a School>,
    {
        let mut total = 0;
        let mut regions = HashSet::new();
        let mut provinces = HashSet::new();
        let mut communes = HashSet::new();
        let mut levels: BTreeMap<SchoolLevel, usize> = BTreeMap::new();

        for school in schools {
            total += 1;
            regions.insert(school.region.as_str());
            provinces.insert(school.province.as_str());
            communes.insert(school.commune.as_str());
            *levels.entry(school.level).or_default() += 1;
        }

        let mut by_level: Vec<_> = levels.into_iter().collect();
        by_level.sort_by(|a, b| b.1.cmp(&a.1));

        Self {
            total,
            regions: regions.len(),
            provinces: provinces.len(),
            communes: communes.len(),
            by_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::SampleDataset;
    use crate::traits::SchoolSource;

    #[test]
    fn test_sample_statistics() {
        let schools = SampleDataset.schools().unwrap();
        let stats = Statistics::from_schools(&schools);
        assert_eq!(stats.total, 30);
        assert_eq!(stats.regions, 8);
        assert_eq!(
            stats.by_level,
            vec![
                (SchoolLevel::Primaire, 14),
                (SchoolLevel::College, 9),
                (SchoolLevel::Lycee, 7),
            ]
        );
    }

    #[test]
    fn test_empty() {
        let stats = Statistics::from_schools(std::iter::empty());
        assert_eq!(stats, Statistics::default());
    }
}
