//! School collections for filter and controller tests.

use rihla::dataset::SampleDataset;
use rihla::school::{School, SchoolId, SchoolLevel, SchoolType};
use rihla::traits::SchoolSource;

/// The 30-school sample dataset.
pub fn sample_schools() -> Vec<School> {
    SampleDataset.schools().expect("sample dataset is valid")
}

pub fn ids(schools: &[&School]) -> Vec<SchoolId> {
    schools.iter().map(|s| s.id).collect()
}

/// Builder for test schools with sensible defaults.
#[derive(Clone, Debug)]
pub struct TestSchool {
    school: School,
}

impl TestSchool {
    pub fn new(id: SchoolId, region: &str, province: &str, commune: &str) -> Self {
        Self {
            school: School {
                id,
                name_latin: format!("École {id}"),
                name_arabic: None,
                address_latin: "Centre".to_string(),
                address_arabic: None,
                school_type: SchoolType::Public,
                level: SchoolLevel::Primaire,
                latitude: 33.0,
                longitude: -7.0,
                region: region.to_string(),
                province: province.to_string(),
                commune: commune.to_string(),
            },
        }
    }

    pub fn name(mut self, latin: &str, arabic: Option<&str>) -> Self {
        self.school.name_latin = latin.to_string();
        self.school.name_arabic = arabic.map(str::to_string);
        self
    }

    pub fn address(mut self, latin: &str, arabic: Option<&str>) -> Self {
        self.school.address_latin = latin.to_string();
        self.school.address_arabic = arabic.map(str::to_string);
        self
    }

    pub fn build(self) -> School {
        self.school
    }
}
