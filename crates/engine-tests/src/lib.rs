#![allow(dead_code)]

use chrono::NaiveDate;
use engine_config::settings::validated::{ExtractorConfig, ExtractorConfigBuilder};
use model::execution::request::{ApiCredentials, DateRange, EstablishmentId, ReportFlags};

pub mod integration;
pub mod utils;

pub const TEST_API_KEY: &str = "test-key";
pub const TEST_API_SECRET: &str = "test-secret";

/// Reporting window shared by the scenarios: January 2024.
pub fn test_range() -> DateRange {
    DateRange::new(
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
    )
    .unwrap()
}

pub fn test_config(base_url: &str, establishments: &[u64]) -> ExtractorConfig {
    ExtractorConfigBuilder::new()
        .base_url(base_url)
        .credentials(ApiCredentials::new(TEST_API_KEY, TEST_API_SECRET))
        .establishments(establishments.iter().copied().map(EstablishmentId).collect())
        .range(test_range())
        .flags(ReportFlags::default())
        .build()
        .expect("complete test config")
}
