use crate::prelude::*;
use std::path::PathBuf;

/// Returns path to given test resource
pub fn test_resource(kind: &str, revision: &str, name: &str) -> PathBuf {
    PathBuf::new()
        .join(env!("CARGO_MANIFEST_DIR"))
        .join("test_resources")
        .join(kind)
        .join(revision)
        .join(name)
}

/// Formats a header line: 60 columns of content, then the label
pub fn header_line(content: &str, label: &str) -> String {
    format!("{:<60}{}", content, label)
}

/// Returns system codes of given set, as a CSV
pub fn codes_csv(codes: &std::collections::BTreeSet<String>) -> String {
    codes
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

/// Generic checks of an [Examination], common to all test resources
pub fn generic_examination_test(
    dut: &Examination,
    version: &str,
    header_systems: &str,
    observed_systems: &str,
    num_epochs: usize,
    first_epoch: &str,
    last_epoch: &str,
    interval: Option<&str>,
) {
    assert_eq!(dut.header.version.as_deref(), Some(version), "bad version");
    assert_eq!(
        codes_csv(&dut.header.constellations),
        header_systems,
        "bad header systems"
    );
    assert_eq!(
        codes_csv(&dut.observations.constellations),
        observed_systems,
        "bad observed systems"
    );
    assert_eq!(dut.observations.num_epochs, num_epochs, "bad epoch count");
    assert!(dut.observations.epochs.len() <= 100);
    assert_eq!(
        dut.observations.first_epoch.map(|e| crate::epoch::format_utc(&e)),
        Some(first_epoch.to_string()),
        "bad first epoch"
    );
    assert_eq!(
        dut.observations.last_epoch.map(|e| crate::epoch::format_utc(&e)),
        Some(last_epoch.to_string()),
        "bad last epoch"
    );
    assert_eq!(
        dut.interval.map(|summary| summary.to_string()),
        interval.map(|s| s.to_string()),
        "bad interval"
    );
}
