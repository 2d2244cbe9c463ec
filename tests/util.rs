//! Shared test utilities for integration tests
//!
//! Provides the raw export fixture and the expected stage outputs
//! used across multiple test files.

#![allow(dead_code)]

use assert_fs::prelude::*;

/// Raw legacy export with banners, numbering and personnel annotations
pub const RAW: &str = include_str!("fixtures/projects_raw.txt");

/// Expected canonical list for [`RAW`]
pub const CLEANED: &str = include_str!("fixtures/projects_cleaned.txt");

/// Expected grouped report for [`CLEANED`]
pub const ORGANIZED: &str = include_str!("fixtures/projects_organized.txt");

/// Temp directory holding `projects_raw.txt`.
pub fn make_fixture() -> assert_fs::TempDir
{
    // Initialize the temporary working directory
    let tmp = assert_fs::TempDir::new().expect("tempdir");

    tmp.child("projects_raw.txt")
        .write_str(RAW)
        .expect("write raw list");

    // Return the prepared directory to the caller
    tmp
}
