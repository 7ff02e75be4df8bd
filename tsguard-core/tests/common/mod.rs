//! Shared test utilities for integration tests

#![allow(dead_code)]

pub mod generators;
pub mod scenarios;

pub use generators::{series, GapMethod, SeriesGenerator};
pub use scenarios::{day_start, utc_ms};
