//! End-to-end pipeline tests for the trade router
//!
//! Exercises the full split → simulate → build flow over canonical pool
//! fixtures. Scenario tests live in `tests/`; this crate only exports the
//! shared fixtures.

pub mod fixtures;
