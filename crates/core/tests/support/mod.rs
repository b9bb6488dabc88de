//! Shared test helpers for `nextup-core` integration tests.
//!
//! Fixtures build ordered event sequences relative to a fixed "now" so the
//! scenario tests can focus on behaviour instead of timestamps.

#![allow(dead_code)]

pub mod events;
