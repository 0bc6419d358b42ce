//! Test suite for the page block system
//!
//! Tests are grouped by the part of the system they exercise. Module-level
//! unit tests live next to the code they cover.

#[cfg(test)]
mod render_tests;
#[cfg(test)]
mod contact_tests;
