//! Integration test entry point.
//!
//! Single binary so the mock adapters are shared across test modules.

mod bridge_tests;
mod mock_hw;
