//! Common utilities for integration tests

#![allow(dead_code)]

pub mod mock_models;
pub mod test_helpers;

// Re-export commonly used items
pub use mock_models::{DrivenPair, UniformDecay};
pub use test_helpers::{
    assert_fields_close,
    compute_l2_error,
    couette_profile,
    create_free_scenario,
    relative_error,
};
