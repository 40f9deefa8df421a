//! Unit test suite for ue4-docker-config
//!
//! Exercises the building blocks of resolution through the public API.
//!
//! ```bash
//! cargo test --test unit
//! ```

mod option_tests;
mod target_tests;
mod value_parsing_tests;
