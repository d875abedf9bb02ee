//! Test helpers module
//!
//! This module provides fixtures and context setup shared by the
//! CarpoolBuddy integration tests.

#![allow(dead_code)]

pub mod simple_test;
pub mod test_data;

pub use simple_test::*;
pub use test_data::*;
