//! Test helpers module
//!
//! Utilities for integration-testing the Schedula ledger against a real
//! Postgres instance: database lifecycle management and fixture builders.

#![allow(dead_code)]

pub mod database_helper;
pub mod test_data;

#[allow(unused_imports)]
pub use database_helper::*;
#[allow(unused_imports)]
pub use test_data::*;
