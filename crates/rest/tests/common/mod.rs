//! Common test utilities for REST API testing.
//!
//! - [`mock`] - Recording test double for `CustomerService`
//! - [`harness`] - Test server construction

#![allow(dead_code)]

pub mod harness;
pub mod mock;
