//! Engine-wide contracts: error types and parameter validation.
//!
//! This module has no rendering logic; it only decides what inputs are acceptable.

pub mod contracts;
pub mod errors;
