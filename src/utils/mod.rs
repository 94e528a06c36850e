//! The `utils` module provides a collection of utility functions and common
//! definitions used across the `auditlog` crate.
//!
//! This module centralizes the error types shared by the codec and the
//! storage layer, and the logging setup used by the binary.

pub mod error;
pub mod logging;

#[cfg(test)]
mod tests;
