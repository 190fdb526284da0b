//! Security primitives.
//!
//! Provides secret normalization and cookie signing.

pub mod crypto;
