//! Core transport components.
//!
//! Contains the HTTP cookie helpers that carry signed values.

pub mod cookie;
