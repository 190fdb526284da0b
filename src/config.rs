//! Configuration management.
//!
//! Loads configuration from environment variables using dotenvy.

mod error;
mod settings;

pub use error::{CookieError, Result};
pub use settings::Config;
