//! Opaque-Driver
//!
//! Browser automation support library that makes a driven session read like a
//! human one: humanized keyboard, pointer and scroll input, fingerprint
//! mitigation patches applied before first navigation, and a rotating user
//! agent identity layer.
//!
//! The crate talks to a browser only through the [`cdp::PageBinding`] trait,
//! so any CDP transport (or a mock) can sit underneath.

pub mod cdp;
pub mod config;
pub mod driver;
pub mod error;
pub mod humanize;
pub mod identity;
pub mod stealth;

pub use config::Config;
pub use driver::OpaquePage;
pub use error::{Error, Result};
pub use identity::{Platform, PlatformSelector, UserAgent};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
