//! User agent identity layer
//!
//! Generates, rotates and parses the user agent strings a session presents to
//! remote services. Generation draws from a catalog of known-good platform
//! clauses and engine versions; rotation hands agents out round-robin across
//! concurrent workers; parsing classifies externally supplied strings.
//!
//! ## Module structure
//! - `catalog`: static platform clause and version templates
//! - `generator`: single user agent construction
//! - `pool`: round-robin rotation pool and its registry
//! - `parser`: structural validation and field extraction

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod catalog;
pub mod generator;
pub mod parser;
pub mod pool;


pub use generator::{
    generate_user_agent, linux_user_agent, mac_user_agent, random_user_agent,
    windows_user_agent, UserAgentGenerator,
};
pub use parser::{is_valid, parse, ParsedUserAgent};
pub use pool::{PoolRegistry, UserAgentPool};

/// Operating system category embedded in a user agent string.
///
/// `Unknown` is only ever produced by the parser for strings whose
/// parenthesized clause matches none of the known platforms; the generator
/// and pool never emit it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    Mac,
    Linux,
    Unknown,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Windows => "windows",
            Platform::Mac => "mac",
            Platform::Linux => "linux",
            Platform::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for Platform {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "windows" => Ok(Platform::Windows),
            "mac" => Ok(Platform::Mac),
            "linux" => Ok(Platform::Linux),
            other => Err(crate::Error::configuration(format!(
                "Unknown platform: {}",
                other
            ))),
        }
    }
}

/// Platform choice for generation: a concrete platform or a uniform draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformSelector {
    Windows,
    Mac,
    Linux,
    Random,
}

impl std::str::FromStr for PlatformSelector {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "windows" => Ok(PlatformSelector::Windows),
            "mac" => Ok(PlatformSelector::Mac),
            "linux" => Ok(PlatformSelector::Linux),
            "random" => Ok(PlatformSelector::Random),
            other => Err(crate::Error::configuration(format!(
                "Unknown platform selector: {}",
                other
            ))),
        }
    }
}

impl From<Platform> for PlatformSelector {
    fn from(platform: Platform) -> Self {
        match platform {
            Platform::Windows => PlatformSelector::Windows,
            Platform::Mac => PlatformSelector::Mac,
            Platform::Linux => PlatformSelector::Linux,
            // Unknown is not generatable; fall back to a uniform draw
            Platform::Unknown => PlatformSelector::Random,
        }
    }
}

/// Immutable user agent string value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserAgent(String);

impl UserAgent {
    /// Wrap an already-formatted user agent string
    pub fn new<S: Into<String>>(value: S) -> Self {
        UserAgent(value.into())
    }

    /// The raw string form
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the value, yielding the raw string
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for UserAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UserAgent {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
