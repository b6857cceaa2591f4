//! User agent generator
//!
//! Builds one user agent string for a platform selector and an optional
//! explicit Chrome version. The only randomness is the platform draw (for the
//! `random` selector) and the version draw; given a platform and a version the
//! output is fully deterministic.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{catalog, Platform, PlatformSelector, UserAgent};
use crate::{Error, Result};

/// User agent generator for a fixed platform selector
#[derive(Debug)]
pub struct UserAgentGenerator {
    selector: PlatformSelector,
    rng: Mutex<StdRng>,
    last: Mutex<Option<UserAgent>>,
}

impl UserAgentGenerator {
    /// Create a generator seeded from entropy
    pub fn new(selector: PlatformSelector) -> Self {
        Self {
            selector,
            rng: Mutex::new(StdRng::from_entropy()),
            last: Mutex::new(None),
        }
    }

    /// Create a generator with a fixed seed, for reproducible draws
    pub fn with_seed(selector: PlatformSelector, seed: u64) -> Self {
        Self {
            selector,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            last: Mutex::new(None),
        }
    }

    /// Generate a user agent string.
    ///
    /// An explicit version must match `<major>.<minor>.<build>.<patch>`;
    /// otherwise the version is drawn uniformly from the catalog list.
    pub fn generate(&self, explicit_version: Option<&str>) -> Result<UserAgent> {
        let ua = {
            let mut rng = self.rng.lock().expect("generator rng poisoned");
            generate_with_rng(&mut rng, self.selector, explicit_version)?
        };

        tracing::debug!("Generated user agent: {}", ua);
        *self.last.lock().expect("generator state poisoned") = Some(ua.clone());
        Ok(ua)
    }

    /// The most recently generated user agent, if any
    pub fn last(&self) -> Option<UserAgent> {
        self.last.lock().expect("generator state poisoned").clone()
    }
}

/// Generate a user agent using the caller's random source
pub(crate) fn generate_with_rng(
    rng: &mut StdRng,
    selector: PlatformSelector,
    explicit_version: Option<&str>,
) -> Result<UserAgent> {
    let platform = resolve_platform(rng, selector);

    let version = match explicit_version {
        Some(version) => {
            if !is_version_format(version) {
                return Err(Error::invalid_version(version));
            }
            version.to_string()
        }
        None => {
            let versions = catalog::CHROME_VERSIONS;
            versions[rng.gen_range(0..versions.len())].to_string()
        }
    };

    let clause = catalog::clause_for(platform, &version)
        .ok_or_else(|| Error::configuration(format!("No clause template for {}", platform)))?;

    Ok(UserAgent::new(catalog::compose(clause, &version)))
}

/// Resolve a selector to a concrete platform
fn resolve_platform(rng: &mut StdRng, selector: PlatformSelector) -> Platform {
    match selector {
        PlatformSelector::Windows => Platform::Windows,
        PlatformSelector::Mac => Platform::Mac,
        PlatformSelector::Linux => Platform::Linux,
        PlatformSelector::Random => {
            const CONCRETE: [Platform; 3] = [Platform::Windows, Platform::Mac, Platform::Linux];
            CONCRETE[rng.gen_range(0..CONCRETE.len())]
        }
    }
}

/// Check the `<major>.<minor>.<build>.<patch>` lexical form
fn is_version_format(version: &str) -> bool {
    let parts: Vec<&str> = version.split('.').collect();
    parts.len() == 4
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
}

/// Generate a single user agent for the given selector
pub fn generate_user_agent(selector: PlatformSelector) -> Result<UserAgent> {
    UserAgentGenerator::new(selector).generate(None)
}

/// Generate a Windows Chrome user agent
pub fn windows_user_agent() -> Result<UserAgent> {
    generate_user_agent(PlatformSelector::Windows)
}

/// Generate a macOS Chrome user agent
pub fn mac_user_agent() -> Result<UserAgent> {
    generate_user_agent(PlatformSelector::Mac)
}

/// Generate a Linux Chrome user agent
pub fn linux_user_agent() -> Result<UserAgent> {
    generate_user_agent(PlatformSelector::Linux)
}

/// Generate a user agent for a uniformly drawn platform
pub fn random_user_agent() -> Result<UserAgent> {
    generate_user_agent(PlatformSelector::Random)
}
