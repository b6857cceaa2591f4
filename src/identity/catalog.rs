//! User agent template catalog
//!
//! Pure data: the platform clauses and engine versions a generated user agent
//! may be assembled from, plus the composition function that produces the
//! final string. Versions are an ordered list of known-good stable releases;
//! nothing outside this list is ever invented unless a caller overrides the
//! version explicitly.

use super::Platform;

/// Windows platform clauses
pub const WINDOWS_PLATFORM_CLAUSES: &[&str] = &[
    "Windows NT 10.0; Win64; x64",
    "Windows NT 11.0; Win64; x64",
];

/// macOS platform clauses
pub const MAC_PLATFORM_CLAUSES: &[&str] = &[
    "Macintosh; Intel Mac OS X 10_15_7",
    "Macintosh; Intel Mac OS X 11_6_0",
    "Macintosh; Intel Mac OS X 12_0_0",
    "Macintosh; Intel Mac OS X 13_0_0",
    "Macintosh; Intel Mac OS X 14_0_0",
];

/// Linux platform clauses
pub const LINUX_PLATFORM_CLAUSES: &[&str] = &[
    "X11; Linux x86_64",
    "X11; Ubuntu; Linux x86_64",
];

/// Known-good Chrome versions (recent stable releases, ordered)
pub const CHROME_VERSIONS: &[&str] = &[
    "119.0.0.0",
    "120.0.0.0",
    "121.0.0.0",
    "122.0.0.0",
];

/// WebKit version token
pub const WEBKIT_VERSION: &str = "537.36";

/// Safari version token
pub const SAFARI_VERSION: &str = "537.36";

/// All platform clauses for a platform
pub fn platform_clauses(platform: Platform) -> &'static [&'static str] {
    match platform {
        Platform::Windows => WINDOWS_PLATFORM_CLAUSES,
        Platform::Mac => MAC_PLATFORM_CLAUSES,
        Platform::Linux => LINUX_PLATFORM_CLAUSES,
        Platform::Unknown => &[],
    }
}

/// The clause used for a generated agent.
///
/// Generation must be deterministic given platform and version, so instead
/// of a random draw the version string indexes into the platform's clause
/// list. Every catalog entry stays reachable across versions.
pub fn clause_for(platform: Platform, version: &str) -> Option<&'static str> {
    let clauses = platform_clauses(platform);
    if clauses.is_empty() {
        return None;
    }

    let digest: usize = version.bytes().map(usize::from).sum();
    Some(clauses[digest % clauses.len()])
}

/// Assemble the final user agent string from its components
pub fn compose(platform_clause: &str, chrome_version: &str) -> String {
    format!(
        "Mozilla/5.0 ({}) AppleWebKit/{} (KHTML, like Gecko) Chrome/{} Safari/{}",
        platform_clause, WEBKIT_VERSION, chrome_version, SAFARI_VERSION
    )
}
