//! User agent parser
//!
//! Extracts structured fields from an arbitrary user agent string. The
//! parser is independent of the generator: it must also handle externally
//! supplied strings that are only partially conformant, so an unrecognized
//! platform clause classifies as `Platform::Unknown` instead of failing.

use super::Platform;
use crate::{Error, Result};

/// Fields extracted from a user agent string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUserAgent {
    /// Engine name, e.g. "Chrome"
    pub browser: String,
    /// Engine version, e.g. "120.0.0.0"
    pub version: String,
    /// Classified platform
    pub platform: Platform,
    /// The raw parenthesized platform clause
    pub os: String,
}

/// Parse a user agent string into its components.
///
/// The minimum recognizable structure is a parenthesized platform clause and
/// a `Chrome/<version>` component pair; anything less fails with
/// `UnparsableIdentity`.
pub fn parse(user_agent: &str) -> Result<ParsedUserAgent> {
    let open = user_agent
        .find('(')
        .ok_or_else(|| Error::unparsable(user_agent))?;
    let close = user_agent[open..]
        .find(')')
        .map(|i| open + i)
        .ok_or_else(|| Error::unparsable(user_agent))?;
    let clause = user_agent[open + 1..close].trim().to_string();

    let version = component_version(user_agent, "Chrome/")
        .ok_or_else(|| Error::unparsable(user_agent))?;

    Ok(ParsedUserAgent {
        browser: "Chrome".to_string(),
        version,
        platform: classify_platform(&clause),
        os: clause,
    })
}

/// Structural validity check; never fails, any parse error becomes `false`
pub fn is_valid(user_agent: &str) -> bool {
    parse(user_agent).is_ok()
}

/// Extract the version of a `Name/Version` component pair
fn component_version(user_agent: &str, prefix: &str) -> Option<String> {
    let start = user_agent.find(prefix)? + prefix.len();
    let rest = &user_agent[start..];
    let version: &str = rest.split_whitespace().next()?;
    if version.is_empty() {
        None
    } else {
        Some(version.to_string())
    }
}

/// Map the parenthesized clause's known substrings to a platform
fn classify_platform(clause: &str) -> Platform {
    if clause.contains("Windows") {
        Platform::Windows
    } else if clause.contains("Macintosh") || clause.contains("Mac OS X") {
        Platform::Mac
    } else if clause.contains("X11") || clause.contains("Linux") {
        Platform::Linux
    } else {
        Platform::Unknown
    }
}
