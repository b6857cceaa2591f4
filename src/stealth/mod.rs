//! Fingerprint mitigation layer
//!
//! A fixed, ordered set of runtime patches applied once per freshly created
//! browser context: launch flags that keep the automation channel out of the
//! browser's own metadata, and early-injected scripts that override each
//! detectable surface to the value a human-driven browser would show. All
//! script patches must land before the first navigation.
//!
//! ## Module structure
//! - `patches`: static patch data and script builders
//! - `mitigator`: per-session application with skip-on-failure semantics

pub mod mitigator;
pub mod patches;

#[cfg(test)]
mod tests;

pub use mitigator::{AppliedPatches, FingerprintMitigator};
pub use patches::{ScriptPatch, EXCLUDED_SWITCHES, LAUNCH_FLAGS};
