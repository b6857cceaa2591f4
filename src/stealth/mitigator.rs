//! Fingerprint mitigator
//!
//! Applies the patch set to one new browser context. A single patch that the
//! scripting surface rejects is logged and skipped; the remaining patches are
//! still applied and session setup continues. No patch is ever retried.

use crate::cdp::PageBinding;
use crate::identity::{parser, ParsedUserAgent, UserAgent};
use crate::Result;

use super::patches::{self, ScriptPatch};

/// Outcome of one mitigation pass
#[derive(Debug, Clone)]
pub struct AppliedPatches {
    /// Names of patches that landed
    pub applied: Vec<&'static str>,
    /// Names of patches whose injection was rejected
    pub skipped: Vec<&'static str>,
}

/// Per-session fingerprint mitigator
#[derive(Debug)]
pub struct FingerprintMitigator {
    user_agent: UserAgent,
    identity: ParsedUserAgent,
}

impl FingerprintMitigator {
    /// Create a mitigator for the session's spoofed user agent.
    ///
    /// The agent is parsed once up front so the userAgentData patch can be
    /// kept consistent with it; an unparsable agent fails here.
    pub fn new(user_agent: &UserAgent) -> Result<Self> {
        let identity = parser::parse(user_agent.as_str())?;
        Ok(Self {
            user_agent: user_agent.clone(),
            identity,
        })
    }

    /// Flags the external session constructor must add at browser launch
    pub fn launch_flags(&self) -> &'static [&'static str] {
        patches::LAUNCH_FLAGS
    }

    /// Default switches the launcher must exclude
    pub fn excluded_switches(&self) -> &'static [&'static str] {
        patches::EXCLUDED_SWITCHES
    }

    /// The ordered script patch set for this session
    pub fn script_patches(&self) -> Vec<ScriptPatch> {
        patches::script_patches(&self.identity)
    }

    /// Apply all script patches to a freshly created context.
    ///
    /// Must run immediately after context creation and before any navigation.
    /// Each patch is attempted exactly once; failures are logged and skipped
    /// so one broken patch never aborts session setup.
    pub async fn apply(&self, page: &dyn PageBinding) -> AppliedPatches {
        let mut applied = Vec::new();
        let mut skipped = Vec::new();

        match page.set_user_agent(self.user_agent.as_str()).await {
            Ok(()) => applied.push("user_agent"),
            Err(e) => {
                tracing::warn!("User agent override failed, continuing: {}", e);
                skipped.push("user_agent");
            }
        }

        for patch in self.script_patches() {
            match page.add_init_script(&patch.source).await {
                Ok(()) => applied.push(patch.name),
                Err(e) => {
                    tracing::warn!("Mitigation patch '{}' failed, skipping: {}", patch.name, e);
                    skipped.push(patch.name);
                }
            }
        }

        tracing::info!(
            "Fingerprint mitigation applied: {} patches, {} skipped",
            applied.len(),
            skipped.len()
        );

        AppliedPatches { applied, skipped }
    }
}
