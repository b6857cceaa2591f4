//! Mitigation patch data
//!
//! Mostly static data: the browser launch flags and the init-script sources
//! that suppress automation markers. Each script patch is independent of the
//! others and safe to apply once per context.

use crate::identity::{ParsedUserAgent, Platform};

/// Launch flags suppressing automation-indicating browser metadata
pub const LAUNCH_FLAGS: &[&str] = &[
    "--disable-blink-features=AutomationControlled",
    "--disable-infobars",
    "--disable-extensions",
    "--no-sandbox",
    "--disable-dev-shm-usage",
];

/// Command-line switches the launcher must strip from the default set
pub const EXCLUDED_SWITCHES: &[&str] = &["enable-automation"];

/// WebGL vendor reported for hardware-fingerprint queries
pub const WEBGL_VENDOR: &str = "Google Inc. (Intel)";

/// WebGL renderer reported for hardware-fingerprint queries
pub const WEBGL_RENDERER: &str = "ANGLE (Intel(R) UHD Graphics 630 Direct3D11 vs_5_0 ps_5_0)";

/// One early-injected script patch
#[derive(Debug, Clone)]
pub struct ScriptPatch {
    /// Stable name, used in logs and applied/skipped reporting
    pub name: &'static str,
    /// JavaScript source injected before page load
    pub source: String,
}

/// Build the full ordered script patch set for a session identity.
///
/// The userAgentData patch is derived from the parsed identity so the
/// structured brand list stays consistent with the spoofed string.
pub fn script_patches(identity: &ParsedUserAgent) -> Vec<ScriptPatch> {
    vec![
        ScriptPatch {
            name: "webdriver",
            source: r#"(function() {
                Object.defineProperty(navigator, 'webdriver', { get: () => undefined });
            })();"#
                .to_string(),
        },
        ScriptPatch {
            name: "chrome_runtime",
            source: r#"(function() {
                if (!window.chrome) { window.chrome = {}; }
                if (!window.chrome.runtime) { window.chrome.runtime = {}; }
            })();"#
                .to_string(),
        },
        ScriptPatch {
            name: "permissions",
            source: r#"(function() {
                const originalQuery = window.navigator.permissions.query.bind(window.navigator.permissions);
                window.navigator.permissions.query = (parameters) => (
                    parameters.name === 'notifications'
                        ? Promise.resolve({ state: Notification.permission })
                        : originalQuery(parameters)
                );
            })();"#
                .to_string(),
        },
        ScriptPatch {
            name: "plugins",
            source: r#"(function() {
                Object.defineProperty(navigator, 'plugins', { get: () => [
                    {
                        0: { type: "application/x-google-chrome-pdf", suffixes: "pdf", description: "Portable Document Format" },
                        description: "Portable Document Format",
                        filename: "internal-pdf-viewer",
                        length: 1,
                        name: "Chrome PDF Plugin"
                    },
                    {
                        0: { type: "application/pdf", suffixes: "pdf", description: "" },
                        description: "",
                        filename: "mhjfbmdgcfjbbpaeojofohoefgiehjai",
                        length: 1,
                        name: "Chrome PDF Viewer"
                    }
                ]});
            })();"#
                .to_string(),
        },
        ScriptPatch {
            name: "languages",
            source: r#"(function() {
                Object.defineProperty(navigator, 'languages', { get: () => ['en-US', 'en'] });
            })();"#
                .to_string(),
        },
        ScriptPatch {
            name: "webgl",
            source: format!(
                r#"(function() {{
                    const getParameter = WebGLRenderingContext.prototype.getParameter;
                    WebGLRenderingContext.prototype.getParameter = function(parameter) {{
                        if (parameter === 37445) return '{}';
                        if (parameter === 37446) return '{}';
                        return getParameter.call(this, parameter);
                    }};
                }})();"#,
                WEBGL_VENDOR, WEBGL_RENDERER
            ),
        },
        ScriptPatch {
            name: "user_agent_data",
            source: user_agent_data_script(identity),
        },
    ]
}

fn user_agent_data_script(identity: &ParsedUserAgent) -> String {
    let major = identity.version.split('.').next().unwrap_or("120");
    let platform = match identity.platform {
        Platform::Windows => "Windows",
        Platform::Mac => "macOS",
        Platform::Linux => "Linux",
        Platform::Unknown => "Windows",
    };

    format!(
        r#"(function() {{
            Object.defineProperty(navigator, 'userAgentData', {{ get: () => ({{
                brands: [
                    {{ brand: 'Chromium', version: '{major}' }},
                    {{ brand: 'Google Chrome', version: '{major}' }},
                    {{ brand: 'Not=A?Brand', version: '8' }}
                ],
                mobile: false,
                platform: '{platform}'
            }}) }});
        }})();"#
    )
}
