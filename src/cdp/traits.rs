//! Browser binding traits
//!
//! Abstract interfaces over the page/element primitives the humanizer and
//! the fingerprint mitigator drive.

use async_trait::async_trait;
use serde_json::Value;

use crate::Result;

/// Element geometry in page coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Geometric center of the rectangle
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Low-level CDP client
///
/// The single raw entry point a CDP transport has to provide.
#[async_trait]
pub trait CdpClient: Send + Sync + std::fmt::Debug {
    /// Call a raw CDP method (returns JSON Value)
    async fn call_method(&self, method: &str, params: Value) -> Result<Value>;
}

/// One live browser page, reduced to the primitives this crate needs.
///
/// Every injected script must be registered via `add_init_script` before the
/// page navigates anywhere, otherwise page scripts that run on load win the
/// race against the patched state.
#[async_trait]
pub trait PageBinding: Send + Sync + std::fmt::Debug {
    /// Bounding rectangle of the element matching a CSS selector
    async fn element_rect(&self, selector: &str) -> Result<Rect>;

    /// Whether the element is visible and enabled
    async fn is_interactable(&self, selector: &str) -> Result<bool>;

    /// Focus the element
    async fn focus(&self, selector: &str) -> Result<()>;

    /// Send a single character as synthetic key input to the focused element
    async fn send_char(&self, ch: char) -> Result<()>;

    /// Send one backspace key press
    async fn send_backspace(&self) -> Result<()>;

    /// Move the pointer to page coordinates
    async fn dispatch_mouse_move(&self, x: f64, y: f64) -> Result<()>;

    /// Primitive left click at page coordinates
    async fn click_at(&self, x: f64, y: f64) -> Result<()>;

    /// Evaluate a script in the page and read its return value
    async fn evaluate(&self, script: &str) -> Result<Value>;

    /// Current vertical scroll position
    async fn scroll_position(&self) -> Result<f64>;

    /// Total scrollable document height
    async fn document_height(&self) -> Result<f64>;

    /// Scroll by a vertical pixel delta
    async fn scroll_by(&self, dy: f64) -> Result<()>;

    /// Scroll to an absolute vertical position
    async fn scroll_to(&self, y: f64) -> Result<()>;

    /// Register a script evaluated on every new document, before page load
    async fn add_init_script(&self, source: &str) -> Result<()>;

    /// Override the user agent the page presents
    async fn set_user_agent(&self, user_agent: &str) -> Result<()>;
}
