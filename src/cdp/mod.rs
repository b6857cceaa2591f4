//! Browser binding layer
//!
//! Defines the capability set the stealth core needs from a live browser
//! page: element geometry, synthetic input primitives, script evaluation,
//! scroll state and pre-navigation script registration. The production
//! implementation speaks Chrome DevTools Protocol; the mock tracks the same
//! state in memory for tests.

pub mod mock;
pub mod page;
pub mod traits;

pub use mock::MockPage;
pub use page::{escape_js_str, CdpPage};
pub use traits::{CdpClient, PageBinding, Rect};
