//! Mock page binding for testing
//!
//! Tracks the same page state the CDP binding would mutate: registered
//! elements, scroll position, dispatched input events and injected init
//! scripts. Individual capabilities can be told to fail so error paths are
//! testable.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::traits::{PageBinding, Rect};
use crate::{Error, Result};

#[derive(Debug, Clone)]
struct MockElement {
    rect: Rect,
    interactable: bool,
}

#[derive(Debug, Default)]
struct MockState {
    elements: HashMap<String, MockElement>,
    scroll_y: f64,
    doc_height: f64,
    focused: Option<String>,
    chars: Vec<char>,
    backspaces: usize,
    pointer_moves: Vec<(f64, f64)>,
    clicks: Vec<(f64, f64)>,
    scroll_steps: Vec<f64>,
    init_scripts: Vec<String>,
    evaluated: Vec<String>,
    user_agent: Option<String>,
    fail_init_scripts_containing: Option<String>,
}

/// In-memory page binding
#[derive(Debug)]
pub struct MockPage {
    state: Mutex<MockState>,
}

impl MockPage {
    /// Create a mock page with an empty DOM and a 2000px document
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MockState {
                doc_height: 2000.0,
                ..MockState::default()
            }),
        }
    }

    /// Register an element under a selector
    pub fn add_element(&self, selector: &str, rect: Rect, interactable: bool) {
        self.lock().elements.insert(
            selector.to_string(),
            MockElement { rect, interactable },
        );
    }

    /// Set the scrollable document height
    pub fn set_document_height(&self, height: f64) {
        self.lock().doc_height = height;
    }

    /// Set the current scroll position
    pub fn set_scroll_position(&self, y: f64) {
        self.lock().scroll_y = y;
    }

    /// Make `add_init_script` fail for sources containing a marker
    pub fn fail_init_scripts_containing(&self, marker: &str) {
        self.lock().fail_init_scripts_containing = Some(marker.to_string());
    }

    /// Characters sent as synthetic key input, in order
    pub fn typed_chars(&self) -> Vec<char> {
        self.lock().chars.clone()
    }

    /// Number of backspace presses
    pub fn backspace_count(&self) -> usize {
        self.lock().backspaces
    }

    /// Pointer move coordinates, in order
    pub fn pointer_moves(&self) -> Vec<(f64, f64)> {
        self.lock().pointer_moves.clone()
    }

    /// Click coordinates, in order
    pub fn clicks(&self) -> Vec<(f64, f64)> {
        self.lock().clicks.clone()
    }

    /// Individual scroll deltas applied via `scroll_by`
    pub fn scroll_steps(&self) -> Vec<f64> {
        self.lock().scroll_steps.clone()
    }

    /// Injected init script sources, in order
    pub fn init_scripts(&self) -> Vec<String> {
        self.lock().init_scripts.clone()
    }

    /// Scripts passed to `evaluate`, in order
    pub fn evaluated_scripts(&self) -> Vec<String> {
        self.lock().evaluated.clone()
    }

    /// The user agent override, if one was set
    pub fn user_agent(&self) -> Option<String> {
        self.lock().user_agent.clone()
    }

    /// The selector of the currently focused element
    pub fn focused(&self) -> Option<String> {
        self.lock().focused.clone()
    }

    /// Current scroll position, readable synchronously from tests
    pub fn current_scroll(&self) -> f64 {
        self.lock().scroll_y
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().expect("mock page state poisoned")
    }
}

impl Default for MockPage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageBinding for MockPage {
    async fn element_rect(&self, selector: &str) -> Result<Rect> {
        self.lock()
            .elements
            .get(selector)
            .map(|el| el.rect)
            .ok_or_else(|| Error::element_not_found(selector))
    }

    async fn is_interactable(&self, selector: &str) -> Result<bool> {
        self.lock()
            .elements
            .get(selector)
            .map(|el| el.interactable)
            .ok_or_else(|| Error::element_not_found(selector))
    }

    async fn focus(&self, selector: &str) -> Result<()> {
        let mut state = self.lock();
        if !state.elements.contains_key(selector) {
            return Err(Error::element_not_found(selector));
        }
        state.focused = Some(selector.to_string());
        Ok(())
    }

    async fn send_char(&self, ch: char) -> Result<()> {
        self.lock().chars.push(ch);
        Ok(())
    }

    async fn send_backspace(&self) -> Result<()> {
        self.lock().backspaces += 1;
        Ok(())
    }

    async fn dispatch_mouse_move(&self, x: f64, y: f64) -> Result<()> {
        self.lock().pointer_moves.push((x, y));
        Ok(())
    }

    async fn click_at(&self, x: f64, y: f64) -> Result<()> {
        self.lock().clicks.push((x, y));
        Ok(())
    }

    async fn evaluate(&self, script: &str) -> Result<Value> {
        self.lock().evaluated.push(script.to_string());
        Ok(Value::Null)
    }

    async fn scroll_position(&self) -> Result<f64> {
        Ok(self.lock().scroll_y)
    }

    async fn document_height(&self) -> Result<f64> {
        Ok(self.lock().doc_height)
    }

    async fn scroll_by(&self, dy: f64) -> Result<()> {
        let mut state = self.lock();
        let max = state.doc_height;
        state.scroll_y = (state.scroll_y + dy).clamp(0.0, max);
        state.scroll_steps.push(dy);
        Ok(())
    }

    async fn scroll_to(&self, y: f64) -> Result<()> {
        let mut state = self.lock();
        let max = state.doc_height;
        state.scroll_y = y.clamp(0.0, max);
        Ok(())
    }

    async fn add_init_script(&self, source: &str) -> Result<()> {
        let mut state = self.lock();
        if let Some(marker) = &state.fail_init_scripts_containing {
            if source.contains(marker.as_str()) {
                return Err(Error::script_execution_failed(format!(
                    "Injection rejected for script containing '{}'",
                    marker
                )));
            }
        }
        state.init_scripts.push(source.to_string());
        Ok(())
    }

    async fn set_user_agent(&self, user_agent: &str) -> Result<()> {
        self.lock().user_agent = Some(user_agent.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_page_scroll_clamps_to_document() {
        let page = MockPage::new();
        page.set_document_height(1000.0);

        page.scroll_by(1500.0).await.unwrap();
        assert_eq!(page.current_scroll(), 1000.0);

        page.scroll_by(-2500.0).await.unwrap();
        assert_eq!(page.current_scroll(), 0.0);
    }

    #[tokio::test]
    async fn test_mock_page_missing_element() {
        let page = MockPage::new();

        let result = page.element_rect("#missing").await;
        assert!(matches!(result, Err(Error::ElementNotFound(_))));
    }

    #[tokio::test]
    async fn test_mock_page_records_input() {
        let page = MockPage::new();

        page.send_char('a').await.unwrap();
        page.send_backspace().await.unwrap();
        page.click_at(10.0, 20.0).await.unwrap();

        assert_eq!(page.typed_chars(), vec!['a']);
        assert_eq!(page.backspace_count(), 1);
        assert_eq!(page.clicks(), vec![(10.0, 20.0)]);
    }
}
