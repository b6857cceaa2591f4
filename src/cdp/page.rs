//! CDP-backed page binding
//!
//! Translates each binding capability to raw Chrome DevTools Protocol calls
//! through a `CdpClient`.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::traits::{CdpClient, PageBinding, Rect};
use crate::{Error, Result};

/// Escape a string for safe embedding in single-quoted JavaScript
pub fn escape_js_str(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('"', r#"\""#)
}

/// Page binding over a live CDP connection
#[derive(Debug)]
pub struct CdpPage {
    client: Arc<dyn CdpClient>,
}

impl CdpPage {
    /// Create a page binding over a CDP client
    pub fn new(client: Arc<dyn CdpClient>) -> Self {
        Self { client }
    }

    /// Evaluate an expression and return its `returnByValue` result
    async fn evaluate_value(&self, expression: &str) -> Result<Value> {
        let params = json!({
            "expression": expression,
            "awaitPromise": true,
            "returnByValue": true
        });

        let result = self.client.call_method("Runtime.evaluate", params).await?;

        result
            .get("result")
            .and_then(|r| r.get("value"))
            .cloned()
            .ok_or_else(|| Error::script_execution_failed("No result value"))
    }

    /// Evaluate an expression expected to yield a number
    async fn evaluate_f64(&self, expression: &str) -> Result<f64> {
        self.evaluate_value(expression)
            .await?
            .as_f64()
            .ok_or_else(|| {
                Error::script_execution_failed(format!("Non-numeric result for: {}", expression))
            })
    }

    async fn dispatch_key(&self, event_type: &str, key: &str, text: Option<&str>) -> Result<()> {
        let mut params = json!({ "type": event_type, "key": key });
        if let Some(text) = text {
            params["text"] = json!(text);
        }
        self.client
            .call_method("Input.dispatchKeyEvent", params)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl PageBinding for CdpPage {
    async fn element_rect(&self, selector: &str) -> Result<Rect> {
        let expression = format!(
            r#"(() => {{
                const el = document.querySelector('{}');
                if (!el) return null;
                const r = el.getBoundingClientRect();
                return {{ x: r.x, y: r.y, width: r.width, height: r.height }};
            }})()"#,
            escape_js_str(selector)
        );

        let value = self.evaluate_value(&expression).await?;
        if value.is_null() {
            return Err(Error::element_not_found(selector));
        }

        let field = |name: &str| -> Result<f64> {
            value
                .get(name)
                .and_then(|v| v.as_f64())
                .ok_or_else(|| Error::script_execution_failed("Malformed element rect"))
        };

        Ok(Rect {
            x: field("x")?,
            y: field("y")?,
            width: field("width")?,
            height: field("height")?,
        })
    }

    async fn is_interactable(&self, selector: &str) -> Result<bool> {
        let expression = format!(
            r#"(() => {{
                const el = document.querySelector('{}');
                if (!el) return null;
                const style = window.getComputedStyle(el);
                const visible = el.getClientRects().length > 0
                    && style.visibility !== 'hidden'
                    && style.display !== 'none';
                return visible && !el.disabled;
            }})()"#,
            escape_js_str(selector)
        );

        let value = self.evaluate_value(&expression).await?;
        match value {
            Value::Null => Err(Error::element_not_found(selector)),
            Value::Bool(b) => Ok(b),
            other => Err(Error::script_execution_failed(format!(
                "Unexpected interactability result: {}",
                other
            ))),
        }
    }

    async fn focus(&self, selector: &str) -> Result<()> {
        let expression = format!(
            r#"(() => {{
                const el = document.querySelector('{}');
                if (!el) return false;
                el.focus();
                return true;
            }})()"#,
            escape_js_str(selector)
        );

        match self.evaluate_value(&expression).await? {
            Value::Bool(true) => Ok(()),
            _ => Err(Error::element_not_found(selector)),
        }
    }

    async fn send_char(&self, ch: char) -> Result<()> {
        let key = ch.to_string();
        self.dispatch_key("keyDown", &key, Some(&key)).await?;
        self.dispatch_key("keyUp", &key, None).await
    }

    async fn send_backspace(&self) -> Result<()> {
        self.dispatch_key("keyDown", "Backspace", None).await?;
        self.dispatch_key("keyUp", "Backspace", None).await
    }

    async fn dispatch_mouse_move(&self, x: f64, y: f64) -> Result<()> {
        let params = json!({ "type": "mouseMoved", "x": x, "y": y });
        self.client
            .call_method("Input.dispatchMouseEvent", params)
            .await?;
        Ok(())
    }

    async fn click_at(&self, x: f64, y: f64) -> Result<()> {
        for event_type in ["mousePressed", "mouseReleased"] {
            let params = json!({
                "type": event_type,
                "x": x,
                "y": y,
                "button": "left",
                "clickCount": 1
            });
            self.client
                .call_method("Input.dispatchMouseEvent", params)
                .await?;
        }
        Ok(())
    }

    async fn evaluate(&self, script: &str) -> Result<Value> {
        self.evaluate_value(script).await
    }

    async fn scroll_position(&self) -> Result<f64> {
        self.evaluate_f64("window.pageYOffset").await
    }

    async fn document_height(&self) -> Result<f64> {
        self.evaluate_f64("document.body.scrollHeight").await
    }

    async fn scroll_by(&self, dy: f64) -> Result<()> {
        self.evaluate_value(&format!("window.scrollBy(0, {});", dy))
            .await?;
        Ok(())
    }

    async fn scroll_to(&self, y: f64) -> Result<()> {
        self.evaluate_value(&format!("window.scrollTo(0, {});", y))
            .await?;
        Ok(())
    }

    async fn add_init_script(&self, source: &str) -> Result<()> {
        let params = json!({ "source": source });
        self.client
            .call_method("Page.addScriptToEvaluateOnNewDocument", params)
            .await?;

        // Also evaluate for the current document; non-critical if it fails
        let eval_params = json!({ "expression": source, "awaitPromise": true });
        if let Err(e) = self.client.call_method("Runtime.evaluate", eval_params).await {
            tracing::warn!("Immediate evaluation of init script failed: {}", e);
        }

        Ok(())
    }

    async fn set_user_agent(&self, user_agent: &str) -> Result<()> {
        self.client
            .call_method("Network.enable", json!({}))
            .await?;
        self.client
            .call_method(
                "Network.setUserAgentOverride",
                json!({ "userAgent": user_agent }),
            )
            .await?;
        Ok(())
    }
}
