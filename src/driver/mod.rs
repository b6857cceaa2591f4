//! High-level page driver
//!
//! Wraps a page binding behind one facade that routes every interaction
//! through the humanizer when human behavior is enabled, or through direct
//! script dispatch when it is not. Configuration decides the routing once at
//! construction; callers use the same methods either way.

use std::sync::Arc;

use serde_json::Value;

use crate::cdp::{escape_js_str, PageBinding};
use crate::config::Config;
use crate::humanize::{ClickOptions, Direction, FormField, Humanizer, ScrollOptions, TypingOptions};
use crate::Result;

/// Configured page driver
#[derive(Debug)]
pub struct OpaquePage {
    page: Arc<dyn PageBinding>,
    humanizer: Humanizer,
    use_human_behavior: bool,
    auto_pause: bool,
    pause_range: (f64, f64),
}

impl OpaquePage {
    /// Wrap a page binding according to the configuration
    pub fn new(page: Arc<dyn PageBinding>, config: &Config) -> Self {
        Self {
            humanizer: Humanizer::new(page.clone()),
            page,
            use_human_behavior: config.use_human_behavior,
            auto_pause: config.auto_pause,
            pause_range: (config.pause_min_secs, config.pause_max_secs),
        }
    }

    /// Wrap a page binding with a seeded humanizer, for reproducible runs
    pub fn with_seed(page: Arc<dyn PageBinding>, config: &Config, seed: u64) -> Self {
        Self {
            humanizer: Humanizer::with_seed(page.clone(), seed),
            page,
            use_human_behavior: config.use_human_behavior,
            auto_pause: config.auto_pause,
            pause_range: (config.pause_min_secs, config.pause_max_secs),
        }
    }

    /// The underlying page binding
    pub fn page(&self) -> &Arc<dyn PageBinding> {
        &self.page
    }

    /// The humanizer driving this page
    pub fn humanizer(&self) -> &Humanizer {
        &self.humanizer
    }

    /// Click an element
    pub async fn click(&self, selector: &str) -> Result<()> {
        if self.use_human_behavior {
            self.humanizer
                .click(selector, &ClickOptions::default())
                .await?;
        } else {
            let script = format!(
                "document.querySelector('{}').click();",
                escape_js_str(selector)
            );
            self.page.evaluate(&script).await?;
        }

        self.auto_pause_if_enabled().await
    }

    /// Type text into an element
    pub async fn type_text(&self, selector: &str, text: &str) -> Result<()> {
        if self.use_human_behavior {
            self.humanizer
                .send_keys(selector, text, &TypingOptions::default())
                .await?;
        } else {
            let script = format!(
                r#"(() => {{
                    const el = document.querySelector('{}');
                    el.value = '{}';
                    el.dispatchEvent(new Event('input', {{ bubbles: true }}));
                    el.dispatchEvent(new Event('change', {{ bubbles: true }}));
                }})()"#,
                escape_js_str(selector),
                escape_js_str(text)
            );
            self.page.evaluate(&script).await?;
        }

        self.auto_pause_if_enabled().await
    }

    /// Clear an element's value
    pub async fn clear(&self, selector: &str) -> Result<()> {
        let script = format!(
            r#"(() => {{
                const el = document.querySelector('{}');
                el.value = '';
                el.dispatchEvent(new Event('input', {{ bubbles: true }}));
                el.dispatchEvent(new Event('change', {{ bubbles: true }}));
            }})()"#,
            escape_js_str(selector)
        );
        self.page.evaluate(&script).await?;

        self.auto_pause_if_enabled().await
    }

    /// Scroll the page
    pub async fn scroll(&self, direction: Direction, amount: Option<f64>) -> Result<()> {
        if self.use_human_behavior {
            self.humanizer
                .scroll(direction, amount, &ScrollOptions::default())
                .await?;
        } else {
            match direction {
                Direction::Down => {
                    let dy = amount.unwrap_or(500.0);
                    self.page.scroll_by(dy).await?;
                }
                Direction::Up => {
                    let dy = amount.unwrap_or(500.0);
                    self.page.scroll_by(-dy).await?;
                }
                Direction::Top => self.page.scroll_to(0.0).await?,
                Direction::Bottom => {
                    let height = self.page.document_height().await?;
                    self.page.scroll_to(height).await?;
                }
            }
        }

        self.auto_pause_if_enabled().await
    }

    /// Evaluate a script in the page context
    pub async fn execute_script(&self, script: &str) -> Result<Value> {
        self.page.evaluate(script).await
    }

    /// Fill a form field by field.
    ///
    /// Both routes already pause per field (the humanizer between fields, the
    /// fallback inside each `type_text`/`click`), so no extra pause is added
    /// at the end.
    pub async fn fill_form(&self, fields: &[FormField]) -> Result<()> {
        if self.use_human_behavior {
            self.humanizer.form_fill(fields).await
        } else {
            for field in fields {
                match field {
                    FormField::Text {
                        selector, value, ..
                    } => self.type_text(selector, value).await?,
                    FormField::Submit { selector, .. } => self.click(selector).await?,
                }
            }
            Ok(())
        }
    }

    async fn auto_pause_if_enabled(&self) -> Result<()> {
        if self.auto_pause {
            let (min, max) = self.pause_range;
            self.humanizer.pause(min, max).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cdp::{MockPage, Rect};

    fn quiet_config(human: bool) -> Config {
        Config {
            use_human_behavior: human,
            auto_pause: false,
            ..Config::default()
        }
    }

    fn mock_with_button() -> Arc<MockPage> {
        let page = Arc::new(MockPage::new());
        page.add_element(
            "#btn",
            Rect {
                x: 0.0,
                y: 0.0,
                width: 40.0,
                height: 20.0,
            },
            true,
        );
        page
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_routes_through_humanizer() {
        let page = mock_with_button();
        let driver = OpaquePage::with_seed(page.clone(), &quiet_config(true), 42);

        driver.click("#btn").await.unwrap();

        assert_eq!(page.clicks().len(), 1);
        assert!(page.evaluated_scripts().is_empty());
    }

    #[tokio::test]
    async fn test_click_falls_back_to_script_dispatch() {
        let page = mock_with_button();
        let driver = OpaquePage::with_seed(page.clone(), &quiet_config(false), 42);

        driver.click("#btn").await.unwrap();

        assert!(page.clicks().is_empty());
        assert_eq!(page.evaluated_scripts().len(), 1);
        assert!(page.evaluated_scripts()[0].contains(".click()"));
    }

    #[tokio::test]
    async fn test_type_text_fallback_sets_value_and_fires_events() {
        let page = mock_with_button();
        let driver = OpaquePage::with_seed(page.clone(), &quiet_config(false), 42);

        driver.type_text("#btn", "it's done").await.unwrap();

        let script = &page.evaluated_scripts()[0];
        assert!(script.contains(r"it\'s done"));
        assert!(script.contains("new Event('input'"));
        assert!(page.typed_chars().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fill_form_pauses_once_per_field() {
        let page = mock_with_button();
        page.add_element(
            "#name",
            Rect {
                x: 0.0,
                y: 0.0,
                width: 40.0,
                height: 20.0,
            },
            true,
        );
        let config = Config {
            use_human_behavior: false,
            auto_pause: true,
            pause_min_secs: 1.0,
            pause_max_secs: 1.0,
            ..Config::default()
        };
        let driver = OpaquePage::with_seed(page.clone(), &config, 42);

        let fields = vec![
            FormField::Text {
                name: "name".to_string(),
                selector: "#name".to_string(),
                value: "ada".to_string(),
            },
            FormField::Submit {
                name: "go".to_string(),
                selector: "#btn".to_string(),
            },
        ];

        let before = tokio::time::Instant::now();
        driver.fill_form(&fields).await.unwrap();

        // One auto-pause per field action and nothing extra at the end
        assert_eq!(before.elapsed(), std::time::Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_scroll_fallback_jumps_directly() {
        let page = mock_with_button();
        page.set_document_height(5000.0);
        let driver = OpaquePage::with_seed(page.clone(), &quiet_config(false), 42);

        driver.scroll(Direction::Bottom, None).await.unwrap();

        assert_eq!(page.current_scroll(), 5000.0);
        assert!(page.scroll_steps().is_empty());
    }
}
