//! Humanized interaction primitives
//!
//! Every gesture is planned first and executed second: the random draws all
//! happen up front under a short-lived lock, producing a plain action plan
//! that is then replayed against the page with real delays. This keeps the
//! futures Send and makes a seeded humanizer fully reproducible.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use bezier_rs::{Bezier, TValue};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::time::sleep;

use super::keyboard;
use super::options::{ClickOptions, MouseMoveOptions, ScrollOptions, TypingOptions};
use crate::cdp::PageBinding;
use crate::{Error, Result};

/// Scroll direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Down,
    Up,
    /// Jump to the top of the document
    Top,
    /// Jump to the bottom of the document
    Bottom,
}

/// One field in a form-filling sequence
#[derive(Debug, Clone)]
pub enum FormField {
    /// A text input to focus and type into
    Text {
        name: String,
        selector: String,
        value: String,
    },
    /// A button to click, typically the submit control
    Submit { name: String, selector: String },
}

/// Pre-generated keystroke plan entry
#[derive(Debug, Clone, Copy)]
enum KeyAction {
    Char(char),
    Backspace,
    Delay(u64),
}

/// Drives a page binding with human-shaped input
#[derive(Debug)]
pub struct Humanizer {
    page: Arc<dyn PageBinding>,
    rng: Mutex<StdRng>,
    pointer: Mutex<(f64, f64)>,
}

impl Humanizer {
    /// Create a humanizer seeded from entropy, pointer at the origin
    pub fn new(page: Arc<dyn PageBinding>) -> Self {
        Self {
            page,
            rng: Mutex::new(StdRng::from_entropy()),
            pointer: Mutex::new((0.0, 0.0)),
        }
    }

    /// Create a humanizer with a fixed seed, for reproducible gestures
    pub fn with_seed(page: Arc<dyn PageBinding>, seed: u64) -> Self {
        Self {
            page,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            pointer: Mutex::new((0.0, 0.0)),
        }
    }

    /// Type text into an element with variable keystroke timing.
    ///
    /// Word-interior alphabetic characters may be mistyped as an adjacent
    /// QWERTY key, noticed after a beat, erased and retyped. Empty text is a
    /// no-op and never touches the page.
    pub async fn send_keys(
        &self,
        selector: &str,
        text: &str,
        options: &TypingOptions,
    ) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }

        self.page.focus(selector).await?;

        // Pre-generate the keystroke plan to avoid Send issues
        let plan = {
            let mut rng = self.rng.lock().expect("humanizer rng poisoned");
            build_typing_plan(&mut rng, text, options)
        };

        tracing::debug!(
            "Typing {} chars into '{}' ({} actions)",
            text.chars().count(),
            selector,
            plan.len()
        );

        for action in plan {
            match action {
                KeyAction::Char(ch) => self.page.send_char(ch).await?,
                KeyAction::Backspace => self.page.send_backspace().await?,
                KeyAction::Delay(ms) => sleep(Duration::from_millis(ms)).await,
            }
        }

        Ok(())
    }

    /// Move the pointer to an element along a curved path.
    ///
    /// The path is a cubic Bezier from the current pointer position to a
    /// randomly offset point inside the element, with control points pushed
    /// perpendicular to the straight line. Returns the final coordinates.
    pub async fn mouse_move(
        &self,
        selector: &str,
        options: &MouseMoveOptions,
    ) -> Result<(f64, f64)> {
        let rect = self.page.element_rect(selector).await?;
        let (cx, cy) = rect.center();

        let (path, target) = {
            let mut rng = self.rng.lock().expect("humanizer rng poisoned");
            let start = *self.pointer.lock().expect("humanizer pointer poisoned");

            let max = options.max_offset_px.abs();
            let target = (
                cx + rng.gen_range(-max..=max),
                cy + rng.gen_range(-max..=max),
            );

            (sample_curve(&mut rng, start, target, options), target)
        };

        let step_delay = options.duration_ms / options.points.max(1) as u64;
        for (x, y) in path {
            self.page.dispatch_mouse_move(x, y).await?;
            sleep(Duration::from_millis(step_delay)).await;
        }

        *self.pointer.lock().expect("humanizer pointer poisoned") = target;
        Ok(target)
    }

    /// Move to an element and click it.
    ///
    /// Interactability is checked before the pointer moves at all; clicking a
    /// hidden or disabled element fails without any page-visible motion.
    pub async fn click(&self, selector: &str, options: &ClickOptions) -> Result<()> {
        if !self.page.is_interactable(selector).await? {
            return Err(Error::not_interactable(selector));
        }

        let (x, y) = self.mouse_move(selector, &options.movement).await?;

        let pre = self.draw_ms(options.pre_click_min_ms, options.pre_click_max_ms);
        sleep(Duration::from_millis(pre)).await;

        self.page.click_at(x, y).await?;

        let post = self.draw_ms(options.post_click_min_ms, options.post_click_max_ms);
        sleep(Duration::from_millis(post)).await;

        Ok(())
    }

    /// Scroll the page in eased, jittered steps.
    ///
    /// `Down` and `Up` require a positive pixel amount. `Top` and `Bottom`
    /// ignore the amount and finish with an exact jump to the boundary so the
    /// final position never drifts.
    pub async fn scroll(
        &self,
        direction: Direction,
        amount: Option<f64>,
        options: &ScrollOptions,
    ) -> Result<()> {
        match direction {
            Direction::Down | Direction::Up => {
                let amount = amount.ok_or_else(|| {
                    Error::invalid_scroll_amount("Scroll amount required for up/down")
                })?;
                if amount <= 0.0 {
                    return Err(Error::invalid_scroll_amount(format!(
                        "Scroll amount must be positive, got {}",
                        amount
                    )));
                }

                let signed = if direction == Direction::Up {
                    -amount
                } else {
                    amount
                };
                self.stepped_scroll(signed, options).await
            }
            Direction::Top | Direction::Bottom => {
                let target = match direction {
                    Direction::Top => 0.0,
                    _ => self.page.document_height().await?,
                };
                let current = self.page.scroll_position().await?;

                self.stepped_scroll(target - current, options).await?;
                self.page.scroll_to(target).await
            }
        }
    }

    /// Wait a random duration drawn uniformly from `[min_secs, max_secs]`
    pub async fn pause(&self, min_secs: f64, max_secs: f64) -> Result<()> {
        if min_secs < 0.0 || max_secs < 0.0 || min_secs > max_secs {
            return Err(Error::invalid_range(format!(
                "Invalid pause range [{}, {}]",
                min_secs, max_secs
            )));
        }

        let secs = {
            let mut rng = self.rng.lock().expect("humanizer rng poisoned");
            if max_secs > min_secs {
                rng.gen_range(min_secs..=max_secs)
            } else {
                min_secs
            }
        };

        sleep(Duration::from_secs_f64(secs)).await;
        Ok(())
    }

    /// Fill a form field by field, in declaration order.
    ///
    /// Text fields are typed, the submit control is clicked, with a short
    /// pause between fields. The first failing field aborts the sequence;
    /// fields already filled are left as they are.
    pub async fn form_fill(&self, fields: &[FormField]) -> Result<()> {
        for field in fields {
            match field {
                FormField::Text {
                    name,
                    selector,
                    value,
                } => {
                    tracing::debug!("Filling field '{}'", name);
                    self.send_keys(selector, value, &TypingOptions::default())
                        .await?;
                }
                FormField::Submit { name, selector } => {
                    tracing::debug!("Submitting via '{}'", name);
                    self.click(selector, &ClickOptions::default()).await?;
                }
            }

            self.pause(0.2, 0.6).await?;
        }

        Ok(())
    }

    fn draw_ms(&self, min: u64, max: u64) -> u64 {
        let mut rng = self.rng.lock().expect("humanizer rng poisoned");
        if max > min {
            rng.gen_range(min..=max)
        } else {
            min
        }
    }

    async fn stepped_scroll(&self, total: f64, options: &ScrollOptions) -> Result<()> {
        // Pre-generate the step plan to avoid Send issues
        let plan = {
            let mut rng = self.rng.lock().expect("humanizer rng poisoned");
            build_scroll_plan(&mut rng, total, options)
        };

        for (dy, pause_ms) in plan {
            self.page.scroll_by(dy).await?;
            sleep(Duration::from_millis(pause_ms)).await;
        }

        Ok(())
    }
}

/// Expand text into a keystroke plan with delays and simulated typos
fn build_typing_plan(rng: &mut StdRng, text: &str, options: &TypingOptions) -> Vec<KeyAction> {
    let mut plan = Vec::new();
    let words: Vec<&str> = text.split(' ').collect();

    for (wi, word) in words.iter().enumerate() {
        let chars: Vec<char> = word.chars().collect();

        for (ci, &ch) in chars.iter().enumerate() {
            let interior = ci > 0 && ci + 1 < chars.len();
            let typo = options.typo_probability > 0.0
                && interior
                && ch.is_alphabetic()
                && rng.gen_bool(options.typo_probability.min(1.0));

            if typo {
                plan.push(KeyAction::Char(keyboard::nearby_key(ch, rng)));
                plan.push(KeyAction::Delay(keystroke_ms(rng, options)));
                // A beat before the mistake is noticed
                plan.push(KeyAction::Delay(rng.gen_range(100..=300)));
                plan.push(KeyAction::Backspace);
                plan.push(KeyAction::Delay(rng.gen_range(50..=100)));
            }

            plan.push(KeyAction::Char(ch));
            plan.push(KeyAction::Delay(keystroke_ms(rng, options)));
        }

        if wi + 1 < words.len() {
            plan.push(KeyAction::Char(' '));
            plan.push(KeyAction::Delay(word_delay_ms(rng, options)));
        }
    }

    plan
}

fn keystroke_ms(rng: &mut StdRng, options: &TypingOptions) -> u64 {
    if options.speed_max_ms > options.speed_min_ms {
        rng.gen_range(options.speed_min_ms..=options.speed_max_ms)
    } else {
        options.speed_min_ms
    }
}

fn word_delay_ms(rng: &mut StdRng, options: &TypingOptions) -> u64 {
    if options.word_delay_max_ms > options.word_delay_min_ms {
        rng.gen_range(options.word_delay_min_ms..=options.word_delay_max_ms)
    } else {
        options.word_delay_min_ms
    }
}

/// Sample a curved pointer path from `start` to `target`
fn sample_curve(
    rng: &mut StdRng,
    start: (f64, f64),
    target: (f64, f64),
    options: &MouseMoveOptions,
) -> Vec<(f64, f64)> {
    let dx = target.0 - start.0;
    let dy = target.1 - start.1;
    let length = (dx * dx + dy * dy).sqrt();

    // Degenerate path, jump straight to the target
    if length < f64::EPSILON {
        return vec![target];
    }

    let (px, py) = (-dy / length, dx / length);
    let deviation = options.deviation.abs();
    let d1 = rng.gen_range(-deviation..=deviation);
    let d2 = rng.gen_range(-deviation..=deviation);

    let curve = Bezier::from_cubic_coordinates(
        start.0,
        start.1,
        start.0 + dx * 0.25 + px * d1,
        start.1 + dy * 0.25 + py * d1,
        start.0 + dx * 0.75 + px * d2,
        start.1 + dy * 0.75 + py * d2,
        target.0,
        target.1,
    );

    let points = options.points.max(1);
    (1..=points)
        .map(|i| {
            let t = i as f64 / points as f64;
            let p = curve.evaluate(TValue::Euclidean(t));
            (p.x, p.y)
        })
        .collect()
}

/// Break a scroll distance into eased, jittered step deltas with pauses
fn build_scroll_plan(rng: &mut StdRng, total: f64, options: &ScrollOptions) -> Vec<(f64, u64)> {
    let steps = if options.steps_max > options.steps_min {
        rng.gen_range(options.steps_min..=options.steps_max)
    } else {
        options.steps_min
    }
    .max(1);

    let jitter = options.jitter.abs();
    let mut plan = Vec::with_capacity(steps);
    let mut previous = 0.0;

    for i in 1..=steps {
        let t = i as f64 / steps as f64;
        let eased = ease_in_out(t);
        let fraction = eased - previous;
        previous = eased;

        let multiplier = if jitter > 0.0 {
            1.0 + rng.gen_range(-jitter..=jitter)
        } else {
            1.0
        };

        let pause = if options.pause_max_ms > options.pause_min_ms {
            rng.gen_range(options.pause_min_ms..=options.pause_max_ms)
        } else {
            options.pause_min_ms
        };

        plan.push((total * fraction * multiplier, pause));
    }

    plan
}

/// Quadratic ease-in-out over `[0, 1]`
fn ease_in_out(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - 2.0 * (1.0 - t) * (1.0 - t)
    }
}
