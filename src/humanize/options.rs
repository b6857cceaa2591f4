//! Tuning knobs for humanized interaction
//!
//! Each option struct carries the timing and variance bounds for one gesture
//! family. Defaults match believable human ranges and are safe to use as-is.

/// Typing cadence and typo behavior
#[derive(Debug, Clone)]
pub struct TypingOptions {
    /// Minimum per-keystroke delay in milliseconds
    pub speed_min_ms: u64,
    /// Maximum per-keystroke delay in milliseconds
    pub speed_max_ms: u64,
    /// Minimum pause after a word boundary in milliseconds
    pub word_delay_min_ms: u64,
    /// Maximum pause after a word boundary in milliseconds
    pub word_delay_max_ms: u64,
    /// Per-character chance of a simulated typo, 0.0 disables typos
    pub typo_probability: f64,
}

impl Default for TypingOptions {
    fn default() -> Self {
        Self {
            speed_min_ms: 50,
            speed_max_ms: 150,
            word_delay_min_ms: 100,
            word_delay_max_ms: 300,
            typo_probability: 0.02,
        }
    }
}

/// Curved pointer movement shape and pacing
#[derive(Debug, Clone)]
pub struct MouseMoveOptions {
    /// Total movement duration in milliseconds
    pub duration_ms: u64,
    /// Maximum perpendicular control-point deviation in pixels
    pub deviation: f64,
    /// Number of sampled points along the path
    pub points: usize,
    /// Maximum random offset from the target center, per axis, in pixels
    pub max_offset_px: f64,
}

impl Default for MouseMoveOptions {
    fn default() -> Self {
        Self {
            duration_ms: 350,
            deviation: 50.0,
            points: 20,
            max_offset_px: 5.0,
        }
    }
}

/// Click timing around the pointer movement
#[derive(Debug, Clone)]
pub struct ClickOptions {
    /// Pointer movement toward the target
    pub movement: MouseMoveOptions,
    /// Hesitation before pressing, in milliseconds
    pub pre_click_min_ms: u64,
    pub pre_click_max_ms: u64,
    /// Settling delay after release, in milliseconds
    pub post_click_min_ms: u64,
    pub post_click_max_ms: u64,
}

impl Default for ClickOptions {
    fn default() -> Self {
        Self {
            movement: MouseMoveOptions::default(),
            pre_click_min_ms: 100,
            pre_click_max_ms: 500,
            post_click_min_ms: 50,
            post_click_max_ms: 150,
        }
    }
}

/// Stepped scroll pacing
#[derive(Debug, Clone)]
pub struct ScrollOptions {
    /// Minimum number of scroll steps
    pub steps_min: usize,
    /// Maximum number of scroll steps
    pub steps_max: usize,
    /// Minimum pause between steps in milliseconds
    pub pause_min_ms: u64,
    /// Maximum pause between steps in milliseconds
    pub pause_max_ms: u64,
    /// Per-step multiplicative jitter, 0.2 means each step varies by ±20%
    pub jitter: f64,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            steps_min: 5,
            steps_max: 10,
            pause_min_ms: 100,
            pause_max_ms: 300,
            jitter: 0.2,
        }
    }
}
