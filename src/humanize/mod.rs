//! Human-shaped interaction layer
//!
//! Replays keyboard, pointer and scroll input with the timing texture of a
//! real user: correlated keystroke delays, adjacent-key typos that get
//! corrected, curved pointer paths and eased scrolling. All randomness flows
//! through one seedable source per `Humanizer`.
//!
//! ## Module structure
//! - `humanizer`: the gesture engine
//! - `options`: per-gesture tuning structs
//! - `keyboard`: QWERTY adjacency for typo simulation

pub mod humanizer;
pub mod keyboard;
pub mod options;

#[cfg(test)]
mod tests;

pub use humanizer::{Direction, FormField, Humanizer};
pub use options::{ClickOptions, MouseMoveOptions, ScrollOptions, TypingOptions};
