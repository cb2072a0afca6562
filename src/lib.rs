//! # Fadestream
//!
//! Character-by-character fade-in reveal of streaming text.
//!
//! Text arrives in chunks of any size (an incremental LLM response, say).
//! Fadestream queues the characters and reveals them one at a time into a
//! target surface, pacing reveals by a per-character delay and styling each
//! revealed unit with a fade-in entry transition.
//!
//! ## Core Concepts
//!
//! - **Character queue**: chunks are appended in arrival order and drained
//!   one character per step
//! - **Single armed step**: at most one reveal is pending at any instant;
//!   `reset` and `destroy` cancel it synchronously
//! - **Style injection**: the fade rule is registered once per identifier
//!   in a shared [`StyleRegistry`]
//! - **Cooperative pacing**: the host loop polls; nothing blocks the caller
//!
//! ## Example
//!
//! ```rust
//! use fadestream::{AnimatorConfig, Document, ManualClock, StreamingAnimator};
//! use std::time::Duration;
//!
//! let mut document = Document::new();
//! let output = document.create_surface("output");
//!
//! let config = AnimatorConfig::new("output").with_delay(Duration::ZERO);
//! let mut animator =
//!     StreamingAnimator::with_clock(&document, config, ManualClock::new()).unwrap();
//!
//! animator.add_chunk("hi").unwrap();
//! animator.run_until_idle();
//! assert_eq!(output.text(), "hi");
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod config;
pub mod document;
pub mod driver;
pub mod error;
pub mod render;
pub mod style;
pub mod terminal;

// Re-exports for convenience
pub use actor::ChunkFeed;
pub use config::{
    AnimatorConfig, TargetRef, UnitFactory, DEFAULT_ANIMATION_DURATION, DEFAULT_ANIMATION_NAME,
    DEFAULT_CLASS_NAME, DEFAULT_DELAY, DEFAULT_STYLE_ID,
};
pub use document::{Document, Element, Surface, SurfaceHandle, UnitContent};
pub use driver::{Clock, DriverState, ManualClock, StreamingAnimator, SystemClock};
pub use error::AnimatorError;
pub use render::{Cell, Easing, FadeView, Grid, Modifiers, Rect, Rgb};
pub use style::{FadeRule, StyleRegistry, StyleSheet};
pub use terminal::TerminalSession;
