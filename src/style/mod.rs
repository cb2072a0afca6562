//! Style module: the injected fade-in style artifact and its registry.
//!
//! - [`StyleSheet`]: CSS text plus the structured [`FadeRule`] it encodes
//! - [`StyleRegistry`]: shared table of sheets keyed by identifier

mod registry;
mod sheet;

pub use registry::StyleRegistry;
pub use sheet::{FadeRule, StyleOwner, StyleSheet};
