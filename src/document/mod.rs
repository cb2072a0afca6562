//! Document module: where revealed units live.
//!
//! - [`Document`]: named surfaces plus a style registry
//! - [`Surface`] / [`SurfaceHandle`]: ordered revealed units
//! - [`Element`] / [`UnitContent`]: one wrapper per character and its
//!   escaping policy

#[allow(clippy::module_inception)]
mod document;
mod element;
mod surface;

pub use document::Document;
pub use element::{Element, UnitContent};
pub use surface::{Surface, SurfaceHandle};
