//! Surface: the container revealed units are appended to.

use super::element::Element;
use std::cell::RefCell;
use std::rc::Rc;

/// An ordered list of revealed elements.
#[derive(Debug, Default)]
pub struct Surface {
    units: Vec<Element>,
}

impl Surface {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a unit as the last child.
    pub fn append(&mut self, unit: Element) {
        self.units.push(unit);
    }

    /// Remove every unit.
    pub fn clear(&mut self) {
        self.units.clear();
    }

    /// Revealed units, oldest first.
    pub fn units(&self) -> &[Element] {
        &self.units
    }

    /// Number of revealed units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether nothing has been revealed.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Plain text of the revealed units.
    pub fn text(&self) -> String {
        self.units
            .iter()
            .filter_map(|unit| unit.content().as_char())
            .collect()
    }

    /// Inner HTML of the surface.
    pub fn to_html(&self) -> String {
        let mut out = String::with_capacity(self.units.len() * 40);
        for unit in &self.units {
            unit.write_html(&mut out);
        }
        out
    }
}

/// Shared handle to a [`Surface`].
///
/// The animator and its caller both hold one. Handles are single-threaded;
/// clones refer to the same surface.
#[derive(Debug, Clone, Default)]
pub struct SurfaceHandle(Rc<RefCell<Surface>>);

impl SurfaceHandle {
    /// Create a handle to a new, empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a unit.
    pub fn append(&self, unit: Element) {
        self.0.borrow_mut().append(unit);
    }

    /// Remove every unit.
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Number of revealed units.
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Whether nothing has been revealed.
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Plain text of the revealed units.
    pub fn text(&self) -> String {
        self.0.borrow().text()
    }

    /// Inner HTML of the surface.
    pub fn to_html(&self) -> String {
        self.0.borrow().to_html()
    }

    /// Run `f` with the revealed units.
    pub fn with_units<R>(&self, f: impl FnOnce(&[Element]) -> R) -> R {
        f(self.0.borrow().units())
    }

    /// Whether two handles refer to the same surface.
    pub fn same_surface(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::UnitContent;

    fn unit(ch: char) -> Element {
        let mut element = Element::span();
        element.set_content(UnitContent::from_char(ch));
        element
    }

    #[test]
    fn test_surface_text_and_html() {
        let handle = SurfaceHandle::new();
        for ch in "a <b>\n".chars() {
            handle.append(unit(ch));
        }

        assert_eq!(handle.len(), 6);
        assert_eq!(handle.text(), "a <b>\n");
        assert_eq!(
            handle.to_html(),
            "<span>a</span><span>&nbsp;</span><span>&lt;</span>\
             <span>b</span><span>&gt;</span><span><br></span>"
        );
    }

    #[test]
    fn test_handles_share_surface() {
        let a = SurfaceHandle::new();
        let b = a.clone();
        b.append(unit('x'));
        assert_eq!(a.len(), 1);
        assert!(a.same_surface(&b));
        assert!(!a.same_surface(&SurfaceHandle::new()));

        a.clear();
        assert!(b.is_empty());
    }
}
