//! Element: the wrapper unit revealed for one character.
//!
//! Content follows a fixed five-case escaping policy rather than general
//! entity escaping:
//!
//! | char | content | HTML |
//! |------|---------|------|
//! | `'\n'` | [`UnitContent::LineBreak`] | `<br>` |
//! | `' '` | [`UnitContent::NonBreakingSpace`] | `&nbsp;` |
//! | `'<'` | literal text | `&lt;` |
//! | `'>'` | literal text | `&gt;` |
//! | `'&'` | literal text | `&amp;` |
//! | other | literal text | the char itself |

use crate::render::{Modifiers, Rgb};
use std::time::Instant;

/// What a revealed unit displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitContent {
    /// Nothing yet (a freshly built wrapper).
    #[default]
    Empty,
    /// A hard line break.
    LineBreak,
    /// A space that does not collapse.
    NonBreakingSpace,
    /// Literal text, never interpreted as markup.
    Text(char),
}

impl UnitContent {
    /// Map a queued character to unit content.
    pub const fn from_char(ch: char) -> Self {
        match ch {
            '\n' => Self::LineBreak,
            ' ' => Self::NonBreakingSpace,
            other => Self::Text(other),
        }
    }

    /// Plain-text equivalent (`'\n'` for a line break, `' '` for nbsp).
    pub const fn as_char(self) -> Option<char> {
        match self {
            Self::Empty => None,
            Self::LineBreak => Some('\n'),
            Self::NonBreakingSpace => Some(' '),
            Self::Text(ch) => Some(ch),
        }
    }

    /// Append the HTML serialisation of this content.
    pub fn write_html(self, out: &mut String) {
        match self {
            Self::Empty => {}
            Self::LineBreak => out.push_str("<br>"),
            Self::NonBreakingSpace => out.push_str("&nbsp;"),
            Self::Text('<') => out.push_str("&lt;"),
            Self::Text('>') => out.push_str("&gt;"),
            Self::Text('&') => out.push_str("&amp;"),
            Self::Text(ch) => out.push(ch),
        }
    }
}

/// A visual wrapper for one revealed character.
///
/// Built by the animator's unit factory, then given the configured class
/// name, its content, and the instant it was revealed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    classes: Vec<String>,
    content: UnitContent,
    color: Option<Rgb>,
    modifiers: Modifiers,
    revealed_at: Option<Instant>,
}

impl Default for Element {
    fn default() -> Self {
        Self::span()
    }
}

impl Element {
    /// Create an empty element with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            classes: Vec::new(),
            content: UnitContent::Empty,
            color: None,
            modifiers: Modifiers::empty(),
            revealed_at: None,
        }
    }

    /// The minimal generic wrapper.
    pub fn span() -> Self {
        Self::new("span")
    }

    /// Tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Builder: add a class.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.add_class(class);
        self
    }

    /// Add a class if not already present.
    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !self.has_class(&class) {
            self.classes.push(class);
        }
    }

    /// Whether the element carries `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Class list in insertion order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Builder: set an explicit foreground color.
    #[must_use]
    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }

    /// Explicit foreground color, if any.
    pub const fn color(&self) -> Option<Rgb> {
        self.color
    }

    /// Builder: set text modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Text modifiers.
    pub const fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Content.
    pub const fn content(&self) -> UnitContent {
        self.content
    }

    /// Replace the content.
    pub fn set_content(&mut self, content: UnitContent) {
        self.content = content;
    }

    /// When this element was revealed, if it has been.
    pub const fn revealed_at(&self) -> Option<Instant> {
        self.revealed_at
    }

    /// Stamp the reveal instant.
    pub fn set_revealed_at(&mut self, at: Instant) {
        self.revealed_at = Some(at);
    }

    /// Append the HTML serialisation of this element.
    pub fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        if !self.classes.is_empty() {
            out.push_str(" class=\"");
            out.push_str(&self.classes.join(" "));
            out.push('"');
        }
        out.push('>');
        self.content.write_html(out);
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }

    /// HTML serialisation of this element.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }
}
