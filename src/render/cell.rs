//! Cell: one terminal column of a painted frame.
//!
//! Revealed units are painted cell by cell. A cell carries a single
//! `char` (units are single characters, so no grapheme overflow storage is
//! needed), its display width, colors, and modifiers.

use bitflags::bitflags;

/// True-color RGB representation.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black (0, 0, 0)
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White (255, 255, 255)
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Default foreground (light grey)
    pub const DEFAULT_FG: Self = Self::new(220, 220, 220);
    /// Default background (black)
    pub const DEFAULT_BG: Self = Self::BLACK;

    /// Create from a 24-bit hex color (e.g., 0xFF5500).
    #[inline]
    pub const fn from_u32(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }

    /// Blend `self` over `background` with the given opacity.
    ///
    /// `0.0` yields the background, `1.0` yields `self`.
    #[must_use]
    pub fn blend(self, background: Self, opacity: f32) -> Self {
        let t = opacity.clamp(0.0, 1.0);
        Self::new(
            lerp_channel(background.r, self.r, t),
            lerp_channel(background.g, self.g, t),
            lerp_channel(background.b, self.b, t),
        )
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lerp_channel(from: u8, to: u8, t: f32) -> u8 {
    let value = f32::from(from) + (f32::from(to) - f32::from(from)) * t;
    value.round().clamp(0.0, 255.0) as u8
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<u32> for Rgb {
    #[inline]
    fn from(hex: u32) -> Self {
        Self::from_u32(hex)
    }
}

bitflags! {
    /// Text style modifiers.
    ///
    /// # Example
    /// ```
    /// use fadestream::Modifiers;
    /// let style = Modifiers::BOLD | Modifiers::ITALIC;
    /// ```
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Bold text
        const BOLD = 0b0000_0001;
        /// Dim/faint text
        const DIM = 0b0000_0010;
        /// Italic text
        const ITALIC = 0b0000_0100;
        /// Underlined text
        const UNDERLINE = 0b0000_1000;
    }
}

/// A single painted terminal cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    symbol: char,
    width: u8,
    fg: Rgb,
    bg: Rgb,
    modifiers: Modifiers,
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Cell {
    /// An empty cell (space character with default colors).
    pub const EMPTY: Self = Self {
        symbol: ' ',
        width: 1,
        fg: Rgb::DEFAULT_FG,
        bg: Rgb::DEFAULT_BG,
        modifiers: Modifiers::empty(),
    };

    /// Placeholder occupying the second column of a wide character.
    pub const CONTINUATION: Self = Self {
        symbol: '\0',
        width: 0,
        fg: Rgb::DEFAULT_FG,
        bg: Rgb::DEFAULT_BG,
        modifiers: Modifiers::empty(),
    };

    /// Create a cell from any character.
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(symbol: char) -> Self {
        let width = unicode_width::UnicodeWidthChar::width(symbol).unwrap_or(0) as u8;
        Self {
            symbol,
            width,
            ..Self::EMPTY
        }
    }

    /// The character in this cell.
    #[inline]
    pub const fn symbol(&self) -> char {
        self.symbol
    }

    /// Display width in columns (0 for continuation cells).
    #[inline]
    pub const fn display_width(&self) -> u8 {
        self.width
    }

    /// Whether this cell is the trailing half of a wide character.
    #[inline]
    pub const fn is_continuation(&self) -> bool {
        self.width == 0 && self.symbol == '\0'
    }

    /// Foreground color.
    #[inline]
    pub const fn fg(&self) -> Rgb {
        self.fg
    }

    /// Background color.
    #[inline]
    pub const fn bg(&self) -> Rgb {
        self.bg
    }

    /// Text modifiers.
    #[inline]
    pub const fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Builder: set foreground color.
    #[inline]
    #[must_use]
    pub const fn with_fg(mut self, fg: Rgb) -> Self {
        self.fg = fg;
        self
    }

    /// Builder: set background color.
    #[inline]
    #[must_use]
    pub const fn with_bg(mut self, bg: Rgb) -> Self {
        self.bg = bg;
        self
    }

    /// Builder: set modifiers.
    #[inline]
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}
