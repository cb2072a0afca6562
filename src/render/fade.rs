//! FadeView: paints a surface into a grid, playing each unit's fade-in.
//!
//! Units are laid out left to right and wrap by display width. Line breaks
//! start a new row, and when the text is taller than the view the newest
//! rows stay visible. A unit whose class matches a registered
//! [`FadeRule`] is blended from the background toward its color over the
//! rule's duration; units without a matching rule are drawn fully opaque.

use super::cell::{Cell, Rgb};
use super::grid::{Grid, Rect};
use crate::document::{Element, SurfaceHandle, UnitContent};
use crate::style::{FadeRule, StyleRegistry};
use std::time::Instant;
use unicode_width::UnicodeWidthChar;

/// Renders one surface into a rectangle of a grid.
#[derive(Debug, Clone, Copy)]
pub struct FadeView {
    area: Rect,
    fg: Rgb,
    bg: Rgb,
}

impl FadeView {
    /// Create a view over `area` with default colors.
    pub const fn new(area: Rect) -> Self {
        Self {
            area,
            fg: Rgb::DEFAULT_FG,
            bg: Rgb::DEFAULT_BG,
        }
    }

    /// Builder: set text and background colors.
    #[must_use]
    pub const fn with_colors(mut self, fg: Rgb, bg: Rgb) -> Self {
        self.fg = fg;
        self.bg = bg;
        self
    }

    /// The painted area.
    pub const fn area(&self) -> Rect {
        self.area
    }

    /// Move or resize the view.
    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
    }

    /// Paint `surface` as it looks at `now`.
    pub fn render(
        &self,
        surface: &SurfaceHandle,
        registry: &StyleRegistry,
        now: Instant,
        grid: &mut Grid,
    ) {
        grid.clear_rect(self.area, self.fg, self.bg);
        if self.area.is_empty() {
            return;
        }

        let rules = registry.fade_rules();
        let rows = surface.with_units(|units| self.layout(units, &rules, now));
        let skip = rows.len().saturating_sub(usize::from(self.area.height));

        for (dy, row) in (0u16..).zip(rows.iter().skip(skip)) {
            for &(dx, cell) in row {
                grid.set(self.area.x + dx, self.area.y + dy, cell);
            }
        }
    }

    /// Whether any unit is still mid-fade at `now`.
    pub fn is_animating(&self, surface: &SurfaceHandle, registry: &StyleRegistry, now: Instant) -> bool {
        let rules = registry.fade_rules();
        surface.with_units(|units| {
            units
                .iter()
                .rev()
                .any(|unit| opacity_of(unit, &rules, now) < 1.0)
        })
    }

    /// Place every unit, returning rows of `(column, cell)`.
    fn layout(&self, units: &[Element], rules: &[FadeRule], now: Instant) -> Vec<Vec<(u16, Cell)>> {
        let width = self.area.width;
        let mut rows: Vec<Vec<(u16, Cell)>> = vec![Vec::new()];
        let mut col = 0u16;

        for unit in units {
            let symbol = match unit.content() {
                UnitContent::Empty => continue,
                UnitContent::LineBreak => {
                    rows.push(Vec::new());
                    col = 0;
                    continue;
                }
                UnitContent::NonBreakingSpace => ' ',
                UnitContent::Text(ch) => ch,
            };

            // Control characters have no width and are not painted.
            let Some(char_width) = symbol.width().and_then(|w| u16::try_from(w).ok()) else {
                continue;
            };
            if char_width == 0 || char_width > width {
                continue;
            }
            if col + char_width > width {
                rows.push(Vec::new());
                col = 0;
            }

            let opacity = opacity_of(unit, rules, now);
            let fg = unit.color().unwrap_or(self.fg).blend(self.bg, opacity);
            let cell = Cell::new(symbol)
                .with_fg(fg)
                .with_bg(self.bg)
                .with_modifiers(unit.modifiers());

            if let Some(row) = rows.last_mut() {
                row.push((col, cell));
            }
            col += char_width;
        }

        rows
    }
}

/// Opacity of `unit` at `now` under the last matching rule.
fn opacity_of(unit: &Element, rules: &[FadeRule], now: Instant) -> f32 {
    let rule = rules.iter().rev().find(|rule| unit.has_class(&rule.class_name));
    match (rule, unit.revealed_at()) {
        (Some(rule), Some(at)) => rule.opacity_at(now.saturating_duration_since(at)),
        _ => 1.0,
    }
}
