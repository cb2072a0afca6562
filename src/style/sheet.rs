//! Style sheet synthesis for the fade-in entry transition.

use crate::render::Easing;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Identifies which animator injected a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StyleOwner(u64);

impl StyleOwner {
    /// Allocate a process-unique owner token.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// The structured half of a sheet: which class fades, and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FadeRule {
    /// Class the rule applies to.
    pub class_name: String,
    /// Name of the keyframes the class animates with.
    pub animation_name: String,
    /// Length of the entry transition.
    pub duration: Duration,
    /// Timing curve.
    pub easing: Easing,
}

impl FadeRule {
    /// Opacity of an element `elapsed` after it was revealed.
    pub fn opacity_at(&self, elapsed: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let progress = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.easing.apply(progress)
    }
}

/// An injected style artifact.
///
/// Holds the CSS text (what a browser would receive) and the parsed
/// [`FadeRule`] renderers use directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSheet {
    id: String,
    owner: StyleOwner,
    css: String,
    rule: FadeRule,
}

impl StyleSheet {
    /// Build a sheet for `rule`.
    ///
    /// `custom_animation`, when given, replaces the default `@keyframes`
    /// block verbatim.
    pub fn synthesize(
        id: impl Into<String>,
        owner: StyleOwner,
        rule: FadeRule,
        custom_animation: Option<&str>,
    ) -> Self {
        let mut css = match custom_animation {
            Some(body) => body.trim().to_string(),
            None => default_keyframes(&rule.animation_name),
        };
        let _ = write!(
            css,
            "\n.{class} {{\n  opacity: 0;\n  display: inline;\n  animation: {name} {secs}s ease-out forwards;\n}}\n",
            class = rule.class_name,
            name = rule.animation_name,
            secs = rule.duration.as_secs_f64(),
        );

        Self {
            id: id.into(),
            owner,
            css,
            rule,
        }
    }

    /// Registry identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The animator that injected this sheet.
    pub const fn owner(&self) -> StyleOwner {
        self.owner
    }

    /// CSS text.
    pub fn css(&self) -> &str {
        &self.css
    }

    /// The fade rule.
    pub const fn rule(&self) -> &FadeRule {
        &self.rule
    }
}

fn default_keyframes(name: &str) -> String {
    format!("@keyframes {name} {{\n  from {{ opacity: 0; }}\n  to {{ opacity: 1; }}\n}}")
}
