//! Animator configuration.
//!
//! Everything except the target is optional and falls back to the
//! documented defaults below. The configuration is fixed once the animator
//! is constructed.

use crate::document::{Element, SurfaceHandle};
use crate::render::Easing;
use crate::style::FadeRule;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// Default pause between two reveals.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(35);
/// Default length of each unit's fade-in.
pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(400);
/// Default class applied to every revealed unit.
pub const DEFAULT_CLASS_NAME: &str = "streaming-char";
/// Default style sheet identifier.
pub const DEFAULT_STYLE_ID: &str = "streaming-text-animator-styles";
/// Default keyframes name.
pub const DEFAULT_ANIMATION_NAME: &str = "fadeInStream";

/// Where revealed units go: a surface handle, or an id to look up.
#[derive(Debug, Clone)]
pub enum TargetRef {
    /// A surface the caller already holds.
    Handle(SurfaceHandle),
    /// The id of a surface registered in the document.
    Id(String),
}

impl TargetRef {
    /// Reference a surface by id.
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }
}

impl From<SurfaceHandle> for TargetRef {
    fn from(handle: SurfaceHandle) -> Self {
        Self::Handle(handle)
    }
}

impl From<&str> for TargetRef {
    fn from(id: &str) -> Self {
        Self::Id(id.to_string())
    }
}

impl From<String> for TargetRef {
    fn from(id: String) -> Self {
        Self::Id(id)
    }
}

/// Builds the wrapper element for each revealed character.
///
/// The animator adds the class name and content afterwards, so factories
/// only decide the tag, color, and modifiers.
#[derive(Clone)]
pub struct UnitFactory(Rc<dyn Fn(char) -> Element>);

impl UnitFactory {
    /// Wrap a factory function.
    pub fn new(f: impl Fn(char) -> Element + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Build the wrapper for `ch`.
    pub fn build(&self, ch: char) -> Element {
        (self.0)(ch)
    }
}

impl Default for UnitFactory {
    fn default() -> Self {
        Self::new(|_| Element::span())
    }
}

impl fmt::Debug for UnitFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UnitFactory(..)")
    }
}

/// Configuration for a [`StreamingAnimator`](crate::StreamingAnimator).
#[derive(Debug, Clone)]
pub struct AnimatorConfig {
    /// Surface to reveal into.
    pub target: TargetRef,
    /// Pause between two reveals.
    pub delay: Duration,
    /// Length of each unit's fade-in.
    pub animation_duration: Duration,
    /// Class applied to every revealed unit.
    pub class_name: String,
    /// Style sheet identifier; `None` disables injection.
    pub style_id: Option<String>,
    /// Replacement for the default `@keyframes` block.
    pub custom_animation: Option<String>,
    /// Keyframes name referenced by the class rule.
    pub animation_name: String,
    /// Wrapper factory.
    pub unit_factory: UnitFactory,
    /// Timing curve renderers apply to the fade.
    pub easing: Easing,
}

impl AnimatorConfig {
    /// Defaults for the given target.
    pub fn new(target: impl Into<TargetRef>) -> Self {
        Self {
            target: target.into(),
            delay: DEFAULT_DELAY,
            animation_duration: DEFAULT_ANIMATION_DURATION,
            class_name: DEFAULT_CLASS_NAME.to_string(),
            style_id: Some(DEFAULT_STYLE_ID.to_string()),
            custom_animation: None,
            animation_name: DEFAULT_ANIMATION_NAME.to_string(),
            unit_factory: UnitFactory::default(),
            easing: Easing::EaseOut,
        }
    }

    /// Set the pause between reveals.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the pause between reveals in milliseconds.
    #[must_use]
    pub fn with_delay_ms(self, millis: u64) -> Self {
        self.with_delay(Duration::from_millis(millis))
    }

    /// Set the fade-in length.
    #[must_use]
    pub fn with_animation_duration(mut self, duration: Duration) -> Self {
        self.animation_duration = duration;
        self
    }

    /// Set the unit class name.
    #[must_use]
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    /// Set the style sheet identifier.
    #[must_use]
    pub fn with_style_id(mut self, style_id: impl Into<String>) -> Self {
        self.style_id = Some(style_id.into());
        self
    }

    /// Disable style injection.
    #[must_use]
    pub fn without_style_injection(mut self) -> Self {
        self.style_id = None;
        self
    }

    /// Replace the default keyframes block.
    #[must_use]
    pub fn with_custom_animation(mut self, css: impl Into<String>) -> Self {
        self.custom_animation = Some(css.into());
        self
    }

    /// Set the keyframes name.
    #[must_use]
    pub fn with_animation_name(mut self, name: impl Into<String>) -> Self {
        self.animation_name = name.into();
        self
    }

    /// Set the wrapper factory.
    #[must_use]
    pub fn with_unit_factory(mut self, factory: impl Fn(char) -> Element + 'static) -> Self {
        self.unit_factory = UnitFactory::new(factory);
        self
    }

    /// Set the fade timing curve.
    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// The fade rule this configuration injects.
    pub fn fade_rule(&self) -> FadeRule {
        FadeRule {
            class_name: self.class_name.clone(),
            animation_name: self.animation_name.clone(),
            duration: self.animation_duration,
            easing: self.easing,
        }
    }
}
