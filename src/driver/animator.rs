//! StreamingAnimator: the character-queue reveal driver.
//!
//! Chunks of any size are split into characters and queued. One character
//! is revealed per step, and each step arms the next one `delay` after the
//! instant it ran. The animator never blocks: hosts call
//! [`StreamingAnimator::poll`] from their loop (or sleep on
//! [`StreamingAnimator::next_deadline`]), and the first character of a
//! chunk that arrives while idle is revealed synchronously by
//! [`StreamingAnimator::add_chunk`].
//!
//! # State machine
//!
//! ```text
//!          add_chunk(non-empty)
//!   Idle ──────────────────────▶ Draining
//!    ▲  ◀────────────────────── │
//!    │     queue exhausted /     │
//!    │     reset / destroy       │
//!    └── reset / destroy (no-op) ┘
//! ```
//!
//! While `Draining`, exactly one step is armed. `reset` and `destroy`
//! cancel it synchronously, so no unit is appended after they return.

use super::clock::{Clock, SystemClock};
use super::timer::StepTimer;
use crate::config::AnimatorConfig;
use crate::document::{Document, SurfaceHandle, UnitContent};
use crate::error::AnimatorError;
use crate::style::{StyleOwner, StyleRegistry, StyleSheet};
use std::collections::VecDeque;
use std::time::Instant;
use tracing::{debug, trace, warn};

/// Whether the animator has work in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Queue empty, no step armed.
    Idle,
    /// A step is armed.
    Draining,
}

/// Reveals queued characters into a surface, one per step.
pub struct StreamingAnimator<C: Clock = SystemClock> {
    config: AnimatorConfig,
    target: SurfaceHandle,
    registry: StyleRegistry,
    clock: C,
    queue: VecDeque<char>,
    timer: StepTimer,
    state: DriverState,
    owner: StyleOwner,
    /// Identifier of the sheet this instance injected, while it holds it.
    injected_style: Option<String>,
    destroyed: bool,
}

impl StreamingAnimator<SystemClock> {
    /// Create an animator paced by wall-clock time.
    pub fn new(document: &Document, config: AnimatorConfig) -> Result<Self, AnimatorError> {
        Self::with_clock(document, config, SystemClock)
    }
}

impl<C: Clock> StreamingAnimator<C> {
    /// Create an animator paced by `clock`.
    ///
    /// Resolves the target first; if that fails nothing is injected.
    pub fn with_clock(
        document: &Document,
        config: AnimatorConfig,
        clock: C,
    ) -> Result<Self, AnimatorError> {
        let target = document.resolve(&config.target)?;
        let registry = document.registry().clone();
        let owner = StyleOwner::next();

        let injected_style = config
            .style_id
            .as_deref()
            .and_then(|id| inject_style(document, &config, id, owner));

        debug!(
            delay = ?config.delay,
            class = %config.class_name,
            injected = injected_style.is_some(),
            "animator created"
        );

        Ok(Self {
            config,
            target,
            registry,
            clock,
            queue: VecDeque::new(),
            timer: StepTimer::new(),
            state: DriverState::Idle,
            owner,
            injected_style,
            destroyed: false,
        })
    }

    /// Queue every character of `text`.
    ///
    /// When idle, the first character is revealed before this returns.
    /// Empty text does nothing. Fails once the animator is destroyed.
    pub fn add_chunk(&mut self, text: &str) -> Result<(), AnimatorError> {
        if self.destroyed {
            warn!(len = text.len(), "chunk rejected: animator destroyed");
            return Err(AnimatorError::Destroyed);
        }
        if text.is_empty() {
            return Ok(());
        }

        self.queue.extend(text.chars());
        if self.state == DriverState::Idle {
            self.state = DriverState::Draining;
            self.step();
        }
        Ok(())
    }

    /// Run every step that is due. Returns the number of units revealed.
    pub fn poll(&mut self) -> usize {
        let mut revealed = 0;
        while self.timer.take_due(self.clock.now()) {
            if self.step() {
                revealed += 1;
            }
        }
        revealed
    }

    /// When the armed step is due.
    pub const fn next_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// Sleep on the clock through every step until idle.
    ///
    /// Returns the number of units revealed.
    pub fn run_until_idle(&mut self) -> usize {
        let mut revealed = 0;
        while let Some(deadline) = self.timer.deadline() {
            self.clock.sleep_until(deadline);
            revealed += self.poll();
        }
        revealed
    }

    /// Cancel the armed step, drop queued characters, and go idle.
    ///
    /// With `clear_content`, previously revealed units are removed too.
    pub fn reset(&mut self, clear_content: bool) {
        self.timer.cancel();
        let dropped = self.queue.len();
        self.queue.clear();
        self.state = DriverState::Idle;
        if clear_content {
            self.target.clear();
        }
        debug!(dropped, clear_content, "animator reset");
    }

    /// Stop for good.
    ///
    /// Behaves like `reset(false)`, then refuses further chunks. With
    /// `remove_injected_style`, the style sheet is removed if this instance
    /// injected it and still owns it.
    pub fn destroy(&mut self, remove_injected_style: bool) {
        self.reset(false);
        self.destroyed = true;

        if remove_injected_style {
            if let Some(id) = self.injected_style.take() {
                let removed = self.registry.remove_owned(&id, self.owner);
                debug!(style_id = %id, removed, "injected style released");
            }
        }
        debug!("animator destroyed");
    }

    /// Reveal one character, then arm the next step or go idle.
    fn step(&mut self) -> bool {
        let Some(ch) = self.queue.pop_front() else {
            self.timer.cancel();
            self.state = DriverState::Idle;
            trace!("queue drained");
            return false;
        };

        let now = self.clock.now();
        let mut unit = self.config.unit_factory.build(ch);
        unit.add_class(self.config.class_name.as_str());
        unit.set_content(UnitContent::from_char(ch));
        unit.set_revealed_at(now);
        self.target.append(unit);
        trace!(?ch, remaining = self.queue.len(), "revealed");

        match now.checked_add(self.config.delay) {
            Some(at) => self.timer.arm(at),
            // Parked: nothing comes due until reset or destroy.
            None => {
                self.timer.cancel();
                debug!(delay = ?self.config.delay, "delay overflows the clock, step parked");
            }
        }
        true
    }

    /// Current state.
    pub const fn state(&self) -> DriverState {
        self.state
    }

    /// Characters waiting to be revealed.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Whether [`destroy`](Self::destroy) has been called.
    pub const fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Whether this instance injected a sheet it has not released.
    pub const fn owns_style(&self) -> bool {
        self.injected_style.is_some()
    }

    /// The configuration.
    pub const fn config(&self) -> &AnimatorConfig {
        &self.config
    }

    /// The target surface.
    pub const fn target(&self) -> &SurfaceHandle {
        &self.target
    }

    /// The pacing clock.
    pub const fn clock(&self) -> &C {
        &self.clock
    }
}

/// Register the sheet for `config` under `id` unless the id is taken.
fn inject_style(
    document: &Document,
    config: &AnimatorConfig,
    id: &str,
    owner: StyleOwner,
) -> Option<String> {
    if document.contains_id(id) {
        debug!(style_id = %id, "style already present, skipping injection");
        return None;
    }

    let sheet = StyleSheet::synthesize(
        id,
        owner,
        config.fade_rule(),
        config.custom_animation.as_deref(),
    );
    if document.registry().insert_if_absent(sheet) {
        debug!(style_id = %id, "style injected");
        Some(id.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{TargetRef, DEFAULT_STYLE_ID};
    use crate::document::Element;
    use crate::driver::ManualClock;
    use crate::render::Rgb;
    use std::time::Duration;

    const DELAY: Duration = Duration::from_millis(10);

    fn setup(delay: Duration) -> (Document, SurfaceHandle, ManualClock, StreamingAnimator<ManualClock>) {
        let mut document = Document::new();
        let surface = document.create_surface("out");
        let clock = ManualClock::new();
        let config = AnimatorConfig::new("out").with_delay(delay);
        let animator = StreamingAnimator::with_clock(&document, config, clock.clone()).unwrap();
        (document, surface, clock, animator)
    }

    fn reveal_times(surface: &SurfaceHandle) -> Vec<Instant> {
        surface.with_units(|units| units.iter().filter_map(Element::revealed_at).collect())
    }

    #[test]
    fn test_zero_delay_hi() {
        let (_doc, surface, _clock, mut animator) = setup(Duration::ZERO);
        animator.add_chunk("hi").unwrap();
        animator.poll();

        assert_eq!(surface.len(), 2);
        assert_eq!(surface.text(), "hi");
        assert_eq!(
            surface.to_html(),
            "<span class=\"streaming-char\">h</span><span class=\"streaming-char\">i</span>"
        );
        assert_eq!(animator.state(), DriverState::Idle);
    }

    #[test]
    fn test_first_char_is_synchronous() {
        let (_doc, surface, _clock, mut animator) = setup(DELAY);
        animator.add_chunk("abc").unwrap();

        assert_eq!(surface.text(), "a");
        assert_eq!(animator.pending(), 2);
        assert_eq!(animator.state(), DriverState::Draining);
    }

    #[test]
    fn test_paced_by_delay() {
        let (_doc, surface, clock, mut animator) = setup(DELAY);
        animator.add_chunk("abc").unwrap();

        clock.advance(Duration::from_millis(9));
        assert_eq!(animator.poll(), 0);
        clock.advance(Duration::from_millis(1));
        assert_eq!(animator.poll(), 1);
        assert_eq!(surface.text(), "ab");
    }

    #[test]
    fn test_late_poll_reveals_one_step() {
        let (_doc, surface, clock, mut animator) = setup(DELAY);
        animator.add_chunk("abc").unwrap();

        clock.advance(Duration::from_millis(100));
        assert_eq!(animator.poll(), 1);
        assert_eq!(surface.text(), "ab");

        clock.advance(DELAY);
        assert_eq!(animator.poll(), 1);
        assert_eq!(surface.text(), "abc");
    }

    #[test]
    fn test_order_and_spacing_across_chunks() {
        let (_doc, surface, clock, mut animator) = setup(DELAY);
        animator.add_chunk("Hel").unwrap();
        clock.advance(DELAY);
        animator.poll();
        animator.add_chunk("lo, ").unwrap();
        animator.add_chunk("").unwrap();
        animator.add_chunk("world").unwrap();
        let revealed = animator.run_until_idle();

        let text = "Hello, world";
        assert_eq!(surface.text(), text);
        assert_eq!(revealed, text.chars().count() - 2);
        assert_eq!(animator.state(), DriverState::Idle);

        let times = reveal_times(&surface);
        assert_eq!(times.len(), 12);
        for pair in times.windows(2) {
            assert!(pair[1] - pair[0] >= DELAY);
        }
        assert!(times[11] - times[0] >= DELAY * 11);
    }

    #[test]
    fn test_chunk_during_trailing_step_keeps_pacing() {
        let (_doc, surface, clock, mut animator) = setup(DELAY);
        animator.add_chunk("a").unwrap();
        assert_eq!(animator.state(), DriverState::Draining);

        // The trailing step is still armed, so "b" waits for it.
        animator.add_chunk("b").unwrap();
        assert_eq!(surface.text(), "a");
        clock.advance(DELAY);
        animator.poll();
        assert_eq!(surface.text(), "ab");
    }

    #[test]
    fn test_empty_chunk_is_noop() {
        let (_doc, surface, _clock, mut animator) = setup(DELAY);
        animator.add_chunk("").unwrap();
        assert!(surface.is_empty());
        assert!(animator.next_deadline().is_none());
        assert_eq!(animator.state(), DriverState::Idle);
    }

    #[test]
    fn test_special_characters() {
        let (_doc, surface, _clock, mut animator) = setup(Duration::ZERO);
        animator.add_chunk("\n <>&").unwrap();
        animator.poll();

        surface.with_units(|units| {
            let contents: Vec<_> = units.iter().map(Element::content).collect();
            assert_eq!(
                contents,
                [
                    UnitContent::LineBreak,
                    UnitContent::NonBreakingSpace,
                    UnitContent::Text('<'),
                    UnitContent::Text('>'),
                    UnitContent::Text('&'),
                ]
            );
        });
        let html = surface.to_html();
        assert!(html.contains("<br>"));
        assert!(html.contains("&nbsp;"));
        assert!(html.contains("&lt;</span>"));
        assert!(html.contains("&gt;</span>"));
        assert!(html.contains("&amp;</span>"));
    }

    #[test]
    fn test_reset_clear_mid_drain() {
        let (_doc, surface, clock, mut animator) = setup(DELAY);
        animator.add_chunk("abcdef").unwrap();
        clock.advance(DELAY);
        animator.poll();

        animator.reset(true);
        assert!(surface.is_empty());
        assert_eq!(animator.pending(), 0);
        assert_eq!(animator.state(), DriverState::Idle);

        clock.advance(Duration::from_secs(1));
        assert_eq!(animator.poll(), 0);
        assert!(surface.is_empty());
    }

    #[test]
    fn test_reset_keep_content_stops_drain() {
        let (_doc, surface, clock, mut animator) = setup(DELAY);
        animator.add_chunk("abcdef").unwrap();
        animator.reset(false);

        assert_eq!(surface.text(), "a");
        clock.advance(Duration::from_secs(1));
        assert_eq!(animator.poll(), 0);
        assert_eq!(animator.run_until_idle(), 0);
        assert_eq!(surface.text(), "a");
    }

    #[test]
    fn test_reset_is_idempotent() {
        let (_doc, surface, _clock, mut animator) = setup(DELAY);
        animator.reset(true);
        animator.reset(false);
        animator.reset(true);
        assert!(surface.is_empty());
        assert_eq!(animator.state(), DriverState::Idle);

        // Usable again after reset.
        animator.add_chunk("z").unwrap();
        assert_eq!(surface.text(), "z");
    }

    #[test]
    fn test_target_not_found_registers_nothing() {
        let document = Document::new();
        let result = StreamingAnimator::with_clock(
            &document,
            AnimatorConfig::new("missing"),
            ManualClock::new(),
        );

        assert!(matches!(
            result,
            Err(AnimatorError::TargetNotFound { ref target }) if target == "missing"
        ));
        assert!(document.registry().is_empty());
    }

    #[test]
    fn test_target_by_handle() {
        let document = Document::new();
        let surface = SurfaceHandle::new();
        let config = AnimatorConfig::new(TargetRef::Handle(surface.clone())).with_delay(Duration::ZERO);
        let mut animator = StreamingAnimator::with_clock(&document, config, ManualClock::new()).unwrap();
        animator.add_chunk("ok").unwrap();
        animator.poll();
        assert_eq!(surface.text(), "ok");
    }

    #[test]
    fn test_style_injected_once() {
        let (document, _surface, clock, first) = setup(DELAY);
        let second = StreamingAnimator::with_clock(
            &document,
            AnimatorConfig::new("out"),
            clock,
        )
        .unwrap();

        assert_eq!(document.registry().len(), 1);
        assert!(document.registry().contains(DEFAULT_STYLE_ID));
        assert!(first.owns_style());
        assert!(!second.owns_style());
    }

    #[test]
    fn test_style_injection_disabled() {
        let mut document = Document::new();
        document.create_surface("out");
        let config = AnimatorConfig::new("out").without_style_injection();
        let animator = StreamingAnimator::with_clock(&document, config, ManualClock::new()).unwrap();
        assert!(!animator.owns_style());
        assert!(document.registry().is_empty());
    }

    #[test]
    fn test_style_id_colliding_with_surface_is_skipped() {
        let mut document = Document::new();
        document.create_surface("out");
        document.create_surface(DEFAULT_STYLE_ID);
        let animator =
            StreamingAnimator::with_clock(&document, AnimatorConfig::new("out"), ManualClock::new()).unwrap();
        assert!(!animator.owns_style());
        assert!(document.registry().is_empty());
    }

    #[test]
    fn test_custom_animation_in_sheet() {
        let mut document = Document::new();
        document.create_surface("out");
        let config = AnimatorConfig::new("out")
            .with_animation_name("rise")
            .with_custom_animation("@keyframes rise { from { opacity: 0; } to { opacity: 1; } }")
            .with_animation_duration(Duration::from_millis(250));
        let _animator = StreamingAnimator::with_clock(&document, config, ManualClock::new()).unwrap();

        let sheet = document.registry().get(DEFAULT_STYLE_ID).unwrap();
        assert!(sheet.css().starts_with("@keyframes rise"));
        assert!(sheet.css().contains("animation: rise 0.25s ease-out forwards;"));
        assert_eq!(sheet.rule().duration, Duration::from_millis(250));
    }

    #[test]
    fn test_destroy_removes_owned_style() {
        let (document, surface, _clock, mut animator) = setup(DELAY);
        animator.add_chunk("abc").unwrap();
        animator.destroy(true);

        assert!(document.registry().is_empty());
        assert!(!animator.owns_style());
        assert!(animator.is_destroyed());
        assert_eq!(surface.text(), "a");
        assert!(animator.next_deadline().is_none());
    }

    #[test]
    fn test_destroy_without_removal_keeps_style() {
        let (document, _surface, _clock, mut animator) = setup(DELAY);
        animator.destroy(false);
        assert!(document.registry().contains(DEFAULT_STYLE_ID));

        // A later destroy may still release it.
        animator.destroy(true);
        assert!(document.registry().is_empty());
    }

    #[test]
    fn test_destroy_by_non_owner_keeps_style() {
        let (document, _surface, clock, _owner) = setup(DELAY);
        let mut other =
            StreamingAnimator::with_clock(&document, AnimatorConfig::new("out"), clock).unwrap();
        other.destroy(true);
        assert!(document.registry().contains(DEFAULT_STYLE_ID));
    }

    #[test]
    fn test_destroy_after_external_removal() {
        let (document, _surface, clock, mut owner) = setup(DELAY);
        document.registry().remove(DEFAULT_STYLE_ID);

        // Someone else re-registers the id; the old owner must not remove it.
        let _replacement =
            StreamingAnimator::with_clock(&document, AnimatorConfig::new("out"), clock).unwrap();
        owner.destroy(true);
        assert!(document.registry().contains(DEFAULT_STYLE_ID));
    }

    #[test]
    fn test_documents_sharing_a_registry() {
        let registry = StyleRegistry::new();
        let mut left = Document::with_registry(registry.clone());
        let mut right = Document::with_registry(registry.clone());
        left.create_surface("out");
        right.create_surface("out");

        let clock = ManualClock::new();
        let mut owner =
            StreamingAnimator::with_clock(&left, AnimatorConfig::new("out"), clock.clone()).unwrap();
        let mut other =
            StreamingAnimator::with_clock(&right, AnimatorConfig::new("out"), clock).unwrap();

        assert_eq!(registry.len(), 1);
        assert!(owner.owns_style());
        assert!(!other.owns_style());

        other.destroy(true);
        assert!(registry.contains(DEFAULT_STYLE_ID));
        assert!(right.registry().contains(DEFAULT_STYLE_ID));

        owner.destroy(true);
        assert!(registry.is_empty());
        assert!(right.registry().is_empty());
    }

    #[test]
    fn test_unbounded_delay_parks_without_panicking() {
        let (_doc, surface, clock, mut animator) = setup(Duration::MAX);
        animator.add_chunk("ab").unwrap();

        assert_eq!(surface.text(), "a");
        assert_eq!(animator.state(), DriverState::Draining);
        assert_eq!(animator.pending(), 1);
        assert!(animator.next_deadline().is_none());

        clock.advance(Duration::from_secs(3600));
        assert_eq!(animator.poll(), 0);
        assert_eq!(animator.run_until_idle(), 0);

        // More text queues behind the parked step.
        animator.add_chunk("c").unwrap();
        assert_eq!(animator.pending(), 2);
        assert_eq!(surface.text(), "a");

        animator.reset(false);
        assert_eq!(animator.state(), DriverState::Idle);
        assert_eq!(animator.pending(), 0);
    }

    #[test]
    fn test_add_chunk_after_destroy_rejected() {
        let (_doc, surface, clock, mut animator) = setup(DELAY);
        animator.destroy(false);

        assert_eq!(animator.add_chunk("late"), Err(AnimatorError::Destroyed));
        clock.advance(Duration::from_secs(1));
        animator.poll();
        assert!(surface.is_empty());
        assert_eq!(animator.pending(), 0);

        // Reset stays safe after destroy.
        animator.reset(true);
        assert_eq!(animator.state(), DriverState::Idle);
    }

    #[test]
    fn test_unit_factory_and_class() {
        let mut document = Document::new();
        let surface = document.create_surface("out");
        let config = AnimatorConfig::new("out")
            .with_delay(Duration::ZERO)
            .with_class_name("tok")
            .with_unit_factory(|ch| {
                let element = Element::new("em");
                if ch.is_ascii_digit() {
                    element.with_color(Rgb::new(255, 0, 0))
                } else {
                    element
                }
            });
        let mut animator = StreamingAnimator::with_clock(&document, config, ManualClock::new()).unwrap();
        animator.add_chunk("a1").unwrap();
        animator.poll();

        surface.with_units(|units| {
            assert_eq!(units.len(), 2);
            assert!(units.iter().all(|u| u.tag() == "em" && u.has_class("tok")));
            assert_eq!(units[0].color(), None);
            assert_eq!(units[1].color(), Some(Rgb::new(255, 0, 0)));
        });
    }
}
