//! Animated collapse wrapper with a pointer-event guard.
//!
//! A [`CollapseWrapper`] is the per-branch instance state of the sidebar:
//! the last known expansion state and at most one pending re-enable timer.
//! State changes are edge-triggered. The first state is adopted without
//! animation; every later change starts an opacity fade and disables
//! pointer events until the animation (plus a safety margin) is over.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;

use crate::collapse::{CollapseProps, collapse_props};
use crate::scheduler::{Scheduler, TimerHandle};

/// Default animation duration of sidebar branches.
pub const DEFAULT_COLLAPSE_DURATION: Duration = Duration::from_millis(250);

/// Extra time pointer events stay disabled after the animation ends.
pub const DEFAULT_POINTER_GUARD_MARGIN: Duration = Duration::from_millis(100);

/// Snapshot of a collapse wrapper for rendering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollapseView {
    /// Whether the region is expanded.
    pub is_expanded: bool,
    /// Animation duration in milliseconds.
    pub duration_ms: u64,
    /// Whether the region currently accepts pointer input.
    pub pointer_events_enabled: bool,
    /// Geometry attributes of the inner region.
    pub props: CollapseProps,
}

impl CollapseView {
    /// Opacity class of the outer region.
    pub fn opacity_class(&self) -> &'static str {
        if self.is_expanded {
            "opacity-100"
        } else {
            "opacity-50"
        }
    }

    /// Inline style of the outer region.
    pub fn style_attr(&self) -> String {
        let mut style = format!("transition: opacity {}ms ease-in-out", self.duration_ms);
        if !self.pointer_events_enabled {
            style.push_str("; pointer-events: none");
        }
        style
    }
}

/// Disables pointer events while a region is moving.
enum PointerGuard {
    /// Non-interactive platform: pointer events are never touched.
    Static,
    Interactive {
        scheduler: Arc<dyn Scheduler>,
        enabled: Arc<AtomicBool>,
        generation: Arc<AtomicU64>,
        timer: Option<TimerHandle>,
    },
}

impl PointerGuard {
    fn new(scheduler: Arc<dyn Scheduler>) -> Self {
        if scheduler.is_interactive() {
            Self::Interactive {
                scheduler,
                enabled: Arc::new(AtomicBool::new(true)),
                generation: Arc::new(AtomicU64::new(0)),
                timer: None,
            }
        } else {
            Self::Static
        }
    }

    fn is_enabled(&self) -> bool {
        match self {
            Self::Static => true,
            Self::Interactive { enabled, .. } => enabled.load(Ordering::Acquire),
        }
    }

    fn is_armed(&self) -> bool {
        matches!(self, Self::Interactive { timer: Some(_), .. })
    }

    /// Disable pointer events for `window`, replacing any pending timer.
    fn engage(&mut self, window: Duration) {
        let Self::Interactive {
            scheduler,
            enabled,
            generation,
            timer,
        } = self
        else {
            return;
        };

        enabled.store(false, Ordering::Release);
        let current = generation.fetch_add(1, Ordering::AcqRel) + 1;

        if let Some(previous) = timer.take() {
            tracing::debug!("Replacing pending pointer-event timer");
            previous.cancel();
        }

        let enabled = Arc::clone(enabled);
        let generation = Arc::clone(generation);
        *timer = Some(scheduler.schedule(
            window,
            Box::new(move || {
                // A cancelled timer may already be running; only the latest may re-enable.
                if generation.load(Ordering::Acquire) == current {
                    enabled.store(true, Ordering::Release);
                }
            }),
        ));
    }
}

/// Per-branch collapse animation state.
pub struct CollapseWrapper {
    is_expanded: bool,
    duration: Duration,
    margin: Duration,
    guard: PointerGuard,
}

impl CollapseWrapper {
    /// Create a wrapper, adopting `is_expanded` as the baseline state.
    pub fn new(is_expanded: bool, duration: Duration, scheduler: Arc<dyn Scheduler>) -> Self {
        Self {
            is_expanded,
            duration,
            margin: DEFAULT_POINTER_GUARD_MARGIN,
            guard: PointerGuard::new(scheduler),
        }
    }

    /// Override how long pointer events stay disabled after the animation.
    #[must_use]
    pub fn with_pointer_guard_margin(mut self, margin: Duration) -> Self {
        self.margin = margin;
        self
    }

    /// Apply the expansion state of the current render.
    ///
    /// Returns `true` when the state changed and a transition started.
    pub fn update(&mut self, is_expanded: bool) -> bool {
        if self.is_expanded == is_expanded {
            return false;
        }
        self.is_expanded = is_expanded;
        self.guard.engage(self.duration + self.margin);

        tracing::debug!(
            is_expanded,
            duration_ms = self.duration.as_millis(),
            "Collapse transition started"
        );
        true
    }

    /// Whether the region is expanded.
    pub fn is_expanded(&self) -> bool {
        self.is_expanded
    }

    /// Whether the region currently accepts pointer input.
    pub fn pointer_events_enabled(&self) -> bool {
        self.guard.is_enabled()
    }

    /// Whether a re-enable timer is held.
    pub fn has_pending_timer(&self) -> bool {
        self.guard.is_armed() && !self.guard.is_enabled()
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> CollapseView {
        CollapseView {
            is_expanded: self.is_expanded,
            duration_ms: u64::try_from(self.duration.as_millis()).unwrap_or(u64::MAX),
            pointer_events_enabled: self.pointer_events_enabled(),
            props: collapse_props(self.is_expanded, self.duration),
        }
    }
}

impl std::fmt::Debug for CollapseWrapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollapseWrapper")
            .field("is_expanded", &self.is_expanded)
            .field("duration", &self.duration)
            .field("pointer_events_enabled", &self.pointer_events_enabled())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{ManualScheduler, NoopScheduler};

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn wrapper(is_expanded: bool, scheduler: &ManualScheduler) -> CollapseWrapper {
        CollapseWrapper::new(is_expanded, ms(250), Arc::new(scheduler.clone()))
    }

    #[test]
    fn test_first_state_is_baseline_without_transition() {
        let scheduler = ManualScheduler::new();
        let mut wrapper = wrapper(true, &scheduler);

        assert!(!wrapper.update(true));
        assert!(wrapper.pointer_events_enabled());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_edge_disables_pointer_events_until_margin_elapses() {
        let scheduler = ManualScheduler::new();
        let mut wrapper = wrapper(false, &scheduler);

        assert!(wrapper.update(true));
        assert!(!wrapper.pointer_events_enabled());
        assert!(wrapper.has_pending_timer());

        scheduler.advance(ms(349));
        assert!(!wrapper.pointer_events_enabled());

        scheduler.advance(ms(1));
        assert!(wrapper.pointer_events_enabled());
        assert!(!wrapper.has_pending_timer());
    }

    #[test]
    fn test_repeated_state_is_not_an_edge() {
        let scheduler = ManualScheduler::new();
        let mut wrapper = wrapper(false, &scheduler);

        wrapper.update(true);
        scheduler.advance(ms(400));

        assert!(!wrapper.update(true));
        assert!(wrapper.pointer_events_enabled());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_new_transition_replaces_previous_timer() {
        let scheduler = ManualScheduler::new();
        let mut wrapper = wrapper(false, &scheduler);

        wrapper.update(true);
        scheduler.advance(ms(200));
        wrapper.update(false);
        assert_eq!(scheduler.pending(), 1);

        // First timer would have fired at 350ms.
        scheduler.advance(ms(200));
        assert!(!wrapper.pointer_events_enabled());

        // Second timer fires at 200 + 350 = 550ms.
        scheduler.advance(ms(150));
        assert!(wrapper.pointer_events_enabled());
    }

    #[test]
    fn test_custom_margin() {
        let scheduler = ManualScheduler::new();
        let mut wrapper = wrapper(true, &scheduler).with_pointer_guard_margin(Duration::ZERO);

        wrapper.update(false);
        scheduler.advance(ms(250));

        assert!(wrapper.pointer_events_enabled());
    }

    #[test]
    fn test_dropping_wrapper_cancels_timer() {
        let scheduler = ManualScheduler::new();
        let mut wrapper = wrapper(true, &scheduler);

        wrapper.update(false);
        assert_eq!(scheduler.pending(), 1);
        drop(wrapper);

        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_noop_scheduler_never_disables_pointer_events() {
        let mut wrapper = CollapseWrapper::new(false, ms(250), Arc::new(NoopScheduler));

        assert!(wrapper.update(true));
        assert!(wrapper.is_expanded());
        assert!(wrapper.pointer_events_enabled());
        assert!(!wrapper.has_pending_timer());
    }

    #[test]
    fn test_view_reflects_state() {
        let scheduler = ManualScheduler::new();
        let mut wrapper = wrapper(true, &scheduler);

        let view = wrapper.view();
        assert_eq!(view.opacity_class(), "opacity-100");
        assert_eq!(view.style_attr(), "transition: opacity 250ms ease-in-out");
        assert!(!view.props.aria_hidden);

        wrapper.update(false);
        let view = wrapper.view();
        assert_eq!(view.opacity_class(), "opacity-50");
        assert_eq!(
            view.style_attr(),
            "transition: opacity 250ms ease-in-out; pointer-events: none"
        );
        assert!(view.props.aria_hidden);
    }
}
