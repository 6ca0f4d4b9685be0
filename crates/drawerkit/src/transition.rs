#![forbid(unsafe_code)]

//! Transition controller: one scrubbable open/close transition at a time.
//!
//! A logical transition drives several [`PropertyAnimator`]s in lockstep,
//! one per [`DrivenProperty`]. The first driven property is always
//! [`DrivenProperty::Offset`]; its resolution decides the outcome.
//!
//! # Contract
//!
//! - [`request_transition`](TransitionController::request_transition)
//!   fails with [`TransitionError::Busy`] while a transition is in flight.
//!   It never queues and never cancels the running one. A property list
//!   that does not lead with the offset fails with
//!   [`TransitionError::OffsetNotFirst`] and leaves the slot empty.
//! - Terminal values are a pure function of the target state
//!   ([`PropertyValues::terminal`]), never of current progress.
//! - A resolved transition reports `target` when it ran to the end and
//!   `target.opposite()` when it ran back to the start. The
//!   `on_complete` callback runs exactly once, after the slot is cleared.
//!
//! # Progress
//!
//! Scrub values are *directional*: `0.0` is where the transition is
//! currently heading away from and `1.0` where it is heading to. Reversing
//! a transition therefore maps progress `p` to `1 − p` without moving
//! anything on screen.

use std::fmt;
use std::time::Duration;

use drawerkit_core::animation::{AnimatingPosition, PropertyAnimator};
use drawerkit_core::{debug, trace};
use thiserror::Error;

use crate::config::DrawerConfig;
use crate::state::DrawerState;

/// Title scale when the drawer is open.
pub const OPEN_TITLE_SCALE: f64 = 0.85;

// ============================================================================
// Properties
// ============================================================================

/// A scalar the transition animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrivenProperty {
    /// Position along the drag axis (0 = open).
    Offset,
    CornerRadius,
    BlurAlpha,
    /// 0 = closed arrow shape, 1 = open chevron.
    ArrowMorph,
    TitleAlpha,
    TitleScale,
}

/// One value per [`DrivenProperty`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PropertyValues {
    pub offset: f64,
    pub corner_radius: f64,
    pub blur_alpha: f64,
    pub arrow_morph: f64,
    pub title_alpha: f64,
    pub title_scale: f64,
}

impl PropertyValues {
    /// Resting values for `state`.
    ///
    /// `closed_offset` comes from the current geometry; everything else from
    /// the configuration.
    pub fn terminal(state: DrawerState, closed_offset: f64, config: &DrawerConfig) -> Self {
        match state {
            DrawerState::Open => Self {
                offset: 0.0,
                corner_radius: config.corner_radius(),
                blur_alpha: if config.blur().is_enabled() { 1.0 } else { 0.0 },
                arrow_morph: 1.0,
                title_alpha: 0.0,
                title_scale: OPEN_TITLE_SCALE,
            },
            DrawerState::Closed => Self {
                offset: closed_offset,
                corner_radius: 0.0,
                blur_alpha: 0.0,
                arrow_morph: 0.0,
                title_alpha: 1.0,
                title_scale: 1.0,
            },
        }
    }

    #[inline]
    pub fn get(&self, property: DrivenProperty) -> f64 {
        match property {
            DrivenProperty::Offset => self.offset,
            DrivenProperty::CornerRadius => self.corner_radius,
            DrivenProperty::BlurAlpha => self.blur_alpha,
            DrivenProperty::ArrowMorph => self.arrow_morph,
            DrivenProperty::TitleAlpha => self.title_alpha,
            DrivenProperty::TitleScale => self.title_scale,
        }
    }

    #[inline]
    pub fn set(&mut self, property: DrivenProperty, value: f64) {
        match property {
            DrivenProperty::Offset => self.offset = value,
            DrivenProperty::CornerRadius => self.corner_radius = value,
            DrivenProperty::BlurAlpha => self.blur_alpha = value,
            DrivenProperty::ArrowMorph => self.arrow_morph = value,
            DrivenProperty::TitleAlpha => self.title_alpha = value,
            DrivenProperty::TitleScale => self.title_scale = value,
        }
    }
}

/// Properties a drawer with `config` animates, offset first.
pub fn driven_properties(config: &DrawerConfig) -> Vec<DrivenProperty> {
    let mut properties = vec![DrivenProperty::Offset, DrivenProperty::CornerRadius];
    if config.blur().is_enabled() {
        properties.push(DrivenProperty::BlurAlpha);
    }
    if config.arrow().is_some() {
        properties.push(DrivenProperty::ArrowMorph);
    }
    if config.title().is_some() {
        properties.push(DrivenProperty::TitleAlpha);
        properties.push(DrivenProperty::TitleScale);
    }
    properties
}

// ============================================================================
// Spec / handle / errors
// ============================================================================

/// One transition attempt.
pub struct TransitionSpec {
    pub target: DrawerState,
    pub duration: Duration,
    pub damping_ratio: f64,
    on_progress: Option<Box<dyn FnMut(f64)>>,
    on_complete: Option<Box<dyn FnOnce(DrawerState)>>,
}

impl fmt::Debug for TransitionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionSpec")
            .field("target", &self.target)
            .field("duration", &self.duration)
            .field("damping_ratio", &self.damping_ratio)
            .field("on_progress", &self.on_progress.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

impl TransitionSpec {
    #[must_use]
    pub fn new(target: DrawerState, duration: Duration, damping_ratio: f64) -> Self {
        Self {
            target,
            duration,
            damping_ratio,
            on_progress: None,
            on_complete: None,
        }
    }

    /// Spec using the configured duration and damping.
    #[must_use]
    pub fn from_config(target: DrawerState, config: &DrawerConfig) -> Self {
        Self::new(target, config.duration(), config.damping_ratio())
    }

    /// Called with the primary progress after every tick.
    #[must_use]
    pub fn on_progress(mut self, f: impl FnMut(f64) + 'static) -> Self {
        self.on_progress = Some(Box::new(f));
        self
    }

    /// Called once with the resolved state.
    #[must_use]
    pub fn on_complete(mut self, f: impl FnOnce(DrawerState) + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }
}

/// Identifies an accepted transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransitionHandle {
    pub id: u64,
    pub target: DrawerState,
}

/// Result of a resolved transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionOutcome {
    pub handle: TransitionHandle,
    pub final_state: DrawerState,
}

/// Rejected transition request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("a transition toward {in_flight} is already running")]
    Busy { in_flight: DrawerState },
    /// The property list is empty or does not lead with [`DrivenProperty::Offset`].
    #[error("driven properties must start with the offset")]
    OffsetNotFirst,
}

// ============================================================================
// Running transition
// ============================================================================

/// The transition currently owned by the controller.
pub struct RunningTransition {
    handle: TransitionHandle,
    spec: TransitionSpec,
    animators: Vec<(DrivenProperty, PropertyAnimator)>,
}

impl fmt::Debug for RunningTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunningTransition")
            .field("handle", &self.handle)
            .field("progress", &self.progress())
            .field("is_reversed", &self.is_reversed())
            .field("is_paused", &self.is_paused())
            .field("animators", &self.animators.len())
            .finish()
    }
}

impl RunningTransition {
    #[inline]
    pub fn handle(&self) -> TransitionHandle {
        self.handle
    }

    #[inline]
    pub fn target(&self) -> DrawerState {
        self.handle.target
    }

    #[inline]
    pub fn spec(&self) -> &TransitionSpec {
        &self.spec
    }

    fn primary(&self) -> &PropertyAnimator {
        &self.animators[0].1
    }

    /// Directional progress of the offset animator.
    pub fn progress(&self) -> f64 {
        directional(self.primary())
    }

    pub fn is_reversed(&self) -> bool {
        self.primary().is_reversed()
    }

    pub fn is_paused(&self) -> bool {
        self.primary().is_paused()
    }

    /// The state this transition will settle in if left alone.
    pub fn heading(&self) -> DrawerState {
        if self.is_reversed() {
            self.target().opposite()
        } else {
            self.target()
        }
    }
}

fn directional(animator: &PropertyAnimator) -> f64 {
    if animator.is_reversed() {
        1.0 - animator.fraction_complete()
    } else {
        animator.fraction_complete()
    }
}

fn set_directional(animator: &mut PropertyAnimator, progress: f64) {
    let fraction = if animator.is_reversed() {
        1.0 - progress
    } else {
        progress
    };
    animator.set_fraction_complete(fraction);
}

// ============================================================================
// Controller
// ============================================================================

/// Owner of the single transition slot.
#[derive(Debug, Default)]
pub struct TransitionController {
    running: Option<RunningTransition>,
    next_id: u64,
}

impl TransitionController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// No transition in flight.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.running.is_none()
    }

    #[inline]
    pub fn running(&self) -> Option<&RunningTransition> {
        self.running.as_ref()
    }

    /// Start animating every property in `properties` from `current` to
    /// `terminal`.
    pub fn request_transition(
        &mut self,
        spec: TransitionSpec,
        current: &PropertyValues,
        terminal: &PropertyValues,
        properties: &[DrivenProperty],
    ) -> Result<TransitionHandle, TransitionError> {
        if let Some(running) = &self.running {
            debug!(
                requested = spec.target.as_str(),
                in_flight = running.target().as_str(),
                "transition request rejected: busy"
            );
            return Err(TransitionError::Busy {
                in_flight: running.target(),
            });
        }
        if properties.first() != Some(&DrivenProperty::Offset) {
            debug!(
                requested = spec.target.as_str(),
                properties = properties.len(),
                "transition request rejected: offset not first"
            );
            return Err(TransitionError::OffsetNotFirst);
        }

        self.next_id = self.next_id.wrapping_add(1);
        let handle = TransitionHandle {
            id: self.next_id,
            target: spec.target,
        };

        let animators = properties
            .iter()
            .map(|&property| {
                let mut animator = PropertyAnimator::spring(
                    current.get(property),
                    terminal.get(property),
                    spec.duration,
                    spec.damping_ratio,
                );
                animator.start();
                (property, animator)
            })
            .collect();

        debug!(
            id = handle.id,
            target = handle.target.as_str(),
            duration_ms = spec.duration.as_millis() as u64,
            damping = spec.damping_ratio,
            "transition started"
        );

        self.running = Some(RunningTransition {
            handle,
            spec,
            animators,
        });
        Ok(handle)
    }

    fn for_each_animator(&mut self, mut f: impl FnMut(&mut PropertyAnimator)) {
        if let Some(running) = &mut self.running {
            for (_, animator) in &mut running.animators {
                f(animator);
            }
        }
    }

    /// Freeze every animator.
    pub fn pause(&mut self) {
        self.for_each_animator(PropertyAnimator::pause);
    }

    /// Scrub every animator to the same directional progress.
    pub fn set_progress(&mut self, progress: f64) {
        self.for_each_animator(|animator| set_directional(animator, progress));
    }

    /// Scrub each animator to its own directional progress, in driven order.
    pub fn set_progress_each(&mut self, progress: &[f64]) {
        if let Some(running) = &mut self.running {
            for ((_, animator), &p) in running.animators.iter_mut().zip(progress) {
                set_directional(animator, p);
            }
        }
    }

    /// Directional progress of every animator, in driven order.
    pub fn progress_each(&self) -> Vec<f64> {
        self.running
            .as_ref()
            .map(|running| running.animators.iter().map(|(_, a)| directional(a)).collect())
            .unwrap_or_default()
    }

    /// Flip direction. Two calls cancel out.
    pub fn reverse(&mut self) {
        if let Some(reversed) = self.running.as_ref().map(RunningTransition::is_reversed) {
            self.set_reversed(!reversed);
        }
    }

    pub fn set_reversed(&mut self, reversed: bool) {
        self.for_each_animator(|animator| animator.set_reversed(reversed));
    }

    /// Continue from wherever the animators are.
    pub fn resume(&mut self, initial_velocity: f64) {
        self.for_each_animator(|animator| animator.continue_animation(initial_velocity, 1.0));
    }

    /// Finish immediately in the current direction.
    pub fn fast_forward(&mut self) -> Option<TransitionOutcome> {
        if self.running.is_none() {
            return None;
        }
        self.for_each_animator(|animator| animator.continue_animation(0.0, 0.0));
        self.tick(Duration::ZERO)
    }

    /// Current value of every driven property.
    pub fn sample(&self) -> Vec<(DrivenProperty, f64)> {
        self.running
            .as_ref()
            .map(|running| {
                running
                    .animators
                    .iter()
                    .map(|(property, animator)| (*property, animator.value()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Advance every animator by `dt`; returns the outcome on resolution.
    pub fn tick(&mut self, dt: Duration) -> Option<TransitionOutcome> {
        let running = self.running.as_mut()?;

        let mut resolved = None;
        for (index, (_, animator)) in running.animators.iter_mut().enumerate() {
            let position = animator.tick(dt);
            if index == 0 {
                resolved = position;
            }
        }

        let progress = running.progress();
        if let Some(on_progress) = running.spec.on_progress.as_mut() {
            on_progress(progress);
        }
        trace!(id = running.handle.id, progress, "transition tick");

        let position = resolved?;
        for (_, animator) in running.animators.iter_mut().skip(1) {
            if !animator.is_finished() {
                animator.finish_at(position);
            }
        }

        let target = running.target();
        let final_state = match position {
            AnimatingPosition::End => target,
            AnimatingPosition::Start => target.opposite(),
            AnimatingPosition::Current => {
                unreachable!("offset animator resolved mid-flight")
            }
        };

        let mut finished = self.running.take()?;
        debug!(
            id = finished.handle.id,
            target = target.as_str(),
            final_state = final_state.as_str(),
            "transition resolved"
        );
        if let Some(on_complete) = finished.spec.on_complete.take() {
            on_complete(final_state);
        }

        Some(TransitionOutcome {
            handle: finished.handle,
            final_state,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
