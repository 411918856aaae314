//! Fade-out animation that detaches a notification node.
//!
//! A fade chain decays the inline opacity of one node in discrete steps and
//! then removes the node from its parent. Each step is a timer task that
//! schedules the next one, so chains on different nodes never share state.
//!
//! ## Phases
//!
//! | Opacity         | Phase      | Tick effect                         |
//! |-----------------|------------|-------------------------------------|
//! | unset           | `Start`    | set to `0.9`                        |
//! | `> 0.1`         | `Decaying` | subtract `0.05`                     |
//! | `<= 0.1`        | `Terminal` | detach, run the completion callback |
//! | after terminal  | `Finished` | nothing                             |
//!
//! From an unset opacity the node is detached on the eighteenth tick.

use std::rc::Rc;
use std::time::Duration;

use crate::host::Host;

/// Opacity applied on the first tick
pub const START_OPACITY: f64 = 0.9;

/// Opacity removed on every decaying tick
pub const FADE_STEP: f64 = 0.05;

/// Decay continues only while opacity stays above this floor
pub const DECAY_FLOOR: f64 = 0.05;

/// At or below this opacity the node is detached
pub const TERMINAL_OPACITY: f64 = 0.1;

/// Tick cadence, about 30 steps per second
pub const FRAME_INTERVAL: Duration = Duration::from_micros(1_000_000 / 30);

/// Callback run once when a fade chain completes
pub type Completion = Box<dyn FnOnce()>;

/// Pluggable animation that takes a mounted node to removal
///
/// Implementations must detach `node` eventually and run `on_complete` at
/// most once.
pub trait Animation<H: Host> {
    /// Start animating `node` out of the document
    fn animate(&self, host: &Rc<H>, node: H::Node, on_complete: Option<Completion>);
}

/// Phase of a fade chain, derived from its current opacity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadePhase {
    /// Opacity not yet set
    Start,
    /// Opacity above the terminal threshold
    Decaying,
    /// Opacity at or below the terminal threshold
    Terminal,
    /// Node has been released
    Finished,
}

/// Effect a single tick asks the host to perform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FadeStep {
    /// Write this inline opacity and schedule another tick
    SetOpacity(f64),
    /// Detach the node and run the completion callback
    Detach,
    /// Chain is over
    Idle,
}

/// Per-chain fade record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeState {
    opacity: Option<f64>,
    finished: bool,
}

impl Default for FadeState {
    fn default() -> Self {
        Self::new()
    }
}

impl FadeState {
    /// Fresh record with no opacity
    #[must_use]
    pub const fn new() -> Self {
        Self {
            opacity: None,
            finished: false,
        }
    }

    /// Record continuing from an opacity read off the node
    ///
    /// Values are snapped to the hundredths grid the chain steps on.
    #[must_use]
    pub fn resume(opacity: Option<f64>) -> Self {
        Self {
            opacity: opacity.filter(|value| value.is_finite()).map(snap),
            finished: false,
        }
    }

    /// Current opacity
    #[must_use]
    pub const fn opacity(&self) -> Option<f64> {
        self.opacity
    }

    /// Current phase
    #[must_use]
    pub fn phase(&self) -> FadePhase {
        if self.finished {
            return FadePhase::Finished;
        }
        match self.opacity {
            None => FadePhase::Start,
            Some(opacity) if opacity <= TERMINAL_OPACITY => FadePhase::Terminal,
            Some(opacity) if opacity > DECAY_FLOOR => FadePhase::Decaying,
            Some(_) => FadePhase::Terminal,
        }
    }

    /// Advance one tick and report what the host must do
    pub fn advance(&mut self) -> FadeStep {
        match self.phase() {
            FadePhase::Start => {
                self.opacity = Some(START_OPACITY);
                FadeStep::SetOpacity(START_OPACITY)
            }
            FadePhase::Decaying => {
                let next = snap(self.opacity.unwrap_or(START_OPACITY) - FADE_STEP);
                self.opacity = Some(next);
                FadeStep::SetOpacity(next)
            }
            FadePhase::Terminal => {
                self.finished = true;
                FadeStep::Detach
            }
            FadePhase::Finished => FadeStep::Idle,
        }
    }
}

/// Round to two decimals so repeated steps never drift into the threshold band
fn snap(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Outcome of [`FadeChain::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Another tick is needed
    Continue,
    /// Node released, nothing left to do
    Finished,
}

/// One running fade: the node, its record and its completion callback
pub struct FadeChain<H: Host> {
    host: Rc<H>,
    node: H::Node,
    state: FadeState,
    on_complete: Option<Completion>,
    interval: Duration,
}

impl<H: Host> FadeChain<H> {
    /// Create a chain seeded from the node's current inline opacity
    pub fn new(host: Rc<H>, node: H::Node, on_complete: Option<Completion>) -> Self {
        let state = FadeState::resume(host.opacity(&node));
        Self {
            host,
            node,
            state,
            on_complete,
            interval: FRAME_INTERVAL,
        }
    }

    /// Override the tick cadence
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Current fade record
    pub fn state(&self) -> &FadeState {
        &self.state
    }

    /// Perform one step without scheduling the next
    ///
    /// Calling this after the chain finished has no effect.
    pub fn tick(&mut self) -> TickOutcome {
        match self.state.advance() {
            FadeStep::SetOpacity(opacity) => {
                log::trace!("fade step to opacity {opacity}");
                if let Err(err) = self.host.set_opacity(&self.node, opacity) {
                    log::error!("fade step failed: {err}");
                }
                TickOutcome::Continue
            }
            FadeStep::Detach => {
                if self.host.has_parent(&self.node) {
                    if let Err(err) = self.host.detach(&self.node) {
                        log::error!("failed to detach faded node: {err}");
                    }
                }
                if let Some(on_complete) = self.on_complete.take() {
                    on_complete();
                }
                TickOutcome::Finished
            }
            FadeStep::Idle => TickOutcome::Finished,
        }
    }

    /// Tick now and keep rescheduling until the node is released
    pub fn run(mut self) {
        if self.tick() == TickOutcome::Finished {
            return;
        }
        let host = Rc::clone(&self.host);
        let interval = self.interval;
        if let Err(err) = host.schedule_after(interval, Box::new(move || self.run())) {
            log::error!("failed to schedule fade step: {err}");
        }
    }
}

/// Default animation: stepwise linear opacity decay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeAnimator {
    interval: Duration,
}

impl Default for FadeAnimator {
    fn default() -> Self {
        Self::new()
    }
}

impl FadeAnimator {
    /// Animator ticking at [`FRAME_INTERVAL`]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            interval: FRAME_INTERVAL,
        }
    }

    /// Animator ticking at a custom cadence
    #[must_use]
    pub const fn with_interval(interval: Duration) -> Self {
        Self { interval }
    }

    /// Tick cadence
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }
}

impl<H: Host> Animation<H> for FadeAnimator {
    fn animate(&self, host: &Rc<H>, node: H::Node, on_complete: Option<Completion>) {
        FadeChain::new(Rc::clone(host), node, on_complete)
            .with_interval(self.interval)
            .run();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_follow_opacity() {
        assert_eq!(FadeState::new().phase(), FadePhase::Start);
        assert_eq!(FadeState::resume(Some(0.9)).phase(), FadePhase::Decaying);
        assert_eq!(FadeState::resume(Some(0.11)).phase(), FadePhase::Decaying);
        assert_eq!(FadeState::resume(Some(0.1)).phase(), FadePhase::Terminal);
        assert_eq!(FadeState::resume(Some(0.07)).phase(), FadePhase::Terminal);
        assert_eq!(FadeState::resume(Some(0.0)).phase(), FadePhase::Terminal);
    }

    #[test]
    fn resume_ignores_non_finite_values() {
        assert_eq!(FadeState::resume(Some(f64::NAN)).phase(), FadePhase::Start);
    }

    #[test]
    fn steps_stay_on_grid() {
        let mut state = FadeState::new();
        let mut seen = Vec::new();
        while let FadeStep::SetOpacity(opacity) = state.advance() {
            seen.push(opacity);
        }

        assert_eq!(seen.len(), 17);
        assert_eq!(seen.first(), Some(&0.9));
        assert_eq!(seen.last(), Some(&0.1));
        assert_eq!(state.phase(), FadePhase::Finished);
        assert_eq!(state.advance(), FadeStep::Idle);
    }

    #[test]
    fn frame_interval_is_thirty_per_second() {
        assert_eq!(FRAME_INTERVAL.as_micros(), 33_333);
    }
}
