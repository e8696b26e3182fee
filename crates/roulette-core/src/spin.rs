//! Press-and-hold momentum spin.
//!
//! Holding the hub button charges velocity at one unit per millisecond. After
//! release the velocity decays linearly with elapsed time while the continuous
//! index advances in proportion to what is left, so the wheel decelerates and
//! stops after roughly as long as it was held.

use crate::clock::millis_between;
use crate::error::Result;
use crate::geometry::{Geometry, Point};
use crate::interaction::{Hub, Interaction, Response, Selection, Settled, Variant};
use std::time::{Duration, Instant};

pub const SETTLE_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinTuning {
    /// Velocity lost per elapsed millisecond.
    pub decay_per_ms: f64,
    /// Sectors advanced per (velocity unit × millisecond).
    pub advance_gain: f64,
    pub settle_delay: Duration,
}

impl Default for SpinTuning {
    fn default() -> Self {
        Self {
            decay_per_ms: 1.0,
            advance_gain: 10.0 / 1_000_000.0,
            settle_delay: SETTLE_DELAY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Spinning,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinState {
    pub velocity: f64,
    pub last_sample: Instant,
    pub continuous_index: f64,
}

impl SpinState {
    pub fn new(velocity: f64, now: Instant, start_index: f64) -> Self {
        Self {
            velocity: velocity.max(0.0),
            last_sample: now,
            continuous_index: start_index,
        }
    }

    pub fn step(&mut self, now: Instant, tuning: &SpinTuning) -> Step {
        let dt = millis_between(self.last_sample, now);
        self.last_sample = now;
        // clamped so the final step cannot run backwards
        self.velocity = (self.velocity - dt * tuning.decay_per_ms).max(0.0);
        self.continuous_index += self.velocity * dt * tuning.advance_gain;

        if self.velocity > 0.0 {
            Step::Spinning
        } else {
            Step::Stopped
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Pressed {
        since: Instant,
    },
    Spinning(SpinState),
    Settling {
        deadline: Instant,
    },
}

#[derive(Debug, Clone, Default)]
pub struct SpinController {
    tuning: SpinTuning,
    phase: Phase,
}

impl SpinController {
    pub fn new(tuning: SpinTuning) -> Self {
        Self {
            tuning,
            phase: Phase::Idle,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    fn begin_settle(&mut self, sel: &Selection, now: Instant) -> Response {
        log::trace!("spin stopped on index {}", sel.index());
        self.phase = Phase::Settling {
            deadline: now + self.tuning.settle_delay,
        };
        Response::after(self.tuning.settle_delay, sel.epoch())
    }
}

impl Interaction for SpinController {
    fn variant(&self) -> Variant {
        Variant::Spin
    }

    fn pressed(
        &mut self,
        sel: &mut Selection,
        geometry: &Geometry,
        at: Point,
        now: Instant,
    ) -> Result<Response> {
        if !sel.is_open() || self.phase != Phase::Idle || !geometry.in_button(at) {
            return Ok(Response::none());
        }
        self.phase = Phase::Pressed { since: now };
        Ok(Response::redraw())
    }

    fn released(
        &mut self,
        sel: &mut Selection,
        _geometry: &Geometry,
        _at: Point,
        now: Instant,
    ) -> Result<Response> {
        let Phase::Pressed { since } = self.phase else {
            return Ok(Response::none());
        };
        // whole milliseconds: a sub-millisecond hold is no hold
        let held = millis_between(since, now).floor();
        let spin = SpinState::new(held, now, sel.index() as f64);
        log::debug!("released after {held:.0} ms");

        if spin.velocity <= 0.0 {
            return Ok(self.begin_settle(sel, now));
        }
        self.phase = Phase::Spinning(spin);
        Ok(Response::next_frame(sel.epoch()))
    }

    fn tick(&mut self, sel: &mut Selection, now: Instant) -> Result<Response> {
        match self.phase {
            Phase::Spinning(mut spin) => {
                let step = spin.step(now, &self.tuning);
                sel.select(spin.continuous_index);
                match step {
                    Step::Spinning => {
                        self.phase = Phase::Spinning(spin);
                        Ok(Response::next_frame(sel.epoch()))
                    }
                    Step::Stopped => Ok(self.begin_settle(sel, now)),
                }
            }
            Phase::Settling { deadline } if now < deadline => {
                // woken early; wait out the rest
                Ok(Response {
                    redraw: false,
                    ..Response::after(deadline - now, sel.epoch())
                })
            }
            Phase::Settling { .. } => {
                self.phase = Phase::Idle;
                match sel.settle()? {
                    Settled::Descended => log::trace!("now at {} options", sel.level().count()),
                    Settled::Committed => log::trace!("final value '{}'", sel.value()),
                }
                Ok(Response::redraw())
            }
            Phase::Idle | Phase::Pressed { .. } => Ok(Response::none()),
        }
    }

    fn hub(&self, _sel: &Selection) -> Hub {
        Hub::Button {
            pressed: matches!(self.phase, Phase::Pressed { .. }),
        }
    }

    fn reset(&mut self) {
        self.phase = Phase::Idle;
    }
}
