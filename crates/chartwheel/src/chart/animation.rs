//! Chart Animation Module
//!
//! Moves a chart from its current state to a target state one frame at a
//! time, handling the 360°/0° wrap-around so bodies never jump. The host owns
//! the frame loop and feeds either wall-clock frames ([`ChartAnimation::on_frame`])
//! or fixed deltas ([`ChartAnimation::tick`]); nothing here blocks.

use super::data::{ChartData, PositionEntry, Positions};
use super::renderer::{ChartLayer, ChartRenderer};
use super::settings::ChartSettings;
use super::timer::FrameTimer;
use crate::geometry::{normalize_degrees, shortest_delta, FULL_CIRCLE};
use crate::layout::{LocatedPoint, Universe};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Runs once when an animation reaches its full duration
pub type CompletionCallback = Box<dyn FnOnce()>;

/// Frames never advance by less than this
const MIN_FRAME: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    Idle,
    Running,
}

/// Where animated bodies are drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointProjection {
    pub universe: Universe,
    pub radius: f64,
    pub layer: ChartLayer,
}

/// Cusp wheel rotation for one run
#[derive(Debug, Clone, Copy)]
struct CuspRotation {
    /// Unwrapped rotation to reach, including any extra turns
    target: f64,
    /// First cusp of the target chart, drawn once the run ends
    absolute: f64,
}

/// Chart animation state for smooth position transitions
pub struct ChartAnimation {
    state: AnimationState,
    timer: FrameTimer,
    projection: PointProjection,
    /// In-flight positions, only ever handed out through the renderer
    working: Positions,
    target: Positions,
    /// +1 forward, -1 backward, fixed per body when a run starts
    directions: BTreeMap<String, f64>,
    /// First cusp the wheel was last drawn at with no rotation applied
    cusp_base: Option<f64>,
    cusp_rotation: Option<CuspRotation>,
    target_cusp: Option<f64>,
    /// Rotation applied on top of `cusp_base`; survives `stop` so a restart
    /// continues from where the wheel is
    rotation: f64,
    extra_turns: u32,
    elapsed: Duration,
    duration: Duration,
    reverse: bool,
    on_complete: Option<CompletionCallback>,
}

impl ChartAnimation {
    /// Idle animation starting from `current`
    pub fn new(current: &ChartData, projection: PointProjection, settings: &ChartSettings) -> Self {
        Self {
            state: AnimationState::Idle,
            timer: FrameTimer::new(),
            projection,
            working: current.planets.clone(),
            target: Positions::new(),
            directions: BTreeMap::new(),
            cusp_base: current.first_cusp(),
            cusp_rotation: None,
            target_cusp: None,
            rotation: 0.0,
            extra_turns: settings.animation_cusps_rotation_speed,
            elapsed: Duration::ZERO,
            duration: Duration::ZERO,
            reverse: false,
            on_complete: None,
        }
    }

    /// Start moving towards `target` over `duration`.
    ///
    /// `reverse` sends every body the long way round. Restarting a running
    /// animation drops the previous callback without calling it.
    pub fn start(
        &mut self,
        target: &ChartData,
        duration: Duration,
        reverse: bool,
        on_complete: Option<CompletionCallback>,
    ) {
        if self.state == AnimationState::Running {
            log::debug!("Animation: restarting while running, previous run cancelled");
            self.timer.stop();
        }

        self.target = target.planets.clone();
        self.duration = duration;
        self.reverse = reverse;
        self.on_complete = on_complete;
        self.elapsed = Duration::ZERO;

        // Bodies that only exist in the target appear in place
        for (name, entry) in &self.target {
            self.working.entry(name.clone()).or_insert(*entry);
        }

        self.directions = self
            .target
            .iter()
            .filter_map(|(name, to)| {
                let from = self.working.get(name)?;
                let direction = travel_direction(from, to.longitude, reverse);
                Some((name.clone(), direction))
            })
            .collect();

        self.cusp_rotation = match (self.cusp_base, target.first_cusp()) {
            (Some(base), Some(to)) => {
                let from = normalize_degrees(base + self.rotation);
                Some(CuspRotation {
                    target: self.rotation + self.rotation_target(from, to),
                    absolute: to,
                })
            }
            _ => None,
        };
        self.target_cusp = target.first_cusp();

        self.state = AnimationState::Running;
        log::debug!(
            "Animation: started, {} bodies over {:?} (reverse: {})",
            self.target.len(),
            duration,
            reverse
        );
    }

    fn rotation_target(&self, from: f64, to: f64) -> f64 {
        let base = normalize_degrees(to - from);
        let turns = f64::from(self.extra_turns) * FULL_CIRCLE;
        match (self.extra_turns > 0, self.reverse) {
            (false, _) => base,
            (true, false) => base + turns,
            (true, true) => base - (turns + FULL_CIRCLE),
        }
    }

    /// Halt without calling the completion callback. No-op when idle.
    ///
    /// The cusp wheel keeps its partial rotation; the next `start` rotates on
    /// from there.
    pub fn stop(&mut self) {
        if self.state == AnimationState::Idle {
            return;
        }
        self.state = AnimationState::Idle;
        self.timer.stop();
        self.on_complete = None;
        log::debug!("Animation: stopped after {:?}", self.elapsed);
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == AnimationState::Running
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Accumulated cusp rotation since the wheel was last snapped; not wrapped
    /// to [0, 360)
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Advance using the wall clock. The first frame of a run only arms the timer.
    pub fn on_frame(&mut self, now: Instant, renderer: &mut dyn ChartRenderer) -> AnimationState {
        if self.state == AnimationState::Idle {
            return self.state;
        }
        if !self.timer.is_running() {
            self.timer.start(now);
            return self.state;
        }
        match self.timer.frame(now) {
            Some(delta) => self.tick(delta, renderer),
            None => self.state,
        }
    }

    /// Advance by `delta` and draw the frame
    pub fn tick(&mut self, delta: Duration, renderer: &mut dyn ChartRenderer) -> AnimationState {
        if self.state == AnimationState::Idle {
            return self.state;
        }

        let delta = delta.max(MIN_FRAME);
        let remaining = self.duration.saturating_sub(self.elapsed);
        let fraction = if remaining <= delta {
            1.0
        } else {
            delta.as_secs_f64() / remaining.as_secs_f64()
        };
        self.elapsed += delta;

        self.step_points(fraction);
        self.step_cusps(fraction, renderer);

        if self.elapsed >= self.duration {
            self.finish(renderer);
        } else {
            renderer.draw_points(self.projection.layer, &self.located_points());
        }

        self.state
    }

    fn step_points(&mut self, fraction: f64) {
        for (name, to) in &self.target {
            let (Some(current), Some(&direction)) =
                (self.working.get_mut(name), self.directions.get(name))
            else {
                continue;
            };
            let remaining = remaining_arc(current.longitude, to.longitude, direction);
            current.longitude = normalize_degrees(current.longitude + remaining * fraction);
        }
        log::trace!("Animation: stepped {} bodies by {:.3}", self.target.len(), fraction);
    }

    fn step_cusps(&mut self, fraction: f64, renderer: &mut dyn ChartRenderer) {
        let Some(cusps) = self.cusp_rotation else {
            return;
        };

        let mut difference = if self.reverse {
            self.rotation - cusps.target
        } else {
            cusps.target - self.rotation
        };
        if difference < 0.0 {
            difference += FULL_CIRCLE;
        }
        let increment = difference * fraction;
        self.rotation += if self.reverse { -increment } else { increment };

        if fraction >= 1.0 {
            renderer.snap_cusps(cusps.absolute);
        } else {
            renderer.rotate_cusps(self.rotation);
        }
    }

    fn finish(&mut self, renderer: &mut dyn ChartRenderer) {
        self.state = AnimationState::Idle;
        self.timer.stop();

        for (name, to) in &self.target {
            self.working.insert(
                name.clone(),
                PositionEntry {
                    longitude: to.normalized_longitude(),
                    speed: to.speed,
                },
            );
        }
        renderer.draw_points(self.projection.layer, &self.located_points());

        // The wheel now sits at the target cusp with no rotation on top
        if let Some(cusp) = self.target_cusp {
            self.cusp_base = Some(cusp);
            self.rotation = 0.0;
        }

        log::debug!("Animation: finished after {:?}", self.elapsed);
        if let Some(callback) = self.on_complete.take() {
            callback();
        }
    }

    fn located_points(&self) -> Vec<LocatedPoint> {
        self.working
            .iter()
            .map(|(name, entry)| {
                LocatedPoint::new(
                    name.as_str(),
                    entry.longitude,
                    self.projection.radius,
                    &self.projection.universe,
                )
                .with_retrograde(entry.is_retrograde())
            })
            .collect()
    }
}

/// Direction a body travels in: the shorter arc, measured along the body's own
/// motion so a retrograde body breaks a 180° tie backwards. `reverse` flips it.
fn travel_direction(from: &PositionEntry, to: f64, reverse: bool) -> f64 {
    let mirror = if from.is_retrograde() { -1.0 } else { 1.0 };
    let delta = mirror * shortest_delta(mirror * from.longitude, mirror * to);
    let direction = if delta < 0.0 { -1.0 } else { 1.0 };
    if reverse {
        -direction
    } else {
        direction
    }
}

/// Signed arc left from `from` to `to` travelling in `direction`
fn remaining_arc(from: f64, to: f64, direction: f64) -> f64 {
    if direction < 0.0 {
        -normalize_degrees(from - to)
    } else {
        normalize_degrees(to - from)
    }
}
