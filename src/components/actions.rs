//! Queued motion and animation commands.
//!
//! An [`ActionQueue`] is a tiny cooperative interpreter: only the head
//! [`Action`] receives the frame delta, and it keeps receiving it until it
//! reports completion. The next action starts on the following frame; left
//! over time is never carried into it.
//!
//! Durations are milliseconds and speeds are per second, matching the frame
//! delta fed to [`ActionQueue::update`].
//!
//! | Action | Completes when |
//! |--------|----------------|
//! | [`MoveTo`], [`RotateTo`], [`ScaleTo`] | the tracked value lands on the target (final step clamped) |
//! | [`MoveBy`], [`RotateBy`], [`ScaleBy`] | the elapsed time reaches the duration |
//! | [`Blink`] | the blink duration elapses (visibility restored) |
//! | [`Delay`] | the elapsed time reaches the delay |
//! | [`Repeat`] | the captured sequence has been replayed the requested number of times |
//! | [`RepeatForever`] | never; only [`ActionQueue::clear`] removes it |

use std::collections::VecDeque;

use bevy_ecs::prelude::Component;

use crate::components::actor::Actor;
use crate::math::Vector;

/// Move toward a point at a constant speed (pixels per second).
#[derive(Debug, Clone, PartialEq)]
pub struct MoveTo {
    pub target: Vector,
    pub speed: f32,
}

impl MoveTo {
    fn update(&mut self, actor: &mut Actor, delta: f32) -> bool {
        let remaining = self.target.minus(actor.pos);
        let distance = remaining.magnitude();
        let step = self.speed * delta / 1000.0;
        if distance <= step {
            actor.pos = self.target;
            return true;
        }
        actor.pos = actor.pos.add(remaining.normalize().scale(step));
        false
    }
}

/// Move by an offset over a duration (ms).
#[derive(Debug, Clone, PartialEq)]
pub struct MoveBy {
    pub offset: Vector,
    pub duration: f32,
    elapsed: f32,
}

impl MoveBy {
    pub fn new(offset: Vector, duration: f32) -> Self {
        Self {
            offset,
            duration,
            elapsed: 0.0,
        }
    }

    fn update(&mut self, actor: &mut Actor, delta: f32) -> bool {
        let fraction = timed_fraction(&mut self.elapsed, self.duration, delta);
        actor.pos = actor.pos.add(self.offset.scale(fraction));
        self.elapsed >= self.duration
    }
}

/// Rotate toward an angle (radians) at a constant angular speed (rad/s).
#[derive(Debug, Clone, PartialEq)]
pub struct RotateTo {
    pub target: f32,
    pub speed: f32,
}

impl RotateTo {
    fn update(&mut self, actor: &mut Actor, delta: f32) -> bool {
        step_toward(&mut actor.rotation, self.target, self.speed * delta / 1000.0)
    }
}

/// Rotate by an angle (radians) over a duration (ms).
#[derive(Debug, Clone, PartialEq)]
pub struct RotateBy {
    pub angle: f32,
    pub duration: f32,
    elapsed: f32,
}

impl RotateBy {
    pub fn new(angle: f32, duration: f32) -> Self {
        Self {
            angle,
            duration,
            elapsed: 0.0,
        }
    }

    fn update(&mut self, actor: &mut Actor, delta: f32) -> bool {
        actor.rotation += self.angle * timed_fraction(&mut self.elapsed, self.duration, delta);
        self.elapsed >= self.duration
    }
}

/// Scale toward a size at a constant rate (scale units per second).
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleTo {
    pub target: f32,
    pub speed: f32,
}

impl ScaleTo {
    fn update(&mut self, actor: &mut Actor, delta: f32) -> bool {
        step_toward(&mut actor.scale, self.target, self.speed * delta / 1000.0)
    }
}

/// Change the scale by an amount over a duration (ms).
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleBy {
    pub amount: f32,
    pub duration: f32,
    elapsed: f32,
}

impl ScaleBy {
    pub fn new(amount: f32, duration: f32) -> Self {
        Self {
            amount,
            duration,
            elapsed: 0.0,
        }
    }

    fn update(&mut self, actor: &mut Actor, delta: f32) -> bool {
        actor.scale += self.amount * timed_fraction(&mut self.elapsed, self.duration, delta);
        self.elapsed >= self.duration
    }
}

/// Toggle visibility for a while.
///
/// Each cycle lasts `1000 / frequency` ms. The actor is hidden for the first
/// `blink_time` ms of every cycle (half a cycle when not given) and shown for
/// the rest. Once `duration` ms have passed the actor is made visible again.
#[derive(Debug, Clone, PartialEq)]
pub struct Blink {
    pub frequency: f32,
    pub duration: f32,
    pub blink_time: Option<f32>,
    elapsed: f32,
}

impl Blink {
    pub fn new(frequency: f32, duration: f32, blink_time: Option<f32>) -> Self {
        Self {
            frequency,
            duration,
            blink_time,
            elapsed: 0.0,
        }
    }

    fn cycle(&self) -> f32 {
        if self.frequency > 0.0 {
            1000.0 / self.frequency
        } else {
            self.duration.max(f32::EPSILON)
        }
    }

    fn update(&mut self, actor: &mut Actor, delta: f32) -> bool {
        self.elapsed += delta;
        if self.elapsed >= self.duration {
            actor.invisible = false;
            return true;
        }
        let cycle = self.cycle();
        let hidden_for = self.blink_time.unwrap_or(cycle / 2.0).clamp(0.0, cycle);
        actor.invisible = self.elapsed % cycle < hidden_for;
        false
    }
}

/// Wait without touching the actor (ms).
#[derive(Debug, Clone, PartialEq)]
pub struct Delay {
    pub duration: f32,
    elapsed: f32,
}

impl Delay {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            elapsed: 0.0,
        }
    }

    fn update(&mut self, delta: f32) -> bool {
        self.elapsed += delta;
        self.elapsed >= self.duration
    }
}

/// A captured list of actions played front to back.
#[derive(Debug, Clone, PartialEq)]
struct Sequence {
    template: Vec<Action>,
    current: VecDeque<Action>,
}

impl Sequence {
    fn new(template: Vec<Action>) -> Self {
        Self {
            template,
            current: VecDeque::new(),
        }
    }

    fn is_idle(&self) -> bool {
        self.current.is_empty()
    }

    fn reload(&mut self) {
        self.current = self.template.iter().map(Action::restarted).collect();
    }

    /// Advance the head action. True once the pass has run out of actions.
    fn advance(&mut self, actor: &mut Actor, delta: f32) -> bool {
        if let Some(head) = self.current.front_mut() {
            if head.update(actor, delta) {
                self.current.pop_front();
            }
        }
        self.current.is_empty()
    }

    fn restarted(&self) -> Self {
        Self::new(self.template.iter().map(Action::restarted).collect())
    }
}

/// Replays a captured sequence a bounded number of times.
#[derive(Debug, Clone, PartialEq)]
pub struct Repeat {
    sequence: Sequence,
    replays: u32,
    remaining: u32,
}

impl Repeat {
    /// `replays` fresh copies of `actions` are played one after another.
    pub fn new(actions: Vec<Action>, replays: u32) -> Self {
        Self {
            sequence: Sequence::new(actions),
            replays,
            remaining: replays,
        }
    }

    /// Replays not started yet.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    fn update(&mut self, actor: &mut Actor, delta: f32) -> bool {
        if self.sequence.is_idle() {
            if self.remaining == 0 {
                return true;
            }
            self.remaining -= 1;
            self.sequence.reload();
        }
        let pass_done = self.sequence.advance(actor, delta);
        pass_done && self.remaining == 0
    }
}

/// Replays a captured sequence until the queue is cleared.
#[derive(Debug, Clone, PartialEq)]
pub struct RepeatForever {
    sequence: Sequence,
}

impl RepeatForever {
    pub fn new(actions: Vec<Action>) -> Self {
        Self {
            sequence: Sequence::new(actions),
        }
    }

    fn update(&mut self, actor: &mut Actor, delta: f32) -> bool {
        if self.sequence.is_idle() {
            self.sequence.reload();
        }
        self.sequence.advance(actor, delta);
        false
    }
}

/// One queued command.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    MoveTo(MoveTo),
    MoveBy(MoveBy),
    RotateTo(RotateTo),
    RotateBy(RotateBy),
    ScaleTo(ScaleTo),
    ScaleBy(ScaleBy),
    Blink(Blink),
    Delay(Delay),
    Repeat(Repeat),
    RepeatForever(RepeatForever),
}

impl Action {
    pub fn move_to(x: f32, y: f32, speed: f32) -> Self {
        Action::MoveTo(MoveTo {
            target: Vector::new(x, y),
            speed,
        })
    }

    pub fn move_by(x: f32, y: f32, duration: f32) -> Self {
        Action::MoveBy(MoveBy::new(Vector::new(x, y), duration))
    }

    pub fn rotate_to(radians: f32, speed: f32) -> Self {
        Action::RotateTo(RotateTo {
            target: radians,
            speed,
        })
    }

    pub fn rotate_by(radians: f32, duration: f32) -> Self {
        Action::RotateBy(RotateBy::new(radians, duration))
    }

    pub fn scale_to(size: f32, speed: f32) -> Self {
        Action::ScaleTo(ScaleTo {
            target: size,
            speed,
        })
    }

    pub fn scale_by(size: f32, duration: f32) -> Self {
        Action::ScaleBy(ScaleBy::new(size, duration))
    }

    pub fn blink(frequency: f32, duration: f32, blink_time: Option<f32>) -> Self {
        Action::Blink(Blink::new(frequency, duration, blink_time))
    }

    pub fn delay(duration: f32) -> Self {
        Action::Delay(Delay::new(duration))
    }

    /// Advance by `delta` ms. Returns true once the action is complete.
    pub fn update(&mut self, actor: &mut Actor, delta: f32) -> bool {
        match self {
            Action::MoveTo(a) => a.update(actor, delta),
            Action::MoveBy(a) => a.update(actor, delta),
            Action::RotateTo(a) => a.update(actor, delta),
            Action::RotateBy(a) => a.update(actor, delta),
            Action::ScaleTo(a) => a.update(actor, delta),
            Action::ScaleBy(a) => a.update(actor, delta),
            Action::Blink(a) => a.update(actor, delta),
            Action::Delay(a) => a.update(delta),
            Action::Repeat(a) => a.update(actor, delta),
            Action::RepeatForever(a) => a.update(actor, delta),
        }
    }

    /// Copy keeping the construction parameters but none of the progress.
    pub fn restarted(&self) -> Action {
        match self {
            Action::MoveTo(a) => Action::MoveTo(a.clone()),
            Action::MoveBy(a) => Action::MoveBy(MoveBy::new(a.offset, a.duration)),
            Action::RotateTo(a) => Action::RotateTo(a.clone()),
            Action::RotateBy(a) => Action::RotateBy(RotateBy::new(a.angle, a.duration)),
            Action::ScaleTo(a) => Action::ScaleTo(a.clone()),
            Action::ScaleBy(a) => Action::ScaleBy(ScaleBy::new(a.amount, a.duration)),
            Action::Blink(a) => Action::Blink(Blink::new(a.frequency, a.duration, a.blink_time)),
            Action::Delay(a) => Action::Delay(Delay::new(a.duration)),
            Action::Repeat(a) => Action::Repeat(Repeat {
                sequence: a.sequence.restarted(),
                replays: a.replays,
                remaining: a.replays,
            }),
            Action::RepeatForever(a) => Action::RepeatForever(RepeatForever {
                sequence: a.sequence.restarted(),
            }),
        }
    }
}

/// Fraction of a timed action covered by this step, clamped so the fractions
/// of all steps sum to exactly one.
fn timed_fraction(elapsed: &mut f32, duration: f32, delta: f32) -> f32 {
    if duration <= 0.0 {
        let first = *elapsed < duration || *elapsed == 0.0;
        *elapsed = duration.max(0.0);
        return if first { 1.0 } else { 0.0 };
    }
    let before = elapsed.min(duration);
    *elapsed += delta;
    let after = elapsed.min(duration);
    (after - before) / duration
}

/// Move `value` toward `target` by at most `step`. True once it lands.
fn step_toward(value: &mut f32, target: f32, step: f32) -> bool {
    let remaining = target - *value;
    if remaining.abs() <= step {
        *value = target;
        return true;
    }
    *value += step.copysign(remaining);
    false
}

/// FIFO of pending actions for one actor.
#[derive(Component, Debug, Clone, Default)]
pub struct ActionQueue {
    actions: VecDeque<Action>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, action: Action) {
        self.actions.push_back(action);
    }

    /// Advance the head action; dequeue it if it completed.
    pub fn update(&mut self, actor: &mut Actor, delta: f32) {
        if let Some(head) = self.actions.front_mut() {
            if head.update(actor, delta) {
                self.actions.pop_front();
            }
        }
    }

    /// Drop every pending and in-progress action immediately.
    pub fn clear(&mut self) {
        self.actions.clear();
    }

    /// Fresh copies of every pending action, head included.
    pub fn snapshot(&self) -> Vec<Action> {
        self.actions.iter().map(Action::restarted).collect()
    }

    /// Run the currently pending actions `times` times in total.
    ///
    /// The pending actions play once as queued, then a [`Repeat`] replays a
    /// snapshot of them `times - 1` more times. `times == 0` repeats forever.
    /// Actions added after this call are not part of the repetition.
    pub fn repeat(&mut self, times: u32) {
        if times == 0 {
            self.repeat_forever();
            return;
        }
        let snapshot = self.snapshot();
        self.add(Action::Repeat(Repeat::new(snapshot, times - 1)));
    }

    /// Replay the currently pending actions until [`ActionQueue::clear`].
    pub fn repeat_forever(&mut self) {
        let snapshot = self.snapshot();
        self.add(Action::RepeatForever(RepeatForever::new(snapshot)));
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn current(&self) -> Option<&Action> {
        self.actions.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }
}
