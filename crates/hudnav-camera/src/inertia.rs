use std::collections::VecDeque;

use hudnav_geometry::{InnerSpace, Vec3, Zero};

/// A value a gesture can throw: scalar azimuth or planar target offset.
pub trait Momentum: Copy + std::fmt::Debug {
    fn zero() -> Self;
    fn offset(self, other: Self) -> Self;
    fn difference(self, other: Self) -> Self;
    fn scaled(self, factor: f64) -> Self;
    fn magnitude(self) -> f64;
}

impl Momentum for f64 {
    fn zero() -> Self {
        0.0
    }

    fn offset(self, other: Self) -> Self {
        self + other
    }

    fn difference(self, other: Self) -> Self {
        self - other
    }

    fn scaled(self, factor: f64) -> Self {
        self * factor
    }

    fn magnitude(self) -> f64 {
        self.abs()
    }
}

impl Momentum for Vec3 {
    fn zero() -> Self {
        <Vec3 as Zero>::zero()
    }

    fn offset(self, other: Self) -> Self {
        self + other
    }

    fn difference(self, other: Self) -> Self {
        self - other
    }

    fn scaled(self, factor: f64) -> Self {
        self * factor
    }

    fn magnitude(self) -> f64 {
        InnerSpace::magnitude(self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InertiaParams {
    pub damping: f64,
    pub boost: f64,
    pub min_span: f64,
    pub rest: f64,
    pub capacity: usize,
}

/// Bounded `(value, time)` history of one continuous gesture.
#[derive(Clone, Debug)]
pub struct VelocityHistory<T> {
    samples: VecDeque<(T, f64)>,
    capacity: usize,
}

impl<T: Momentum> VelocityHistory<T> {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(2);
        Self {
            samples: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn starting_at(capacity: usize, value: T, time: f64) -> Self {
        let mut history = Self::new(capacity);
        history.push(value, time);
        history
    }

    pub fn push(&mut self, value: T, time: f64) {
        self.samples.push_back((value, time));
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Average per-sample change between the oldest and newest entries. `None` when the
    /// history is too short in samples or in time to give a meaningful rate.
    pub fn velocity(&self, min_span: f64) -> Option<T> {
        if self.samples.len() < 2 {
            return None;
        }
        let (oldest, oldest_time) = *self.samples.front()?;
        let (newest, newest_time) = *self.samples.back()?;
        if newest_time - oldest_time <= min_span {
            return None;
        }
        let steps = (self.samples.len() - 1) as f64;
        Some(newest.difference(oldest).scaled(1.0 / steps))
    }
}

/// Lifecycle of one gesture channel.
#[derive(Clone, Debug)]
pub enum ChannelState<S, T> {
    Idle,
    Dragging {
        session: S,
        history: VelocityHistory<T>,
    },
    Coasting {
        velocity: T,
    },
}

#[derive(Clone, Debug)]
pub struct GestureChannel<S, T> {
    state: ChannelState<S, T>,
    params: InertiaParams,
}

impl<S, T: Momentum> GestureChannel<S, T> {
    pub fn new(params: InertiaParams) -> Self {
        Self {
            state: ChannelState::Idle,
            params,
        }
    }

    pub fn state(&self) -> &ChannelState<S, T> {
        &self.state
    }

    pub fn session(&self) -> Option<&S> {
        match &self.state {
            ChannelState::Dragging { session, .. } => Some(session),
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, ChannelState::Dragging { .. })
    }

    /// Starts a session. Any residual momentum is dropped.
    pub fn begin(&mut self, session: S, value: T, time: f64) {
        self.state = ChannelState::Dragging {
            session,
            history: VelocityHistory::starting_at(self.params.capacity, value, time),
        };
    }

    pub fn track(&mut self, value: T, time: f64) {
        if let ChannelState::Dragging { history, .. } = &mut self.state {
            history.push(value, time);
        }
    }

    /// Ends the session and returns the boosted throw velocity, if the history allowed one.
    pub fn release(&mut self) -> Option<T> {
        let state = std::mem::replace(&mut self.state, ChannelState::Idle);
        let ChannelState::Dragging { history, .. } = state else {
            self.state = state;
            return None;
        };
        let velocity = history
            .velocity(self.params.min_span)?
            .scaled(self.params.boost);
        self.state = ChannelState::Coasting { velocity };
        Some(velocity)
    }

    /// Displacement to apply this frame while coasting; decays the stored velocity.
    pub fn coast(&mut self) -> Option<T> {
        let ChannelState::Coasting { velocity } = &mut self.state else {
            return None;
        };
        if velocity.magnitude() <= self.params.rest {
            self.state = ChannelState::Idle;
            return None;
        }
        let step = *velocity;
        *velocity = velocity.scaled(self.params.damping);
        Some(step)
    }

    pub fn velocity(&self) -> T {
        match &self.state {
            ChannelState::Coasting { velocity } => *velocity,
            _ => T::zero(),
        }
    }

    /// Drops residual momentum without touching an active session.
    pub fn halt(&mut self) {
        if matches!(self.state, ChannelState::Coasting { .. }) {
            self.state = ChannelState::Idle;
        }
    }
}
