use crate::constraint::ConstraintId;
use glam::Vec2;

/// A Verlet particle.
///
/// Velocity is implicit in `position - prev_position`. Constraints are not
/// owned here: the point only keeps handles into the cloth's constraint arena,
/// and each constraint is listed by both of its endpoints.
#[derive(Clone, Debug)]
pub struct Point {
    pub position: Vec2,
    pub prev_position: Vec2,
    /// Force accumulated for the current step, cleared by `integrate`.
    pub force: Vec2,
    pin: Option<Vec2>,
    constraints: Vec<ConstraintId>,
}

impl Point {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            prev_position: position,
            force: Vec2::ZERO,
            pin: None,
            constraints: Vec::with_capacity(4),
        }
    }

    /// Accumulate a force for the next integration.
    pub fn apply_force(&mut self, force: Vec2) {
        self.force += force;
    }

    /// Fix the point at `at`. The pin wins over constraints and integration.
    pub fn pin_at(&mut self, at: Vec2) {
        self.pin = Some(at);
        self.position = at;
        self.prev_position = at;
    }

    pub fn unpin(&mut self) {
        self.pin = None;
    }

    pub fn pin(&self) -> Option<Vec2> {
        self.pin
    }

    pub fn is_pinned(&self) -> bool {
        self.pin.is_some()
    }

    /// Snap to the pin if there is one. Returns `true` when pinned.
    pub fn snap_to_pin(&mut self) -> bool {
        match self.pin {
            Some(at) => {
                self.position = at;
                true
            }
            None => false,
        }
    }

    /// Verlet step: `next = x + (x - prev) * damping + 0.5 * force * dt^2`.
    ///
    /// Pinned points stay on their pin with no implied velocity. The force
    /// accumulator is cleared either way.
    pub fn integrate(&mut self, dt: f32, damping: f32) {
        if let Some(at) = self.pin {
            self.position = at;
            self.prev_position = at;
            self.force = Vec2::ZERO;
            return;
        }
        let next = self.position
            + (self.position - self.prev_position) * damping
            + self.force * (0.5 * dt * dt);
        self.prev_position = self.position;
        self.position = next;
        self.force = Vec2::ZERO;
    }

    /// Bias the implied velocity toward `target` by rewriting the previous
    /// position: `prev = x - (target - x) * 0.5`.
    pub fn pull_toward(&mut self, target: Vec2) {
        self.prev_position = self.position - (target - self.position) * 0.5;
    }

    /// Per-step displacement (implied velocity).
    pub fn velocity(&self) -> Vec2 {
        self.position - self.prev_position
    }

    pub fn constraints(&self) -> &[ConstraintId] {
        &self.constraints
    }

    pub(crate) fn attach(&mut self, id: ConstraintId) {
        self.constraints.push(id);
    }

    pub(crate) fn detach(&mut self, id: ConstraintId) {
        self.constraints.retain(|&c| c != id);
    }
}
