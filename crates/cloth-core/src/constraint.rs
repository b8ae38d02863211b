use crate::point::Point;

/// Stable handle to a constraint slot. Slots are never reused, so a handle to
/// a torn constraint stays dead forever.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ConstraintId(u32);

impl ConstraintId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Distance constraint between two points of the grid.
#[derive(Clone, Copy, Debug)]
pub struct DistanceConstraint {
    /// Point index of the first endpoint (the point that created the edge).
    pub a: u32,
    /// Point index of the second endpoint.
    pub b: u32,
    /// Target distance, fixed at creation.
    pub rest_length: f32,
}

/// Outcome of a single `resolve` call.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Resolution {
    /// Endpoints were nudged toward the rest length (or were already there).
    Relaxed,
    /// The constraint overstretched and was removed from both endpoints.
    Torn,
    /// The handle refers to a constraint that is already gone.
    Inert,
}

impl DistanceConstraint {
    pub fn new(a: u32, b: u32, rest_length: f32) -> Self {
        Self { a, b, rest_length }
    }

    /// Current separation of the endpoints.
    pub fn length(&self, points: &[Point]) -> f32 {
        points[self.a as usize]
            .position
            .distance(points[self.b as usize].position)
    }

    /// Symmetric relaxation step: each endpoint moves half of the correction
    /// `(rest - dist) / dist` along the connecting axis, in opposite
    /// directions. Pinned endpoints are not displaced.
    fn relax(&self, points: &mut [Point], delta: glam::Vec2, dist: f32) {
        if dist <= f32::EPSILON {
            // Coincident endpoints have no axis to push along.
            return;
        }
        let diff = (self.rest_length - dist) / dist;
        let offset = delta * (diff * 0.5);

        let a = &mut points[self.a as usize];
        if !a.is_pinned() {
            a.position += offset;
        }
        let b = &mut points[self.b as usize];
        if !b.is_pinned() {
            b.position -= offset;
        }
    }
}

/// Slot arena owning every constraint of a cloth.
///
/// Removal tombstones the slot instead of compacting, so handles held by the
/// two endpoints never dangle or alias a different constraint.
#[derive(Default)]
pub struct ConstraintArena {
    slots: Vec<Option<DistanceConstraint>>,
    live: usize,
}

impl ConstraintArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            live: 0,
        }
    }

    /// Create a constraint between points `a` and `b` and register its
    /// handle on both endpoints.
    pub fn attach(
        &mut self,
        points: &mut [Point],
        a: usize,
        b: usize,
        rest_length: f32,
    ) -> ConstraintId {
        let id = ConstraintId(self.slots.len() as u32);
        self.slots.push(Some(DistanceConstraint::new(a as u32, b as u32, rest_length)));
        self.live += 1;
        points[a].attach(id);
        points[b].attach(id);
        id
    }

    pub fn get(&self, id: ConstraintId) -> Option<&DistanceConstraint> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    pub fn is_live(&self, id: ConstraintId) -> bool {
        self.get(id).is_some()
    }

    /// Number of constraints that have not been torn.
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Total slots ever allocated, torn ones included.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Iterate live constraints in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (ConstraintId, &DistanceConstraint)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|c| (ConstraintId(i as u32), c)))
    }

    /// Remove the constraint from both endpoints and tombstone its slot.
    /// Returns `false` if it was already gone.
    pub fn tear(&mut self, points: &mut [Point], id: ConstraintId) -> bool {
        let Some(c) = self.slots.get_mut(id.index()).and_then(Option::take) else {
            return false;
        };
        points[c.a as usize].detach(id);
        points[c.b as usize].detach(id);
        self.live -= 1;
        true
    }

    /// Resolve one constraint: tear it if it is longer than `tear_distance`,
    /// otherwise relax its endpoints toward the rest length.
    pub fn resolve(
        &mut self,
        points: &mut [Point],
        id: ConstraintId,
        tear_distance: f32,
    ) -> Resolution {
        let Some(c) = self.get(id).copied() else {
            return Resolution::Inert;
        };
        let delta = points[c.a as usize].position - points[c.b as usize].position;
        let dist = delta.length();

        if dist > tear_distance {
            self.tear(points, id);
            return Resolution::Torn;
        }

        c.relax(points, delta, dist);
        Resolution::Relaxed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn pair(b: Vec2) -> (Vec<Point>, ConstraintArena, ConstraintId) {
        let mut points = vec![Point::new(Vec2::ZERO), Point::new(b)];
        let mut arena = ConstraintArena::new();
        let id = arena.attach(&mut points, 0, 1, 10.0);
        (points, arena, id)
    }

    #[test]
    fn test_coincident_endpoints_do_not_produce_nan() {
        let (mut points, mut arena, id) = pair(Vec2::ZERO);
        assert_eq!(arena.resolve(&mut points, id, 60.0), Resolution::Relaxed);
        assert!(points.iter().all(|p| p.position.is_finite()));
    }

    #[test]
    fn test_slots_are_not_reused_after_tear() {
        let (mut points, mut arena, id) = pair(Vec2::new(10.0, 0.0));
        assert!(arena.tear(&mut points, id));
        let next = arena.attach(&mut points, 0, 1, 10.0);
        assert_ne!(id, next);
        assert!(!arena.is_live(id));
        assert_eq!(arena.slot_count(), 2);
        assert_eq!(arena.live_count(), 1);
    }
}
