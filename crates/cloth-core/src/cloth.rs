use crate::config::{validate_canvas, ClothConfig, CutPolicy};
use crate::constraint::{ConstraintArena, ConstraintId, DistanceConstraint, Resolution};
use crate::draw::{DrawSurface, Segment};
use crate::error::ClothError;
use crate::forces::gravity::gravity_force;
use crate::forces::pointer::{pointer_influence, PointerInfluence, PointerState};
use crate::math::Bounds;
use crate::point::Point;
use glam::Vec2;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A rectangular sheet of Verlet points hanging from its pinned top row.
///
/// Points are stored row-major, `(x, y) -> y * cols + x`, and never
/// reindexed. Constraints live in an arena and are only ever torn, never
/// re-added.
pub struct Cloth {
    config: ClothConfig,
    points: Vec<Point>,
    constraints: ConstraintArena,
    bounds: Bounds,
    cols: usize,
    rows: usize,
    /// Reused copy of a point's handles while they are being resolved or cut.
    scratch: Vec<ConstraintId>,
}

impl Cloth {
    /// Build the lattice described by `config`.
    ///
    /// Each point attaches to its left neighbour (except in the first column)
    /// and to the point above (except in the first row); the first row is pinned.
    pub fn new(config: ClothConfig) -> Result<Self, ClothError> {
        config.validate()?;
        let count = config.point_count().ok_or(ClothError::InvalidGridDimensions {
            width: config.cloth_width,
            height: config.cloth_height,
        })?;

        let cols = config.cloth_width + 1;
        let rows = config.cloth_height + 1;
        let spacing = config.spacing;
        let start_x = config.canvas_width / 2.0 - config.cloth_width as f32 * spacing / 2.0;

        let mut points = Vec::with_capacity(count);
        let mut constraints = ConstraintArena::with_capacity(2 * count);

        for y in 0..rows {
            for x in 0..cols {
                let pos = Vec2::new(
                    start_x + x as f32 * spacing,
                    config.start_y + y as f32 * spacing,
                );
                points.push(Point::new(pos));
                let idx = points.len() - 1;

                if x != 0 {
                    constraints.attach(&mut points, idx, idx - 1, spacing);
                }
                if y == 0 {
                    points[idx].pin_at(pos);
                } else {
                    constraints.attach(&mut points, idx, x + (y - 1) * cols, spacing);
                }
            }
        }

        let bounds = Bounds::from_canvas(config.canvas_width, config.canvas_height);

        Ok(Self {
            config,
            points,
            constraints,
            bounds,
            cols,
            rows,
            scratch: Vec::with_capacity(4),
        })
    }

    /// Advance one frame with the fixed nominal time step.
    pub fn update(&mut self, pointer: &PointerState) {
        self.step(self.config.time_step, pointer);
    }

    /// Advance one frame: `physics_accuracy` relaxation passes over every
    /// point in grid order, then one integration of every point.
    pub fn step(&mut self, dt: f32, pointer: &PointerState) {
        for _ in 0..self.config.physics_accuracy {
            for i in 0..self.points.len() {
                self.resolve_point(i);
            }
        }
        for i in 0..self.points.len() {
            self.integrate_point(i, dt, pointer);
        }
    }

    /// Snap a pinned point to its pin, or resolve every constraint still
    /// attached to it and clamp it into the bounds.
    pub fn resolve_point(&mut self, index: usize) {
        if self.points[index].snap_to_pin() {
            return;
        }

        let mut handles = std::mem::take(&mut self.scratch);
        handles.clear();
        handles.extend_from_slice(self.points[index].constraints());
        for &id in &handles {
            self.constraints.resolve(&mut self.points, id, self.config.tear_distance);
        }
        self.scratch = handles;

        let p = &mut self.points[index];
        p.position = self.bounds.clamp(p.position);
    }

    /// Resolve a single constraint by handle. Torn handles are inert.
    pub fn resolve_constraint(&mut self, id: ConstraintId) -> Resolution {
        self.constraints.resolve(&mut self.points, id, self.config.tear_distance)
    }

    /// Pointer influence, then gravity, then the Verlet step.
    pub fn integrate_point(&mut self, index: usize, dt: f32, pointer: &PointerState) {
        match pointer_influence(
            self.points[index].position,
            pointer,
            self.config.mouse_influence,
            self.config.mouse_cut,
        ) {
            PointerInfluence::Pull(target) => self.points[index].pull_toward(target),
            PointerInfluence::Cut => {
                self.cut_point(index);
            }
            PointerInfluence::None => {}
        }

        let p = &mut self.points[index];
        p.apply_force(gravity_force(self.config.gravity));
        p.integrate(dt, self.config.damping);
    }

    /// Tear the incident constraints of `index` selected by the cut policy.
    /// Returns how many were torn.
    pub fn cut_point(&mut self, index: usize) -> usize {
        let tear_distance = self.config.tear_distance;
        let policy = self.config.cut_policy;

        let mut doomed = std::mem::take(&mut self.scratch);
        doomed.clear();
        for &id in self.points[index].constraints() {
            let Some(c) = self.constraints.get(id) else {
                continue;
            };
            let overstretched = c.length(&self.points) > tear_distance;
            let cut = match policy {
                CutPolicy::Overstretched => overstretched,
                CutPolicy::Sever => !overstretched,
            };
            if cut {
                doomed.push(id);
            }
        }

        let mut torn = 0;
        for &id in &doomed {
            if self.constraints.tear(&mut self.points, id) {
                torn += 1;
            }
        }
        self.scratch = doomed;
        torn
    }

    /// Create a constraint from `from` to `to` with the lattice rest length.
    pub fn attach(&mut self, from: usize, to: usize) -> Result<ConstraintId, ClothError> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from == to {
            return Err(ClothError::SelfConstraint(from));
        }
        Ok(self
            .constraints
            .attach(&mut self.points, from, to, self.config.spacing))
    }

    /// Emit every live constraint once, in grid order, each drawn by the
    /// endpoint that created it.
    pub fn draw<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        for (i, p) in self.points.iter().enumerate() {
            for &id in p.constraints() {
                if let Some(c) = self.owned_constraint(i, id) {
                    surface.line(
                        self.points[c.a as usize].position,
                        self.points[c.b as usize].position,
                    );
                }
            }
        }
    }

    /// The segments `draw` would emit, collected into a buffer.
    #[cfg(not(feature = "parallel"))]
    pub fn segments(&self) -> Vec<Segment> {
        let mut out = Vec::with_capacity(self.constraints.live_count());
        self.draw(&mut out);
        out
    }

    /// The segments `draw` would emit, collected into a buffer.
    #[cfg(feature = "parallel")]
    pub fn segments(&self) -> Vec<Segment> {
        self.points
            .par_iter()
            .enumerate()
            .flat_map_iter(|(i, p)| {
                p.constraints().iter().filter_map(move |&id| {
                    self.owned_constraint(i, id).map(|c| {
                        Segment::new(
                            self.points[c.a as usize].position,
                            self.points[c.b as usize].position,
                        )
                    })
                })
            })
            .collect()
    }

    fn owned_constraint(&self, index: usize, id: ConstraintId) -> Option<&DistanceConstraint> {
        self.constraints.get(id).filter(|c| c.a as usize == index)
    }

    /// Swap in new canvas bounds. Points are not moved now; the next
    /// resolution pass clamps them.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), ClothError> {
        validate_canvas(width, height)?;
        self.config.canvas_width = width;
        self.config.canvas_height = height;
        self.bounds = Bounds::from_canvas(width, height);
        Ok(())
    }

    /// Inject an external force into one point for its next integration.
    pub fn apply_force(&mut self, index: usize, force: Vec2) -> Result<(), ClothError> {
        self.check_index(index)?;
        self.points[index].apply_force(force);
        Ok(())
    }

    pub fn pin(&mut self, index: usize, at: Vec2) -> Result<(), ClothError> {
        self.check_index(index)?;
        self.points[index].pin_at(at);
        Ok(())
    }

    pub fn unpin(&mut self, index: usize) -> Result<(), ClothError> {
        self.check_index(index)?;
        self.points[index].unpin();
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), ClothError> {
        if index < self.points.len() {
            Ok(())
        } else {
            Err(ClothError::PointOutOfBounds {
                index,
                count: self.points.len(),
            })
        }
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.cols + x
    }

    pub fn point(&self, index: usize) -> Option<&Point> {
        self.points.get(index)
    }

    pub fn point_at(&self, x: usize, y: usize) -> Option<&Point> {
        if x < self.cols && y < self.rows {
            self.points.get(self.index(x, y))
        } else {
            None
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn constraint(&self, id: ConstraintId) -> Option<&DistanceConstraint> {
        self.constraints.get(id)
    }

    pub fn constraints(&self) -> &ConstraintArena {
        &self.constraints
    }

    pub fn live_constraint_count(&self) -> usize {
        self.constraints.live_count()
    }

    /// Number of live constraints touching the point.
    pub fn incident_count(&self, index: usize) -> usize {
        self.points
            .get(index)
            .map_or(0, |p| p.constraints().len())
    }

    /// The validated configuration. Canvas size changes go through `resize`.
    pub fn config(&self) -> &ClothConfig {
        &self.config
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Points per row.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Points per column.
    pub fn rows(&self) -> usize {
        self.rows
    }
}
