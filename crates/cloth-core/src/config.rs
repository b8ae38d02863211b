use crate::error::ClothError;

/// How the secondary (cut) button treats constraints near the pointer.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum CutPolicy {
    /// Tear incident constraints whose current length exceeds the tear
    /// distance. Mostly tears edges that were about to tear anyway.
    #[default]
    Overstretched,
    /// Tear every incident constraint that is still within the tear distance,
    /// severing the point from its neighbours like scissors.
    Sever,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClothConfig {
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Grid cells across; the grid has `cloth_width + 1` columns of points.
    pub cloth_width: usize,
    /// Grid cells down; the grid has `cloth_height + 1` rows of points.
    pub cloth_height: usize,
    pub spacing: f32,
    pub start_y: f32,
    /// Downward force added to every point each step (y grows downward).
    pub gravity: f32,
    pub mouse_influence: f32,
    pub mouse_cut: f32,
    pub tear_distance: f32,
    /// Constraint relaxation passes per frame.
    pub physics_accuracy: u32,
    /// Velocity retention per step (air drag).
    pub damping: f32,
    /// Fixed nominal step used by `Cloth::update`.
    pub time_step: f32,
    pub cut_policy: CutPolicy,
}

impl Default for ClothConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 600.0,
            cloth_width: 50,
            cloth_height: 30,
            spacing: 12.0,
            start_y: 10.0,
            gravity: 1200.0,
            mouse_influence: 30.0,
            mouse_cut: 15.0,
            tear_distance: 60.0,
            physics_accuracy: 3,
            damping: 0.99,
            time_step: 0.016,
            cut_policy: CutPolicy::Overstretched,
        }
    }
}

impl ClothConfig {
    /// Defaults sized to a canvas: one grid cell per 14 units of width, 60 rows.
    pub fn for_canvas(width: f32, height: f32) -> Self {
        Self {
            canvas_width: width,
            canvas_height: height,
            cloth_width: (width / 14.0).floor().max(1.0) as usize,
            cloth_height: 60,
            ..Self::default()
        }
    }

    /// Check every parameter before any topology is built.
    pub fn validate(&self) -> Result<(), ClothError> {
        validate_canvas(self.canvas_width, self.canvas_height)?;
        if self.point_count().is_none() {
            return Err(ClothError::InvalidGridDimensions {
                width: self.cloth_width,
                height: self.cloth_height,
            });
        }
        if !(self.spacing.is_finite() && self.spacing > 0.0) {
            return Err(ClothError::InvalidSpacing(self.spacing));
        }
        if !(self.tear_distance.is_finite() && self.tear_distance > 0.0) {
            return Err(ClothError::InvalidTearDistance(self.tear_distance));
        }
        for radius in [self.mouse_influence, self.mouse_cut] {
            if !(radius.is_finite() && radius >= 0.0) {
                return Err(ClothError::InvalidRadius(radius));
            }
        }
        if self.physics_accuracy == 0 {
            return Err(ClothError::InvalidIterations);
        }
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(ClothError::InvalidDamping(self.damping));
        }
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(ClothError::InvalidTimeStep(self.time_step));
        }
        if !self.gravity.is_finite() {
            return Err(ClothError::InvalidGravity(self.gravity));
        }
        Ok(())
    }

    /// Points in the lattice, or `None` if the grid is empty or too large
    /// for 32-bit point and constraint handles. A lattice of `n` points has
    /// fewer than `2 * n` constraints.
    pub fn point_count(&self) -> Option<usize> {
        if self.cloth_width == 0 || self.cloth_height == 0 {
            return None;
        }
        let cols = self.cloth_width.checked_add(1)?;
        let rows = self.cloth_height.checked_add(1)?;
        let n = cols.checked_mul(rows)?;
        let constraints = n.checked_mul(2)?;
        u32::try_from(constraints).ok().map(|_| n)
    }
}

pub(crate) fn validate_canvas(width: f32, height: f32) -> Result<(), ClothError> {
    if width.is_finite() && height.is_finite() && width > 2.0 && height > 2.0 {
        Ok(())
    } else {
        Err(ClothError::InvalidCanvas { width, height })
    }
}
