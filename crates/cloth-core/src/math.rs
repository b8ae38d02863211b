use glam::Vec2;

/// Closed rectangle that points are clamped into after each resolution pass.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    /// The canvas rectangle shrunk by one unit on every side.
    pub fn from_canvas(width: f32, height: f32) -> Self {
        Self {
            min: Vec2::ONE,
            max: Vec2::new(width - 1.0, height - 1.0),
        }
    }

    #[inline]
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        p.max(self.min).min(self.max)
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}
