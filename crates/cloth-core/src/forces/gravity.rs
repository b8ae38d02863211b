use glam::Vec2;

/// Constant downward force. Simulation space has y growing downward, like the
/// canvas it is drawn on.
#[inline]
pub fn gravity_force(gravity: f32) -> Vec2 {
    Vec2::new(0.0, gravity)
}
