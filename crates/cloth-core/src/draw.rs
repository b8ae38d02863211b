use glam::Vec2;

/// One line segment of cloth output, laid out for direct upload or export:
/// 16 bytes, `[x0, y0, x1, y1]`.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Segment {
    pub from: [f32; 2],
    pub to: [f32; 2],
}

impl Segment {
    pub fn new(from: Vec2, to: Vec2) -> Self {
        Self {
            from: from.to_array(),
            to: to.to_array(),
        }
    }

    pub fn from_vec(&self) -> Vec2 {
        Vec2::from_array(self.from)
    }

    pub fn to_vec(&self) -> Vec2 {
        Vec2::from_array(self.to)
    }
}

/// Anything the cloth can draw its constraints onto.
pub trait DrawSurface {
    /// Called once at the start of each frame.
    fn clear(&mut self) {}

    fn line(&mut self, from: Vec2, to: Vec2);

    /// Called once after every segment of the frame has been emitted.
    fn finish(&mut self) {}
}

/// Collects segments in emission order.
impl DrawSurface for Vec<Segment> {
    fn clear(&mut self) {
        Vec::clear(self);
    }

    fn line(&mut self, from: Vec2, to: Vec2) {
        self.push(Segment::new(from, to));
    }
}
