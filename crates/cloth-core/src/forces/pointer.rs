use glam::Vec2;

/// Which pointer button is held.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PointerButton {
    /// Drag (DOM button 0).
    Primary,
    /// Cut (DOM button 2).
    Secondary,
    /// Any other button: tracked as held, but has no effect on the cloth.
    Other(u16),
}

impl PointerButton {
    /// Map a DOM `MouseEvent.button` id.
    pub fn from_dom(button: i16) -> Self {
        match button {
            0 => PointerButton::Primary,
            2 => PointerButton::Secondary,
            other => PointerButton::Other(other.max(0) as u16),
        }
    }
}

/// Logical input state derived from the pointer.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InputMode {
    Idle,
    Dragging,
    Cutting,
}

/// Pointer state handed to every tick. Positions are already in simulation space.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct PointerState {
    pub position: Vec2,
    /// `Some` while a button is held.
    pub button: Option<PointerButton>,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            button: None,
        }
    }
}

impl PointerState {
    pub fn held(position: Vec2, button: PointerButton) -> Self {
        Self {
            position,
            button: Some(button),
        }
    }

    pub fn is_held(&self) -> bool {
        self.button.is_some()
    }

    pub fn mode(&self) -> InputMode {
        match self.button {
            Some(PointerButton::Primary) => InputMode::Dragging,
            Some(PointerButton::Secondary) => InputMode::Cutting,
            _ => InputMode::Idle,
        }
    }
}

/// What the pointer does to one point this step.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum PointerInfluence {
    None,
    /// Bias the point's implied velocity toward this position.
    Pull(Vec2),
    /// Tear qualifying incident constraints.
    Cut,
}

/// Decide the pointer's effect on a point at `pos`.
///
/// Drag applies strictly inside `influence_radius`, cut strictly inside
/// `cut_radius`; a point exactly on the boundary is untouched.
pub fn pointer_influence(
    pos: Vec2,
    pointer: &PointerState,
    influence_radius: f32,
    cut_radius: f32,
) -> PointerInfluence {
    let Some(button) = pointer.button else {
        return PointerInfluence::None;
    };
    let dist = pos.distance(pointer.position);

    match button {
        PointerButton::Primary if dist < influence_radius => {
            PointerInfluence::Pull(pointer.position)
        }
        PointerButton::Secondary if dist < cut_radius => PointerInfluence::Cut,
        _ => PointerInfluence::None,
    }
}
