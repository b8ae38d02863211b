use crate::cloth::Cloth;
use crate::config::ClothConfig;
use crate::draw::DrawSurface;
use crate::error::ClothError;
use crate::forces::pointer::{InputMode, PointerButton, PointerState};
use glam::Vec2;

/// Host-independent frame driver.
///
/// Owns the cloth and the pointer state, turns raw pointer events into the
/// idle / dragging / cutting state machine and runs one update-then-draw
/// cycle per tick. Once stopped it never runs physics again.
pub struct Simulation {
    cloth: Cloth,
    pointer: PointerState,
    running: bool,
    frame: u64,
}

impl Simulation {
    pub fn new(config: ClothConfig) -> Result<Self, ClothError> {
        Ok(Self::from_cloth(Cloth::new(config)?))
    }

    pub fn from_cloth(cloth: Cloth) -> Self {
        Self {
            cloth,
            pointer: PointerState::default(),
            running: true,
            frame: 0,
        }
    }

    /// Press: enter dragging or cutting depending on the button.
    pub fn pointer_down(&mut self, position: Vec2, button: PointerButton) {
        if !self.running {
            return;
        }
        self.pointer = PointerState::held(position, button);
    }

    /// Move: track the position in whatever state we are in.
    pub fn pointer_move(&mut self, position: Vec2) {
        if !self.running {
            return;
        }
        self.pointer.position = position;
    }

    /// Release: back to idle.
    pub fn pointer_up(&mut self) {
        self.pointer.button = None;
    }

    /// Leaving the surface or cancelling counts as a release.
    pub fn pointer_leave(&mut self) {
        self.pointer_up();
    }

    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), ClothError> {
        if !self.running {
            return Err(ClothError::Stopped);
        }
        self.cloth.resize(width, height)
    }

    /// One frame: clear the surface, advance the cloth, redraw.
    pub fn tick<S: DrawSurface + ?Sized>(&mut self, surface: &mut S) -> Result<(), ClothError> {
        if !self.running {
            return Err(ClothError::Stopped);
        }
        surface.clear();
        self.cloth.update(&self.pointer);
        self.cloth.draw(surface);
        surface.finish();
        self.frame += 1;
        Ok(())
    }

    /// Tear down. Irreversible: later ticks fail and input is ignored.
    pub fn stop(&mut self) {
        self.running = false;
        self.pointer = PointerState::default();
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn mode(&self) -> InputMode {
        self.pointer.mode()
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    /// Frames completed so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn cloth(&self) -> &Cloth {
        &self.cloth
    }

    pub fn cloth_mut(&mut self) -> &mut Cloth {
        &mut self.cloth
    }
}
