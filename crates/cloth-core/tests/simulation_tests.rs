use glam::Vec2;
use cloth_core::config::ClothConfig;
use cloth_core::draw::{DrawSurface, Segment};
use cloth_core::error::ClothError;
use cloth_core::forces::pointer::{InputMode, PointerButton};
use cloth_core::simulation::Simulation;

fn small_sim() -> Simulation {
    Simulation::new(ClothConfig {
        cloth_width: 4,
        cloth_height: 4,
        spacing: 10.0,
        ..ClothConfig::default()
    })
    .expect("valid config")
}

/// Records the call sequence a host canvas would see.
#[derive(Default)]
struct RecordingSurface {
    clears: usize,
    finishes: usize,
    lines: Vec<Segment>,
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self) {
        self.clears += 1;
        self.lines.clear();
    }

    fn line(&mut self, from: Vec2, to: Vec2) {
        self.lines.push(Segment::new(from, to));
    }

    fn finish(&mut self) {
        self.finishes += 1;
    }
}

#[test]
fn test_input_state_machine_transitions() {
    let mut sim = small_sim();
    assert_eq!(sim.mode(), InputMode::Idle);

    sim.pointer_down(Vec2::new(10.0, 10.0), PointerButton::Primary);
    assert_eq!(sim.mode(), InputMode::Dragging);

    sim.pointer_move(Vec2::new(20.0, 30.0));
    assert_eq!(sim.mode(), InputMode::Dragging, "move keeps the current state");
    assert_eq!(sim.pointer().position, Vec2::new(20.0, 30.0));

    sim.pointer_up();
    assert_eq!(sim.mode(), InputMode::Idle);

    sim.pointer_move(Vec2::new(5.0, 5.0));
    assert_eq!(sim.mode(), InputMode::Idle);
    assert_eq!(sim.pointer().position, Vec2::new(5.0, 5.0), "idle moves are tracked too");

    sim.pointer_down(Vec2::new(1.0, 1.0), PointerButton::Secondary);
    assert_eq!(sim.mode(), InputMode::Cutting);

    sim.pointer_leave();
    assert_eq!(sim.mode(), InputMode::Idle, "leaving the surface releases the pointer");
}

#[test]
fn test_tick_clears_updates_and_draws() {
    let mut sim = small_sim();
    let mut surface = RecordingSurface::default();

    for _ in 0..3 {
        sim.tick(&mut surface).unwrap();
    }

    assert_eq!(sim.frame(), 3);
    assert_eq!(surface.clears, 3);
    assert_eq!(surface.finishes, 3);
    assert_eq!(surface.lines.len(), sim.cloth().live_constraint_count());
    assert_eq!(surface.lines, sim.cloth().segments(), "surface holds the latest frame only");
}

#[test]
fn test_tick_into_segment_buffer() {
    let mut sim = small_sim();
    let mut buffer: Vec<Segment> = Vec::new();
    sim.tick(&mut buffer).unwrap();
    sim.tick(&mut buffer).unwrap();
    assert_eq!(buffer.len(), 40, "buffer is cleared between frames");
}

#[test]
fn test_stop_blocks_further_ticks() {
    let mut sim = small_sim();
    let mut surface = RecordingSurface::default();
    sim.tick(&mut surface).unwrap();

    sim.stop();
    assert!(!sim.is_running());

    let before: Vec<Vec2> = sim.cloth().points().iter().map(|p| p.position).collect();
    assert_eq!(sim.tick(&mut surface), Err(ClothError::Stopped));
    let after: Vec<Vec2> = sim.cloth().points().iter().map(|p| p.position).collect();

    assert_eq!(before, after, "no physics after teardown");
    assert_eq!(sim.frame(), 1);
    assert_eq!(surface.clears, 1, "surface untouched after teardown");
}

#[test]
fn test_input_ignored_after_stop() {
    let mut sim = small_sim();
    sim.stop();
    sim.pointer_down(Vec2::new(10.0, 10.0), PointerButton::Secondary);
    assert_eq!(sim.mode(), InputMode::Idle);
    assert_eq!(sim.resize(100.0, 100.0), Err(ClothError::Stopped));
}

#[test]
fn test_resize_passes_through_to_cloth() {
    let mut sim = small_sim();
    sim.resize(300.0, 200.0).unwrap();
    assert_eq!(sim.cloth().bounds().max, Vec2::new(299.0, 199.0));
    assert!(sim.resize(-1.0, 200.0).is_err());
}

#[test]
fn test_drag_through_simulation_moves_cloth() {
    let mut sim = small_sim();
    let idx = sim.cloth().index(2, 4);
    let start = sim.cloth().point(idx).unwrap().position;
    let mut buffer: Vec<Segment> = Vec::new();

    sim.pointer_down(start, PointerButton::Primary);
    for step in 1..=20 {
        sim.pointer_move(start + Vec2::new(step as f32, 0.0));
        sim.tick(&mut buffer).unwrap();
    }
    sim.pointer_up();

    let end = sim.cloth().point(idx).unwrap().position;
    assert!(
        end.x > start.x + 5.0,
        "dragged point should follow to the right: {start:?} -> {end:?}"
    );
}
