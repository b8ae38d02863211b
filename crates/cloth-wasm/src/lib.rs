use cloth_core::{ClothConfig, ClothError, CutPolicy, PointerButton, Segment, Simulation};
use glam::Vec2;
use wasm_bindgen::prelude::*;

mod canvas;

pub use canvas::ClothCanvas;

/// Simulation parameters as supplied by the page. Mirrors `ClothConfig`
/// plus styling, which only the canvas host reads.
#[wasm_bindgen]
#[derive(Clone)]
pub struct ClothOptions {
    pub width: f32,
    pub height: f32,
    pub cloth_width: u32,
    pub cloth_height: u32,
    pub spacing: f32,
    pub gravity: f32,
    pub mouse_influence: f32,
    pub mouse_cut: f32,
    pub tear_distance: f32,
    pub physics_accuracy: u32,
    /// Secondary button severs nearby edges instead of only overstretched ones.
    pub cut_severs: bool,
    line_color: String,
}

#[wasm_bindgen]
impl ClothOptions {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> ClothOptions {
        let c = ClothConfig::for_canvas(width, height);
        ClothOptions {
            width,
            height,
            cloth_width: c.cloth_width as u32,
            cloth_height: c.cloth_height as u32,
            spacing: c.spacing,
            gravity: c.gravity,
            mouse_influence: c.mouse_influence,
            mouse_cut: c.mouse_cut,
            tear_distance: c.tear_distance,
            physics_accuracy: c.physics_accuracy,
            cut_severs: true,
            line_color: "#888".to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn line_color(&self) -> String {
        self.line_color.clone()
    }

    #[wasm_bindgen(setter)]
    pub fn set_line_color(&mut self, color: String) {
        self.line_color = color;
    }
}

impl ClothOptions {
    pub fn to_config(&self) -> ClothConfig {
        ClothConfig {
            canvas_width: self.width,
            canvas_height: self.height,
            cloth_width: self.cloth_width as usize,
            cloth_height: self.cloth_height as usize,
            spacing: self.spacing,
            gravity: self.gravity,
            mouse_influence: self.mouse_influence,
            mouse_cut: self.mouse_cut,
            tear_distance: self.tear_distance,
            physics_accuracy: self.physics_accuracy,
            cut_policy: if self.cut_severs {
                CutPolicy::Sever
            } else {
                CutPolicy::Overstretched
            },
            ..ClothConfig::default()
        }
    }
}

pub(crate) fn to_js(err: ClothError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Headless cloth for hosts that render the segment buffer themselves.
///
/// After each `step` the buffer holds `segment_count()` segments of four
/// `f32` each: `[x0, y0, x1, y1]`.
#[wasm_bindgen]
pub struct ClothWorld {
    sim: Simulation,
    segments: Vec<Segment>,
}

#[wasm_bindgen]
impl ClothWorld {
    #[wasm_bindgen(constructor)]
    pub fn new(options: &ClothOptions) -> Result<ClothWorld, JsValue> {
        let sim = Simulation::new(options.to_config()).map_err(to_js)?;
        web_sys::console::log_1(
            &format!(
                "ClothWorld created: {} points, {} constraints",
                sim.cloth().points().len(),
                sim.cloth().live_constraint_count()
            )
            .into(),
        );
        let segments = sim.cloth().segments();
        Ok(ClothWorld { sim, segments })
    }

    /// Advance one frame and refresh the segment buffer. Returns the time
    /// spent in milliseconds.
    #[wasm_bindgen]
    pub fn step(&mut self) -> Result<f32, JsValue> {
        let start = js_sys::Date::now();
        self.sim.tick(&mut self.segments).map_err(to_js)?;
        let elapsed = js_sys::Date::now() - start;
        Ok(elapsed as f32)
    }

    #[wasm_bindgen]
    pub fn pointer_down(&mut self, x: f32, y: f32, button: i16) {
        self.sim
            .pointer_down(Vec2::new(x, y), PointerButton::from_dom(button));
    }

    #[wasm_bindgen]
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.sim.pointer_move(Vec2::new(x, y));
    }

    #[wasm_bindgen]
    pub fn pointer_up(&mut self) {
        self.sim.pointer_up();
    }

    #[wasm_bindgen]
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), JsValue> {
        self.sim.resize(width, height).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn stop(&mut self) {
        self.sim.stop();
        self.segments.clear();
    }

    #[wasm_bindgen]
    pub fn get_segment_buffer_ptr(&self) -> *const f32 {
        self.segments.as_ptr() as *const f32
    }

    #[wasm_bindgen]
    pub fn get_segment_buffer_byte_length(&self) -> usize {
        self.segments.len() * std::mem::size_of::<Segment>()
    }

    /// Copy of the segment buffer as a flat `Float32Array`.
    #[wasm_bindgen]
    pub fn segments(&self) -> Vec<f32> {
        bytemuck::cast_slice::<Segment, f32>(&self.segments).to_vec()
    }

    #[wasm_bindgen]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    #[wasm_bindgen]
    pub fn point_count(&self) -> usize {
        self.sim.cloth().points().len()
    }
}
