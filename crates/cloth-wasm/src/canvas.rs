use std::cell::RefCell;
use std::rc::Rc;

use cloth_core::{ClothError, DrawSurface, PointerButton, Simulation};
use glam::Vec2;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    console, CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement, MouseEvent, Window,
};

use crate::{to_js, ClothOptions};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Strokes cloth segments onto a 2D canvas context as a single path.
struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    line_color: String,
}

impl DrawSurface for CanvasSurface {
    fn clear(&mut self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
        self.ctx.begin_path();
    }

    fn line(&mut self, from: Vec2, to: Vec2) {
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
    }

    fn finish(&mut self) {
        self.ctx.set_stroke_style_str(&self.line_color);
        self.ctx.stroke();
    }
}

struct Host {
    sim: Simulation,
    surface: CanvasSurface,
    raf_id: Option<i32>,
}

/// A DOM listener that remembers enough to remove itself.
struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }

    fn detach(&self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

/// Self-driving cloth bound to a canvas element.
///
/// `start` wires pointer and resize listeners and begins a
/// `requestAnimationFrame` loop; `stop` cancels the loop and removes every
/// listener. Dropping the object stops it as well.
#[wasm_bindgen]
pub struct ClothCanvas {
    window: Window,
    canvas: HtmlCanvasElement,
    host: Rc<RefCell<Host>>,
    frame: FrameCallback,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl ClothCanvas {
    /// Size the canvas, acquire its 2D context and build the cloth.
    /// Failing to get a context is fatal and reported once.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, options: &ClothOptions) -> Result<ClothCanvas, JsValue> {
        let window = web_sys::window().ok_or_else(|| {
            to_js(ClothError::SurfaceUnavailable("no global window".to_string()))
        })?;

        canvas.set_width(options.width as u32);
        canvas.set_height(options.height as u32);

        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok());
        let Some(ctx) = ctx else {
            let err = ClothError::SurfaceUnavailable("canvas has no 2d context".to_string());
            console::error_1(&err.to_string().into());
            return Err(to_js(err));
        };

        let sim = Simulation::new(options.to_config()).map_err(to_js)?;
        console::log_1(
            &format!(
                "ClothCanvas created: {}x{} canvas, {} points",
                options.width,
                options.height,
                sim.cloth().points().len()
            )
            .into(),
        );

        let surface = CanvasSurface {
            canvas: canvas.clone(),
            ctx,
            line_color: options.line_color(),
        };

        Ok(ClothCanvas {
            window,
            canvas,
            host: Rc::new(RefCell::new(Host {
                sim,
                surface,
                raf_id: None,
            })),
            frame: Rc::new(RefCell::new(None)),
            listeners: Vec::new(),
        })
    }

    /// Register listeners and schedule the first frame. Calling it again
    /// while running does nothing.
    #[wasm_bindgen]
    pub fn start(&mut self) -> Result<(), JsValue> {
        if self.frame.borrow().is_some() {
            return Ok(());
        }
        if !self.host.borrow().sim.is_running() {
            return Err(to_js(ClothError::Stopped));
        }

        self.register_listeners()?;

        let host = self.host.clone();
        let frame = self.frame.clone();
        let window = self.window.clone();
        *self.frame.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |_timestamp: f64| {
            let mut h = host.borrow_mut();
            h.raf_id = None;
            let ticked = {
                let Host { sim, surface, .. } = &mut *h;
                sim.tick(surface).is_ok()
            };
            // A frame queued before teardown lands here and stops.
            if ticked {
                h.raf_id = request_frame(&window, &frame);
            }
        }));

        let id = request_frame(&self.window, &self.frame);
        self.host.borrow_mut().raf_id = id;
        console::log_1(&"ClothCanvas started".into());
        Ok(())
    }

    /// Tear down: cancel the pending frame, remove all listeners and stop the
    /// simulation for good.
    #[wasm_bindgen]
    pub fn stop(&mut self) {
        {
            let mut h = self.host.borrow_mut();
            if let Some(id) = h.raf_id.take() {
                let _ = self.window.cancel_animation_frame(id);
            }
            h.sim.stop();
        }
        for listener in self.listeners.drain(..) {
            listener.detach();
        }
        // Dropping the frame closure breaks its reference cycle.
        let had_frame = self.frame.borrow_mut().take().is_some();
        if had_frame {
            console::log_1(&"ClothCanvas stopped".into());
        }
    }

    #[wasm_bindgen]
    pub fn is_running(&self) -> bool {
        self.host.borrow().sim.is_running()
    }

    #[wasm_bindgen]
    pub fn frame_count(&self) -> f64 {
        self.host.borrow().sim.frame() as f64
    }
}

impl ClothCanvas {
    fn register_listeners(&mut self) -> Result<(), JsValue> {
        let target: &EventTarget = self.canvas.as_ref();

        let host = self.host.clone();
        let canvas = self.canvas.clone();
        self.listeners.push(Listener::attach(target, "mousedown", move |e: Event| {
            if let Some(e) = e.dyn_ref::<MouseEvent>() {
                let pos = local_position(&canvas, e);
                host.borrow_mut()
                    .sim
                    .pointer_down(pos, PointerButton::from_dom(e.button()));
            }
        })?);

        let host = self.host.clone();
        let canvas = self.canvas.clone();
        self.listeners.push(Listener::attach(target, "mousemove", move |e: Event| {
            if let Some(e) = e.dyn_ref::<MouseEvent>() {
                host.borrow_mut().sim.pointer_move(local_position(&canvas, e));
            }
        })?);

        let host = self.host.clone();
        self.listeners.push(Listener::attach(target, "mouseup", move |_e: Event| {
            host.borrow_mut().sim.pointer_up();
        })?);

        let host = self.host.clone();
        self.listeners.push(Listener::attach(target, "mouseleave", move |_e: Event| {
            host.borrow_mut().sim.pointer_leave();
        })?);

        // The secondary button cuts, so keep the browser menu out of the way.
        self.listeners.push(Listener::attach(target, "contextmenu", |e: Event| {
            e.prevent_default();
        })?);

        let host = self.host.clone();
        let canvas = self.canvas.clone();
        let window = self.window.clone();
        let window_target: &EventTarget = self.window.as_ref();
        self.listeners.push(Listener::attach(
            window_target,
            "resize",
            move |_e: Event| {
                let (Some(w), Some(h)) = (
                    window.inner_width().ok().and_then(|v| v.as_f64()),
                    window.inner_height().ok().and_then(|v| v.as_f64()),
                ) else {
                    return;
                };
                canvas.set_width(w as u32);
                canvas.set_height(h as u32);
                if let Err(err) = host.borrow_mut().sim.resize(w as f32, h as f32) {
                    console::error_1(&err.to_string().into());
                }
            },
        )?);

        Ok(())
    }
}

impl Drop for ClothCanvas {
    fn drop(&mut self) {
        self.stop();
    }
}

fn request_frame(window: &Window, frame: &FrameCallback) -> Option<i32> {
    frame
        .borrow()
        .as_ref()
        .and_then(|cb| window.request_animation_frame(cb.as_ref().unchecked_ref()).ok())
}

/// Client coordinates to canvas-local simulation coordinates.
fn local_position(canvas: &HtmlCanvasElement, e: &MouseEvent) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    Vec2::new(
        (e.client_x() as f64 - rect.left()) as f32,
        (e.client_y() as f64 - rect.top()) as f32,
    )
}
