/// SL3D Web - canvas front end for the software renderer
///
/// Renders frames on the CPU with `sl3d-core` and blits them into a 2D canvas
/// through `putImageData`. Key handling takes DOM `KeyboardEvent.code` names.

use sl3d_core::{
    obj, Action, Compositor, Mesh, PixelBuffer, RenderConfig, RenderMode, RenderState,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

#[wasm_bindgen]
pub struct WebRenderer {
    state: RenderState,
    compositor: Compositor,
    frame_count: u32,
}

impl WebRenderer {
    fn with_mesh(mesh: Mesh) -> Self {
        let config = RenderConfig::default();
        Self {
            state: RenderState::new(mesh, &config),
            compositor: Compositor::new(&config),
            frame_count: 0,
        }
    }

    fn next_frame(&mut self) -> PixelBuffer {
        self.frame_count = self.frame_count.wrapping_add(1);
        self.state.frame(&self.compositor)
    }
}

#[wasm_bindgen]
impl WebRenderer {
    /// Build a renderer from mesh text, or around the sample cube when none is given
    #[wasm_bindgen(constructor)]
    pub fn new(mesh_text: Option<String>) -> Result<WebRenderer, JsValue> {
        let mesh = match mesh_text {
            Some(text) => obj::parse_obj(&text).map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => Mesh::sample_cube(),
        };
        Ok(Self::with_mesh(mesh))
    }

    /// Apply the action bound to a key code. Returns false for unbound keys.
    pub fn handle_key(&mut self, code: &str) -> bool {
        match code.parse::<Action>() {
            Ok(action) => {
                self.state.apply(action);
                true
            }
            Err(_) => false,
        }
    }

    pub fn toggle_wireframe(&mut self) {
        self.state.toggle_wireframe();
    }

    pub fn is_wireframe(&self) -> bool {
        self.state.mode == RenderMode::Wireframe
    }

    /// Render a frame and return its RGBA bytes
    pub fn render(&mut self) -> Vec<u8> {
        self.next_frame().into_bytes()
    }

    /// Render a frame straight into the canvas with the given element id
    pub fn present(&mut self, canvas_id: &str) -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("canvas `{}` not found", canvas_id)))?
            .dyn_into::<HtmlCanvasElement>()?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let frame = self.next_frame();
        let image = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(frame.as_bytes()),
            frame.width() as u32,
            frame.height() as u32,
        )?;
        ctx.put_image_data(&image, 0.0, 0.0)
    }

    /// Frames rendered since the last call; the page samples this once per second
    pub fn take_frame_count(&mut self) -> u32 {
        std::mem::take(&mut self.frame_count)
    }
}
