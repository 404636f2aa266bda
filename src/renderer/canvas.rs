//! Canvas 2D backend

use std::collections::HashMap;

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::surface::{Camera, Color, Rect, Sprite, Surface};

/// `Surface` over a `<canvas>` 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    images: HashMap<Sprite, HtmlImageElement>,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;
        Ok(Self {
            canvas,
            ctx,
            images: HashMap::new(),
        })
    }

    /// Start loading a sprite image; it is skipped while still loading
    pub fn load_sprite(&mut self, sprite: Sprite, width: u32, height: u32) -> Result<(), JsValue> {
        let image = HtmlImageElement::new_with_width_and_height(width, height)?;
        image.set_src(sprite.src());
        self.images.insert(sprite, image);
        Ok(())
    }

    /// Resize the backing store to `ratio` times the CSS size
    pub fn resize(&self, css_width: f64, css_height: f64, ratio: f64) {
        self.canvas.set_width((css_width * ratio) as u32);
        self.canvas.set_height((css_height * ratio) as u32);
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{}px", css_width));
        let _ = style.set_property("height", &format!("{}px", css_height));
        let _ = style.set_property("display", "block");
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Vec2 {
        Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn begin_frame(&mut self, camera: &Camera) {
        let size = self.size();
        let _ = self.ctx.reset_transform();
        self.ctx.clear_rect(0.0, 0.0, size.x as f64, size.y as f64);
        let _ = self
            .ctx
            .translate(camera.origin.x as f64, camera.origin.y as f64);
        let _ = self.ctx.scale(camera.zoom as f64, camera.zoom as f64);
    }

    fn fill_rect(&mut self, color: Color, rect: Rect) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(
            rect.min.x as f64,
            rect.min.y as f64,
            rect.size.x as f64,
            rect.size.y as f64,
        );
    }

    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect, opacity: f32) {
        let Some(image) = self.images.get(&sprite) else {
            return;
        };
        if !image.complete() {
            return;
        }
        self.ctx.set_global_alpha(opacity as f64);
        let _ = self
            .ctx
            .draw_image_with_html_image_element_and_dw_and_dh(
                image,
                rect.min.x as f64,
                rect.min.y as f64,
                rect.size.x as f64,
                rect.size.y as f64,
            );
        self.ctx.set_global_alpha(1.0);
    }
}
