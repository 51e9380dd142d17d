//! Rendering: draws the full editor scene onto a 2D surface.
//!
//! `draw` receives read-only views of document and UI state and produces
//! pixels; it never mutates application state. Drawing goes through the
//! [`Surface`] trait so the frame layout can be checked without a browser.
//! [`CanvasSurface`] is the only place that touches
//! [`web_sys::CanvasRenderingContext2d`].
//!
//! Frame order is fixed: clear, grid, scale caption, every sensor icon (with
//! selection border and name label), every field-of-view wedge, then the
//! intruder marker. Wedges are semi-transparent, so icons stay visible
//! beneath them.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::consts::{
    FOV_FILL, FOV_TRIGGERED_FILL, GRID_SCALE_PX_PER_M, GRID_STROKE, INTRUDER_FILL, INTRUDER_RADIUS_PX, LABEL_COLOR,
    LABEL_FONT, PLACEHOLDER_OFF_FILL, PLACEHOLDER_ON_FILL, SCALE_CAPTION, SCALE_FONT, SELECTION_LINE_WIDTH,
    SELECTION_STROKE, SENSOR_SIZE_PX,
};
use crate::doc::SensorDoc;
use crate::geometry::{self, Point, Rect, Wedge};
use crate::input::UiState;
use crate::sprites::SpriteSet;

/// Gap between the top of an icon and the baseline of its name label.
const LABEL_GAP_PX: f64 = 4.0;
/// Inset of the scale caption from the bottom-left corner.
const CAPTION_INSET_PX: f64 = 8.0;

/// Horizontal anchor for [`Surface::text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

impl TextAlign {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
        }
    }
}

/// Primitive drawing operations needed by one frame.
pub trait Surface {
    type Error;

    fn clear(&mut self, width: f64, height: f64) -> Result<(), Self::Error>;
    fn line(&mut self, from: Point, to: Point, stroke: &str, width: f64) -> Result<(), Self::Error>;
    fn stroke_rect(&mut self, rect: Rect, stroke: &str, width: f64) -> Result<(), Self::Error>;
    fn fill_rect(&mut self, rect: Rect, fill: &str) -> Result<(), Self::Error>;
    fn fill_circle(&mut self, center: Point, radius: f64, fill: &str) -> Result<(), Self::Error>;
    fn wedge(&mut self, wedge: &Wedge, fill: &str) -> Result<(), Self::Error>;
    fn text(&mut self, text: &str, at: Point, font: &str, fill: &str, align: TextAlign) -> Result<(), Self::Error>;

    /// Draw the icon for `enabled` centered at `center`, rotated clockwise by
    /// `rotation_rad`. Returns `Ok(false)` when the icon is not available.
    fn sprite(&mut self, enabled: bool, center: Point, size: f64, rotation_rad: f64) -> Result<bool, Self::Error>;
}

/// Draw the full scene.
///
/// `width` and `height` are the surface size in CSS pixels.
///
/// # Errors
///
/// Returns the surface's error if any primitive fails.
pub fn draw<S: Surface>(
    surface: &mut S,
    doc: &SensorDoc,
    ui: &UiState,
    width: f64,
    height: f64,
) -> Result<(), S::Error> {
    surface.clear(width, height)?;
    draw_grid(surface, width, height)?;
    surface.text(
        SCALE_CAPTION,
        Point::new(CAPTION_INSET_PX, height - CAPTION_INSET_PX),
        SCALE_FONT,
        LABEL_COLOR,
        TextAlign::Left,
    )?;

    for sensor in doc.iter() {
        draw_icon(surface, sensor)?;
        if ui.selected_id == Some(sensor.id) {
            surface.stroke_rect(geometry::icon_rect(sensor), SELECTION_STROKE, SELECTION_LINE_WIDTH)?;
        }
        if !sensor.name.is_empty() {
            let center = geometry::icon_center(sensor);
            let at = Point::new(center.x, sensor.y - LABEL_GAP_PX);
            surface.text(&sensor.name, at, LABEL_FONT, LABEL_COLOR, TextAlign::Center)?;
        }
    }

    for sensor in doc.iter() {
        let Some(wedge) = geometry::fov_wedge(sensor) else {
            continue;
        };
        let triggered = doc
            .intruder
            .is_some_and(|intruder| geometry::is_triggered(sensor, intruder));
        surface.wedge(&wedge, if triggered { FOV_TRIGGERED_FILL } else { FOV_FILL })?;
    }

    if let Some(intruder) = doc.intruder {
        surface.fill_circle(intruder, INTRUDER_RADIUS_PX, INTRUDER_FILL)?;
    }

    Ok(())
}

fn draw_grid<S: Surface>(surface: &mut S, width: f64, height: f64) -> Result<(), S::Error> {
    let mut x = 0.0;
    while x <= width {
        surface.line(Point::new(x, 0.0), Point::new(x, height), GRID_STROKE, 1.0)?;
        x += GRID_SCALE_PX_PER_M;
    }
    let mut y = 0.0;
    while y <= height {
        surface.line(Point::new(0.0, y), Point::new(width, y), GRID_STROKE, 1.0)?;
        y += GRID_SCALE_PX_PER_M;
    }
    Ok(())
}

fn draw_icon<S: Surface>(surface: &mut S, sensor: &sensors::Sensor) -> Result<(), S::Error> {
    let center = geometry::icon_center(sensor);
    let rotation = if sensor.angle.is_finite() { sensor.angle.to_radians() } else { 0.0 };
    if surface.sprite(sensor.is_enabled, center, SENSOR_SIZE_PX, rotation)? {
        return Ok(());
    }
    let fill = if sensor.is_enabled { PLACEHOLDER_ON_FILL } else { PLACEHOLDER_OFF_FILL };
    surface.fill_rect(geometry::icon_rect(sensor), fill)
}

// =============================================================
// Browser surface
// =============================================================

/// [`Surface`] over a browser 2D context and the preloaded icon set.
pub struct CanvasSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
    sprites: &'a SpriteSet,
}

impl<'a> CanvasSurface<'a> {
    #[must_use]
    pub fn new(ctx: &'a CanvasRenderingContext2d, sprites: &'a SpriteSet) -> Self {
        Self { ctx, sprites }
    }
}

impl Surface for CanvasSurface<'_> {
    type Error = JsValue;

    fn clear(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        self.ctx.clear_rect(0.0, 0.0, width, height);
        Ok(())
    }

    fn line(&mut self, from: Point, to: Point, stroke: &str, width: f64) -> Result<(), JsValue> {
        self.ctx.begin_path();
        self.ctx.set_stroke_style_str(stroke);
        self.ctx.set_line_width(width);
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &str, width: f64) -> Result<(), JsValue> {
        self.ctx.set_stroke_style_str(stroke);
        self.ctx.set_line_width(width);
        self.ctx.stroke_rect(rect.x, rect.y, rect.width, rect.height);
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, fill: &str) -> Result<(), JsValue> {
        self.ctx.set_fill_style_str(fill);
        self.ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
        Ok(())
    }

    fn fill_circle(&mut self, center: Point, radius: f64, fill: &str) -> Result<(), JsValue> {
        self.ctx.begin_path();
        self.ctx.arc(center.x, center.y, radius, 0.0, std::f64::consts::TAU)?;
        self.ctx.set_fill_style_str(fill);
        self.ctx.fill();
        Ok(())
    }

    fn wedge(&mut self, wedge: &Wedge, fill: &str) -> Result<(), JsValue> {
        self.ctx.begin_path();
        self.ctx.move_to(wedge.origin.x, wedge.origin.y);
        self.ctx
            .arc(wedge.origin.x, wedge.origin.y, wedge.radius_px, wedge.start_rad, wedge.end_rad)?;
        self.ctx.close_path();
        self.ctx.set_fill_style_str(fill);
        self.ctx.fill();
        Ok(())
    }

    fn text(&mut self, text: &str, at: Point, font: &str, fill: &str, align: TextAlign) -> Result<(), JsValue> {
        self.ctx.set_font(font);
        self.ctx.set_fill_style_str(fill);
        self.ctx.set_text_align(align.as_str());
        self.ctx.set_text_baseline("alphabetic");
        self.ctx.fill_text(text, at.x, at.y)
    }

    fn sprite(&mut self, enabled: bool, center: Point, size: f64, rotation_rad: f64) -> Result<bool, JsValue> {
        if !self.sprites.is_ready(enabled) {
            return Ok(false);
        }
        self.ctx.save();
        self.ctx.translate(center.x, center.y)?;
        self.ctx.rotate(rotation_rad)?;
        let drawn = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            self.sprites.image(enabled),
            -size / 2.0,
            -size / 2.0,
            size,
            size,
        );
        self.ctx.restore();
        drawn.map(|()| true)
    }
}
