//! Sensor icon cache.
//!
//! Both icons are created once when the engine is built and reused by every
//! frame. Decoding is asynchronous; until an icon is ready (or if it fails to
//! load at all) the renderer falls back to a flat placeholder square.

#[cfg(test)]
#[path = "sprites_test.rs"]
mod sprites_test;

use wasm_bindgen::JsValue;
use web_sys::HtmlImageElement;

/// Icon file drawn for a disabled sensor.
pub const SPRITE_OFF: &str = "sensor.png";
/// Icon file drawn for an enabled sensor.
pub const SPRITE_ON: &str = "sensor_on.png";

/// The two preloaded sensor icons, keyed by enabled state.
pub struct SpriteSet {
    off: HtmlImageElement,
    on: HtmlImageElement,
}

impl SpriteSet {
    /// Start loading both icons from `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if an image element cannot be created.
    pub fn load(base_url: &str) -> Result<Self, JsValue> {
        let off = HtmlImageElement::new()?;
        off.set_src(&sprite_url(base_url, false));
        let on = HtmlImageElement::new()?;
        on.set_src(&sprite_url(base_url, true));
        Ok(Self { off, on })
    }

    #[must_use]
    pub fn image(&self, enabled: bool) -> &HtmlImageElement {
        if enabled { &self.on } else { &self.off }
    }

    /// Whether the icon for `enabled` has finished decoding successfully.
    #[must_use]
    pub fn is_ready(&self, enabled: bool) -> bool {
        let image = self.image(enabled);
        image.complete() && image.natural_width() > 0
    }

    /// Register a callback fired when either icon finishes loading.
    pub fn on_ready(&self, callback: &js_sys::Function) {
        self.off.set_onload(Some(callback));
        self.on.set_onload(Some(callback));
    }
}

/// URL of the icon for `enabled` under `base_url`.
#[must_use]
pub fn sprite_url(base_url: &str, enabled: bool) -> String {
    let file = if enabled { SPRITE_ON } else { SPRITE_OFF };
    let base = base_url.trim_end_matches('/');
    if base.is_empty() { file.to_owned() } else { format!("{base}/{file}") }
}
