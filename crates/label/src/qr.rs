//! Identifier graphics.

use labelgrid_doc::ImageData;
use qrcode::QrCode;
use std::collections::HashMap;
use std::sync::Arc;

/// Modules of light margin around the symbol.
const QUIET_ZONE: usize = 4;

/// QR graphics keyed by encoded text, kept for one page render.
///
/// The controller creates one cache per chunk and drops it with the page,
/// so nothing outlives the page it was drawn for.
#[derive(Debug, Default)]
pub struct QrCache {
    entries: HashMap<String, Option<ImageData>>,
    generated: usize,
}

impl QrCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The graphic for `text`, drawn `size` points square. Empty text or an
    /// encoding failure yields `None`.
    pub fn get_or_generate(&mut self, text: &str, size: f32) -> Option<ImageData> {
        let text = text.trim();
        if text.is_empty() || size <= 0.0 {
            return None;
        }
        if let Some(cached) = self.entries.get(text) {
            return cached.clone();
        }

        let image = match render_svg(text) {
            Ok(svg) => {
                self.generated += 1;
                Some(ImageData {
                    src: None,
                    data: Some(Arc::new(svg.into_bytes())),
                    content_type: Some("image/svg+xml".to_string()),
                    width: size,
                    height: size,
                    alt: Some(text.to_string()),
                })
            }
            Err(e) => {
                log::warn!("Could not encode identifier graphic for '{}': {}", text, e);
                None
            }
        };
        self.entries.insert(text.to_string(), image.clone());
        image
    }

    /// Number of graphics actually encoded (cache misses).
    pub fn generated(&self) -> usize {
        self.generated
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn render_svg(text: &str) -> Result<String, qrcode::types::QrError> {
    let code = QrCode::new(text.as_bytes())?;
    let width = code.width();
    let extent = width + QUIET_ZONE * 2;

    let mut path = String::new();
    for (i, module) in code.to_colors().into_iter().enumerate() {
        if module == qrcode::Color::Dark {
            let x = i % width + QUIET_ZONE;
            let y = i / width + QUIET_ZONE;
            path.push_str(&format!("M{x} {y}h1v1h-1z"));
        }
    }

    Ok(format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {e} {e}" shape-rendering="crispEdges">"#,
            r##"<rect width="{e}" height="{e}" fill="#ffffff"/><path d="{p}" fill="#000000"/></svg>"##
        ),
        e = extent,
        p = path
    ))
}
