//! The paint pass: walks a snapshot in paint order and draws each element
//! onto the shared canvas.
//!
//! Painting happens strictly sequentially (single writer), after every image
//! decode has completed, so overlapping elements always resolve by stacking
//! order regardless of how decodes interleaved.

use std::collections::HashMap;

use image::RgbaImage;

use collage_scene_model::{paint_order, ElementId, Payload, SceneSnapshot};

use crate::raster::{blit_rotated, DestRect, Pivot};
use crate::text::{rasterize_block, FontCatalog};

/// Fixed font size for icon glyphs, in stage px.
pub const ICON_FONT_SIZE: f64 = 48.0;

/// Vertical gap between text lines, in stage px.
pub const LINE_GAP: f64 = 4.0;

/// Paint every element of `snapshot` onto `canvas` in stacking order.
///
/// `decoded` holds the pre-decoded pixels for image elements; an image whose
/// id is absent (decode failed) is skipped. Text and icon elements whose font
/// cannot be resolved are likewise skipped with a warning.
pub fn paint_scene(
    canvas: &mut RgbaImage,
    snapshot: &SceneSnapshot,
    decoded: &HashMap<ElementId, RgbaImage>,
    fonts: &FontCatalog,
    supersample: u32,
) {
    let ss = supersample as f64;

    for element in paint_order(snapshot) {
        let t = &element.transform;
        match &element.payload {
            Payload::Image { name, .. } => {
                let Some(pixels) = decoded.get(&element.id) else {
                    tracing::debug!(id = element.id, name = %name, "Skipping undecoded image");
                    continue;
                };
                // Destination scales with the transform; rotation pivots on
                // the destination center.
                let dest = DestRect::new(
                    t.x * ss,
                    t.y * ss,
                    pixels.width() as f64 * t.scale * ss,
                    pixels.height() as f64 * t.scale * ss,
                );
                blit_rotated(canvas, pixels, dest, Pivot::Center, t.rotation_normalized_deg());
            }
            Payload::Text { text, size, font } => {
                let Some(face) = fonts.resolve(font) else {
                    tracing::warn!(id = element.id, family = %font, "No font for text element; skipped");
                    continue;
                };
                // Text ignores transform.scale: only the payload size (times
                // supersample) applies, and rotation pivots on the anchor.
                let size_px = (size * ss) as f32;
                let gap_px = (LINE_GAP * ss) as f32;
                let Some(block) = rasterize_block(face, text, size_px, gap_px) else {
                    continue;
                };
                let dest = DestRect::new(
                    t.x * ss,
                    t.y * ss,
                    block.width() as f64,
                    block.height() as f64,
                );
                blit_rotated(canvas, &block, dest, Pivot::TopLeft, t.rotation_normalized_deg());
            }
            Payload::Icon { glyph } => {
                // Icons draw in the default serif face at a fixed size.
                let Some(face) = fonts.resolve("serif") else {
                    tracing::warn!(id = element.id, "No font for icon element; skipped");
                    continue;
                };
                let size_px = (ICON_FONT_SIZE * ss) as f32;
                let Some(block) = rasterize_block(face, glyph, size_px, (LINE_GAP * ss) as f32)
                else {
                    tracing::debug!(id = element.id, glyph = %glyph, "Icon glyph has no coverage");
                    continue;
                };
                let dest = DestRect::new(
                    t.x * ss,
                    t.y * ss,
                    block.width() as f64,
                    block.height() as f64,
                );
                blit_rotated(canvas, &block, dest, Pivot::TopLeft, t.rotation_normalized_deg());
            }
        }
    }
}
