//! Font resolution and text-block rasterization.
//!
//! Families are resolved through a [`FontCatalog`]: explicit registrations
//! first, then the catalog fallback (usually a system font discovered via
//! `fontdb`). Glyph coverage comes from `fontdue`; blocks render as black
//! ink with per-pixel alpha, ready for [`crate::raster::blit_rotated`].

use std::collections::HashMap;

use collage_common::{ComposeError, ComposeResult};
use image::{Rgba, RgbaImage};

/// Maps payload font-family names to loaded fonts.
#[derive(Default)]
pub struct FontCatalog {
    fonts: HashMap<String, fontdue::Font>,
    fallback: Option<fontdue::Font>,
}

impl FontCatalog {
    /// An empty catalog. Text and icon elements degrade (skip + warn) until
    /// a font is registered or a fallback is set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register font bytes under a family name. The first registered font
    /// also becomes the fallback if none is set yet.
    pub fn register_bytes(
        &mut self,
        family: impl Into<String>,
        bytes: &[u8],
    ) -> ComposeResult<()> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(ComposeError::font)?;
        if self.fallback.is_none() {
            self.fallback = Some(font.clone());
        }
        self.fonts.insert(family.into(), font);
        Ok(())
    }

    /// Build a catalog whose fallback is a system font discovered through
    /// `fontdb` (serif preferred, then sans-serif).
    pub fn from_system() -> ComposeResult<Self> {
        use fontdb::{Database, Family, Query, Source};

        let mut db = Database::new();
        db.load_system_fonts();

        let id = db
            .query(&Query {
                families: &[Family::Serif, Family::SansSerif],
                ..Query::default()
            })
            .ok_or_else(|| ComposeError::font("no usable system font found"))?;

        let face = db
            .face(id)
            .ok_or_else(|| ComposeError::font("fontdb face missing for queried id"))?;

        let bytes: Vec<u8> = match &face.source {
            Source::File(path) => std::fs::read(path)?,
            Source::Binary(data) => data.as_ref().as_ref().to_vec(),
            Source::SharedFile(_, data) => data.as_ref().as_ref().to_vec(),
        };

        let font = fontdue::Font::from_bytes(
            bytes,
            fontdue::FontSettings {
                collection_index: face.index,
                ..fontdue::FontSettings::default()
            },
        )
        .map_err(ComposeError::font)?;

        Ok(Self {
            fonts: HashMap::new(),
            fallback: Some(font),
        })
    }

    /// Resolve a family name, falling back to the catalog fallback.
    pub fn resolve(&self, family: &str) -> Option<&fontdue::Font> {
        self.fonts.get(family).or(self.fallback.as_ref())
    }

    /// Whether any font at all is available.
    pub fn has_any(&self) -> bool {
        self.fallback.is_some() || !self.fonts.is_empty()
    }
}

impl std::fmt::Debug for FontCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontCatalog")
            .field("families", &self.fonts.keys().collect::<Vec<_>>())
            .field("has_fallback", &self.fallback.is_some())
            .finish()
    }
}

/// Rasterize a text block into a sprite whose origin is the block's top-left
/// anchor.
///
/// Lines split on `\n`; line `i`'s top edge sits at `i * (size + line_gap)`
/// and glyphs sit on a top-anchored baseline (`top + ascent`). Ink reaching
/// above or left of the anchor is clipped, matching canvas
/// `textBaseline: "top"` drawing.
///
/// Returns `None` when nothing would be inked (empty text, zero size, or no
/// coverage for any glyph).
pub fn rasterize_block(
    font: &fontdue::Font,
    text: &str,
    size_px: f32,
    line_gap_px: f32,
) -> Option<RgbaImage> {
    if !(size_px > 0.0) {
        return None;
    }

    let ascent = font
        .horizontal_line_metrics(size_px)
        .map(|m| m.ascent)
        .unwrap_or(size_px * 0.8);

    struct PlacedGlyph {
        bitmap: Vec<u8>,
        width: usize,
        height: usize,
        // Top-left of the coverage bitmap relative to the block anchor.
        left: f64,
        top: f64,
    }

    let mut placed: Vec<PlacedGlyph> = Vec::new();
    let mut extent_x = 0.0f64;
    let mut extent_y = 0.0f64;

    for (line_index, line) in text.split('\n').enumerate() {
        let line_top = line_index as f64 * (size_px + line_gap_px) as f64;
        let baseline = line_top + ascent as f64;
        let mut pen_x = 0.0f64;

        for ch in line.chars() {
            let (metrics, bitmap) = font.rasterize(ch, size_px);
            if metrics.width > 0 && metrics.height > 0 {
                let left = pen_x + metrics.xmin as f64;
                // fontdue's ymin is the bitmap bottom relative to baseline, y-up.
                let top = baseline - metrics.ymin as f64 - metrics.height as f64;
                extent_x = extent_x.max(left + metrics.width as f64);
                extent_y = extent_y.max(top + metrics.height as f64);
                placed.push(PlacedGlyph {
                    bitmap,
                    width: metrics.width,
                    height: metrics.height,
                    left,
                    top,
                });
            }
            pen_x += metrics.advance_width as f64;
        }
    }

    if placed.is_empty() || extent_x <= 0.0 || extent_y <= 0.0 {
        return None;
    }

    let block_w = extent_x.ceil() as u32;
    let block_h = extent_y.ceil() as u32;
    let mut block = RgbaImage::from_pixel(block_w, block_h, Rgba([0, 0, 0, 0]));

    for glyph in &placed {
        for row in 0..glyph.height {
            let y = glyph.top.round() as i64 + row as i64;
            if y < 0 || y >= block_h as i64 {
                continue;
            }
            for col in 0..glyph.width {
                let x = glyph.left.round() as i64 + col as i64;
                if x < 0 || x >= block_w as i64 {
                    continue;
                }
                let coverage = glyph.bitmap[row * glyph.width + col];
                if coverage == 0 {
                    continue;
                }
                let px = block.get_pixel_mut(x as u32, y as u32);
                // Overlapping glyph parts keep the heavier coverage.
                px.0[3] = px.0[3].max(coverage);
            }
        }
    }

    Some(block)
}
