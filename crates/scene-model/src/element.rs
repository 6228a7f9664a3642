//! Element, payload, and transform types.
//!
//! Every scene element is one of three closed kinds (image, text, icon) with
//! a kind-specific payload and a shared [`Transform`]. The payload variant is
//! the source of truth for the kind, so a payload can never disagree with the
//! kind it claims to be.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Unique element identity, assigned from a strictly-increasing counter.
/// Ids are never reused within a scene's lifetime, and double as the
/// default stacking value so initial paint order equals creation order.
pub type ElementId = u64;

/// Default payload for newly added text elements.
pub const DEFAULT_TEXT: &str = "Your message…";

/// Default font size for newly added text elements, in px.
pub const DEFAULT_TEXT_SIZE: f64 = 32.0;

/// Default font family for newly added text elements.
pub const DEFAULT_TEXT_FONT: &str = "serif";

/// Toolbar icon presets.
pub const ICON_HEART: &str = "❤";
pub const ICON_ENVELOPE: &str = "💌";

/// Discriminant for the three element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Image,
    Text,
    Icon,
}

/// Handle to an element's encoded image bytes.
///
/// Cloning is cheap (shared handle); the bytes themselves are immutable for
/// the lifetime of the element. Decoding happens lazily at export time.
#[derive(Debug, Clone)]
pub struct ImageSource {
    data: Arc<Vec<u8>>,
}

impl ImageSource {
    /// Wrap encoded image bytes (PNG, JPEG, …) as a source handle.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            data: Arc::new(bytes.into()),
        }
    }

    /// The encoded bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Shared handle to the encoded bytes, for moving into decode tasks.
    pub fn shared(&self) -> Arc<Vec<u8>> {
        Arc::clone(&self.data)
    }
}

/// Kind-specific element data.
#[derive(Debug, Clone)]
pub enum Payload {
    /// An uploaded raster image: encoded bytes plus the original filename.
    Image { source: ImageSource, name: String },

    /// A text block. `text` may contain `\n` line separators; `size` is the
    /// font size in px and must be positive.
    Text { text: String, size: f64, font: String },

    /// A single glyph/symbol string rendered at a fixed size.
    Icon { glyph: String },
}

impl Payload {
    /// The kind this payload belongs to.
    pub fn kind(&self) -> ElementKind {
        match self {
            Payload::Image { .. } => ElementKind::Image,
            Payload::Text { .. } => ElementKind::Text,
            Payload::Icon { .. } => ElementKind::Icon,
        }
    }

    /// Default payload for a new text element.
    pub fn default_text() -> Self {
        Payload::Text {
            text: DEFAULT_TEXT.to_string(),
            size: DEFAULT_TEXT_SIZE,
            font: DEFAULT_TEXT_FONT.to_string(),
        }
    }
}

/// Partial payload update, one variant per kind.
///
/// A patch only applies to an element of the matching kind; the store rejects
/// cross-kind patches without touching the element.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PayloadPatch {
    Image {
        #[serde(default)]
        name: Option<String>,
    },
    Text {
        #[serde(default)]
        text: Option<String>,
        #[serde(default)]
        size: Option<f64>,
        #[serde(default)]
        font: Option<String>,
    },
    Icon {
        #[serde(default)]
        glyph: Option<String>,
    },
}

impl PayloadPatch {
    /// The kind this patch targets.
    pub fn kind(&self) -> ElementKind {
        match self {
            PayloadPatch::Image { .. } => ElementKind::Image,
            PayloadPatch::Text { .. } => ElementKind::Text,
            PayloadPatch::Icon { .. } => ElementKind::Icon,
        }
    }
}

/// Position, scale, rotation, and stacking for one element.
///
/// `x`/`y` are the element's anchor in stage (CSS px) coordinates. `scale` is
/// uniform and always positive. `rotation_deg` is clockwise-positive, stored
/// unbounded and interpreted mod 360 at render time. `z` is used only for
/// relative ordering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub rotation_deg: f64,
    pub z: f64,
}

impl Transform {
    /// Default transform for a new element: the kind-specific stage offset,
    /// unit scale, no rotation, and `z` equal to the element id.
    pub fn initial(kind: ElementKind, id: ElementId) -> Self {
        let (x, y) = match kind {
            ElementKind::Image => (60.0, 60.0),
            ElementKind::Text => (80.0, 80.0),
            ElementKind::Icon => (100.0, 100.0),
        };
        Self {
            x,
            y,
            scale: 1.0,
            rotation_deg: 0.0,
            z: id as f64,
        }
    }

    /// Rotation normalized into `[0, 360)` degrees for rendering.
    pub fn rotation_normalized_deg(&self) -> f64 {
        self.rotation_deg.rem_euclid(360.0)
    }
}

/// Partial transform update with absolute-value semantics.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TransformPatch {
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub scale: Option<f64>,
    #[serde(default)]
    pub rotation_deg: Option<f64>,
    #[serde(default)]
    pub z: Option<f64>,
}

impl TransformPatch {
    /// Patch that only moves the anchor.
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// Patch that only restacks.
    pub fn stacking(z: f64) -> Self {
        Self {
            z: Some(z),
            ..Self::default()
        }
    }

    /// Merge this patch into a transform.
    ///
    /// A non-positive (or non-finite) `scale` value violates the scale
    /// invariant; that field is dropped with a warning while the rest of the
    /// patch still applies.
    pub fn apply(&self, transform: &mut Transform) {
        if let Some(x) = self.x {
            transform.x = x;
        }
        if let Some(y) = self.y {
            transform.y = y;
        }
        if let Some(scale) = self.scale {
            if scale > 0.0 && scale.is_finite() {
                transform.scale = scale;
            } else {
                tracing::warn!(scale, "Ignoring non-positive scale in transform patch");
            }
        }
        if let Some(rot) = self.rotation_deg {
            transform.rotation_deg = rot;
        }
        if let Some(z) = self.z {
            transform.z = z;
        }
    }
}

/// One scene element: identity, kind-specific payload, and transform.
#[derive(Debug, Clone)]
pub struct Element {
    /// Unique id, stable for the scene's lifetime.
    pub id: ElementId,

    /// Kind-specific data. The variant never changes after creation.
    pub payload: Payload,

    /// Position/scale/rotation/stacking state.
    pub transform: Transform,
}

impl Element {
    /// The element's kind, derived from its payload variant.
    pub fn kind(&self) -> ElementKind {
        self.payload.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_transform_uses_kind_offsets_and_id_stacking() {
        let t = Transform::initial(ElementKind::Image, 7);
        assert_eq!((t.x, t.y), (60.0, 60.0));
        assert_eq!(t.z, 7.0);
        assert_eq!(t.scale, 1.0);

        let t = Transform::initial(ElementKind::Text, 8);
        assert_eq!((t.x, t.y), (80.0, 80.0));

        let t = Transform::initial(ElementKind::Icon, 9);
        assert_eq!((t.x, t.y), (100.0, 100.0));
    }

    #[test]
    fn test_rotation_normalization_wraps_to_360() {
        let mut t = Transform::initial(ElementKind::Text, 1);
        t.rotation_deg = 360.0;
        assert_eq!(t.rotation_normalized_deg(), 0.0);

        t.rotation_deg = -90.0;
        assert_eq!(t.rotation_normalized_deg(), 270.0);

        t.rotation_deg = 725.0;
        assert!((t.rotation_normalized_deg() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_patch_rejects_non_positive_scale_but_applies_rest() {
        let mut t = Transform::initial(ElementKind::Image, 1);
        let patch = TransformPatch {
            x: Some(10.0),
            scale: Some(0.0),
            ..Default::default()
        };
        patch.apply(&mut t);
        assert_eq!(t.x, 10.0);
        assert_eq!(t.scale, 1.0);
    }

    #[test]
    fn test_payload_kind_matches_variant() {
        assert_eq!(Payload::default_text().kind(), ElementKind::Text);
        assert_eq!(
            Payload::Icon {
                glyph: ICON_HEART.to_string()
            }
            .kind(),
            ElementKind::Icon
        );
    }

    #[test]
    fn test_transform_patch_json_uses_absolute_fields() {
        let patch: TransformPatch = serde_json::from_str(r#"{"x": 12.5, "z": 3}"#).unwrap();
        assert_eq!(patch.x, Some(12.5));
        assert_eq!(patch.y, None);
        assert_eq!(patch.z, Some(3.0));
    }
}
