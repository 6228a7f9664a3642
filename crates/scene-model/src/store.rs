//! The scene store: single owner of all elements and the focus slot.
//!
//! All mutation happens through the store on the one event thread, so no
//! locking is involved. Mutations referencing an id that no longer exists
//! (e.g. an in-flight drag racing a delete) are silent no-ops per the store
//! contract.

use collage_common::{ComposeError, ComposeResult};

use crate::element::{
    Element, ElementId, Payload, PayloadPatch, Transform, TransformPatch,
};

/// Owns the ordered element collection and assigns identity.
///
/// Collection order is insertion order, which is also the stacking tie-break
/// order: removal preserves the relative order of survivors.
#[derive(Debug, Default)]
pub struct SceneStore {
    elements: Vec<Element>,
    next_id: ElementId,
    focused: Option<ElementId>,
}

/// Immutable by-value view of the scene, safe to hand to render/export code.
///
/// A snapshot taken before a mutation never reflects that mutation.
#[derive(Debug, Clone, Default)]
pub struct SceneSnapshot {
    pub elements: Vec<Element>,
}

impl SceneSnapshot {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl SceneStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an element from its payload and return the new id.
    ///
    /// The element gets the kind-specific default transform with `z` equal to
    /// its id, so default stacking follows creation order.
    pub fn add(&mut self, payload: Payload) -> ElementId {
        self.next_id += 1;
        let id = self.next_id;
        let kind = payload.kind();
        let element = Element {
            id,
            payload,
            transform: Transform::initial(kind, id),
        };
        tracing::debug!(id, kind = ?kind, "Element added");
        self.elements.push(element);
        id
    }

    /// Look up an element by id.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|el| el.id == id)
    }

    /// Merge a partial transform into an element. No-op if the id is absent.
    pub fn update(&mut self, id: ElementId, patch: TransformPatch) {
        match self.elements.iter_mut().find(|el| el.id == id) {
            Some(element) => patch.apply(&mut element.transform),
            None => tracing::debug!(id, "Transform update for absent element ignored"),
        }
    }

    /// Merge a partial payload into an element, type-checked against its kind.
    ///
    /// A cross-kind patch or a non-positive text size rejects the whole patch
    /// and leaves the element unchanged. An absent id is a silent no-op.
    pub fn update_payload(&mut self, id: ElementId, patch: PayloadPatch) -> ComposeResult<()> {
        let Some(element) = self.elements.iter_mut().find(|el| el.id == id) else {
            tracing::debug!(id, "Payload update for absent element ignored");
            return Ok(());
        };

        match (&mut element.payload, patch) {
            (Payload::Image { name, .. }, PayloadPatch::Image { name: new_name }) => {
                if let Some(new_name) = new_name {
                    *name = new_name;
                }
                Ok(())
            }
            (
                Payload::Text { text, size, font },
                PayloadPatch::Text {
                    text: new_text,
                    size: new_size,
                    font: new_font,
                },
            ) => {
                if let Some(new_size) = new_size {
                    if !(new_size > 0.0 && new_size.is_finite()) {
                        return Err(ComposeError::invalid_payload(format!(
                            "text size must be positive, got {new_size}"
                        )));
                    }
                }
                if let Some(new_text) = new_text {
                    *text = new_text;
                }
                if let Some(new_size) = new_size {
                    *size = new_size;
                }
                if let Some(new_font) = new_font {
                    *font = new_font;
                }
                Ok(())
            }
            (Payload::Icon { glyph }, PayloadPatch::Icon { glyph: new_glyph }) => {
                if let Some(new_glyph) = new_glyph {
                    *glyph = new_glyph;
                }
                Ok(())
            }
            (payload, patch) => Err(ComposeError::invalid_payload(format!(
                "{:?} patch applied to {:?} element {id}",
                patch.kind(),
                payload.kind(),
            ))),
        }
    }

    /// Delete an element. Clears focus if the deleted element held it.
    pub fn remove(&mut self, id: ElementId) {
        let before = self.elements.len();
        self.elements.retain(|el| el.id != id);
        if self.elements.len() != before {
            tracing::debug!(id, "Element removed");
            if self.focused == Some(id) {
                self.focused = None;
            }
        }
    }

    /// Focus an element. No-op if the id is absent.
    pub fn focus(&mut self, id: ElementId) {
        if self.get(id).is_some() {
            self.focused = Some(id);
        }
    }

    /// Clear the focus slot.
    pub fn clear_focus(&mut self) {
        self.focused = None;
    }

    /// The currently focused element, if any.
    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    /// Highest stacking value among current elements.
    pub fn max_z(&self) -> Option<f64> {
        self.elements
            .iter()
            .map(|el| el.transform.z)
            .fold(None, |acc, z| match acc {
                Some(max) if max >= z => Some(max),
                _ => Some(z),
            })
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// By-value ordered copy of the scene for rendering or export.
    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            elements: self.elements.clone(),
        }
    }
}
