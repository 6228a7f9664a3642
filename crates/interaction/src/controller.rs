//! The interaction controller: drag capture, focus, and property edits.

use collage_scene_model::{
    ElementId, ImageSource, Payload, PayloadPatch, SceneStore, TransformPatch,
};

use crate::events::PointerEvent;

/// Active drag capture for one element instance.
///
/// `last_x`/`last_y` hold the most recent pointer position, not the press
/// position: each move applies only the delta since the previous move, so the
/// accumulated translation stays drift-free even if scale or rotation change
/// mid-drag.
#[derive(Debug, Clone, Copy)]
struct DragState {
    element: ElementId,
    last_x: f64,
    last_y: f64,
}

/// Converts pointer events and panel edits into scene store calls.
///
/// Holds only the ephemeral drag capture; the store passed into each call is
/// the single owner of elements and focus.
#[derive(Debug, Default)]
pub struct InteractionController {
    drag: Option<DragState>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatch a pointer event.
    pub fn handle(&mut self, store: &mut SceneStore, event: PointerEvent) {
        match event {
            PointerEvent::Down { element, x, y } => self.pointer_down(store, element, x, y),
            PointerEvent::Move { x, y } => self.pointer_move(store, x, y),
            PointerEvent::Up => self.pointer_up(),
        }
    }

    /// Press on an element: focus it and capture the pointer for dragging.
    pub fn pointer_down(&mut self, store: &mut SceneStore, element: ElementId, x: f64, y: f64) {
        store.focus(element);
        self.drag = Some(DragState {
            element,
            last_x: x,
            last_y: y,
        });
    }

    /// Pointer motion: translate the captured element by the delta since the
    /// last recorded position, then re-baseline. Stray moves with no capture
    /// are ignored.
    pub fn pointer_move(&mut self, store: &mut SceneStore, x: f64, y: f64) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };

        let dx = x - drag.last_x;
        let dy = y - drag.last_y;
        drag.last_x = x;
        drag.last_y = y;

        // The drag target may have been deleted mid-drag; the update is then
        // a silent no-op but the baseline still advances.
        if let Some(element) = store.get(drag.element) {
            let patch =
                TransformPatch::position(element.transform.x + dx, element.transform.y + dy);
            store.update(drag.element, patch);
        }
    }

    /// Release: end drag capture.
    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    /// Whether a drag is currently captured.
    pub fn dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Set focus independent of any drag.
    pub fn focus(&self, store: &mut SceneStore, element: ElementId) {
        store.focus(element);
    }

    /// Add an uploaded image and focus it.
    pub fn add_image(
        &self,
        store: &mut SceneStore,
        bytes: impl Into<Vec<u8>>,
        name: impl Into<String>,
    ) -> ElementId {
        let id = store.add(Payload::Image {
            source: ImageSource::from_bytes(bytes),
            name: name.into(),
        });
        store.focus(id);
        id
    }

    /// Add a text element with the default payload and focus it.
    pub fn add_text(&self, store: &mut SceneStore) -> ElementId {
        let id = store.add(Payload::default_text());
        store.focus(id);
        id
    }

    /// Add a glyph icon and focus it.
    pub fn add_icon(&self, store: &mut SceneStore, glyph: impl Into<String>) -> ElementId {
        let id = store.add(Payload::Icon {
            glyph: glyph.into(),
        });
        store.focus(id);
        id
    }

    /// Property-panel transform edit with absolute-value semantics.
    pub fn edit_transform(&self, store: &mut SceneStore, element: ElementId, patch: TransformPatch) {
        store.update(element, patch);
    }

    /// Property-panel payload edit. A rejected patch (wrong kind, bad size)
    /// is logged and swallowed so the UI stays responsive.
    pub fn edit_payload(&self, store: &mut SceneStore, element: ElementId, patch: PayloadPatch) {
        if let Err(err) = store.update_payload(element, patch) {
            tracing::warn!(element, error = %err, "Payload edit rejected");
        }
    }

    /// Restack the element strictly above everything currently in the scene.
    /// No-op on an empty scene.
    pub fn bring_forward(&self, store: &mut SceneStore, element: ElementId) {
        if let Some(max_z) = store.max_z() {
            store.update(element, TransformPatch::stacking(max_z + 1.0));
        }
    }

    /// Delete an element. Ends the drag if it targeted the deleted element;
    /// the store clears focus if the element held it.
    pub fn delete(&mut self, store: &mut SceneStore, element: ElementId) {
        if self.drag.map(|d| d.element) == Some(element) {
            self.drag = None;
        }
        store.remove(element);
    }
}
