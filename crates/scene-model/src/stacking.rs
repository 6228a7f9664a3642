//! Stacking resolver: turns stacking values into deterministic paint order.

use std::cmp::Ordering;

use crate::element::Element;
use crate::store::SceneSnapshot;

/// Elements in paint order: ascending `z`, ties kept in insertion order.
///
/// The sort is stable, so visually overlapping equal-z elements paint in the
/// same order on every call, on screen and in export alike. A non-finite `z`
/// compares as equal, which degrades to insertion order instead of panicking.
pub fn paint_order(snapshot: &SceneSnapshot) -> Vec<&Element> {
    let mut ordered: Vec<&Element> = snapshot.elements.iter().collect();
    ordered.sort_by(|a, b| {
        a.transform
            .z
            .partial_cmp(&b.transform.z)
            .unwrap_or(Ordering::Equal)
    });
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Payload, TransformPatch};
    use crate::store::SceneStore;

    fn scene_with_z(zs: &[f64]) -> SceneSnapshot {
        let mut store = SceneStore::new();
        for z in zs {
            let id = store.add(Payload::Icon {
                glyph: "★".to_string(),
            });
            store.update(id, TransformPatch::stacking(*z));
        }
        store.snapshot()
    }

    #[test]
    fn test_initial_paint_order_equals_creation_order() {
        let mut store = SceneStore::new();
        let ids: Vec<_> = (0..4)
            .map(|_| {
                store.add(Payload::Icon {
                    glyph: "★".to_string(),
                })
            })
            .collect();

        let snapshot = store.snapshot();
        let order: Vec<_> = paint_order(&snapshot).iter().map(|el| el.id).collect();
        assert_eq!(order, ids);
    }

    #[test]
    fn test_ascending_by_z() {
        let snapshot = scene_with_z(&[5.0, 1.0, 3.0]);
        let zs: Vec<_> = paint_order(&snapshot)
            .iter()
            .map(|el| el.transform.z)
            .collect();
        assert_eq!(zs, vec![1.0, 3.0, 5.0]);
    }

    #[test]
    fn test_equal_z_keeps_insertion_order_across_calls() {
        let snapshot = scene_with_z(&[2.0, 2.0, 2.0]);
        let first: Vec<_> = paint_order(&snapshot).iter().map(|el| el.id).collect();
        for _ in 0..10 {
            let again: Vec<_> = paint_order(&snapshot).iter().map(|el| el.id).collect();
            assert_eq!(again, first);
        }
        assert!(first.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_nan_z_degrades_to_insertion_order() {
        let snapshot = scene_with_z(&[f64::NAN, 1.0, f64::NAN]);
        let order = paint_order(&snapshot);
        assert_eq!(order.len(), 3);
    }
}
