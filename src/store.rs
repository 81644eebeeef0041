//! Ordered annotation storage with selection and hover cursors.
//!
//! Order is insertion order and doubles as z-order: later annotations draw
//! on top and are hit-tested first. Both cursors are always either `None`
//! or a valid index; every mutation re-validates them.

use crate::event::StoreChange;
use crate::format::LabelError;
use crate::model::Annotation;

#[derive(Debug, Clone, Default)]
pub struct AnnotationStore {
    annotations: Vec<Annotation>,
    selected: Option<usize>,
    hovered: Option<usize>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Annotation> {
        self.annotations.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.annotations.iter()
    }

    pub fn as_slice(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn selected_annotation(&self) -> Option<&Annotation> {
        self.selected.and_then(|i| self.annotations.get(i))
    }

    /// Replace the entire set. Cursors that fall out of range are cleared.
    pub fn set_all(&mut self, annotations: Vec<Annotation>) -> StoreChange {
        self.annotations = annotations;
        let len = self.annotations.len();
        if self.selected.is_some_and(|i| i >= len) {
            self.selected = None;
        }
        if self.hovered.is_some_and(|i| i >= len) {
            self.hovered = None;
        }
        log::debug!("annotation set replaced ({} entries)", len);
        StoreChange::Reset
    }

    pub fn clear(&mut self) -> StoreChange {
        self.set_all(Vec::new())
    }

    /// Append an annotation; it becomes the topmost in z-order.
    pub fn add(&mut self, annotation: Annotation) -> StoreChange {
        self.annotations.push(annotation);
        StoreChange::Added(self.annotations.len() - 1)
    }

    /// Replace the annotation at `index`. Out of range is a silent no-op.
    pub fn update(&mut self, index: usize, annotation: Annotation) -> Option<StoreChange> {
        match self.annotations.get_mut(index) {
            Some(slot) => {
                *slot = annotation;
                Some(StoreChange::Updated(index))
            }
            None => {
                log::debug!("update ignored: index {} out of range", index);
                None
            }
        }
    }

    /// Remove the annotation at `index`. Out of range is a silent no-op.
    ///
    /// Cursor re-validation: a cursor on the removed index clears; a cursor
    /// past it decrements to keep pointing at the same logical element.
    pub fn remove(&mut self, index: usize) -> Option<StoreChange> {
        if index >= self.annotations.len() {
            log::debug!("remove ignored: index {} out of range", index);
            return None;
        }
        self.annotations.remove(index);
        self.selected = reindex_after_removal(self.selected, index);
        self.hovered = reindex_after_removal(self.hovered, index);
        Some(StoreChange::Removed(index))
    }

    /// Change the selection. Returns whether the cursor actually moved;
    /// an out-of-range index is rejected without change.
    pub fn select(&mut self, index: Option<usize>) -> bool {
        if index.is_some_and(|i| i >= self.annotations.len()) {
            return false;
        }
        if self.selected == index {
            return false;
        }
        self.selected = index;
        true
    }

    /// Change the hover cursor, with the same validity rules as `select`.
    pub fn set_hover(&mut self, index: Option<usize>) -> bool {
        if index.is_some_and(|i| i >= self.annotations.len()) {
            return false;
        }
        if self.hovered == index {
            return false;
        }
        self.hovered = index;
        true
    }

    /// Topmost annotation matching the predicate (reverse z-order scan).
    pub fn hit_test<F>(&self, mut contains: F) -> Option<usize>
    where
        F: FnMut(&Annotation) -> bool,
    {
        self.annotations
            .iter()
            .enumerate()
            .rev()
            .find(|(_, a)| contains(a))
            .map(|(i, _)| i)
    }

    /// Dump the set as pretty JSON (debugging / sidecar exports).
    pub fn to_json(&self) -> Result<String, LabelError> {
        Ok(serde_json::to_string_pretty(&self.annotations)?)
    }

    /// Rebuild a store from a JSON dump; cursors start cleared.
    pub fn from_json(json: &str) -> Result<Self, LabelError> {
        let annotations: Vec<Annotation> = serde_json::from_str(json)?;
        Ok(Self {
            annotations,
            selected: None,
            hovered: None,
        })
    }
}

fn reindex_after_removal(cursor: Option<usize>, removed: usize) -> Option<usize> {
    match cursor {
        Some(i) if i == removed => None,
        Some(i) if i > removed => Some(i - 1),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ColorToken, Point, Rect};

    fn quad(x: f32) -> Annotation {
        Annotation::from_rect(Rect::new(x, 10.0, 50.0, 50.0), "1", ColorToken::Blue)
    }

    #[test]
    fn test_add_and_select() {
        let mut store = AnnotationStore::new();
        store.add(quad(0.0));
        store.add(quad(100.0));
        assert!(store.select(Some(1)));
        assert_eq!(store.selected(), Some(1));
        // Re-selecting the same index reports no change
        assert!(!store.select(Some(1)));
        // Out of range is rejected
        assert!(!store.select(Some(5)));
        assert_eq!(store.selected(), Some(1));
    }

    #[test]
    fn test_remove_selected_clears_cursor() {
        let mut store = AnnotationStore::new();
        store.add(quad(0.0));
        store.add(quad(100.0));
        store.select(Some(1));
        assert_eq!(store.remove(1), Some(StoreChange::Removed(1)));
        assert_eq!(store.selected(), None);
    }

    #[test]
    fn test_remove_below_selected_decrements() {
        let mut store = AnnotationStore::new();
        store.add(quad(0.0));
        store.add(quad(100.0));
        store.add(quad(200.0));
        store.select(Some(2));
        store.remove(0);
        assert_eq!(store.selected(), Some(1));
        // Still the same logical annotation
        assert_eq!(store.selected_annotation().unwrap().corners[0].x, 200.0);
    }

    #[test]
    fn test_remove_above_selected_keeps_cursor() {
        let mut store = AnnotationStore::new();
        store.add(quad(0.0));
        store.add(quad(100.0));
        store.select(Some(0));
        store.remove(1);
        assert_eq!(store.selected(), Some(0));
    }

    #[test]
    fn test_remove_reindexes_hover() {
        let mut store = AnnotationStore::new();
        store.add(quad(0.0));
        store.add(quad(100.0));
        store.set_hover(Some(1));
        store.remove(0);
        assert_eq!(store.hovered(), Some(0));
        store.remove(0);
        assert_eq!(store.hovered(), None);
    }

    #[test]
    fn test_out_of_range_mutations_are_noops() {
        let mut store = AnnotationStore::new();
        store.add(quad(0.0));
        assert_eq!(store.update(3, quad(1.0)), None);
        assert_eq!(store.remove(3), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_set_all_clears_out_of_range_cursors() {
        let mut store = AnnotationStore::new();
        store.add(quad(0.0));
        store.add(quad(100.0));
        store.select(Some(1));
        store.set_hover(Some(1));
        store.set_all(vec![quad(0.0)]);
        assert_eq!(store.selected(), None);
        assert_eq!(store.hovered(), None);
    }

    #[test]
    fn test_hit_test_prefers_topmost() {
        let mut store = AnnotationStore::new();
        // Two overlapping quads; the later one is on top
        store.add(quad(0.0));
        store.add(quad(20.0));
        let p = Point::new(40.0, 30.0);
        assert_eq!(store.hit_test(|a| a.contains(&p)), Some(1));
    }

    #[test]
    fn test_json_round_trip() {
        let mut store = AnnotationStore::new();
        store.add(quad(0.0));
        store.add(quad(100.0));
        let json = store.to_json().unwrap();
        let back = AnnotationStore::from_json(&json).unwrap();
        assert_eq!(back.as_slice(), store.as_slice());
        assert_eq!(back.selected(), None);
    }
}
