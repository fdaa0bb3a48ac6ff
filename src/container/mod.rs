//! [`PathContainer`]: the arena of graphics items for one page-part, with
//! multi-step undo/redo history.
//!
//! Every item lives in `items: HashMap<ItemId, Entry>` keyed by a stable,
//! monotonically-assigned id — never by index, so history can refer to an
//! item across reorders and deletions without invalidating. `z_order` is a
//! separate sorted index so painting and hit-testing (front-to-back) don't
//! need to re-sort the whole map on every frame.

mod history;
mod registry;
mod step;

pub use registry::{ContainerRegistry, PagePart};
pub use step::{
    CreatedItem, DeletedItem, DrawToolChange, Step, TextPropertyChange, TransformChange,
    ZValueChange,
};

use std::collections::HashMap;

use crate::draw::Shape;
use crate::error::{EngineError, Result};
use crate::item::{self, StrokeStyle, TextProperties};
use crate::util::Transform;

pub type ItemId = u64;

/// One item plus the bookkeeping `PathContainer` needs that isn't part of
/// the item's own drawable data.
#[derive(Debug, Clone)]
pub struct Entry {
    pub item: Shape,
    pub ref_count: u32,
    pub visible: bool,
    pub z: f64,
    pub transform: Transform,
}

impl Entry {
    fn live(item: Shape, z: f64) -> Self {
        Self {
            item,
            ref_count: 1,
            visible: true,
            z,
            transform: Transform::IDENTITY,
        }
    }
}

#[derive(Debug, Default)]
pub struct PathContainer {
    items: HashMap<ItemId, Entry>,
    next_id: ItemId,
    undo_stack: Vec<Step>,
    redo_stack: Vec<Step>,
    eraser_step: Option<Step>,
    history_limit: usize,
}

impl PathContainer {
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
            next_id: 1,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            eraser_step: None,
            history_limit: usize::MAX,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.values().all(|e| !e.visible)
    }

    pub fn len(&self) -> usize {
        self.items.values().filter(|e| e.visible).count()
    }

    pub fn get(&self, id: ItemId) -> Option<&Entry> {
        self.items.get(&id).filter(|e| e.visible)
    }

    /// Items in paint order: lowest z first. Invisible items are excluded.
    pub fn z_order(&self) -> Vec<ItemId> {
        let mut ids: Vec<ItemId> = self
            .items
            .iter()
            .filter(|(_, e)| e.visible)
            .map(|(id, _)| *id)
            .collect();
        ids.sort_by(|a, b| {
            self.items[a]
                .z
                .partial_cmp(&self.items[b].z)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ids
    }

    pub fn set_history_limit(&mut self, limit: usize) {
        self.history_limit = limit;
        self.clear_history(limit);
    }

    // ---- item lifecycle ----------------------------------------------

    /// Adds a brand-new item at the given z, returning its stable id.
    /// Pushes a one-entry `created` step and clears the redo stack, as any
    /// normal new action does.
    pub fn add_item(&mut self, shape: Shape, z: f64) -> ItemId {
        let id = self.next_id;
        self.next_id += 1;
        self.items.insert(id, Entry::live(shape.clone(), z));
        self.push_step(Step {
            created: vec![CreatedItem { id, item: shape, z }],
            ..Default::default()
        });
        id
    }

    /// Removes an item from the live scene (soft delete: data survives in
    /// history so undo can resurrect it).
    pub fn remove_item(&mut self, id: ItemId) -> Result<()> {
        let entry = self
            .items
            .get_mut(&id)
            .filter(|e| e.visible)
            .ok_or(EngineError::UnknownItem(id))?;
        entry.visible = false;
        let item = entry.item.clone();
        let z = entry.z;
        entry.ref_count = entry.ref_count.saturating_sub(1);
        self.push_step(Step {
            deleted: vec![DeletedItem { id, item, z }],
            ..Default::default()
        });
        Ok(())
    }

    pub fn set_z(&mut self, id: ItemId, new_z: f64) -> Result<()> {
        let entry = self
            .items
            .get_mut(&id)
            .filter(|e| e.visible)
            .ok_or(EngineError::UnknownItem(id))?;
        let before = entry.z;
        entry.z = new_z;
        self.push_step(Step {
            z_value_changes: vec![ZValueChange {
                id,
                before,
                after: new_z,
            }],
            ..Default::default()
        });
        Ok(())
    }

    pub fn set_transform(&mut self, id: ItemId, new_transform: Transform) -> Result<()> {
        let entry = self
            .items
            .get_mut(&id)
            .filter(|e| e.visible)
            .ok_or(EngineError::UnknownItem(id))?;
        let before = entry.transform;
        entry.transform = new_transform;
        self.push_step(Step {
            transformed: vec![TransformChange {
                id,
                before,
                after: new_transform,
            }],
            ..Default::default()
        });
        Ok(())
    }

    /// Composes a selection operation's transform onto an item's existing
    /// transform: `new = op.then(&initial_scene_transform)`, matching the
    /// "store initial transform explicitly" redesign — the caller captures
    /// `initial_scene_transform` once per item at gesture start, and replays
    /// `op` fresh on every pointer-move without accumulating drift.
    pub fn apply_selection_op(
        &mut self,
        id: ItemId,
        op: Transform,
        initial_scene_transform: Transform,
    ) -> Result<()> {
        self.set_transform(id, op.then(&initial_scene_transform))
    }

    pub fn set_style(&mut self, id: ItemId, new_style: StrokeStyle) -> Result<()> {
        let entry = self
            .items
            .get_mut(&id)
            .filter(|e| e.visible)
            .ok_or(EngineError::UnknownItem(id))?;
        let before = item::style(&entry.item).map_err(|_| EngineError::NoStrokeStyle(id))?;
        item::set_style(&mut entry.item, new_style.clone())
            .map_err(|_| EngineError::NoStrokeStyle(id))?;
        self.push_step(Step {
            draw_tool_changes: vec![DrawToolChange {
                id,
                before,
                after: new_style,
            }],
            ..Default::default()
        });
        Ok(())
    }

    pub fn set_text_properties(&mut self, id: ItemId, new_props: TextProperties) -> Result<()> {
        let entry = self
            .items
            .get_mut(&id)
            .filter(|e| e.visible)
            .ok_or(EngineError::UnknownItem(id))?;
        let before = item::text_properties(&entry.item).map_err(|_| EngineError::NotATextItem(id))?;
        item::set_text_properties(&mut entry.item, new_props.clone())
            .map_err(|_| EngineError::NotATextItem(id))?;
        self.push_step(Step {
            text_property_changes: vec![TextPropertyChange {
                id,
                before,
                after: new_props,
            }],
            ..Default::default()
        });
        Ok(())
    }

    // ---- reference counting -------------------------------------------

    /// Increments the reference count of an item that is about to be
    /// pinned by an external structure (e.g. the selection clipboard
    /// keeping a logical handle alive independent of scene visibility).
    pub fn keep_item(&mut self, id: ItemId) -> Result<()> {
        let entry = self.items.get_mut(&id).ok_or(EngineError::UnknownItem(id))?;
        entry.ref_count += 1;
        Ok(())
    }

    /// Releases a reference taken by [`Self::keep_item`]. When the count
    /// reaches zero on an invisible item, the entry is purged outright —
    /// nothing in history still needs it (history pruning already released
    /// its own references, see [`Self::clear_history`]).
    pub fn release_item(&mut self, id: ItemId) -> Result<()> {
        let entry = self.items.get_mut(&id).ok_or(EngineError::UnknownItem(id))?;
        entry.ref_count = entry.ref_count.saturating_sub(1);
        if entry.ref_count == 0 && !entry.visible {
            self.items.remove(&id);
        }
        Ok(())
    }

    fn keep_ids(&mut self, ids: impl Iterator<Item = ItemId>) {
        use std::collections::HashSet;
        let unique: HashSet<ItemId> = ids.collect();
        for id in unique {
            if let Some(entry) = self.items.get_mut(&id) {
                entry.ref_count += 1;
            }
        }
    }

    fn release_ids(&mut self, ids: impl Iterator<Item = ItemId>) {
        use std::collections::HashSet;
        let unique: HashSet<ItemId> = ids.collect();
        for id in unique {
            if let Some(entry) = self.items.get_mut(&id) {
                entry.ref_count = entry.ref_count.saturating_sub(1);
                if entry.ref_count == 0 && !entry.visible {
                    self.items.remove(&id);
                }
            }
        }
    }

    // ---- eraser micro-steps -------------------------------------------

    /// Begins accumulating an eraser drag as one undo step instead of one
    /// step per point crossed. Mirrors the "eraser micro-steps" coalescing
    /// the teacher's history engine performs for freehand erasing.
    pub fn begin_eraser_stroke(&mut self) -> Result<()> {
        if self.eraser_step.is_some() {
            return Err(EngineError::EraserStepAlreadyOpen);
        }
        self.eraser_step = Some(Step::default());
        Ok(())
    }

    /// Records that the eraser fully removed `id`, as part of the
    /// in-progress stroke started by [`Self::begin_eraser_stroke`].
    pub fn eraser_delete_whole(&mut self, id: ItemId) -> Result<()> {
        let step = self
            .eraser_step
            .as_mut()
            .ok_or(EngineError::NoEraserStepOpen)?;
        let entry = self
            .items
            .get_mut(&id)
            .filter(|e| e.visible)
            .ok_or(EngineError::UnknownItem(id))?;
        entry.visible = false;
        entry.ref_count = entry.ref_count.saturating_sub(1);
        step.deleted.push(DeletedItem {
            id,
            item: entry.item.clone(),
            z: entry.z,
        });
        Ok(())
    }

    /// Records that the eraser split `id` into zero or more surviving
    /// fragments (the original is always removed; fragments are freshly
    /// created items at the same z).
    pub fn eraser_split(&mut self, id: ItemId, fragments: Vec<Shape>) -> Result<Vec<ItemId>> {
        let z = self.items.get(&id).map(|e| e.z).unwrap_or(0.0);
        self.eraser_delete_whole(id)?;
        let step = self.eraser_step.as_mut().expect("checked by eraser_delete_whole");
        let mut new_ids = Vec::with_capacity(fragments.len());
        for fragment in fragments {
            let new_id = self.next_id;
            self.next_id += 1;
            self.items.insert(new_id, Entry::live(fragment.clone(), z));
            step.created.push(CreatedItem {
                id: new_id,
                item: fragment,
                z,
            });
            new_ids.push(new_id);
        }
        Ok(new_ids)
    }

    /// Commits the accumulated eraser micro-steps as a single undo entry.
    /// A no-op (no history entry pushed) if nothing was erased.
    pub fn commit_eraser_stroke(&mut self) {
        if let Some(step) = self.eraser_step.take()
            && !step.is_empty()
        {
            self.push_step(step);
        }
    }

    /// Abandons the in-progress eraser stroke, restoring every item it had
    /// touched to its pre-stroke state.
    pub fn cancel_eraser_stroke(&mut self) {
        if let Some(step) = self.eraser_step.take() {
            history::apply_inverse(&mut self.items, &step);
        }
    }

    pub fn eraser_stroke_in_progress(&self) -> bool {
        self.eraser_step.is_some()
    }

    // ---- undo / redo ----------------------------------------------------

    fn push_step(&mut self, step: Step) {
        if step.is_empty() {
            return;
        }
        self.keep_ids(step.referenced_ids());
        self.undo_stack.push(step);
        let discarded: Vec<Step> = self.redo_stack.drain(..).collect();
        for step in &discarded {
            self.release_ids(step.referenced_ids());
        }
        self.trim_undo_stack();
    }

    fn trim_undo_stack(&mut self) {
        while self.undo_stack.len() > self.history_limit {
            let removed = self.undo_stack.remove(0);
            self.release_ids(removed.referenced_ids());
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo(&mut self) -> Result<()> {
        let step = self.undo_stack.pop().ok_or(EngineError::NothingToUndo)?;
        history::apply_inverse(&mut self.items, &step);
        self.redo_stack.push(step);
        Ok(())
    }

    pub fn redo(&mut self) -> Result<()> {
        let step = self.redo_stack.pop().ok_or(EngineError::NothingToRedo)?;
        history::apply_forward(&mut self.items, &step);
        self.undo_stack.push(step);
        Ok(())
    }

    /// Trims both stacks to at most `limit` most-recent entries, releasing
    /// references held by anything older. Used by `ContainerRegistry` to
    /// enforce `history_length_visible_slides` / `history_length_hidden_slides`.
    pub fn clear_history(&mut self, limit: usize) {
        self.history_limit = limit;
        self.trim_undo_stack();
        while self.redo_stack.len() > limit {
            let removed = self.redo_stack.remove(0);
            self.release_ids(removed.referenced_ids());
        }
    }

    pub fn clear_all_history(&mut self) {
        self.clear_history(0);
    }

    #[cfg(test)]
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    #[cfg(test)]
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::RED;

    fn line() -> Shape {
        Shape::Line {
            x1: 0,
            y1: 0,
            x2: 1,
            y2: 1,
            color: RED,
            thick: 1.0,
        }
    }

    #[test]
    fn add_then_undo_removes_item() {
        let mut c = PathContainer::new();
        let id = c.add_item(line(), 0.0);
        assert!(c.get(id).is_some());
        c.undo().unwrap();
        assert!(c.get(id).is_none());
        assert!(c.can_redo());
    }

    #[test]
    fn undo_then_redo_restores_item() {
        let mut c = PathContainer::new();
        let id = c.add_item(line(), 0.0);
        c.undo().unwrap();
        c.redo().unwrap();
        assert!(c.get(id).is_some());
    }

    #[test]
    fn undo_on_empty_history_errors() {
        let mut c = PathContainer::new();
        assert!(matches!(c.undo(), Err(EngineError::NothingToUndo)));
    }

    #[test]
    fn new_action_clears_redo_stack() {
        let mut c = PathContainer::new();
        let id = c.add_item(line(), 0.0);
        c.undo().unwrap();
        assert!(c.can_redo());
        c.add_item(line(), 0.0);
        assert!(!c.can_redo());
        let _ = id;
    }

    #[test]
    fn z_order_sorts_ascending() {
        let mut c = PathContainer::new();
        let high = c.add_item(line(), 5.0);
        let low = c.add_item(line(), 1.0);
        assert_eq!(c.z_order(), vec![low, high]);
    }

    #[test]
    fn eraser_stroke_coalesces_into_one_undo_entry() {
        let mut c = PathContainer::new();
        let a = c.add_item(line(), 0.0);
        let b = c.add_item(line(), 0.0);
        let depth_before = c.undo_depth();

        c.begin_eraser_stroke().unwrap();
        c.eraser_delete_whole(a).unwrap();
        c.eraser_delete_whole(b).unwrap();
        c.commit_eraser_stroke();

        assert_eq!(c.undo_depth(), depth_before + 1);
        assert!(c.get(a).is_none());
        assert!(c.get(b).is_none());

        c.undo().unwrap();
        assert!(c.get(a).is_some());
        assert!(c.get(b).is_some());
    }

    #[test]
    fn cancel_eraser_stroke_restores_without_history_entry() {
        let mut c = PathContainer::new();
        let a = c.add_item(line(), 0.0);
        let depth_before = c.undo_depth();

        c.begin_eraser_stroke().unwrap();
        c.eraser_delete_whole(a).unwrap();
        c.cancel_eraser_stroke();

        assert_eq!(c.undo_depth(), depth_before);
        assert!(c.get(a).is_some());
    }

    #[test]
    fn eraser_split_creates_fragments_and_undo_restores_original() {
        let mut c = PathContainer::new();
        let a = c.add_item(line(), 0.0);

        c.begin_eraser_stroke().unwrap();
        let fragments = c.eraser_split(a, vec![line(), line()]).unwrap();
        c.commit_eraser_stroke();

        assert!(c.get(a).is_none());
        assert_eq!(fragments.len(), 2);
        for id in &fragments {
            assert!(c.get(*id).is_some());
        }

        c.undo().unwrap();
        assert!(c.get(a).is_some());
        for id in &fragments {
            assert!(c.get(*id).is_none());
        }
    }

    #[test]
    fn clear_history_trims_undo_stack_and_releases_refs() {
        let mut c = PathContainer::new();
        for _ in 0..5 {
            c.add_item(line(), 0.0);
        }
        assert_eq!(c.undo_depth(), 5);
        c.clear_history(2);
        assert_eq!(c.undo_depth(), 2);
    }

    #[test]
    fn move_item_records_transform_and_undoes() {
        let mut c = PathContainer::new();
        let id = c.add_item(line(), 0.0);
        let t = Transform::translation(10.0, 0.0);
        c.set_transform(id, t).unwrap();
        assert_eq!(c.get(id).unwrap().transform, t);
        c.undo().unwrap();
        assert_eq!(c.get(id).unwrap().transform, Transform::IDENTITY);
    }

    #[test]
    fn selection_op_composes_onto_initial_transform() {
        let mut c = PathContainer::new();
        let id = c.add_item(line(), 0.0);
        let initial = Transform::translation(5.0, 5.0);
        c.set_transform(id, initial).unwrap();
        let op = Transform::translation(1.0, 1.0);
        c.apply_selection_op(id, op, initial).unwrap();
        assert_eq!(c.get(id).unwrap().transform, Transform::translation(6.0, 6.0));
    }

    #[test]
    fn keep_and_release_purge_invisible_item_at_zero() {
        let mut c = PathContainer::new();
        let id = c.add_item(line(), 0.0);
        c.keep_item(id).unwrap();
        c.remove_item(id).unwrap();
        c.undo().unwrap();
        c.redo().unwrap();
        // still held externally
        assert!(c.items.contains_key(&id));
        c.release_item(id).unwrap();
        // history (the delete step) still references it, so it must survive.
        assert!(c.items.contains_key(&id));
    }
}
