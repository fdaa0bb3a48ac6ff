//! Applies a [`Step`] or its inverse directly against the item arena.
//!
//! Kept as free functions over `&mut HashMap<ItemId, Entry>` (rather than
//! methods on `PathContainer`) so both `undo`/`redo` and the eraser-stroke
//! cancel path can share them without re-borrowing the whole container.

use std::collections::HashMap;

use super::{Entry, ItemId, Step};

pub(super) fn apply_inverse(items: &mut HashMap<ItemId, Entry>, step: &Step) {
    // Undo runs each change list in the opposite order it would have been
    // applied, and deleted-before-created so a create+delete+undo sequence
    // restores state in the right order even though both lists can mention
    // overlapping ids in pathological replay scenarios.
    for change in step.deleted.iter().rev() {
        match items.get_mut(&change.id) {
            Some(entry) => {
                entry.visible = true;
                entry.ref_count += 1;
            }
            None => {
                items.insert(
                    change.id,
                    Entry {
                        item: change.item.clone(),
                        ref_count: 1,
                        visible: true,
                        z: change.z,
                        transform: crate::util::Transform::IDENTITY,
                    },
                );
            }
        }
    }
    for change in step.created.iter().rev() {
        if let Some(entry) = items.get_mut(&change.id) {
            entry.visible = false;
            entry.ref_count = entry.ref_count.saturating_sub(1);
        }
    }
    for change in step.z_value_changes.iter().rev() {
        if let Some(entry) = items.get_mut(&change.id) {
            entry.z = change.before;
        }
    }
    for change in step.transformed.iter().rev() {
        if let Some(entry) = items.get_mut(&change.id) {
            entry.transform = change.before;
        }
    }
    for change in step.draw_tool_changes.iter().rev() {
        if let Some(entry) = items.get_mut(&change.id) {
            let _ = crate::item::set_style(&mut entry.item, change.before.clone());
        }
    }
    for change in step.text_property_changes.iter().rev() {
        if let Some(entry) = items.get_mut(&change.id) {
            let _ = crate::item::set_text_properties(&mut entry.item, change.before.clone());
        }
    }
}

pub(super) fn apply_forward(items: &mut HashMap<ItemId, Entry>, step: &Step) {
    for change in &step.created {
        match items.get_mut(&change.id) {
            Some(entry) => {
                entry.visible = true;
                entry.ref_count += 1;
            }
            None => {
                items.insert(
                    change.id,
                    Entry {
                        item: change.item.clone(),
                        ref_count: 1,
                        visible: true,
                        z: change.z,
                        transform: crate::util::Transform::IDENTITY,
                    },
                );
            }
        }
    }
    for change in &step.deleted {
        if let Some(entry) = items.get_mut(&change.id) {
            entry.visible = false;
            entry.ref_count = entry.ref_count.saturating_sub(1);
        }
    }
    for change in &step.z_value_changes {
        if let Some(entry) = items.get_mut(&change.id) {
            entry.z = change.after;
        }
    }
    for change in &step.transformed {
        if let Some(entry) = items.get_mut(&change.id) {
            entry.transform = change.after;
        }
    }
    for change in &step.draw_tool_changes {
        if let Some(entry) = items.get_mut(&change.id) {
            let _ = crate::item::set_style(&mut entry.item, change.after.clone());
        }
    }
    for change in &step.text_property_changes {
        if let Some(entry) = items.get_mut(&change.id) {
            let _ = crate::item::set_text_properties(&mut entry.item, change.after.clone());
        }
    }
}
