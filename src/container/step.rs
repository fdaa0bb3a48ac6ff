//! The undoable unit of change: a [`Step`] groups everything one user
//! action touched so it undoes/redoes atomically.

use crate::draw::Shape;
use crate::item::{StrokeStyle, TextProperties};
use crate::util::Transform;

use super::ItemId;

#[derive(Debug, Clone)]
pub struct ZValueChange {
    pub id: ItemId,
    pub before: f64,
    pub after: f64,
}

#[derive(Debug, Clone)]
pub struct TransformChange {
    pub id: ItemId,
    pub before: Transform,
    pub after: Transform,
}

#[derive(Debug, Clone)]
pub struct DrawToolChange {
    pub id: ItemId,
    pub before: StrokeStyle,
    pub after: StrokeStyle,
}

#[derive(Debug, Clone)]
pub struct TextPropertyChange {
    pub id: ItemId,
    pub before: TextProperties,
    pub after: TextProperties,
}

#[derive(Debug, Clone)]
pub struct CreatedItem {
    pub id: ItemId,
    pub item: Shape,
    pub z: f64,
}

#[derive(Debug, Clone)]
pub struct DeletedItem {
    pub id: ItemId,
    pub item: Shape,
    pub z: f64,
}

/// One entry in the undo/redo history.
///
/// Every field is independently optional (usually empty) so a single user
/// gesture that, say, only moves items populates `transformed` and leaves
/// the rest empty rather than forcing a step "kind" tag.
#[derive(Debug, Clone, Default)]
pub struct Step {
    pub z_value_changes: Vec<ZValueChange>,
    pub transformed: Vec<TransformChange>,
    pub draw_tool_changes: Vec<DrawToolChange>,
    pub text_property_changes: Vec<TextPropertyChange>,
    pub created: Vec<CreatedItem>,
    pub deleted: Vec<DeletedItem>,
}

impl Step {
    pub fn is_empty(&self) -> bool {
        self.z_value_changes.is_empty()
            && self.transformed.is_empty()
            && self.draw_tool_changes.is_empty()
            && self.text_property_changes.is_empty()
            && self.created.is_empty()
            && self.deleted.is_empty()
    }

    /// Every `ItemId` this step references, for reference-counting and for
    /// history pruning when items are purged outright (e.g. page unload).
    pub fn referenced_ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.z_value_changes
            .iter()
            .map(|c| c.id)
            .chain(self.transformed.iter().map(|c| c.id))
            .chain(self.draw_tool_changes.iter().map(|c| c.id))
            .chain(self.text_property_changes.iter().map(|c| c.id))
            .chain(self.created.iter().map(|c| c.id))
            .chain(self.deleted.iter().map(|c| c.id))
    }
}
