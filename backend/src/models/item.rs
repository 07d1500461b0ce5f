//! Item model
//!
//! An inventory entry identified by collection, name and numeric id.
//! Each item has:
//! - Collection and name (trimmed, non-empty)
//! - Numeric item id (positive; not unique across items)
//! - One or more boxes, in insertion order
//!
//! CRITICAL: An item never has zero boxes. Construction requires at least one
//! box descriptor and removal of the last box is rejected.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::descriptor::{BoxDescriptor, ItemDescriptor};
use crate::models::error::{
    require_positive, require_trimmed, InventoryError, InventoryResult,
};
use crate::models::item_box::{BoxKey, ItemBox};
use crate::views::{BoxRecord, ItemObjectView, ItemRecord, ItemView, TableRow, ViewFormat};

/// Identity of an item, assigned once at creation
///
/// Containers dedupe by this key, never by `item_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemKey(Uuid);

impl ItemKey {
    pub(crate) fn new() -> Self {
        ItemKey(Uuid::new_v4())
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An inventory item owning a non-empty set of boxes
///
/// Cloning an item keeps its key, so a clone handed to a container that
/// already holds the original is treated as the same item.
///
/// # Example
/// ```
/// use inventory_core_rs::Item;
///
/// let mut item = Item::new(
///     "hardware",
///     "bolt",
///     3,
///     vec![(5, "small").into(), (10, "large").into()],
/// ).unwrap();
///
/// let first = item.boxes().next().unwrap().key();
/// item.remove_box(first).unwrap();
/// assert_eq!(item.box_count(), 1);
///
/// // The last box cannot go
/// let last = item.boxes().next().unwrap().key();
/// assert!(item.remove_box(last).unwrap_err().is_invariant_violation());
/// ```
#[derive(Debug, Clone)]
pub struct Item {
    /// Unique item identity
    key: ItemKey,

    /// Collection the item belongs to (trimmed)
    collection: String,

    /// Display name (trimmed)
    item_name: String,

    /// Numeric id supplied by the caller, always > 0
    item_id: i64,

    /// Owned boxes in insertion order, never empty
    boxes: Vec<ItemBox>,
}

impl Item {
    /// Create an item with its initial boxes
    ///
    /// # Errors
    /// `Validation` naming the first offending field: `collection`,
    /// `item_name`, `item_id`, the box list, or a box's `qty`/`description`.
    /// Nothing is returned on failure.
    pub fn new(
        collection: &str,
        item_name: &str,
        item_id: i64,
        boxes: Vec<BoxDescriptor>,
    ) -> InventoryResult<Self> {
        let collection = require_trimmed("Item.collection", collection)?;
        let item_name = require_trimmed("Item.item_name", item_name)?;
        let item_id = require_positive("Item.item_id", item_id)?;

        let key = ItemKey::new();
        let boxes = build_boxes("Item.boxes", key, &boxes)?;

        Ok(Self {
            key,
            collection,
            item_name,
            item_id,
            boxes,
        })
    }

    /// Create an item from a raw descriptor
    pub fn from_descriptor(descriptor: &ItemDescriptor) -> InventoryResult<Self> {
        Item::new(
            &descriptor.collection,
            &descriptor.item_name,
            descriptor.item_id,
            descriptor.boxes.clone(),
        )
    }

    /// Describe this item as the descriptor that would rebuild it
    pub fn to_descriptor(&self) -> ItemDescriptor {
        ItemDescriptor::new(
            self.collection.clone(),
            self.item_name.clone(),
            self.item_id,
            self.boxes
                .iter()
                .map(|bx| BoxDescriptor::new(bx.qty(), bx.description()))
                .collect(),
        )
    }

    /// Get item identity
    pub fn key(&self) -> ItemKey {
        self.key
    }

    /// Get collection
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Get item name
    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    /// Get numeric item id
    pub fn item_id(&self) -> i64 {
        self.item_id
    }

    /// Set collection (trimmed)
    pub fn set_collection(&mut self, collection: &str) -> InventoryResult<()> {
        self.collection = require_trimmed("Item.set_collection", collection)?;
        Ok(())
    }

    /// Set item name (trimmed)
    pub fn set_item_name(&mut self, item_name: &str) -> InventoryResult<()> {
        self.item_name = require_trimmed("Item.set_item_name", item_name)?;
        Ok(())
    }

    /// Set numeric item id
    pub fn set_item_id(&mut self, item_id: i64) -> InventoryResult<()> {
        self.item_id = require_positive("Item.set_item_id", item_id)?;
        Ok(())
    }

    /// Iterate boxes in insertion order
    pub fn boxes(&self) -> impl Iterator<Item = &ItemBox> {
        self.boxes.iter()
    }

    /// Number of boxes (always >= 1)
    pub fn box_count(&self) -> usize {
        self.boxes.len()
    }

    /// Get a box by key
    pub fn get_box(&self, key: BoxKey) -> Option<&ItemBox> {
        self.boxes.iter().find(|bx| bx.key() == key)
    }

    /// Get a mutable box by key, for its validated setters
    pub fn get_box_mut(&mut self, key: BoxKey) -> Option<&mut ItemBox> {
        self.boxes.iter_mut().find(|bx| bx.key() == key)
    }

    /// Sum of all box quantities
    ///
    /// `None` if the sum does not fit in an `i64`.
    pub fn total_qty(&self) -> Option<i64> {
        self.boxes
            .iter()
            .try_fold(0i64, |acc, bx| acc.checked_add(bx.qty()))
    }

    /// Append boxes
    ///
    /// Every descriptor is validated before any box is added, so a failing
    /// call leaves the item as it was.
    ///
    /// # Returns
    /// Keys of the new boxes, in descriptor order
    ///
    /// # Errors
    /// `Validation` if `descriptors` is empty or any descriptor is invalid
    pub fn add_boxes(&mut self, descriptors: Vec<BoxDescriptor>) -> InventoryResult<Vec<BoxKey>> {
        let added = build_boxes("Item.add_boxes", self.key, &descriptors)?;
        let keys: Vec<BoxKey> = added.iter().map(|bx| bx.key()).collect();

        self.boxes.extend(added);
        debug!(
            item = %self.key,
            added = keys.len(),
            total = self.boxes.len(),
            "boxes added"
        );

        Ok(keys)
    }

    /// Remove one of this item's boxes
    ///
    /// # Returns
    /// The detached box
    ///
    /// # Errors
    /// - `Validation` if `key` is not one of this item's boxes
    /// - `InvariantViolation` if it is the item's only box; the box stays
    pub fn remove_box(&mut self, key: BoxKey) -> InventoryResult<ItemBox> {
        let position = self
            .boxes
            .iter()
            .position(|bx| bx.key() == key)
            .ok_or_else(|| {
                InventoryError::validation("Item.remove_box", key, "is not a box of this item")
            })?;

        if self.boxes.len() == 1 {
            warn!(item = %self.key, item_id = self.item_id, "refused to remove last box");
            return Err(InventoryError::InvariantViolation {
                item_name: self.item_name.clone(),
                item_id: self.item_id,
            });
        }

        let removed = self.boxes.remove(position);
        debug!(item = %self.key, removed = %key, remaining = self.boxes.len(), "box removed");
        Ok(removed)
    }

    /// Boxes whose stored description equals the trimmed `description`
    ///
    /// Stored descriptions are not trimmed, so a box saved as `" small"` does
    /// not match a search for `"small"`.
    ///
    /// # Errors
    /// `Validation` if `description` is empty after trimming
    pub fn get_boxes_by_name(&self, description: &str) -> InventoryResult<Vec<&ItemBox>> {
        let wanted = require_trimmed("Item.get_boxes_by_name", description)?;
        Ok(self
            .boxes
            .iter()
            .filter(|bx| bx.description() == wanted)
            .collect())
    }

    /// Project this item into `format`
    pub fn item_data(&self, format: ViewFormat) -> ItemView<'_> {
        match format {
            ViewFormat::Object => ItemView::Object(self.object_view()),
            ViewFormat::Json => ItemView::Json(self.record()),
            ViewFormat::Table => ItemView::Table(self.rows()),
        }
    }

    /// Attributes plus borrowed live boxes
    pub(crate) fn object_view(&self) -> ItemObjectView<'_> {
        ItemObjectView {
            key: self.key,
            collection: &self.collection,
            item_name: &self.item_name,
            item_id: self.item_id,
            boxes: self.boxes.iter().collect(),
        }
    }

    /// Attributes plus boxes as plain records
    pub(crate) fn record(&self) -> ItemRecord {
        ItemRecord {
            collection: self.collection.clone(),
            item_name: self.item_name.clone(),
            item_id: self.item_id,
            boxes: self.boxes.iter().map(BoxRecord::from).collect(),
        }
    }

    /// One flattened row per box
    pub(crate) fn rows(&self) -> Vec<TableRow> {
        self.boxes
            .iter()
            .map(|bx| TableRow {
                collection: self.collection.clone(),
                item_name: self.item_name.clone(),
                item_id: self.item_id,
                box_qty: bx.qty(),
                box_description: bx.description().to_string(),
            })
            .collect()
    }

    /// Project this item by format name (`"obj"`, `"json"`, `"table"`,
    /// any case)
    ///
    /// An unknown name is "no data", not an error: returns `None`.
    pub fn get_item_data(&self, format: &str) -> Option<ItemView<'_>> {
        ViewFormat::parse(format).map(|format| self.item_data(format))
    }
}

/// Build boxes for `parent`, all or nothing
fn build_boxes(
    context: &str,
    parent: ItemKey,
    descriptors: &[BoxDescriptor],
) -> InventoryResult<Vec<ItemBox>> {
    if descriptors.is_empty() {
        return Err(InventoryError::validation(
            context,
            descriptors,
            "requires at least one [qty, description] box descriptor",
        ));
    }

    descriptors
        .iter()
        .map(|d| ItemBox::new(d.qty, &d.description, parent))
        .collect()
}
