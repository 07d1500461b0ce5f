//! Container
//!
//! Top-level aggregate holding a set of unique items.
//!
//! # Critical Invariants
//!
//! 1. **Identity Uniqueness**: Each `ItemKey` appears at most once
//! 2. **Order Validity**: Every key in `order` exists in `items` and vice versa
//! 3. **Atomic Construction**: A failing `new`/`add_items` call inserts nothing
//!
//! Distinct items may share an `item_id`; only identity is deduplicated.

use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

use crate::descriptor::{ItemDescriptor, ItemEntry};
use crate::models::error::{require_positive, InventoryError, InventoryResult};
use crate::models::item::{Item, ItemKey};
use crate::models::item_box::{BoxRef, ItemBox};
use crate::views::{ContainerView, ViewFormat};

/// A set of items keyed by identity, iterated in insertion order
///
/// # Example
///
/// ```rust
/// use inventory_core_rs::{Container, ItemDescriptor, ViewFormat};
///
/// let container = Container::from_descriptors(vec![
///     ItemDescriptor::new("hardware", "bolt", 1, vec![(5, "small").into()]),
///     ItemDescriptor::new("hardware", "nut", 2, vec![(8, "m6").into()]),
/// ]).unwrap();
///
/// assert_eq!(container.len(), 2);
/// assert_eq!(container.container_data(ViewFormat::Table).len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Container {
    /// All items, indexed by identity
    items: HashMap<ItemKey, Item>,

    /// Item keys in insertion order
    order: Vec<ItemKey>,
}

impl Container {
    /// Create a container from existing items and/or raw descriptors
    ///
    /// # Errors
    /// Whatever `Item::new` reports for the first bad descriptor, unchanged.
    pub fn new<I, E>(entries: I) -> InventoryResult<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<ItemEntry>,
    {
        let mut container = Container::default();
        container.add_items(entries)?;
        Ok(container)
    }

    /// Create a container from raw descriptors only
    pub fn from_descriptors(descriptors: Vec<ItemDescriptor>) -> InventoryResult<Self> {
        Container::new(descriptors)
    }

    /// Create a container from a JSON array of item descriptors
    ///
    /// # Example
    /// ```
    /// use inventory_core_rs::Container;
    /// use serde_json::json;
    ///
    /// let container = Container::from_json(&json!([
    ///     { "collection": "tools", "item_name": "saw", "item_id": 4, "boxes": [[1, "blade"]] }
    /// ])).unwrap();
    /// assert_eq!(container.len(), 1);
    /// ```
    pub fn from_json(raw: &Value) -> InventoryResult<Self> {
        let entries = raw
            .as_array()
            .ok_or_else(|| {
                InventoryError::validation("Container.from_json", raw, "must be a list of items")
            })?
            .iter()
            .map(ItemDescriptor::try_from)
            .collect::<InventoryResult<Vec<_>>>()?;

        Container::from_descriptors(entries)
    }

    /// Add items
    ///
    /// Descriptors always become fresh items. An existing item whose key is
    /// already stored is skipped. All descriptors are built before anything
    /// is inserted.
    ///
    /// # Returns
    /// Keys that were newly inserted, in entry order
    pub fn add_items<I, E>(&mut self, entries: I) -> InventoryResult<Vec<ItemKey>>
    where
        I: IntoIterator<Item = E>,
        E: Into<ItemEntry>,
    {
        let built = entries
            .into_iter()
            .map(|entry| match entry.into() {
                ItemEntry::Existing(item) => Ok(item),
                ItemEntry::Descriptor(descriptor) => Item::from_descriptor(&descriptor),
            })
            .collect::<InventoryResult<Vec<_>>>()?;

        let mut inserted = Vec::new();
        for item in built {
            let key = item.key();
            if self.items.contains_key(&key) {
                debug!(item = %key, "item already present, skipping");
                continue;
            }
            self.items.insert(key, item);
            self.order.push(key);
            inserted.push(key);
        }

        debug!(added = inserted.len(), total = self.order.len(), "items added");
        Ok(inserted)
    }

    /// Get an item by identity
    pub fn get_item(&self, key: ItemKey) -> Option<&Item> {
        self.items.get(&key)
    }

    /// Get a mutable item by identity
    pub fn get_item_mut(&mut self, key: ItemKey) -> Option<&mut Item> {
        self.items.get_mut(&key)
    }

    /// Check whether an item with this identity is stored
    pub fn contains(&self, key: ItemKey) -> bool {
        self.items.contains_key(&key)
    }

    /// Iterate items in insertion order
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.order.iter().filter_map(|key| self.items.get(key))
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// All items whose numeric `item_id` equals `id`
    ///
    /// # Errors
    /// `Validation` if `id <= 0`
    pub fn get_items_by_id(&self, id: i64) -> InventoryResult<Vec<&Item>> {
        let id = require_positive("Container.get_items_by_id", id)?;
        Ok(self.items().filter(|item| item.item_id() == id).collect())
    }

    /// Detach an item
    ///
    /// The item keeps its boxes; it is simply no longer in this container.
    ///
    /// # Errors
    /// `Validation` if no item with this key is stored; nothing changes
    pub fn delete_item(&mut self, key: ItemKey) -> InventoryResult<Item> {
        let item = self.items.remove(&key).ok_or_else(|| {
            InventoryError::validation("Container.delete_item", key, "is not in this container")
        })?;
        self.order.retain(|k| *k != key);

        debug!(item = %key, item_id = item.item_id(), remaining = self.order.len(), "item deleted");
        Ok(item)
    }

    /// Route a box's removal request to its parent item
    ///
    /// # Errors
    /// - `Validation` if the parent item is not here or does not own the box
    /// - `InvariantViolation` if it is the parent's only box
    pub fn remove_box(&mut self, handle: BoxRef) -> InventoryResult<ItemBox> {
        let item = self.items.get_mut(&handle.item).ok_or_else(|| {
            InventoryError::validation(
                "Container.remove_box",
                handle.item,
                "parent item is not in this container",
            )
        })?;
        item.remove_box(handle.key)
    }

    /// Sum of box quantities across all items
    ///
    /// `None` if the sum does not fit in an `i64`.
    pub fn total_qty(&self) -> Option<i64> {
        self.items()
            .try_fold(0i64, |acc, item| acc.checked_add(item.total_qty()?))
    }

    /// Project every item into `format` and concatenate
    pub fn container_data(&self, format: ViewFormat) -> ContainerView<'_> {
        match format {
            ViewFormat::Object => {
                ContainerView::Object(self.items().map(Item::object_view).collect())
            }
            ViewFormat::Json => ContainerView::Json(self.items().map(Item::record).collect()),
            ViewFormat::Table => ContainerView::Table(self.items().flat_map(Item::rows).collect()),
        }
    }

    /// Project by format name (`"obj"`, `"json"`, `"table"`, any case)
    ///
    /// An unknown name is "no data", not an error: returns `None`.
    pub fn get_container_data(&self, format: &str) -> Option<ContainerView<'_>> {
        ViewFormat::parse(format).map(|format| self.container_data(format))
    }
}
