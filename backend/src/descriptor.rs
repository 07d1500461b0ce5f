//! Raw descriptors
//!
//! Plain, unvalidated input used to build items and containers. Descriptors
//! come either from Rust code (tuples, struct literals) or from JSON sent by
//! a caller:
//!
//! ```json
//! [
//!   { "collection": "hardware", "item_name": "bolt", "item_id": 1,
//!     "boxes": [[5, "small"], [10, "large"]] }
//! ]
//! ```
//!
//! JSON shape problems are reported as validation errors naming the
//! offending field, the same as field checks on the entities themselves.

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::models::error::{InventoryError, InventoryResult};
use crate::models::item::Item;

/// A positional `(qty, description)` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxDescriptor {
    pub qty: i64,
    pub description: String,
}

impl BoxDescriptor {
    pub fn new(qty: i64, description: impl Into<String>) -> Self {
        Self {
            qty,
            description: description.into(),
        }
    }
}

impl From<(i64, &str)> for BoxDescriptor {
    fn from((qty, description): (i64, &str)) -> Self {
        BoxDescriptor::new(qty, description)
    }
}

impl From<(i64, String)> for BoxDescriptor {
    fn from((qty, description): (i64, String)) -> Self {
        BoxDescriptor::new(qty, description)
    }
}

// Serialized in the same positional form it is parsed from
impl Serialize for BoxDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.qty, &self.description).serialize(serializer)
    }
}

impl TryFrom<&Value> for BoxDescriptor {
    type Error = InventoryError;

    fn try_from(value: &Value) -> InventoryResult<Self> {
        let pair = match value.as_array() {
            Some(pair) if pair.len() == 2 => pair,
            _ => {
                return Err(InventoryError::validation(
                    "boxes[]",
                    value,
                    "must be a [qty, description] pair",
                ))
            }
        };

        let qty = pair[0].as_i64().ok_or_else(|| {
            InventoryError::validation("boxes[].qty", &pair[0], "must be a positive integer")
        })?;
        let description = pair[1].as_str().ok_or_else(|| {
            InventoryError::validation(
                "boxes[].description",
                &pair[1],
                "must be a non-empty string",
            )
        })?;

        Ok(BoxDescriptor::new(qty, description))
    }
}

/// Everything needed to construct an [`Item`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemDescriptor {
    pub collection: String,
    pub item_name: String,
    pub item_id: i64,
    pub boxes: Vec<BoxDescriptor>,
}

impl ItemDescriptor {
    pub fn new(
        collection: impl Into<String>,
        item_name: impl Into<String>,
        item_id: i64,
        boxes: Vec<BoxDescriptor>,
    ) -> Self {
        Self {
            collection: collection.into(),
            item_name: item_name.into(),
            item_id,
            boxes,
        }
    }
}

fn required<'a>(object: &'a serde_json::Map<String, Value>, key: &str) -> InventoryResult<&'a Value> {
    object
        .get(key)
        .ok_or_else(|| InventoryError::validation(key, Value::Null, "is required"))
}

fn required_str<'a>(
    object: &'a serde_json::Map<String, Value>,
    key: &str,
) -> InventoryResult<&'a str> {
    let value = required(object, key)?;
    value
        .as_str()
        .ok_or_else(|| InventoryError::validation(key, value, "must be a non-empty string"))
}

impl TryFrom<&Value> for ItemDescriptor {
    type Error = InventoryError;

    fn try_from(value: &Value) -> InventoryResult<Self> {
        let object = value.as_object().ok_or_else(|| {
            InventoryError::validation("item descriptor", value, "must be an object")
        })?;

        let collection = required_str(object, "collection")?;
        let item_name = required_str(object, "item_name")?;

        let raw_id = required(object, "item_id")?;
        let item_id = raw_id.as_i64().ok_or_else(|| {
            InventoryError::validation("item_id", raw_id, "must be a positive integer")
        })?;

        let raw_boxes = required(object, "boxes")?;
        let boxes = raw_boxes
            .as_array()
            .ok_or_else(|| {
                InventoryError::validation("boxes", raw_boxes, "must be a list of box descriptors")
            })?
            .iter()
            .map(BoxDescriptor::try_from)
            .collect::<InventoryResult<Vec<_>>>()?;

        Ok(ItemDescriptor::new(collection, item_name, item_id, boxes))
    }
}

/// One entry handed to a container: an item built elsewhere, or a
/// descriptor the container builds into a fresh item
#[derive(Debug, Clone)]
pub enum ItemEntry {
    Existing(Item),
    Descriptor(ItemDescriptor),
}

impl From<Item> for ItemEntry {
    fn from(item: Item) -> Self {
        ItemEntry::Existing(item)
    }
}

impl From<ItemDescriptor> for ItemEntry {
    fn from(descriptor: ItemDescriptor) -> Self {
        ItemEntry::Descriptor(descriptor)
    }
}
