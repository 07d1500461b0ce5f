//! Box model
//!
//! The leaf of the inventory hierarchy: a quantity plus a description,
//! owned by exactly one [`Item`](crate::models::item::Item).
//!
//! A box holds its parent's [`ItemKey`] rather than a reference to the item.
//! The key is only used to route removal requests back to the owner; it does
//! not keep the item alive.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::models::error::{require_non_empty, require_positive, InventoryResult};
use crate::models::item::ItemKey;

/// Identity of a box, assigned once at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoxKey(Uuid);

impl BoxKey {
    pub(crate) fn new() -> Self {
        BoxKey(Uuid::new_v4())
    }
}

impl fmt::Display for BoxKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A box paired with the item it belongs to
///
/// This is what a box hands out when it wants to be removed: the owner
/// (or a container holding the owner) resolves `item` and applies its own
/// removal rules to `key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoxRef {
    pub item: ItemKey,
    pub key: BoxKey,
}

/// A quantity of something, described in free text
///
/// # Example
/// ```
/// use inventory_core_rs::Item;
///
/// let mut item = Item::new("hardware", "bolt", 1, vec![(5, "small").into()]).unwrap();
/// let key = item.boxes().next().unwrap().key();
///
/// let bx = item.get_box_mut(key).unwrap();
/// bx.set_qty(12).unwrap();
/// assert_eq!(bx.qty(), 12);
/// assert!(bx.set_qty(0).is_err());
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ItemBox {
    /// Unique box identity
    key: BoxKey,

    /// Owning item (non-owning back-reference)
    item: ItemKey,

    /// Quantity, always > 0
    qty: i64,

    /// Free text, never empty; stored untrimmed
    description: String,
}

impl ItemBox {
    /// Create a box bound to `parent`
    ///
    /// Only items create boxes, so this stays crate-private. The binding to
    /// `parent` is permanent.
    pub(crate) fn new(qty: i64, description: &str, parent: ItemKey) -> InventoryResult<Self> {
        let qty = require_positive("ItemBox.qty", qty)?;
        let description = require_non_empty("ItemBox.description", description)?;

        Ok(Self {
            key: BoxKey::new(),
            item: parent,
            qty,
            description,
        })
    }

    /// Get box identity
    pub fn key(&self) -> BoxKey {
        self.key
    }

    /// Get quantity
    pub fn qty(&self) -> i64 {
        self.qty
    }

    /// Get description (as stored, not trimmed)
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Get the owning item's key
    pub fn parent_item(&self) -> ItemKey {
        self.item
    }

    /// Removal handle: pass to
    /// [`Container::remove_box`](crate::models::container::Container::remove_box)
    /// to have the parent item remove this box
    pub fn handle(&self) -> BoxRef {
        BoxRef {
            item: self.item,
            key: self.key,
        }
    }

    /// Set quantity
    ///
    /// # Errors
    /// `Validation` if `qty <= 0`; the box is left unchanged.
    pub fn set_qty(&mut self, qty: i64) -> InventoryResult<()> {
        self.qty = require_positive("ItemBox.set_qty", qty)?;
        Ok(())
    }

    /// Set description
    ///
    /// The value is stored as given. Only the empty string is rejected.
    pub fn set_description(&mut self, description: &str) -> InventoryResult<()> {
        self.description = require_non_empty("ItemBox.set_description", description)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parent() -> ItemKey {
        ItemKey::new()
    }

    #[test]
    fn test_new_box_binds_parent() {
        let owner = parent();
        let bx = ItemBox::new(5, "small", owner).unwrap();

        assert_eq!(bx.qty(), 5);
        assert_eq!(bx.description(), "small");
        assert_eq!(bx.parent_item(), owner);
        assert_eq!(bx.handle(), BoxRef { item: owner, key: bx.key() });
    }

    #[test]
    fn test_new_box_rejects_non_positive_qty() {
        for qty in [0, -1, i64::MIN] {
            let err = ItemBox::new(qty, "small", parent()).unwrap_err();
            assert!(err.is_validation(), "qty {} should be rejected", qty);
        }
    }

    #[test]
    fn test_new_box_rejects_empty_description() {
        let err = ItemBox::new(1, "", parent()).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("ItemBox.description"));
    }

    #[test]
    fn test_description_is_not_trimmed() {
        let bx = ItemBox::new(1, "  padded ", parent()).unwrap();
        assert_eq!(bx.description(), "  padded ");
    }

    #[test]
    fn test_failed_setter_leaves_box_unchanged() {
        let mut bx = ItemBox::new(3, "crate", parent()).unwrap();

        assert!(bx.set_qty(-4).is_err());
        assert!(bx.set_description("").is_err());

        assert_eq!(bx.qty(), 3);
        assert_eq!(bx.description(), "crate");
    }

    #[test]
    fn test_each_box_gets_fresh_key() {
        let owner = parent();
        let a = ItemBox::new(1, "a", owner).unwrap();
        let b = ItemBox::new(1, "a", owner).unwrap();
        assert_ne!(a.key(), b.key());
    }
}
