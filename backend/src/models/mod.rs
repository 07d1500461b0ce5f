//! Domain models for the inventory

pub mod container;
pub mod error;
pub mod item;
pub mod item_box;

// Re-exports
pub use container::Container;
pub use error::{InventoryError, InventoryResult, ValidationError};
pub use item::{Item, ItemKey};
pub use item_box::{BoxKey, BoxRef, ItemBox};
