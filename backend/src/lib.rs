//! Inventory Core - Rust Engine
//!
//! In-memory hierarchical inventory: a container of unique items, each item
//! owning one or more boxes.
//!
//! # Architecture
//!
//! - **models**: Domain types (Container, Item, ItemBox) and errors
//! - **descriptor**: Raw, unvalidated construction input (Rust or JSON)
//! - **views**: Object, JSON-safe and flattened table projections
//!
//! # Critical Invariants
//!
//! 1. An item always has at least one box
//! 2. A container never holds the same item (by identity) twice
//! 3. Invalid construction never yields a partially built entity

// Module declarations
pub mod descriptor;
pub mod models;
pub mod views;

// Re-exports for convenience
pub use descriptor::{BoxDescriptor, ItemDescriptor, ItemEntry};
pub use models::{
    container::Container,
    error::{InventoryError, InventoryResult, ValidationError},
    item::{Item, ItemKey},
    item_box::{BoxKey, BoxRef, ItemBox},
};
pub use views::{
    BoxRecord, ContainerView, ItemObjectView, ItemRecord, ItemView, TableRow, ViewFormat,
};
