//! Views
//!
//! Three projections computed on demand from the live entity graph:
//! - **Object**: item attributes plus borrowed references to the live boxes
//! - **Json**: item attributes plus boxes reduced to `{qty, description}`
//! - **Table**: one flattened row per box, item scalars repeated on each row
//!
//! All view types serialize untagged, so `serde_json::to_value(view)` gives
//! the plain shape a caller embeds in a response.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::models::error::ValidationError;
use crate::models::item::ItemKey;
use crate::models::item_box::ItemBox;

/// Which projection to compute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewFormat {
    Object,
    Json,
    Table,
}

impl ViewFormat {
    /// Canonical lower-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewFormat::Object => "obj",
            ViewFormat::Json => "json",
            ViewFormat::Table => "table",
        }
    }

    /// Case-insensitive lookup; `None` for names that are not a format
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "obj" => Some(ViewFormat::Object),
            "json" => Some(ViewFormat::Json),
            "table" => Some(ViewFormat::Table),
            _ => None,
        }
    }
}

impl FromStr for ViewFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewFormat::parse(s)
            .ok_or_else(|| ValidationError::new("format", s, "must be one of obj, json, table"))
    }
}

impl fmt::Display for ViewFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A box reduced to plain data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoxRecord {
    pub qty: i64,
    pub description: String,
}

impl From<&ItemBox> for BoxRecord {
    fn from(bx: &ItemBox) -> Self {
        BoxRecord {
            qty: bx.qty(),
            description: bx.description().to_string(),
        }
    }
}

/// An item reduced to plain data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemRecord {
    pub collection: String,
    pub item_name: String,
    pub item_id: i64,
    pub boxes: Vec<BoxRecord>,
}

/// One flattened (item, box) row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub collection: String,
    pub item_name: String,
    pub item_id: i64,
    pub box_qty: i64,
    pub box_description: String,
}

/// An item with its live boxes
#[derive(Debug, Clone, Serialize)]
pub struct ItemObjectView<'a> {
    pub key: ItemKey,
    pub collection: &'a str,
    pub item_name: &'a str,
    pub item_id: i64,
    pub boxes: Vec<&'a ItemBox>,
}

/// Projection of a single item
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ItemView<'a> {
    Object(ItemObjectView<'a>),
    Json(ItemRecord),
    Table(Vec<TableRow>),
}

impl ItemView<'_> {
    pub fn format(&self) -> ViewFormat {
        match self {
            ItemView::Object(_) => ViewFormat::Object,
            ItemView::Json(_) => ViewFormat::Json,
            ItemView::Table(_) => ViewFormat::Table,
        }
    }
}

/// Projection of every item in a container, in insertion order
///
/// `Table` is flattened one level: rows of all items in a single list.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ContainerView<'a> {
    Object(Vec<ItemObjectView<'a>>),
    Json(Vec<ItemRecord>),
    Table(Vec<TableRow>),
}

impl ContainerView<'_> {
    pub fn format(&self) -> ViewFormat {
        match self {
            ContainerView::Object(_) => ViewFormat::Object,
            ContainerView::Json(_) => ViewFormat::Json,
            ContainerView::Table(_) => ViewFormat::Table,
        }
    }

    /// Number of top-level entries (items, or rows for `Table`)
    pub fn len(&self) -> usize {
        match self {
            ContainerView::Object(v) => v.len(),
            ContainerView::Json(v) => v.len(),
            ContainerView::Table(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse_is_case_insensitive() {
        assert_eq!(ViewFormat::parse("OBJ"), Some(ViewFormat::Object));
        assert_eq!(ViewFormat::parse("Json"), Some(ViewFormat::Json));
        assert_eq!(ViewFormat::parse("tAbLe"), Some(ViewFormat::Table));
        assert_eq!(ViewFormat::parse("xml"), None);
        assert_eq!(ViewFormat::parse(""), None);
    }

    #[test]
    fn test_format_from_str_errors_on_unknown() {
        let err = "csv".parse::<ViewFormat>().unwrap_err();
        assert_eq!(err.context(), "format");
        assert!(err.value().contains("csv"));
    }

    #[test]
    fn test_format_display_roundtrips() {
        for format in [ViewFormat::Object, ViewFormat::Json, ViewFormat::Table] {
            assert_eq!(format.to_string().parse::<ViewFormat>().unwrap(), format);
        }
    }
}
