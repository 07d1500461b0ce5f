//! Tests for the item model
//!
//! CRITICAL: An item never drops below one box.

use inventory_core_rs::{InventoryError, Item, ItemView, ViewFormat};

fn single_box_item() -> Item {
    Item::new("hardware", "bolt", 1, vec![(5, "small").into()]).unwrap()
}

fn two_box_item() -> Item {
    Item::new(
        "hardware",
        "bolt",
        1,
        vec![(5, "small").into(), (10, "large").into()],
    )
    .unwrap()
}

#[test]
fn test_item_new() {
    let item = two_box_item();

    assert_eq!(item.collection(), "hardware");
    assert_eq!(item.item_name(), "bolt");
    assert_eq!(item.item_id(), 1);
    assert_eq!(item.box_count(), 2);
}

#[test]
fn test_removing_sole_box_is_invariant_violation() {
    let mut item = single_box_item();
    let key = item.boxes().next().unwrap().key();

    let err = item.remove_box(key).unwrap_err();
    assert_eq!(
        err,
        InventoryError::InvariantViolation {
            item_name: "bolt".to_string(),
            item_id: 1,
        }
    );

    // Box is still there
    assert_eq!(item.box_count(), 1);
    assert!(item.get_box(key).is_some());
}

#[test]
fn test_remove_one_of_two_then_second_fails() {
    let mut item = two_box_item();
    let keys: Vec<_> = item.boxes().map(|bx| bx.key()).collect();

    let removed = item.remove_box(keys[0]).unwrap();
    assert_eq!(removed.description(), "small");
    assert_eq!(item.box_count(), 1);

    assert!(item.remove_box(keys[1]).unwrap_err().is_invariant_violation());
    assert_eq!(item.box_count(), 1);
}

#[test]
fn test_remove_already_removed_box() {
    let mut item = two_box_item();
    item.add_boxes(vec![(1, "spare").into()]).unwrap();
    let first = item.boxes().next().unwrap().key();

    item.remove_box(first).unwrap();
    assert!(item.remove_box(first).unwrap_err().is_validation());
}

#[test]
fn test_add_boxes_grows_set() {
    let mut item = single_box_item();
    let keys = item
        .add_boxes(vec![(2, "tin").into(), (3, "crate").into()])
        .unwrap();

    assert_eq!(keys.len(), 2);
    assert_eq!(item.box_count(), 3);
    let descriptions: Vec<&str> = item.boxes().map(|bx| bx.description()).collect();
    assert_eq!(descriptions, vec!["small", "tin", "crate"]);
}

#[test]
fn test_get_boxes_by_name_trims_search() {
    let item = Item::new(
        "hardware",
        "bolt",
        1,
        vec![(5, "small").into(), (6, "small").into(), (7, "large").into()],
    )
    .unwrap();

    let found = item.get_boxes_by_name("  small ").unwrap();
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|bx| bx.description() == "small"));
}

#[test]
fn test_get_boxes_by_name_does_not_trim_stored() {
    let item = Item::new("hardware", "bolt", 1, vec![(5, " small").into()]).unwrap();
    assert!(item.get_boxes_by_name("small").unwrap().is_empty());
}

#[test]
fn test_get_boxes_by_name_rejects_blank() {
    let item = single_box_item();
    assert!(item.get_boxes_by_name("").unwrap_err().is_validation());
    assert!(item.get_boxes_by_name("   ").unwrap_err().is_validation());
}

#[test]
fn test_get_item_data_formats() {
    let item = two_box_item();

    assert!(matches!(item.get_item_data("OBJ"), Some(ItemView::Object(_))));
    assert!(matches!(item.get_item_data("json"), Some(ItemView::Json(_))));
    assert!(matches!(item.get_item_data("Table"), Some(ItemView::Table(_))));
    assert!(item.get_item_data("yaml").is_none());
}

#[test]
fn test_table_view_has_row_per_box() {
    let item = two_box_item();

    let ItemView::Table(rows) = item.item_data(ViewFormat::Table) else {
        panic!("expected table view");
    };
    assert_eq!(rows.len(), 2);
    for row in &rows {
        assert_eq!(row.collection, "hardware");
        assert_eq!(row.item_name, "bolt");
        assert_eq!(row.item_id, 1);
    }
    assert_eq!((rows[0].box_qty, rows[0].box_description.as_str()), (5, "small"));
    assert_eq!((rows[1].box_qty, rows[1].box_description.as_str()), (10, "large"));
}

#[test]
fn test_object_view_reflects_live_boxes() {
    let mut item = two_box_item();
    let key = item.boxes().next().unwrap().key();
    item.get_box_mut(key).unwrap().set_qty(99).unwrap();

    let ItemView::Object(view) = item.item_data(ViewFormat::Object) else {
        panic!("expected object view");
    };
    assert_eq!(view.key, item.key());
    assert_eq!(view.boxes[0].qty(), 99);
    assert_eq!(view.boxes[0].key(), key);
}
