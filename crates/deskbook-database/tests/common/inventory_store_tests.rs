//! InventoryStore contract tests.

use deskbook_core::error::ErrorKind;
use deskbook_database::InventoryStore;
use deskbook_entity::inventory::{
    Area, AreaChanges, InventoryTree, Item, ItemChanges, ItemGroup, NewArea, NewItem,
    NewItemGroup,
};

use super::unique;

pub async fn run_all<S>(store: &S)
where
    S: InventoryStore + Clone + 'static,
{
    test_create_and_get_area(store).await;
    test_duplicate_area_is_conflict(store).await;
    test_blank_fields_are_rejected(store).await;
    test_missing_parent_is_not_found(store).await;
    test_update_and_delete_missing_are_not_found(store).await;
    test_update_replaces_attributes(store).await;
    test_non_empty_delete_is_conflict(store).await;
    test_delete_leaf_then_parents(store).await;
    test_sync_is_idempotent(store).await;
    test_sync_never_overwrites(store).await;
    test_load_tree_orders_by_name_then_id(store).await;
    test_concurrent_duplicate_create(store).await;
    test_load_tree_never_mixes_generations(store).await;
}

fn new_area(id: &str, name: &str) -> NewArea {
    NewArea {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        floor_plan: None,
    }
}

fn new_group(id: &str, area_id: &str, name: &str) -> NewItemGroup {
    NewItemGroup {
        id: id.to_string(),
        area_id: area_id.to_string(),
        name: name.to_string(),
        description: None,
        floor_plan: None,
    }
}

fn new_item(id: &str, group_id: &str, name: &str) -> NewItem {
    NewItem {
        id: id.to_string(),
        item_group_id: group_id.to_string(),
        name: name.to_string(),
        equipment: vec!["monitor".to_string()],
        warning: None,
    }
}

fn declared(area_id: &str, group_id: &str, item_ids: &[&str]) -> InventoryTree {
    InventoryTree {
        areas: vec![Area {
            id: area_id.to_string(),
            name: "Declared Floor".to_string(),
            description: Some("from file".to_string()),
            floor_plan: None,
            item_groups: vec![ItemGroup {
                id: group_id.to_string(),
                name: "Declared Room".to_string(),
                description: None,
                floor_plan: None,
                items: item_ids
                    .iter()
                    .map(|id| Item {
                        id: id.to_string(),
                        name: format!("Desk {id}"),
                        equipment: vec![],
                        warning: None,
                    })
                    .collect(),
            }],
        }],
    }
}

pub async fn test_create_and_get_area<S: InventoryStore>(store: &S) {
    let id = unique("area");
    let created = store
        .create_area(&NewArea {
            description: Some("Third floor".to_string()),
            ..new_area(&id, "Floor 3")
        })
        .await
        .expect("create_area should succeed");
    assert_eq!(created.id, id);
    assert_eq!(created.description.as_deref(), Some("Third floor"));

    let fetched = store.get_area(&id).await.expect("get_area should succeed");
    assert_eq!(fetched.name, "Floor 3");
}

pub async fn test_duplicate_area_is_conflict<S: InventoryStore>(store: &S) {
    let id = unique("area");
    store.create_area(&new_area(&id, "A")).await.unwrap();

    let err = store.create_area(&new_area(&id, "B")).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
    assert_eq!(store.get_area(&id).await.unwrap().name, "A");
}

pub async fn test_blank_fields_are_rejected<S: InventoryStore>(store: &S) {
    let err = store.create_area(&new_area("", "No id")).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let err = store
        .create_item(&new_item(&unique("item"), "  ", "Desk"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

pub async fn test_missing_parent_is_not_found<S: InventoryStore>(store: &S) {
    let err = store
        .create_item_group(&new_group(&unique("ig"), &unique("ghost"), "Room"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    let err = store
        .create_item(&new_item(&unique("item"), &unique("ghost"), "Desk"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

pub async fn test_update_and_delete_missing_are_not_found<S: InventoryStore>(store: &S) {
    let missing = unique("missing");
    let changes = AreaChanges {
        name: "Nope".to_string(),
        description: None,
        floor_plan: None,
    };
    assert_eq!(
        store.update_area(&missing, &changes).await.unwrap_err().kind,
        ErrorKind::NotFound
    );
    assert_eq!(
        store.delete_area(&missing).await.unwrap_err().kind,
        ErrorKind::NotFound
    );
    assert_eq!(
        store.delete_item_group(&missing).await.unwrap_err().kind,
        ErrorKind::NotFound
    );
    assert_eq!(
        store.delete_item(&missing).await.unwrap_err().kind,
        ErrorKind::NotFound
    );
    assert_eq!(
        store.get_item(&missing).await.unwrap_err().kind,
        ErrorKind::NotFound
    );
}

pub async fn test_update_replaces_attributes<S: InventoryStore>(store: &S) {
    let area = unique("area");
    let group = unique("ig");
    let item = unique("item");
    store.create_area(&new_area(&area, "Floor")).await.unwrap();
    store
        .create_item_group(&new_group(&group, &area, "Room"))
        .await
        .unwrap();
    store.create_item(&new_item(&item, &group, "Desk")).await.unwrap();

    let updated = store
        .update_item(
            &item,
            &ItemChanges {
                name: "Standing desk".to_string(),
                equipment: vec!["dock".to_string(), "monitor".to_string()],
                warning: Some("Cable loose".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Standing desk");
    assert_eq!(updated.equipment, vec!["dock", "monitor"]);
    assert_eq!(updated.item_group_id, group);
    assert!(updated.updated_at >= updated.created_at);

    let fetched = store.get_item(&item).await.unwrap();
    assert_eq!(fetched.warning.as_deref(), Some("Cable loose"));
}

pub async fn test_non_empty_delete_is_conflict<S: InventoryStore>(store: &S) {
    let area = unique("area");
    let group = unique("ig");
    let item = unique("item");
    store.create_area(&new_area(&area, "Floor")).await.unwrap();
    store
        .create_item_group(&new_group(&group, &area, "Room"))
        .await
        .unwrap();
    store.create_item(&new_item(&item, &group, "Desk")).await.unwrap();

    let before = store.load_tree().await.unwrap();

    let err = store.delete_area(&area).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
    let err = store.delete_item_group(&group).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);

    let after = store.load_tree().await.unwrap();
    let find = |tree: &InventoryTree| tree.areas.iter().find(|a| a.id == area).cloned();
    assert_eq!(find(&before), find(&after));
    assert!(find(&after).is_some());
}

pub async fn test_delete_leaf_then_parents<S: InventoryStore>(store: &S) {
    let area = unique("area");
    let group = unique("ig");
    let item = unique("item");
    store.create_area(&new_area(&area, "Floor")).await.unwrap();
    store
        .create_item_group(&new_group(&group, &area, "Room"))
        .await
        .unwrap();
    store.create_item(&new_item(&item, &group, "Desk")).await.unwrap();

    store.delete_item(&item).await.unwrap();
    store.delete_item_group(&group).await.unwrap();
    store.delete_area(&area).await.unwrap();

    assert_eq!(
        store.get_area(&area).await.unwrap_err().kind,
        ErrorKind::NotFound
    );
}

pub async fn test_sync_is_idempotent<S: InventoryStore>(store: &S) {
    let area = unique("area");
    let group = unique("ig");
    let (d1, d2) = (unique("item"), unique("item"));
    let tree = declared(&area, &group, &[&d1, &d2]);

    let first = store.sync_from_declaration(&tree).await.unwrap();
    assert_eq!(first.areas_created, 1);
    assert_eq!(first.item_groups_created, 1);
    assert_eq!(first.items_created, 2);

    let second = store.sync_from_declaration(&tree).await.unwrap();
    assert_eq!(second.total(), 0);

    let loaded = store.load_tree().await.unwrap();
    let stored = loaded.areas.iter().find(|a| a.id == area).unwrap();
    assert_eq!(stored.item_groups[0].items.len(), 2);
}

pub async fn test_sync_never_overwrites<S: InventoryStore>(store: &S) {
    let area = unique("area");
    let group = unique("ig");
    let item = unique("item");
    store
        .create_area(&new_area(&area, "Renamed by admin"))
        .await
        .unwrap();

    let report = store
        .sync_from_declaration(&declared(&area, &group, &[&item]))
        .await
        .unwrap();
    assert_eq!(report.areas_created, 0);
    assert_eq!(report.item_groups_created, 1);
    assert_eq!(report.items_created, 1);

    assert_eq!(store.get_area(&area).await.unwrap().name, "Renamed by admin");
    assert_eq!(store.get_item_group(&group).await.unwrap().area_id, area);
}

pub async fn test_load_tree_orders_by_name_then_id<S: InventoryStore>(store: &S) {
    let area = unique("area");
    store.create_area(&new_area(&area, "Ordering")).await.unwrap();
    let g_b = format!("{area}-b");
    let g_a = format!("{area}-a");
    let g_c = format!("{area}-c");
    store
        .create_item_group(&new_group(&g_b, &area, "Same"))
        .await
        .unwrap();
    store
        .create_item_group(&new_group(&g_c, &area, "Alpha"))
        .await
        .unwrap();
    store
        .create_item_group(&new_group(&g_a, &area, "Same"))
        .await
        .unwrap();

    let tree = store.load_tree().await.unwrap();
    let stored = tree.areas.iter().find(|a| a.id == area).unwrap();
    let ids: Vec<&str> = stored.item_groups.iter().map(|g| g.id.as_str()).collect();
    assert_eq!(ids, vec![g_c.as_str(), g_a.as_str(), g_b.as_str()]);
}

pub async fn test_concurrent_duplicate_create<S>(store: &S)
where
    S: InventoryStore + Clone + 'static,
{
    let id = unique("area");
    let handles: Vec<_> = (0..8)
        .map(|n| {
            let store = store.clone();
            let id = id.clone();
            tokio::spawn(async move { store.create_area(&new_area(&id, &format!("Race {n}"))).await })
        })
        .collect();

    let mut ok = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => ok += 1,
            Err(e) if e.kind == ErrorKind::Conflict => conflicts += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
    assert_eq!(ok, 1);
    assert_eq!(conflicts, 7);
}

/// A writer keeps recreating one group and its item with matching names
/// while readers load the tree. A loaded group and its item must always
/// come from the same generation.
pub async fn test_load_tree_never_mixes_generations<S>(store: &S)
where
    S: InventoryStore + Clone + 'static,
{
    let area = unique("area");
    let group = unique("ig");
    let item = unique("item");
    store.create_area(&new_area(&area, "Generations")).await.unwrap();

    let writer = {
        let store = store.clone();
        let (area, group, item) = (area.clone(), group.clone(), item.clone());
        tokio::spawn(async move {
            for generation in 0..25 {
                let name = format!("gen {generation}");
                store
                    .create_item_group(&new_group(&group, &area, &name))
                    .await
                    .unwrap();
                store.create_item(&new_item(&item, &group, &name)).await.unwrap();
                store.delete_item(&item).await.unwrap();
                store.delete_item_group(&group).await.unwrap();
            }
        })
    };

    while !writer.is_finished() {
        let tree = store.load_tree().await.unwrap();
        let stored = tree.areas.iter().find(|a| a.id == area).unwrap();
        if let Some(loaded) = stored.item_groups.iter().find(|g| g.id == group) {
            for desk in &loaded.items {
                assert_eq!(desk.name, loaded.name);
            }
        }
        tokio::task::yield_now().await;
    }
    writer.await.unwrap();
}
