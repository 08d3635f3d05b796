use acadstore::{Class, Store, StoreError, MAX_CLASSES};

fn class(id: i32, discipline: &str, professor: &str) -> Class {
    Class {
        id,
        discipline: discipline.to_string(),
        professor: professor.to_string(),
    }
}

#[test]
fn insert_then_exists_and_find_return_the_record() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = Store::open(dir.path()).expect("open store");

    let algorithms = class(1, "Algorithms", "Dr. Smith");
    store
        .insert_class(algorithms.clone())
        .expect("insert class");

    assert!(store.class_exists(1));
    assert_eq!(store.find_class(1), Some(algorithms));
    assert!(!store.class_exists(2));
    assert_eq!(store.find_class(2), None);
}

#[test]
fn duplicate_id_is_a_conflict_and_leaves_the_table_unchanged() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = Store::open(dir.path()).expect("open store");

    store
        .insert_class(class(1, "Algorithms", "Dr. Smith"))
        .expect("first insert");
    let err = store
        .insert_class(class(1, "Databases", "Dr. Costa"))
        .expect_err("duplicate id must fail");

    assert_eq!(err, StoreError::Conflict);
    let kept = store.find_class(1).expect("original survives");
    assert_eq!(kept.discipline, "Algorithms");
    assert_eq!(store.list_classes(usize::MAX).len(), 1);
}

#[test]
fn insert_past_capacity_fails_without_mutation() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = Store::open(dir.path()).expect("open store");

    for i in 0..MAX_CLASSES as i32 {
        store
            .insert_class(class(i, "Subject", "Prof"))
            .expect("insert within capacity");
    }
    let err = store
        .insert_class(class(9999, "Overflow", "Prof"))
        .expect_err("table is full");
    assert_eq!(err, StoreError::CapacityExceeded);
    assert_eq!(store.list_classes(usize::MAX).len(), MAX_CLASSES);
    assert!(!store.class_exists(9999));
}

#[test]
fn list_preserves_insertion_order_and_truncates_to_limit() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = Store::open(dir.path()).expect("open store");

    for id in [5, 2, 9] {
        store
            .insert_class(class(id, "Subject", "Prof"))
            .expect("insert");
    }
    let ids: Vec<i32> = store.list_classes(usize::MAX).iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![5, 2, 9]);
    assert_eq!(store.list_classes(2).len(), 2);
    assert_eq!(store.list_classes(2)[1].id, 2);
}

#[test]
fn update_replaces_fields_in_place() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = Store::open(dir.path()).expect("open store");

    store
        .insert_class(class(4, "Algorithms", "Dr. Smith"))
        .expect("insert");
    store
        .update_class(4, "Advanced Algorithms", "Dr. Jones")
        .expect("update existing class");

    let updated = store.find_class(4).expect("still present");
    assert_eq!(updated.discipline, "Advanced Algorithms");
    assert_eq!(updated.professor, "Dr. Jones");

    let err = store
        .update_class(5, "Nope", "Nobody")
        .expect_err("absent id");
    assert_eq!(err, StoreError::NotFound);
}
