use acadstore::{Store, StoreError, Student, MAX_STUDENTS};

#[test]
fn insert_does_not_validate_the_class_reference() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = Store::open(dir.path()).expect("open store");

    // No class 42 exists; the reference is soft by design.
    store
        .insert_student(Student::new(42, 1001, "Ana"))
        .expect("insert with dangling class_id");
    assert!(store.student_exists(1001));
    assert_eq!(store.find_student(1001).expect("ana").class_id, 42);
}

#[test]
fn duplicate_enrollment_is_a_conflict() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = Store::open(dir.path()).expect("open store");

    store
        .insert_student(Student::new(1, 1001, "Ana"))
        .expect("first insert");
    let err = store
        .insert_student(Student::new(2, 1001, "Impostor"))
        .expect_err("enrollment taken");
    assert_eq!(err, StoreError::Conflict);
    assert_eq!(store.find_student(1001).expect("kept").name, "Ana");
}

#[test]
fn insert_past_capacity_fails_without_mutation() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = Store::open(dir.path()).expect("open store");

    for i in 0..MAX_STUDENTS as i32 {
        store
            .insert_student(Student::new(1, i, "S"))
            .expect("insert within capacity");
    }
    let err = store
        .insert_student(Student::new(1, 99999, "Late"))
        .expect_err("table is full");
    assert_eq!(err, StoreError::CapacityExceeded);
    assert!(!store.student_exists(99999));
}

#[test]
fn list_by_class_filters_and_truncates_in_insertion_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = Store::open(dir.path()).expect("open store");

    store
        .insert_student(Student::new(1, 1001, "Ana"))
        .expect("insert");
    store
        .insert_student(Student::new(2, 2001, "Bruno"))
        .expect("insert");
    store
        .insert_student(Student::new(1, 1002, "Carla"))
        .expect("insert");

    let names: Vec<String> = store
        .list_students_by_class(1, usize::MAX)
        .iter()
        .map(|s| s.name.clone())
        .collect();
    assert_eq!(names, vec!["Ana", "Carla"]);
    assert_eq!(store.list_students_by_class(1, 1)[0].name, "Ana");
    assert!(store.list_students_by_class(3, usize::MAX).is_empty());
}

#[test]
fn update_name_only_touches_the_name() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = Store::open(dir.path()).expect("open store");

    store
        .insert_student(Student::new(1, 1001, "Ana"))
        .expect("insert");
    store
        .update_student_name(1001, "Ana Clara")
        .expect("rename");

    let s = store.find_student(1001).expect("present");
    assert_eq!(s.name, "Ana Clara");
    assert_eq!(s.class_id, 1);

    assert_eq!(
        store
            .update_student_name(1002, "Nobody")
            .expect_err("absent"),
        StoreError::NotFound
    );
}
