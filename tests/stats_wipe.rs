use acadstore::{Class, Store, Student, MAX_CLASSES, MAX_STUDENTS};

#[test]
fn stats_report_occupancy_against_the_fixed_capacities() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = Store::open(dir.path()).expect("open store");

    store
        .insert_class(Class {
            id: 1,
            discipline: "Algorithms".to_string(),
            professor: "Dr. Smith".to_string(),
        })
        .expect("insert class");
    store
        .insert_student(Student::new(1, 1001, "Ana"))
        .expect("insert student");

    let stats = store.stats();
    assert_eq!(stats.classes.used, 1);
    assert_eq!(stats.classes.capacity, MAX_CLASSES);
    assert_eq!(stats.students.used, 1);
    assert_eq!(stats.students.capacity, MAX_STUDENTS);
    assert!((stats.classes.percent_full - 1.0).abs() < f32::EPSILON);
    assert!(stats.classes.file.ends_with("classes.dat"));
    assert!(stats.students.file.ends_with("students.dat"));

    let json = stats.to_json();
    assert_eq!(json["classes"]["used"], 1);
    assert_eq!(json["students"]["capacity"], MAX_STUDENTS);
}

#[test]
fn wipe_all_empties_memory_and_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = Store::open(dir.path()).expect("open store");

    store
        .insert_class(Class {
            id: 1,
            discipline: "Algorithms".to_string(),
            professor: "Dr. Smith".to_string(),
        })
        .expect("insert class");
    store
        .insert_student(Student::new(1, 1001, "Ana"))
        .expect("insert student");

    let outcome = store.wipe_all();
    assert!(outcome.is_durable());
    assert!(store.list_classes(usize::MAX).is_empty());
    assert!(!store.student_exists(1001));

    // The empty state is persisted, not just forgotten in memory.
    let reopened = Store::open(dir.path()).expect("reopen");
    assert_eq!(reopened.stats().classes.used, 0);
    assert_eq!(reopened.stats().students.used, 0);

    // Both files exist and carry a zero record count.
    let raw = std::fs::read(dir.path().join("classes.dat")).expect("classes.dat exists");
    assert_eq!(raw, 0u32.to_le_bytes());
    let raw = std::fs::read(dir.path().join("students.dat")).expect("students.dat exists");
    assert_eq!(raw, 0u32.to_le_bytes());
}
