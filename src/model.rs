use serde::{Deserialize, Serialize};

/// Table and sub-record bounds. Inserts past these fail without mutating
/// anything; they also fix the on-disk record sizes (see `codec`).
pub const MAX_CLASSES: usize = 100;
pub const MAX_STUDENTS: usize = 500;
pub const MAX_EVALUATIONS: usize = 10;
pub const MAX_ATTENDANCE: usize = 50;

/// A course section. `id` is unique across the class table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Class {
    pub id: i32,
    pub discipline: String,
    pub professor: String,
}

/// Per-student grade composite. Replaced wholesale, never patched field by
/// field; the caller recomputes `average` before writing it back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Grades {
    pub np1: f32,
    pub np2: f32,
    pub pim: f32,
    pub average: f32,
}

/// A dated, commented score entry. Dates are opaque `DD/MM/YYYY` strings
/// compared by exact equality; duplicates are allowed and date-addressed
/// operations only ever touch the first match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub score: f32,
    pub comment: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceMark {
    pub date: String,
    pub present: bool,
}

/// An enrollee. `enrollment` is unique across the student table; `class_id`
/// is a soft reference into the class table, never validated at insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub class_id: i32,
    pub enrollment: i32,
    pub name: String,
    pub grades: Grades,
    pub evaluations: Vec<Evaluation>,
    pub attendance: Vec<AttendanceMark>,
}

impl Student {
    /// A fresh student with empty grades and no sub-records.
    pub fn new(class_id: i32, enrollment: i32, name: impl Into<String>) -> Self {
        Student {
            class_id,
            enrollment,
            name: name.into(),
            grades: Grades::default(),
            evaluations: Vec::new(),
            attendance: Vec::new(),
        }
    }
}
