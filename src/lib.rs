//! Embedded record store for an academic management tool.
//!
//! Persists class sections and enrolled students (with per-student grades,
//! evaluations, and attendance) to two flat binary files and serves them
//! through a CRUD-style facade. Every successful mutation rewrites the
//! affected file(s) before returning; a failed rewrite is reported as a
//! [`Persisted::MemoryOnly`] outcome rather than rolled back.
//!
//! The store is an owned object, not a process-wide singleton: open one per
//! data directory with [`Store::open`]. Single exclusive accessor assumed;
//! wrap it in a mutex if you need threads.

pub mod classes;
pub mod codec;
pub mod error;
pub mod model;
pub mod stats;
pub mod store;
pub mod students;

pub use error::{Persisted, StoreError};
pub use model::{
    AttendanceMark, Class, Evaluation, Grades, Student, MAX_ATTENDANCE, MAX_CLASSES,
    MAX_EVALUATIONS, MAX_STUDENTS,
};
pub use stats::{StoreStats, TableStats};
pub use store::Store;
