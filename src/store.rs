//! The store facade: owns both tables, the backing files, and the load/flush
//! lifecycle. Every mutating operation flushes the affected table(s) before
//! returning; the two cross-table cascades (class delete, class rekey) live
//! here so the tables never reach into each other.

use crate::classes::ClassTable;
use crate::codec;
use crate::error::{Persisted, StoreError};
use crate::model::{AttendanceMark, Class, Evaluation, Grades, Student};
use crate::stats::{StoreStats, TableStats};
use crate::students::StudentTable;
use log::{info, warn};
use std::path::{Path, PathBuf};

const CLASSES_FILE: &str = "classes.dat";
const STUDENTS_FILE: &str = "students.dat";

pub struct Store {
    dir: PathBuf,
    classes: ClassTable,
    students: StudentTable,
    loaded: bool,
}

impl Store {
    /// Opens a store over `dir`, creating the directory if needed and loading
    /// both tables. Missing backing files start their tables empty; a file
    /// that exists but cannot be decoded is an error, not an empty table.
    pub fn open(dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        let mut store = Store {
            dir,
            classes: ClassTable::default(),
            students: StudentTable::default(),
            loaded: false,
        };
        store.ensure_loaded()?;
        Ok(store)
    }

    fn classes_path(&self) -> PathBuf {
        self.dir.join(CLASSES_FILE)
    }

    fn students_path(&self) -> PathBuf {
        self.dir.join(STUDENTS_FILE)
    }

    /// Idempotent load of both tables. A no-op once the store is loaded;
    /// `force_reload` re-arms it.
    pub fn ensure_loaded(&mut self) -> anyhow::Result<()> {
        if self.loaded {
            return Ok(());
        }
        self.classes.replace_all(codec::read_classes(&self.classes_path())?);
        self.students
            .replace_all(codec::read_students(&self.students_path())?);
        info!(
            "loaded {} classes and {} students from {}",
            self.classes.len(),
            self.students.len(),
            self.dir.to_string_lossy()
        );
        self.loaded = true;
        Ok(())
    }

    /// Drops the in-memory tables and re-reads both files, picking up any
    /// external change to the backing store.
    pub fn force_reload(&mut self) -> anyhow::Result<()> {
        self.loaded = false;
        self.classes.clear();
        self.students.clear();
        self.ensure_loaded()
    }

    /// Empties both tables and immediately persists the empty state.
    pub fn wipe_all(&mut self) -> Persisted {
        warn!("wiping all class and student records");
        self.classes.clear();
        self.students.clear();
        self.flush_both()
    }

    /// Whole-file overwrite of the class backing store. A failure leaves the
    /// in-memory table authoritative and is reported, never propagated.
    pub fn flush_classes(&self) -> Persisted {
        match codec::write_classes(&self.classes_path(), self.classes.records()) {
            Ok(()) => Persisted::Durable,
            Err(e) => {
                warn!("class flush failed, changes are memory-only: {e:#}");
                Persisted::MemoryOnly {
                    error: format!("{e:#}"),
                }
            }
        }
    }

    pub fn flush_students(&self) -> Persisted {
        match codec::write_students(&self.students_path(), self.students.records()) {
            Ok(()) => Persisted::Durable,
            Err(e) => {
                warn!("student flush failed, changes are memory-only: {e:#}");
                Persisted::MemoryOnly {
                    error: format!("{e:#}"),
                }
            }
        }
    }

    fn flush_both(&self) -> Persisted {
        match (self.flush_students(), self.flush_classes()) {
            (Persisted::Durable, Persisted::Durable) => Persisted::Durable,
            (Persisted::MemoryOnly { error }, Persisted::Durable)
            | (Persisted::Durable, Persisted::MemoryOnly { error }) => {
                Persisted::MemoryOnly { error }
            }
            (Persisted::MemoryOnly { error: a }, Persisted::MemoryOnly { error: b }) => {
                Persisted::MemoryOnly {
                    error: format!("{a}; {b}"),
                }
            }
        }
    }

    // ----- classes -----

    pub fn insert_class(&mut self, class: Class) -> Result<Persisted, StoreError> {
        let id = class.id;
        self.classes.insert(class)?;
        info!("class {} saved ({} total)", id, self.classes.len());
        Ok(self.flush_classes())
    }

    pub fn class_exists(&self, id: i32) -> bool {
        self.classes.exists(id)
    }

    pub fn find_class(&self, id: i32) -> Option<Class> {
        self.classes.find(id).cloned()
    }

    pub fn list_classes(&self, limit: usize) -> Vec<Class> {
        self.classes.list(limit)
    }

    pub fn update_class(
        &mut self,
        id: i32,
        discipline: &str,
        professor: &str,
    ) -> Result<Persisted, StoreError> {
        self.classes.update_fields(id, discipline, professor)?;
        Ok(self.flush_classes())
    }

    /// Changes a class id and repoints every dependent student, flushing both
    /// files. Rekeying an id onto itself succeeds without touching disk.
    pub fn rekey_class(&mut self, old_id: i32, new_id: i32) -> Result<Persisted, StoreError> {
        if !self.classes.rekey(old_id, new_id)? {
            return Ok(Persisted::Durable);
        }
        let moved = self.students.retarget_class(old_id, new_id);
        info!("class {old_id} rekeyed to {new_id} ({moved} students repointed)");
        Ok(self.flush_both())
    }

    /// Removes a class and cascades over its students, order preserved on
    /// both sides. An absent id is a no-op that flushes nothing.
    pub fn delete_class(&mut self, id: i32) -> Result<Persisted, StoreError> {
        if !self.classes.exists(id) {
            return Err(StoreError::NotFound);
        }
        let dropped = self.students.remove_by_class(id);
        self.classes.remove(id);
        info!("class {id} deleted ({dropped} students removed)");
        Ok(self.flush_both())
    }

    // ----- students -----

    pub fn insert_student(&mut self, student: Student) -> Result<Persisted, StoreError> {
        let enrollment = student.enrollment;
        self.students.insert(student)?;
        info!(
            "student {} saved ({} total)",
            enrollment,
            self.students.len()
        );
        Ok(self.flush_students())
    }

    pub fn student_exists(&self, enrollment: i32) -> bool {
        self.students.exists(enrollment)
    }

    pub fn find_student(&self, enrollment: i32) -> Option<Student> {
        self.students.find(enrollment).cloned()
    }

    pub fn list_students_by_class(&self, class_id: i32, limit: usize) -> Vec<Student> {
        self.students.list_by_class(class_id, limit)
    }

    pub fn update_student_name(
        &mut self,
        enrollment: i32,
        name: &str,
    ) -> Result<Persisted, StoreError> {
        self.students.update_name(enrollment, name)?;
        Ok(self.flush_students())
    }

    pub fn rekey_student(&mut self, old: i32, new: i32) -> Result<Persisted, StoreError> {
        if !self.students.rekey(old, new)? {
            return Ok(Persisted::Durable);
        }
        info!("enrollment {old} rekeyed to {new}");
        Ok(self.flush_students())
    }

    pub fn delete_student(&mut self, enrollment: i32) -> Result<Persisted, StoreError> {
        if !self.students.remove(enrollment) {
            return Err(StoreError::NotFound);
        }
        Ok(self.flush_students())
    }

    // ----- grades -----

    /// Wholesale replacement of the grade composite; this store is the single
    /// source of truth for grades, so recomputing an average means fetch,
    /// compute, and replace-write the whole value.
    pub fn replace_grades(
        &mut self,
        enrollment: i32,
        grades: Grades,
    ) -> Result<Persisted, StoreError> {
        self.students.replace_grades(enrollment, grades)?;
        Ok(self.flush_students())
    }

    pub fn fetch_grades(&self, enrollment: i32) -> Option<Grades> {
        self.students.fetch_grades(enrollment)
    }

    // ----- attendance -----

    pub fn append_attendance(
        &mut self,
        enrollment: i32,
        mark: AttendanceMark,
    ) -> Result<Persisted, StoreError> {
        self.students.append_attendance(enrollment, mark)?;
        Ok(self.flush_students())
    }

    pub fn list_attendance(&self, enrollment: i32, limit: usize) -> Vec<AttendanceMark> {
        self.students.list_attendance(enrollment, limit)
    }

    pub fn find_attendance_by_date(&self, enrollment: i32, date: &str) -> Option<AttendanceMark> {
        self.students.find_attendance_by_date(enrollment, date)
    }

    // ----- evaluations -----

    pub fn append_evaluation(
        &mut self,
        enrollment: i32,
        evaluation: Evaluation,
    ) -> Result<Persisted, StoreError> {
        self.students.append_evaluation(enrollment, evaluation)?;
        Ok(self.flush_students())
    }

    pub fn list_evaluations(&self, enrollment: i32, limit: usize) -> Vec<Evaluation> {
        self.students.list_evaluations(enrollment, limit)
    }

    pub fn update_evaluation_by_date(
        &mut self,
        enrollment: i32,
        date: &str,
        new_evaluation: Evaluation,
    ) -> Result<Persisted, StoreError> {
        self.students
            .update_evaluation_by_date(enrollment, date, new_evaluation)?;
        Ok(self.flush_students())
    }

    // ----- diagnostics -----

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            classes: TableStats::new(
                self.classes.len(),
                self.classes.capacity(),
                self.classes_path(),
            ),
            students: TableStats::new(
                self.students.len(),
                self.students.capacity(),
                self.students_path(),
            ),
        }
    }
}
