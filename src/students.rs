use crate::error::StoreError;
use crate::model::{
    AttendanceMark, Evaluation, Grades, Student, MAX_ATTENDANCE, MAX_EVALUATIONS, MAX_STUDENTS,
};

/// Bounded, insertion-ordered student table. Owns each student's grade
/// composite and the bounded evaluation/attendance sequences. The class
/// cascade entry points (`remove_by_class`, `retarget_class`) are called only
/// by the store facade, which owns the cross-table transaction.
#[derive(Debug)]
pub struct StudentTable {
    records: Vec<Student>,
    capacity: usize,
}

impl Default for StudentTable {
    fn default() -> Self {
        StudentTable::with_capacity(MAX_STUDENTS)
    }
}

impl StudentTable {
    pub fn with_capacity(capacity: usize) -> Self {
        StudentTable {
            records: Vec::new(),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn records(&self) -> &[Student] {
        &self.records
    }

    pub fn replace_all(&mut self, records: Vec<Student>) {
        self.records = records;
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn exists(&self, enrollment: i32) -> bool {
        self.records.iter().any(|s| s.enrollment == enrollment)
    }

    pub fn find(&self, enrollment: i32) -> Option<&Student> {
        self.records.iter().find(|s| s.enrollment == enrollment)
    }

    fn find_mut(&mut self, enrollment: i32) -> Result<&mut Student, StoreError> {
        self.records
            .iter_mut()
            .find(|s| s.enrollment == enrollment)
            .ok_or(StoreError::NotFound)
    }

    pub fn list_by_class(&self, class_id: i32, limit: usize) -> Vec<Student> {
        self.records
            .iter()
            .filter(|s| s.class_id == class_id)
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn insert(&mut self, student: Student) -> Result<(), StoreError> {
        if self.records.len() >= self.capacity {
            return Err(StoreError::CapacityExceeded);
        }
        if student.evaluations.len() > MAX_EVALUATIONS
            || student.attendance.len() > MAX_ATTENDANCE
        {
            return Err(StoreError::CapacityExceeded);
        }
        if self.exists(student.enrollment) {
            return Err(StoreError::Conflict);
        }
        // class_id is a soft reference; deliberately not validated here.
        self.records.push(student);
        Ok(())
    }

    pub fn update_name(&mut self, enrollment: i32, name: &str) -> Result<(), StoreError> {
        self.find_mut(enrollment)?.name = name.to_string();
        Ok(())
    }

    /// Same contract as `ClassTable::rekey`: `Ok(false)` for the same-key
    /// no-op, conflict checked before existence.
    pub fn rekey(&mut self, old: i32, new: i32) -> Result<bool, StoreError> {
        if old == new {
            return Ok(false);
        }
        if self.exists(new) {
            return Err(StoreError::Conflict);
        }
        self.find_mut(old)?.enrollment = new;
        Ok(true)
    }

    pub fn remove(&mut self, enrollment: i32) -> bool {
        match self.records.iter().position(|s| s.enrollment == enrollment) {
            Some(idx) => {
                self.records.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Cascade half of a class delete: drops every student of the class,
    /// preserving the order of the survivors. Returns how many went.
    pub fn remove_by_class(&mut self, class_id: i32) -> usize {
        let before = self.records.len();
        self.records.retain(|s| s.class_id != class_id);
        before - self.records.len()
    }

    /// Cascade half of a class rekey: repoints every dependent student.
    pub fn retarget_class(&mut self, old_id: i32, new_id: i32) -> usize {
        let mut updated = 0;
        for s in self.records.iter_mut().filter(|s| s.class_id == old_id) {
            s.class_id = new_id;
            updated += 1;
        }
        updated
    }

    pub fn replace_grades(&mut self, enrollment: i32, grades: Grades) -> Result<(), StoreError> {
        self.find_mut(enrollment)?.grades = grades;
        Ok(())
    }

    pub fn fetch_grades(&self, enrollment: i32) -> Option<Grades> {
        self.find(enrollment).map(|s| s.grades)
    }

    pub fn append_attendance(
        &mut self,
        enrollment: i32,
        mark: AttendanceMark,
    ) -> Result<(), StoreError> {
        let student = self.find_mut(enrollment)?;
        if student.attendance.len() >= MAX_ATTENDANCE {
            return Err(StoreError::CapacityExceeded);
        }
        student.attendance.push(mark);
        Ok(())
    }

    pub fn list_attendance(&self, enrollment: i32, limit: usize) -> Vec<AttendanceMark> {
        self.find(enrollment)
            .map(|s| s.attendance.iter().take(limit).cloned().collect())
            .unwrap_or_default()
    }

    /// First mark with an exactly equal date string. Duplicate dates are
    /// permitted; later ones are unreachable by date.
    pub fn find_attendance_by_date(&self, enrollment: i32, date: &str) -> Option<AttendanceMark> {
        self.find(enrollment)?
            .attendance
            .iter()
            .find(|m| m.date == date)
            .cloned()
    }

    pub fn append_evaluation(
        &mut self,
        enrollment: i32,
        evaluation: Evaluation,
    ) -> Result<(), StoreError> {
        let student = self.find_mut(enrollment)?;
        if student.evaluations.len() >= MAX_EVALUATIONS {
            return Err(StoreError::CapacityExceeded);
        }
        student.evaluations.push(evaluation);
        Ok(())
    }

    pub fn list_evaluations(&self, enrollment: i32, limit: usize) -> Vec<Evaluation> {
        self.find(enrollment)
            .map(|s| s.evaluations.iter().take(limit).cloned().collect())
            .unwrap_or_default()
    }

    /// Replaces the first evaluation dated `date` wholesale. `NotFound`
    /// covers both an absent student and an absent date.
    pub fn update_evaluation_by_date(
        &mut self,
        enrollment: i32,
        date: &str,
        new_evaluation: Evaluation,
    ) -> Result<(), StoreError> {
        let student = self.find_mut(enrollment)?;
        let slot = student
            .evaluations
            .iter_mut()
            .find(|e| e.date == date)
            .ok_or(StoreError::NotFound)?;
        *slot = new_evaluation;
        Ok(())
    }
}
