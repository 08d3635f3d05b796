use crate::error::StoreError;
use crate::model::{Class, MAX_CLASSES};

/// Bounded, insertion-ordered class table. Uniqueness of `id` is enforced
/// here; persistence and the cascade into students belong to the store facade.
#[derive(Debug)]
pub struct ClassTable {
    records: Vec<Class>,
    capacity: usize,
}

impl Default for ClassTable {
    fn default() -> Self {
        ClassTable::with_capacity(MAX_CLASSES)
    }
}

impl ClassTable {
    pub fn with_capacity(capacity: usize) -> Self {
        ClassTable {
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

    pub fn records(&self) -> &[Class] {
        &self.records
    }

    /// Swaps in freshly loaded records (reload path). Does not re-check
    /// uniqueness: the file is this process's own last flush.
    pub fn replace_all(&mut self, records: Vec<Class>) {
        self.records = records;
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn exists(&self, id: i32) -> bool {
        self.records.iter().any(|c| c.id == id)
    }

    pub fn find(&self, id: i32) -> Option<&Class> {
        self.records.iter().find(|c| c.id == id)
    }

    pub fn list(&self, limit: usize) -> Vec<Class> {
        self.records.iter().take(limit).cloned().collect()
    }

    pub fn insert(&mut self, class: Class) -> Result<(), StoreError> {
        if self.records.len() >= self.capacity {
            return Err(StoreError::CapacityExceeded);
        }
        if self.exists(class.id) {
            return Err(StoreError::Conflict);
        }
        self.records.push(class);
        Ok(())
    }

    pub fn update_fields(
        &mut self,
        id: i32,
        discipline: &str,
        professor: &str,
    ) -> Result<(), StoreError> {
        let class = self
            .records
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StoreError::NotFound)?;
        class.discipline = discipline.to_string();
        class.professor = professor.to_string();
        Ok(())
    }

    /// Changes a class id in place. `Ok(false)` means old and new were equal
    /// and nothing was touched; the conflict check runs before the existence
    /// check, so rekeying an absent id onto a taken one reports `Conflict`.
    pub fn rekey(&mut self, old_id: i32, new_id: i32) -> Result<bool, StoreError> {
        if old_id == new_id {
            return Ok(false);
        }
        if self.exists(new_id) {
            return Err(StoreError::Conflict);
        }
        let class = self
            .records
            .iter_mut()
            .find(|c| c.id == old_id)
            .ok_or(StoreError::NotFound)?;
        class.id = new_id;
        Ok(true)
    }

    /// Order-preserving removal. Returns false when the id was absent.
    pub fn remove(&mut self, id: i32) -> bool {
        match self.records.iter().position(|c| c.id == id) {
            Some(idx) => {
                self.records.remove(idx);
                true
            }
            None => false,
        }
    }
}
