use thiserror::Error;

/// Why a store operation did not happen. Mirrors the return-code surface the
/// external layer consumes: nothing here is fatal and nothing rolls back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The addressed key (class id, enrollment, or evaluation date) is absent.
    #[error("record not found")]
    NotFound,
    /// The key to insert or rekey to is already in use.
    #[error("key already in use")]
    Conflict,
    /// The table or bounded sub-collection is full.
    #[error("capacity reached")]
    CapacityExceeded,
}

/// Outcome of a successful mutation. The in-memory change has happened either
/// way; `MemoryOnly` means the immediate flush failed and the change will only
/// reach disk on the next successful flush. There is no rollback and no retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persisted {
    Durable,
    MemoryOnly { error: String },
}

impl Persisted {
    pub fn is_durable(&self) -> bool {
        matches!(self, Persisted::Durable)
    }
}
