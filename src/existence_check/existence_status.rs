/// Outcome of an asynchronous existence check.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ExistenceStatus {
    /// Empty or locally invalid value, no lookup was made.
    NotChecked,
    /// A newer check was started before this one completed. Its result must be discarded.
    Superseded,
    /// The lookup failed. This never blocks the form: it is treated as "not known to exist".
    Error(String),
    Available,
    Exists,
}

impl ExistenceStatus {
    /// Only a confirmed existing CUIT blocks submission, every other outcome fails open.
    pub fn blocks_submission(&self) -> bool {
        matches!(self, ExistenceStatus::Exists)
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, ExistenceStatus::Superseded)
    }
}
