use uuid::Uuid;

/// Trait for records identified by a UUID that is assigned before the record reaches storage
pub trait Identifiable {
    /// Returns the unique identifier of the record
    fn get_id(&self) -> Uuid;
}

/// Trait for records that know whether storage has seen them yet
pub trait Persistable: Identifiable {
    /// `true` until the record has been written by a repository
    fn is_new_record(&self) -> bool;

    /// Called by repositories after a successful insert
    fn mark_persisted(&mut self);
}
