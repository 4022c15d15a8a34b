use crate::error::StoreError;
use crate::model::Todo;

mod json_store;

pub use json_store::{JsonStore, store_path};

/// One named slot in a synchronous key-value store.
///
/// `load` reports failures to the caller; the store itself decides to
/// degrade to an empty list. `save` failures are likewise reported and the
/// store swallows them after logging.
pub trait StorageSlot {
    fn load(&self) -> Result<Vec<Todo>, StoreError>;

    fn save(&self, todos: &[Todo]) -> Result<(), StoreError>;
}
