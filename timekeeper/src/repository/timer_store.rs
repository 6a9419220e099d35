/// A durable key-value store holding one serialized timer record per entity.
///
/// Keys are produced by `EntityId::storage_key()`, values are the JSON form of
/// a `TimerRecord`. Implementations report failures as errors; deciding what
/// to do about them is up to the caller.
use crate::error::TrackerError;

pub trait TimerStore: Send + Sync {
    /// Retrieves the value stored under `key`.
    ///
    /// # Returns
    /// * `Ok(Some(value))` - If a value exists for the key.
    /// * `Ok(None)` - If nothing is stored under the key.
    ///
    /// # Errors
    /// * Returns a `TrackerError` if the underlying storage could not be read.
    fn get(&self, key: &str) -> Result<Option<String>, TrackerError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// * Returns a `TrackerError` if the value could not be written.
    fn set(&self, key: &str, value: &str) -> Result<(), TrackerError>;

    /// Removes the value stored under `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    /// * Returns a `TrackerError` if the underlying storage could not be modified.
    fn remove(&self, key: &str) -> Result<(), TrackerError>;

    /// Lists every key held by the store, in ascending order.
    ///
    /// # Errors
    /// * Returns a `TrackerError` if the underlying storage could not be read.
    fn keys(&self) -> Result<Vec<String>, TrackerError>;
}
