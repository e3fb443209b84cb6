//! Durable storage for the serialized cart.
//!
//! The cart is mirrored to a single string-keyed slot that survives
//! across sessions. Writes are synchronous whole-value overwrites; the
//! cart store is the slot's only writer.

mod file;

pub use file::FileSlot;

use thiserror::Error;

/// Errors that can occur when reading or writing the storage slot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing store failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A durable, string-keyed storage slot holding one value.
pub trait StorageSlot {
    /// Read the current value, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be read.
    fn read(&self) -> Result<Option<String>, StorageError>;

    /// Overwrite the slot with a new value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be written.
    fn write(&mut self, value: &str) -> Result<(), StorageError>;

    /// Remove the stored value. Ok even when the slot is already empty.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be modified.
    fn clear(&mut self) -> Result<(), StorageError>;
}

/// In-memory slot for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    value: Option<String>,
}

impl MemorySlot {
    /// Create an empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self { value: None }
    }

    /// Create a slot already holding a value.
    #[must_use]
    pub const fn with_value(value: String) -> Self {
        Self { value: Some(value) }
    }
}

impl StorageSlot for MemorySlot {
    fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(self.value.clone())
    }

    fn write(&mut self, value: &str) -> Result<(), StorageError> {
        self.value = Some(value.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.value = None;
        Ok(())
    }
}
