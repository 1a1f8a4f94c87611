// Storage plumbing shared by the counting and phrase repositories

pub use errors::StorageError;
pub use memory::TenantCells;

mod errors;
mod memory;
pub mod schema;

/// Reads a non-negative counter column stored as BIGINT.
pub(crate) fn column_u64(value: i64, column: &str) -> Result<u64, StorageError> {
    u64::try_from(value)
        .map_err(|_| StorageError::Corrupt(format!("{} holds negative value {}", column, value)))
}

/// Converts a counter into its BIGINT column representation.
pub(crate) fn bigint(value: u64) -> Result<i64, StorageError> {
    i64::try_from(value)
        .map_err(|_| StorageError::Corrupt(format!("value {} does not fit in BIGINT", value)))
}
