use thiserror::Error;

/// Core error type shared across coalsynth crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A statement was built with a different number of values than its
    /// table declares columns.
    #[error("table {table} expects {expected} values, found {found}")]
    ColumnCount {
        table: &'static str,
        expected: usize,
        found: usize,
    },
}

/// Convenience alias for results returned by coalsynth crates.
pub type Result<T> = std::result::Result<T, Error>;
