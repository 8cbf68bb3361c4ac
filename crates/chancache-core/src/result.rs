//! Result type aliases for chancache.

use crate::ChancacheError;

/// A specialized `Result` type for chancache operations.
pub type ChancacheResult<T> = Result<T, ChancacheError>;
