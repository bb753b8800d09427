use crate::error::Error as TootErr;
/// Result type returned throughout the crate.
pub type Result<T> = std::result::Result<T, TootErr>;
